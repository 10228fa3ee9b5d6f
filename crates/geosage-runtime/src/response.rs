//! Response envelopes and record rendering.
//!
//! Every entry point answers with the same envelope shape:
//! `{"status": "ok", "version", "results", "milliseconds"}` on success and
//! `{"status": "error", "version", "details"}` otherwise.

use geosage_core::{FocusLocation, GeoRecord};
use geosage_gazetteer::Gazetteer;
use serde_json::{json, Value};

use crate::types::*;

/// Reported in every envelope.
pub const PARSER_VERSION: &str = "1.4.1";

pub const STATUS_OK: &str = "ok";
pub const STATUS_ERROR: &str = "error";

/// Successful parse envelope.
pub fn ok_envelope(results: Value, milliseconds: u64) -> Value {
    json!({
        "status": STATUS_OK,
        "version": PARSER_VERSION,
        "results": results,
        "milliseconds": milliseconds,
    })
}

/// Lookup envelope; no timing is reported.
pub fn record_envelope(results: Value) -> Value {
    json!({
        "status": STATUS_OK,
        "version": PARSER_VERSION,
        "results": results,
    })
}

/// Failure envelope carrying a human-readable reason.
pub fn error_envelope(details: impl Into<String>) -> Value {
    json!({
        "status": STATUS_ERROR,
        "version": PARSER_VERSION,
        "details": details.into(),
    })
}

/// Render a record, filling in its country and state gazetteer ids.
pub fn location_record(record: &GeoRecord, gazetteer: &dyn Gazetteer) -> LocationRecord {
    let country_id = gazetteer
        .country(&record.country_code)
        .map(|c| c.geoname_id.to_string())
        .unwrap_or_default();
    let state_id = if record.has_state() {
        gazetteer
            .admin1(&record.country_code, &record.admin1_code)
            .map(|s| s.geoname_id.to_string())
            .unwrap_or_default()
    } else {
        String::new()
    };

    LocationRecord {
        id: record.geoname_id,
        name: record.name.clone(),
        lat: record.latitude,
        lon: record.longitude,
        population: record.population,
        feature_class: record.feature_class.to_string(),
        feature_code: record.feature_code.clone(),
        country_code: record.country_code.clone(),
        country_geo_name_id: country_id,
        state_code: record.admin1_code.clone(),
        state_geo_name_id: state_id,
    }
}

fn focus_records(locations: &[FocusLocation], gazetteer: &dyn Gazetteer) -> Vec<FocusRecord> {
    locations
        .iter()
        .map(|f| FocusRecord {
            location: location_record(&f.record, gazetteer),
            score: f.score,
        })
        .collect()
}

/// Build the `results` object for a parse.
pub fn parse_results(result: &ParseResult, gazetteer: &dyn Gazetteer) -> ParseResults {
    let mentions = result
        .resolved
        .iter()
        .map(|r| MentionRecord {
            location: location_record(&r.record, gazetteer),
            confidence: r.confidence,
            source: MentionSource {
                string: r.mention.text.clone(),
                char_index: r.mention.position,
                story_sentences_id: r.mention.sentence_id.clone(),
            },
        })
        .collect();

    ParseResults {
        places: Places {
            mentions,
            focus: FocusRecords {
                countries: focus_records(&result.focus.countries, gazetteer),
                states: focus_records(&result.focus.states, gazetteer),
                cities: focus_records(&result.focus.cities, gazetteer),
            },
        },
        people: result.people.clone(),
        organizations: result.organizations.clone(),
    }
}
