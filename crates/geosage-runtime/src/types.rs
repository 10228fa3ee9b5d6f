//! Runtime types.

use geosage_core::{FocusSummary, NamedEntityCount, ResolvedLocation};
use serde::Serialize;

/// Everything one parse produced, before rendering.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// One per place mention the gazetteer recognized, in text order.
    pub resolved: Vec<ResolvedLocation>,
    pub focus: FocusSummary,
    pub people: Vec<NamedEntityCount>,
    pub organizations: Vec<NamedEntityCount>,
}

impl ParseResult {
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty() && self.people.is_empty() && self.organizations.is_empty()
    }
}

/// A gazetteer record as rendered in responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub population: u64,
    pub feature_class: String,
    pub feature_code: String,
    pub country_code: String,
    /// Gazetteer id of the country record, empty when unknown.
    pub country_geo_name_id: String,
    pub state_code: String,
    /// Gazetteer id of the admin1 record, empty when unknown.
    pub state_geo_name_id: String,
}

/// Where in the input a mention was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionSource {
    pub string: String,
    pub char_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_sentences_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MentionRecord {
    #[serde(flatten)]
    pub location: LocationRecord,
    pub confidence: usize,
    pub source: MentionSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusRecord {
    #[serde(flatten)]
    pub location: LocationRecord,
    pub score: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FocusRecords {
    pub countries: Vec<FocusRecord>,
    pub states: Vec<FocusRecord>,
    pub cities: Vec<FocusRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Places {
    pub mentions: Vec<MentionRecord>,
    pub focus: FocusRecords,
}

/// The `results` object of a parse envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResults {
    pub places: Places,
    pub people: Vec<NamedEntityCount>,
    pub organizations: Vec<NamedEntityCount>,
}
