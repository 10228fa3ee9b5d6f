//! Full pipeline over a small in-memory gazetteer.

use std::sync::Arc;

use geosage_core::GeoSageConfig;
use geosage_extract::HeuristicExtractor;
use geosage_gazetteer::MemoryGazetteer;
use geosage_runtime::GeoParser;
use serde_json::{json, Value};

const GAZETTEER: &str = r#"[
    {"geoname_id": 3508796, "name": "Dominican Republic", "latitude": 19.0, "longitude": -70.667,
     "population": 10648613, "feature_class": "A", "feature_code": "PCLI",
     "country_code": "DO", "admin1_code": "00", "alternate_names": ["República Dominicana"]},
    {"geoname_id": 3504158, "name": "Distrito Nacional", "latitude": 18.48, "longitude": -69.93,
     "population": 1000000, "feature_class": "A", "feature_code": "ADM1",
     "country_code": "DO", "admin1_code": "34"},
    {"geoname_id": 3492908, "name": "Santo Domingo", "latitude": 18.4719, "longitude": -69.8923,
     "population": 2201941, "feature_class": "P", "feature_code": "PPLC",
     "country_code": "DO", "admin1_code": "34", "alternate_names": ["Ciudad Trujillo"]},
    {"geoname_id": 3983105, "name": "Santo Domingo", "latitude": 22.1667, "longitude": -101.7667,
     "population": 1200, "feature_class": "P", "feature_code": "PPL",
     "country_code": "MX", "admin1_code": "24"},
    {"geoname_id": 3017382, "name": "France", "latitude": 46.0, "longitude": 2.0,
     "population": 66987244, "feature_class": "A", "feature_code": "PCLI",
     "country_code": "FR", "admin1_code": "00"},
    {"geoname_id": 3012874, "name": "Île-de-France", "latitude": 48.5, "longitude": 2.5,
     "population": 12000000, "feature_class": "A", "feature_code": "ADM1",
     "country_code": "FR", "admin1_code": "11"},
    {"geoname_id": 11071625, "name": "Auvergne-Rhône-Alpes", "latitude": 45.5, "longitude": 4.5,
     "population": 7900000, "feature_class": "A", "feature_code": "ADM1",
     "country_code": "FR", "admin1_code": "84"},
    {"geoname_id": 2988507, "name": "Paris", "latitude": 48.85, "longitude": 2.35,
     "population": 2138551, "feature_class": "P", "feature_code": "PPLC",
     "country_code": "FR", "admin1_code": "11"},
    {"geoname_id": 2996944, "name": "Lyon", "latitude": 45.75, "longitude": 4.85,
     "population": 472317, "feature_class": "P", "feature_code": "PPLA",
     "country_code": "FR", "admin1_code": "84"}
]"#;

fn parser() -> GeoParser {
    let gazetteer = MemoryGazetteer::from_json(GAZETTEER).unwrap();
    GeoParser::new(
        Arc::new(HeuristicExtractor::new()),
        Arc::new(gazetteer),
        GeoSageConfig::default(),
    )
}

fn focus_scores(envelope: &Value, granularity: &str) -> Vec<(i64, u64)> {
    envelope["results"]["places"]["focus"][granularity]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| (f["id"].as_i64().unwrap(), f["score"].as_u64().unwrap()))
        .collect()
}

#[test]
fn santo_domingo_resolves_to_the_capital() {
    let envelope = parser().parse_text("This is about the Santo Domingo.", false);

    assert_eq!(envelope["status"], "ok");
    assert_eq!(envelope["version"], "1.4.1");
    assert!(envelope["milliseconds"].is_u64());

    let mentions = envelope["results"]["places"]["mentions"].as_array().unwrap();
    assert_eq!(mentions.len(), 1);
    let mention = &mentions[0];
    assert_eq!(mention["id"], 3492908);
    assert_eq!(mention["countryCode"], "DO");
    assert_eq!(mention["countryGeoNameId"], "3508796");
    assert_eq!(mention["stateGeoNameId"], "3504158");
    assert_eq!(mention["confidence"], 0);
    assert_eq!(mention["source"]["string"], "Santo Domingo");
    assert_eq!(mention["source"]["charIndex"], 18);

    assert_eq!(envelope["results"]["people"], json!([]));
    assert_eq!(focus_scores(&envelope, "countries"), vec![(3508796, 1)]);
    assert_eq!(focus_scores(&envelope, "states"), vec![(3504158, 1)]);
    assert_eq!(focus_scores(&envelope, "cities"), vec![(3492908, 1)]);
}

#[test]
fn focus_aggregates_repeated_mentions() {
    let envelope = parser().parse_nlp_json(
        r#"{"locations": [
                {"text": "Paris", "charIndex": 0},
                {"text": "Lyon", "charIndex": 10},
                {"text": "Paris", "charIndex": 20}
            ]}"#,
    );

    assert_eq!(envelope["status"], "ok");
    assert_eq!(focus_scores(&envelope, "countries"), vec![(3017382, 3)]);
    assert_eq!(
        focus_scores(&envelope, "states"),
        vec![(3012874, 2), (11071625, 1)]
    );
    assert_eq!(
        focus_scores(&envelope, "cities"),
        vec![(2988507, 2), (2996944, 1)]
    );
}

#[test]
fn demonyms_become_country_mentions_on_request() {
    let p = parser();
    let text = "Dominican officials visited Santo Domingo.";

    let replaced = p.parse_text(text, true);
    assert_eq!(focus_scores(&replaced, "countries"), vec![(3508796, 2)]);
    let mentions = replaced["results"]["places"]["mentions"].as_array().unwrap();
    assert_eq!(mentions[0]["id"], 3508796);
    assert_eq!(mentions[1]["id"], 3492908);

    let plain = p.parse_text(text, false);
    assert_eq!(focus_scores(&plain, "countries"), vec![(3508796, 1)]);
}

#[test]
fn country_names_survive_demonym_replacement() {
    let p = parser();
    let text = "officials met in the Dominican Republic.";
    for replace in [false, true] {
        let envelope = p.parse_text(text, replace);
        let mentions = envelope["results"]["places"]["mentions"].as_array().unwrap();
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0]["id"], 3508796);
        assert_eq!(mentions[0]["source"]["string"], "Dominican Republic");
    }
}

#[test]
fn sentences_carry_their_ids() {
    let envelope = parser().parse_sentences(
        r#"[{"sentence": "This is about the Santo Domingo.", "story_sentences_id": 9001},
            {"sentence": "Paris is far away.", "story_sentences_id": "9002"}]"#,
        false,
    );

    assert_eq!(envelope["status"], "ok");
    let mentions = envelope["results"]["places"]["mentions"].as_array().unwrap();
    assert_eq!(mentions.len(), 2);
    assert_eq!(mentions[0]["source"]["storySentencesId"], "9001");
    assert_eq!(mentions[0]["source"]["charIndex"], 18);
    assert_eq!(mentions[1]["id"], 2988507);
    assert_eq!(mentions[1]["source"]["storySentencesId"], "9002");
    assert_eq!(mentions[1]["source"]["charIndex"], 0);
}

#[test]
fn pass_statistics_accumulate_across_requests() {
    let p = parser();
    p.parse_text("This is about the Santo Domingo.", false);
    p.parse_text("Santo Domingo again.", false);
    assert_eq!(p.disambiguator().stats().count("top-admin-populated"), 2);
    p.log_stats();
}
