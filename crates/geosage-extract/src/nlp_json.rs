//! Entities supplied by an upstream NLP step.
//!
//! ```json
//! {
//!   "locations": [{"text": "Dhaka", "charIndex": 11, "sentenceId": "100"}],
//!   "people": ["Sheikh Hasina"],
//!   "organizations": ["United Nations", "United Nations"]
//! }
//! ```
//!
//! Repeated people/organization names are counted.

use geosage_core::{MentionOccurrence, Result};
use serde::Deserialize;

use crate::extract::{count_names, ExtractedEntities};

#[derive(Debug, Deserialize)]
struct NlpLocation {
    text: String,
    #[serde(rename = "charIndex", default)]
    char_index: usize,
    #[serde(rename = "sentenceId", default)]
    sentence_id: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct NlpEntities {
    #[serde(default)]
    locations: Vec<NlpLocation>,
    #[serde(default)]
    people: Vec<String>,
    #[serde(default)]
    organizations: Vec<String>,
}

/// Parse pre-extracted entities. Location mentions come back ordered by
/// position; blank names are skipped.
pub fn entities_from_nlp_json(json: &str) -> Result<ExtractedEntities> {
    let parsed: NlpEntities = serde_json::from_str(json)?;

    let mut locations: Vec<MentionOccurrence> = parsed
        .locations
        .into_iter()
        .filter(|l| !l.text.trim().is_empty())
        .map(|l| {
            let mention = MentionOccurrence::new(l.text.trim(), l.char_index);
            match l.sentence_id {
                Some(serde_json::Value::String(id)) => mention.in_sentence(id),
                Some(serde_json::Value::Null) | None => mention,
                Some(other) => mention.in_sentence(other.to_string()),
            }
        })
        .collect();
    locations.sort_by_key(|l| l.position);

    let clean = |names: Vec<String>| {
        names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
    };

    Ok(ExtractedEntities {
        locations,
        people: count_names(clean(parsed.people)),
        organizations: count_names(clean(parsed.organizations)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geosage_core::Error;

    #[test]
    fn test_parses_all_entity_kinds() {
        let entities = entities_from_nlp_json(
            r#"{
                "locations": [
                    {"text": "Chittagong", "charIndex": 40, "sentenceId": 7},
                    {"text": "Dhaka", "charIndex": 11, "sentenceId": "100"}
                ],
                "people": ["Sheikh Hasina"],
                "organizations": ["United Nations", "United Nations", " "]
            }"#,
        )
        .unwrap();

        assert_eq!(entities.locations[0].text, "Dhaka");
        assert_eq!(entities.locations[0].sentence_id.as_deref(), Some("100"));
        assert_eq!(entities.locations[1].sentence_id.as_deref(), Some("7"));
        assert_eq!(entities.people[0].name, "Sheikh Hasina");
        assert_eq!(entities.organizations.len(), 1);
        assert_eq!(entities.organizations[0].count, 2);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let entities = entities_from_nlp_json(r#"{"people": ["Obama"]}"#).unwrap();
        assert!(entities.locations.is_empty());
        assert_eq!(entities.people.len(), 1);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            entities_from_nlp_json("{not json"),
            Err(Error::Json(_))
        ));
    }
}
