//! Entity extraction contract and shared result types.
//!
//! Extraction finds raw name occurrences; it never consults the gazetteer.
//! Place mentions that the gazetteer cannot match are dropped later, during
//! candidate grouping.

pub mod demonyms;
pub mod entities;
pub mod lexicon;

use geosage_core::{MentionOccurrence, NamedEntityCount, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Everything extracted from one request's text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedEntities {
    /// Place mentions, ordered by position.
    pub locations: Vec<MentionOccurrence>,
    pub people: Vec<NamedEntityCount>,
    pub organizations: Vec<NamedEntityCount>,
}

impl ExtractedEntities {
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.people.is_empty() && self.organizations.is_empty()
    }

    /// Fold another extraction into this one, summing name counts.
    pub fn merge(&mut self, other: ExtractedEntities) {
        self.locations.extend(other.locations);
        add_counts(&mut self.people, other.people);
        add_counts(&mut self.organizations, other.organizations);
    }
}

/// One pre-segmented sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceInput {
    pub sentence: String,
    #[serde(default, deserialize_with = "id_as_string")]
    pub story_sentences_id: Option<String>,
}

/// Extraction collaborator.
pub trait EntityExtractor: Send + Sync {
    /// Extract mentions from free text. Location mentions must be ordered by
    /// position.
    fn extract(&self, text: &str) -> Result<ExtractedEntities>;

    /// Extract from pre-segmented sentences. Location offsets are relative to
    /// their sentence and carry the sentence id.
    fn extract_sentences(&self, sentences: &[SentenceInput]) -> Result<ExtractedEntities> {
        let mut all = ExtractedEntities::default();
        for input in sentences {
            let mut found = self.extract(&input.sentence)?;
            if let Some(id) = &input.story_sentences_id {
                for location in &mut found.locations {
                    location.sentence_id = Some(id.clone());
                }
            }
            all.merge(found);
        }
        Ok(all)
    }
}

/// Count names, keeping first-appearance order.
pub fn count_names<I, S>(names: I) -> Vec<NamedEntityCount>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counts: Vec<NamedEntityCount> = Vec::new();
    for name in names {
        let name = name.into();
        match counts.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.count += 1,
            None => counts.push(NamedEntityCount { name, count: 1 }),
        }
    }
    counts
}

fn add_counts(into: &mut Vec<NamedEntityCount>, from: Vec<NamedEntityCount>) {
    for entity in from {
        match into.iter_mut().find(|c| c.name == entity.name) {
            Some(existing) => existing.count += entity.count,
            None => into.push(entity),
        }
    }
}

/// Sentence ids arrive as numbers or strings.
fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
