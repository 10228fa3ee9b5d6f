//! Heuristic named-entity extraction.
//!
//! Finds runs of capitalized words and sorts them into people (titles,
//! speech verbs, known surnames), organizations (corporate/institutional
//! head and tail words) and everything else, which is offered to the
//! gazetteer as a place mention.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

use geosage_core::{MentionOccurrence, Result};

use super::lexicon::{ORG_HEADS, ORG_SUFFIXES, STOPWORDS, TITLE_WORDS};
use super::{count_names, EntityExtractor, ExtractedEntities};

/// Capitalized words joined by spaces, optionally through lowercase
/// particles ("Gulf of Mexico", "Rio de Janeiro").
static NAME_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:(?:St|Ft|Mt)\.\s+)?\p{Lu}[\p{L}\p{M}'’\-]*(?:\s+(?:(?:of|de|del|da|do|dos|das|la|le|el|du|upon)\s+)?\p{Lu}[\p{L}\p{M}'’\-]*)*",
    )
    .unwrap()
});

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

static TITLE_ABBREV_BEFORE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s)(?:Mr|Mrs|Ms|Dr|Prof|Sen|Rep|Gov|Gen|Lt|Col|Sgt|Rev)\.\s+$").unwrap()
});

static SPEECH_AFTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^,?\s+(?:said|says|told|added|stated|explained|argued|announced)\b").unwrap()
});

static SENTENCE_START_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|[.!?]\s+|\n)\s*$").unwrap());

#[derive(Debug, PartialEq)]
enum EntityKind {
    Person(String),
    Organization(String),
    Location,
}

/// Regex/lexicon based extractor. Stateless and cheap to share.
#[derive(Debug, Default, Clone)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Tokens of a run as absolute byte spans, with stopwords, sentence-start
    /// verbs and a trailing possessive removed.
    fn trim_run(text: &str, start: usize, end: usize) -> Vec<(usize, usize)> {
        let mut tokens: Vec<(usize, usize)> = TOKEN_RE
            .find_iter(&text[start..end])
            .map(|t| (start + t.start(), start + t.end()))
            .collect();

        while let Some(&(s, e)) = tokens.first() {
            let word = &text[s..e];
            let at_sentence_start = SENTENCE_START_RE.is_match(&text[..s]);
            let sentence_verb = at_sentence_start
                && tokens.len() > 1
                && (word.ends_with("ing") || word.ends_with("ed") || word.ends_with("ly"));
            if STOPWORDS.contains(word) || sentence_verb {
                tokens.remove(0);
            } else {
                break;
            }
        }
        while let Some(&(s, e)) = tokens.last() {
            if STOPWORDS.contains(&text[s..e]) {
                tokens.pop();
            } else {
                break;
            }
        }

        if let Some(last) = tokens.last_mut() {
            let word = &text[last.0..last.1];
            for suffix in ["'s", "’s"] {
                if word.len() > suffix.len() && word.ends_with(suffix) {
                    last.1 -= suffix.len();
                    break;
                }
            }
            let trimmed = text[last.0..last.1].trim_end_matches(['-', '\'', '’']);
            last.1 = last.0 + trimmed.len();
        }
        tokens.retain(|(s, e)| e > s);
        tokens
    }

    fn classify(
        text: &str,
        tokens: &[(usize, usize)],
        surnames: &HashSet<String>,
    ) -> Option<EntityKind> {
        let words: Vec<&str> = tokens.iter().map(|&(s, e)| &text[s..e]).collect();
        let start = tokens.first()?.0;
        let end = tokens.last()?.1;
        let first = words[0];
        let last = words[words.len() - 1].trim_end_matches('.');

        if TITLE_WORDS.contains(first) {
            return if words.len() > 1 {
                Some(EntityKind::Person(words[1..].join(" ")))
            } else {
                None
            };
        }
        if TITLE_ABBREV_BEFORE_RE.is_match(&text[..start]) {
            return Some(EntityKind::Person(words.join(" ")));
        }
        if ORG_SUFFIXES.contains(last) || (words.len() > 1 && ORG_HEADS.contains(first)) {
            return Some(EntityKind::Organization(words.join(" ")));
        }
        if words.len() > 1 && SPEECH_AFTER_RE.is_match(&text[end..]) {
            return Some(EntityKind::Person(words.join(" ")));
        }
        if words.len() == 1 && surnames.contains(first) {
            return Some(EntityKind::Person(first.to_string()));
        }
        Some(EntityKind::Location)
    }
}

impl EntityExtractor for HeuristicExtractor {
    fn extract(&self, text: &str) -> Result<ExtractedEntities> {
        let mut locations = Vec::new();
        let mut people: Vec<String> = Vec::new();
        let mut organizations: Vec<String> = Vec::new();
        let mut surnames: HashSet<String> = HashSet::new();

        for m in NAME_RUN_RE.find_iter(text) {
            let tokens = Self::trim_run(text, m.start(), m.end());
            if tokens.is_empty() {
                continue;
            }
            match Self::classify(text, &tokens, &surnames) {
                Some(EntityKind::Person(name)) => {
                    if let Some(surname) = name.split_whitespace().last() {
                        surnames.insert(surname.to_string());
                    }
                    people.push(name);
                }
                Some(EntityKind::Organization(name)) => organizations.push(name),
                Some(EntityKind::Location) => {
                    let (start, end) = (tokens[0].0, tokens[tokens.len() - 1].1);
                    locations.push(MentionOccurrence::new(
                        &text[start..end],
                        char_offset(text, start),
                    ));
                }
                None => {}
            }
        }

        debug!(
            "Extracted {} place, {} person, {} organization mentions",
            locations.len(),
            people.len(),
            organizations.len()
        );
        Ok(ExtractedEntities {
            locations,
            people: count_names(people),
            organizations: count_names(organizations),
        })
    }
}

/// Character offset of a byte index.
fn char_offset(text: &str, byte_index: usize) -> usize {
    text[..byte_index].chars().count()
}
