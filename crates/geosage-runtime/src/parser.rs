//! The geoparsing pipeline.
//!
//! extraction → candidate grouping → disambiguation → focus → rendering.
//! Everything here is synchronous; callers on an async runtime should run it
//! on a blocking thread.

use std::sync::Arc;
use std::time::Instant;

use geosage_core::{Error, GeoSageConfig, Result};
use geosage_extract::{
    entities_from_nlp_json, replace_demonyms, EntityExtractor, ExtractedEntities, SentenceInput,
};
use geosage_focus::{FocusStrategy, FrequencyOfMentionFocusStrategy};
use geosage_gazetteer::Gazetteer;
use geosage_resolve::{build_groups, Disambiguator};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::response::{error_envelope, location_record, ok_envelope, parse_results, record_envelope};
use crate::types::ParseResult;

/// Shared, long-lived parser. One instance serves every request.
pub struct GeoParser {
    extractor: Arc<dyn EntityExtractor>,
    gazetteer: Arc<dyn Gazetteer>,
    disambiguator: Disambiguator,
    focus: Box<dyn FocusStrategy>,
    config: GeoSageConfig,
}

impl GeoParser {
    /// Default pass chain and frequency-of-mention focus with country/state
    /// records looked up in `gazetteer`.
    pub fn new(
        extractor: Arc<dyn EntityExtractor>,
        gazetteer: Arc<dyn Gazetteer>,
        config: GeoSageConfig,
    ) -> Self {
        let focus = FrequencyOfMentionFocusStrategy::with_admin_lookup(Arc::clone(&gazetteer));
        info!(
            "GeoParser initialized: max_results={}, fuzzy={}, replace_demonyms={}",
            config.max_results, config.fuzzy, config.replace_demonyms
        );
        Self {
            extractor,
            gazetteer,
            disambiguator: Disambiguator::with_default_passes(),
            focus: Box::new(focus),
            config,
        }
    }

    pub fn with_disambiguator(mut self, disambiguator: Disambiguator) -> Self {
        self.disambiguator = disambiguator;
        self
    }

    pub fn with_focus_strategy(mut self, focus: Box<dyn FocusStrategy>) -> Self {
        self.focus = focus;
        self
    }

    pub fn config(&self) -> &GeoSageConfig {
        &self.config
    }

    pub fn gazetteer(&self) -> &Arc<dyn Gazetteer> {
        &self.gazetteer
    }

    pub fn disambiguator(&self) -> &Disambiguator {
        &self.disambiguator
    }

    /// Extract from free text and resolve. Demonyms are replaced when either
    /// the caller or the configuration asks for it.
    pub fn extract_and_resolve(&self, text: &str, replace: bool) -> Result<ParseResult> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        let text = if replace || self.config.replace_demonyms {
            replace_demonyms(text)
        } else {
            text.to_string()
        };
        let entities = self.extractor.extract(&text).map_err(upstream)?;
        self.resolve(entities)
    }

    /// Extract from pre-segmented sentences and resolve.
    pub fn extract_and_resolve_sentences(
        &self,
        sentences: &[SentenceInput],
        replace: bool,
    ) -> Result<ParseResult> {
        if !sentences.is_empty() && sentences.iter().all(|s| s.sentence.trim().is_empty()) {
            return Err(Error::EmptyInput);
        }
        let replaced: Vec<SentenceInput>;
        let input: &[SentenceInput] = if replace || self.config.replace_demonyms {
            replaced = sentences
                .iter()
                .map(|s| SentenceInput {
                    sentence: replace_demonyms(&s.sentence),
                    story_sentences_id: s.story_sentences_id.clone(),
                })
                .collect();
            &replaced
        } else {
            sentences
        };
        let entities = self.extractor.extract_sentences(input).map_err(upstream)?;
        self.resolve(entities)
    }

    /// Resolve already-extracted entities.
    pub fn resolve(&self, entities: ExtractedEntities) -> Result<ParseResult> {
        if entities.is_empty() {
            return Err(Error::NoEntitiesFound);
        }

        let groups = build_groups(
            self.gazetteer.as_ref(),
            &entities.locations,
            self.config.max_results,
            self.config.fuzzy,
        )?;
        let resolved = self.disambiguator.disambiguate(&groups);
        let focus = self.focus.compute_focus(&resolved);

        debug!(
            "Resolved {} of {} place mentions; {} people, {} organizations",
            resolved.len(),
            entities.locations.len(),
            entities.people.len(),
            entities.organizations.len()
        );

        Ok(ParseResult {
            resolved,
            focus,
            people: entities.people,
            organizations: entities.organizations,
        })
    }

    /// Parse free text into a response envelope.
    pub fn parse_text(&self, text: &str, replace: bool) -> Value {
        self.timed(|| self.extract_and_resolve(text, replace))
    }

    /// Parse a JSON array of `{"sentence", "story_sentences_id"}` objects.
    pub fn parse_sentences(&self, json: &str, replace: bool) -> Value {
        if json.trim().is_empty() {
            return error_envelope(Error::EmptyInput.to_string());
        }
        self.timed(|| {
            let sentences: Vec<SentenceInput> = serde_json::from_str(json)?;
            self.extract_and_resolve_sentences(&sentences, replace)
        })
    }

    /// Parse entities extracted by an upstream NLP step.
    pub fn parse_nlp_json(&self, json: &str) -> Value {
        if json.trim().is_empty() {
            return error_envelope(Error::EmptyInput.to_string());
        }
        self.timed(|| self.resolve(entities_from_nlp_json(json)?))
    }

    /// Envelope describing a single gazetteer record.
    pub fn geoname_info(&self, geoname_id: i64) -> Value {
        match self.gazetteer.by_id(geoname_id) {
            Ok(record) => {
                let rendered = location_record(&record, self.gazetteer.as_ref());
                match serde_json::to_value(rendered) {
                    Ok(results) => record_envelope(results),
                    Err(e) => error_envelope(e.to_string()),
                }
            }
            Err(e) => {
                debug!("geoname_info({}) failed: {}", geoname_id, e);
                error_envelope(e.to_string())
            }
        }
    }

    /// Log cumulative disambiguation statistics.
    pub fn log_stats(&self) {
        self.disambiguator.log_stats();
    }

    /// Run a parse, timing it and folding any error into the envelope.
    fn timed<F>(&self, parse: F) -> Value
    where
        F: FnOnce() -> Result<ParseResult>,
    {
        let start = Instant::now();
        let result = match parse() {
            Ok(result) => Ok(result),
            Err(Error::NoEntitiesFound) => {
                debug!("No entities found");
                Ok(ParseResult::default())
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(result) => {
                let results = parse_results(&result, self.gazetteer.as_ref());
                match serde_json::to_value(results) {
                    Ok(value) => ok_envelope(value, start.elapsed().as_millis() as u64),
                    Err(e) => error_envelope(e.to_string()),
                }
            }
            Err(Error::EmptyInput) => error_envelope(Error::EmptyInput.to_string()),
            Err(e) => {
                warn!("Parse failed: {}", e);
                error_envelope(e.to_string())
            }
        }
    }
}

fn upstream(e: Error) -> Error {
    match e {
        Error::Upstream(_) => e,
        other => Error::Upstream(format!("Entity extraction failed: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geosage_extract::HeuristicExtractor;
    use geosage_gazetteer::MemoryGazetteer;

    struct FailingExtractor;

    impl EntityExtractor for FailingExtractor {
        fn extract(&self, _text: &str) -> Result<ExtractedEntities> {
            Err(Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "model unavailable")))
        }
    }

    fn parser_with(extractor: Arc<dyn EntityExtractor>) -> GeoParser {
        let gazetteer = MemoryGazetteer::from_json(
            r#"[{"geoname_id": 2988507, "name": "Paris", "latitude": 48.85, "longitude": 2.35,
                 "population": 2138551, "feature_class": "P", "feature_code": "PPLC",
                 "country_code": "FR", "admin1_code": "11"}]"#,
        )
        .unwrap();
        GeoParser::new(extractor, Arc::new(gazetteer), GeoSageConfig::default())
    }

    #[test]
    fn test_blank_text_is_no_text_error() {
        let parser = parser_with(Arc::new(HeuristicExtractor::new()));
        let envelope = parser.parse_text("   \n", false);
        assert_eq!(envelope["status"], "error");
        assert_eq!(envelope["details"], "No text");
        assert!(matches!(parser.extract_and_resolve("", false), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_nothing_found_is_ok_and_empty() {
        let parser = parser_with(Arc::new(HeuristicExtractor::new()));
        let envelope = parser.parse_text("nothing to see here", false);
        assert_eq!(envelope["status"], "ok");
        assert_eq!(envelope["results"]["places"]["mentions"], serde_json::json!([]));
        assert_eq!(envelope["results"]["people"], serde_json::json!([]));
        assert_eq!(
            envelope["results"]["places"]["focus"],
            serde_json::json!({"countries": [], "states": [], "cities": []})
        );
        assert!(envelope["milliseconds"].is_u64());
    }

    #[test]
    fn test_extractor_failure_is_error_envelope() {
        let parser = parser_with(Arc::new(FailingExtractor));
        assert!(matches!(
            parser.extract_and_resolve("Paris", false),
            Err(Error::Upstream(_))
        ));
        let envelope = parser.parse_text("Paris", false);
        assert_eq!(envelope["status"], "error");
        assert!(envelope["details"].as_str().unwrap().contains("model unavailable"));
    }

    #[test]
    fn test_malformed_sentences_json() {
        let parser = parser_with(Arc::new(HeuristicExtractor::new()));
        assert_eq!(parser.parse_sentences("", false)["details"], "No text");
        assert_eq!(parser.parse_sentences("[{", false)["status"], "error");
    }

    #[test]
    fn test_empty_sentence_array_is_ok_and_empty() {
        let parser = parser_with(Arc::new(HeuristicExtractor::new()));
        let envelope = parser.parse_sentences("[]", false);
        assert_eq!(envelope["status"], "ok");
        assert_eq!(envelope["results"]["places"]["mentions"], serde_json::json!([]));
    }

    #[test]
    fn test_geoname_info() {
        let parser = parser_with(Arc::new(HeuristicExtractor::new()));
        let found = parser.geoname_info(2988507);
        assert_eq!(found["status"], "ok");
        assert_eq!(found["results"]["name"], "Paris");

        let missing = parser.geoname_info(1);
        assert_eq!(missing["status"], "error");
        assert_eq!(missing["details"], "Invalid GeoNames id 1");
    }
}
