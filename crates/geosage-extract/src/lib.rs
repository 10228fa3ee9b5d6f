//! GeoSage Extract: place, person and organization mentions from text.

pub mod extract;
pub mod nlp_json;

pub use extract::demonyms::replace_demonyms;
pub use extract::entities::HeuristicExtractor;
pub use extract::{EntityExtractor, ExtractedEntities, SentenceInput};
pub use nlp_json::entities_from_nlp_json;
