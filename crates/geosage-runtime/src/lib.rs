//! GeoSage runtime: the end-to-end geoparsing pipeline.
//!
//! `GeoParser` wires an extractor, a gazetteer, the disambiguator and a
//! focus strategy together and renders results as JSON envelopes that every
//! entry point (HTTP, CLI, library callers) shares.

pub mod parser;
pub mod response;
pub mod types;

pub use parser::GeoParser;
pub use response::{error_envelope, ok_envelope, record_envelope, PARSER_VERSION, STATUS_ERROR, STATUS_OK};
pub use types::*;
