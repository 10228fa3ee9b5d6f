//! Error types for GeoSage.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No text")]
    EmptyInput,

    #[error("No place or person entities detected in this text.")]
    NoEntitiesFound,

    #[error("Invalid GeoNames id {0}")]
    UnknownGazetteerId(i64),

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
