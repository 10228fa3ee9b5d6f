//! Configuration loaded from the environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Default location of the gazetteer database.
pub const DEFAULT_GAZETTEER_PATH: &str = "/etc/geosage/gazetteer.db";

/// Top-level GeoSage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoSageConfig {
    /// HTTP server port.
    pub port: u16,
    /// Path to the read-only SQLite gazetteer.
    pub gazetteer_path: PathBuf,
    /// Number of gazetteer candidates fetched per place mention.
    pub max_results: usize,
    /// Allow fuzzy name matching in gazetteer lookups.
    pub fuzzy: bool,
    /// Replace demonyms ("Chinese") with their country name before extraction.
    pub replace_demonyms: bool,
}

impl Default for GeoSageConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            gazetteer_path: PathBuf::from(DEFAULT_GAZETTEER_PATH),
            max_results: 10,
            fuzzy: false,
            replace_demonyms: false,
        }
    }
}

impl GeoSageConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable source.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT is not a valid port: {}", p)))?,
            None => defaults.port,
        };

        let gazetteer_path = lookup("GEOSAGE_GAZETTEER")
            .map(PathBuf::from)
            .unwrap_or(defaults.gazetteer_path);

        let max_results = match lookup("GEOSAGE_MAX_RESULTS") {
            Some(n) => {
                let n: usize = n.trim().parse().map_err(|_| {
                    Error::Config(format!("GEOSAGE_MAX_RESULTS is not a number: {}", n))
                })?;
                if n == 0 {
                    return Err(Error::Config("GEOSAGE_MAX_RESULTS must be at least 1".into()));
                }
                n
            }
            None => defaults.max_results,
        };

        let fuzzy = match lookup("GEOSAGE_FUZZY") {
            Some(v) => parse_flag("GEOSAGE_FUZZY", &v)?,
            None => defaults.fuzzy,
        };

        let replace_demonyms = match lookup("GEOSAGE_REPLACE_DEMONYMS") {
            Some(v) => parse_flag("GEOSAGE_REPLACE_DEMONYMS", &v)?,
            None => defaults.replace_demonyms,
        };

        Ok(Self {
            port,
            gazetteer_path,
            max_results,
            fuzzy,
            replace_demonyms,
        })
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::Config(format!("{} is not a boolean: {}", key, other))),
    }
}
