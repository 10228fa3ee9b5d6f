//! The gazetteer lookup contract.

use std::sync::Arc;

use geosage_core::{Candidate, GeoRecord, Result};

/// Read-only lookup service mapping surface strings to ranked records.
///
/// Implementations are shared across concurrent requests and must never be
/// mutated by callers.
pub trait Gazetteer: Send + Sync {
    /// Ranked candidates for a surface string, best first, at most
    /// `max_results`. With `fuzzy`, approximate matches are considered when
    /// no exact match exists.
    fn candidates(&self, name: &str, max_results: usize, fuzzy: bool) -> Result<Vec<Candidate>>;

    /// Look a record up by id. Misses are `Error::UnknownGazetteerId`.
    fn by_id(&self, geoname_id: i64) -> Result<Arc<GeoRecord>>;

    /// The country record for an ISO alpha-2 code.
    fn country(&self, country_code: &str) -> Option<Arc<GeoRecord>>;

    /// The first-level subdivision record for a country/admin1 pair.
    fn admin1(&self, country_code: &str, admin1_code: &str) -> Option<Arc<GeoRecord>>;
}

/// Lookup key for a place name: lowercased, whitespace collapsed.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
