//! Gazetteer-side data types.

use geosage_core::GeoRecord;
use serde::{Deserialize, Serialize};

/// A record together with every name it can be looked up by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GazetteerEntry {
    #[serde(flatten)]
    pub record: GeoRecord,
    /// Names besides `record.name`.
    #[serde(default)]
    pub alternate_names: Vec<String>,
}

/// Gazetteer-level statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GazetteerStats {
    pub total_records: i64,
    pub total_names: i64,
    pub countries: usize,
    pub admin1_regions: usize,
}
