//! In-memory gazetteer over a fixed set of entries.

use std::collections::HashMap;
use std::sync::Arc;

use geosage_core::{Candidate, Error, GeoRecord, Result};
use tracing::info;

use crate::admin::AdminIndex;
use crate::gazetteer::{normalize_name, Gazetteer};
use crate::ranking::{rank_hits, similarity, NameHit};
use crate::types::{GazetteerEntry, GazetteerStats};

struct NameEntry {
    record: Arc<GeoRecord>,
    name: String,
    primary: bool,
}

/// Gazetteer held entirely in memory. Immutable once built.
pub struct MemoryGazetteer {
    by_id: HashMap<i64, Arc<GeoRecord>>,
    names: HashMap<String, Vec<NameEntry>>,
    admin: AdminIndex,
}

impl MemoryGazetteer {
    /// Index a set of entries by every name they carry.
    pub fn new(entries: Vec<GazetteerEntry>) -> Self {
        let mut by_id = HashMap::new();
        let mut names: HashMap<String, Vec<NameEntry>> = HashMap::new();

        for entry in entries {
            let record = Arc::new(entry.record);
            let primary_key = normalize_name(&record.name);
            names.entry(primary_key.clone()).or_default().push(NameEntry {
                record: Arc::clone(&record),
                name: record.name.clone(),
                primary: true,
            });
            for alt in entry.alternate_names {
                let key = normalize_name(&alt);
                if key.is_empty() || key == primary_key {
                    continue;
                }
                names.entry(key).or_default().push(NameEntry {
                    record: Arc::clone(&record),
                    name: alt,
                    primary: false,
                });
            }
            by_id.insert(record.geoname_id, record);
        }

        let admin = AdminIndex::build(by_id.values());
        info!(
            "MemoryGazetteer initialized: {} records, {} names",
            by_id.len(),
            names.len()
        );

        Self { by_id, names, admin }
    }

    /// Build from a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<GazetteerEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn stats(&self) -> GazetteerStats {
        GazetteerStats {
            total_records: self.by_id.len() as i64,
            total_names: self.names.values().map(|v| v.len() as i64).sum(),
            countries: self.admin.country_count(),
            admin1_regions: self.admin.admin1_count(),
        }
    }

    fn hits_for(&self, key: &str, similarity: f64) -> Vec<NameHit> {
        self.names
            .get(key)
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| NameHit {
                        record: Arc::clone(&e.record),
                        matched_name: e.name.clone(),
                        primary: e.primary,
                        similarity,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Gazetteer for MemoryGazetteer {
    fn candidates(&self, name: &str, max_results: usize, fuzzy: bool) -> Result<Vec<Candidate>> {
        let key = normalize_name(name);
        if key.is_empty() || max_results == 0 {
            return Ok(Vec::new());
        }

        let exact = self.hits_for(&key, 1.0);
        if !exact.is_empty() || !fuzzy {
            return Ok(rank_hits(exact, max_results, false));
        }

        let mut approximate = Vec::new();
        for name_key in self.names.keys() {
            let score = similarity(&key, name_key);
            approximate.extend(self.hits_for(name_key, score));
        }
        Ok(rank_hits(approximate, max_results, true))
    }

    fn by_id(&self, geoname_id: i64) -> Result<Arc<GeoRecord>> {
        self.by_id
            .get(&geoname_id)
            .cloned()
            .ok_or(Error::UnknownGazetteerId(geoname_id))
    }

    fn country(&self, country_code: &str) -> Option<Arc<GeoRecord>> {
        self.admin.country(country_code)
    }

    fn admin1(&self, country_code: &str, admin1_code: &str) -> Option<Arc<GeoRecord>> {
        self.admin.admin1(country_code, admin1_code)
    }
}
