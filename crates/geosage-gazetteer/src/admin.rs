//! Country and first-level subdivision lookup tables.

use std::collections::HashMap;
use std::sync::Arc;

use geosage_core::GeoRecord;

/// Preloaded country and admin1 records, keyed by code.
#[derive(Debug, Default)]
pub struct AdminIndex {
    countries: HashMap<String, Arc<GeoRecord>>,
    admin1: HashMap<(String, String), Arc<GeoRecord>>,
}

impl AdminIndex {
    /// Build the index from any set of records; non-admin records are ignored.
    ///
    /// When several political entities share a country code the most
    /// populous one wins (ties go to the lower id).
    pub fn build<'a>(records: impl IntoIterator<Item = &'a Arc<GeoRecord>>) -> Self {
        let mut index = Self::default();
        for record in records {
            if record.country_code.is_empty() {
                continue;
            }
            if record.is_country() {
                let replace = match index.countries.get(&record.country_code) {
                    Some(existing) => outranks(record, existing),
                    None => true,
                };
                if replace {
                    index
                        .countries
                        .insert(record.country_code.clone(), Arc::clone(record));
                }
            } else if record.is_admin1() && record.has_state() {
                let key = (record.country_code.clone(), record.admin1_code.clone());
                let replace = match index.admin1.get(&key) {
                    Some(existing) => outranks(record, existing),
                    None => true,
                };
                if replace {
                    index.admin1.insert(key, Arc::clone(record));
                }
            }
        }
        index
    }

    pub fn country(&self, country_code: &str) -> Option<Arc<GeoRecord>> {
        self.countries.get(country_code).cloned()
    }

    pub fn admin1(&self, country_code: &str, admin1_code: &str) -> Option<Arc<GeoRecord>> {
        self.admin1
            .get(&(country_code.to_string(), admin1_code.to_string()))
            .cloned()
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn admin1_count(&self) -> usize {
        self.admin1.len()
    }
}

fn outranks(candidate: &GeoRecord, existing: &GeoRecord) -> bool {
    candidate.population > existing.population
        || (candidate.population == existing.population
            && candidate.geoname_id < existing.geoname_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geosage_core::FeatureClass;

    fn admin(id: i64, code: &str, cc: &str, admin1: &str, population: u64) -> Arc<GeoRecord> {
        Arc::new(GeoRecord {
            geoname_id: id,
            name: format!("admin-{}", id),
            latitude: 0.0,
            longitude: 0.0,
            population,
            feature_class: FeatureClass::A,
            feature_code: code.into(),
            country_code: cc.into(),
            admin1_code: admin1.into(),
        })
    }

    #[test]
    fn test_build_and_lookup() {
        let records = vec![
            admin(1, "PCLI", "DO", "00", 10_000_000),
            admin(2, "ADM1", "DO", "34", 1_000_000),
            admin(3, "ADM2", "DO", "34", 500),
        ];
        let index = AdminIndex::build(&records);
        assert_eq!(index.country("DO").unwrap().geoname_id, 1);
        assert_eq!(index.admin1("DO", "34").unwrap().geoname_id, 2);
        assert!(index.admin1("DO", "99").is_none());
        assert_eq!(index.country_count(), 1);
        assert_eq!(index.admin1_count(), 1);
    }

    #[test]
    fn test_most_populous_country_record_wins() {
        let records = vec![
            admin(5, "PCLD", "XX", "00", 10),
            admin(4, "PCLI", "XX", "00", 1000),
        ];
        let index = AdminIndex::build(&records);
        assert_eq!(index.country("XX").unwrap().geoname_id, 4);
    }
}
