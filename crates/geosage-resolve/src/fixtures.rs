//! Record and group builders shared by the unit tests.

use std::sync::Arc;

use geosage_core::{Candidate, CandidateGroup, FeatureClass, GeoRecord, MentionOccurrence};

pub fn place(
    id: i64,
    feature_code: &str,
    country_code: &str,
    admin1_code: &str,
    population: u64,
) -> Arc<GeoRecord> {
    let feature_class = match feature_code {
        c if c.starts_with("PPL") => FeatureClass::P,
        c if c.starts_with("ADM") || c.starts_with("PCL") => FeatureClass::A,
        "CONT" => FeatureClass::L,
        "LK" => FeatureClass::H,
        _ => FeatureClass::S,
    };
    Arc::new(GeoRecord {
        geoname_id: id,
        name: format!("place-{}", id),
        latitude: 0.0,
        longitude: 0.0,
        population,
        feature_class,
        feature_code: feature_code.into(),
        country_code: country_code.into(),
        admin1_code: admin1_code.into(),
    })
}

/// Candidates are ranked in the order given.
pub fn group(text: &str, candidates: Vec<(Arc<GeoRecord>, bool)>) -> CandidateGroup {
    let candidates = candidates
        .into_iter()
        .enumerate()
        .map(|(rank, (record, fuzzy))| {
            let name = record.name.clone();
            Candidate::new(record, rank, name, fuzzy)
        })
        .collect();
    CandidateGroup::new(MentionOccurrence::new(text, 0), candidates).unwrap()
}

pub fn exact(record: Arc<GeoRecord>) -> (Arc<GeoRecord>, bool) {
    (record, false)
}

pub fn fuzzy(record: Arc<GeoRecord>) -> (Arc<GeoRecord>, bool) {
    (record, true)
}
