//! Candidate ranking shared by every gazetteer backend.
//!
//! Exact matches rank primary-name hits before alternate-name hits, then by
//! population, then by id. Fuzzy matches rank by Jaro–Winkler similarity
//! first. Ids break every remaining tie so rankings are reproducible.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use geosage_core::{Candidate, GeoRecord};

/// Minimum Jaro–Winkler similarity for a fuzzy candidate.
pub const FUZZY_THRESHOLD: f64 = 0.88;

/// A raw name match before ranking.
#[derive(Debug, Clone)]
pub struct NameHit {
    pub record: Arc<GeoRecord>,
    pub matched_name: String,
    /// Matched the record's primary name.
    pub primary: bool,
    /// 1.0 for exact matches.
    pub similarity: f64,
}

/// Similarity between a normalized query and a normalized gazetteer name.
pub fn similarity(query_key: &str, name_key: &str) -> f64 {
    strsim::jaro_winkler(query_key, name_key)
}

/// Deduplicate hits per record, order them and assign ranks.
pub fn rank_hits(hits: Vec<NameHit>, max_results: usize, fuzzy: bool) -> Vec<Candidate> {
    let mut best: HashMap<i64, NameHit> = HashMap::new();
    for hit in hits {
        if fuzzy && hit.similarity < FUZZY_THRESHOLD {
            continue;
        }
        match best.get(&hit.record.geoname_id) {
            Some(existing) if compare_hits(existing, &hit) != Ordering::Greater => {}
            _ => {
                best.insert(hit.record.geoname_id, hit);
            }
        }
    }

    let mut ranked: Vec<NameHit> = best.into_values().collect();
    ranked.sort_by(compare_hits);
    ranked.truncate(max_results);

    ranked
        .into_iter()
        .enumerate()
        .map(|(rank, hit)| Candidate::new(hit.record, rank, hit.matched_name, fuzzy))
        .collect()
}

/// `Less` means `a` ranks ahead of `b`.
fn compare_hits(a: &NameHit, b: &NameHit) -> Ordering {
    b.similarity
        .partial_cmp(&a.similarity)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.primary.cmp(&a.primary))
        .then_with(|| b.record.population.cmp(&a.record.population))
        .then_with(|| a.record.geoname_id.cmp(&b.record.geoname_id))
        .then_with(|| a.matched_name.cmp(&b.matched_name))
}
