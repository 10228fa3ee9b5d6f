//! Pairs place mentions with their gazetteer candidates.

use std::collections::HashMap;

use geosage_core::{Candidate, CandidateGroup, Error, MentionOccurrence, Result};
use geosage_gazetteer::Gazetteer;
use tracing::debug;

/// Look up every mention and build one group per mention with candidates.
///
/// Each distinct surface string is looked up once. Mentions the gazetteer
/// knows nothing about are dropped. Any lookup failure aborts the request.
pub fn build_groups(
    gazetteer: &dyn Gazetteer,
    mentions: &[MentionOccurrence],
    max_results: usize,
    fuzzy: bool,
) -> Result<Vec<CandidateGroup>> {
    let mut lookups: HashMap<&str, Vec<Candidate>> = HashMap::new();
    let mut groups = Vec::with_capacity(mentions.len());

    for mention in mentions {
        let text = mention.text.as_str();
        if !lookups.contains_key(text) {
            let candidates = gazetteer
                .candidates(text, max_results, fuzzy)
                .map_err(|e| Error::Upstream(format!("Gazetteer lookup for '{}' failed: {}", text, e)))?;
            lookups.insert(text, candidates);
        }
        let candidates = lookups.get(text).cloned().unwrap_or_default();

        match CandidateGroup::new(mention.clone(), candidates) {
            Some(group) => groups.push(group),
            None => debug!("No gazetteer candidates for '{}', dropping mention", text),
        }
    }

    debug!(
        "Built {} candidate groups from {} mentions ({} lookups)",
        groups.len(),
        mentions.len(),
        lookups.len()
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::place;
    use geosage_core::GeoRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Answers "Paris" with two records and counts every lookup.
    struct CountingGazetteer {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingGazetteer {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    impl Gazetteer for CountingGazetteer {
        fn candidates(&self, name: &str, max_results: usize, _fuzzy: bool) -> Result<Vec<Candidate>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Database("disk I/O error".into()));
            }
            if name != "Paris" {
                return Ok(Vec::new());
            }
            let mut candidates = vec![
                Candidate::new(place(2988507, "PPLC", "FR", "11", 2_138_551), 0, "Paris", false),
                Candidate::new(place(4717560, "PPL", "US", "TX", 24_171), 1, "Paris", false),
            ];
            candidates.truncate(max_results);
            Ok(candidates)
        }

        fn by_id(&self, geoname_id: i64) -> Result<Arc<GeoRecord>> {
            Err(Error::UnknownGazetteerId(geoname_id))
        }

        fn country(&self, _country_code: &str) -> Option<Arc<GeoRecord>> {
            None
        }

        fn admin1(&self, _country_code: &str, _admin1_code: &str) -> Option<Arc<GeoRecord>> {
            None
        }
    }

    #[test]
    fn test_repeated_mentions_looked_up_once() {
        let gazetteer = CountingGazetteer::new(false);
        let mentions = vec![
            MentionOccurrence::new("Paris", 0),
            MentionOccurrence::new("Atlantis", 10),
            MentionOccurrence::new("Paris", 20),
        ];
        let groups = build_groups(&gazetteer, &mentions, 10, false).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].mention().position, 0);
        assert_eq!(groups[1].mention().position, 20);
        assert_eq!(groups[1].len(), 2);
        assert_eq!(gazetteer.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_max_results_passed_through() {
        let gazetteer = CountingGazetteer::new(false);
        let groups = build_groups(&gazetteer, &[MentionOccurrence::new("Paris", 0)], 1, false).unwrap();
        assert_eq!(groups[0].len(), 1);
    }

    #[test]
    fn test_lookup_failure_is_upstream_error() {
        let gazetteer = CountingGazetteer::new(true);
        let err = build_groups(&gazetteer, &[MentionOccurrence::new("Paris", 0)], 10, false).unwrap_err();
        match err {
            Error::Upstream(msg) => assert!(msg.contains("Paris")),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_mentions() {
        let gazetteer = CountingGazetteer::new(false);
        assert!(build_groups(&gazetteer, &[], 10, false).unwrap().is_empty());
        assert_eq!(gazetteer.calls.load(Ordering::SeqCst), 0);
    }
}
