//! Frequency-of-mention focus.
//!
//! A place's score is the number of resolved mentions inside it. Ties go to
//! the larger aggregate population, then to the smaller identifier, so the
//! ordering never depends on input order.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use geosage_core::{FeatureClass, FocusLocation, GeoRecord, ResolvedLocation};
use geosage_gazetteer::Gazetteer;
use tracing::debug;

use crate::strategy::FocusStrategy;

/// Mentions that fell into one focus bucket.
struct Tally {
    count: usize,
    population: u64,
    /// geoname id -> (times resolved, record)
    members: HashMap<i64, (usize, Arc<GeoRecord>)>,
}

impl Tally {
    fn new() -> Self {
        Self {
            count: 0,
            population: 0,
            members: HashMap::new(),
        }
    }

    fn add(&mut self, record: &Arc<GeoRecord>) {
        self.count += 1;
        self.population = self.population.saturating_add(record.population);
        self.members
            .entry(record.geoname_id)
            .or_insert_with(|| (0, Arc::clone(record)))
            .0 += 1;
    }

    /// Most often resolved member, then most populous, then lowest id.
    fn representative(&self) -> Option<Arc<GeoRecord>> {
        self.members
            .values()
            .max_by_key(|(times, record)| {
                (*times, record.population, Reverse(record.geoname_id))
            })
            .map(|(_, record)| Arc::clone(record))
    }
}

/// Tally `resolved` into buckets and rank them.
fn rank_by_frequency<K, F, R>(resolved: &[ResolvedLocation], key: F, lookup: R) -> Vec<FocusLocation>
where
    K: Ord,
    F: Fn(&GeoRecord) -> Option<K>,
    R: Fn(&K) -> Option<Arc<GeoRecord>>,
{
    let mut tallies: BTreeMap<K, Tally> = BTreeMap::new();
    for location in resolved {
        if let Some(k) = key(&location.record) {
            tallies.entry(k).or_insert_with(Tally::new).add(&location.record);
        }
    }

    // BTreeMap iteration is key-ascending and the sort is stable, so equal
    // (count, population) keep the identifier order.
    let mut ranked: Vec<(K, Tally)> = tallies.into_iter().collect();
    ranked.sort_by_key(|(_, tally)| (Reverse(tally.count), Reverse(tally.population)));

    ranked
        .into_iter()
        .filter_map(|(k, tally)| {
            let record = lookup(&k).or_else(|| tally.representative())?;
            Some(FocusLocation {
                record,
                score: tally.count,
            })
        })
        .collect()
}

/// Scores places by how often the text mentions something inside them.
#[derive(Clone, Default)]
pub struct FrequencyOfMentionFocusStrategy {
    admin_lookup: Option<Arc<dyn Gazetteer>>,
}

impl FrequencyOfMentionFocusStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report countries and states by their own gazetteer records rather
    /// than by the mentioned place inside them, when the gazetteer has them.
    pub fn with_admin_lookup(gazetteer: Arc<dyn Gazetteer>) -> Self {
        Self {
            admin_lookup: Some(gazetteer),
        }
    }
}

impl std::fmt::Debug for FrequencyOfMentionFocusStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrequencyOfMentionFocusStrategy")
            .field("admin_lookup", &self.admin_lookup.is_some())
            .finish()
    }
}

impl FocusStrategy for FrequencyOfMentionFocusStrategy {
    fn select_countries(&self, resolved: &[ResolvedLocation]) -> Vec<FocusLocation> {
        let countries = rank_by_frequency(
            resolved,
            |r| (!r.country_code.is_empty()).then(|| r.country_code.clone()),
            |cc| self.admin_lookup.as_ref().and_then(|g| g.country(cc)),
        );
        debug!("Focus countries: {}", countries.len());
        countries
    }

    fn select_states(&self, resolved: &[ResolvedLocation]) -> Vec<FocusLocation> {
        let states = rank_by_frequency(
            resolved,
            |r| {
                let eligible = matches!(r.feature_class, FeatureClass::A | FeatureClass::P)
                    && r.has_state();
                eligible.then(|| (r.country_code.clone(), r.admin1_code.clone()))
            },
            |(cc, admin1)| self.admin_lookup.as_ref().and_then(|g| g.admin1(cc, admin1)),
        );
        debug!("Focus states: {}", states.len());
        states
    }

    fn select_cities(&self, resolved: &[ResolvedLocation]) -> Vec<FocusLocation> {
        let cities = rank_by_frequency(
            resolved,
            |r| r.is_populated_place().then_some(r.geoname_id),
            |_| None,
        );
        debug!("Focus cities: {}", cities.len());
        cities
    }
}
