//! Drives the pass chain over a request's candidate groups.

use std::collections::BTreeMap;

use geosage_core::{CandidateGroup, ResolvedLocation};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::passes::{default_passes, DisambiguationPass};

/// Pass name recorded for groups no heuristic claimed.
pub const FALLBACK: &str = "fallback";

/// A resolved location and the pass that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub location: ResolvedLocation,
    pub pass: &'static str,
}

/// Cumulative per-pass resolution counts across requests.
#[derive(Debug, Default)]
pub struct PassStats {
    counts: Mutex<BTreeMap<&'static str, u64>>,
}

impl PassStats {
    fn record(&self, pass: &'static str) {
        *self.counts.lock().entry(pass).or_insert(0) += 1;
    }

    /// Resolutions attributed to `pass` so far.
    pub fn count(&self, pass: &str) -> u64 {
        self.counts.lock().get(pass).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.lock().values().sum()
    }
}

/// Resolves every candidate group to exactly one location.
pub struct Disambiguator {
    passes: Vec<Box<dyn DisambiguationPass>>,
    stats: PassStats,
}

impl Disambiguator {
    /// Use a caller-supplied chain, applied in order.
    pub fn new(passes: Vec<Box<dyn DisambiguationPass>>) -> Self {
        Self {
            passes,
            stats: PassStats::default(),
        }
    }

    pub fn with_default_passes() -> Self {
        Self::new(default_passes())
    }

    pub fn passes(&self) -> &[Box<dyn DisambiguationPass>] {
        &self.passes
    }

    pub fn stats(&self) -> &PassStats {
        &self.stats
    }

    /// One location per group, in input order.
    pub fn disambiguate(&self, groups: &[CandidateGroup]) -> Vec<ResolvedLocation> {
        self.disambiguate_traced(groups)
            .into_iter()
            .map(|r| r.location)
            .collect()
    }

    /// Like `disambiguate`, also reporting which pass resolved each group.
    ///
    /// Sweeps the chain until a full sweep resolves nothing, so colocation
    /// passes get to see what later passes accepted. Whatever is left takes
    /// its top-ranked candidate with confidence 0.
    pub fn disambiguate_traced(&self, groups: &[CandidateGroup]) -> Vec<Resolution> {
        let mut resolved: Vec<Option<Resolution>> = vec![None; groups.len()];
        let mut accepted: Vec<ResolvedLocation> = Vec::with_capacity(groups.len());
        let mut unresolved: Vec<usize> = (0..groups.len()).collect();

        loop {
            let before_sweep = unresolved.len();
            for pass in &self.passes {
                if unresolved.is_empty() {
                    break;
                }
                let snapshot = accepted.len();
                let mut remaining = Vec::with_capacity(unresolved.len());
                for &i in &unresolved {
                    let group = &groups[i];
                    let location = pass
                        .select(group, &accepted[..snapshot])
                        .and_then(|index| group.resolve(index));
                    match location {
                        Some(location) => {
                            debug!(
                                "{} resolved '{}' to {} ({}, {})",
                                pass.name(),
                                group.mention().text,
                                location.record.geoname_id,
                                location.record.name,
                                location.record.country_code
                            );
                            self.stats.record(pass.name());
                            accepted.push(location.clone());
                            resolved[i] = Some(Resolution {
                                location,
                                pass: pass.name(),
                            });
                        }
                        None => remaining.push(i),
                    }
                }
                unresolved = remaining;
            }
            if unresolved.is_empty() || unresolved.len() == before_sweep {
                break;
            }
        }

        for &i in &unresolved {
            let group = &groups[i];
            if let Some(mut location) = group.resolve(0) {
                location.confidence = 0;
                debug!(
                    "No pass claimed '{}', falling back to {}",
                    group.mention().text,
                    location.record.geoname_id
                );
                self.stats.record(FALLBACK);
                resolved[i] = Some(Resolution {
                    location,
                    pass: FALLBACK,
                });
            }
        }

        resolved.into_iter().flatten().collect()
    }

    /// Log cumulative per-pass counts.
    pub fn log_stats(&self) {
        let counts = self.stats.counts.lock();
        let total: u64 = counts.values().sum();
        info!("Disambiguation stats: {} locations resolved", total);
        for pass in &self.passes {
            info!(
                "  {}: {} ({})",
                pass.name(),
                counts.get(pass.name()).copied().unwrap_or(0),
                pass.description()
            );
        }
        info!("  {}: {}", FALLBACK, counts.get(FALLBACK).copied().unwrap_or(0));
    }
}

impl Default for Disambiguator {
    fn default() -> Self {
        Self::with_default_passes()
    }
}
