//! GeoSage Resolve: picks one gazetteer record per place mention.
//!
//! Mentions are first paired with their ranked candidates (`grouping`), then
//! an ordered chain of heuristics (`passes`) claims the groups it is
//! confident about. The `Disambiguator` drives the chain to a fixpoint and
//! falls back to each remaining group's top-ranked candidate.

pub mod disambiguator;
pub mod grouping;
pub mod passes;

pub use disambiguator::{Disambiguator, PassStats, Resolution, FALLBACK};
pub use grouping::build_groups;
pub use passes::{default_passes, DisambiguationPass};

#[cfg(test)]
mod fixtures;
