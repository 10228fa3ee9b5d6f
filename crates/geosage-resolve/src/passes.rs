//! Disambiguation heuristics.
//!
//! Each pass looks at one unresolved group at a time and either names the
//! candidate it is confident about or abstains. Passes only see locations
//! accepted before they started, never their own picks for sibling groups.

use std::collections::HashSet;

use geosage_core::{Candidate, CandidateGroup, FeatureClass, ResolvedLocation};

/// Feature codes of political entities that count as "countries".
const POLITICAL_ENTITY_CODES: &[&str] = &["PCL", "PCLI", "PCLD", "PCLF", "PCLS", "PCLIX"];

/// One heuristic in the disambiguation chain.
pub trait DisambiguationPass: Send + Sync {
    /// Short identifier used in logs and statistics.
    fn name(&self) -> &'static str;

    /// Human-readable summary of what the pass picks.
    fn description(&self) -> &'static str;

    /// Index into `group.candidates()` of the chosen candidate, or `None` to
    /// leave the group for a later pass.
    fn select(&self, group: &CandidateGroup, accepted: &[ResolvedLocation]) -> Option<usize>;
}

/// The default chain, most confident first.
pub fn default_passes() -> Vec<Box<dyn DisambiguationPass>> {
    vec![
        Box::new(LargeAreasPass),
        Box::new(FuzzyMatchedCountriesPass),
        Box::new(ExactAdmin1MatchPass),
        Box::new(ExactColocationsPass),
        Box::new(TopAdminPopulatedPass),
        Box::new(TopColocationsPass),
    ]
}

/// Countries and (country, admin1) pairs already accepted.
struct Colocation<'a> {
    countries: HashSet<&'a str>,
    states: HashSet<(&'a str, &'a str)>,
}

impl<'a> Colocation<'a> {
    fn of(accepted: &'a [ResolvedLocation]) -> Self {
        let mut countries = HashSet::new();
        let mut states = HashSet::new();
        for location in accepted {
            let record = &location.record;
            if record.country_code.is_empty() {
                continue;
            }
            countries.insert(record.country_code.as_str());
            if record.has_state() {
                states.insert((record.country_code.as_str(), record.admin1_code.as_str()));
            }
        }
        Self { countries, states }
    }

    fn shares_country(&self, candidate: &Candidate) -> bool {
        self.countries.contains(candidate.record.country_code.as_str())
    }

    fn shares_state(&self, candidate: &Candidate) -> bool {
        candidate.record.has_state()
            && self.states.contains(&(
                candidate.record.country_code.as_str(),
                candidate.record.admin1_code.as_str(),
            ))
    }
}

/// Exact matches on continents and countries.
#[derive(Debug, Default, Clone, Copy)]
pub struct LargeAreasPass;

impl DisambiguationPass for LargeAreasPass {
    fn name(&self) -> &'static str {
        "large-areas"
    }

    fn description(&self) -> &'static str {
        "Pick continents and countries that are exact matches"
    }

    fn select(&self, group: &CandidateGroup, _accepted: &[ResolvedLocation]) -> Option<usize> {
        let top = group.top();
        let large = top.record.is_continent()
            || POLITICAL_ENTITY_CODES.contains(&top.record.feature_code.as_str());
        (top.is_exact() && large).then_some(0)
    }
}

/// Whole-country records at the top of the list, fuzzy or not.
#[derive(Debug, Default, Clone, Copy)]
pub struct FuzzyMatchedCountriesPass;

impl DisambiguationPass for FuzzyMatchedCountriesPass {
    fn name(&self) -> &'static str {
        "fuzzy-matched-countries"
    }

    fn description(&self) -> &'static str {
        "Pick countries that might not be an exact match"
    }

    fn select(&self, group: &CandidateGroup, _accepted: &[ResolvedLocation]) -> Option<usize> {
        let top = &group.top().record;
        (top.population > 0 && top.is_whole_country()).then_some(0)
    }
}

/// Exact matches on first-level subdivisions.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactAdmin1MatchPass;

impl DisambiguationPass for ExactAdmin1MatchPass {
    fn name(&self) -> &'static str {
        "exact-admin1-match"
    }

    fn description(&self) -> &'static str {
        "Pick states/provinces that are exact matches"
    }

    fn select(&self, group: &CandidateGroup, _accepted: &[ResolvedLocation]) -> Option<usize> {
        let top = group.top();
        (top.is_exact() && top.record.is_admin1()).then_some(0)
    }
}

/// Exact candidates in a country (ideally a state) something else resolved to.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactColocationsPass;

impl DisambiguationPass for ExactColocationsPass {
    fn name(&self) -> &'static str {
        "exact-colocations"
    }

    fn description(&self) -> &'static str {
        "Pick exact matches colocated with places already found"
    }

    fn select(&self, group: &CandidateGroup, accepted: &[ResolvedLocation]) -> Option<usize> {
        if accepted.is_empty() {
            return None;
        }
        let colocation = Colocation::of(accepted);
        let colocated: Vec<(usize, &Candidate)> = group
            .candidates()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_exact() && colocation.shares_country(c))
            .collect();

        colocated
            .iter()
            .find(|(_, c)| colocation.shares_state(c))
            .or_else(|| colocated.first())
            .map(|(index, _)| *index)
    }
}

/// The most populous exact admin region or populated place.
#[derive(Debug, Default, Clone, Copy)]
pub struct TopAdminPopulatedPass;

impl DisambiguationPass for TopAdminPopulatedPass {
    fn name(&self) -> &'static str {
        "top-admin-populated"
    }

    fn description(&self) -> &'static str {
        "Pick the most populous admin region or city among exact matches"
    }

    fn select(&self, group: &CandidateGroup, _accepted: &[ResolvedLocation]) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (index, candidate) in group.candidates().iter().enumerate() {
            let record = &candidate.record;
            let eligible = candidate.is_exact()
                && matches!(record.feature_class, FeatureClass::A | FeatureClass::P)
                && record.population > 0;
            if !eligible {
                continue;
            }
            // Candidates are in rank order, so strict `>` keeps the lower rank on ties.
            if best.map_or(true, |(_, population)| record.population > population) {
                best = Some((index, record.population));
            }
        }
        best.map(|(index, _)| index)
    }
}

/// Any candidate in a country something else resolved to.
#[derive(Debug, Default, Clone, Copy)]
pub struct TopColocationsPass;

impl DisambiguationPass for TopColocationsPass {
    fn name(&self) -> &'static str {
        "top-colocations"
    }

    fn description(&self) -> &'static str {
        "Pick any candidate colocated with places already found"
    }

    fn select(&self, group: &CandidateGroup, accepted: &[ResolvedLocation]) -> Option<usize> {
        if accepted.is_empty() {
            return None;
        }
        let colocation = Colocation::of(accepted);
        group
            .candidates()
            .iter()
            .position(|c| colocation.shares_country(c))
    }
}
