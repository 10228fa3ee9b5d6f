//! The focus strategy contract.

use geosage_core::{FocusLocation, FocusSummary, ResolvedLocation};

/// Turns resolved locations into ranked aboutness lists.
///
/// Implementations are pure: duplicates in `resolved` are expected and
/// an empty slice yields empty lists.
pub trait FocusStrategy: Send + Sync {
    fn select_countries(&self, resolved: &[ResolvedLocation]) -> Vec<FocusLocation>;

    fn select_states(&self, resolved: &[ResolvedLocation]) -> Vec<FocusLocation>;

    fn select_cities(&self, resolved: &[ResolvedLocation]) -> Vec<FocusLocation>;

    /// All three granularities at once.
    fn compute_focus(&self, resolved: &[ResolvedLocation]) -> FocusSummary {
        FocusSummary {
            countries: self.select_countries(resolved),
            states: self.select_states(resolved),
            cities: self.select_cities(resolved),
        }
    }
}
