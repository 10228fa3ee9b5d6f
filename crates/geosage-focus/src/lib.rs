//! GeoSage Focus: ranks the places a text is "about".
//!
//! Resolved locations are tallied at three granularities (country, state,
//! city). Strategies are pluggable through `FocusStrategy`; the default
//! counts mentions.

pub mod frequency;
pub mod strategy;

pub use frequency::FrequencyOfMentionFocusStrategy;
pub use strategy::FocusStrategy;
