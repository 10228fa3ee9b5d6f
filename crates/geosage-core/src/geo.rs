//! Geographic data model shared by every stage of the pipeline.
//!
//! Gazetteer records are long-lived and shared (`Arc<GeoRecord>`); everything
//! else here is created per request and dropped once the result is assembled.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Admin1 code GeoNames uses for records covering a whole country.
pub const WHOLE_COUNTRY_ADMIN1: &str = "00";

/// GeoNames feature class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureClass {
    /// Country, state, region.
    A,
    /// Stream, lake.
    H,
    /// Parks, area.
    L,
    /// City, village.
    P,
    /// Road, railroad.
    R,
    /// Spot, building, farm.
    S,
    /// Mountain, hill, rock.
    T,
    /// Undersea.
    U,
    /// Forest, heath.
    V,
    #[serde(rename = "NULL")]
    Null,
}

impl FeatureClass {
    /// Parse a GeoNames feature class letter. Unknown values map to `Null`.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "A" => Self::A,
            "H" => Self::H,
            "L" => Self::L,
            "P" => Self::P,
            "R" => Self::R,
            "S" => Self::S,
            "T" => Self::T,
            "U" => Self::U,
            "V" => Self::V,
            _ => Self::Null,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::H => "H",
            Self::L => "L",
            Self::P => "P",
            Self::R => "R",
            Self::S => "S",
            Self::T => "T",
            Self::U => "U",
            Self::V => "V",
            Self::Null => "NULL",
        }
    }
}

impl std::fmt::Display for FeatureClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable gazetteer entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    pub geoname_id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub population: u64,
    pub feature_class: FeatureClass,
    pub feature_code: String,
    /// ISO 3166 alpha-2 code, empty when the record has no country.
    pub country_code: String,
    /// First-level subdivision code, `"00"` for whole-country records.
    pub admin1_code: String,
}

impl GeoRecord {
    /// Record describes a whole country (no state/province breakdown).
    pub fn is_whole_country(&self) -> bool {
        self.admin1_code == WHOLE_COUNTRY_ADMIN1
    }

    /// Record sits inside a specific state/province.
    pub fn has_state(&self) -> bool {
        !self.admin1_code.is_empty() && !self.is_whole_country()
    }

    pub fn is_populated_place(&self) -> bool {
        self.feature_class == FeatureClass::P
    }

    pub fn is_admin_region(&self) -> bool {
        self.feature_class == FeatureClass::A
    }

    /// Independent, dependent or semi-independent political entity.
    pub fn is_country(&self) -> bool {
        self.feature_code.starts_with("PCL")
    }

    pub fn is_continent(&self) -> bool {
        self.feature_code == "CONT"
    }

    pub fn is_admin1(&self) -> bool {
        self.feature_code == "ADM1"
    }
}

/// The span of text that triggered a place extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionOccurrence {
    pub text: String,
    /// Character offset of the mention in its source text.
    pub position: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_id: Option<String>,
}

impl MentionOccurrence {
    pub fn new(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            position,
            sentence_id: None,
        }
    }

    pub fn in_sentence(mut self, sentence_id: impl Into<String>) -> Self {
        self.sentence_id = Some(sentence_id.into());
        self
    }
}

/// One gazetteer record proposed for a mention.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub record: Arc<GeoRecord>,
    /// Position in the gazetteer's own ranking, 0 = best.
    pub rank: usize,
    /// The gazetteer name (primary or alternate) that matched.
    pub matched_name: String,
    /// The match was approximate rather than a case-insensitive exact match.
    pub fuzzy: bool,
}

impl Candidate {
    pub fn new(record: Arc<GeoRecord>, rank: usize, matched_name: impl Into<String>, fuzzy: bool) -> Self {
        Self {
            record,
            rank,
            matched_name: matched_name.into(),
            fuzzy,
        }
    }

    /// Exact (non-fuzzy) match.
    pub fn is_exact(&self) -> bool {
        !self.fuzzy
    }
}

/// A mention paired with its ranked, non-empty candidate list.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateGroup {
    mention: MentionOccurrence,
    candidates: Vec<Candidate>,
}

impl CandidateGroup {
    /// Build a group, ordering candidates by rank. Returns `None` for an
    /// empty candidate list.
    pub fn new(mention: MentionOccurrence, mut candidates: Vec<Candidate>) -> Option<Self> {
        if candidates.is_empty() {
            return None;
        }
        candidates.sort_by_key(|c| c.rank);
        Some(Self { mention, candidates })
    }

    pub fn mention(&self) -> &MentionOccurrence {
        &self.mention
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// The gazetteer's best guess.
    pub fn top(&self) -> &Candidate {
        &self.candidates[0]
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Resolve this group to the candidate at `index`.
    pub fn resolve(&self, index: usize) -> Option<ResolvedLocation> {
        self.candidates.get(index).map(|c| ResolvedLocation {
            record: Arc::clone(&c.record),
            mention: self.mention.clone(),
            confidence: c.rank,
            fuzzy: c.fuzzy,
        })
    }
}

/// The outcome of disambiguating one mention.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub record: Arc<GeoRecord>,
    pub mention: MentionOccurrence,
    /// Rank of the chosen candidate; lower is better, 0 = top-ranked.
    pub confidence: usize,
    pub fuzzy: bool,
}

/// One entry of an aboutness ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusLocation {
    pub record: Arc<GeoRecord>,
    pub score: usize,
}

/// Aboutness rankings at the three granularities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FocusSummary {
    pub countries: Vec<FocusLocation>,
    pub states: Vec<FocusLocation>,
    pub cities: Vec<FocusLocation>,
}

impl FocusSummary {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty() && self.states.is_empty() && self.cities.is_empty()
    }
}

/// A person or organization name with the number of times it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntityCount {
    pub name: String,
    pub count: usize,
}
