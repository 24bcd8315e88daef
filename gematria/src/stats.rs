//! Stats document consumed by the search engine
//!
//! Only the per-unit value range is required. Counts are informational and may be
//! absent in documents produced elsewhere.

use serde::{Deserialize, Serialize};

use crate::bounds::{BoundsDocument, BoundsSummary, DEFAULT_MAX_EXAMPLES};
use crate::interface::GematriaResult;
use crate::models::Index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub lowest: u64,
    pub highest: u64,
}

impl ValueRange {
    pub fn contains(&self, value: u64) -> bool {
        self.lowest <= value && value <= self.highest
    }
}

impl From<&BoundsSummary> for ValueRange {
    fn from(bounds: &BoundsSummary) -> Self {
        Self {
            lowest: bounds.min,
            highest: bounds.max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    pub range: ValueRange,
    /// Distinct keys in the index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_occurrences: Option<usize>,
}

impl UnitStats {
    fn from_index(bounds: &BoundsSummary, index: &Index) -> Self {
        Self {
            range: bounds.into(),
            unique: Some(index.len()),
            total_occurrences: Some(index.total_occurrences()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub words: UnitStats,
    pub verses: UnitStats,
}

impl Stats {
    /// Derive stats from freshly built indices. Fails on an empty index.
    pub fn from_indices(words: &Index, verses: &Index) -> GematriaResult<Self> {
        let bounds = BoundsDocument::build(words, verses, DEFAULT_MAX_EXAMPLES)?;
        Ok(Self {
            words: UnitStats::from_index(&bounds.word, words),
            verses: UnitStats::from_index(&bounds.verse, verses),
        })
    }
}

impl From<&BoundsDocument> for Stats {
    fn from(bounds: &BoundsDocument) -> Self {
        Self {
            words: UnitStats {
                range: (&bounds.word).into(),
                unique: None,
                total_occurrences: None,
            },
            verses: UnitStats {
                range: (&bounds.verse).into(),
                unique: None,
                total_occurrences: None,
            },
        }
    }
}
