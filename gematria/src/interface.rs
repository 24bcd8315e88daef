//! Gematria Public Interface
//!
//! Query result types handed to callers and the crate-level error type.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ENUMS
// ═══════════════════════════════════════════════════════════════════════════════

/// Granularity of an indexed text unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Word,
    Verse,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Word => f.write_str("word"),
            UnitKind::Verse => f.write_str("verse"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SEARCH RESULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Where a hit occurred in the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitSource {
    pub reference: String,
    pub section: Option<String>,
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    /// Order index of the verse in corpus traversal order
    pub verse_index: u64,
}

/// One occurrence of a word or verse whose value matched the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub kind: UnitKind,
    pub text: String,
    pub value: u64,
    pub source: HitSource,
}

/// Response for a point-value query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub query: u64,
    pub total_results: usize,
    pub results: Vec<SearchHit>,
}

impl SearchResult {
    pub fn new(query: u64, results: Vec<SearchHit>) -> Self {
        Self {
            query,
            total_results: results.len(),
            results,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum GematriaError {
    #[error("Corpus error: {0}")]
    CorpusError(String),
    #[error("Document error: {0}")]
    StoreError(String),
    #[error("Invalid {kind} index entry {key:?}: {reason}")]
    InvalidIndex {
        kind: UnitKind,
        key: String,
        reason: String,
    },
    #[error("The {kind} index is empty; it has no minimum or maximum value")]
    EmptyIndex { kind: UnitKind },
}

pub type GematriaResult<T> = Result<T, GematriaError>;

impl From<crate::corpus::CorpusError> for GematriaError {
    fn from(e: crate::corpus::CorpusError) -> Self {
        GematriaError::CorpusError(e.to_string())
    }
}

impl From<crate::store::StoreError> for GematriaError {
    fn from(e: crate::store::StoreError) -> Self {
        GematriaError::StoreError(e.to_string())
    }
}
