//! Gematria Core - numerological indexing and value search over Hebrew text
//!
//! Raw verses are canonicalized (`normalize`), scored (`gematria`), and aggregated into
//! a word index and a verse index (`indexer`). Bounds and stats are derived offline
//! from the built indices, and `SearchEngine` answers point-value queries against them.
//!
//! Build and search are separate phases: indices are built in one sequential pass,
//! persisted as JSON documents, and served read-only afterwards.

pub mod bounds;
pub mod corpus;
pub mod gematria;
pub mod indexer;
pub mod interface;
pub mod models;
pub mod normalize;
pub mod search;
pub mod stats;
pub mod store;

pub use bounds::{BoundsDocument, BoundsSummary, DEFAULT_MAX_EXAMPLES};
pub use corpus::CorpusRecord;
pub use indexer::{build_indices, build_verse_index, build_word_index, CorpusIndices};
pub use interface::*;
pub use models::{Index, IndexEntry, Occurrence};
pub use search::SearchEngine;
pub use stats::Stats;
pub use store::DocumentPaths;
