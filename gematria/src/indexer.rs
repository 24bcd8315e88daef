//! Word and verse indexers
//!
//! Both consume the corpus in traversal order and upsert one entry per distinct
//! normalized key. The order index is threaded explicitly: each verse gets the next
//! value, starting at `FIRST_ORDER_INDEX`. Words inside the same verse share that
//! verse's order index, so word occurrences are located at verse granularity.

use crate::corpus::CorpusRecord;
use crate::models::{Index, Occurrence};
use crate::normalize::{normalize, tokens};

/// Order index assigned to the first verse of the corpus
pub const FIRST_ORDER_INDEX: u64 = 1;

/// Pair each record with its order index
pub fn order_indexed<'a, I>(records: I) -> impl Iterator<Item = (u64, &'a CorpusRecord)>
where
    I: IntoIterator<Item = &'a CorpusRecord>,
{
    (FIRST_ORDER_INDEX..).zip(records)
}

fn occurrence_for(record: &CorpusRecord, order_index: u64) -> Occurrence {
    Occurrence::new(record.reference(), order_index, record.section.clone())
}

/// An aggregation pass over the corpus
pub trait CorpusIndexer {
    /// Fold one verse into the index
    fn add_verse(&mut self, record: &CorpusRecord, order_index: u64);

    /// Number of distinct keys so far
    fn len(&self) -> usize;

    fn finish(self) -> Index;
}

/// Word-level index keyed by normalized token
#[derive(Debug, Default)]
pub struct WordIndexer {
    index: Index,
}

impl WordIndexer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CorpusIndexer for WordIndexer {
    fn add_verse(&mut self, record: &CorpusRecord, order_index: u64) {
        let normalized = normalize(&record.text);
        for word in tokens(&normalized) {
            self.index.upsert(word, occurrence_for(record, order_index));
        }
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn finish(self) -> Index {
        self.index
    }
}

/// Verse-level index keyed by the whole normalized verse.
///
/// Textually identical verses merge into one entry. A verse that normalizes to the
/// empty string is still indexed, under the empty key.
#[derive(Debug, Default)]
pub struct VerseIndexer {
    index: Index,
}

impl VerseIndexer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CorpusIndexer for VerseIndexer {
    fn add_verse(&mut self, record: &CorpusRecord, order_index: u64) {
        let normalized = normalize(&record.text);
        let is_new = !self.index.contains_key(&normalized);
        let entry = self
            .index
            .upsert(&normalized, occurrence_for(record, order_index));
        if is_new {
            entry.set_raw_text(record.text.trim());
        }
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn finish(self) -> Index {
        self.index
    }
}

/// Run a single indexer over the whole corpus
pub fn build_index<'a, X, I>(mut indexer: X, records: I) -> Index
where
    X: CorpusIndexer,
    I: IntoIterator<Item = &'a CorpusRecord>,
{
    for (order_index, record) in order_indexed(records) {
        indexer.add_verse(record, order_index);
    }
    indexer.finish()
}

pub fn build_word_index<'a, I>(records: I) -> Index
where
    I: IntoIterator<Item = &'a CorpusRecord>,
{
    let index = build_index(WordIndexer::new(), records);
    tracing::info!(
        unique_words = index.len(),
        word_occurrences = index.total_occurrences(),
        "word index built"
    );
    index
}

pub fn build_verse_index<'a, I>(records: I) -> Index
where
    I: IntoIterator<Item = &'a CorpusRecord>,
{
    let index = build_index(VerseIndexer::new(), records);
    tracing::info!(
        unique_verses = index.len(),
        verse_occurrences = index.total_occurrences(),
        "verse index built"
    );
    index
}

/// Word and verse indices built from the same corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusIndices {
    pub words: Index,
    pub verses: Index,
}

/// Build both indices in one traversal. Equivalent to two independent passes.
pub fn build_indices<'a, I>(records: I) -> CorpusIndices
where
    I: IntoIterator<Item = &'a CorpusRecord>,
{
    let mut words = WordIndexer::new();
    let mut verses = VerseIndexer::new();
    let mut verse_count = 0usize;
    for (order_index, record) in order_indexed(records) {
        words.add_verse(record, order_index);
        verses.add_verse(record, order_index);
        verse_count += 1;
    }
    tracing::info!(
        verses_read = verse_count,
        unique_words = words.len(),
        unique_verses = verses.len(),
        "corpus indexed"
    );
    CorpusIndices {
        words: words.finish(),
        verses: verses.finish(),
    }
}
