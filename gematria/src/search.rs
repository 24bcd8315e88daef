//! Search Engine (point-value lookup over the word and verse indices)
//!
//! Indices are validated and every occurrence is resolved to a `HitSource` once, at
//! construction. After that the engine is read-only: a query is a range admission
//! check per index followed by a linear scan for entries with an equal value.

use crate::interface::{GematriaError, GematriaResult, HitSource, SearchHit, SearchResult, UnitKind};
use crate::models::{Index, IndexEntry, Occurrence};
use crate::stats::{Stats, ValueRange};
use crate::store::{load_json, DocumentPaths};

/// An index entry in display form, with its occurrences already resolved
#[derive(Debug, Clone)]
struct Searchable {
    text: String,
    value: u64,
    sources: Vec<HitSource>,
}

impl Searchable {
    fn from_entry(kind: UnitKind, key: &str, entry: &IndexEntry) -> GematriaResult<Self> {
        let text = match kind {
            UnitKind::Word => key.to_string(),
            UnitKind::Verse => entry.raw_text().unwrap_or(key).to_string(),
        };
        let sources = entry
            .occurrences()
            .iter()
            .map(resolve_source)
            .collect::<Result<Vec<_>, String>>()
            .map_err(|reason| GematriaError::InvalidIndex {
                kind,
                key: key.to_string(),
                reason,
            })?;
        Ok(Self {
            text,
            value: entry.value(),
            sources,
        })
    }
}

fn resolve_source(occurrence: &Occurrence) -> Result<HitSource, String> {
    let locator = occurrence.locator().map_err(|e| e.to_string())?;
    Ok(HitSource {
        reference: occurrence.reference.clone(),
        section: occurrence.section.clone(),
        book: locator.book,
        chapter: locator.chapter,
        verse: locator.verse,
        verse_index: occurrence.order_index,
    })
}

fn prepare(kind: UnitKind, index: &Index) -> GematriaResult<Vec<Searchable>> {
    index.validate(kind)?;
    index
        .iter()
        .map(|(key, entry)| Searchable::from_entry(kind, key, entry))
        .collect()
}

/// Read-only value search over a loaded word index and verse index
#[derive(Debug)]
pub struct SearchEngine {
    words: Vec<Searchable>,
    verses: Vec<Searchable>,
    stats: Stats,
}

impl SearchEngine {
    /// Validate both indices and prepare them for querying.
    ///
    /// `stats` must describe these indices; stale ranges are not detected here.
    pub fn new(word_index: &Index, verse_index: &Index, stats: Stats) -> GematriaResult<Self> {
        let words = prepare(UnitKind::Word, word_index)?;
        let verses = prepare(UnitKind::Verse, verse_index)?;
        tracing::info!(
            words = words.len(),
            verses = verses.len(),
            "search engine ready"
        );
        Ok(Self { words, verses, stats })
    }

    /// Load the word index, verse index and stats documents
    pub fn open(paths: &DocumentPaths) -> GematriaResult<Self> {
        let word_index: Index = load_json(&paths.word_index)?;
        let verse_index: Index = load_json(&paths.verse_index)?;
        let stats: Stats = load_json(&paths.stats)?;
        Self::new(&word_index, &verse_index, stats)
    }

    /// Distinct words loaded
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Distinct verse texts loaded
    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    /// Every occurrence of every word or verse whose value equals `value`.
    ///
    /// Word hits come first, then verse hits; each follows index order, then
    /// occurrence order. No deduplication, no ranking.
    pub fn search(&self, value: u64) -> SearchResult {
        let mut results = Vec::new();
        scan(UnitKind::Word, &self.words, &self.stats.words.range, value, &mut results);
        scan(UnitKind::Verse, &self.verses, &self.stats.verses.range, value, &mut results);
        tracing::debug!(query = value, hits = results.len(), "search complete");
        SearchResult::new(value, results)
    }
}

fn scan(
    kind: UnitKind,
    entries: &[Searchable],
    range: &ValueRange,
    value: u64,
    results: &mut Vec<SearchHit>,
) {
    if !range.contains(value) {
        tracing::debug!(%kind, query = value, lowest = range.lowest, highest = range.highest, "outside range, scan skipped");
        return;
    }
    for entry in entries.iter().filter(|entry| entry.value == value) {
        results.extend(entry.sources.iter().map(|source| SearchHit {
            kind,
            text: entry.text.clone(),
            value: entry.value,
            source: source.clone(),
        }));
    }
}
