//! Core data models for the gematria indices
//!
//! `Occurrence` and `IndexEntry` are created during a corpus pass and never mutated
//! afterwards. `Index` keeps entries in insertion order, both in memory and in the
//! persisted JSON object, since bounds examples and search hits follow that order.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::interface::{GematriaError, GematriaResult, UnitKind};
use crate::normalize::{is_normalized, TOKEN_SEPARATOR};

// ─────────────────────────────────────────────────────────────────────────────
// OCCURRENCE
// ─────────────────────────────────────────────────────────────────────────────

/// One appearance of a text unit in the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// "Book Chapter:Verse"
    pub reference: String,
    /// Position of the verse in corpus traversal order
    pub order_index: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl Occurrence {
    pub fn new(reference: String, order_index: u64, section: Option<String>) -> Self {
        Self {
            reference,
            order_index,
            section,
        }
    }

    pub fn locator(&self) -> Result<Locator, LocatorError> {
        Locator::parse(&self.reference)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    #[error("reference {0:?} has no book name")]
    MissingBook(String),
    #[error("reference {0:?} is not Chapter:Verse")]
    MissingPosition(String),
    #[error("reference {reference:?} has a non-integer {part}")]
    NonInteger {
        reference: String,
        part: &'static str,
    },
}

/// Parsed form of an occurrence reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl Locator {
    /// Parse "Book Chapter:Verse". Book names may themselves contain spaces.
    pub fn parse(reference: &str) -> Result<Self, LocatorError> {
        let (book, position) = reference
            .trim()
            .rsplit_once(' ')
            .ok_or_else(|| LocatorError::MissingBook(reference.to_string()))?;
        let (chapter, verse) = position
            .split_once(':')
            .ok_or_else(|| LocatorError::MissingPosition(reference.to_string()))?;

        let book = book.trim();
        if book.is_empty() {
            return Err(LocatorError::MissingBook(reference.to_string()));
        }
        let non_integer = |part| LocatorError::NonInteger {
            reference: reference.to_string(),
            part,
        };
        let chapter = chapter.parse().map_err(|_| non_integer("chapter"))?;
        let verse = verse.parse().map_err(|_| non_integer("verse"))?;

        Ok(Self {
            book: book.to_string(),
            chapter,
            verse,
        })
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// INDEX ENTRY
// ─────────────────────────────────────────────────────────────────────────────

/// Aggregate record for one distinct normalized key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    #[serde(rename = "gematria", alias = "value")]
    value: u64,
    count: usize,
    first_occurrence: Occurrence,
    occurrences: Vec<Occurrence>,
    /// First raw (pre-normalization) text seen for the key; verse index only
    #[serde(rename = "verse_text", default, skip_serializing_if = "Option::is_none")]
    raw_text: Option<String>,
}

impl IndexEntry {
    /// Start an entry from its first occurrence. The value is computed from the key.
    pub fn new(key: &str, first: Occurrence) -> Self {
        Self {
            value: crate::gematria::value(key),
            count: 1,
            first_occurrence: first.clone(),
            occurrences: vec![first],
            raw_text: None,
        }
    }

    pub(crate) fn set_raw_text(&mut self, raw_text: &str) {
        self.raw_text = Some(raw_text.to_string());
    }

    /// Append a later occurrence
    pub fn record(&mut self, occurrence: Occurrence) {
        self.occurrences.push(occurrence);
        self.count += 1;
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn first_occurrence(&self) -> &Occurrence {
        &self.first_occurrence
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    pub fn raw_text(&self) -> Option<&str> {
        self.raw_text.as_deref()
    }

    /// Check the entry against its key. Used on documents loaded from disk.
    pub fn validate(&self, key: &str) -> Result<(), String> {
        if !is_normalized(key) {
            return Err("key is not in normalized form".to_string());
        }
        let expected = crate::gematria::value(key);
        if self.value != expected {
            return Err(format!(
                "stored value {} disagrees with computed value {}",
                self.value, expected
            ));
        }
        let first = self
            .occurrences
            .first()
            .ok_or_else(|| "entry has no occurrences".to_string())?;
        if self.count != self.occurrences.len() {
            return Err(format!(
                "count {} does not match {} occurrences",
                self.count,
                self.occurrences.len()
            ));
        }
        if *first != self.first_occurrence {
            return Err("first_occurrence is not the earliest occurrence".to_string());
        }
        // Words of one verse share an order index, so equal neighbours are fine
        if self
            .occurrences
            .windows(2)
            .any(|pair| pair[0].order_index > pair[1].order_index)
        {
            return Err("occurrences are not in corpus order".to_string());
        }
        for occurrence in &self.occurrences {
            occurrence.locator().map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// INDEX
// ─────────────────────────────────────────────────────────────────────────────

/// Mapping from normalized key to entry, iterated in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    entries: Vec<(String, IndexEntry)>,
    positions: HashMap<String, usize>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&IndexEntry> {
        self.positions.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexEntry)> + Clone {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Record `occurrence` under `key`, creating the entry on first sight.
    /// Returns the entry so callers can attach per-entry data on creation.
    pub fn upsert(&mut self, key: &str, occurrence: Occurrence) -> &mut IndexEntry {
        let i = match self.positions.get(key).copied() {
            Some(i) => {
                self.entries[i].1.record(occurrence);
                i
            }
            None => {
                let i = self.entries.len();
                self.positions.insert(key.to_string(), i);
                self.entries
                    .push((key.to_string(), IndexEntry::new(key, occurrence)));
                i
            }
        };
        &mut self.entries[i].1
    }

    /// Sum of occurrence counts across all entries
    pub fn total_occurrences(&self) -> usize {
        self.entries.iter().map(|(_, entry)| entry.count()).sum()
    }

    /// Validate every entry, reporting the first violation.
    ///
    /// Word keys must also be single non-empty tokens; verse keys may be empty.
    pub fn validate(&self, kind: UnitKind) -> GematriaResult<()> {
        for (key, entry) in &self.entries {
            let checked = match kind {
                UnitKind::Word => check_word_key(key).and_then(|()| entry.validate(key)),
                UnitKind::Verse => entry.validate(key),
            };
            checked.map_err(|reason| GematriaError::InvalidIndex {
                kind,
                key: key.clone(),
                reason,
            })?;
        }
        Ok(())
    }

    fn insert_new(&mut self, key: String, entry: IndexEntry) -> Result<(), String> {
        if self.positions.contains_key(&key) {
            return Err(format!("duplicate key {:?}", key));
        }
        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push((key, entry));
        Ok(())
    }
}

impl Serialize for Index {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

fn check_word_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("word key is empty".to_string());
    }
    if key.contains(TOKEN_SEPARATOR) {
        return Err("word key spans more than one token".to_string());
    }
    Ok(())
}

struct IndexVisitor;

impl<'de> Visitor<'de> for IndexVisitor {
    type Value = Index;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from normalized text to index entry")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Index, A::Error> {
        let mut index = Index::new();
        while let Some((key, entry)) = access.next_entry::<String, IndexEntry>()? {
            index.insert_new(key, entry).map_err(de::Error::custom)?;
        }
        Ok(index)
    }
}

impl<'de> Deserialize<'de> for Index {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(IndexVisitor)
    }
}
