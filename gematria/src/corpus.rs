//! Corpus input: one record per verse, in canonical reading order
//!
//! The CSV layout matches the Tanach export: `book,chapter,verse,hebrew` with an
//! optional `section` column. Reading is all-or-nothing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Row {row}: missing required field `{field}`")]
    MissingField { row: usize, field: &'static str },
}

pub type CorpusResult<T> = Result<T, CorpusError>;

/// A single verse of the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecord {
    #[serde(default)]
    pub section: Option<String>,
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    #[serde(rename = "hebrew", alias = "text")]
    pub text: String,
}

impl CorpusRecord {
    pub fn new(book: &str, chapter: u32, verse: u32, text: &str) -> Self {
        Self {
            section: None,
            book: book.to_string(),
            chapter,
            verse,
            text: text.to_string(),
        }
    }

    pub fn with_section(mut self, section: &str) -> Self {
        self.section = Some(section.to_string());
        self
    }

    /// Human-readable locator, "Book Chapter:Verse"
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }

    fn check(&self, row: usize) -> CorpusResult<()> {
        if self.book.trim().is_empty() {
            return Err(CorpusError::MissingField { row, field: "book" });
        }
        Ok(())
    }
}

/// Read every record from CSV, failing on the first malformed row
pub fn read_csv<R: Read>(reader: R) -> CorpusResult<Vec<CorpusRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, row) in csv_reader.deserialize::<CorpusRecord>().enumerate() {
        let record = row?;
        // 1-based, counting the header line
        record.check(i + 2)?;
        records.push(record);
    }
    tracing::debug!(records = records.len(), "corpus read");
    Ok(records)
}

pub fn read_csv_path<P: AsRef<Path>>(path: P) -> CorpusResult<Vec<CorpusRecord>> {
    let file = File::open(path)?;
    read_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_basic() {
        let csv = "book,chapter,verse,hebrew\nGenesis,1,1,בְּרֵאשִׁית בָּרָא\nGenesis,1,2,וְהָאָרֶץ\n";
        let records = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].reference(), "Genesis 1:1");
        assert_eq!(records[1].text, "וְהָאָרֶץ");
        assert_eq!(records[0].section, None);
    }

    #[test]
    fn test_read_csv_with_section() {
        let csv = "section,book,chapter,verse,hebrew\nTorah,Genesis,1,1,א\n";
        let records = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(records[0].section.as_deref(), Some("Torah"));
    }

    #[test]
    fn test_read_csv_text_alias() {
        let csv = "book,chapter,verse,text\nGenesis,1,1,א\n";
        let records = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(records[0].text, "א");
    }

    #[test]
    fn test_non_integer_chapter_fails() {
        let csv = "book,chapter,verse,hebrew\nGenesis,1,1,א\nGenesis,one,2,ב\n";
        assert!(matches!(read_csv(csv.as_bytes()), Err(CorpusError::Csv(_))));
    }

    #[test]
    fn test_missing_column_fails() {
        let csv = "book,chapter,hebrew\nGenesis,1,א\n";
        assert!(read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_empty_book_fails_with_row() {
        let csv = "book,chapter,verse,hebrew\nGenesis,1,1,א\n,1,2,ב\n";
        match read_csv(csv.as_bytes()) {
            Err(CorpusError::MissingField { row, field }) => {
                assert_eq!(row, 3);
                assert_eq!(field, "book");
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_multi_word_book_reference() {
        let record = CorpusRecord::new("Song of Songs", 2, 1, "א");
        assert_eq!(record.reference(), "Song of Songs 2:1");
    }
}
