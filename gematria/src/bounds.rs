//! Bounds calculator: global min/max value of an index and example keys at each end

use serde::{Deserialize, Serialize};

use crate::interface::{GematriaError, GematriaResult, UnitKind};
use crate::models::Index;

/// Examples kept at each boundary unless configured otherwise
pub const DEFAULT_MAX_EXAMPLES: usize = 5;

/// Value extremes of one index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsSummary {
    pub min: u64,
    pub max: u64,
    pub lowest_examples: Vec<String>,
    pub highest_examples: Vec<String>,
}

impl BoundsSummary {
    /// Single pass over `(value, example)` pairs. Examples at each extreme are the
    /// first `max_examples` encountered, in iteration order. `None` when empty.
    pub fn from_values<'a, I>(values: I, max_examples: usize) -> Option<Self>
    where
        I: IntoIterator<Item = (u64, &'a str)>,
    {
        let mut values = values.into_iter();
        let (first_value, first_example) = values.next()?;

        let mut summary = Self {
            min: first_value,
            max: first_value,
            lowest_examples: Vec::new(),
            highest_examples: Vec::new(),
        };
        push_example(&mut summary.lowest_examples, first_example, max_examples);
        push_example(&mut summary.highest_examples, first_example, max_examples);

        for (value, example) in values {
            if value < summary.min {
                summary.min = value;
                summary.lowest_examples.clear();
            }
            if value == summary.min {
                push_example(&mut summary.lowest_examples, example, max_examples);
            }

            if value > summary.max {
                summary.max = value;
                summary.highest_examples.clear();
            }
            if value == summary.max {
                push_example(&mut summary.highest_examples, example, max_examples);
            }
        }
        Some(summary)
    }

    pub fn contains(&self, value: u64) -> bool {
        self.min <= value && value <= self.max
    }
}

fn push_example(examples: &mut Vec<String>, example: &str, max_examples: usize) {
    if examples.len() < max_examples {
        examples.push(example.to_string());
    }
}

/// Bounds of the word index; examples are the words themselves
pub fn word_bounds(index: &Index, max_examples: usize) -> GematriaResult<BoundsSummary> {
    let values = index.iter().map(|(word, entry)| (entry.value(), word));
    BoundsSummary::from_values(values, max_examples)
        .ok_or(GematriaError::EmptyIndex { kind: UnitKind::Word })
}

/// Bounds of the verse index; examples are first-occurrence references
pub fn verse_bounds(index: &Index, max_examples: usize) -> GematriaResult<BoundsSummary> {
    let values = index
        .iter()
        .map(|(_, entry)| (entry.value(), entry.first_occurrence().reference.as_str()));
    BoundsSummary::from_values(values, max_examples)
        .ok_or(GematriaError::EmptyIndex { kind: UnitKind::Verse })
}

/// Persisted bounds for both index types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsDocument {
    pub word: BoundsSummary,
    pub verse: BoundsSummary,
}

impl BoundsDocument {
    pub fn build(words: &Index, verses: &Index, max_examples: usize) -> GematriaResult<Self> {
        let document = Self {
            word: word_bounds(words, max_examples)?,
            verse: verse_bounds(verses, max_examples)?,
        };
        tracing::info!(
            word_min = document.word.min,
            word_max = document.word.max,
            verse_min = document.verse.min,
            verse_max = document.verse.max,
            "bounds computed"
        );
        Ok(document)
    }
}
