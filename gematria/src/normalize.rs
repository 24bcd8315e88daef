//! Text normalization for Hebrew text units
//!
//! Produces the canonical form used as an index key: points and cantillation removed,
//! final letter-forms folded, everything but consonants and whitespace dropped,
//! whitespace collapsed to single spaces.

use once_cell::sync::Lazy;
use regex::Regex;

/// Hebrew points and accents block. Also covers maqaf (U+05BE), paseq (U+05C0) and
/// sof pasuq (U+05C3), which are removed without leaving a separator behind.
static MARKS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{0591}-\u{05C7}]").unwrap()
});

/// Anything that is not a Hebrew letter (alef..tav) or whitespace
static NON_LETTER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\u{05D0}-\u{05EA}\s]").unwrap()
});

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap()
});

/// (final form, base form) pairs
pub const FINAL_FORMS: [(char, char); 5] = [
    ('ך', 'כ'),
    ('ם', 'מ'),
    ('ן', 'נ'),
    ('ף', 'פ'),
    ('ץ', 'צ'),
];

/// Separator between tokens in normalized text
pub const TOKEN_SEPARATOR: char = ' ';

fn fold_final_form(c: char) -> char {
    FINAL_FORMS
        .iter()
        .find(|(final_form, _)| *final_form == c)
        .map_or(c, |(_, base)| *base)
}

/// Canonicalize raw Hebrew text into a comparable, scoreable form.
///
/// Idempotent; empty or punctuation-only input yields an empty string.
pub fn normalize(raw: &str) -> String {
    let unmarked = MARKS_REGEX.replace_all(raw, "");
    let folded: String = unmarked.chars().map(fold_final_form).collect();
    let letters = NON_LETTER_REGEX.replace_all(&folded, "");
    WHITESPACE_REGEX
        .replace_all(&letters, " ")
        .trim()
        .to_string()
}

/// Whether `text` is already in canonical form
pub fn is_normalized(text: &str) -> bool {
    normalize(text) == text
}

/// Split normalized text into its non-empty word tokens
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split(TOKEN_SEPARATOR)
        .filter(|token| !token.is_empty())
}
