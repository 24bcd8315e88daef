//! Value calculator: standard gematria over normalized text

use crate::normalize::normalize;

/// Letter values: 1-9, 10-90 by tens, 100-400 by hundreds
const LETTER_VALUES: [(char, u64); 22] = [
    ('א', 1),
    ('ב', 2),
    ('ג', 3),
    ('ד', 4),
    ('ה', 5),
    ('ו', 6),
    ('ז', 7),
    ('ח', 8),
    ('ט', 9),
    ('י', 10),
    ('כ', 20),
    ('ל', 30),
    ('מ', 40),
    ('נ', 50),
    ('ס', 60),
    ('ע', 70),
    ('פ', 80),
    ('צ', 90),
    ('ק', 100),
    ('ר', 200),
    ('ש', 300),
    ('ת', 400),
];

/// Value of a single base letter. Final forms are not in the table.
pub fn letter_value(c: char) -> Option<u64> {
    LETTER_VALUES
        .iter()
        .find(|(letter, _)| *letter == c)
        .map(|(_, value)| *value)
}

/// Sum of letter values over already-normalized text.
///
/// Callers must normalize first: final forms present in raw text score 0 here.
pub fn value(normalized: &str) -> u64 {
    normalized.chars().filter_map(letter_value).sum()
}

/// Normalize then score. Use this for text straight from the corpus or a user.
pub fn value_of_raw(raw: &str) -> u64 {
    value(&normalize(raw))
}
