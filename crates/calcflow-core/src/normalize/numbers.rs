//! Number words and numeric repairs
//!
//! Converts single spelled-out number tokens to digits ("twenty" → "20"),
//! joins split decimals ("3 . 5" → "3.5") and rewrites "squared"/"cubed"
//! suffixes. Compound numbers are deliberately not composed: "twenty-three"
//! stays two tokens.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

//=============================================================================
// Word tables
//=============================================================================

const ONES: &[(&str, u64)] = &[
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
];

const TENS: &[(&str, u64)] = &[
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

/// Ordinal words accepted as a root degree ("fourth root of 81")
pub(crate) const ORDINALS: &[(&str, u64)] = &[
    ("second", 2),
    ("third", 3),
    ("fourth", 4),
    ("fifth", 5),
    ("sixth", 6),
    ("seventh", 7),
    ("eighth", 8),
    ("ninth", 9),
    ("tenth", 10),
    ("eleventh", 11),
    ("twelfth", 12),
    ("thirteenth", 13),
    ("fourteenth", 14),
    ("fifteenth", 15),
    ("sixteenth", 16),
    ("seventeenth", 17),
    ("eighteenth", 18),
    ("nineteenth", 19),
    ("twentieth", 20),
];

fn parse_ones(w: &str) -> Option<u64> {
    ONES.iter().find(|(name, _)| *name == w).map(|(_, v)| *v)
}

fn parse_tens(w: &str) -> Option<u64> {
    TENS.iter().find(|(name, _)| *name == w).map(|(_, v)| *v)
}

pub(crate) fn parse_ordinal(w: &str) -> Option<u64> {
    ORDINALS.iter().find(|(name, _)| *name == w).map(|(_, v)| *v)
}

//=============================================================================
// Rewrites
//=============================================================================

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]+\b").expect("invalid word pattern"));

static SPLIT_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*(?:\bpoint\b|\.)\s+([0-9]+)\b").expect("invalid decimal pattern")
});

static SQUARED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*squared\b").expect("invalid squared pattern")
});

static CUBED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*cubed\b").expect("invalid cubed pattern")
});

/// Replace standalone number words (0-19 and the tens up to 90) with digits
pub fn replace_number_words(text: &str) -> String {
    WORD.replace_all(text, |caps: &Captures| {
        let word = &caps[0];
        match parse_ones(word).or_else(|| parse_tens(word)) {
            Some(value) => value.to_string(),
            None => word.to_string(),
        }
    })
    .into_owned()
}

/// Join "point 5" / ". 5" into ".5" and give a leading "." its zero
pub fn repair_decimals(text: &str) -> String {
    let joined = SPLIT_DECIMAL.replace_all(text, ".${1}").into_owned();
    if joined.starts_with('.') {
        format!("0{}", joined)
    } else {
        joined
    }
}

/// "4 squared" → "(4**2)", "2 cubed" → "(2**3)"
pub fn apply_power_suffixes(text: &str) -> String {
    let squared = SQUARED.replace_all(text, "(${1}**2)");
    CUBED.replace_all(&squared, "(${1}**3)").into_owned()
}
