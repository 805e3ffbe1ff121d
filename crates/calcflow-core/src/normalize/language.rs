//! Lexical normalization for natural-language arithmetic
//!
//! Lower-cases the text, maps worded operators to symbols and strips filler
//! phrases ("what is", "equals", "is"). Worded operators must be surrounded by
//! whitespace, so a sentence that *starts* with "subtract"/"multiply"/"divide"
//! keeps its verb for the sentence templates.

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered rewrite table: (pattern, replacement)
const LEXICAL_RULES: &[(&str, &str)] = &[
    (r"^what is\s+", ""),
    (r"\s+plus\s+", " + "),
    (r"\s+(minus|subtract|sub)\s+", " - "),
    (r"\s+(times|multiplied by|into|mul|multiply)\s+", " * "),
    (r"\s+(divided by|over|div|divide)\s+", " / "),
    (r"\s+(mod|modulo|remainder)\s+", " % "),
    (r"\s+(to the power of|power of|power|raised to)\s+", " ** "),
    (r"\s+x\s+", " * "),
    (r"\s*\bpercent\b", "%"),
    (r"[,:;!?]", ""),
    (r"\bpoint\b", "."),
    (r"\bdot\b", "."),
    // "is equal to", "equals to", "equals", "equal to"
    (r"\b(is\s+)?(equals?\s+to|equals?)\b", " "),
    (r"\bis\b", " "),
    (r"\s+", " "),
];

static COMPILED_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    LEXICAL_RULES
        .iter()
        .map(|(pattern, replacement)| {
            let re = Regex::new(pattern).expect("invalid lexical rule");
            (re, *replacement)
        })
        .collect()
});

/// Apply the lexical rules in order and return the trimmed result
pub fn normalize_lexical(text: &str) -> String {
    let mut normalized = text.to_lowercase().trim().to_string();

    for (re, replacement) in COMPILED_RULES.iter() {
        normalized = re.replace_all(&normalized, *replacement).into_owned();
    }

    normalized.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_what_is_plus() {
        assert_eq!(normalize_lexical("What is 5 plus 3"), "5 + 3");
    }

    #[test]
    fn test_worded_operators() {
        assert_eq!(normalize_lexical("10 minus 4"), "10 - 4");
        assert_eq!(normalize_lexical("6 multiplied by 7"), "6 * 7");
        assert_eq!(normalize_lexical("8 divided by 2"), "8 / 2");
        assert_eq!(normalize_lexical("9 modulo 4"), "9 % 4");
        assert_eq!(normalize_lexical("2 to the power of 10"), "2 ** 10");
        assert_eq!(normalize_lexical("3 x 4"), "3 * 4");
    }

    #[test]
    fn test_leading_verbs_are_kept() {
        assert_eq!(normalize_lexical("subtract 3 from 10"), "subtract 3 from 10");
        assert_eq!(normalize_lexical("divide 10 by 2"), "divide 10 by 2");
    }

    #[test]
    fn test_punctuation_and_filler() {
        assert_eq!(normalize_lexical("5 plus 3 equals?"), "5 + 3");
        assert_eq!(normalize_lexical("what is 2 plus 2, is equal to"), "2 + 2");
    }

    #[test]
    fn test_point_and_dot() {
        assert_eq!(normalize_lexical("three point five"), "three . five");
        assert_eq!(normalize_lexical("1 dot 5"), "1 . 5");
    }

    #[test]
    fn test_percent_word() {
        assert_eq!(normalize_lexical("20 percent of 50"), "20% of 50");
    }

    #[test]
    fn test_x_inside_word_untouched() {
        assert_eq!(normalize_lexical("max 3"), "max 3");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize_lexical("  4   plus\t\t5  "), "4 + 5");
    }
}
