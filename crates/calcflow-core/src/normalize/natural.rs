//! Natural-language → arithmetic normalizer
//!
//! Stages: lexical normalization, number words, decimal repair, power
//! suffixes, phrase templates, then a generic fallback that accepts anything
//! already made of digits and operators.

use once_cell::sync::Lazy;
use regex::Regex;

use super::language::normalize_lexical;
use super::numbers::{apply_power_suffixes, repair_decimals, replace_number_words};
use super::templates::match_template;
use super::Rewrite;
use crate::pipeline::CalcError;

static TRAILING_JUNK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+\-*/%.\s]+$").expect("invalid trailing pattern"));

static MATH_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9()+\-*/.%\s]+$").expect("invalid math pattern"));

static NON_MATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9()+\-*/.%\s]").expect("invalid non-math pattern"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("invalid ws pattern"));

static OPERATOR_SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*([+\-*/%()])\s*").expect("invalid spacing pattern"));

/// Made only of math characters, with at least one digit
fn is_acceptable(text: &str) -> bool {
    MATH_ONLY.is_match(text) && text.chars().any(|c| c.is_ascii_digit())
}

/// "5 + 3" → "5+3"; whitespace between two numbers is kept
fn tighten(text: &str) -> String {
    OPERATOR_SPACING.replace_all(text, "${1}").trim().to_string()
}

/// Convert natural-language arithmetic into an expression string.
///
/// Returns [`CalcError::UnparsableNaturalLanguage`] when neither a template
/// nor the generic fallback produces something evaluable; the caller is
/// expected to carry on with the text it had before this pass.
pub fn normalize_natural_language(text: &str) -> Result<Rewrite, CalcError> {
    let lexical = normalize_lexical(text);
    let worded = replace_number_words(&lexical);
    let repaired = repair_decimals(&worded);
    let normalized = apply_power_suffixes(&repaired);
    tracing::debug!("NL normalized text: {}", normalized);

    if let Some(rewrite) = match_template(&normalized) {
        return Ok(rewrite);
    }

    let stripped = TRAILING_JUNK.replace(&normalized, "");
    if is_acceptable(&stripped) {
        let expression = tighten(&stripped);
        let step = format!("Parsed NL to expression: {}", expression);
        return Ok(Rewrite::new(expression, step));
    }

    let cleaned = NON_MATH.replace_all(&stripped, " ");
    let cleaned = WHITESPACE.replace_all(&cleaned, " ");
    let cleaned = TRAILING_JUNK.replace(cleaned.trim(), "");
    if is_acceptable(&cleaned) {
        let expression = tighten(&cleaned);
        let step = format!("Fallback NL cleanup -> {}", expression);
        return Ok(Rewrite::new(expression, step));
    }

    Err(CalcError::UnparsableNaturalLanguage {
        input: text.to_string(),
    })
}
