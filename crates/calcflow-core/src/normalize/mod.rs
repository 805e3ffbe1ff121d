//! Expression normalization passes
//!
//! Run in this order by the pipeline:
//! 1. Unit/currency resolver - "100 usd in inr" → "100*83" (AI mode only)
//! 2. Natural-language normalizer - worded operators, numbers, templates (AI mode only)
//! 3. Smart fix - duplicate operators, dangling junk, parenthesis balance
//! 4. Sanitizer - whitelist of arithmetic characters

mod language;
mod natural;
mod numbers;
mod sanitize;
mod smart_fix;
mod templates;
mod units;

pub use language::normalize_lexical;
pub use natural::normalize_natural_language;
pub use numbers::{apply_power_suffixes, repair_decimals, replace_number_words};
pub use sanitize::{sanitize, is_sanitized};
pub use smart_fix::{smart_fix, ExponentPolicy};
pub use templates::{match_template, Template, TEMPLATES};
pub use units::{resolve_units, DEFAULT_USD_INR_RATE};

use crate::trace::NormalizationStep;

/// Output of a pass that matched: the rewritten text plus the steps it produced
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    pub expression: String,
    pub steps: Vec<NormalizationStep>,
}

impl Rewrite {
    pub fn new(expression: impl Into<String>, step: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            steps: vec![NormalizationStep::new(step)],
        }
    }
}

/// Render a captured literal the way it appears in rewrites and steps
/// ("16.50" → "16.5", "007" → "7")
pub(crate) fn format_number(literal: &str) -> String {
    match literal.parse::<f64>() {
        Ok(v) if v.is_finite() => format!("{}", v),
        _ => literal.to_string(),
    }
}
