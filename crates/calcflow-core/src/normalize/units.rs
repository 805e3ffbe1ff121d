//! Unit and currency phrase resolution
//!
//! Recognizes a short, ordered list of phrases and rewrites them to arithmetic
//! before any other pass sees the text. First match wins.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{format_number, Rewrite};

/// Static example rate: 1 USD = 83 INR
pub const DEFAULT_USD_INR_RATE: f64 = 83.0;

static USD_IN_INR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*usd\s*in\s*inr").expect("invalid usd/inr pattern")
});

static KM_PLUS_M: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*km\s*\+\s*([0-9]+(?:\.[0-9]+)?)\s*m").expect("invalid km+m pattern")
});

/// Try each known unit/currency phrase against `text`.
///
/// Returns `None` (and records nothing) when no phrase matches.
pub fn resolve_units(text: &str, usd_inr_rate: f64) -> Option<Rewrite> {
    let lower = text.trim().to_lowercase();

    if let Some(caps) = USD_IN_INR.captures(&lower) {
        let amount = format_number(&caps[1]);
        let rate = format!("{}", usd_inr_rate);
        return Some(Rewrite::new(
            format!("{}*{}", amount, rate),
            format!("Using static FX rate: 1 USD = {} INR", rate),
        ));
    }

    if let Some(caps) = KM_PLUS_M.captures(&lower) {
        let km = format_number(&caps[1]);
        let m = format_number(&caps[2]);
        let km_in_m = caps[1].parse::<f64>().map(|v| v * 1000.0).unwrap_or(f64::NAN);
        return Some(Rewrite::new(
            format!("({}*1000)+{}", km, m),
            format!("Convert km to m: {} km = {} m", km, km_in_m),
        ));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_to_inr() {
        let rewrite = resolve_units("100 usd in inr", DEFAULT_USD_INR_RATE).unwrap();
        assert_eq!(rewrite.expression, "100*83");
        assert_eq!(rewrite.steps.len(), 1);
        assert_eq!(rewrite.steps[0].as_str(), "Using static FX rate: 1 USD = 83 INR");
    }

    #[test]
    fn test_usd_case_insensitive_and_compact() {
        let rewrite = resolve_units("  2.5USD in INR", DEFAULT_USD_INR_RATE).unwrap();
        assert_eq!(rewrite.expression, "2.5*83");
    }

    #[test]
    fn test_custom_rate() {
        let rewrite = resolve_units("10 usd in inr", 84.5).unwrap();
        assert_eq!(rewrite.expression, "10*84.5");
        assert_eq!(rewrite.steps[0].as_str(), "Using static FX rate: 1 USD = 84.5 INR");
    }

    #[test]
    fn test_km_plus_m() {
        let rewrite = resolve_units("2 km + 300 m", DEFAULT_USD_INR_RATE).unwrap();
        assert_eq!(rewrite.expression, "(2*1000)+300");
        assert_eq!(rewrite.steps[0].as_str(), "Convert km to m: 2 km = 2000 m");
    }

    #[test]
    fn test_fractional_km() {
        let rewrite = resolve_units("1.5km+20m", DEFAULT_USD_INR_RATE).unwrap();
        assert_eq!(rewrite.expression, "(1.5*1000)+20");
        assert_eq!(rewrite.steps[0].as_str(), "Convert km to m: 1.5 km = 1500 m");
    }

    #[test]
    fn test_no_match_passes_through() {
        assert!(resolve_units("5 plus 3", DEFAULT_USD_INR_RATE).is_none());
        assert!(resolve_units("usd in inr", DEFAULT_USD_INR_RATE).is_none());
        assert!(resolve_units("\u{0661}\u{0660} usd in inr", DEFAULT_USD_INR_RATE).is_none());
    }
}
