//! CalcFlow Core - Natural-language calculator pipeline
//!
//! This library provides the core functionality for:
//! - Unit and currency phrase resolution
//! - Natural-language to arithmetic normalization
//! - Typo repair and character sanitizing
//! - Safe arithmetic evaluation
//! - Per-user calculation history

pub mod calculator;
pub mod config;
pub mod evaluator;
pub mod history;
pub mod normalize;
pub mod trace;

mod pipeline;

pub use calculator::{CalculateOutput, Calculator, CalculatorError};
pub use config::{Config, EvaluatorOptions, HistoryOptions, NormalizerOptions};
pub use evaluator::{EvalError, Evaluator};
pub use history::{FileHistory, HistoryRecord, HistoryStore, MemoryHistory, NewRecord};
pub use normalize::ExponentPolicy;
pub use pipeline::{CalcError, Calculation, Normalized, Pipeline, Timings};
pub use trace::{NormalizationStep, StepTrace};

/// Normalize and evaluate an expression without recording history
///
/// This is the main entry point for the library.
pub fn calculate(expression: &str, ai_mode: bool, config: &Config) -> Result<Calculation, CalcError> {
    Pipeline::new(config).calculate(expression, ai_mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_entry_point() {
        let config = Config::default();
        let c = calculate("what is seven times eight", true, &config).unwrap();
        assert_eq!(c.expression(), "7*8");
        assert_eq!(c.result, 56.0);
    }
}
