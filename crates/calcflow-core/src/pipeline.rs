//! Main processing pipeline: Input → Unit/NL normalization → Smart fix → Sanitize → Evaluate

use crate::{
    config::{Config, NormalizerOptions},
    evaluator::{EvalError, Evaluator},
    normalize::{normalize_natural_language, resolve_units, sanitize, smart_fix},
    trace::StepTrace,
};
use std::time::Instant;

/// Calculation error with a user-facing message
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("Invalid expression: input is empty")]
    EmptyInput,

    #[error("Could not understand '{input}' as arithmetic")]
    UnparsableNaturalLanguage { input: String },

    #[error("Nothing left to evaluate in '{input}' after sanitizing")]
    NothingToEvaluate { input: String },

    #[error("Invalid expression: {0}")]
    Evaluation(#[from] EvalError),

    #[error("Result is not a finite number ({value})")]
    NonFiniteResult { value: f64 },
}

impl CalcError {
    /// Stable identifier for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::UnparsableNaturalLanguage { .. } => "unparsable_natural_language",
            Self::NothingToEvaluate { .. } => "nothing_to_evaluate",
            Self::Evaluation(_) => "evaluation_error",
            Self::NonFiniteResult { .. } => "non_finite_result",
        }
    }
}

/// Output of the normalization stages
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Input exactly as given
    pub original: String,
    /// Sanitized, evaluable expression
    pub expression: String,
    /// Steps recorded along the way
    pub steps: StepTrace,
    /// Whether the unit/NL passes ran
    pub ai_mode: bool,
}

impl Normalized {
    /// Expression to store in history: the user's phrasing in AI mode,
    /// otherwise the sanitized expression
    pub fn history_expression(&self) -> &str {
        if self.ai_mode {
            &self.original
        } else {
            &self.expression
        }
    }
}

/// Processing time breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timings {
    pub normalize_us: u64,
    pub evaluate_us: u64,
    pub total_us: u64,
}

/// Result of a successful calculation
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub normalized: Normalized,
    pub result: f64,
    pub timings: Timings,
}

impl Calculation {
    pub fn expression(&self) -> &str {
        &self.normalized.expression
    }

    pub fn steps(&self) -> &StepTrace {
        &self.normalized.steps
    }
}

/// The CalcFlow pipeline. Stateless between calls; cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: NormalizerOptions,
    evaluator: Evaluator,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: &Config) -> Self {
        tracing::debug!(
            "Pipeline: usd_inr_rate={}, exponent={}, max_depth={}",
            config.normalizer.usd_inr_rate,
            config.normalizer.exponent.display_name(),
            config.evaluator.max_depth
        );
        Self::with_options(
            config.normalizer.clone(),
            Evaluator::new(config.evaluator.max_depth),
        )
    }

    pub fn with_options(options: NormalizerOptions, evaluator: Evaluator) -> Self {
        Self { options, evaluator }
    }

    /// Turn raw input into a sanitized expression and its step trace.
    ///
    /// In AI mode the unit/currency resolver and the natural-language
    /// normalizer run first. If the natural-language pass cannot make sense of
    /// the text it is logged and the text carries on unchanged; smart fix and
    /// the sanitizer then decide what is left.
    pub fn normalize(&self, expression: &str, ai_mode: bool) -> Result<Normalized, CalcError> {
        if expression.trim().is_empty() {
            return Err(CalcError::EmptyInput);
        }

        let mut steps = StepTrace::new();
        let mut current = expression.to_string();

        if ai_mode {
            if let Some(rewrite) = resolve_units(&current, self.options.usd_inr_rate) {
                steps.extend(rewrite.steps);
                steps.record_change("Unit/Currency parsed", &current, &rewrite.expression);
                current = rewrite.expression;
                tracing::debug!("After unit resolver: {}", current);
            }

            match normalize_natural_language(&current) {
                Ok(rewrite) => {
                    steps.extend(rewrite.steps);
                    steps.record_change("NL parsed", &current, &rewrite.expression);
                    current = rewrite.expression;
                    tracing::debug!("After NL normalizer: {}", current);
                }
                Err(e) => {
                    tracing::warn!("{}. Continuing with the input as typed.", e);
                }
            }
        }

        let fixed = smart_fix(&current, self.options.exponent);
        steps.record_change("Smart fix", &current, &fixed);
        tracing::debug!("After smart fix: {}", fixed);

        let sanitized = sanitize(&fixed);
        tracing::debug!("After sanitize: {}", sanitized);

        if sanitized.trim().is_empty() {
            return Err(CalcError::NothingToEvaluate {
                input: expression.to_string(),
            });
        }

        Ok(Normalized {
            original: expression.to_string(),
            expression: sanitized,
            steps,
            ai_mode,
        })
    }

    /// Evaluate an already normalized expression
    pub fn evaluate(&self, normalized: &Normalized) -> Result<f64, CalcError> {
        let value = self.evaluator.evaluate(&normalized.expression)?;
        if !value.is_finite() {
            return Err(CalcError::NonFiniteResult { value });
        }
        Ok(value)
    }

    /// Normalize and evaluate
    pub fn calculate(&self, expression: &str, ai_mode: bool) -> Result<Calculation, CalcError> {
        let start = Instant::now();

        let normalized = self.normalize(expression, ai_mode)?;
        let normalize_us = start.elapsed().as_micros() as u64;

        let t2 = Instant::now();
        let result = self.evaluate(&normalized)?;
        let evaluate_us = t2.elapsed().as_micros() as u64;

        let total_us = start.elapsed().as_micros() as u64;
        tracing::debug!(
            "Calculated {} = {} in {}us (normalize: {}us, evaluate: {}us)",
            normalized.expression,
            result,
            total_us,
            normalize_us,
            evaluate_us
        );

        Ok(Calculation {
            normalized,
            result,
            timings: Timings {
                normalize_us,
                evaluate_us,
                total_us,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::ExponentPolicy;

    fn pipeline() -> Pipeline {
        Pipeline::default()
    }

    fn calc(expression: &str, ai_mode: bool) -> Calculation {
        pipeline()
            .calculate(expression, ai_mode)
            .unwrap_or_else(|e| panic!("{:?} failed: {}", expression, e))
    }

    fn steps(calculation: &Calculation) -> Vec<String> {
        calculation.steps().clone().into_strings()
    }

    #[test]
    fn test_what_is_five_plus_three() {
        let c = calc("what is 5 plus 3", true);
        assert_eq!(c.expression(), "5+3");
        assert_eq!(c.result, 8.0);
        assert_eq!(
            steps(&c),
            vec![
                "Parsed NL to expression: 5+3",
                "NL parsed: what is 5 plus 3 -> 5+3",
            ]
        );
    }

    #[test]
    fn test_square_root() {
        let c = calc("square root of 16", true);
        assert_eq!(c.expression(), "16**0.5");
        assert_eq!(c.result, 4.0);
        assert_eq!(steps(&c)[0], "Square root of 16 = 16 ** 0.5");
    }

    #[test]
    fn test_percentage() {
        let c = calc("20% of 50", true);
        assert_eq!(c.expression(), "(20/100)*50");
        assert_eq!(c.result, 10.0);
    }

    #[test]
    fn test_add_sentence() {
        let c = calc("add 4 and 6", true);
        assert_eq!(c.expression(), "4+6");
        assert_eq!(c.result, 10.0);
    }

    #[test]
    fn test_currency() {
        let c = calc("100 usd in inr", true);
        assert_eq!(c.expression(), "100*83");
        assert_eq!(c.result, 8300.0);
        let s = steps(&c);
        assert_eq!(s[0], "Using static FX rate: 1 USD = 83 INR");
        assert_eq!(s[1], "Unit/Currency parsed: 100 usd in inr -> 100*83");
    }

    #[test]
    fn test_custom_rate() {
        let options = NormalizerOptions {
            usd_inr_rate: 80.0,
            ..NormalizerOptions::default()
        };
        let pipeline = Pipeline::with_options(options, Evaluator::default());
        let c = pipeline.calculate("2 usd in inr", true).unwrap();
        assert_eq!(c.result, 160.0);
    }

    #[test]
    fn test_non_ascii_digits_do_not_reach_rewrites() {
        let c = calc("\u{0663} root of 27", true);
        assert_eq!(c.expression(), "27**0.5");
        assert!((c.result - 27f64.sqrt()).abs() < 1e-9);

        // the unreadable operand is dropped by the fallback cleanup
        let c = calc("20% of \u{0665}\u{0660}", true);
        assert_eq!(c.expression(), "20");
        assert_eq!(c.result, 20.0);
    }

    #[test]
    fn test_km_plus_m() {
        let c = calc("2 km + 300 m", true);
        assert_eq!(c.expression(), "(2*1000)+300");
        assert_eq!(c.result, 2300.0);
    }

    #[test]
    fn test_duplicate_operator_fixed() {
        let c = calc("2++2", false);
        assert_eq!(c.expression(), "2+2");
        assert_eq!(c.result, 4.0);
        assert_eq!(steps(&c), vec!["Smart fix: 2++2 -> 2+2"]);
    }

    #[test]
    fn test_parentheses_balanced() {
        let c = calc("(((3+2", false);
        assert_eq!(c.expression(), "(((3+2)))");
        assert_eq!(c.result, 5.0);
    }

    #[test]
    fn test_clean_expression_has_no_steps() {
        let c = calc("2*(3+4)", false);
        assert_eq!(c.result, 14.0);
        assert!(c.steps().is_empty());
    }

    #[test]
    fn test_letters_stripped_without_ai() {
        let c = calc("5 apples + 3", false);
        assert_eq!(c.result, 8.0);
        assert!(c.expression().chars().all(|ch| !ch.is_alphabetic()));
    }

    #[test]
    fn test_division_by_zero() {
        let err = pipeline().calculate("5/0", false).unwrap_err();
        assert!(matches!(err, CalcError::NonFiniteResult { .. }));
        assert_eq!(err.code(), "non_finite_result");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(pipeline().calculate("", false), Err(CalcError::EmptyInput));
        assert_eq!(pipeline().calculate("   ", true), Err(CalcError::EmptyInput));
    }

    #[test]
    fn test_nothing_to_evaluate() {
        let err = pipeline().calculate("hello", false).unwrap_err();
        assert!(matches!(err, CalcError::NothingToEvaluate { .. }));
    }

    #[test]
    fn test_unparsable_nl_falls_through() {
        // NL pass fails; sanitizer leaves nothing
        let err = pipeline().calculate("hello there", true).unwrap_err();
        assert!(matches!(err, CalcError::NothingToEvaluate { .. }));
    }

    #[test]
    fn test_evaluation_error_surfaces() {
        let err = pipeline().calculate("2 3", false).unwrap_err();
        assert!(matches!(err, CalcError::Evaluation(EvalError::UnexpectedToken { .. })));
    }

    #[test]
    fn test_sanitized_output_is_whitelisted() {
        for input in ["2^3 + x", "what is 7 times 8?", "5$+3", "(1+2))"] {
            for ai_mode in [false, true] {
                if let Ok(n) = pipeline().normalize(input, ai_mode) {
                    assert!(crate::normalize::is_sanitized(&n.expression), "{:?}", n.expression);
                }
            }
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["2++2", "(((3+2", "what is 5 plus 3", "square root of 16", "3*/4"] {
            let once = pipeline().normalize(input, true).unwrap();
            let twice = pipeline().normalize(&once.expression, true).unwrap();
            assert_eq!(once.expression, twice.expression, "input {:?}", input);
        }
    }

    #[test]
    fn test_history_expression() {
        let ai = pipeline().normalize("add 4 and 6", true).unwrap();
        assert_eq!(ai.history_expression(), "add 4 and 6");

        let plain = pipeline().normalize("4++6", false).unwrap();
        assert_eq!(plain.history_expression(), "4+6");
    }

    #[test]
    fn test_collapse_policy() {
        let options = NormalizerOptions {
            exponent: ExponentPolicy::Collapse,
            ..NormalizerOptions::default()
        };
        let pipeline = Pipeline::with_options(options, Evaluator::default());
        let c = pipeline.calculate("16**0.5", false).unwrap();
        assert_eq!(c.expression(), "16*0.5");
        assert_eq!(c.result, 8.0);
    }

    #[test]
    fn test_pipeline_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pipeline>();
    }
}
