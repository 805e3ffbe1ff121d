//! Arithmetic evaluator for sanitized expressions
//!
//! A small dedicated evaluator over `+ - * / % ** ( )` with standard
//! precedence. No generic code execution; anything the tokenizer does not
//! recognize is an error.

mod parser;
mod tokens;

pub use tokens::{tokenize, Spanned, Token};

use parser::Parser;

/// Default bound on parenthesis / unary nesting
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Evaluation failure with position information where available
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("Nothing to evaluate")]
    Empty,

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("Unexpected '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("Expression ended unexpectedly")]
    UnexpectedEnd,

    #[error("Mismatched parenthesis at position {position}")]
    UnbalancedParenthesis { position: usize },

    #[error("Expression nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// Evaluates arithmetic with a bounded nesting depth
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    max_depth: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Evaluator {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Evaluate `expr`. The result may be non-finite ("5/0"); callers decide
    /// whether that counts as a result.
    pub fn evaluate(&self, expr: &str) -> Result<f64, EvalError> {
        let tokens = tokenize(expr)?;
        Parser::new(&tokens, self.max_depth).evaluate()
    }
}

/// Evaluate with the default depth limit
pub fn evaluate(expr: &str) -> Result<f64, EvalError> {
    Evaluator::default().evaluate(expr)
}
