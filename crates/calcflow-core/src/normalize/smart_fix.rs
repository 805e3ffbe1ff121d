//! Smart fix for common expression typos
//!
//! Never fails. Rules, in order:
//! 1. Collapse runs of the same operator ("2++2" → "2+2")
//! 2. Strip leading operators except unary minus
//! 3. Strip trailing operators, dots and whitespace
//! 4. Drop unmatched ")" and close any "(" still open
//!
//! The rules are re-applied until the text stops changing, since dropping a
//! stray ")" can make two operators adjacent again.

use serde::{Deserialize, Serialize};

/// How a run of two or more `*` is collapsed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExponentPolicy {
    /// `**` survives as the exponent token ("3**2" stays "3**2")
    #[default]
    Preserve,
    /// Every run collapses to one `*` ("3**2" → "3*2")
    Collapse,
}

impl ExponentPolicy {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Preserve => "preserve",
            Self::Collapse => "collapse",
        }
    }
}

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%')
}

/// Repair `expr`; the result is a fixed point of the rules above
pub fn smart_fix(expr: &str, policy: ExponentPolicy) -> String {
    let mut current = fix_once(expr, policy);
    loop {
        let next = fix_once(&current, policy);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn fix_once(expr: &str, policy: ExponentPolicy) -> String {
    let collapsed = collapse_operator_runs(expr, policy);
    let stripped = collapsed
        .trim_start_matches(|c: char| matches!(c, '+' | '*' | '/' | '%'))
        .trim_end_matches(|c: char| is_operator(c) || c == '.' || c.is_whitespace());
    balance_parentheses(stripped)
}

fn collapse_operator_runs(expr: &str, policy: ExponentPolicy) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut chars = expr.chars().peekable();

    while let Some(c) = chars.next() {
        out.push(c);
        if !is_operator(c) {
            continue;
        }

        let mut run = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            run += 1;
        }

        if c == '*' && run >= 2 && policy == ExponentPolicy::Preserve {
            out.push('*');
        }
    }

    out
}

fn balance_parentheses(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len() + 4);
    let mut depth = 0usize;

    for c in expr.chars() {
        match c {
            '(' => {
                depth += 1;
                out.push(c);
            }
            ')' => {
                // Drop a close paren with nothing to close
                if depth > 0 {
                    depth -= 1;
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }

    out.extend(std::iter::repeat(')').take(depth));
    out
}
