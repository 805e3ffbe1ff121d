//! Phrase templates for natural-language arithmetic
//!
//! An explicit, ordered list of (pattern, rewrite) pairs. Order is part of the
//! behaviour: roots before percentages before sum-of-squares before the
//! sentence forms. The first template whose pattern matches wins.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::numbers::{parse_ordinal, ORDINALS};
use super::{format_number, Rewrite};

/// A fixed phrase pattern mapped to an arithmetic rewrite
pub struct Template {
    pub name: &'static str,
    pattern: Regex,
    rewrite: fn(&Captures) -> Rewrite,
}

impl Template {
    fn new(name: &'static str, pattern: &str, rewrite: fn(&Captures) -> Rewrite) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid pattern for template '{}': {}", name, e));
        Self { name, pattern, rewrite }
    }

    /// Apply this template if its pattern matches
    pub fn apply(&self, text: &str) -> Option<Rewrite> {
        self.pattern.captures(text).map(|caps| (self.rewrite)(&caps))
    }
}

const NUMBER: &str = r"([0-9]+(?:\.[0-9]+)?)";
const OPERAND: &str = r"([0-9.()]+)";

/// All templates in priority order
pub static TEMPLATES: Lazy<Vec<Template>> = Lazy::new(|| {
    let ordinal_words: Vec<&str> = ORDINALS.iter().map(|(name, _)| *name).collect();

    vec![
        Template::new(
            "nth_root",
            &format!(
                r"([0-9]+|{})(?:st|nd|rd|th)?\s+root\s+of\s+{}",
                ordinal_words.join("|"),
                NUMBER
            ),
            nth_root,
        ),
        Template::new("cube_root", &format!(r"cube\s+root\s+of\s+{}", NUMBER), cube_root),
        Template::new(
            "square_root",
            &format!(r"(?:square\s+root|sqrt|root)\s+of\s+{}", NUMBER),
            square_root,
        ),
        Template::new("percentage", &format!(r"{}% of {}", NUMBER, NUMBER), percentage),
        Template::new("sum_of_squares", r"sum of first ([0-9]+) squares", sum_of_squares),
        Template::new(
            "add",
            &format!(r"^add\s+{}\s+(?:and|to)\s+{}$", OPERAND, OPERAND),
            add,
        ),
        Template::new(
            "subtract",
            &format!(r"^subtract\s+{}\s+from\s+{}$", OPERAND, OPERAND),
            subtract,
        ),
        Template::new(
            "multiply",
            &format!(r"^(?:multiply|mul)\s+{}\s+(?:by\s+)?{}$", OPERAND, OPERAND),
            multiply,
        ),
        Template::new(
            "divide",
            &format!(r"^divide\s+{}\s+(?:by|over)\s+{}$", OPERAND, OPERAND),
            divide,
        ),
    ]
});

/// Try every template in order; first match short-circuits
pub fn match_template(text: &str) -> Option<Rewrite> {
    TEMPLATES.iter().find_map(|template| {
        let rewrite = template.apply(text)?;
        tracing::debug!("Template '{}' matched: {}", template.name, rewrite.expression);
        Some(rewrite)
    })
}

fn nth_root(caps: &Captures) -> Rewrite {
    let degree = match parse_ordinal(&caps[1]) {
        Some(n) => n.to_string(),
        None => format_number(&caps[1]),
    };
    let x = format_number(&caps[2]);
    Rewrite::new(
        format!("{}**(1/{})", x, degree),
        format!("Using nth root: {}th root of {} = {} ** (1/{})", degree, x, x, degree),
    )
}

fn cube_root(caps: &Captures) -> Rewrite {
    let x = format_number(&caps[1]);
    Rewrite::new(
        format!("{}**(1/3)", x),
        format!("Cube root of {} = {} ** (1/3)", x, x),
    )
}

fn square_root(caps: &Captures) -> Rewrite {
    let x = format_number(&caps[1]);
    Rewrite::new(
        format!("{}**0.5", x),
        format!("Square root of {} = {} ** 0.5", x, x),
    )
}

fn percentage(caps: &Captures) -> Rewrite {
    let p = format_number(&caps[1]);
    let n = format_number(&caps[2]);
    Rewrite::new(
        format!("({}/100)*{}", p, n),
        format!("{}% of {} = ({}/100) * {}", p, n, p, n),
    )
}

fn sum_of_squares(caps: &Captures) -> Rewrite {
    let n = format_number(&caps[1]);
    Rewrite::new(
        format!("({n}*({n}+1)*(2*{n}+1))/6", n = n),
        "Using formula n(n+1)(2n+1)/6 for sum of squares",
    )
}

fn add(caps: &Captures) -> Rewrite {
    Rewrite::new(
        format!("{}+{}", &caps[1], &caps[2]),
        format!("Add {} and {}", &caps[1], &caps[2]),
    )
}

fn subtract(caps: &Captures) -> Rewrite {
    Rewrite::new(
        format!("{}-{}", &caps[2], &caps[1]),
        format!("Subtract {} from {}", &caps[1], &caps[2]),
    )
}

fn multiply(caps: &Captures) -> Rewrite {
    Rewrite::new(
        format!("{}*{}", &caps[1], &caps[2]),
        format!("Multiply {} by {}", &caps[1], &caps[2]),
    )
}

fn divide(caps: &Captures) -> Rewrite {
    Rewrite::new(
        format!("{}/{}", &caps[1], &caps[2]),
        format!("Divide {} by {}", &caps[1], &caps[2]),
    )
}
