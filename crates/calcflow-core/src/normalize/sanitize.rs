//! Final whitelist gate before evaluation
//!
//! Only `[0-9+\-*/().% ]` reaches the evaluator, whatever the upstream passes did.

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.' | '%' | ' ')
}

/// Drop every character outside the arithmetic whitelist
pub fn sanitize(expr: &str) -> String {
    expr.chars().filter(|&c| is_allowed(c)).collect()
}

/// Whether `expr` already satisfies the whitelist
pub fn is_sanitized(expr: &str) -> bool {
    expr.chars().all(is_allowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_arithmetic() {
        assert_eq!(sanitize("(1 + 2.5) * 3 % 2 / 4 - 1"), "(1 + 2.5) * 3 % 2 / 4 - 1");
    }

    #[test]
    fn test_strips_letters_and_symbols() {
        assert_eq!(sanitize("alert(1)"), "(1)");
        assert_eq!(sanitize("2^3; x=4"), "23 4");
        assert_eq!(sanitize("5 usd"), "5 ");
    }

    #[test]
    fn test_strips_other_whitespace_and_unicode() {
        assert_eq!(sanitize("1\t+\n2"), "1+2");
        assert_eq!(sanitize("３+1"), "+1");
        assert_eq!(sanitize("2×3"), "23");
    }

    #[test]
    fn test_is_sanitized() {
        assert!(is_sanitized("(1+2)*3"));
        assert!(is_sanitized(""));
        assert!(!is_sanitized("1+a"));
    }
}
