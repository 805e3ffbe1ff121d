//! Tokenizer for sanitized arithmetic

use std::fmt;

use super::EvalError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `**`
    Pow,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(v) => write!(f, "{}", v),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::Percent => f.write_str("%"),
            Token::Pow => f.write_str("**"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

/// A token plus the char offset it started at (for error messages)
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

/// Split an expression into tokens.
///
/// Supports:
/// - numbers: `12`, `1.5`, `.5`, `5.`
/// - operators `+ - * / %` and `**`
/// - parentheses
///
/// Whitespace is skipped; anything else is an error.
pub fn tokenize(expr: &str) -> Result<Vec<Spanned>, EvalError> {
    let chars: Vec<char> = expr.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            if literal.matches('.').count() > 1 {
                return Err(EvalError::InvalidNumber(literal));
            }
            let value = literal
                .parse::<f64>()
                .map_err(|_| EvalError::InvalidNumber(literal.clone()))?;
            out.push(Spanned {
                token: Token::Num(value),
                position: start,
            });
            continue;
        }

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1;
                Token::Pow
            }
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => {
                return Err(EvalError::UnexpectedCharacter {
                    ch: other,
                    position: start,
                })
            }
        };
        i += 1;
        out.push(Spanned {
            token,
            position: start,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(expr: &str) -> Vec<Token> {
        tokenize(expr)
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("12"), vec![Token::Num(12.0)]);
        assert_eq!(kinds("1.5"), vec![Token::Num(1.5)]);
        assert_eq!(kinds(".5"), vec![Token::Num(0.5)]);
        assert_eq!(kinds("5."), vec![Token::Num(5.0)]);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("1 + 2 ** 3 % (4)"),
            vec![
                Token::Num(1.0),
                Token::Plus,
                Token::Num(2.0),
                Token::Pow,
                Token::Num(3.0),
                Token::Percent,
                Token::LParen,
                Token::Num(4.0),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_triple_star_is_pow_then_star() {
        assert_eq!(
            kinds("2***3"),
            vec![Token::Num(2.0), Token::Pow, Token::Star, Token::Num(3.0)]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("1 + 22").unwrap();
        assert_eq!(tokens[1].position, 2);
        assert_eq!(tokens[2].position, 4);
    }

    #[test]
    fn test_invalid_number() {
        assert_eq!(tokenize("1.2.3"), Err(EvalError::InvalidNumber("1.2.3".to_string())));
        assert_eq!(tokenize("."), Err(EvalError::InvalidNumber(".".to_string())));
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            tokenize("2^3"),
            Err(EvalError::UnexpectedCharacter { ch: '^', position: 1 })
        );
    }
}
