//! Recursive-descent evaluation
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('**' unary)?
//! primary := number | '(' expr ')'
//! ```
//!
//! `**` binds tighter than unary minus and is right-associative, so
//! `-2**2 = -4` and `2**3**2 = 512`.

use super::tokens::{Spanned, Token};
use super::EvalError;

pub struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Spanned], max_depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Evaluate the whole token stream
    pub fn evaluate(mut self) -> Result<f64, EvalError> {
        if self.tokens.is_empty() {
            return Err(EvalError::Empty);
        }

        let value = self.expr()?;

        match self.tokens.get(self.pos) {
            None => Ok(value),
            Some(Spanned {
                token: Token::RParen,
                position,
            }) => Err(EvalError::UnbalancedParenthesis {
                position: *position,
            }),
            Some(other) => Err(unexpected(other)),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn advance(&mut self) -> Option<&'a Spanned> {
        let tokens = self.tokens;
        let spanned = tokens.get(self.pos)?;
        self.pos += 1;
        Some(spanned)
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(EvalError::TooDeep {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    value /= self.unary()?;
                }
                Some(Token::Percent) => {
                    self.pos += 1;
                    // Remainder keeps the sign of the dividend
                    value %= self.unary()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.enter()?;
                let value = self.unary();
                self.leave();
                Ok(-value?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.enter()?;
                let value = self.unary();
                self.leave();
                value
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, EvalError> {
        let base = self.primary()?;
        if self.peek() == Some(&Token::Pow) {
            self.pos += 1;
            self.enter()?;
            let exponent = self.unary();
            self.leave();
            return Ok(base.powf(exponent?));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        let spanned = self.advance().ok_or(EvalError::UnexpectedEnd)?;
        match spanned.token {
            Token::Num(value) => Ok(value),
            Token::LParen => {
                self.enter()?;
                let value = self.expr();
                self.leave();
                let value = value?;
                match self.advance() {
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => Ok(value),
                    Some(other) => Err(unexpected(other)),
                    None => Err(EvalError::UnbalancedParenthesis {
                        position: spanned.position,
                    }),
                }
            }
            _ => Err(unexpected(spanned)),
        }
    }
}

fn unexpected(spanned: &Spanned) -> EvalError {
    EvalError::UnexpectedToken {
        token: spanned.token.to_string(),
        position: spanned.position,
    }
}
