//! # Cut-Length Formula Evaluator
//!
//! Recipes express cut lengths and pane dimensions as small arithmetic
//! formulas over two variables: the opening width `W` and height `H`
//! (millimeters). Examples: `"W - 50"`, `"H/2 + 10"`, `"(W - 64) / 2"`.
//!
//! The grammar is deliberately tiny — numbers, `W`/`H` (case-insensitive),
//! `+ - * /`, unary minus, and parentheses. It is parsed by a restricted
//! recursive-descent evaluator, never a general-purpose `eval`: formulas are
//! authored by catalog administrators, but nothing beyond arithmetic may
//! ever execute.
//!
//! ## Failure policy
//!
//! [`evaluate`] never raises. An empty formula, a parse error, or a
//! non-finite result (division by zero) all degrade to `0.0` so a live
//! pricing preview keeps working mid-edit. [`try_evaluate`] exposes the
//! underlying diagnostic for recipe editors that want to surface it.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::formula::evaluate;
//!
//! assert_eq!(evaluate("W - 50", 1000.0, 800.0), 950.0);
//! assert_eq!(evaluate("h/2 + 10", 1000.0, 800.0), 410.0);
//! assert_eq!(evaluate("garbage(((", 1000.0, 800.0), 0.0);
//! ```

use crate::errors::{QuoteError, QuoteResult};

/// Evaluate a cut-length formula against an opening width and height.
///
/// Returns `0.0` on any failure — see the module docs for the policy.
pub fn evaluate(formula: &str, w: f64, h: f64) -> f64 {
    match try_evaluate(formula, w, h) {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Evaluate a formula, surfacing the parse diagnostic on failure.
///
/// An empty (or all-whitespace) formula is an error here; [`evaluate`]
/// maps it to `0.0`.
pub fn try_evaluate(formula: &str, w: f64, h: f64) -> QuoteResult<f64> {
    let tokens = tokenize(formula, w, h)?;
    if tokens.is_empty() {
        return Err(QuoteError::formula_error(formula, "empty formula"));
    }
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
    };
    let value = parser.expression().map_err(|reason| {
        QuoteError::formula_error(formula, reason)
    })?;
    if parser.pos != tokens.len() {
        return Err(QuoteError::formula_error(formula, "trailing tokens"));
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

/// Tokenize, substituting `W`/`H` (case-insensitive) with their values.
/// Any other identifier is rejected.
fn tokenize(formula: &str, w: f64, h: f64) -> QuoteResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = formula.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value: f64 = literal.parse().map_err(|_| {
                    QuoteError::formula_error(formula, format!("bad number '{literal}'"))
                })?;
                tokens.push(Token::Number(value));
            }
            'w' | 'W' => {
                chars.next();
                tokens.push(Token::Number(w));
            }
            'h' | 'H' => {
                chars.next();
                tokens.push(Token::Number(h));
            }
            other => {
                return Err(QuoteError::formula_error(
                    formula,
                    format!("unexpected character '{other}'"),
                ));
            }
        }
    }

    Ok(tokens)
}

/// Recursive-descent parser over the token stream.
///
/// Grammar:
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := factor (('*' | '/') factor)*
/// factor     := '-' factor | '(' expression ')' | number
/// ```
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.advance();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.advance();
                    value *= self.factor()?;
                }
                Token::Slash => {
                    self.advance();
                    // Division by zero yields inf/NaN; evaluate() maps it to 0.
                    value /= self.factor()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, String> {
        match self.advance() {
            Some(Token::Minus) => Ok(-self.factor()?),
            Some(Token::Number(value)) => Ok(value),
            Some(Token::LParen) => {
                let value = self.expression()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err("unbalanced parenthesis".to_string()),
                }
            }
            Some(other) => Err(format!("unexpected token {other:?}")),
            None => Err("unexpected end of formula".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(evaluate("W - 50", 1000.0, 800.0), 950.0);
        assert_eq!(evaluate("H/2+10", 1000.0, 800.0), 410.0);
        assert_eq!(evaluate("(W - 64) / 2", 1064.0, 0.0), 500.0);
        assert_eq!(evaluate("2*H + W", 1000.0, 800.0), 2600.0);
    }

    #[test]
    fn test_case_insensitive_variables() {
        assert_eq!(evaluate("w + h", 100.0, 200.0), 300.0);
        assert_eq!(evaluate("W + h", 100.0, 200.0), 300.0);
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(evaluate("-W + 1500", 1000.0, 0.0), 500.0);
        assert_eq!(evaluate("--10", 0.0, 0.0), 10.0);
    }

    #[test]
    fn test_precedence_and_parens() {
        assert_eq!(evaluate("2 + 3 * 4", 0.0, 0.0), 14.0);
        assert_eq!(evaluate("(2 + 3) * 4", 0.0, 0.0), 20.0);
    }

    #[test]
    fn test_empty_and_garbage_degrade_to_zero() {
        assert_eq!(evaluate("", 1000.0, 800.0), 0.0);
        assert_eq!(evaluate("   ", 1000.0, 800.0), 0.0);
        assert_eq!(evaluate("garbage(((", 1000.0, 800.0), 0.0);
        assert_eq!(evaluate("W +", 1000.0, 800.0), 0.0);
        assert_eq!(evaluate("1 2", 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_division_by_zero_degrades_to_zero() {
        assert_eq!(evaluate("W / 0", 1000.0, 800.0), 0.0);
        assert_eq!(evaluate("0 / 0", 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_non_arithmetic_rejected() {
        // Identifiers other than W/H must never evaluate.
        assert_eq!(evaluate("width", 1000.0, 800.0), 0.0);
        assert!(try_evaluate("x + 1", 0.0, 0.0).is_err());
    }

    #[test]
    fn test_try_evaluate_diagnostics() {
        let err = try_evaluate("W + (", 100.0, 100.0).unwrap_err();
        assert_eq!(err.error_code(), "FORMULA_ERROR");
    }
}
