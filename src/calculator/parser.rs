//! Recursive-descent evaluation of normalized arithmetic.
//!
//! Grammar:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-')* primary
//! primary := number | '(' expr ')'
//! ```
//!
//! Numbers are runs of digits with at most one decimal point (`5.` and `.5`
//! are both accepted). Nothing else is recognized.

use std::fmt;
use std::iter::Peekable;
use std::vec::IntoIter;

use super::evaluation::EvaluationError;

/// Deepest parenthesis nesting the parser will follow.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    OpenParen,
    CloseParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
        }
    }
}

/// A token with the char index it started at.
type Spanned = (usize, Token);

fn tokenize(input: &str) -> Result<Vec<Spanned>, EvaluationError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal.parse::<f64>().map_err(|_| EvaluationError::Syntax {
                    position: start,
                    message: format!("malformed number '{literal}'"),
                })?;
                tokens.push((start, Token::Number(value)));
                continue;
            }
            other => {
                return Err(EvaluationError::InvalidCharacter {
                    character: other,
                    position: i,
                });
            }
        };
        tokens.push((i, token));
        i += 1;
    }

    Ok(tokens)
}

struct Parser {
    tokens: Peekable<IntoIter<Spanned>>,
    end: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned>, end: usize) -> Self {
        Self {
            tokens: tokens.into_iter().peekable(),
            end,
            depth: 0,
        }
    }

    fn peek(&mut self) -> Option<Token> {
        self.tokens.peek().map(|&(_, token)| token)
    }

    fn expr(&mut self) -> Result<f64, EvaluationError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.tokens.next();
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.tokens.next();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvaluationError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.tokens.next();
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.tokens.next();
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(EvaluationError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    /// Sign runs are folded in a loop, so `------1` costs no stack.
    fn unary(&mut self) -> Result<f64, EvaluationError> {
        let mut negative = false;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.tokens.next();
                }
                Some(Token::Minus) => {
                    self.tokens.next();
                    negative = !negative;
                }
                _ => break,
            }
        }

        let value = self.primary()?;
        Ok(if negative { -value } else { value })
    }

    fn primary(&mut self) -> Result<f64, EvaluationError> {
        match self.tokens.next() {
            Some((_, Token::Number(value))) => Ok(value),
            Some((position, Token::OpenParen)) => {
                if self.depth >= MAX_DEPTH {
                    return Err(EvaluationError::Syntax {
                        position,
                        message: "expression nested too deeply".to_string(),
                    });
                }
                self.depth += 1;
                let value = self.expr()?;
                self.depth -= 1;
                match self.tokens.next() {
                    Some((_, Token::CloseParen)) => Ok(value),
                    Some((at, token)) => Err(EvaluationError::Syntax {
                        position: at,
                        message: format!("expected ')' but found '{token}'"),
                    }),
                    None => Err(EvaluationError::Syntax {
                        position,
                        message: "unclosed '('".to_string(),
                    }),
                }
            }
            Some((position, token)) => Err(EvaluationError::Syntax {
                position,
                message: format!("unexpected '{token}'"),
            }),
            None => Err(EvaluationError::Syntax {
                position: self.end,
                message: "unexpected end of expression".to_string(),
            }),
        }
    }
}

/// Evaluate a normalized expression.
pub fn evaluate_normalized(input: &str) -> Result<f64, EvaluationError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvaluationError::EmptyExpression);
    }

    let mut parser = Parser::new(tokens, input.chars().count());
    let value = parser.expr()?;

    if let Some((position, token)) = parser.tokens.next() {
        return Err(EvaluationError::Syntax {
            position,
            message: format!("unexpected '{token}'"),
        });
    }

    if !value.is_finite() {
        return Err(EvaluationError::NonFinite);
    }

    Ok(value)
}
