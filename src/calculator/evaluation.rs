//! Expression evaluation for the keypad buffer.
//!
//! Wraps normalization and the parser to provide a simple interface for
//! evaluating buffer text and formatting results.

use serde::Serialize;
use thiserror::Error;

use super::detection::first_rejected_char;
use super::normalize::normalize;
use super::parser::evaluate_normalized;

/// Default number of decimal places kept in a formatted result.
pub const DEFAULT_PRECISION: usize = 10;

/// Largest precision that still round-trips through `f64` text.
pub const MAX_PRECISION: usize = 15;

/// Why an expression could not be evaluated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("nothing to evaluate")]
    EmptyExpression,
    #[error("syntax error at {position}: {message}")]
    Syntax { position: usize, message: String },
    #[error("unexpected character '{character}' at {position}")]
    InvalidCharacter { character: char, position: usize },
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a finite number")]
    NonFinite,
}

/// Coarse classification of an [`EvaluationError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationErrorKind {
    Syntax,
    DivisionByZero,
    EmptyExpression,
    NonFinite,
}

impl EvaluationError {
    pub fn kind(&self) -> EvaluationErrorKind {
        match self {
            Self::EmptyExpression => EvaluationErrorKind::EmptyExpression,
            Self::Syntax { .. } | Self::InvalidCharacter { .. } => EvaluationErrorKind::Syntax,
            Self::DivisionByZero => EvaluationErrorKind::DivisionByZero,
            Self::NonFinite => EvaluationErrorKind::NonFinite,
        }
    }
}

/// Result of a successful calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct CalcResult {
    /// The raw buffer text that was evaluated.
    pub expression: String,
    /// The text actually handed to the parser.
    pub normalized: String,
    /// The numeric value.
    pub value: f64,
    /// Plain formatted value, safe to evaluate again.
    pub text: String,
}

/// Evaluate raw buffer text.
///
/// `last_number_entered` completes a dangling trailing operator, see
/// [`normalize`].
pub fn evaluate_expression(
    raw: &str,
    last_number_entered: &str,
    precision: usize,
) -> Result<CalcResult, EvaluationError> {
    if raw.is_empty() {
        return Err(EvaluationError::EmptyExpression);
    }

    if let Some((position, character)) = first_rejected_char(raw) {
        return Err(EvaluationError::InvalidCharacter {
            character,
            position,
        });
    }

    let normalized = normalize(raw, last_number_entered);
    let value = evaluate_normalized(&normalized)?;
    let text = format_value(value, precision);

    Ok(CalcResult {
        expression: raw.to_string(),
        normalized,
        value,
        text,
    })
}

/// Format a number as plain text the parser can read back.
pub fn format_value(value: f64, precision: usize) -> String {
    let precision = precision.min(MAX_PRECISION);
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.*}", precision, value);
        let trimmed = if formatted.contains('.') {
            formatted.trim_end_matches('0').trim_end_matches('.')
        } else {
            formatted.as_str()
        };
        match trimmed {
            "-0" => "0".to_string(),
            other => other.to_string(),
        }
    }
}

/// Insert thousand separators into the integer part of a formatted number.
pub fn group_digits(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, dec_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let grouped: String = grouped.chars().rev().collect();
    format!("{sign}{grouped}{dec_part}")
}
