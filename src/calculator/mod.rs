//! Calculator engine: the keypad expression buffer and its evaluator.
//!
//! This module provides functionality to:
//! - Edit an expression one key at a time
//! - Flip the sign of the last number entered
//! - Normalize and evaluate keypad text
//! - Copy results to the clipboard

mod buffer;
mod clipboard;
mod detection;
mod evaluation;
mod flip;
mod normalize;
mod parser;

pub use buffer::{BufferError, BufferState, DEFAULT_ERROR_TEXT, ExpressionBuffer};
pub use clipboard::copy_to_clipboard;
pub use detection::{is_accepted_char, is_accepted_text};
pub use evaluation::{
    CalcResult, DEFAULT_PRECISION, EvaluationError, EvaluationErrorKind, MAX_PRECISION,
    evaluate_expression, format_value, group_digits,
};
pub use flip::flip_last_sign;
pub use normalize::normalize;
pub use parser::evaluate_normalized;
