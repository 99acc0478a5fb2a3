//! The editable expression behind the calculator display.

use thiserror::Error;
use tracing::{debug, warn};

use super::detection::is_accepted_char;
use super::evaluation::{DEFAULT_PRECISION, EvaluationError, evaluate_expression};
use super::flip::flip_last_sign;

/// Indicator shown after a failed evaluation unless configured otherwise.
pub const DEFAULT_ERROR_TEXT: &str = "Error";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("'{0}' is not a calculator key")]
    UnsupportedToken(char),
}

/// Where the buffer is in its edit/evaluate cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferState {
    /// Building an expression.
    Editing,
    /// Showing a result; the next append starts over.
    Evaluated,
    /// Showing the error indicator; the next append starts over.
    Error,
}

/// Expression text under incremental keypad edits.
#[derive(Clone, Debug)]
pub struct ExpressionBuffer {
    text: String,
    evaluated: bool,
    /// Most recent digit appended, used to finish a dangling operator.
    last_number_entered: String,
    last_error: Option<EvaluationError>,
    /// Value of the result on display, if any.
    last_value: Option<f64>,
    precision: usize,
    error_text: String,
}

impl Default for ExpressionBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionBuffer {
    pub fn new() -> Self {
        Self::with_options(DEFAULT_PRECISION, DEFAULT_ERROR_TEXT)
    }

    /// Create a buffer with a result precision and error indicator.
    pub fn with_options(precision: usize, error_text: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            evaluated: false,
            last_number_entered: "0".to_string(),
            last_error: None,
            last_value: None,
            precision,
            error_text: error_text.into(),
        }
    }

    /// Text for the display: the expression, a result, or the error indicator.
    pub fn display_text(&self) -> &str {
        &self.text
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    pub fn last_number_entered(&self) -> &str {
        &self.last_number_entered
    }

    /// The error behind the indicator, while one is displayed.
    pub fn last_error(&self) -> Option<&EvaluationError> {
        self.last_error.as_ref()
    }

    /// The numeric value while a result is displayed.
    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }

    pub fn state(&self) -> BufferState {
        if self.last_error.is_some() {
            BufferState::Error
        } else if self.evaluated && !self.text.is_empty() {
            BufferState::Evaluated
        } else {
            BufferState::Editing
        }
    }

    /// Append one keypad character.
    ///
    /// After an evaluation the old text is dropped first, so the token begins
    /// a new expression.
    pub fn append(&mut self, token: char) -> Result<(), BufferError> {
        if !is_accepted_char(token) {
            warn!(%token, "rejected token");
            return Err(BufferError::UnsupportedToken(token));
        }

        if self.evaluated {
            self.text.clear();
            self.last_error = None;
            self.last_value = None;
            self.evaluated = false;
        }

        self.text.push(token);

        if token.is_ascii_digit() {
            self.last_number_entered.clear();
            self.last_number_entered.push(token);
        }

        Ok(())
    }

    /// Empty the text. The evaluated flag is left as it is.
    pub fn clear(&mut self) {
        self.text.clear();
        self.last_error = None;
        self.last_value = None;
    }

    /// Toggle the sign of the last number, if there is one.
    pub fn flip_sign(&mut self) {
        if self.last_error.is_some() {
            return;
        }

        match flip_last_sign(&self.text) {
            Some(flipped) => {
                self.text = flipped;
                // A displayed result is a bare number, so its sign just flips.
                self.last_value = self.last_value.map(|value| -value);
            }
            None => debug!(text = %self.text, "nothing to flip"),
        }
    }

    /// Evaluate the text and replace it with the result.
    ///
    /// Failures are not returned: the buffer switches to the error indicator
    /// and keeps the error in [`last_error`](Self::last_error).
    pub fn evaluate(&mut self) {
        if self.text.is_empty() || self.last_error.is_some() {
            return;
        }

        match evaluate_expression(&self.text, &self.last_number_entered, self.precision) {
            Ok(result) => {
                debug!(
                    expression = %result.expression,
                    normalized = %result.normalized,
                    value = result.value,
                    "evaluated"
                );
                self.text = result.text;
                self.last_value = Some(result.value);
                self.last_error = None;
            }
            Err(EvaluationError::EmptyExpression) => return,
            Err(err) => {
                warn!(expression = %self.text, error = %err, "evaluation failed");
                self.text = self.error_text.clone();
                self.last_value = None;
                self.last_error = Some(err);
            }
        }

        self.evaluated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(keys: &str) -> ExpressionBuffer {
        let mut buffer = ExpressionBuffer::new();
        for key in keys.chars() {
            buffer.append(key).unwrap();
        }
        buffer
    }

    #[test]
    fn test_digits_concatenate() {
        let buffer = buffer_with("90210");
        assert_eq!(buffer.display_text(), "90210");
        assert_eq!(buffer.state(), BufferState::Editing);
    }

    #[test]
    fn test_unsupported_token_rejected() {
        let mut buffer = buffer_with("1");
        assert_eq!(buffer.append('*'), Err(BufferError::UnsupportedToken('*')));
        assert_eq!(buffer.append('a'), Err(BufferError::UnsupportedToken('a')));
        assert_eq!(buffer.display_text(), "1");
    }

    #[test]
    fn test_last_number_is_single_digit_memory() {
        let buffer = buffer_with("47+");
        assert_eq!(buffer.last_number_entered(), "7");
        assert_eq!(ExpressionBuffer::new().last_number_entered(), "0");
    }

    #[test]
    fn test_evaluate_replaces_text() {
        let mut buffer = buffer_with("2(3+4)");
        buffer.evaluate();
        assert_eq!(buffer.display_text(), "14");
        assert!(buffer.is_evaluated());
        assert_eq!(buffer.state(), BufferState::Evaluated);
    }

    #[test]
    fn test_evaluate_twice_keeps_value() {
        let mut buffer = buffer_with("1/3");
        buffer.evaluate();
        let first = buffer.display_text().to_string();
        buffer.evaluate();
        assert_eq!(buffer.display_text(), first);
    }

    #[test]
    fn test_trailing_operator_completion() {
        let mut buffer = buffer_with("5+");
        buffer.evaluate();
        assert_eq!(buffer.display_text(), "10");

        let mut buffer = buffer_with("12x");
        buffer.evaluate();
        assert_eq!(buffer.display_text(), "24");
    }

    #[test]
    fn test_append_after_evaluate_starts_fresh() {
        let mut buffer = buffer_with("2+2");
        buffer.evaluate();
        buffer.append('7').unwrap();
        assert_eq!(buffer.display_text(), "7");
        assert!(!buffer.is_evaluated());
    }

    #[test]
    fn test_operator_after_evaluate_starts_fresh() {
        let mut buffer = buffer_with("2+2");
        buffer.evaluate();
        buffer.append('+').unwrap();
        assert_eq!(buffer.display_text(), "+");
    }

    #[test]
    fn test_evaluate_empty_is_noop() {
        let mut buffer = ExpressionBuffer::new();
        buffer.evaluate();
        assert_eq!(buffer.display_text(), "");
        assert!(!buffer.is_evaluated());
        assert!(buffer.last_error().is_none());
    }

    #[test]
    fn test_division_by_zero_shows_error() {
        let mut buffer = buffer_with("4/0");
        buffer.evaluate();
        assert_eq!(buffer.display_text(), DEFAULT_ERROR_TEXT);
        assert_eq!(buffer.state(), BufferState::Error);
        assert_eq!(buffer.last_error(), Some(&EvaluationError::DivisionByZero));

        buffer.append('3').unwrap();
        assert_eq!(buffer.display_text(), "3");
        assert_eq!(buffer.state(), BufferState::Editing);
        assert!(buffer.last_error().is_none());
    }

    #[test]
    fn test_error_state_ignores_flip_and_evaluate() {
        let mut buffer = buffer_with("1++)(");
        buffer.evaluate();
        assert_eq!(buffer.state(), BufferState::Error);
        buffer.flip_sign();
        buffer.evaluate();
        assert_eq!(buffer.display_text(), DEFAULT_ERROR_TEXT);
    }

    #[test]
    fn test_custom_error_text() {
        let mut buffer = ExpressionBuffer::with_options(10, "E");
        for key in "1/0".chars() {
            buffer.append(key).unwrap();
        }
        buffer.evaluate();
        assert_eq!(buffer.display_text(), "E");
    }

    #[test]
    fn test_clear_empties_text() {
        let mut buffer = buffer_with("12+3");
        buffer.clear();
        assert_eq!(buffer.display_text(), "");
        assert_eq!(buffer.state(), BufferState::Editing);
    }

    #[test]
    fn test_clear_keeps_evaluated_flag() {
        let mut buffer = buffer_with("9-3");
        buffer.evaluate();
        buffer.clear();
        assert_eq!(buffer.display_text(), "");
        assert!(buffer.is_evaluated());
        assert_eq!(buffer.state(), BufferState::Editing);

        buffer.append('4').unwrap();
        assert_eq!(buffer.display_text(), "4");
    }

    #[test]
    fn test_clear_leaves_error_state() {
        let mut buffer = buffer_with("4/0");
        buffer.evaluate();
        buffer.clear();
        assert_eq!(buffer.display_text(), "");
        assert_eq!(buffer.state(), BufferState::Editing);
    }

    #[test]
    fn test_flip_sign_scenarios() {
        let mut buffer = buffer_with("3+5");
        buffer.flip_sign();
        buffer.evaluate();
        assert_eq!(buffer.display_text(), "-2");

        let mut buffer = buffer_with("5");
        buffer.flip_sign();
        assert_eq!(buffer.display_text(), "-5");

        let mut buffer = buffer_with("3-5");
        buffer.flip_sign();
        buffer.evaluate();
        assert_eq!(buffer.display_text(), "8");
    }

    #[test]
    fn test_flip_sign_on_result() {
        let mut buffer = buffer_with("6x7");
        buffer.evaluate();
        buffer.flip_sign();
        assert_eq!(buffer.display_text(), "-42");
        assert!(buffer.is_evaluated());
    }

    #[test]
    fn test_result_value_follows_display() {
        let mut buffer = buffer_with("7/2");
        assert_eq!(buffer.last_value(), None);
        buffer.evaluate();
        assert_eq!(buffer.last_value(), Some(3.5));

        buffer.flip_sign();
        assert_eq!(buffer.display_text(), "-3.5");
        assert_eq!(buffer.last_value(), Some(-3.5));

        buffer.append('1').unwrap();
        assert_eq!(buffer.last_value(), None);
    }

    #[test]
    fn test_result_value_cleared_by_clear_and_error() {
        let mut buffer = buffer_with("2x3");
        buffer.evaluate();
        buffer.clear();
        assert_eq!(buffer.last_value(), None);

        let mut buffer = buffer_with("1/0");
        buffer.evaluate();
        assert_eq!(buffer.last_value(), None);
    }

    #[test]
    fn test_flip_sign_without_number_is_noop() {
        let mut buffer = buffer_with("5+");
        buffer.flip_sign();
        assert_eq!(buffer.display_text(), "5+");
    }
}
