//! A calculator session: one expression buffer driven by input events.
//!
//! The session is the only owner of its buffer. Every event is applied to
//! completion before `handle` returns.

mod events;
mod snapshot;

pub use events::{InputEvent, Operator};
pub use snapshot::{SessionSnapshot, SnapshotError};

use tracing::{debug, warn};

use crate::calculator::{BufferState, ExpressionBuffer, group_digits};
use crate::config::{Config, KeyBindings};

pub struct CalculatorSession {
    buffer: ExpressionBuffer,
    keys: KeyBindings,
    group_digits: bool,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl CalculatorSession {
    pub fn new(config: &Config) -> Self {
        Self {
            buffer: ExpressionBuffer::with_options(
                config.display.precision,
                config.display.error_text.clone(),
            ),
            keys: config.keys.clone(),
            group_digits: config.display.group_digits,
        }
    }

    /// Apply one event to the buffer.
    pub fn handle(&mut self, event: InputEvent) {
        debug!(?event, "handling event");
        match event {
            InputEvent::Clear => self.buffer.clear(),
            InputEvent::FlipSign => self.buffer.flip_sign(),
            InputEvent::Evaluate => self.buffer.evaluate(),
            other => match other.token() {
                Some(token) => {
                    if let Err(err) = self.buffer.append(token) {
                        warn!(error = %err, "append rejected");
                    }
                }
                None => warn!(event = ?other, "event has no keypad character"),
            },
        }
    }

    /// Translate and apply a keystroke. Returns `false` for unmapped keys.
    pub fn press(&mut self, key: char) -> bool {
        match InputEvent::from_key(key, &self.keys) {
            Some(event) => {
                self.handle(event);
                true
            }
            None => {
                debug!(?key, "ignoring unmapped key");
                false
            }
        }
    }

    /// Press every key in `keys`, in order.
    pub fn type_keys(&mut self, keys: &str) {
        for key in keys.chars() {
            self.press(key);
        }
    }

    pub fn display_text(&self) -> &str {
        self.buffer.display_text()
    }

    /// Display text as the front-end should draw it.
    ///
    /// Identical to [`display_text`](Self::display_text) unless digit
    /// grouping is enabled and a result is shown.
    pub fn rendered_text(&self) -> String {
        if self.group_digits && self.buffer.state() == BufferState::Evaluated {
            group_digits(self.buffer.display_text())
        } else {
            self.buffer.display_text().to_string()
        }
    }

    pub fn buffer(&self) -> &ExpressionBuffer {
        &self.buffer
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            display: self.buffer.display_text().to_string(),
            state: self.buffer.state(),
            value: self.buffer.last_value(),
            error: self.buffer.last_error().map(SnapshotError::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::EvaluationErrorKind;

    #[test]
    fn test_events_drive_buffer() {
        let mut session = CalculatorSession::default();
        session.handle(InputEvent::Digit(2));
        session.handle(InputEvent::Operator(Operator::Multiply));
        session.handle(InputEvent::OpenBrace);
        session.handle(InputEvent::Digit(3));
        session.handle(InputEvent::Operator(Operator::Add));
        session.handle(InputEvent::Digit(4));
        assert_eq!(session.display_text(), "2x(3+4");
        session.handle(InputEvent::Evaluate);
        assert_eq!(session.display_text(), "14");
    }

    #[test]
    fn test_out_of_range_digit_ignored() {
        let mut session = CalculatorSession::default();
        session.handle(InputEvent::Digit(1));
        session.handle(InputEvent::Digit(42));
        assert_eq!(session.display_text(), "1");
    }

    #[test]
    fn test_press_reports_unmapped_keys() {
        let mut session = CalculatorSession::default();
        assert!(session.press('1'));
        assert!(!session.press('q'));
        assert_eq!(session.display_text(), "1");
    }

    #[test]
    fn test_rendered_text_grouping() {
        let mut config = Config::default();
        config.display.group_digits = true;
        let mut session = CalculatorSession::new(&config);
        session.type_keys("1000x1000");
        assert_eq!(session.rendered_text(), "1000x1000");
        session.type_keys("=");
        assert_eq!(session.display_text(), "1000000");
        assert_eq!(session.rendered_text(), "1,000,000");
    }

    #[test]
    fn test_snapshot_of_result() {
        let mut session = CalculatorSession::default();
        session.type_keys("7/2=");
        let snapshot = session.snapshot();
        assert_eq!(snapshot.display, "3.5");
        assert_eq!(snapshot.state, BufferState::Evaluated);
        assert_eq!(snapshot.value, Some(3.5));
        assert!(!snapshot.is_error());
    }

    #[test]
    fn test_snapshot_value_after_flip() {
        let mut session = CalculatorSession::default();
        session.type_keys("6x7=~");
        let snapshot = session.snapshot();
        assert_eq!(snapshot.display, "-42");
        assert_eq!(snapshot.value, Some(-42.0));
    }

    #[test]
    fn test_snapshot_of_error() {
        let mut session = CalculatorSession::default();
        session.type_keys("4/0=");
        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, BufferState::Error);
        assert_eq!(snapshot.value, None);
        let error = snapshot.error.unwrap();
        assert_eq!(error.kind, EvaluationErrorKind::DivisionByZero);
        assert_eq!(error.message, "division by zero");
    }

    #[test]
    fn test_snapshot_json() {
        let mut session = CalculatorSession::default();
        session.type_keys("12");
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["display"], "12");
        assert_eq!(json["state"], "editing");
        assert!(json.get("value").is_none());
        assert!(json.get("error").is_none());
    }
}
