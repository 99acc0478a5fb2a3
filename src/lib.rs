//! Keypad calculator engine.
//!
//! [`session::CalculatorSession`] owns an [`calculator::ExpressionBuffer`] and
//! applies [`session::InputEvent`]s to it one at a time. The front-end only
//! forwards events and draws [`session::CalculatorSession::display_text`].

pub mod calculator;
pub mod config;
pub mod session;

pub use calculator::{CalcResult, EvaluationError, ExpressionBuffer};
pub use config::Config;
pub use session::{CalculatorSession, InputEvent, Operator};
