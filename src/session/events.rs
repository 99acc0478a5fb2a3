//! Input events forwarded by the front-end, and the key map that produces them.

use crate::config::KeyBindings;

/// A binary arithmetic operator key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// The character this operator shows as in the buffer.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => 'x',
            Self::Divide => '/',
        }
    }

    fn from_key(key: char) -> Option<Self> {
        match key {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            'x' | 'X' | '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }
}

/// A single keypad event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Digit(u8),
    Operator(Operator),
    OpenBrace,
    CloseBrace,
    DecimalPoint,
    Clear,
    FlipSign,
    Evaluate,
}

impl InputEvent {
    /// Translate a keystroke. Control keys come from `bindings` and take
    /// precedence over the fixed keypad keys.
    pub fn from_key(key: char, bindings: &KeyBindings) -> Option<Self> {
        if bindings.clear.contains(&key) {
            return Some(Self::Clear);
        }
        if bindings.flip_sign.contains(&key) {
            return Some(Self::FlipSign);
        }
        if bindings.evaluate.contains(&key) {
            return Some(Self::Evaluate);
        }

        match key {
            '0'..='9' => key.to_digit(10).map(|d| Self::Digit(d as u8)),
            '.' => Some(Self::DecimalPoint),
            '(' => Some(Self::OpenBrace),
            ')' => Some(Self::CloseBrace),
            _ => Operator::from_key(key).map(Self::Operator),
        }
    }

    /// The buffer character for events that append text.
    ///
    /// Control events and out-of-range digits have none.
    pub fn token(self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(d), 10),
            Self::Operator(op) => Some(op.symbol()),
            Self::OpenBrace => Some('('),
            Self::CloseBrace => Some(')'),
            Self::DecimalPoint => Some('.'),
            Self::Clear | Self::FlipSign | Self::Evaluate => None,
        }
    }
}
