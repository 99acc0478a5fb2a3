//! Sign toggling for the most recently entered number.
//!
//! The text is scanned once from the right. The scan copies the trailing
//! number, inspects the single character in front of it, and then copies the
//! rest verbatim. Earlier numbers are never touched.

use super::detection::is_number_char;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FlipState {
    /// Inside the trailing number literal.
    Copy { seen_digit: bool },
    /// At the character directly left of the trailing number.
    SeekSign,
    /// Sign handled, the remainder is copied unchanged.
    Done,
}

impl FlipState {
    /// Consume one character (right to left), pushing output in reverse.
    ///
    /// Returns `None` when the text has nothing to flip.
    fn step(self, c: char, reversed: &mut Vec<char>) -> Option<Self> {
        match self {
            Self::Copy { seen_digit } if is_number_char(c) => {
                reversed.push(c);
                Some(Self::Copy {
                    seen_digit: seen_digit || c.is_ascii_digit(),
                })
            }
            Self::Copy { seen_digit: true } => Self::SeekSign.step(c, reversed),
            Self::Copy { seen_digit: false } => None,
            Self::SeekSign => {
                match c {
                    '-' => reversed.push('+'),
                    '+' => reversed.push('-'),
                    '/' | 'x' | '*' | '(' => {
                        reversed.push('-');
                        reversed.push(c);
                    }
                    _ => return None,
                }
                Some(Self::Done)
            }
            Self::Done => {
                reversed.push(c);
                Some(Self::Done)
            }
        }
    }
}

/// Flip the sign of the last number in `text`.
///
/// - `3+5` becomes `3-5`, `3-5` becomes `3+5`
/// - `3x5` becomes `3x-5` (the operator itself is kept)
/// - `5` becomes `-5`
///
/// Returns `None` if the text does not end in a number, or the number
/// follows a closing brace.
pub fn flip_last_sign(text: &str) -> Option<String> {
    let mut reversed: Vec<char> = Vec::with_capacity(text.len() + 1);
    let mut state = FlipState::Copy { seen_digit: false };

    for c in text.chars().rev() {
        state = state.step(c, &mut reversed)?;
    }

    match state {
        // The number is the first token: prepend a unary minus.
        FlipState::Copy { seen_digit: true } => reversed.push('-'),
        FlipState::Copy { seen_digit: false } => return None,
        FlipState::SeekSign | FlipState::Done => {}
    }

    Some(reversed.into_iter().rev().collect())
}
