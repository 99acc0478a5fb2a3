//! Character classes for the keypad alphabet.
//!
//! The buffer only ever holds digits, the decimal point, the four operators
//! (with `x` as the display multiply sign) and parentheses.

use lazy_static::lazy_static;
use regex::Regex;

/// Operators as they appear in buffer text.
pub const OPERATOR_SYMBOLS: &[char] = &['+', '-', '/', 'x'];

lazy_static! {
    /// Matches text made only of keypad characters (empty text included).
    static ref KEYPAD_TEXT: Regex = Regex::new(r"^[0-9.+\-/x()]*$").unwrap();
}

/// Check if a single character may be appended to the buffer.
pub fn is_accepted_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '(' || c == ')' || is_operator_symbol(c)
}

/// Check if a whole string is made of keypad characters.
pub fn is_accepted_text(text: &str) -> bool {
    KEYPAD_TEXT.is_match(text)
}

/// Find the first character that is not part of the keypad alphabet.
///
/// Returns the character together with its char index.
pub fn first_rejected_char(text: &str) -> Option<(usize, char)> {
    if is_accepted_text(text) {
        return None;
    }
    text.chars().enumerate().find(|&(_, c)| !is_accepted_char(c))
}

/// Display operators: `+`, `-`, `/` and `x`.
pub fn is_operator_symbol(c: char) -> bool {
    OPERATOR_SYMBOLS.contains(&c)
}

/// Characters that make up a number literal.
pub fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypad_chars_accepted() {
        for c in "0123456789.+-/x()".chars() {
            assert!(is_accepted_char(c), "{c} should be accepted");
        }
    }

    #[test]
    fn test_foreign_chars_rejected() {
        assert!(!is_accepted_char('*'));
        assert!(!is_accepted_char('X'));
        assert!(!is_accepted_char(' '));
        assert!(!is_accepted_char('e'));
        assert!(!is_accepted_char('^'));
    }

    #[test]
    fn test_accepted_text() {
        assert!(is_accepted_text(""));
        assert!(is_accepted_text("2x(3+4)/-1.5"));
        assert!(!is_accepted_text("2*3"));
        assert!(!is_accepted_text("import os"));
    }

    #[test]
    fn test_first_rejected_char() {
        assert_eq!(first_rejected_char("12+3"), None);
        assert_eq!(first_rejected_char("12 + 3"), Some((2, ' ')));
        assert_eq!(first_rejected_char("1e5"), Some((1, 'e')));
    }
}
