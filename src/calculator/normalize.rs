//! Rewrites keypad text into plain infix arithmetic.
//!
//! Keypad input is forgiving: it may end in a dangling operator, omit the
//! multiplication sign before a parenthesis, or leave braces unbalanced.
//! [`normalize`] repairs all of these so the parser only sees well-formed
//! input (or input that is wrong for a real reason).

use tracing::debug;

/// Operators that leave an expression dangling when they come last.
const DANGLING: &[char] = &['+', '-', '*', '/', '('];

/// Normalize raw buffer text for evaluation.
///
/// Steps, in order:
/// 1. `x` becomes `*`
/// 2. a trailing operator or `(` is completed with `last_number_entered`
/// 3. `*` is inserted between a digit and a following `(`
/// 4. braces are balanced, closing on the right or opening on the left
pub fn normalize(raw: &str, last_number_entered: &str) -> String {
    let mut expression = raw.replace('x', "*");

    if expression.ends_with(DANGLING) {
        expression.push_str(last_number_entered);
    }

    let expression = insert_implicit_multiplication(&expression);
    let expression = balance_braces(expression);

    debug!(raw, normalized = %expression, "normalized expression");
    expression
}

/// Insert `*` wherever a digit is directly followed by `(`.
fn insert_implicit_multiplication(expression: &str) -> String {
    let mut result = String::with_capacity(expression.len() + 4);
    let mut previous: Option<char> = None;

    for c in expression.chars() {
        if c == '('
            && let Some(prev) = previous
            && prev.is_ascii_digit()
        {
            result.push('*');
        }
        result.push(c);
        previous = Some(c);
    }

    result
}

/// Pad the expression so open and close braces match in number.
fn balance_braces(expression: String) -> String {
    let opens = expression.chars().filter(|&c| c == '(').count();
    let closes = expression.chars().filter(|&c| c == ')').count();

    if opens > closes {
        let mut balanced = expression;
        balanced.push_str(&")".repeat(opens - closes));
        balanced
    } else if closes > opens {
        let mut balanced = "(".repeat(closes - opens);
        balanced.push_str(&expression);
        balanced
    } else {
        expression
    }
}
