//! Base-25 throw literals.
//!
//! Siteswap values are written as a single decimal digit, a letter `a`
//! through `o` (10 through 24), or a braced signed decimal such as
//! `{30}`. The alphabet deliberately stops at `o`; `p` through `z` are
//! reserved for future throw modifiers and must not be read as values.

/// Radix implied by the digit + letter alphabet.
pub const BASE: i64 = 25;

/// Value of the highest bare letter, `o`.
pub const LETTER_CEILING: i64 = BASE - 1;

/// Map one alphabet character to its throw value.
///
/// Returns `None` for anything outside `0-9a-o`, including uppercase
/// letters (input is lowercased before it gets here) and the reserved
/// `p..z` range.
pub fn alphabet_value(c: char) -> Option<i64> {
    match c {
        '0'..='9' => Some(c as i64 - '0' as i64),
        'a'..='o' => Some(c as i64 - 'a' as i64 + 10),
        _ => None,
    }
}

/// Render a signed integer in canonical siteswap form: a digit for
/// 0..=9, a letter for 10..=24, a braced decimal for everything else.
pub fn render_integer(n: i64) -> String {
    match n {
        0..=9 => ((b'0' + n as u8) as char).to_string(),
        10..=LETTER_CEILING => ((b'a' + (n - 10) as u8) as char).to_string(),
        _ => format!("{{{}}}", n),
    }
}
