//! Brazilian postal code (CEP) normalization.

use crate::config::CEP_DIGITS;

/// Strip punctuation and return the 8 digits, or `None` when the code does
/// not have exactly 8 digits.
pub fn normalize(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    (digits.len() == CEP_DIGITS).then_some(digits)
}

/// Render a CEP as `00000-000`.
pub fn format(raw: &str) -> Option<String> {
    normalize(raw).map(|digits| format!("{}-{}", &digits[..5], &digits[5..]))
}
