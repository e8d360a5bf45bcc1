//! CPF (Brazilian national ID) check-digit validation and formatting.

const CPF_DIGITS: usize = 11;

fn digits(raw: &str) -> Vec<u32> {
    raw.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Check digit over the first `len` digits, weights descending from `len + 1`.
fn check_digit(digits: &[u32], len: usize) -> u32 {
    let sum: u32 = digits[..len]
        .iter()
        .zip((2..=len as u32 + 1).rev())
        .map(|(d, w)| d * w)
        .sum();
    match (sum * 10) % 11 {
        10 => 0,
        r => r,
    }
}

/// True when `raw` holds 11 digits (punctuation ignored) with valid check digits.
/// Sequences of one repeated digit are rejected.
pub fn is_valid(raw: &str) -> bool {
    if raw.chars().any(|c| !(c.is_ascii_digit() || c == '.' || c == '-' || c == ' ')) {
        return false;
    }
    let d = digits(raw);
    if d.len() != CPF_DIGITS || d.iter().all(|x| *x == d[0]) {
        return false;
    }
    check_digit(&d, 9) == d[9] && check_digit(&d, 10) == d[10]
}

/// Render a valid CPF as `000.000.000-00`.
pub fn format(raw: &str) -> Option<String> {
    if !is_valid(raw) {
        return None;
    }
    let s: String = digits(raw).iter().map(|d| char::from_digit(*d, 10).unwrap_or('0')).collect();
    Some(format!("{}.{}.{}-{}", &s[..3], &s[3..6], &s[6..9], &s[9..]))
}
