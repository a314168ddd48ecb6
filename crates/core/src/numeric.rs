//! Lenient integer parsing for numbers stored as text.
//!
//! Identifiers and happiness levels are persisted as strings and parsed at every
//! comparison. Parsing takes the leading integer prefix: leading whitespace is
//! skipped, one optional sign is accepted, then decimal digits are consumed until
//! the first non-digit. Text without a digit in that position is not a number.

/// Parse the leading integer prefix of `s`.
///
/// Returns `None` for not-a-number. Values beyond the `i64` range saturate.
///
/// ```
/// use roster_core::parse_int_prefix;
///
/// assert_eq!(parse_int_prefix("50"), Some(50));
/// assert_eq!(parse_int_prefix("  42abc"), Some(42));
/// assert_eq!(parse_int_prefix("7.9"), Some(7));
/// assert_eq!(parse_int_prefix("-3"), Some(-3));
/// assert_eq!(parse_int_prefix("abc"), None);
/// assert_eq!(parse_int_prefix(""), None);
/// ```
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}
