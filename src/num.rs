//! Fast-path decimal number parsing for the decode side.
//!
//! Digit runs of known, bounded width skip the general-purpose parser:
//! 1-9 digits accumulate directly into an `i32`, 10-18 digits split into a
//! 9-digit low part and a high part (`high * 10^9 + low`). Longer runs fall
//! back to the standard parsers, with a character-wise range check deciding
//! whether a run still fits a 64-bit integer at all.
//!
//! The slice entry points assume their input is all ASCII digits; the
//! line-splitting stage classifies digit-or-not before calling them. On
//! unvalidated input their numeric result is undefined (never memory-unsafe),
//! so they must not be called speculatively.

use crate::{Error, Result};

/// Textual form of a double that makes some decimal parsers loop forever.
///
/// Kept as an exact-literal substitution, not a general heuristic.
pub const PATHOLOGICAL_SMALL_DOUBLE: &str = "2.2250738585072012e-308";

const L_BILLION: i64 = 1_000_000_000;

// i64::MIN without its sign, and i64::MAX, as digit strings for the
// character-wise range check.
const MIN_LONG_DIGITS: &[u8] = b"9223372036854775808";
const MAX_LONG_DIGITS: &[u8] = b"9223372036854775807";

fn bad_number(text: &str) -> Error {
    Error::decode(1, 0, format!("not a valid number: {text:?}"))
}

/// Parses a run of 1 to 9 ASCII digits into an `i32`.
///
/// The caller must have validated length and digit-ness; out-of-contract
/// input yields an undefined numeric result.
#[must_use]
pub fn parse_int_digits(digits: &[u8]) -> i32 {
    debug_assert!((1..=9).contains(&digits.len()));
    let mut num = digits[0].wrapping_sub(b'0') as i32;
    for &b in &digits[1..] {
        num = num * 10 + b.wrapping_sub(b'0') as i32;
    }
    num
}

/// Parses a run of 10 to 18 ASCII digits into an `i64`.
///
/// Splits into a high part and a 9-digit low part so both halves stay on
/// the `i32` fast path.
#[must_use]
pub fn parse_long_digits(digits: &[u8]) -> i64 {
    debug_assert!((10..=18).contains(&digits.len()));
    let split = digits.len() - 9;
    let high = parse_int_digits(&digits[..split]) as i64;
    let low = parse_int_digits(&digits[split..]) as i64;
    high * L_BILLION + low
}

/// Parses a string as an `i32`, taking the fast path when it has an
/// optional leading minus followed by 1 to 9 digits.
///
/// Anything longer, signed `+`, or containing a non-digit defers to the
/// standard parser for correctness.
///
/// # Errors
///
/// Returns [`Error::DecodeFormat`] if the text is not an integer in range.
pub fn parse_int(text: &str) -> Result<i32> {
    let bytes = text.as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(_) => (false, bytes),
        None => return Err(bad_number(text)),
    };
    if digits.is_empty() || digits.len() > 9 || !digits.iter().all(u8::is_ascii_digit) {
        return text.parse::<i32>().map_err(|_| bad_number(text));
    }
    let num = parse_int_digits(digits);
    Ok(if negative { -num } else { num })
}

/// Parses a string as an `i64`.
///
/// Short input rides the `i32` fast path; longer input falls back to the
/// standard parser. The long path is not optimized beyond the split used by
/// [`parse_long_digits`]; correctness comes first there.
///
/// # Errors
///
/// Returns [`Error::DecodeFormat`] if the text is not an integer in range.
pub fn parse_long(text: &str) -> Result<i64> {
    if text.len() <= 9 {
        return parse_int(text).map(i64::from);
    }
    text.parse::<i64>().map_err(|_| bad_number(text))
}

/// Whether a digit run (sign already stripped) fits a signed 64-bit integer.
///
/// Compares character-by-character against the textual bound, so the caller
/// can pick an int64 or big-integer representation without parsing anything.
///
/// # Examples
///
/// ```rust
/// use flatcsv::num::in_long_range;
///
/// assert!(in_long_range(b"9223372036854775807", false));
/// assert!(!in_long_range(b"9223372036854775808", false));
/// assert!(in_long_range(b"9223372036854775808", true));
/// assert!(!in_long_range(b"12345678901234567890", false));
/// ```
#[must_use]
pub fn in_long_range(digits: &[u8], negative: bool) -> bool {
    let bound = if negative { MIN_LONG_DIGITS } else { MAX_LONG_DIGITS };
    match digits.len().cmp(&bound.len()) {
        std::cmp::Ordering::Less => true,
        std::cmp::Ordering::Greater => false,
        std::cmp::Ordering::Equal => digits <= bound,
    }
}

/// Parses a string as an `f64`.
///
/// The one known parser-hanging literal is substituted with the smallest
/// positive double before the standard parser sees it.
///
/// # Errors
///
/// Returns [`Error::DecodeFormat`] if the text is not a floating-point
/// number.
pub fn parse_double(text: &str) -> Result<f64> {
    if text == PATHOLOGICAL_SMALL_DOUBLE {
        return Ok(f64::from_bits(1));
    }
    text.parse::<f64>().map_err(|_| bad_number(text))
}
