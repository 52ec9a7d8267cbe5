//! Order keys: sortable strings that define paint order.
//!
//! A key is a non-empty string of base-62 digits (`0-9A-Za-z`, which is also
//! their ASCII order) read as the fraction `0.d1d2d3…`. Plain string
//! comparison therefore matches numeric order, and between any two distinct
//! keys there is always room for another one, so inserting never renumbers
//! siblings. Keys never end in `0`, which keeps every fraction representable
//! by exactly one string.

#[cfg(test)]
#[path = "order_test.rs"]
mod order_test;

/// Digit alphabet in ascending order.
const DIGITS: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const BASE: usize = 62;
const ZERO: u8 = b'0';
const MAX_DIGIT: u8 = b'z';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("order key is empty")]
    Empty,
    #[error("order key {key:?} contains invalid digit {digit:?}")]
    InvalidDigit { key: String, digit: char },
    #[error("order key {0:?} ends with a zero digit")]
    TrailingZero(String),
    #[error("order keys out of order: {lower:?} >= {upper:?}")]
    OutOfOrder { lower: String, upper: String },
}

/// Check that `key` is a well-formed order key.
///
/// # Errors
///
/// Returns the first structural problem found.
pub fn validate_key(key: &str) -> Result<(), IndexError> {
    let Some(&last) = key.as_bytes().last() else {
        return Err(IndexError::Empty);
    };
    if let Some(c) = key.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(IndexError::InvalidDigit { key: key.to_string(), digit: c });
    }
    if last == ZERO {
        return Err(IndexError::TrailingZero(key.to_string()));
    }
    Ok(())
}

/// Generate a key strictly between `lower` and `upper`. `None` is an open bound.
///
/// # Errors
///
/// Returns an error if either key is malformed or `lower >= upper`.
pub fn key_between(lower: Option<&str>, upper: Option<&str>) -> Result<String, IndexError> {
    if let Some(a) = lower {
        validate_key(a)?;
    }
    if let Some(b) = upper {
        validate_key(b)?;
    }
    match (lower, upper) {
        (Some(a), Some(b)) if a >= b => Err(IndexError::OutOfOrder { lower: a.to_string(), upper: b.to_string() }),
        (None, None) => Ok(first_key()),
        (Some(a), None) => Ok(increment(a)),
        (a, Some(b)) => Ok(midpoint(a.unwrap_or(""), Some(b))),
    }
}

/// Key for the first item in an empty list.
#[must_use]
pub fn first_key() -> String {
    midpoint("", None)
}

/// Key that sorts after `key`, kept as short as possible.
///
/// # Errors
///
/// Returns an error if `key` is malformed.
pub fn key_after(key: &str) -> Result<String, IndexError> {
    key_between(Some(key), None)
}

/// Key that sorts before `key`.
///
/// # Errors
///
/// Returns an error if `key` is malformed.
pub fn key_before(key: &str) -> Result<String, IndexError> {
    key_between(None, Some(key))
}

fn digit_value(c: u8) -> usize {
    DIGITS.iter().position(|&d| d == c).unwrap_or(0)
}

/// Bump the first non-maximal digit; append a middle digit when every digit is maximal.
fn increment(key: &str) -> String {
    let bytes = key.as_bytes();
    match bytes.iter().position(|&c| c != MAX_DIGIT) {
        Some(i) => {
            let mut out = String::with_capacity(i + 1);
            out.push_str(&key[..i]);
            out.push(char::from(DIGITS[digit_value(bytes[i]) + 1]));
            out
        }
        None => {
            let mut out = key.to_string();
            out.push(char::from(DIGITS[BASE / 2]));
            out
        }
    }
}

/// Midpoint of two validated keys where `lower < upper`. `lower` may be empty (0);
/// `upper = None` stands for 1.
fn midpoint(lower: &str, upper: Option<&str>) -> String {
    let mut out = String::new();
    let mut a = lower;
    let mut b = upper;
    loop {
        if let Some(bb) = b {
            let (ab, bbytes) = (a.as_bytes(), bb.as_bytes());
            let mut n = 0;
            while n < bbytes.len() && ab.get(n).copied().unwrap_or(ZERO) == bbytes[n] {
                n += 1;
            }
            out.push_str(&bb[..n]);
            a = &a[n.min(a.len())..];
            b = Some(&bb[n..]);
        }

        let da = a.as_bytes().first().map_or(0, |&c| digit_value(c));
        let db = b.and_then(|bb| bb.as_bytes().first()).map_or(BASE, |&c| digit_value(c));

        if db > da + 1 {
            out.push(char::from(DIGITS[(da + db).div_ceil(2)]));
            return out;
        }
        if let Some(bb) = b.filter(|bb| bb.len() > 1) {
            out.push_str(&bb[..1]);
            return out;
        }
        out.push(char::from(DIGITS[da]));
        a = if a.is_empty() { a } else { &a[1..] };
        b = None;
    }
}
