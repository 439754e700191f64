use std::fmt;

use serde_json::Value;

use crate::InputError;

/// Digit separator accepted between two digits, e.g. `4_000`
pub const DIGIT_SEPARATOR: char = '_';

/// An integer of any size, kept as its canonical decimal text: no `+`, no
/// separators, no leading zeros and never `-0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integer(String);

impl Integer {
    pub fn is_even(&self) -> bool {
        matches!(
            self.0.as_bytes().last(),
            Some(b'0' | b'2' | b'4' | b'6' | b'8')
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_parts(negative: bool, digits: &str) -> Self {
        let magnitude = digits.trim_start_matches('0');
        if magnitude.is_empty() {
            Integer("0".to_string())
        } else if negative {
            Integer(format!("-{}", magnitude))
        } else {
            Integer(magnitude.to_string())
        }
    }
}

impl From<i64> for Integer {
    fn from(n: i64) -> Self {
        Integer(n.to_string())
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses a decimal integer literal of any length.
///
/// Surrounding whitespace is ignored and a single leading `+` or `-` is allowed.
/// Underscores may separate digits but never lead, trail or repeat.
pub fn parse_int(text: &str) -> Result<Integer, InputError> {
    let not_an_integer = || InputError::NotAnInteger(text.to_string());

    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let mut digits = String::with_capacity(body.len());
    let mut previous: Option<char> = None;
    for ch in body.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            DIGIT_SEPARATOR if matches!(previous, Some('0'..='9')) => {}
            _ => return Err(not_an_integer()),
        }
        previous = Some(ch);
    }
    // empty body or a dangling separator
    if !matches!(previous, Some('0'..='9')) {
        return Err(not_an_integer());
    }

    Ok(Integer::from_parts(negative, &digits))
}

/// Accepts only JSON integers, whatever their size. Floats and strings are
/// rejected even when they look numeric.
///
/// Booleans are rejected on purpose: `true` is not a count.
pub fn int_from_json(value: &Value) -> Result<Integer, InputError> {
    let number = match value {
        Value::Number(number) => number,
        other => return Err(InputError::PayloadNotInteger(other.to_string())),
    };

    // the literal text as written in the payload
    let literal = number.to_string();
    let (negative, digits) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal.as_str()),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::PayloadNotInteger(literal));
    }

    Ok(Integer::from_parts(negative, digits))
}
