//! Text codec for digit sequences.
//!
//! Bases up to 36 use one alphanumeric character per digit (`0-9`, then
//! `a-z`, case-insensitive on input). Larger bases use comma-separated
//! decimal tokens such as `5,12,99`.

use crate::domain::{ALPHANUMERIC_MAX_BASE, Digit, DigitSequence};
use crate::error::ParseError;

/// Parse text into a digit sequence for the given base.
///
/// The base is assumed to be within the supported range.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the first offending character or token.
/// No partial sequence is ever returned.
pub fn parse(text: &str, base: u32) -> Result<DigitSequence, ParseError> {
    if base > ALPHANUMERIC_MAX_BASE {
        parse_tokens(text, base)
    } else {
        parse_alphanumeric(text, base)
    }
}

fn parse_alphanumeric(text: &str, base: u32) -> Result<DigitSequence, ParseError> {
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    text.chars()
        .map(|character| {
            let value = character
                .to_digit(ALPHANUMERIC_MAX_BASE)
                .ok_or(ParseError::InvalidCharacter { character, base })?;
            if value >= base {
                return Err(ParseError::DigitTooLarge {
                    character,
                    value,
                    base,
                });
            }
            Ok(to_digit(value))
        })
        .collect()
}

fn parse_tokens(text: &str, base: u32) -> Result<DigitSequence, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    text.split(',')
        .map(str::trim)
        .map(|token| match token.parse::<u32>() {
            Ok(value) if value < base => Ok(to_digit(value)),
            _ => Err(ParseError::InvalidToken {
                token: token.to_string(),
                base,
            }),
        })
        .collect()
}

/// Format a digit sequence as text for the given base.
///
/// This is the inverse of [`parse`]: letters come out lowercase and tokens
/// are joined by bare commas.
#[must_use]
pub fn format(digits: &[Digit], base: u32) -> String {
    if base > ALPHANUMERIC_MAX_BASE {
        digits
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    } else {
        digits
            .iter()
            .filter_map(|&d| char::from_digit(u32::from(d), ALPHANUMERIC_MAX_BASE))
            .collect()
    }
}

/// Convert a non-negative integer to its digits in the given base.
///
/// Zero is the single digit `[0]`.
#[must_use]
pub fn to_digits(mut value: u128, base: u32) -> DigitSequence {
    if value == 0 {
        return vec![0];
    }

    let base = u128::from(base);
    let mut digits = Vec::new();
    while value > 0 {
        #[allow(clippy::cast_possible_truncation)]
        digits.push((value % base) as Digit);
        value /= base;
    }
    digits.reverse();
    digits
}

/// Positional value of a digit sequence.
///
/// Returns `None` when the value does not fit in a `u128`. The empty sequence
/// is zero.
#[must_use]
pub fn from_digits(digits: &[Digit], base: u32) -> Option<u128> {
    digits.iter().try_fold(0u128, |acc, &d| {
        acc.checked_mul(u128::from(base))?
            .checked_add(u128::from(d))
    })
}

#[allow(clippy::cast_possible_truncation)]
const fn to_digit(value: u32) -> Digit {
    // Callers have already checked value < base <= 100.
    value as Digit
}
