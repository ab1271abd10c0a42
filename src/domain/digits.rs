//! Digit, base, and sequence bounds.

/// A single digit. Always less than the base it belongs to.
pub type Digit = u8;

/// Ordered digits, most significant first.
pub type DigitSequence = Vec<Digit>;

/// Smallest supported base.
pub const MIN_BASE: u32 = 2;

/// Largest supported base.
pub const MAX_BASE: u32 = 100;

/// Largest base whose digits are written as single alphanumeric characters.
///
/// Above this, digits are written as comma-separated decimal tokens.
pub const ALPHANUMERIC_MAX_BASE: u32 = 36;

/// Smallest enumeration length.
pub const MIN_LENGTH: usize = 1;

/// Largest enumeration length.
pub const MAX_LENGTH: usize = 20;

/// Check whether a base is within the supported range.
#[must_use]
pub const fn is_supported_base(base: u32) -> bool {
    base >= MIN_BASE && base <= MAX_BASE
}

/// Check whether an enumeration length is within the supported range.
#[must_use]
pub const fn is_supported_length(length: usize) -> bool {
    length >= MIN_LENGTH && length <= MAX_LENGTH
}
