//! Polydivisibility check.

use crate::domain::{Digit, MAX_LENGTH};
use crate::service::arithmetic::{PrefixState, remainder_of};

/// Check whether every prefix of length `k` is divisible by `k`.
///
/// The empty sequence is never polydivisible. Any single digit is, including
/// a lone `0`. Stops at the first failing prefix.
#[must_use]
pub fn is_polydivisible(digits: &[Digit], base: u32) -> bool {
    if digits.is_empty() {
        return false;
    }

    // Leading zeros add nothing to a prefix value; skipping them keeps long
    // runs of zeros linear in the slow path.
    let significant = digits.iter().position(|&d| d != 0).unwrap_or(digits.len());

    let mut state = PrefixState::initial();
    for (i, &digit) in digits.iter().enumerate() {
        let k = i + 1;
        let divisible = if k <= MAX_LENGTH {
            state = state.extend(digit, base);
            state.remainder(k) == 0
        } else if k <= significant {
            true
        } else {
            remainder_of(&digits[significant..k], base, k as u64) == 0
        };
        if !divisible {
            return false;
        }
    }

    true
}
