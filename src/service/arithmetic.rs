//! Bounded prefix arithmetic.
//!
//! A prefix value at base 100 and length 20 is close to `10^40`, beyond any
//! native integer. Every divisibility check we make is by some `k <= 20`,
//! and each such `k` divides `lcm(1..=20)`, so `value mod k` equals
//! `(value mod lcm(1..=20)) mod k`. Tracking the value modulo that constant
//! keeps it below `2^28` while every decision stays exact.

use crate::domain::{Digit, MAX_LENGTH};

/// `lcm(1, 2, ..., 20)`.
pub const PREFIX_MODULUS: u64 = lcm_up_to(MAX_LENGTH as u64);

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

const fn lcm_up_to(n: u64) -> u64 {
    let mut acc = 1;
    let mut k = 2;
    while k <= n {
        acc = acc / gcd(acc, k) * k;
        k += 1;
    }
    acc
}

/// Running value of a digit prefix, reduced modulo [`PREFIX_MODULUS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PrefixState {
    value: u64,
}

impl PrefixState {
    /// State of the empty prefix (value zero).
    #[must_use]
    pub const fn initial() -> Self {
        Self { value: 0 }
    }

    /// Append one digit: `(value * base + digit) mod PREFIX_MODULUS`.
    #[must_use]
    pub const fn extend(self, digit: Digit, base: u32) -> Self {
        Self {
            value: (self.value * base as u64 + digit as u64) % PREFIX_MODULUS,
        }
    }

    /// Remainder of the full prefix value modulo `k`.
    ///
    /// Exact for `1 <= k <= 20`; other moduli are not meaningful here and are
    /// caught in debug builds.
    #[must_use]
    pub const fn remainder(self, k: usize) -> u64 {
        debug_assert!(k >= 1 && k <= MAX_LENGTH);
        self.value % k as u64
    }
}

/// Exact remainder of a prefix modulo an arbitrary `k`, by Horner's rule.
///
/// Used for prefixes longer than [`MAX_LENGTH`], where the bounded state no
/// longer applies. Costs `O(prefix.len())`.
#[must_use]
pub fn remainder_of(prefix: &[Digit], base: u32, k: u64) -> u64 {
    let base = u64::from(base) % k;
    prefix
        .iter()
        .fold(0, |acc, &d| (acc * base + u64::from(d)) % k)
}
