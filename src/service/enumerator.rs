//! Enumeration of polydivisible sequences.
//!
//! Depth-first backtracking over digit positions, driven by an explicit frame
//! stack instead of native recursion. A frame holds the prefix state of the
//! digits committed above it and the next candidate digit to try. Sequences
//! are yielded in pre-order: every sequence comes before its extensions, and
//! siblings come in ascending digit order.

use crate::domain::{Digit, DigitSequence, MAX_LENGTH};
use crate::service::arithmetic::PrefixState;
use crate::service::cancel::Cancellation;

/// Default number of candidate steps between cancellation checks.
pub const DEFAULT_CHECK_INTERVAL: u64 = 4096;

/// All polydivisible sequences of a base, up to a maximum length.
///
/// This is a description of the search, not its result: each call to
/// [`Enumeration::iter`] starts a fresh, independent traversal.
#[derive(Debug, Clone)]
pub struct Enumeration {
    base: u32,
    max_length: usize,
    cancel: Cancellation,
    check_interval: u64,
}

/// Enumerate polydivisible sequences of `base` with lengths `1..=max_length`.
///
/// The base is assumed to be within the supported range. Lengths above
/// [`MAX_LENGTH`] are clamped to it.
#[must_use]
pub fn generate(base: u32, max_length: usize) -> Enumeration {
    Enumeration::new(base, max_length)
}

impl Enumeration {
    /// Create a new enumeration without cancellation.
    #[must_use]
    pub const fn new(base: u32, max_length: usize) -> Self {
        Self {
            base,
            max_length: if max_length > MAX_LENGTH {
                MAX_LENGTH
            } else {
                max_length
            },
            cancel: Cancellation::never(),
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }

    /// Attach a cancellation signal.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: Cancellation) -> Self {
        self.cancel = cancel;
        self
    }

    /// Set how many candidate steps pass between cancellation checks.
    ///
    /// Zero is treated as one.
    #[must_use]
    pub fn with_check_interval(mut self, interval: u64) -> Self {
        self.check_interval = interval.max(1);
        self
    }

    /// Base being enumerated.
    #[must_use]
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Maximum sequence length.
    #[must_use]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    /// Start a new traversal.
    #[must_use]
    pub fn iter(&self) -> EnumerationIter {
        let mut frames = Vec::with_capacity(self.max_length);
        if self.max_length > 0 {
            frames.push(Frame {
                state: PrefixState::initial(),
                next: 1,
            });
        }

        EnumerationIter {
            base: self.base,
            max_length: self.max_length,
            digits: Vec::with_capacity(self.max_length),
            frames,
            steps: 0,
            cancel: self.cancel.clone(),
            check_interval: self.check_interval,
            interrupted: false,
        }
    }
}

impl IntoIterator for &Enumeration {
    type Item = DigitSequence;
    type IntoIter = EnumerationIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One search level: the state of the committed prefix and the next
/// candidate digit for the following position.
#[derive(Debug, Clone, Copy)]
struct Frame {
    state: PrefixState,
    next: u32,
}

/// Iterator over one traversal of an [`Enumeration`].
///
/// Owns its digit buffer and frame stack; nothing is shared with other
/// traversals.
#[derive(Debug)]
pub struct EnumerationIter {
    base: u32,
    max_length: usize,
    /// Committed digits. Always one shorter than `frames`.
    digits: Vec<Digit>,
    frames: Vec<Frame>,
    steps: u64,
    cancel: Cancellation,
    check_interval: u64,
    interrupted: bool,
}

impl EnumerationIter {
    /// Whether the traversal stopped early because it was cancelled.
    #[must_use]
    pub const fn interrupted(&self) -> bool {
        self.interrupted
    }

    /// Number of candidate digits tried so far.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    fn should_stop(&mut self) -> bool {
        if self.steps % self.check_interval == 0 && self.cancel.is_cancelled() {
            self.interrupted = true;
            self.frames.clear();
            self.digits.clear();
        }
        self.interrupted
    }
}

impl Iterator for EnumerationIter {
    type Item = DigitSequence;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.should_stop() {
                return None;
            }

            let depth = self.frames.len().checked_sub(1)?;
            let frame = &mut self.frames[depth];

            if frame.next >= self.base {
                // Level exhausted: drop the frame and the digit that led here.
                self.frames.pop();
                self.digits.pop();
                continue;
            }

            #[allow(clippy::cast_possible_truncation)]
            let candidate = frame.next as Digit;
            frame.next += 1;
            self.steps += 1;

            let state = frame.state.extend(candidate, self.base);
            let length = depth + 1;
            if state.remainder(length) != 0 {
                continue;
            }

            self.digits.push(candidate);
            let found = self.digits.clone();
            if length < self.max_length {
                self.frames.push(Frame { state, next: 0 });
            } else {
                self.digits.pop();
            }
            return Some(found);
        }
    }
}

impl std::iter::FusedIterator for EnumerationIter {}
