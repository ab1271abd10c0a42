//! Cooperative cancellation for long-running enumerations.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Cancellation signal consulted by an enumeration.
///
/// Either an external stop flag, a deadline, or both. The default never
/// cancels.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    flag: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// A signal that never fires.
    #[must_use]
    pub const fn never() -> Self {
        Self {
            flag: None,
            deadline: None,
        }
    }

    /// Cancel once `timeout` has elapsed from now.
    #[must_use]
    pub fn after(timeout: Duration) -> Self {
        Self::never().with_deadline(Instant::now() + timeout)
    }

    /// Cancel at the given instant.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Cancel when the shared flag is set to `true`.
    #[must_use]
    pub fn with_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.flag = Some(flag);
        self
    }

    /// Whether the signal has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        if self
            .flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return true;
        }
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }
}
