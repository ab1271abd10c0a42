//! Enumeration limits.

use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;

use crate::service::DEFAULT_CHECK_INTERVAL;

/// Limits applied to `/generate` requests.
///
/// Large bases and lengths describe searches far too big to finish, so every
/// request runs under a deadline and a result cap. Hitting either one returns
/// what was found so far, flagged as truncated.
#[derive(Debug, Clone, Deserialize)]
pub struct EnumerationConfig {
    /// Wall-clock budget per request, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of sequences returned per request.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Candidate steps between cancellation checks.
    #[serde(default = "default_check_interval")]
    pub check_interval: u64,
}

const fn default_timeout_ms() -> u64 {
    5_000
}

const fn default_max_results() -> usize {
    100_000
}

const fn default_check_interval() -> u64 {
    DEFAULT_CHECK_INTERVAL
}

impl EnumerationConfig {
    /// Request deadline as a duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate the enumeration limits.
    ///
    /// # Errors
    ///
    /// Returns an error if the result cap or check interval is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_results == 0 {
            return Err(ConfigError::Message(
                "enumeration.max_results cannot be 0".to_string(),
            ));
        }
        if self.check_interval == 0 {
            return Err(ConfigError::Message(
                "enumeration.check_interval cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_results: default_max_results(),
            check_interval: default_check_interval(),
        }
    }
}
