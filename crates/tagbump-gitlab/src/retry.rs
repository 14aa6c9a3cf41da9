//! Retry policy for the commit endpoint.
//!
//! GitLab's commits endpoint intermittently answers with a client-error
//! status that succeeds when the same request is sent again. The policy
//! lists exactly which statuses qualify; it is handed to the caller that
//! submits commits and never applied to other requests.

use std::time::Duration;

use crate::error::Error;

/// Bounded exponential-backoff retry policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each further retry.
    pub backoff_base: Duration,
    /// HTTP statuses that warrant another attempt.
    pub retryable_statuses: Vec<u16>,
}

impl RetryPolicy {
    /// Default number of retries.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Default delay before the first retry.
    pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(2);

    /// Statuses retried by default.
    pub const DEFAULT_RETRYABLE_STATUSES: [u16; 2] = [400, 409];

    /// Total number of attempts, including the first one.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Whether the given error should be retried.
    #[must_use]
    pub fn is_retryable(&self, error: &Error) -> bool {
        match error {
            Error::ApiError { status, .. } => self.retryable_statuses.contains(status),
            _ => false,
        }
    }

    /// Delay to wait after the given failed attempt (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.backoff_base.saturating_mul(2u32.pow(exponent))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            backoff_base: Self::DEFAULT_BACKOFF_BASE,
            retryable_statuses: Self::DEFAULT_RETRYABLE_STATUSES.to_vec(),
        }
    }
}
