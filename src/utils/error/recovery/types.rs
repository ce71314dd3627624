//! Types and configurations for error recovery

use crate::utils::error::ImportError;
use std::time::Duration;

/// Result of a single attempt, classified for the retry loop
#[derive(Debug)]
pub enum AttemptOutcome<T> {
    /// The attempt produced a usable value
    Success(T),
    /// Non-retryable failure (4xx-class or contract violation)
    ClientError(ImportError),
    /// Retryable failure (5xx-class, transport or timeout)
    ServerError(ImportError),
}

impl<T> AttemptOutcome<T> {
    /// Classify an error by its retryability
    pub fn from_error(error: ImportError) -> Self {
        if error.is_retryable() {
            AttemptOutcome::ServerError(error)
        } else {
            AttemptOutcome::ClientError(error)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Success(_))
    }
}

impl<T> From<crate::utils::error::Result<T>> for AttemptOutcome<T> {
    fn from(result: crate::utils::error::Result<T>) -> Self {
        match result {
            Ok(value) => AttemptOutcome::Success(value),
            Err(error) => AttemptOutcome::from_error(error),
        }
    }
}

/// Retry configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total number of tries, including the first
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Backoff multiplier
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            ..Self::default()
        }
    }

    /// Delay to wait after the failed attempt with the given 0-based index
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(attempt_index as i32);
        let millis = self.base_delay.as_millis() as f64 * factor;
        Duration::from_millis(millis.min(u64::MAX as f64) as u64)
    }
}
