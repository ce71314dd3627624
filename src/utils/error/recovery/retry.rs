//! Retry mechanism with exponential backoff

use super::types::{AttemptOutcome, RetryConfig};
use crate::utils::error::Result;
use tracing::{debug, error, warn};

/// Retry mechanism with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Execute a function with retry logic.
    ///
    /// `ClientError` outcomes are returned immediately. `ServerError` outcomes
    /// are retried after `base_delay * multiplier^attempt_index` until
    /// `max_attempts` tries have been made; the last error is returned.
    pub async fn call<F, Fut, T>(&self, mut f: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = AttemptOutcome<T>>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            match f().await {
                AttemptOutcome::Success(value) => {
                    if attempt > 0 {
                        debug!("Retry succeeded on attempt {}", attempt + 1);
                    }
                    return Ok(value);
                }
                AttemptOutcome::ClientError(err) => {
                    warn!("Attempt {} failed with non-retryable error: {}", attempt + 1, err);
                    return Err(err);
                }
                AttemptOutcome::ServerError(err) => {
                    if attempt + 1 >= max_attempts {
                        error!("Retry failed after {} attempts: {}", attempt + 1, err);
                        return Err(err);
                    }

                    let delay = self.config.delay_for(attempt);
                    warn!(
                        "Attempt {} failed: {}, retrying in {:?}",
                        attempt + 1,
                        err,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
