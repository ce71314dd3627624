//! Import pipeline settings

use super::*;
use crate::core::import::BatchFailurePolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Batching, retry and pacing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSettings {
    /// Records per request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Total tries per batch
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Base backoff delay in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Pause between batches in milliseconds
    #[serde(default = "default_inter_batch_delay_ms")]
    pub inter_batch_delay_ms: u64,
    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub on_batch_failure: BatchFailurePolicy,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            inter_batch_delay_ms: default_inter_batch_delay_ms(),
            request_timeout_secs: default_timeout(),
            on_batch_failure: BatchFailurePolicy::default(),
        }
    }
}

impl ImportSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
