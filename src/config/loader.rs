//! Environment overrides for configuration

use super::Config;
use crate::utils::error::{ImportError, Result};
use std::str::FromStr;
use tracing::debug;

pub const ENV_BASE_URL: &str = "BULK_IMPORT_BASE_URL";
pub const ENV_API_TOKEN: &str = "BULK_IMPORT_API_TOKEN";
pub const ENV_BATCH_SIZE: &str = "BULK_IMPORT_BATCH_SIZE";
pub const ENV_RETRY_ATTEMPTS: &str = "BULK_IMPORT_RETRY_ATTEMPTS";
pub const ENV_RETRY_DELAY_MS: &str = "BULK_IMPORT_RETRY_DELAY_MS";
pub const ENV_TIMEOUT_SECS: &str = "BULK_IMPORT_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "BULK_IMPORT_LOG_LEVEL";

impl Config {
    /// Apply `BULK_IMPORT_*` overrides from a key lookup, usually the
    /// process environment
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.endpoint.base_url = base_url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.endpoint.api_token = Some(token);
        }
        if let Some(value) = lookup(ENV_BATCH_SIZE) {
            self.import.batch_size = parse_var(ENV_BATCH_SIZE, &value)?;
        }
        if let Some(value) = lookup(ENV_RETRY_ATTEMPTS) {
            self.import.retry_attempts = parse_var(ENV_RETRY_ATTEMPTS, &value)?;
        }
        if let Some(value) = lookup(ENV_RETRY_DELAY_MS) {
            self.import.retry_delay_ms = parse_var(ENV_RETRY_DELAY_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            self.import.request_timeout_secs = parse_var(ENV_TIMEOUT_SECS, &value)?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }

        debug!("Environment overrides applied");
        Ok(())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ImportError::Config(format!("Invalid {}: {}", key, e)))
}
