//! Configuration section validators

use super::trait_def::Validate;
use crate::config::Config;
use crate::config::models::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating import configuration");

        self.endpoint.validate()?;
        self.import.validate()?;
        self.validation.validate()?;
        self.logging.validate()?;

        debug!("Import configuration validation completed");
        Ok(())
    }
}

impl Validate for EndpointConfig {
    fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid base URL '{}': {}", self.base_url, e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if self.bulk_create_path.trim().is_empty() {
            return Err("Bulk create path cannot be empty".to_string());
        }

        if self.validate_path.trim().is_empty() {
            return Err("Validate path cannot be empty".to_string());
        }

        if let Some(token) = &self.api_token {
            if token.trim().is_empty() {
                return Err("API token cannot be blank when set".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for ImportSettings {
    fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("Batch size must be greater than 0".to_string());
        }

        if self.retry_attempts == 0 {
            return Err("Retry attempts must be at least 1".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for ValidationSettings {
    fn validate(&self) -> Result<(), String> {
        if self.max_rows == 0 {
            return Err("Max rows must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        // Full filter directives are accepted, as in `init_logging`
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| format!("Invalid log level '{}': {}", self.level, e))
    }
}
