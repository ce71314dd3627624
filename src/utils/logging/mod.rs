//! Logging utilities
//!
//! Installs the global `tracing` subscriber and masks secrets before they
//! reach log output.

pub mod sanitization;

pub use sanitization::mask_secret;

use crate::config::{LogFormat, LoggingConfig};
use crate::utils::error::{ImportError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` wins over the configured level when it is set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ImportError::Config(format!("Invalid log filter: {}", e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    installed.map_err(|e| ImportError::Config(format!("Failed to install logger: {}", e)))
}
