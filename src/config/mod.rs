//! Configuration management
//!
//! This module handles loading, validation, and management of the importer
//! configuration. Values come from a YAML file, then environment overrides.

pub mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub import: ImportSettings,
    #[serde(default)]
    pub validation: ValidationSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and validate configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read_file(path.as_ref()).await?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// File (when given) first, then environment overrides
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |_| {}).await
    }

    /// File, environment, then caller overrides; validated once at the end
    /// so a later layer can correct an earlier one.
    pub async fn load_with<F>(path: Option<&Path>, overrides: F) -> Result<Self>
    where
        F: FnOnce(&mut Config),
    {
        Self::load_layered(path, |key| std::env::var(key).ok(), overrides).await
    }

    async fn load_layered<L, F>(path: Option<&Path>, lookup: L, overrides: F) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
        F: FnOnce(&mut Config),
    {
        let mut config = match path {
            Some(path) => Self::read_file(path).await?,
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    async fn read_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ImportError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");
        Validate::validate(self).map_err(ImportError::Config)
    }
}
