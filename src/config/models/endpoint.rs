//! Remote endpoint configuration

use super::*;
use crate::utils::logging::mask_secret;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the bulk user endpoints live
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the console API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the bulk-create endpoint
    #[serde(default = "default_bulk_create_path")]
    pub bulk_create_path: String,
    /// Path of the validate-only endpoint
    #[serde(default = "default_validate_path")]
    pub validate_path: String,
    /// Bearer token sent with every request
    #[serde(default)]
    pub api_token: Option<String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bulk_create_path: default_bulk_create_path(),
            validate_path: default_validate_path(),
            api_token: None,
        }
    }
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("base_url", &self.base_url)
            .field("bulk_create_path", &self.bulk_create_path)
            .field("validate_path", &self.validate_path)
            .field("api_token", &self.api_token.as_deref().map(mask_secret))
            .finish()
    }
}

impl EndpointConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Join the base URL and an endpoint path
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn bulk_create_url(&self) -> String {
        self.url_for(&self.bulk_create_path)
    }

    pub fn validate_url(&self) -> String {
        self.url_for(&self.validate_path)
    }
}
