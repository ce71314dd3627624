//! Conversions from external error types

use super::types::ImportError;

impl From<reqwest::Error> for ImportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return ImportError::Timeout(error.to_string());
        }
        if error.is_builder() {
            return ImportError::Config(error.to_string());
        }
        match error.status() {
            Some(status) => ImportError::from_status(status.as_u16(), error.to_string()),
            None => ImportError::Transport(error.to_string()),
        }
    }
}
