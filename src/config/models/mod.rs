//! Configuration data models
//!
//! This module defines all configuration structures used throughout the crate.

pub mod endpoint;
pub mod import;
pub mod logging;
pub mod rules;

// Re-export all configuration types
pub use endpoint::*;
pub use import::*;
pub use logging::*;
pub use rules::*;

/// Default console API base URL
pub fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

pub fn default_bulk_create_path() -> String {
    "/api/admin/users/bulk-import".to_string()
}

pub fn default_validate_path() -> String {
    "/api/admin/users/bulk-validate".to_string()
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

pub fn default_batch_size() -> usize {
    50
}

/// Default maximum retry attempts
pub fn default_retry_attempts() -> u32 {
    3
}

pub fn default_retry_delay_ms() -> u64 {
    1000
}

pub fn default_inter_batch_delay_ms() -> u64 {
    500
}

pub fn default_max_rows() -> usize {
    1000
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
