//! # bulk-import
//!
//! Batched bulk user import for a management console API.
//!
//! ## Features
//!
//! - **Validation**: Row-level checks with precise field errors before any network call
//! - **Batching**: Fixed-size batches submitted sequentially with a pause between them
//! - **Retry**: Exponential backoff for server and transport failures, none for client errors
//! - **Progress**: Monotone progress snapshots after every batch
//! - **Partial failure**: A failed batch marks its records failed and the run carries on
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bulk_import::{Config, HttpBulkUserApi, ImportOptions, RecordValidator, process_bulk_import};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/import.yaml").await?;
//!     let rows: Vec<bulk_import::RawRow> = serde_json::from_str(&std::fs::read_to_string("users.json")?)?;
//!
//!     let validation = RecordValidator::new(&config.validation).validate(&rows);
//!     let api = Arc::new(HttpBulkUserApi::new(
//!         config.endpoint.clone(),
//!         config.import.request_timeout(),
//!     )?);
//!     let options = ImportOptions::from_settings(&config.import)
//!         .with_progress(|p| println!("{}%", p.percentage));
//!
//!     let result = process_bulk_import(api, &validation.valid_records, options).await?;
//!     println!("{} created, {} failed", result.success_count, result.failed_count);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use crate::core::import::*;
pub use utils::error::{ImportError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build metadata
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Unix time of the build
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
        }
    }
}

/// Version, build time and commit of the running binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
