//! Error types for bulk imports

use crate::core::import::BulkOperationResult;
use thiserror::Error;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, ImportError>;

/// Main error type for bulk imports
#[derive(Error, Debug)]
pub enum ImportError {
    /// 4xx-class response from the remote endpoint
    #[error("Request rejected ({status}): {message}")]
    ClientRequest { status: u16, message: String },

    /// 5xx-class response from the remote endpoint
    #[error("Server error ({status}): {message}")]
    TransientServer { status: u16, message: String },

    /// Connection-level failure, no response received
    #[error("Network error: {0}")]
    Transport(String),

    /// Attempt exceeded its time budget
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Response lacked the success flag or payload
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input could not be used at all
    #[error("Validation error: {0}")]
    Validation(String),

    /// A batch exhausted its retries under the abort policy
    #[error("Import aborted at batch {batch_index}: {source}")]
    Aborted {
        batch_index: usize,
        partial: Box<BulkOperationResult>,
        #[source]
        source: Box<ImportError>,
    },

    /// The run was cancelled before any batch was dispatched
    #[error("Import cancelled")]
    Cancelled,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Error report writer errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
