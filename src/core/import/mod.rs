//! Batched bulk user import
//!
//! This module provides the import pipeline split into its components:
//! - `validator`: raw rows to validated records plus field errors
//! - `splitter`: fixed-size batching
//! - `dispatcher`: remote submission with retry
//! - `progress`: running tally and observer notification
//! - `combiner`: per-batch outcomes to one result
//! - `pipeline`: orchestration
//! - `report`: validation error export

mod combiner;
mod dispatcher;
mod pipeline;
mod progress;
mod report;
mod splitter;
mod types;
mod validator;


// Re-export all public types
pub use combiner::combine;
pub use dispatcher::{BulkUserApi, HttpBulkUserApi, dispatch_batch, unwrap_envelope};
pub use pipeline::{BatchFailurePolicy, BulkImporter, ImportOptions, process_bulk_import};
pub use progress::{ProgressObserver, ProgressTally, report_progress};
pub use report::{REPORT_HEADERS, error_report_csv, write_error_report};
pub use splitter::{batch_count, split};
pub use types::{
    ApiEnvelope, BatchFailure, BatchOutcome, BulkCreateRequest, BulkOperationResult,
    CreatedRecord, ImportProgress, ImportRecord, ImportReport, RawRow, RecordOutcome, UserType,
    ValidationError, ValidationResult, percentage_of,
};
pub use validator::{MIN_PASSWORD_LENGTH, PASSWORD_SYMBOLS, REQUIRED_COLUMNS, RecordValidator};
