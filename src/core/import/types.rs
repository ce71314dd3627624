//! Bulk import types and data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One raw input row, keyed by header name
pub type RawRow = serde_json::Map<String, serde_json::Value>;

/// Account type accepted by the user service.
///
/// Only the values 1, 2 and 3 exist; they travel as plain integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct UserType(u8);

impl UserType {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for UserType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        UserType::new(value).ok_or_else(|| format!("invalid user type: {}", value))
    }
}

impl From<UserType> for u8 {
    fn from(user_type: UserType) -> Self {
        user_type.0
    }
}

/// One validated row, ready for submission.
///
/// Serializes as the `CreateUserRequest` wire shape.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    pub username: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
    pub is_active: bool,
}

impl ImportRecord {
    /// Identifier the remote endpoint echoes back in `RecordOutcome`
    pub fn identifier(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for ImportRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportRecord")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .field("user_type", &self.user_type)
            .field("is_active", &self.is_active)
            .finish()
    }
}

/// A single field-level problem found during validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// 1-based spreadsheet row (header is row 1); 0 for file-level problems
    pub row: u32,
    pub field: String,
    pub value: serde_json::Value,
    pub message: String,
}

impl ValidationError {
    pub fn new(
        row: u32,
        field: impl Into<String>,
        value: serde_json::Value,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row,
            field: field.into(),
            value,
            message: message.into(),
        }
    }
}

/// Outcome of validating a whole input file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub valid_records: Vec<ImportRecord>,
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
}

/// Identity assigned by the server to a created record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRecord {
    pub id: String,
}

/// Per-record result reported by the remote endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub identifier: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CreatedRecord>,
}

impl RecordOutcome {
    pub fn failed(identifier: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            success: false,
            error: Some(error.into()),
            data: None,
        }
    }
}

/// Counts plus per-record details.
///
/// Used both for one batch's server response and for the combined result of
/// a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOperationResult {
    pub success_count: usize,
    pub failed_count: usize,
    pub total_count: usize,
    #[serde(default)]
    pub details: Vec<RecordOutcome>,
}

/// Alias used where the value describes exactly one submitted batch
pub type BatchOutcome = BulkOperationResult;

impl BulkOperationResult {
    pub fn empty(total_count: usize) -> Self {
        Self {
            total_count,
            ..Self::default()
        }
    }

    /// Synthetic outcome for a batch whose dispatch failed outright
    pub fn all_failed(batch: &[ImportRecord], error: &str) -> Self {
        Self {
            success_count: 0,
            failed_count: batch.len(),
            total_count: batch.len(),
            details: batch
                .iter()
                .map(|record| RecordOutcome::failed(record.identifier(), error))
                .collect(),
        }
    }
}

/// Progress snapshot handed to the observer after each batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportProgress {
    pub total: usize,
    pub processed: usize,
    pub success: usize,
    pub failed: usize,
    pub percentage: u8,
}

impl ImportProgress {
    pub fn new(total: usize, processed: usize, success: usize, failed: usize) -> Self {
        Self {
            total,
            processed,
            success,
            failed,
            percentage: percentage_of(processed, total),
        }
    }
}

/// `round(processed / total * 100)`, clamped to 0..=100
pub fn percentage_of(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let ratio = processed.min(total) as f64 / total as f64;
    (ratio * 100.0).round() as u8
}

/// Request body for the bulk endpoints
#[derive(Debug, Serialize)]
pub struct BulkCreateRequest<'a> {
    pub users: &'a [ImportRecord],
}

/// Response envelope used by the console API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A batch that exhausted its attempts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    /// 0-based batch position
    pub batch_index: usize,
    pub record_count: usize,
    pub error: String,
}

/// Everything known about one finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub result: BulkOperationResult,
    pub batch_failures: Vec<BatchFailure>,
    /// Number of batches dispatched
    pub batches: usize,
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
