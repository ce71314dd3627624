//! Record validation for raw import rows
//!
//! Turns row objects keyed by header name into [`ImportRecord`]s, collecting
//! every field-level problem as a [`ValidationError`] instead of failing.

use super::types::{ImportRecord, RawRow, UserType, ValidationError, ValidationResult};
use crate::config::ValidationSettings;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Columns every input file must provide
pub const REQUIRED_COLUMNS: [&str; 4] = ["username", "email", "password", "userType"];

/// Symbols that satisfy the password's special-character rule
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?`~";

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

const MASKED_VALUE: &str = "********";

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("Invalid username regex"));
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Validates raw rows against the user import rules
#[derive(Debug, Clone)]
pub struct RecordValidator {
    max_rows: usize,
    reject_duplicates: bool,
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new(&ValidationSettings::default())
    }
}

impl RecordValidator {
    pub fn new(settings: &ValidationSettings) -> Self {
        Self {
            max_rows: settings.max_rows,
            reject_duplicates: settings.reject_duplicates,
        }
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn with_duplicate_rejection(mut self, reject: bool) -> Self {
        self.reject_duplicates = reject;
        self
    }

    /// Validate every row.
    ///
    /// File-level problems (too many rows, no rows, missing columns) are
    /// reported at row 0 and do not stop the per-row checks.
    pub fn validate(&self, rows: &[RawRow]) -> ValidationResult {
        let mut errors = Vec::new();
        let mut valid_records = Vec::new();
        let mut invalid_rows = 0;

        if rows.is_empty() {
            errors.push(ValidationError::new(
                0,
                "file",
                Value::Null,
                "File contains no data rows",
            ));
        }

        if rows.len() > self.max_rows {
            errors.push(ValidationError::new(
                0,
                "file",
                Value::from(rows.len()),
                format!(
                    "File contains {} rows, the maximum is {}",
                    rows.len(),
                    self.max_rows
                ),
            ));
        }

        if let Some(header) = rows.first() {
            for column in REQUIRED_COLUMNS {
                if !header.contains_key(column) {
                    errors.push(ValidationError::new(
                        0,
                        column,
                        Value::Null,
                        format!("Missing required column: {}", column),
                    ));
                }
            }
        }

        let mut seen = SeenIdentities::default();
        for (index, row) in rows.iter().enumerate() {
            let row_number = (index + 2) as u32;
            let mut row_errors = Vec::new();
            let record = validate_row(row, row_number, &mut row_errors);

            if let Some(record) = &record {
                if self.reject_duplicates {
                    seen.check(record, row_number, &mut row_errors);
                }
            }

            match record {
                Some(record) if row_errors.is_empty() => valid_records.push(record),
                _ => {
                    invalid_rows += 1;
                    errors.append(&mut row_errors);
                }
            }
        }

        debug!(
            total = rows.len(),
            valid = valid_records.len(),
            errors = errors.len(),
            "Validated import rows"
        );

        ValidationResult {
            valid: errors.is_empty(),
            total_rows: rows.len(),
            valid_rows: valid_records.len(),
            invalid_rows,
            errors,
            valid_records,
        }
    }
}

/// Apply the field rules to one row; `None` when any rule failed
fn validate_row(row: &RawRow, row_number: u32, errors: &mut Vec<ValidationError>) -> Option<ImportRecord> {
    let before = errors.len();

    let username = required(row, row_number, "username", "Username", errors).filter(|username| {
        let ok = USERNAME_PATTERN.is_match(username);
        if !ok {
            errors.push(field_error(
                row,
                row_number,
                "username",
                "Username may only contain letters, numbers and underscores",
            ));
        }
        ok
    });

    let email = required(row, row_number, "email", "Email", errors).filter(|email| {
        let ok = EMAIL_PATTERN.is_match(email);
        if !ok {
            errors.push(field_error(row, row_number, "email", "Email address is not valid"));
        }
        ok
    });

    let password = required(row, row_number, "password", "Password", errors).filter(|password| {
        match password_problem(password) {
            Some(message) => {
                errors.push(field_error(row, row_number, "password", message));
                false
            }
            None => true,
        }
    });

    let user_type = required(row, row_number, "userType", "User type", errors).and_then(|text| {
        let parsed = text.parse::<u8>().ok().and_then(UserType::new);
        if parsed.is_none() {
            errors.push(field_error(
                row,
                row_number,
                "userType",
                "User type must be 1, 2 or 3",
            ));
        }
        parsed
    });

    let is_active = match cell_text(row.get("isActive")) {
        None => Some(true),
        Some(text) => {
            let parsed = parse_flag(&text);
            if parsed.is_none() {
                errors.push(field_error(
                    row,
                    row_number,
                    "isActive",
                    "isActive must be one of true, false, 1, 0",
                ));
            }
            parsed
        }
    };

    if errors.len() > before {
        return None;
    }

    Some(ImportRecord {
        username: username?,
        email: email?,
        password: password?,
        user_type: user_type?,
        is_active: is_active?,
    })
}

/// Trimmed, non-blank text of a required field, or an error
fn required(
    row: &RawRow,
    row_number: u32,
    field: &str,
    label: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    let text = cell_text(row.get(field));
    if text.is_none() {
        errors.push(field_error(row, row_number, field, format!("{} is required", label)));
    }
    text
}

fn field_error(row: &RawRow, row_number: u32, field: &str, message: impl Into<String>) -> ValidationError {
    let value = match row.get(field) {
        None | Some(Value::Null) => Value::Null,
        Some(_) if field == "password" => Value::String(MASKED_VALUE.to_string()),
        Some(value) => value.clone(),
    };
    ValidationError::new(row_number, field, value, message)
}

/// Cell contents as trimmed text; blank and null cells count as absent
fn cell_text(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn password_problem(password: &str) -> Option<String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Some(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }

    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    if has_lowercase && has_uppercase && has_digit && has_special {
        None
    } else {
        Some(
            "Password must contain an uppercase letter, a lowercase letter, a digit and a symbol"
                .to_string(),
        )
    }
}

/// Usernames and emails already accepted in this file, with their row numbers
#[derive(Default)]
struct SeenIdentities {
    usernames: HashMap<String, u32>,
    emails: HashMap<String, u32>,
}

impl SeenIdentities {
    fn check(&mut self, record: &ImportRecord, row_number: u32, errors: &mut Vec<ValidationError>) {
        let username_key = record.username.to_lowercase();
        let email_key = record.email.to_lowercase();

        if let Some(first) = self.usernames.get(&username_key) {
            errors.push(ValidationError::new(
                row_number,
                "username",
                Value::String(record.username.clone()),
                format!("Duplicate username, first used at row {}", first),
            ));
        }
        if let Some(first) = self.emails.get(&email_key) {
            errors.push(ValidationError::new(
                row_number,
                "email",
                Value::String(record.email.clone()),
                format!("Duplicate email, first used at row {}", first),
            ));
        }

        if errors.is_empty() {
            self.usernames.insert(username_key, row_number);
            self.emails.insert(email_key, row_number);
        }
    }
}
