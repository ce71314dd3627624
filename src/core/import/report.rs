//! Validation error report export

use super::types::ValidationError;
use crate::utils::error::{ImportError, Result};
use csv::{QuoteStyle, WriterBuilder};
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Column headers of the exported report
pub const REPORT_HEADERS: [&str; 4] = ["Row", "Field", "Value", "Error Message"];

/// Render errors as delimited text, one line per error, every field quoted
pub fn error_report_csv(errors: &[ValidationError]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(REPORT_HEADERS)?;
    for error in errors {
        writer.write_record([
            error.row.to_string(),
            error.field.clone(),
            value_text(&error.value),
            error.message.clone(),
        ])?;
    }

    writer.flush()?;
    let bytes = writer.into_inner().map_err(|e| {
        ImportError::Io(std::io::Error::new(e.error().kind(), e.error().to_string()))
    })?;
    String::from_utf8(bytes)
        .map_err(|e| ImportError::validation(format!("Report is not valid UTF-8: {}", e)))
}

/// Write the report to `path`
pub async fn write_error_report<P: AsRef<Path>>(path: P, errors: &[ValidationError]) -> Result<()> {
    let path = path.as_ref();
    let report = error_report_csv(errors)?;
    tokio::fs::write(path, report).await?;
    info!("Wrote {} validation errors to {:?}", errors.len(), path);
    Ok(())
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
