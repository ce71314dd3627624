//! Validation and error report integration tests

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::RowFactory;
    use bulk_import::{RecordValidator, write_error_report};
    use serde_json::json;

    #[test]
    fn test_mixed_file_partitions_rows() {
        let mut rows = RowFactory::many(4);
        rows[1] = RowFactory::with(1, "email", json!("not-an-email"));
        rows[3] = RowFactory::with(3, "userType", json!("9"));

        let result = RecordValidator::default().validate(&rows);

        assert!(!result.valid);
        assert_eq!(result.total_rows, 4);
        assert_eq!(result.valid_rows, 2);
        assert_eq!(result.invalid_rows, 2);
        assert_eq!(result.valid_rows + result.invalid_rows, result.total_rows);

        let rows_with_errors: Vec<u32> = result.errors.iter().map(|e| e.row).collect();
        assert_eq!(rows_with_errors, vec![3, 5]);
    }

    #[test]
    fn test_password_never_echoed_in_errors() {
        let rows = vec![RowFactory::with(0, "password", json!("short"))];
        let result = RecordValidator::default().validate(&rows);

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "password");
        assert_ne!(result.errors[0].value, json!("short"));
    }

    #[tokio::test]
    async fn test_error_report_written_to_disk() {
        let dir = assert_ok!(tempfile::tempdir());
        let path = dir.path().join("errors.csv");

        let rows = vec![
            RowFactory::with(0, "username", json!("bad name")),
            RowFactory::valid(1),
        ];
        let result = RecordValidator::default().validate(&rows);
        assert_ok!(write_error_report(&path, &result.errors).await);

        let content = assert_ok!(std::fs::read_to_string(&path));
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some(r#""Row","Field","Value","Error Message""#)
        );
        let line = lines.next().unwrap_or_default();
        assert!(line.starts_with(r#""2","username","bad name","#));
        assert_eq!(lines.next(), None);
    }
}
