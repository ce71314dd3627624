//! Configuration loading integration tests

#[cfg(test)]
mod tests {
    use crate::{assert_err, assert_ok};
    use bulk_import::config::{Config, LogFormat};
    use bulk_import::{BatchFailurePolicy, ImportError, ImportOptions};
    use std::io::Write;
    use std::time::Duration;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = assert_ok!(tempfile::NamedTempFile::new());
        assert_ok!(file.write_all(content.as_bytes()));
        file
    }

    #[tokio::test]
    async fn test_load_full_config_file() {
        let file = write_config(
            r#"
endpoint:
  base_url: "https://console.example.com"
  api_token: "token-abcdef-123456"
import:
  batch_size: 25
  retry_attempts: 4
  retry_delay_ms: 200
  inter_batch_delay_ms: 0
  request_timeout_secs: 10
  on_batch_failure: abort
validation:
  max_rows: 500
  reject_duplicates: false
logging:
  level: debug
  format: json
"#,
        );

        let config = assert_ok!(Config::from_file(file.path()).await);

        assert_eq!(config.endpoint.base_url, "https://console.example.com");
        assert_eq!(
            config.endpoint.bulk_create_url(),
            "https://console.example.com/api/admin/users/bulk-import"
        );
        assert_eq!(config.import.batch_size, 25);
        assert_eq!(config.import.on_batch_failure, BatchFailurePolicy::Abort);
        assert_eq!(config.validation.max_rows, 500);
        assert!(!config.validation.reject_duplicates);
        assert_eq!(config.logging.format, LogFormat::Json);

        let options = ImportOptions::from_settings(&config.import);
        assert_eq!(options.batch_size, 25);
        assert_eq!(options.retry.max_attempts, 4);
        assert_eq!(options.retry.base_delay, Duration::from_millis(200));
        assert_eq!(options.inter_batch_delay, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_partial_config_uses_defaults() {
        let file = write_config("endpoint:\n  base_url: \"http://127.0.0.1:9000\"\n");
        let config = assert_ok!(Config::from_file(file.path()).await);

        assert_eq!(config.import.batch_size, 50);
        assert_eq!(config.import.retry_attempts, 3);
        assert_eq!(config.import.retry_delay_ms, 1000);
        assert_eq!(config.import.inter_batch_delay_ms, 500);
        assert!(config.validation.reject_duplicates);
    }

    #[tokio::test]
    async fn test_invalid_values_rejected() {
        let file = write_config("import:\n  batch_size: 0\n");
        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(matches!(err, ImportError::Config(_)));
    }

    #[tokio::test]
    async fn test_malformed_yaml_rejected() {
        let file = write_config("endpoint: [unclosed");
        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(matches!(err, ImportError::Yaml(_)));
    }

    #[tokio::test]
    async fn test_load_with_override_fixes_file_value() {
        let file = write_config("import:\n  batch_size: 0\n");
        assert_err!(Config::from_file(file.path()).await);

        let config = assert_ok!(
            Config::load_with(Some(file.path()), |config| config.import.batch_size = 20).await
        );
        assert_eq!(config.import.batch_size, 20);
    }

    #[tokio::test]
    async fn test_missing_file_rejected() {
        let dir = assert_ok!(tempfile::tempdir());
        let err = assert_err!(Config::from_file(dir.path().join("absent.yaml")).await);
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_token_masked_in_debug() {
        let config = Config::default();
        let mut endpoint = config.endpoint.clone();
        endpoint.api_token = Some("token-abcdef-123456".to_string());

        let debug = format!("{:?}", endpoint);
        assert!(!debug.contains("token-abcdef-123456"));
        assert!(debug.contains("to***56"));
    }
}
