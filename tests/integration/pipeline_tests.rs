//! End-to-end import runs over HTTP

#[cfg(test)]
mod tests {
    use crate::common::{BULK_CREATE_PATH, ConsoleResponder, RecordFactory, RowFactory, endpoint_for};
    use crate::{assert_err, assert_ok};
    use bulk_import::{
        BatchFailurePolicy, BulkImporter, HttpBulkUserApi, ImportError, ImportOptions,
        ImportProgress, RecordValidator, process_bulk_import,
    };
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> Arc<HttpBulkUserApi> {
        Arc::new(assert_ok!(HttpBulkUserApi::new(
            endpoint_for(server),
            Duration::from_secs(5)
        )))
    }

    fn fast_options() -> ImportOptions {
        ImportOptions::default()
            .with_retry(2, Duration::from_millis(5))
            .with_inter_batch_delay(Duration::ZERO)
    }

    async fn batch_sizes(server: &MockServer) -> Vec<usize> {
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| {
                let body: serde_json::Value =
                    serde_json::from_slice(&request.body).unwrap_or_default();
                body["users"].as_array().map(Vec::len).unwrap_or_default()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_validated_rows_imported_in_batches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(BULK_CREATE_PATH))
            .respond_with(ConsoleResponder::new().with_existing("user_7"))
            .expect(3)
            .mount(&server)
            .await;

        let validation = RecordValidator::default().validate(&RowFactory::many(120));
        assert!(validation.valid);

        let seen = Arc::new(Mutex::new(Vec::<ImportProgress>::new()));
        let sink = seen.clone();
        let options = fast_options()
            .with_batch_size(50)
            .with_progress(move |p| sink.lock().unwrap().push(*p));

        let report = assert_ok!(
            BulkImporter::new(api_for(&server), options)
                .run(&validation.valid_records)
                .await
        );

        assert_eq!(report.batches, 3);
        assert!(!report.cancelled);
        assert!(report.batch_failures.is_empty());
        assert_eq!(report.result.total_count, 120);
        assert_eq!(report.result.success_count, 119);
        assert_eq!(report.result.failed_count, 1);
        assert_eq!(report.result.details.len(), 120);
        assert_eq!(batch_sizes(&server).await, vec![50, 50, 20]);

        let percentages: Vec<u8> = seen.lock().unwrap().iter().map(|p| p.percentage).collect();
        assert_eq!(percentages, vec![42, 83, 100]);
    }

    #[tokio::test]
    async fn test_small_import_single_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(BULK_CREATE_PATH))
            .respond_with(ConsoleResponder::new())
            .expect(1)
            .mount(&server)
            .await;

        let result = assert_ok!(
            process_bulk_import(api_for(&server), &RecordFactory::many(10), fast_options()).await
        );
        assert_eq!(result.success_count, 10);
        assert_eq!(result.total_count, 10);
    }

    #[tokio::test]
    async fn test_rejected_batch_does_not_stop_run() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(BULK_CREATE_PATH))
            .respond_with(ConsoleResponder::new())
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(BULK_CREATE_PATH))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "success": false, "message": "duplicate email" })),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(BULK_CREATE_PATH))
            .respond_with(ConsoleResponder::new())
            .mount(&server)
            .await;

        let report = assert_ok!(
            BulkImporter::new(api_for(&server), fast_options().with_batch_size(4))
                .run(&RecordFactory::many(10))
                .await
        );

        assert_eq!(report.result.success_count, 6);
        assert_eq!(report.result.failed_count, 4);
        assert_eq!(report.batch_failures.len(), 1);
        assert_eq!(report.batch_failures[0].batch_index, 1);
        assert!(report.batch_failures[0].error.contains("duplicate email"));

        let failed: Vec<&str> = report
            .result
            .details
            .iter()
            .filter(|d| !d.success)
            .map(|d| d.identifier.as_str())
            .collect();
        assert_eq!(failed, vec!["user_4", "user_5", "user_6", "user_7"]);
    }

    #[tokio::test]
    async fn test_abort_policy_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(BULK_CREATE_PATH))
            .respond_with(ConsoleResponder::new())
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(BULK_CREATE_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let options = fast_options()
            .with_batch_size(5)
            .with_failure_policy(BatchFailurePolicy::Abort);
        let err = assert_err!(
            BulkImporter::new(api_for(&server), options)
                .run(&RecordFactory::many(15))
                .await
        );

        match err {
            ImportError::Aborted {
                batch_index,
                partial,
                ..
            } => {
                assert_eq!(batch_index, 1);
                assert_eq!(partial.success_count, 5);
                assert_eq!(partial.failed_count, 5);
            }
            other => panic!("expected abort, got {:?}", other),
        }

        // first batch once, second batch twice (retry), third never
        assert_eq!(batch_sizes(&server).await, vec![5, 5, 5]);
    }
}
