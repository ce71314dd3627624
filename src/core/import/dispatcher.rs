//! Request dispatch with retry
//!
//! [`BulkUserApi`] is the seam to the remote user service. Every attempt
//! returns an [`AttemptOutcome`], so the retry loop branches on a value rather
//! than on error types.

use super::types::{ApiEnvelope, BatchOutcome, BulkCreateRequest, BulkOperationResult, ImportRecord};
use crate::config::EndpointConfig;
use crate::utils::error::{AttemptOutcome, ImportError, Result, RetryConfig, RetryPolicy};
use crate::utils::net::http::build_client;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// Longest server message kept in an error
const MAX_ERROR_BODY: usize = 200;

/// Remote bulk user endpoints
#[async_trait]
pub trait BulkUserApi: Send + Sync {
    /// Create the given users; one call is one attempt
    async fn bulk_create(&self, users: &[ImportRecord]) -> AttemptOutcome<BatchOutcome>;

    /// Server-side validation without persisting anything
    async fn validate_only(&self, users: &[ImportRecord]) -> Result<BulkOperationResult>;
}

/// Send one batch, retrying server-side and transport failures.
///
/// Client errors and malformed responses fail immediately. When every
/// attempt fails the last error is returned.
pub async fn dispatch_batch(
    api: &dyn BulkUserApi,
    batch: &[ImportRecord],
    retry: &RetryConfig,
) -> Result<BatchOutcome> {
    debug!(records = batch.len(), "Dispatching batch");
    RetryPolicy::new(retry.clone())
        .call(|| api.bulk_create(batch))
        .await
}

/// Unwrap the `{ success, data, message }` envelope
pub fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> Result<T> {
    match (envelope.success, envelope.data) {
        (Some(true), Some(data)) => Ok(data),
        (Some(true), None) => Err(ImportError::malformed(
            "Response reported success but carried no data",
        )),
        (None, _) => Err(ImportError::malformed(
            "Response is missing the success flag",
        )),
        (Some(false), _) => Err(ImportError::malformed(
            envelope
                .message
                .unwrap_or_else(|| "Server reported failure without a message".to_string()),
        )),
    }
}

/// HTTP implementation of [`BulkUserApi`]
#[derive(Debug, Clone)]
pub struct HttpBulkUserApi {
    client: reqwest::Client,
    endpoint: EndpointConfig,
}

impl HttpBulkUserApi {
    /// Build a client with the per-attempt timeout
    pub fn new(endpoint: EndpointConfig, timeout: Duration) -> Result<Self> {
        let client = build_client(timeout)?;
        info!("Bulk user API client created for {}", endpoint.base_url);
        Ok(Self { client, endpoint })
    }

    async fn post(&self, url: &str, users: &[ImportRecord]) -> Result<BulkOperationResult> {
        debug!("POST {} ({} users)", url, users.len());

        let mut request = self.client.post(url).json(&BulkCreateRequest { users });
        if let Some(token) = &self.endpoint.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ImportError::from_status(status.as_u16(), error_message(&body)));
        }

        let envelope: ApiEnvelope<BulkOperationResult> = serde_json::from_str(&body)
            .map_err(|e| ImportError::malformed(format!("Failed to decode response body: {}", e)))?;
        unwrap_envelope(envelope)
    }
}

#[async_trait]
impl BulkUserApi for HttpBulkUserApi {
    async fn bulk_create(&self, users: &[ImportRecord]) -> AttemptOutcome<BatchOutcome> {
        self.post(&self.endpoint.bulk_create_url(), users).await.into()
    }

    async fn validate_only(&self, users: &[ImportRecord]) -> Result<BulkOperationResult> {
        self.post(&self.endpoint.validate_url(), users).await
    }
}

/// Prefer the envelope's `message`, fall back to the truncated raw body
fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body) {
        if let Some(message) = envelope.message {
            return message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
