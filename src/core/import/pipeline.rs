//! Bulk import orchestration
//!
//! Batches are dispatched strictly one after another. The running tally is
//! owned by a single [`BulkImporter::run`] call, so concurrent runs share no
//! state beyond the HTTP connection pool.

use super::combiner::combine;
use super::dispatcher::{BulkUserApi, dispatch_batch};
use super::progress::{ProgressObserver, ProgressTally, report_progress};
use super::splitter::split;
use super::types::{BatchFailure, BulkOperationResult, ImportRecord, ImportReport};
use crate::config::ImportSettings;
use crate::utils::error::{ImportError, Result, RetryConfig};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// What to do when a batch exhausts its attempts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchFailurePolicy {
    /// Count the batch as failed and move on
    #[default]
    Continue,
    /// Stop and return the partial result inside the error
    Abort,
}

/// Options for one import run
#[derive(Clone)]
pub struct ImportOptions {
    pub batch_size: usize,
    pub retry: RetryConfig,
    /// Pause between successive batches, skipped after the last one
    pub inter_batch_delay: Duration,
    pub on_batch_failure: BatchFailurePolicy,
    pub on_progress: Option<ProgressObserver>,
    /// Cancellation flag; `true` stops the run after the in-flight batch
    pub cancel: Option<watch::Receiver<bool>>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self::from_settings(&ImportSettings::default())
    }
}

impl fmt::Debug for ImportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportOptions")
            .field("batch_size", &self.batch_size)
            .field("retry", &self.retry)
            .field("inter_batch_delay", &self.inter_batch_delay)
            .field("on_batch_failure", &self.on_batch_failure)
            .field("on_progress", &self.on_progress.is_some())
            .field("cancel", &self.cancel.is_some())
            .finish()
    }
}

impl ImportOptions {
    pub fn from_settings(settings: &ImportSettings) -> Self {
        Self {
            batch_size: settings.batch_size,
            retry: RetryConfig::new(
                settings.retry_attempts,
                Duration::from_millis(settings.retry_delay_ms),
            ),
            inter_batch_delay: Duration::from_millis(settings.inter_batch_delay_ms),
            on_batch_failure: settings.on_batch_failure,
            on_progress: None,
            cancel: None,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_retry(mut self, attempts: u32, delay: Duration) -> Self {
        self.retry = RetryConfig {
            max_attempts: attempts,
            base_delay: delay,
            ..self.retry
        };
        self
    }

    pub fn with_inter_batch_delay(mut self, delay: Duration) -> Self {
        self.inter_batch_delay = delay;
        self
    }

    pub fn with_failure_policy(mut self, policy: BatchFailurePolicy) -> Self {
        self.on_batch_failure = policy;
        self
    }

    pub fn with_progress<F>(mut self, observer: F) -> Self
    where
        F: Fn(&super::types::ImportProgress) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(observer));
        self
    }

    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Stateless driver for batched imports
#[derive(Clone)]
pub struct BulkImporter {
    api: Arc<dyn BulkUserApi>,
    options: ImportOptions,
}

impl fmt::Debug for BulkImporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkImporter")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl BulkImporter {
    pub fn new(api: Arc<dyn BulkUserApi>, options: ImportOptions) -> Self {
        Self { api, options }
    }

    /// Import `records` and describe what happened to every batch
    pub async fn run(&self, records: &[ImportRecord]) -> Result<ImportReport> {
        let started_at = Utc::now();
        let total = records.len();
        let batch_size = self.options.batch_size.max(1);
        let mut tally = ProgressTally::new(total);

        info!(total, batch_size, "Starting bulk import");

        if records.is_empty() {
            return Ok(ImportReport {
                result: BulkOperationResult::empty(0),
                batch_failures: Vec::new(),
                batches: 0,
                cancelled: false,
                started_at,
                finished_at: Utc::now(),
            });
        }

        if self.is_cancelled() {
            return Err(ImportError::Cancelled);
        }

        if total <= batch_size {
            let outcome = dispatch_batch(self.api.as_ref(), records, &self.options.retry).await?;
            let progress = tally.record(total, &outcome);
            report_progress(self.options.on_progress.as_ref(), &progress);

            let result = BulkOperationResult {
                total_count: total,
                ..outcome
            };
            info!(
                success = result.success_count,
                failed = result.failed_count,
                "Bulk import finished in a single batch"
            );
            return Ok(ImportReport {
                result,
                batch_failures: Vec::new(),
                batches: 1,
                cancelled: false,
                started_at,
                finished_at: Utc::now(),
            });
        }

        let batches = split(records, batch_size);
        let batch_count = batches.len();
        let mut outcomes = Vec::with_capacity(batch_count);
        let mut batch_failures = Vec::new();
        let mut cancelled = false;

        for (index, batch) in batches.iter().enumerate() {
            if self.is_cancelled() {
                cancelled = true;
                break;
            }

            debug!(
                batch = index + 1,
                of = batch_count,
                records = batch.len(),
                "Processing batch"
            );

            match dispatch_batch(self.api.as_ref(), batch, &self.options.retry).await {
                Ok(outcome) => {
                    let progress = tally.record(batch.len(), &outcome);
                    outcomes.push(outcome);
                    report_progress(self.options.on_progress.as_ref(), &progress);
                }
                Err(error) => {
                    warn!(
                        batch = index + 1,
                        records = batch.len(),
                        "Batch failed: {}",
                        error
                    );
                    let message = error.to_string();
                    outcomes.push(BulkOperationResult::all_failed(batch, &message));
                    batch_failures.push(BatchFailure {
                        batch_index: index,
                        record_count: batch.len(),
                        error: message,
                    });
                    let progress = tally.record_failed_batch(batch.len());
                    report_progress(self.options.on_progress.as_ref(), &progress);

                    if self.options.on_batch_failure == BatchFailurePolicy::Abort {
                        return Err(ImportError::Aborted {
                            batch_index: index,
                            partial: Box::new(combine(&outcomes, total)),
                            source: Box::new(error),
                        });
                    }
                }
            }

            if index + 1 < batch_count && self.pause_between_batches().await {
                cancelled = true;
                break;
            }
        }

        let result = combine(&outcomes, total);
        if cancelled {
            warn!(
                processed = tally.processed(),
                total, "Bulk import cancelled; returning partial result"
            );
        }
        info!(
            success = result.success_count,
            failed = result.failed_count,
            batches = outcomes.len(),
            failed_batches = batch_failures.len(),
            "Bulk import finished"
        );

        Ok(ImportReport {
            result,
            batch_failures,
            batches: outcomes.len(),
            cancelled,
            started_at,
            finished_at: Utc::now(),
        })
    }

    fn is_cancelled(&self) -> bool {
        self.options
            .cancel
            .as_ref()
            .is_some_and(|cancel| *cancel.borrow())
    }

    /// Sleep between batches; returns `true` if cancelled meanwhile
    async fn pause_between_batches(&self) -> bool {
        let delay = self.options.inter_batch_delay;
        match self.options.cancel.clone() {
            Some(mut cancel) => {
                let interrupted = tokio::select! {
                    _ = tokio::time::sleep(delay) => false,
                    _ = wait_for_cancel(&mut cancel) => true,
                };
                interrupted || *cancel.borrow()
            }
            None => {
                tokio::time::sleep(delay).await;
                false
            }
        }
    }
}

async fn wait_for_cancel(cancel: &mut watch::Receiver<bool>) {
    loop {
        if *cancel.borrow_and_update() {
            return;
        }
        if cancel.changed().await.is_err() {
            // Sender dropped: nobody can cancel any more
            std::future::pending::<()>().await;
        }
    }
}

/// Import `records` with `options`, returning only the combined result
pub async fn process_bulk_import(
    api: Arc<dyn BulkUserApi>,
    records: &[ImportRecord],
    options: ImportOptions,
) -> Result<BulkOperationResult> {
    BulkImporter::new(api, options)
        .run(records)
        .await
        .map(|report| report.result)
}
