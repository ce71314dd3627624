//! Progress aggregation across batches

use super::types::{BatchOutcome, ImportProgress};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use tracing::warn;

/// Caller-supplied callback receiving one snapshot per finished batch
pub type ProgressObserver = Arc<dyn Fn(&ImportProgress) + Send + Sync>;

/// Running totals owned by one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressTally {
    total: usize,
    processed: usize,
    success: usize,
    failed: usize,
}

impl ProgressTally {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Fold in a batch the server answered
    pub fn record(&mut self, batch_len: usize, outcome: &BatchOutcome) -> ImportProgress {
        self.advance(batch_len);
        self.success += outcome.success_count;
        self.failed += outcome.failed_count;
        self.snapshot()
    }

    /// Fold in a batch whose dispatch failed; every record counts as failed
    pub fn record_failed_batch(&mut self, batch_len: usize) -> ImportProgress {
        self.advance(batch_len);
        self.failed += batch_len;
        self.snapshot()
    }

    pub fn snapshot(&self) -> ImportProgress {
        ImportProgress::new(self.total, self.processed, self.success, self.failed)
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    fn advance(&mut self, batch_len: usize) {
        self.processed = (self.processed + batch_len).min(self.total);
    }
}

/// Invoke the observer, swallowing any panic it raises
pub fn report_progress(observer: Option<&ProgressObserver>, progress: &ImportProgress) {
    let Some(observer) = observer else {
        return;
    };
    if catch_unwind(AssertUnwindSafe(|| observer(progress))).is_err() {
        warn!(
            processed = progress.processed,
            total = progress.total,
            "Progress observer panicked; continuing import"
        );
    }
}
