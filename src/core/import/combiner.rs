//! Combining per-batch outcomes into one result

use super::types::{BatchOutcome, BulkOperationResult};

/// Sum counts and concatenate details in batch order.
///
/// `total_count` is the caller's original record count, not recomputed from
/// the outcomes.
pub fn combine(outcomes: &[BatchOutcome], total_count: usize) -> BulkOperationResult {
    let mut combined = BulkOperationResult::empty(total_count);
    for outcome in outcomes {
        combined.success_count += outcome.success_count;
        combined.failed_count += outcome.failed_count;
        combined.details.extend(outcome.details.iter().cloned());
    }
    combined
}
