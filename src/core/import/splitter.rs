//! Batch splitting

/// Split `records` into contiguous batches of at most `batch_size` items.
///
/// Order is preserved and the batches partition the input exactly; record
/// `i` lands in batch `i / batch_size`. A `batch_size` of 0 is treated as 1.
pub fn split<T>(records: &[T], batch_size: usize) -> Vec<&[T]> {
    let batch_size = batch_size.max(1);
    if records.is_empty() {
        return Vec::new();
    }
    if records.len() <= batch_size {
        return vec![records];
    }
    records.chunks(batch_size).collect()
}

/// Number of batches [`split`] will produce
pub fn batch_count(len: usize, batch_size: usize) -> usize {
    len.div_ceil(batch_size.max(1))
}
