//! Fixed-size batching for bulk upserts.
//!
//! The vector store accepts a bounded number of records per bulk call; the
//! batcher exists to cap exactly that.

/// Partition a slice into groups of `size`, preserving order.
///
/// Every group has exactly `size` elements except possibly the last, which
/// holds the remainder (`1 ..= size`). The iterator is lazy and borrows the
/// source; re-iterating means calling again with the original slice, not
/// resuming a consumed cursor.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn batches<T>(items: &[T], size: usize) -> std::slice::Chunks<'_, T> {
    assert!(size > 0, "batch size must be at least 1");
    items.chunks(size)
}
