//! Read counters for row stores
//!
//! - Counters only
//! - Monotonic until `reset`
//! - Thread-safe but lock-minimal

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by one table instance.
///
/// Uses Relaxed ordering; values are exact once the counting thread is done.
#[derive(Debug, Default)]
pub struct TableMetrics {
    /// Rows read through `RowStore::read`
    rows_read: AtomicU64,
    /// Calls to `RowStore::row_ids`
    id_scans: AtomicU64,
    /// Rows written
    rows_written: AtomicU64,
}

impl TableMetrics {
    /// Create counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment rows read
    pub fn increment_rows_read(&self) {
        self.rows_read.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment id enumerations
    pub fn increment_id_scans(&self) {
        self.id_scans.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment rows written
    pub fn increment_rows_written(&self) {
        self.rows_written.fetch_add(1, Ordering::Relaxed);
    }

    /// Get rows read
    pub fn rows_read(&self) -> u64 {
        self.rows_read.load(Ordering::Relaxed)
    }

    /// Get id enumerations
    pub fn id_scans(&self) -> u64 {
        self.id_scans.load(Ordering::Relaxed)
    }

    /// Get rows written
    pub fn rows_written(&self) -> u64 {
        self.rows_written.load(Ordering::Relaxed)
    }

    /// Zero every counter
    pub fn reset(&self) {
        self.rows_read.store(0, Ordering::Relaxed);
        self.id_scans.store(0, Ordering::Relaxed);
        self.rows_written.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = TableMetrics::new();
        assert_eq!(metrics.rows_read(), 0);
        assert_eq!(metrics.id_scans(), 0);
    }

    #[test]
    fn test_increment_and_reset() {
        let metrics = TableMetrics::new();
        metrics.increment_rows_read();
        metrics.increment_rows_read();
        metrics.increment_id_scans();

        assert_eq!(metrics.rows_read(), 2);
        assert_eq!(metrics.id_scans(), 1);
        assert_eq!(metrics.rows_written(), 0);

        metrics.reset();
        assert_eq!(metrics.rows_read(), 0);
        assert_eq!(metrics.id_scans(), 0);
    }
}
