//! Index Manager for flatquery
//!
//! Caches column indexes for one row store instance.
//!
//! # API
//!
//! - `has_index(column)` - Is an index cached for this column
//! - `get_index(column)` - Cached index, if any
//! - `build_index(store, column)` - Build once through a full scan, then cache

use std::collections::HashMap;
use std::time::Instant;

use tracing::info;

use crate::executor::Query;
use crate::observability::Event;
use crate::storage::RowStore;

use super::btree::{ColumnIndex, IndexKey};
use super::errors::{IndexError, IndexResult};

/// Per-store cache of column indexes, keyed by column name.
///
/// Indexes are in memory only and never invalidated.
#[derive(Debug, Default)]
pub struct IndexManager {
    indexes: HashMap<String, ColumnIndex>,
}

impl IndexManager {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if an index is cached for `column`
    pub fn has_index(&self, column: &str) -> bool {
        self.indexes.contains_key(column)
    }

    /// Returns the cached index for `column`
    pub fn get_index(&self, column: &str) -> Option<&ColumnIndex> {
        self.indexes.get(column)
    }

    /// Names of indexed columns, sorted
    pub fn indexed_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = self.indexes.keys().map(String::as_str).collect();
        columns.sort_unstable();
        columns
    }

    /// Removes a cached index so it can be re-cached by `insert`
    fn take(&mut self, column: &str) -> Option<ColumnIndex> {
        self.indexes.remove(column)
    }

    /// Caches an index and returns it
    fn insert(&mut self, index: ColumnIndex) -> &ColumnIndex {
        self.indexes
            .entry(index.column().to_string())
            .or_insert(index)
    }
}

/// Builds and caches the index for `column` on `store`.
///
/// The rows come from an unfiltered, unprojected, unlimited query through the
/// regular executor, so the index sees exactly the values a scan would see.
/// A second call for the same column returns the cached index without
/// reading any row.
pub fn build_index<'s, S>(store: &'s mut S, column: &str) -> IndexResult<&'s ColumnIndex>
where
    S: RowStore + ?Sized,
{
    let index = match store.indexes_mut().take(column) {
        Some(cached) => cached,
        None => scan_column(&*store, column)?,
    };
    Ok(store.indexes_mut().insert(index))
}

/// Scans every row and groups ids by the value of `column`.
///
/// Rows lacking the column join no bucket: no literal can equal an absent
/// value.
fn scan_column<S>(store: &S, column: &str) -> IndexResult<ColumnIndex>
where
    S: RowStore + ?Sized,
{
    let started = Instant::now();
    info!(event = Event::IndexBuildStart.as_str(), column, "building column index");

    let rows = Query::new(store)
        .get()
        .map_err(|e| IndexError::BuildFailed {
            column: column.to_string(),
            source: Box::new(e),
        })?;

    let mut index = ColumnIndex::new(column);
    for row in &rows {
        let Some(value) = row.get(column) else {
            continue;
        };
        let Some(key) = IndexKey::from_json(value) else {
            continue;
        };
        let id = row.id().ok_or_else(|| IndexError::MissingRowId {
            column: column.to_string(),
        })?;
        index.insert(key, id);
    }

    info!(
        event = Event::IndexBuildComplete.as_str(),
        column,
        rows = rows.len(),
        keys = index.key_count(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "column index built"
    );

    Ok(index)
}
