//! Row store contract consumed by the query core

use crate::index::{self, ColumnIndex, IndexManager, IndexResult};

use super::errors::StorageResult;
use super::row::{Row, RowId};

/// A collection of rows with enumeration and point-read access.
///
/// Each store instance owns the index cache for its own rows. Building an
/// index needs `&mut self`, so at most one writer can touch the cache;
/// built indexes are only read through `&self`.
pub trait RowStore {
    /// Enumerates row ids.
    ///
    /// The order is store-defined but must be stable for the lifetime of the
    /// instance, since index buckets record ids in this order.
    fn row_ids(&self) -> StorageResult<Vec<RowId>>;

    /// Reads one row. Fails if `id` does not name a stored row.
    fn read(&self, id: RowId) -> StorageResult<Row>;

    /// Index cache owned by this store
    fn indexes(&self) -> &IndexManager;

    /// Mutable access to the index cache
    fn indexes_mut(&mut self) -> &mut IndexManager;

    /// Returns true if an index has been built for `column`
    fn has_index(&self, column: &str) -> bool {
        self.indexes().has_index(column)
    }

    /// Returns the cached index for `column`, if built
    fn get_index(&self, column: &str) -> Option<&ColumnIndex> {
        self.indexes().get_index(column)
    }

    /// Builds (once) and caches the index for `column`.
    ///
    /// Calling this for an already-indexed column returns the cached index
    /// without touching the rows. Indexes are never invalidated: rows written
    /// after the build are not reflected until a new store is opened.
    fn add_index(&mut self, column: &str) -> IndexResult<&ColumnIndex> {
        index::build_index(self, column)
    }
}
