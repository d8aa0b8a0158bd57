//! Row storage subsystem for flatquery
//!
//! A table is a directory of individually numbered JSON row files. The query
//! core only consumes the [`RowStore`] contract: enumerate ids, read one row,
//! and own a per-instance index cache.
//!
//! # Invariants
//!
//! - Row id enumeration order is stable for the lifetime of a store instance
//! - Reading an id with no row file is a fatal error, never masked
//! - Indexes live in memory only and belong to the store instance

mod errors;
mod row;
mod store;
mod table;

pub use errors::{StorageError, StorageResult};
pub use row::{strict_eq, Row, RowId, ID_COLUMN};
pub(crate) use row::integral_value;
pub use store::RowStore;
pub use table::Table;
