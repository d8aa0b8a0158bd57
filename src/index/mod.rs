//! Secondary index subsystem for flatquery
//!
//! Indexes are derived, in-memory-only state owned by a row store instance.
//!
//! # Design Principles
//!
//! - Lazy: an index exists only after an explicit build for its column
//! - Derived: built by running an unfiltered query through the executor
//! - In-memory only: no persistence, no invalidation
//!
//! # Invariants
//!
//! - Buckets list row ids in the store's enumeration order
//! - Strictly equal values share one bucket
//! - Built once per column per store instance

mod btree;
mod errors;
mod manager;

pub use btree::{ColumnIndex, IndexKey};
pub use errors::{IndexError, IndexResult};
pub use manager::{build_index, IndexManager};
