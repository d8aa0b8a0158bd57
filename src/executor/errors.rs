//! Executor error types
//!
//! Error codes:
//! - FQL_QUERY_STORAGE (FATAL)
//! - FQL_QUERY_PREDICATE (ERROR)
//!
//! Any error aborts the whole query; no partial result set is returned.

use thiserror::Error;

use crate::planner::PredicateError;
use crate::storage::{RowId, StorageError};

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, QueryError>;

/// Errors raised while executing a query
#[derive(Debug, Error)]
pub enum QueryError {
    /// The row store failed to enumerate or read a row
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A predicate criterion failed on a row
    #[error("row {row}: {source}")]
    Predicate {
        row: RowId,
        #[source]
        source: PredicateError,
    },
}

impl QueryError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::Storage(_) => "FQL_QUERY_STORAGE",
            QueryError::Predicate { .. } => "FQL_QUERY_PREDICATE",
        }
    }

    /// Storage failures are fatal; predicate failures only abort the query.
    pub fn is_fatal(&self) -> bool {
        match self {
            QueryError::Storage(e) => e.is_fatal(),
            QueryError::Predicate { .. } => false,
        }
    }
}
