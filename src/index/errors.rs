//! Index error types
//!
//! Error codes:
//! - FQL_INDEX_MISSING_ROW_ID (FATAL)
//! - FQL_INDEX_BUILD_FAILED (FATAL)

use thiserror::Error;

use crate::executor::QueryError;

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors raised while building a column index
#[derive(Debug, Error)]
pub enum IndexError {
    /// A scanned row has no integer `id` to record in a bucket
    #[error("cannot index column `{column}`: row without an integer id")]
    MissingRowId { column: String },

    /// The full scan backing the build failed
    #[error("cannot index column `{column}`: {source}")]
    BuildFailed {
        column: String,
        #[source]
        source: Box<QueryError>,
    },
}

impl IndexError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            IndexError::MissingRowId { .. } => "FQL_INDEX_MISSING_ROW_ID",
            IndexError::BuildFailed { .. } => "FQL_INDEX_BUILD_FAILED",
        }
    }

    /// Build failures are fatal: no index is cached after one.
    pub fn is_fatal(&self) -> bool {
        true
    }

    /// Column whose build failed
    pub fn column(&self) -> &str {
        match self {
            IndexError::MissingRowId { column } | IndexError::BuildFailed { column, .. } => {
                column
            }
        }
    }
}
