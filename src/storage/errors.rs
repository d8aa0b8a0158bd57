//! Storage error types
//!
//! Error codes:
//! - FQL_TABLE_NOT_FOUND (FATAL)
//! - FQL_ROW_NOT_FOUND (FATAL)
//! - FQL_STORAGE_READ_FAILED (FATAL)
//! - FQL_ROW_MALFORMED (FATAL)
//! - FQL_STORAGE_WRITE_FAILED (ERROR)

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::row::RowId;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by a row store
#[derive(Debug, Error)]
pub enum StorageError {
    /// The table directory does not exist or is not a directory
    #[error("table not found: {}", .path.display())]
    TableNotFound { path: PathBuf },

    /// No row file exists for the requested id
    #[error("row {id} not found in {}", .table.display())]
    RowNotFound { table: PathBuf, id: RowId },

    /// The underlying file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The row file does not hold a JSON object
    #[error("malformed row in {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    /// The row could not be persisted
    #[error("failed to write {}: {reason}", .path.display())]
    WriteFailed { path: PathBuf, reason: String },
}

impl StorageError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::TableNotFound { .. } => "FQL_TABLE_NOT_FOUND",
            StorageError::RowNotFound { .. } => "FQL_ROW_NOT_FOUND",
            StorageError::ReadFailed { .. } => "FQL_STORAGE_READ_FAILED",
            StorageError::Malformed { .. } => "FQL_ROW_MALFORMED",
            StorageError::WriteFailed { .. } => "FQL_STORAGE_WRITE_FAILED",
        }
    }

    /// Read-side errors abort the query that triggered them.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, StorageError::WriteFailed { .. })
    }
}
