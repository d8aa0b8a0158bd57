//! Configuration error types
//!
//! Error codes:
//! - FQL_CONFIG_READ_FAILED
//! - FQL_CONFIG_INVALID
//! - FQL_CONFIG_TABLE_NAME
//! - FQL_CONFIG_STORAGE / FQL_CONFIG_INDEX (opening a configured table)
//!
//! All configuration errors are fatal to the binary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::index::IndexError;
use crate::storage::StorageError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading configuration or opening configured tables
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid
    #[error("invalid config {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },

    /// Table name would escape the data directory
    #[error("invalid table name `{name}`")]
    InvalidTableName { name: String },

    /// Opening a configured table failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Building a configured index failed
    #[error(transparent)]
    Index(#[from] IndexError),
}

impl ConfigError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::ReadFailed { .. } => "FQL_CONFIG_READ_FAILED",
            ConfigError::Invalid { .. } => "FQL_CONFIG_INVALID",
            ConfigError::InvalidTableName { .. } => "FQL_CONFIG_TABLE_NAME",
            ConfigError::Storage(_) => "FQL_CONFIG_STORAGE",
            ConfigError::Index(_) => "FQL_CONFIG_INDEX",
        }
    }
}
