//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::executor::QueryError;
use crate::index::IndexError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or a table could not be opened
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Index build requested on the command line failed
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Query execution failed
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Writing to stdout failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Output could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(e) => e.code(),
            CliError::Index(e) => e.code(),
            CliError::Query(e) => e.code(),
            CliError::Io(_) => "FQL_CLI_IO_ERROR",
            CliError::Json(_) => "FQL_CLI_JSON_ERROR",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
