//! Planner error types
//!
//! Plan configuration is never validated, so the only error a plan can raise
//! is a predicate criterion refusing a value.

use std::fmt;

/// Failure reported by a predicate criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateError {
    message: String,
    column: Option<String>,
}

impl PredicateError {
    /// Creates a predicate error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            column: None,
        }
    }

    /// Attaches the column whose criterion failed
    pub fn for_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the column, once known
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }
}

impl fmt::Display for PredicateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.column {
            Some(column) => write!(f, "criterion on `{}`: {}", column, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for PredicateError {}

/// Result type for plan evaluation
pub type PlanResult<T> = Result<T, PredicateError>;
