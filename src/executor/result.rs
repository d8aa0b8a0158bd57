//! Result types for query execution

use serde_json::Value;

use crate::planner::CandidateSource;
use crate::storage::Row;

/// Result of query execution
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Matching rows, projected, in candidate order
    pub rows: Vec<Row>,
    /// Where candidate ids came from
    pub source: CandidateSource,
    /// Number of rows read from the store
    pub scanned_count: usize,
    /// Whether the limit stopped the scan
    pub limit_reached: bool,
}

impl ExecutionResult {
    /// Returns true if no rows matched
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of results
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Rows as JSON objects; missing projected columns are omitted
    pub fn to_json(&self) -> Vec<Value> {
        self.rows.iter().map(Row::to_json).collect()
    }
}
