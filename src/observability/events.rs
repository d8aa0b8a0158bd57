//! Observability events for flatquery
//!
//! Every structured log line carries one of these names in its `event` field.

use std::fmt;

/// Observable events in flatquery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,
    /// Table opened
    TableOpened,

    // Query operations
    /// Query execution begins
    QueryStart,
    /// Query executed successfully
    QueryComplete,
    /// Query aborted by an error
    QueryFailed,
    /// CLI command finished and wrote its output
    CommandComplete,
    /// Candidates taken from an index bucket
    IndexLookup,
    /// Candidates taken from every row id
    FullScan,

    // Index operations
    /// Index build scan begins
    IndexBuildStart,
    /// Index built and cached
    IndexBuildComplete,

    // Storage
    /// Table entry ignored because its name holds no row id
    RowSkipped,
    /// Row file written
    RowWritten,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::TableOpened => "TABLE_OPENED",

            Event::QueryStart => "QUERY_START",
            Event::QueryComplete => "QUERY_COMPLETE",
            Event::QueryFailed => "QUERY_FAILED",
            Event::CommandComplete => "COMMAND_COMPLETE",
            Event::IndexLookup => "INDEX_LOOKUP",
            Event::FullScan => "FULL_SCAN",

            Event::IndexBuildStart => "INDEX_BUILD_START",
            Event::IndexBuildComplete => "INDEX_BUILD_COMPLETE",

            Event::RowSkipped => "ROW_SKIPPED",
            Event::RowWritten => "ROW_WRITTEN",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
