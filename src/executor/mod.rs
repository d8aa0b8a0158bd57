//! Query executor subsystem for flatquery
//!
//! The executor consumes a plan and reads rows from a store.
//!
//! # Execution Flow (strict order)
//!
//! 1. Pick candidate ids: an index bucket for the first indexed literal, or
//!    every row id
//! 2. Stop once the result set holds `limit` rows
//! 3. Read the candidate
//! 4. Filter by the full criteria
//! 5. Project and append
//!
//! Any storage or predicate error aborts the query.

mod errors;
mod executor;
mod result;

pub use errors::{ExecutorResult, QueryError};
pub use executor::Query;
pub use result::ExecutionResult;
