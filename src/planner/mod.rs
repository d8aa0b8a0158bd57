//! Query plan subsystem for flatquery
//!
//! A plan accumulates filter criteria, projected columns and a row limit.
//! It holds configuration only; the executor decides how to run it.
//!
//! # Semantics
//!
//! - No criteria: every row matches
//! - Literal criteria use strict equality; predicates are used verbatim
//! - Multiple criteria are AND-ed
//! - No selection (or `*`): rows are returned unchanged
//! - No limit: unbounded; otherwise fewer than `limit` rows admit one more

mod criteria;
mod errors;
mod explain;
mod planner;

pub use criteria::{Criteria, Criterion, PredicateFn};
pub use errors::{PlanResult, PredicateError};
pub use explain::{CandidateSource, ExplainCriterion, ExplainPlan};
pub use planner::{QueryPlan, SELECT_ALL};
