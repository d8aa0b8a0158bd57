//! flatquery - a minimal embedded query engine over a flat-file row store
//!
//! Queries are built fluently, optionally narrowed by an in-memory column
//! index, and executed by scanning rows one at a time.
//!
//! ```ignore
//! use flatquery::planner::Criteria;
//! use flatquery::storage::{RowStore, Table};
//! use flatquery::executor::Query;
//!
//! let mut movies = Table::open("data/movies")?;
//! movies.add_index("year")?;
//! let rows = Query::new(&movies)
//!     .filter(Criteria::new().eq("year", 1999))
//!     .select(["name"])
//!     .limit(2)
//!     .get()?;
//! ```

pub mod cli;
pub mod config;
pub mod executor;
pub mod index;
pub mod observability;
pub mod planner;
pub mod storage;
