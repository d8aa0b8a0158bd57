//! CLI module for flatquery
//!
//! Provides the `fql` command-line interface:
//! - query: run a query and print rows as JSON lines
//! - explain: describe how a query would run
//! - index: build a column index and print its buckets

mod args;
mod commands;
mod errors;
mod io;

pub use args::{parse_where, Cli, Command, QueryArgs, WhereClause};
pub use commands::{explain, index, query, run, run_command};
pub use errors::{CliError, CliResult};
pub use io::{write_json, write_rows};
