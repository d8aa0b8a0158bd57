//! CLI argument definitions using clap
//!
//! Commands:
//! - fql query --table <name> [--where col=value]... [--select col]... [--limit n] [--index col]...
//! - fql explain (same arguments as query)
//! - fql index --table <name> --column <col>

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

/// fql - query a directory of JSON rows
#[derive(Parser, Debug)]
#[command(name = "fql")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a query and print matching rows as JSON lines
    Query(QueryArgs),

    /// Describe how a query would run without reading rows
    Explain(QueryArgs),

    /// Build an index and print its buckets
    Index {
        /// Table name under the data directory
        #[arg(long)]
        table: String,

        /// Column to index
        #[arg(long)]
        column: String,
    },
}

/// Arguments shared by `query` and `explain`
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Table name under the data directory
    #[arg(long)]
    pub table: String,

    /// Equality criterion `col=value`; value is JSON if it parses, else a string
    #[arg(long = "where", value_name = "COL=VALUE", value_parser = parse_where)]
    pub filters: Vec<WhereClause>,

    /// Column to project (repeatable); `*` keeps every column
    #[arg(long = "select", value_name = "COL")]
    pub columns: Vec<String>,

    /// Maximum number of rows
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Column to index before running (repeatable)
    #[arg(long = "index", value_name = "COL")]
    pub indexes: Vec<String>,
}

/// One `--where` argument
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub column: String,
    pub value: Value,
}

/// Parses `col=value`, splitting at the first `=`.
pub fn parse_where(arg: &str) -> Result<WhereClause, String> {
    let (column, raw) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected COL=VALUE, got `{}`", arg))?;
    if column.is_empty() {
        return Err(format!("missing column name in `{}`", arg));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok(WhereClause {
        column: column.to_string(),
        value,
    })
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_where_json_values() {
        assert_eq!(parse_where("year=1999").unwrap().value, json!(1999));
        assert_eq!(parse_where("rank=7.5").unwrap().value, json!(7.5));
        assert_eq!(parse_where("rank=null").unwrap().value, json!(null));
        assert_eq!(parse_where("name=\"1999\"").unwrap().value, json!("1999"));
    }

    #[test]
    fn test_parse_where_falls_back_to_string() {
        let clause = parse_where("name=Kill Bill: Vol. 1").unwrap();
        assert_eq!(clause.column, "name");
        assert_eq!(clause.value, json!("Kill Bill: Vol. 1"));

        assert_eq!(parse_where("expr=a=b").unwrap().value, json!("a=b"));
    }

    #[test]
    fn test_parse_where_rejects_bad_input() {
        assert!(parse_where("year").is_err());
        assert!(parse_where("=1999").is_err());
    }

    #[test]
    fn test_parse_query_command() {
        let cli = Cli::try_parse_from([
            "fql", "query", "--table", "movies", "--where", "year=1999", "--select", "name",
            "--select", "rank", "--limit", "2", "--index", "year",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        match cli.command {
            Command::Query(args) => {
                assert_eq!(args.table, "movies");
                assert_eq!(args.filters.len(), 1);
                assert_eq!(args.columns, vec!["name", "rank"]);
                assert_eq!(args.limit, Some(2));
                assert_eq!(args.indexes, vec!["year"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_index_command() {
        let cli = Cli::try_parse_from([
            "fql", "--config", "/etc/fql.json", "index", "--table", "movies", "--column", "year",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/fql.json"));
        assert!(matches!(cli.command, Command::Index { .. }));
    }
}
