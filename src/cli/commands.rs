//! CLI command implementations
//!
//! Every command loads the config, opens one table with its configured
//! indexes, and writes JSON to stdout.

use std::io::{self, Write};

use tracing::{error, info};

use crate::config::EngineConfig;
use crate::executor::Query;
use crate::observability::{init_logging, Event};
use crate::planner::Criteria;
use crate::storage::{RowStore, Table};

use super::args::{Cli, Command, QueryArgs};
use super::errors::CliResult;
use super::io::{write_json, write_rows};

/// Main entry point for the CLI
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = EngineConfig::load(&cli.config)?;
    init_logging(config.log_format);

    info!(
        event = Event::ConfigLoaded.as_str(),
        path = %cli.config.display(),
        data_dir = %config.data_dir.display(),
        "configuration loaded"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(&config, &cli.command, &mut out)
}

/// Run the appropriate command, writing its output to `out`
pub fn run_command<W: Write>(config: &EngineConfig, cmd: &Command, out: &mut W) -> CliResult<()> {
    match cmd {
        Command::Query(args) => query(config, args, out),
        Command::Explain(args) => explain(config, args, out),
        Command::Index { table, column } => index(config, table, column, out),
    }
}

/// Run a query and print the matching rows
pub fn query<W: Write>(config: &EngineConfig, args: &QueryArgs, out: &mut W) -> CliResult<()> {
    let table = open_with_indexes(config, args)?;
    let result = build_query(&table, args).execute().map_err(|e| {
        error!(
            event = Event::QueryFailed.as_str(),
            table = args.table.as_str(),
            code = e.code(),
            error = %e,
            "query failed"
        );
        e
    })?;

    info!(
        event = Event::CommandComplete.as_str(),
        command = "query",
        table = args.table.as_str(),
        source = result.source.as_str(),
        scanned = result.scanned_count,
        returned = result.len(),
        "command complete"
    );

    write_rows(out, &result.rows)
}

/// Print how a query would run
pub fn explain<W: Write>(config: &EngineConfig, args: &QueryArgs, out: &mut W) -> CliResult<()> {
    let table = open_with_indexes(config, args)?;
    let plan = build_query(&table, args).explain();
    write_json(out, &plan)
}

/// Build one index and print its buckets
pub fn index<W: Write>(
    config: &EngineConfig,
    table: &str,
    column: &str,
    out: &mut W,
) -> CliResult<()> {
    let mut table = config.open_table(table)?;
    let index = table.add_index(column)?;
    write_json(out, &index.to_json())
}

fn open_with_indexes(config: &EngineConfig, args: &QueryArgs) -> CliResult<Table> {
    let mut table = config.open_table(&args.table)?;
    for column in &args.indexes {
        table.add_index(column)?;
    }
    Ok(table)
}

fn build_query<'a>(table: &'a Table, args: &QueryArgs) -> Query<'a, Table> {
    let mut query = Query::new(table);

    if !args.filters.is_empty() {
        let criteria = args
            .filters
            .iter()
            .fold(Criteria::new(), |c, w| c.eq(w.column.as_str(), w.value.clone()));
        query = query.filter(criteria);
    }
    if !args.columns.is_empty() {
        query = query.select(args.columns.iter().map(String::as_str));
    }
    if let Some(limit) = args.limit {
        query = query.limit(limit);
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::parse_where;
    use crate::storage::Row;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn fixture() -> (TempDir, EngineConfig) {
        let dir = TempDir::new().unwrap();
        let table = Table::create(dir.path().join("movies")).unwrap();
        for (id, name, year) in [
            (0, "Aliens", 1986),
            (7, "Fight Club", 1999),
            (17, "Matrix, The", 1999),
            (23, "Pi", 1998),
        ] {
            table
                .write_row(&Row::new().with("id", id).with("name", name).with("year", year))
                .unwrap();
        }
        let config = EngineConfig::new(dir.path());
        (dir, config)
    }

    fn args(filters: &[&str], columns: &[&str], limit: Option<i64>, indexes: &[&str]) -> QueryArgs {
        QueryArgs {
            table: "movies".into(),
            filters: filters.iter().map(|f| parse_where(f).unwrap()).collect(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            limit,
            indexes: indexes.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn lines(out: Vec<u8>) -> Vec<Value> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_query_prints_json_lines() {
        let (_dir, config) = fixture();
        let mut out = Vec::new();
        query(&config, &args(&["year=1999"], &["name"], None, &[]), &mut out).unwrap();

        assert_eq!(
            lines(out),
            vec![json!({"name": "Fight Club"}), json!({"name": "Matrix, The"})]
        );
    }

    #[test]
    fn test_query_with_limit_and_index() {
        let (_dir, config) = fixture();
        let mut out = Vec::new();
        query(&config, &args(&["year=1999"], &["id"], Some(1), &["year"]), &mut out).unwrap();
        assert_eq!(lines(out), vec![json!({"id": 7})]);
    }

    #[test]
    fn test_explain_reports_index() {
        let (_dir, config) = fixture();
        let mut out = Vec::new();
        explain(&config, &args(&["year=1999"], &[], None, &["year"]), &mut out).unwrap();

        let plan: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(plan["source"]["type"], "INDEX_LOOKUP");
        assert_eq!(plan["selected"], json!(["*"]));
    }

    #[test]
    fn test_index_prints_buckets() {
        let (_dir, config) = fixture();
        let mut out = Vec::new();
        index(&config, "movies", "year", &mut out).unwrap();

        let buckets: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(buckets, json!({"1986": [0], "1998": [23], "1999": [7, 17]}));
    }

    /// Shared in-memory log sink
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_query_completion_logged_once() {
        let (_dir, config) = fixture();
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let mut out = Vec::new();
        tracing::subscriber::with_default(subscriber, || {
            query(&config, &args(&["year=1999"], &[], None, &[]), &mut out).unwrap();
        });

        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text.matches("QUERY_COMPLETE").count(), 1);
        assert_eq!(text.matches("COMMAND_COMPLETE").count(), 1);
    }

    #[test]
    fn test_unknown_table_fails() {
        let (_dir, config) = fixture();
        let mut out = Vec::new();
        let cmd = Command::Index {
            table: "shows".into(),
            column: "year".into(),
        };
        let err = run_command(&config, &cmd, &mut out).unwrap_err();
        assert_eq!(err.code(), "FQL_CONFIG_STORAGE");
        assert!(out.is_empty());
    }
}
