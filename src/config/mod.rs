//! Engine configuration
//!
//! Loaded from a JSON file:
//!
//! ```json
//! {
//!   "data_dir": "./data",
//!   "indexes": { "movies": ["year"] },
//!   "log_format": "text"
//! }
//! ```
//!
//! Only `data_dir` is required.

mod errors;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::observability::{Event, LogFormat};
use crate::storage::{RowStore, Table};

pub use errors::{ConfigError, ConfigResult};

/// Default config file location
pub const DEFAULT_CONFIG_PATH: &str = "./fql.json";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Directory holding one subdirectory per table (required)
    pub data_dir: PathBuf,

    /// Table name -> columns indexed when the table is opened
    #[serde(default)]
    pub indexes: BTreeMap<String, Vec<String>>,

    /// Log line format (default "text")
    #[serde(default)]
    pub log_format: LogFormat,
}

impl EngineConfig {
    /// Config with defaults for everything but the data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            indexes: BTreeMap::new(),
            log_format: LogFormat::default(),
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: EngineConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Invalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        config.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.data_dir.as_os_str().is_empty() {
            return Err("data_dir must not be empty".into());
        }

        for (table, columns) in &self.indexes {
            if !is_plain_name(table) {
                return Err(format!("invalid table name `{}` in indexes", table));
            }
            if columns.iter().any(String::is_empty) {
                return Err(format!("empty column name in indexes for `{}`", table));
            }
        }

        Ok(())
    }

    /// Directory of table `name`
    pub fn table_path(&self, name: &str) -> ConfigResult<PathBuf> {
        if !is_plain_name(name) {
            return Err(ConfigError::InvalidTableName {
                name: name.to_string(),
            });
        }
        Ok(self.data_dir.join(name))
    }

    /// Columns configured for indexing on `table`
    pub fn indexed_columns(&self, table: &str) -> &[String] {
        self.indexes.get(table).map(Vec::as_slice).unwrap_or_default()
    }

    /// Opens table `name` and builds its configured indexes.
    pub fn open_table(&self, name: &str) -> ConfigResult<Table> {
        let mut table = Table::open(self.table_path(name)?)?;
        for column in self.indexed_columns(name) {
            table.add_index(column)?;
        }

        info!(
            event = Event::TableOpened.as_str(),
            table = name,
            indexes = ?table.indexes().indexed_columns(),
            "table ready"
        );
        Ok(table)
    }
}

/// A single normal path component: no separators, no `.` or `..`
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
