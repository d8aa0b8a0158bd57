//! Directory-backed row store
//!
//! A table is a directory holding one JSON file per row. Row `7` lives in
//! `0007.json`. Directory entries with any other name are ignored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::index::IndexManager;
use crate::observability::{Event, TableMetrics};

use super::errors::{StorageError, StorageResult};
use super::row::{Row, RowId};
use super::store::RowStore;

/// File extension for row files
const ROW_EXTENSION: &str = "json";

/// Minimum width of the zero-padded id in a row filename
const ID_WIDTH: usize = 4;

/// A table stored as a directory of numbered row files.
#[derive(Debug)]
pub struct Table {
    /// Table directory
    dir: PathBuf,
    /// Per-instance index cache
    indexes: IndexManager,
    /// Read counters
    metrics: TableMetrics,
}

impl Table {
    /// Opens an existing table directory.
    pub fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(StorageError::TableNotFound {
                path: dir.to_path_buf(),
            });
        }

        debug!(
            event = Event::TableOpened.as_str(),
            table = %dir.display(),
            "table opened"
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            indexes: IndexManager::new(),
            metrics: TableMetrics::new(),
        })
    }

    /// Creates the table directory if needed, then opens it.
    pub fn create(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| StorageError::WriteFailed {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::open(dir)
    }

    /// Returns the table directory
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Returns the table name (last path component)
    pub fn name(&self) -> String {
        self.dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Read counters for this instance
    pub fn metrics(&self) -> &TableMetrics {
        &self.metrics
    }

    /// Row filename for an id: `7` -> `0007.json`
    pub fn to_filename(id: RowId) -> String {
        format!("{:0width$}.{}", id, ROW_EXTENSION, width = ID_WIDTH)
    }

    /// Id encoded in a row filename: `0007.json` -> `7`
    ///
    /// Inverse of [`to_filename`](Self::to_filename): any other name, such as
    /// `0007.json.bak` or an unpadded `40.json`, returns `None`.
    pub fn to_id(filename: &str) -> Option<RowId> {
        let digits = filename
            .strip_suffix(ROW_EXTENSION)?
            .strip_suffix('.')?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let id: RowId = digits.parse().ok()?;
        (Self::to_filename(id) == filename).then_some(id)
    }

    fn row_path(&self, id: RowId) -> PathBuf {
        self.dir.join(Self::to_filename(id))
    }

    /// Writes a row to its file, replacing any existing row with the same id.
    ///
    /// Built indexes are not updated.
    pub fn write_row(&self, row: &Row) -> StorageResult<()> {
        let Some(id) = row.id() else {
            return Err(StorageError::WriteFailed {
                path: self.dir.clone(),
                reason: "row has no integer id".into(),
            });
        };

        let path = self.row_path(id);
        let bytes = serde_json::to_vec_pretty(row).map_err(|e| StorageError::WriteFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        fs::write(&path, bytes).map_err(|e| StorageError::WriteFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        self.metrics.increment_rows_written();
        debug!(
            event = Event::RowWritten.as_str(),
            file = %path.display(),
            id,
            "row written"
        );
        Ok(())
    }
}

impl RowStore for Table {
    fn row_ids(&self) -> StorageResult<Vec<RowId>> {
        self.metrics.increment_id_scans();

        let entries = fs::read_dir(&self.dir).map_err(|e| StorageError::ReadFailed {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::ReadFailed {
                path: self.dir.clone(),
                source: e,
            })?;
            let filename = entry.file_name();
            let filename = filename.to_string_lossy();
            match Self::to_id(&filename) {
                Some(id) => ids.push(id),
                None => warn!(
                    event = Event::RowSkipped.as_str(),
                    table = %self.dir.display(),
                    file = %filename,
                    "ignoring entry that is not a row file"
                ),
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }

    fn read(&self, id: RowId) -> StorageResult<Row> {
        self.metrics.increment_rows_read();

        let path = self.row_path(id);
        let bytes = fs::read(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StorageError::RowNotFound {
                    table: self.dir.clone(),
                    id,
                }
            } else {
                StorageError::ReadFailed {
                    path: path.clone(),
                    source: e,
                }
            }
        })?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(object)) => Ok(Row::from_object(object)),
            Ok(other) => Err(StorageError::Malformed {
                path,
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
            Err(e) => Err(StorageError::Malformed {
                path,
                reason: e.to_string(),
            }),
        }
    }

    fn indexes(&self) -> &IndexManager {
        &self.indexes
    }

    fn indexes_mut(&mut self) -> &mut IndexManager {
        &mut self.indexes
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
