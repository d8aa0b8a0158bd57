//! BTreeMap-backed column index
//!
//! A column index maps each distinct value of one column to the row ids that
//! held it at build time. Buckets keep ids in row-enumeration order.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::storage::{integral_value, RowId};

/// Index key representing a scalar column value.
///
/// Ordering is deterministic: Null < Bool < Int < Float < String.
/// Two values that are strictly equal always produce the same key, so a
/// bucket lookup never misses a row the full scan would match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexKey {
    /// JSON null
    Null,
    /// Boolean value (false < true)
    Bool(bool),
    /// Any integral number, including integral floats such as `7.0`
    Int(i128),
    /// Non-integral float (stored as order-preserving bits)
    Float(u64),
    /// String value
    String(String),
}

impl IndexKey {
    /// Create a key from a non-integral float
    ///
    /// Uses bit representation for total ordering.
    pub fn from_float(v: f64) -> Self {
        let bits = v.to_bits();
        let ordered = if (bits >> 63) == 1 {
            !bits
        } else {
            bits ^ (1 << 63)
        };
        IndexKey::Float(ordered)
    }

    /// Create a key from a JSON value.
    ///
    /// Arrays and objects have no key.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(IndexKey::Null),
            Value::Bool(b) => Some(IndexKey::Bool(*b)),
            Value::Number(n) => match integral_value(n) {
                Some(i) => Some(IndexKey::Int(i)),
                None => n.as_f64().map(IndexKey::from_float),
            },
            Value::String(s) => Some(IndexKey::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Converts the key back to a JSON value
    pub fn to_json(&self) -> Value {
        match self {
            IndexKey::Null => Value::Null,
            IndexKey::Bool(b) => Value::Bool(*b),
            IndexKey::Int(i) => {
                if let Ok(v) = i64::try_from(*i) {
                    Value::from(v)
                } else if let Ok(v) = u64::try_from(*i) {
                    Value::from(v)
                } else {
                    Value::Null
                }
            }
            IndexKey::Float(ordered) => {
                let bits = if (ordered >> 63) == 1 {
                    ordered ^ (1 << 63)
                } else {
                    !ordered
                };
                Value::from(f64::from_bits(bits))
            }
            IndexKey::String(s) => Value::String(s.clone()),
        }
    }
}

/// Index over one column: value -> row ids in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    column: String,
    buckets: BTreeMap<IndexKey, Vec<RowId>>,
}

impl ColumnIndex {
    /// Creates an empty index for `column`
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            buckets: BTreeMap::new(),
        }
    }

    /// Indexed column name
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Appends a row id to the bucket for `key`, creating it on first sight.
    pub fn insert(&mut self, key: IndexKey, id: RowId) {
        self.buckets.entry(key).or_default().push(id);
    }

    /// Row ids recorded for `key`, `None` if the value was never seen
    pub fn bucket(&self, key: &IndexKey) -> Option<&[RowId]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Row ids recorded for a JSON value
    pub fn lookup(&self, value: &Value) -> Option<&[RowId]> {
        IndexKey::from_json(value).and_then(|key| self.bucket(&key))
    }

    /// Iterates over `(key, ids)` in key order
    pub fn iter(&self) -> impl Iterator<Item = (&IndexKey, &[RowId])> {
        self.buckets.iter().map(|(k, ids)| (k, ids.as_slice()))
    }

    /// Returns the number of distinct keys
    pub fn key_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the total number of indexed row ids
    pub fn id_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// JSON rendering: `{"<value>": [ids...]}` in key order
    pub fn to_json(&self) -> Value {
        let mut object = serde_json::Map::new();
        for (key, ids) in &self.buckets {
            let name = match key.to_json() {
                Value::String(s) => s,
                other => other.to_string(),
            };
            object.insert(name, Value::from(ids.clone()));
        }
        Value::Object(object)
    }
}
