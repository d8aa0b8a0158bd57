//! Row representation
//!
//! A row is an ordered set of named scalar fields plus a unique integer `id`.
//! Each field holds `Option<Value>`: `None` is the missing-value marker that
//! projection produces for a selected column the source row does not have.

use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Number, Value};

/// Row identifier
pub type RowId = u64;

/// Name of the mandatory identifier column
pub const ID_COLUMN: &str = "id";

/// A single record read from a row store.
#[derive(Debug, Clone, Default)]
pub struct Row {
    fields: Vec<(String, Option<Value>)>,
}

impl Row {
    /// Creates an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a row from a JSON object, keeping its key order
    pub fn from_object(object: Map<String, Value>) -> Self {
        Self {
            fields: object.into_iter().map(|(k, v)| (k, Some(v))).collect(),
        }
    }

    /// Builder-style field assignment
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, Some(value.into()));
        self
    }

    /// Sets a field, overwriting an existing one in place.
    ///
    /// `None` records the missing-value marker.
    pub fn set(&mut self, column: impl Into<String>, value: Option<Value>) {
        let column = column.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Returns the value of a column, `None` if absent or marked missing
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.field(column).and_then(Option::as_ref)
    }

    /// Returns the raw field slot for a column
    pub fn field(&self, column: &str) -> Option<&Option<Value>> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Returns true if the row has a field of this name (even a missing marker)
    pub fn contains(&self, column: &str) -> bool {
        self.field(column).is_some()
    }

    /// Returns true if the field exists but carries the missing-value marker
    pub fn is_missing(&self, column: &str) -> bool {
        matches!(self.field(column), Some(None))
    }

    /// Returns the row identifier, if present and a non-negative integer
    pub fn id(&self) -> Option<RowId> {
        self.get(ID_COLUMN).and_then(Value::as_u64)
    }

    /// Column names in field order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over `(column, value)` pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the row has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts to a JSON object. Missing-value markers are omitted.
    pub fn to_json(&self) -> Value {
        let mut object = Map::with_capacity(self.fields.len());
        for (name, value) in &self.fields {
            if let Some(v) = value {
                object.insert(name.clone(), v.clone());
            }
        }
        Value::Object(object)
    }
}

/// Field-set equality: same columns with equal values, in any order.
impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|(name, value)| other.field(name) == Some(value))
    }
}

impl From<Map<String, Value>> for Row {
    fn from(object: Map<String, Value>) -> Self {
        Self::from_object(object)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = self.fields.iter().filter(|(_, v)| v.is_some()).count();
        let mut map = serializer.serialize_map(Some(present))?;
        for (name, value) in &self.fields {
            if let Some(v) = value {
                map.serialize_entry(name, v)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Row::from_object)
    }
}

/// Strict equality between two values.
///
/// Numbers compare numerically whatever their JSON encoding (`7 == 7.0`).
/// Everything else compares structurally with no coercion, so `"1999"`
/// never equals `1999`.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        _ => a == b,
    }
}

/// An integral number never equals a non-integral one, even when both round
/// to the same `f64`. Index keys make the same split.
fn numbers_equal(x: &Number, y: &Number) -> bool {
    match (integral_value(x), integral_value(y)) {
        (Some(i), Some(j)) => i == j,
        (None, None) => match (x.as_f64(), y.as_f64()) {
            (Some(f), Some(g)) => f == g,
            _ => false,
        },
        _ => false,
    }
}

/// Exact integer value of a number, including integral floats in the
/// i64/u64 range.
pub(crate) fn integral_value(n: &Number) -> Option<i128> {
    if let Some(i) = n.as_i64() {
        return Some(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(i128::from(u));
    }
    let f = n.as_f64()?;
    // [-2^63, 2^64)
    const MIN: f64 = -9_223_372_036_854_775_808.0;
    const MAX: f64 = 18_446_744_073_709_551_616.0;
    if f.is_finite() && f.fract() == 0.0 && (MIN..MAX).contains(&f) {
        Some(f as i128)
    } else {
        None
    }
}
