//! Filter criteria
//!
//! Each criterion is either a literal (strict equality) or a predicate over
//! the column's value. Criteria keep the order their columns were first set.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::storage::{strict_eq, Row};

use super::errors::PredicateError;

/// Signature of a predicate criterion.
///
/// The argument is `None` when the row has no value for the column.
pub type PredicateFn = dyn Fn(Option<&Value>) -> Result<bool, PredicateError> + Send + Sync;

/// A single column condition
#[derive(Clone)]
pub enum Criterion {
    /// Row value must be strictly equal to this literal
    Literal(Value),
    /// Row value is passed to the function, whose answer is used verbatim
    Predicate(Arc<PredicateFn>),
}

impl Criterion {
    /// Equality criterion
    pub fn literal(value: impl Into<Value>) -> Self {
        Criterion::Literal(value.into())
    }

    /// Infallible predicate criterion
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Criterion::Predicate(Arc::new(move |value| Ok(f(value))))
    }

    /// Fallible predicate criterion. An error aborts the query.
    pub fn try_predicate<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        Criterion::Predicate(Arc::new(f))
    }

    /// Returns the literal value, if this is an equality criterion
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Criterion::Literal(value) => Some(value),
            Criterion::Predicate(_) => None,
        }
    }

    /// Kind name for explain output
    pub fn kind(&self) -> &'static str {
        match self {
            Criterion::Literal(_) => "literal",
            Criterion::Predicate(_) => "predicate",
        }
    }

    /// Tests a column value against this criterion
    pub fn test(&self, value: Option<&Value>) -> Result<bool, PredicateError> {
        match self {
            Criterion::Literal(expected) => Ok(value.is_some_and(|v| strict_eq(v, expected))),
            Criterion::Predicate(f) => f(value),
        }
    }
}

impl fmt::Debug for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Criterion::Predicate(_) => f.write_str("Predicate(<fn>)"),
        }
    }
}

impl From<Value> for Criterion {
    fn from(value: Value) -> Self {
        Criterion::Literal(value)
    }
}

/// Column -> criterion map, in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    entries: Vec<(String, Criterion)>,
}

impl Criteria {
    /// Creates empty criteria
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the criterion for `column`, replacing an earlier one in place
    pub fn set(&mut self, column: impl Into<String>, criterion: Criterion) {
        let column = column.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = criterion,
            None => self.entries.push((column, criterion)),
        }
    }

    /// Adds an equality criterion
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, Criterion::literal(value));
        self
    }

    /// Adds a predicate criterion
    pub fn matching<F>(mut self, column: impl Into<String>, f: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        self.set(column, Criterion::predicate(f));
        self
    }

    /// Adds a fallible predicate criterion
    pub fn try_matching<F>(mut self, column: impl Into<String>, f: F) -> Self
    where
        F: Fn(Option<&Value>) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        self.set(column, Criterion::try_predicate(f));
        self
    }

    /// Returns the criterion for `column`
    pub fn get(&self, column: &str) -> Option<&Criterion> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, c)| c)
    }

    /// Iterates over `(column, criterion)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Criterion)> {
        self.entries.iter().map(|(name, c)| (name.as_str(), c))
    }

    /// Number of constrained columns
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no column is constrained
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// AND of every criterion, stopping at the first failing column.
    pub fn matches(&self, row: &Row) -> Result<bool, PredicateError> {
        for (column, criterion) in &self.entries {
            let matched = criterion
                .test(row.get(column))
                .map_err(|e| e.for_column(column.as_str()))?;
            if !matched {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<K: Into<String>> FromIterator<(K, Criterion)> for Criteria {
    fn from_iter<I: IntoIterator<Item = (K, Criterion)>>(iter: I) -> Self {
        let mut criteria = Criteria::new();
        for (column, criterion) in iter {
            criteria.set(column, criterion);
        }
        criteria
    }
}
