//! Query executor for flatquery
//!
//! Runs a query plan against a row store.
//!
//! Execution flow (strict order):
//! 1. Choose candidate row ids: one index bucket, or every row id
//! 2. While the result set is within the limit, read the next candidate
//! 3. Keep the row if it matches the criteria, projected
//! 4. Return rows in candidate order

use std::time::Instant;

use serde_json::Value;
use tracing::debug;

use crate::index::IndexKey;
use crate::observability::Event;
use crate::planner::{CandidateSource, Criteria, ExplainPlan, QueryPlan};
use crate::storage::{Row, RowId, RowStore};

use super::errors::{ExecutorResult, QueryError};
use super::result::ExecutionResult;

/// A query against one row store.
///
/// Configuration calls (`filter`, `select`, `limit`) only record the plan;
/// nothing touches the store until `get`, `count` or `execute` runs.
pub struct Query<'a, S: RowStore + ?Sized> {
    store: &'a S,
    plan: QueryPlan,
}

impl<'a, S: RowStore + ?Sized> Query<'a, S> {
    /// Creates a query with an empty plan
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            plan: QueryPlan::new(),
        }
    }

    /// Creates a query from an existing plan
    pub fn with_plan(store: &'a S, plan: QueryPlan) -> Self {
        Self { store, plan }
    }

    /// Limits the number of returned rows
    pub fn limit(mut self, limit: i64) -> Self {
        self.plan.set_limit(limit);
        self
    }

    /// Projects the given columns; `*` keeps every column
    pub fn select<I, T>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.plan.set_selected(columns);
        self
    }

    /// Filters rows by criteria
    pub fn filter(mut self, criteria: Criteria) -> Self {
        self.plan.set_criteria(criteria);
        self
    }

    /// The accumulated plan
    pub fn plan(&self) -> &QueryPlan {
        &self.plan
    }

    /// Runs the query and returns the matching rows, projected.
    pub fn get(&self) -> ExecutorResult<Vec<Row>> {
        self.execute().map(|result| result.rows)
    }

    /// Number of rows `get` would return. Runs the full query.
    pub fn count(&self) -> ExecutorResult<usize> {
        self.get().map(|rows| rows.len())
    }

    /// Describes how the query would run, without reading any row
    pub fn explain(&self) -> ExplainPlan {
        ExplainPlan::new(&self.plan, self.candidate_source())
    }

    /// Runs the query and returns rows together with scan statistics.
    pub fn execute(&self) -> ExecutorResult<ExecutionResult> {
        let started = Instant::now();
        let source = self.candidate_source();
        let candidates = self.candidate_ids(&source)?;

        debug!(
            event = Event::QueryStart.as_str(),
            source = source.as_str(),
            candidates = candidates.len(),
            "executing query"
        );

        let mut rows = Vec::new();
        let mut scanned_count = 0;

        for id in candidates {
            if !self.plan.within_limit(&rows) {
                break;
            }

            let row = self.store.read(id)?;
            scanned_count += 1;

            let matched = self
                .plan
                .matches_row(&row)
                .map_err(|source| QueryError::Predicate { row: id, source })?;
            if matched {
                rows.push(self.plan.select_columns(row));
            }
        }

        let limit_reached = !self.plan.within_limit(&rows);

        debug!(
            event = Event::QueryComplete.as_str(),
            source = source.as_str(),
            scanned = scanned_count,
            returned = rows.len(),
            limit_reached,
            elapsed_us = started.elapsed().as_micros() as u64,
            "query complete"
        );

        Ok(ExecutionResult {
            rows,
            source,
            scanned_count,
            limit_reached,
        })
    }

    /// Picks where candidate ids come from.
    ///
    /// The first literal criterion (in insertion order) whose column has a
    /// built index and whose value has an index key selects that bucket.
    /// At most one index is used; the full criteria still filter every
    /// candidate. Predicates never use an index.
    fn candidate_source(&self) -> CandidateSource {
        let Some(criteria) = self.plan.criteria() else {
            return CandidateSource::FullScan;
        };

        criteria
            .iter()
            .find_map(|(column, criterion)| {
                let value = criterion.as_literal()?;
                IndexKey::from_json(value)?;
                self.store
                    .has_index(column)
                    .then(|| CandidateSource::IndexLookup {
                        column: column.to_string(),
                        value: value.clone(),
                    })
            })
            .unwrap_or(CandidateSource::FullScan)
    }

    /// Materializes the candidate id sequence for `source`.
    ///
    /// A literal with no bucket yields no candidates; it does not fall back
    /// to a full scan.
    fn candidate_ids(&self, source: &CandidateSource) -> ExecutorResult<Vec<RowId>> {
        match source {
            CandidateSource::FullScan => {
                debug!(event = Event::FullScan.as_str(), "scanning every row id");
                Ok(self.store.row_ids()?)
            }
            CandidateSource::IndexLookup { column, value } => {
                let ids = self.bucket(column, value);
                debug!(
                    event = Event::IndexLookup.as_str(),
                    column = column.as_str(),
                    value = %value,
                    hits = ids.len(),
                    "using column index"
                );
                Ok(ids)
            }
        }
    }

    fn bucket(&self, column: &str, value: &Value) -> Vec<RowId> {
        self.store
            .get_index(column)
            .and_then(|index| index.lookup(value))
            .map(<[RowId]>::to_vec)
            .unwrap_or_default()
    }
}
