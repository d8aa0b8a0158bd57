//! Query plan
//!
//! A plan is pure configuration: criteria, projection and limit. It never
//! executes itself; the executor consumes it.

use crate::storage::Row;

use super::criteria::Criteria;
use super::errors::PlanResult;

/// Selection token meaning "all columns"
pub const SELECT_ALL: &str = "*";

/// Filter, projection and limit for one query.
#[derive(Debug, Clone, Default)]
pub struct QueryPlan {
    criteria: Option<Criteria>,
    selected: Option<Vec<String>>,
    limit: Option<i64>,
}

impl QueryPlan {
    /// Creates a plan that matches every row, keeps every column, unbounded
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the maximum result-set size.
    ///
    /// Any value is accepted; zero or negative limits admit no rows.
    pub fn set_limit(&mut self, limit: i64) {
        self.limit = Some(limit);
    }

    /// Returns the limit, if set
    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    /// True iff no limit is set or `current` holds fewer rows than the limit.
    pub fn within_limit(&self, current: &[Row]) -> bool {
        self.within_limit_count(current.len())
    }

    /// Count-based form of [`within_limit`](Self::within_limit)
    pub fn within_limit_count(&self, count: usize) -> bool {
        match self.limit {
            None => true,
            Some(limit) => i64::try_from(count).is_ok_and(|count| count < limit),
        }
    }

    /// Records the columns to project.
    ///
    /// If `*` is among the names, projection becomes the identity. Otherwise
    /// names are kept verbatim, duplicates and order included.
    pub fn set_selected<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        self.selected = if names.iter().any(|n| n == SELECT_ALL) {
            None
        } else {
            Some(names)
        };
    }

    /// Selected columns, `None` meaning all columns
    pub fn selected(&self) -> Option<&[String]> {
        self.selected.as_deref()
    }

    /// Projects a row onto the selected columns.
    ///
    /// Without a selection the row is returned unchanged. A selected column
    /// the row lacks is kept with the missing-value marker.
    pub fn select_columns(&self, row: Row) -> Row {
        let Some(selected) = &self.selected else {
            return row;
        };

        let mut projected = Row::new();
        for column in selected {
            projected.set(column.clone(), row.get(column).cloned());
        }
        projected
    }

    /// Records the filter criteria verbatim
    pub fn set_criteria(&mut self, criteria: Criteria) {
        self.criteria = Some(criteria);
    }

    /// Criteria, if set
    pub fn criteria(&self) -> Option<&Criteria> {
        self.criteria.as_ref()
    }

    /// True iff no criteria are set or the row satisfies all of them.
    ///
    /// A failing predicate is reported as an error rather than a mismatch.
    pub fn matches_row(&self, row: &Row) -> PlanResult<bool> {
        match &self.criteria {
            None => Ok(true),
            Some(criteria) => criteria.matches(row),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::PredicateError;
    use serde_json::{json, Value};

    fn rows(n: usize) -> Vec<Row> {
        vec![Row::new(); n]
    }

    #[test]
    fn test_within_limit_without_limit() {
        let plan = QueryPlan::new();
        assert!(plan.within_limit(&[]));
        assert!(plan.within_limit(&rows(731)));
        assert!(plan.within_limit_count(usize::MAX));
    }

    #[test]
    fn test_within_limit() {
        let mut plan = QueryPlan::new();
        plan.set_limit(14);
        assert!(plan.within_limit(&[]));
        assert!(plan.within_limit(&rows(13)));
        assert!(!plan.within_limit(&rows(14)));
        assert!(!plan.within_limit_count(76213));
    }

    #[test]
    fn test_non_positive_limit_admits_nothing() {
        let mut plan = QueryPlan::new();
        plan.set_limit(0);
        assert!(!plan.within_limit(&[]));
        plan.set_limit(-3);
        assert!(!plan.within_limit(&[]));
    }

    #[test]
    fn test_select_columns_identity_without_selection() {
        let plan = QueryPlan::new();
        let row = Row::new().with("type", "Tomatoe").with("price", 1000);
        assert_eq!(plan.select_columns(row.clone()), row);
        assert_eq!(plan.select_columns(Row::new()), Row::new());
    }

    #[test]
    fn test_select_columns_narrows_row() {
        let mut plan_a = QueryPlan::new();
        plan_a.set_selected(["type"]);
        let row = Row::new().with("type", "Tomatoe").with("price", 1000);
        assert_eq!(plan_a.select_columns(row), Row::new().with("type", "Tomatoe"));

        let mut plan_b = QueryPlan::new();
        plan_b.set_selected(["language", "title"]);
        let row = Row::new()
            .with("title", "The Road")
            .with("author", "Cormac McCarthy")
            .with("language", "English")
            .with("rating", 9.1);
        let projected = plan_b.select_columns(row);
        assert_eq!(projected, Row::new().with("language", "English").with("title", "The Road"));
        assert_eq!(projected.columns().collect::<Vec<_>>(), vec!["language", "title"]);
    }

    #[test]
    fn test_select_star_is_identity() {
        let mut plan = QueryPlan::new();
        plan.set_selected(["name", "*"]);
        assert!(plan.selected().is_none());
        let row = Row::new().with("id", 1).with("name", "Animal House");
        assert_eq!(plan.select_columns(row.clone()), row);
    }

    #[test]
    fn test_select_missing_column_keeps_marker() {
        let mut plan = QueryPlan::new();
        plan.set_selected(["name", "director"]);
        let projected = plan.select_columns(Row::new().with("name", "Pi"));
        assert_eq!(projected.len(), 2);
        assert!(projected.is_missing("director"));
    }

    #[test]
    fn test_select_duplicates_recorded_verbatim() {
        let mut plan = QueryPlan::new();
        plan.set_selected(["year", "name", "year"]);
        assert_eq!(plan.selected().unwrap(), ["year", "name", "year"]);
        let projected = plan.select_columns(Row::new().with("name", "Pi").with("year", 1998));
        assert_eq!(projected.columns().collect::<Vec<_>>(), vec!["year", "name"]);
    }

    #[test]
    fn test_matches_row_without_criteria() {
        let plan = QueryPlan::new();
        assert!(plan.matches_row(&Row::new().with("a", 123)).unwrap());
        assert!(plan.matches_row(&Row::new()).unwrap());
        assert!(plan
            .matches_row(&Row::new().with("x", Value::Null).with("y", Value::Null))
            .unwrap());
    }

    #[test]
    fn test_matches_row_literal() {
        let mut plan = QueryPlan::new();
        plan.set_criteria(Criteria::new().eq("color", "yellow"));
        assert!(plan.matches_row(&Row::new().with("color", "yellow")).unwrap());
        assert!(!plan.matches_row(&Row::new().with("color", "green")).unwrap());
        assert!(!plan
            .matches_row(&Row::new().with("color", "purple").with("otherThing", "whocares"))
            .unwrap());
        assert!(plan
            .matches_row(&Row::new().with("color", "yellow").with("otherThing", "whocares"))
            .unwrap());
    }

    #[test]
    fn test_matches_row_multiple_columns() {
        let mut plan = QueryPlan::new();
        plan.set_criteria(Criteria::new().eq("style", "Jazz").eq("year", 1915));
        let song = |style: &str, year: i64| Row::new().with("style", style).with("year", year);

        assert!(plan.matches_row(&song("Jazz", 1915)).unwrap());
        assert!(!plan
            .matches_row(&song("Ragtime", 1899).with("title", "Maple Leaf Rag"))
            .unwrap());
        assert!(!plan.matches_row(&song("Jazz", 1899)).unwrap());
        assert!(!plan.matches_row(&song("Ragtime", 1915)).unwrap());
        assert!(plan
            .matches_row(&song("Jazz", 1915).with("title", "Jelly Roll Blues"))
            .unwrap());
    }

    #[test]
    fn test_matches_row_predicate_verbatim() {
        let mut plan = QueryPlan::new();
        plan.set_criteria(Criteria::new().matching("year", |v| {
            v.and_then(Value::as_i64).is_some_and(|year| year < 2000)
        }));
        assert!(plan.matches_row(&Row::new().with("year", 1999)).unwrap());
        assert!(!plan.matches_row(&Row::new().with("year", 2000)).unwrap());
        assert!(!plan.matches_row(&Row::new()).unwrap());
    }

    #[test]
    fn test_matches_row_predicate_error() {
        let mut plan = QueryPlan::new();
        plan.set_criteria(Criteria::new().try_matching("name", |v| match v {
            Some(Value::String(s)) => Ok(!s.is_empty()),
            _ => Err(PredicateError::new("name is not a string")),
        }));
        let err = plan.matches_row(&Row::new().with("name", json!(3))).unwrap_err();
        assert_eq!(err.message(), "name is not a string");
    }
}
