//! Explain plan output
//!
//! Describes how a query would run without reading any row.

use std::fmt;

use serde::Serialize;

use super::criteria::Criteria;
use super::planner::{QueryPlan, SELECT_ALL};

/// Where the executor takes candidate row ids from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateSource {
    /// Every row id, in store order
    FullScan,
    /// The bucket of one column index for a literal value
    IndexLookup {
        /// Indexed column
        column: String,
        /// Literal looked up
        value: serde_json::Value,
    },
}

impl CandidateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateSource::FullScan => "FULL_SCAN",
            CandidateSource::IndexLookup { .. } => "INDEX_LOOKUP",
        }
    }
}

/// One criterion in explain output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainCriterion {
    pub column: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// Explain plan output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainPlan {
    /// Candidate row-id source
    pub source: CandidateSource,
    /// Criteria in evaluation order
    pub criteria: Vec<ExplainCriterion>,
    /// Projected columns (`["*"]` for all)
    pub selected: Vec<String>,
    /// Row limit, if any
    pub limit: Option<i64>,
}

impl ExplainPlan {
    /// Describes `plan` running from `source`
    pub fn new(plan: &QueryPlan, source: CandidateSource) -> Self {
        let criteria = plan
            .criteria()
            .map(Criteria::iter)
            .into_iter()
            .flatten()
            .map(|(column, criterion)| ExplainCriterion {
                column: column.to_string(),
                kind: criterion.kind(),
                value: criterion.as_literal().cloned(),
            })
            .collect();

        let selected = match plan.selected() {
            Some(columns) => columns.to_vec(),
            None => vec![SELECT_ALL.to_string()],
        };

        Self {
            source,
            criteria,
            selected,
            limit: plan.limit(),
        }
    }

    /// Returns true if the query reads an index bucket instead of every row
    pub fn uses_index(&self) -> bool {
        matches!(self.source, CandidateSource::IndexLookup { .. })
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            CandidateSource::FullScan => writeln!(f, "source: FULL_SCAN")?,
            CandidateSource::IndexLookup { column, value } => {
                writeln!(f, "source: INDEX_LOOKUP {} = {}", column, value)?
            }
        }
        for c in &self.criteria {
            match &c.value {
                Some(v) => writeln!(f, "filter: {} {} {}", c.column, c.kind, v)?,
                None => writeln!(f, "filter: {} {}", c.column, c.kind)?,
            }
        }
        writeln!(f, "select: {}", self.selected.join(", "))?;
        match self.limit {
            Some(limit) => write!(f, "limit: {}", limit),
            None => write!(f, "limit: none"),
        }
    }
}
