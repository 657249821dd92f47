//! Explain report assembly
//!
//! A non-`$or` report copies the single selector's result verbatim. A `$or`
//! report attaches one clause report per raced clause, in declaration order,
//! and every top-level numeric field is the sum of that field across the
//! clause reports (a pure fold; addition keeps it order-independent).

use serde::{Deserialize, Serialize};

use crate::race::SelectorResult;

/// Per-clause scan accounting for a `$or` query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseReport {
    pub n: u64,
    pub nscanned: u64,
    #[serde(rename = "nscannedObjects")]
    pub nscanned_objects: u64,
    #[serde(rename = "nscannedAllPlans")]
    pub nscanned_all_plans: u64,
    #[serde(rename = "nscannedObjectsAllPlans")]
    pub nscanned_objects_all_plans: u64,
}

impl From<&SelectorResult> for ClauseReport {
    fn from(result: &SelectorResult) -> Self {
        Self {
            n: result.n,
            nscanned: result.nscanned,
            nscanned_objects: result.nscanned_objects,
            nscanned_all_plans: result.nscanned_all_plans,
            nscanned_objects_all_plans: result.nscanned_objects_all_plans,
        }
    }
}

/// Top-level explain report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainReport {
    /// Winning access-path descriptor; for `$or`, the first clause's winner
    pub cursor: String,
    pub n: u64,
    pub nscanned: u64,
    #[serde(rename = "nscannedObjects")]
    pub nscanned_objects: u64,
    #[serde(rename = "nscannedAllPlans")]
    pub nscanned_all_plans: u64,
    #[serde(rename = "nscannedObjectsAllPlans")]
    pub nscanned_objects_all_plans: u64,
    /// Present only when the query was a top-level `$or`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clauses: Option<Vec<ClauseReport>>,
}

impl ExplainReport {
    /// Report for a non-`$or` query: the selector's result verbatim.
    pub fn from_selector(result: &SelectorResult) -> Self {
        Self {
            cursor: result.cursor.clone(),
            n: result.n,
            nscanned: result.nscanned,
            nscanned_objects: result.nscanned_objects,
            nscanned_all_plans: result.nscanned_all_plans,
            nscanned_objects_all_plans: result.nscanned_objects_all_plans,
            clauses: None,
        }
    }

    /// Report for a `$or` query: clause reports plus their field-wise sums.
    pub fn from_clauses(results: &[SelectorResult]) -> Self {
        let clauses: Vec<ClauseReport> = results.iter().map(ClauseReport::from).collect();
        let cursor = results
            .first()
            .map(|r| r.cursor.clone())
            .unwrap_or_default();
        let mut report = Self {
            cursor,
            n: 0,
            nscanned: 0,
            nscanned_objects: 0,
            nscanned_all_plans: 0,
            nscanned_objects_all_plans: 0,
            clauses: None,
        };
        for clause in &clauses {
            report.n += clause.n;
            report.nscanned += clause.nscanned;
            report.nscanned_objects += clause.nscanned_objects;
            report.nscanned_all_plans += clause.nscanned_all_plans;
            report.nscanned_objects_all_plans += clause.nscanned_objects_all_plans;
        }
        report.clauses = Some(clauses);
        report
    }
}
