//! Query-level driver over the race machinery
//!
//! Ties the planner and storage collaborators to the selector and clause
//! aggregator. `find` returns the matched documents; `explain` runs the same
//! race and returns the scan-accounting report instead.

use crate::explain::ExplainReport;
use crate::observability::{Logger, Severity};
use crate::plan::{CandidatePlanner, DocumentStore};
use crate::query::{ConjunctionMatcher, Predicate, QueryShape};

use super::clause::ClauseAggregator;
use super::errors::{RaceError, RaceResult};
use super::selector::{MatchedDocument, MultiPlanSelector, ResultTarget, SelectorResult};

/// Executes queries by racing candidate plans
pub struct RaceExecutor<'a, P: CandidatePlanner, S: DocumentStore> {
    planner: &'a P,
    store: &'a S,
}

impl<'a, P: CandidatePlanner, S: DocumentStore> RaceExecutor<'a, P, S> {
    pub fn new(planner: &'a P, store: &'a S) -> Self {
        Self { planner, store }
    }

    /// Runs the query and returns the matched documents.
    ///
    /// For `$or` queries the result set is deduplicated by record id across
    /// clauses.
    pub fn find(
        &self,
        query: &QueryShape,
        target: ResultTarget,
    ) -> RaceResult<Vec<MatchedDocument>> {
        match query {
            QueryShape::Conjunction(clause) => {
                Ok(self.race_clause(clause, target)?.documents)
            }
            QueryShape::Disjunction(clauses) => {
                let outcome = ClauseAggregator::new(self.planner, self.store)
                    .run(clauses, target)?;
                Ok(outcome.documents)
            }
        }
    }

    /// Runs the query and returns the explain report.
    pub fn explain(&self, query: &QueryShape, target: ResultTarget) -> RaceResult<ExplainReport> {
        match query {
            QueryShape::Conjunction(clause) => {
                let result = self.race_clause(clause, target)?;
                Ok(ExplainReport::from_selector(&result))
            }
            QueryShape::Disjunction(clauses) => {
                let outcome = ClauseAggregator::new(self.planner, self.store)
                    .run(clauses, target)?;
                Ok(ExplainReport::from_clauses(&outcome.clauses))
            }
        }
    }

    fn race_clause(
        &self,
        clause: &[Predicate],
        target: ResultTarget,
    ) -> RaceResult<SelectorResult> {
        let plans = self.planner.candidates(clause);
        if plans.is_empty() {
            Logger::log_stderr(
                Severity::Error,
                "no_viable_plan",
                &[("code", "RACE_NO_VIABLE_PLAN")],
            );
            return Err(RaceError::NoViablePlan(
                "planner enumerated no candidate plans".to_string(),
            ));
        }
        let matcher = ConjunctionMatcher::new(clause);
        Ok(MultiPlanSelector::new(plans, self.store, &matcher, target)?.run())
    }
}
