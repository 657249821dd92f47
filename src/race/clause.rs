//! `$or` clause aggregation
//!
//! Each clause of a top-level disjunction is planned and raced independently,
//! with its own candidate set and counters; nothing mutable is shared between
//! clauses. Clauses run in declaration order. The caller-visible result set is
//! deduplicated by record id across clauses, but the per-clause statistics are
//! always the raw values each race produced.
//!
//! Positive and negative limits carry a residual across clauses: a clause is
//! raced with whatever remains of the limit after earlier clauses, and once
//! nothing remains the later clauses are not raced at all (and produce no
//! clause report).

use std::collections::HashSet;

use crate::observability::{Logger, Severity};
use crate::plan::{CandidatePlanner, DocumentStore, RecordId};
use crate::query::{ConjunctionMatcher, Predicate};

use super::errors::{RaceError, RaceResult};
use super::selector::{MatchedDocument, MultiPlanSelector, ResultTarget, SelectorResult};

/// Outcome of racing every clause of a disjunction
#[derive(Debug, Clone)]
pub struct DisjunctionOutcome {
    /// One raw selector result per raced clause, in declaration order
    pub clauses: Vec<SelectorResult>,
    /// Matched documents deduplicated by record id across clauses
    pub documents: Vec<MatchedDocument>,
}

/// Runs one multi-plan selector per `$or` clause and collects the reports
pub struct ClauseAggregator<'a, P: CandidatePlanner, S: DocumentStore> {
    planner: &'a P,
    store: &'a S,
}

impl<'a, P: CandidatePlanner, S: DocumentStore> ClauseAggregator<'a, P, S> {
    pub fn new(planner: &'a P, store: &'a S) -> Self {
        Self { planner, store }
    }

    /// Races every clause and aggregates the outcome.
    ///
    /// Fails before any selector runs when the disjunction has no clauses, and
    /// fails the whole query when any raced clause has no viable plan.
    pub fn run(
        &self,
        clauses: &[Vec<Predicate>],
        target: ResultTarget,
    ) -> RaceResult<DisjunctionOutcome> {
        if clauses.is_empty() {
            return Err(RaceError::EmptyDisjunction);
        }

        let mut seen: HashSet<RecordId> = HashSet::new();
        let mut documents: Vec<MatchedDocument> = Vec::new();
        let mut reports: Vec<SelectorResult> = Vec::new();

        for (idx, clause) in clauses.iter().enumerate() {
            let residual = match target {
                ResultTarget::Exhaustive => ResultTarget::Exhaustive,
                ResultTarget::Limit(limit) => {
                    let remaining = limit.saturating_sub(documents.len() as u64);
                    if remaining == 0 {
                        break;
                    }
                    ResultTarget::Limit(remaining)
                }
                ResultTarget::Batch(cap) => {
                    let remaining = cap.saturating_sub(documents.len() as u64);
                    if remaining == 0 {
                        break;
                    }
                    ResultTarget::Batch(remaining)
                }
            };

            let plans = self.planner.candidates(clause);
            if plans.is_empty() {
                let clause_idx = idx.to_string();
                Logger::log_stderr(
                    Severity::Error,
                    "no_viable_plan",
                    &[
                        ("code", "RACE_NO_VIABLE_PLAN"),
                        ("clause", clause_idx.as_str()),
                    ],
                );
                return Err(RaceError::NoViablePlan(format!(
                    "$or clause {idx} has no candidate plans"
                )));
            }
            let matcher = ConjunctionMatcher::new(clause);
            let result = MultiPlanSelector::new(plans, self.store, &matcher, residual)?.run();

            let clause_idx = idx.to_string();
            let n = result.n.to_string();
            Logger::log(
                Severity::Trace,
                "or_clause_raced",
                &[
                    ("clause", clause_idx.as_str()),
                    ("cursor", result.cursor.as_str()),
                    ("n", n.as_str()),
                ],
            );

            for doc in &result.documents {
                if seen.insert(doc.record) {
                    documents.push(doc.clone());
                }
            }
            reports.push(result);
        }

        Ok(DisjunctionOutcome {
            clauses: reports,
            documents,
        })
    }
}
