//! Multi-plan selector: races candidate plans and picks a winner
//!
//! All still-racing runners are advanced round-robin in candidate order, a
//! bounded number of steps each per round, so no plan can starve another.
//! Matches feed a result stream deduplicated by record id across plans; under
//! a positive limit the stream never grows past the limit, whichever plan
//! produced the excess. The race concludes when:
//!
//! - a runner exhausts its scan (it has proven completion and wins), or
//! - under a positive limit, a runner's own match count reaches the limit
//!   (that runner wins), or
//! - under a negative limit, the result stream reaches the batch cap (the
//!   runner with the most matches wins, ties to the earliest candidate), or
//! - no runner can advance (most matches wins, ties to the earliest).
//!
//! Choosing a winner freezes the race: losing runners are abandoned on the
//! spot and their counters stop growing. The winner's counters become
//! `nscanned`/`nscannedObjects`; the AllPlans variants sum every candidate's
//! counters as of the moment the race concluded.

use std::collections::HashSet;

use serde_json::Value;

use crate::observability::{Logger, Severity};
use crate::plan::{CandidatePlan, DocumentStore, PlanRunner, PlanStep, RecordId};
use crate::query::Matcher;

use super::errors::{RaceError, RaceResult};

/// How many results the caller asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTarget {
    /// No limit; run until a plan proves completion
    Exhaustive,
    /// Positive limit: stop once one plan alone has produced this many matches
    Limit(u64),
    /// Negative limit: hard batch cap on results returned, whichever plans
    /// produce them
    Batch(u64),
}

impl ResultTarget {
    /// Maps a caller-supplied limit to a target; zero means no limit.
    pub fn from_limit(limit: i64) -> Self {
        match limit {
            0 => ResultTarget::Exhaustive,
            l if l > 0 => ResultTarget::Limit(l as u64),
            l => ResultTarget::Batch(l.unsigned_abs()),
        }
    }
}

/// A document returned by the race
#[derive(Debug, Clone)]
pub struct MatchedDocument {
    pub record: RecordId,
    pub body: Value,
}

/// Outcome of one selector's race
#[derive(Debug, Clone)]
pub struct SelectorResult {
    /// Winning access-path descriptor
    pub cursor: String,
    /// Matching results returned to the caller
    pub n: u64,
    /// Winner's keys examined
    pub nscanned: u64,
    /// Winner's documents fetched
    pub nscanned_objects: u64,
    /// Keys examined summed over every candidate plan
    pub nscanned_all_plans: u64,
    /// Documents fetched summed over every candidate plan
    pub nscanned_objects_all_plans: u64,
    /// The matched documents, deduplicated by record id within this race
    pub documents: Vec<MatchedDocument>,
}

/// Owns the plan runners for one clause and races them to a winner
pub struct MultiPlanSelector<'a, S: DocumentStore, M: Matcher> {
    runners: Vec<PlanRunner<'a, S, M>>,
    target: ResultTarget,
    round_budget: usize,
}

impl<'a, S: DocumentStore, M: Matcher> MultiPlanSelector<'a, S, M> {
    /// Builds runners for the candidate plans, in candidate order.
    ///
    /// Fails with `NoViablePlan` when the planner enumerated no candidates.
    pub fn new(
        plans: Vec<CandidatePlan>,
        store: &'a S,
        matcher: &'a M,
        target: ResultTarget,
    ) -> RaceResult<Self> {
        if plans.is_empty() {
            return Err(RaceError::NoViablePlan(
                "planner enumerated no candidate plans".to_string(),
            ));
        }
        let runners = plans
            .into_iter()
            .map(|plan| PlanRunner::new(plan, store, matcher))
            .collect();
        Ok(Self {
            runners,
            target,
            round_budget: 1,
        })
    }

    /// Overrides the per-round step budget (default 1).
    ///
    /// Larger budgets let a plan run several steps before yielding; the
    /// cumulative-counting invariants hold for any budget.
    pub fn with_round_budget(mut self, budget: usize) -> Self {
        self.round_budget = budget.max(1);
        self
    }

    /// Races the runners to completion and drains the result.
    pub fn run(mut self) -> SelectorResult {
        let mut returned: HashSet<RecordId> = HashSet::new();
        let mut documents: Vec<MatchedDocument> = Vec::new();
        let winner = self.race(&mut returned, &mut documents);

        // Losers are abandoned here; their counters stop growing.
        let nscanned_all_plans = self.runners.iter().map(|r| r.keys_examined()).sum();
        let nscanned_objects_all_plans = self.runners.iter().map(|r| r.docs_fetched()).sum();
        let winner = &self.runners[winner];
        let result = SelectorResult {
            cursor: winner.path().cursor_name(),
            n: documents.len() as u64,
            nscanned: winner.keys_examined(),
            nscanned_objects: winner.docs_fetched(),
            nscanned_all_plans,
            nscanned_objects_all_plans,
            documents,
        };

        let n = result.n.to_string();
        let nscanned = result.nscanned.to_string();
        let all_plans = result.nscanned_all_plans.to_string();
        Logger::log(
            Severity::Trace,
            "plan_race_won",
            &[
                ("cursor", result.cursor.as_str()),
                ("n", n.as_str()),
                ("nscanned", nscanned.as_str()),
                ("nscanned_all_plans", all_plans.as_str()),
            ],
        );
        result
    }

    /// Runs the interleaving loop; returns the winning runner's index.
    fn race(
        &mut self,
        returned: &mut HashSet<RecordId>,
        documents: &mut Vec<MatchedDocument>,
    ) -> usize {
        loop {
            let mut progressed = false;
            for i in 0..self.runners.len() {
                if self.runners[i].is_done() {
                    continue;
                }
                progressed = true;
                for _ in 0..self.round_budget {
                    match self.runners[i].advance() {
                        PlanStep::Exhausted => return i,
                        PlanStep::Matched { record, document } => {
                            if returned.insert(record) && self.accepts(documents.len()) {
                                documents.push(MatchedDocument {
                                    record,
                                    body: document,
                                });
                            }
                            match self.target {
                                ResultTarget::Batch(cap) if documents.len() as u64 >= cap => {
                                    return self.most_matches()
                                }
                                ResultTarget::Limit(limit)
                                    if self.runners[i].matches() >= limit =>
                                {
                                    return i
                                }
                                _ => {}
                            }
                        }
                        PlanStep::NoMatch => {}
                    }
                    if self.runners[i].is_done() {
                        break;
                    }
                }
            }
            if !progressed {
                // Every plan was empty from the start, or nothing is left to
                // advance; fall back to the best-so-far.
                return self.most_matches();
            }
        }
    }

    /// Whether the result stream may grow past `len` under the target.
    ///
    /// A positive limit bounds what the caller receives even when several
    /// plans surface distinct records before any one of them reaches it.
    fn accepts(&self, len: usize) -> bool {
        match self.target {
            ResultTarget::Limit(limit) => (len as u64) < limit,
            ResultTarget::Exhaustive | ResultTarget::Batch(_) => true,
        }
    }

    /// Runner with the most matches; ties go to the earliest candidate.
    fn most_matches(&self) -> usize {
        let mut best = 0;
        for (i, runner) in self.runners.iter().enumerate() {
            if runner.matches() > self.runners[best].matches() {
                best = i;
            }
        }
        best
    }
}
