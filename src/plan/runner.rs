//! Plan runner: drives one candidate plan's lazy production
//!
//! Each `advance()` call performs one unit of work: resolve the currently
//! positioned candidate, or pull scan steps until the next candidate surfaces
//! (bounds-skipped keys are charged to the same call). Counters are committed
//! only by fully completed calls, so a runner abandoned mid-race never carries
//! a partial update.
//!
//! Constructing a runner positions the scan on its first candidate, charging
//! the keys consumed to get there. Resolution order for a candidate:
//!
//! 1. key-level match when the index covers the predicate (a reject costs no
//!    document fetch)
//! 2. per-plan record dedup (a record fetched once by this plan is skipped on
//!    revisit, though the key consumed still counts)
//! 3. document fetch; a record deleted since the key was visited is a plain
//!    non-match
//! 4. full predicate match against the document

use std::collections::HashSet;

use serde_json::Value;

use crate::query::Matcher;

use super::access_path::AccessPath;
use super::scan::{Candidate, CandidatePlan, RecordId, ScanStep};

/// Storage collaborator: fetch a document by record id.
///
/// `None` means absent or deleted; the race treats that as an external fact,
/// not an error.
pub trait DocumentStore {
    fn fetch(&self, record: RecordId) -> Option<Value>;
}

/// Outcome of one `advance()` call
#[derive(Debug, Clone)]
pub enum PlanStep {
    /// A document matched the predicate
    Matched { record: RecordId, document: Value },
    /// Work was done but no match was produced; more keys may remain
    NoMatch,
    /// The scan is finished; no further calls will produce work
    Exhausted,
}

/// Drives one candidate plan, tracking its scan counters
pub struct PlanRunner<'a, S: DocumentStore, M: Matcher> {
    path: AccessPath,
    steps: Box<dyn Iterator<Item = ScanStep>>,
    store: &'a S,
    matcher: &'a M,
    keys_examined: u64,
    docs_fetched: u64,
    matches: u64,
    fetched: HashSet<RecordId>,
    pending: Option<Candidate>,
    done: bool,
}

impl<'a, S: DocumentStore, M: Matcher> PlanRunner<'a, S, M> {
    /// Creates a runner positioned on the plan's first candidate.
    ///
    /// A plan whose scan is empty from the start is marked done immediately
    /// with zero keys examined.
    pub fn new(plan: CandidatePlan, store: &'a S, matcher: &'a M) -> Self {
        let mut runner = Self {
            path: plan.path,
            steps: plan.steps,
            store,
            matcher,
            keys_examined: 0,
            docs_fetched: 0,
            matches: 0,
            fetched: HashSet::new(),
            pending: None,
            done: false,
        };
        match runner.position_next() {
            Some(candidate) => runner.pending = Some(candidate),
            None => runner.done = true,
        }
        runner
    }

    /// Performs one unit of work.
    pub fn advance(&mut self) -> PlanStep {
        if self.done {
            return PlanStep::Exhausted;
        }
        let candidate = match self.pending.take() {
            Some(candidate) => candidate,
            None => match self.position_next() {
                Some(candidate) => candidate,
                None => {
                    self.done = true;
                    return PlanStep::Exhausted;
                }
            },
        };
        self.resolve(candidate)
    }

    /// Pulls scan steps until a candidate surfaces or the scan ends.
    ///
    /// Key counts, including those of skipped steps, are committed in one go.
    fn position_next(&mut self) -> Option<Candidate> {
        let mut keys = 0;
        let found = loop {
            match self.steps.next() {
                None => break None,
                Some(step) => {
                    keys += step.keys_examined;
                    if let Some(candidate) = step.candidate {
                        break Some(candidate);
                    }
                }
            }
        };
        self.keys_examined += keys;
        found
    }

    fn resolve(&mut self, candidate: Candidate) -> PlanStep {
        if let (Some(fields), Some(key)) = (self.path.key_fields(), candidate.key.as_deref()) {
            if self.matcher.matches_key(fields, key) == Some(false) {
                return PlanStep::NoMatch;
            }
        }
        if self.fetched.contains(&candidate.record) {
            return PlanStep::NoMatch;
        }
        let Some(document) = self.store.fetch(candidate.record) else {
            return PlanStep::NoMatch;
        };
        self.fetched.insert(candidate.record);
        self.docs_fetched += 1;
        if self.matcher.matches(&document) {
            self.matches += 1;
            PlanStep::Matched {
                record: candidate.record,
                document,
            }
        } else {
            PlanStep::NoMatch
        }
    }

    /// Index keys (or scan positions) visited, duplicates included.
    pub fn keys_examined(&self) -> u64 {
        self.keys_examined
    }

    /// Distinct documents loaded from storage by this plan.
    pub fn docs_fetched(&self) -> u64 {
        self.docs_fetched
    }

    /// Documents that matched the predicate for this plan.
    pub fn matches(&self) -> u64 {
        self.matches
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn path(&self) -> &AccessPath {
        &self.path
    }
}
