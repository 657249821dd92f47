//! Candidate access paths and per-plan execution for racedb
//!
//! A candidate plan wraps one access path (one index, or a full collection
//! scan) as a lazy stream of scan steps. The plan runner drives that stream,
//! deduplicates record ids within the plan, fetches documents, and tracks the
//! per-plan scan counters the explain report is built from.
//!
//! # Counters
//!
//! - `keys_examined` (`nscanned`): every index key visited, including keys
//!   skipped by scan bounds and duplicate keys for the same record
//! - `docs_fetched` (`nscannedObjects`): distinct documents actually loaded
//!   from storage, at most once per record id per plan

mod access_path;
mod runner;
mod scan;

pub use access_path::{AccessPath, IndexSpec};
pub use runner::{DocumentStore, PlanRunner, PlanStep};
pub use scan::{Candidate, CandidatePlan, RecordId, ScanStep};

use crate::query::Predicate;

/// Planner collaborator: enumerates the candidate access paths for one clause.
///
/// Candidate order is significant; the race breaks ties in favor of the
/// earliest-enumerated plan.
pub trait CandidatePlanner {
    fn candidates(&self, clause: &[Predicate]) -> Vec<CandidatePlan>;
}
