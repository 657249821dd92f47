//! Plan racing for racedb
//!
//! The selector interleaves every candidate plan for one clause under a
//! shared result target and declares a winner; the clause aggregator runs one
//! selector per `$or` clause and collects the per-clause reports; the
//! executor is the query-level entry point over both.
//!
//! # Accounting invariants
//!
//! - `nscanned`/`nscannedObjects` describe the winning plan alone
//! - the AllPlans variants sum every candidate's work up to the moment the
//!   race concluded, winner or not
//! - losing plans stop accruing the instant a winner is chosen
//! - for `$or`, every top-level figure is the arithmetic sum of the raw
//!   per-clause figures, even when clauses matched the same document

mod clause;
mod errors;
mod executor;
mod selector;

pub use clause::{ClauseAggregator, DisjunctionOutcome};
pub use errors::{RaceError, RaceResult};
pub use executor::RaceExecutor;
pub use selector::{MatchedDocument, MultiPlanSelector, ResultTarget, SelectorResult};
