//! Explain reports for racedb
//!
//! Read-only structures assembled from race outcomes. The serialized field
//! names (`cursor`, `n`, `nscanned`, `nscannedObjects`, `nscannedAllPlans`,
//! `nscannedObjectsAllPlans`, `clauses`) are the external contract other
//! tooling binds to.

mod report;

pub use report::{ClauseReport, ExplainReport};
