//! racedb - competitive multi-plan query execution
//!
//! Runs several candidate access paths for one query in an interleaved race,
//! picks a winner, and reports scan-accounting statistics covering both the
//! winner and the full candidate set, including per-clause breakdowns for
//! top-level `$or` queries.

pub mod explain;
pub mod observability;
pub mod plan;
pub mod query;
pub mod race;
