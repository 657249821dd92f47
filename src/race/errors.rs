//! Race error types
//!
//! Both variants are fatal to the containing query: no report is produced and
//! nothing is retried internally.

use thiserror::Error;

/// Result type for race operations
pub type RaceResult<T> = Result<T, RaceError>;

/// Errors raised while planning or racing candidate plans
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RaceError {
    /// The planner produced no usable candidate plan for a clause
    #[error("no viable candidate plan: {0}")]
    NoViablePlan(String),

    /// A `$or` query with zero clauses
    #[error("$or requires at least one clause")]
    EmptyDisjunction,
}

impl RaceError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            RaceError::NoViablePlan(_) => "RACE_NO_VIABLE_PLAN",
            RaceError::EmptyDisjunction => "RACE_EMPTY_DISJUNCTION",
        }
    }
}
