//! Top-level query shape
//!
//! Either a plain conjunction, planned and raced once, or a `$or` disjunction
//! whose clauses are planned and raced independently.

use super::predicate::Predicate;

/// Shape of a top-level query
#[derive(Debug, Clone)]
pub enum QueryShape {
    /// A conjunction of predicates; one plan race
    Conjunction(Vec<Predicate>),
    /// A `$or` of independent clauses; one plan race per clause
    Disjunction(Vec<Vec<Predicate>>),
}

impl QueryShape {
    /// Returns true for `$or` queries.
    pub fn is_disjunction(&self) -> bool {
        matches!(self, QueryShape::Disjunction(_))
    }

    /// Number of independently-planned clauses.
    pub fn clause_count(&self) -> usize {
        match self {
            QueryShape::Conjunction(_) => 1,
            QueryShape::Disjunction(clauses) => clauses.len(),
        }
    }
}
