//! Query predicate model for racedb
//!
//! A query is a conjunction of field predicates, or a top-level disjunction
//! (`$or`) of such conjunctions. The matcher seam evaluates predicates against
//! full documents and, where an index covers every predicated field, against
//! raw index keys without loading the document.

mod matcher;
mod predicate;
mod shape;

pub use matcher::{ConjunctionMatcher, Matcher};
pub use predicate::{compare_values, FilterOp, Predicate};
pub use shape::QueryShape;
