//! Matcher seam between plan execution and predicate evaluation
//!
//! Plan runners consult the matcher twice: once against raw index key values
//! (when the index covers every predicated field, sparing a document fetch)
//! and once against the fetched document itself.

use serde_json::Value;

use super::predicate::Predicate;

/// Predicate evaluation as consumed by plan runners
pub trait Matcher {
    /// Evaluates the predicate against a full document.
    fn matches(&self, document: &Value) -> bool;

    /// Evaluates the predicate against index key values alone.
    ///
    /// `fields` are the index's key fields in key order, `key` the
    /// corresponding values. Returns `None` when the key does not cover every
    /// predicated field and the document must be fetched to decide.
    fn matches_key(&self, fields: &[String], key: &[Value]) -> Option<bool>;
}

/// Matcher over a conjunction of field predicates
#[derive(Debug, Clone)]
pub struct ConjunctionMatcher {
    predicates: Vec<Predicate>,
}

impl ConjunctionMatcher {
    pub fn new(predicates: &[Predicate]) -> Self {
        Self {
            predicates: predicates.to_vec(),
        }
    }
}

impl Matcher for ConjunctionMatcher {
    fn matches(&self, document: &Value) -> bool {
        self.predicates.iter().all(|pred| {
            document
                .get(&pred.field)
                .is_some_and(|value| pred.op.matches_value(value))
        })
    }

    fn matches_key(&self, fields: &[String], key: &[Value]) -> Option<bool> {
        let mut decided = true;
        for pred in &self.predicates {
            match fields.iter().position(|f| *f == pred.field) {
                Some(pos) => {
                    let value = key.get(pos)?;
                    if !pred.op.matches_value(value) {
                        // One covered predicate failing settles the key.
                        return Some(false);
                    }
                }
                None => decided = false,
            }
        }
        if decided {
            Some(true)
        } else {
            None
        }
    }
}
