//! Field predicates and value comparison
//!
//! Predicates are the unit the planner receives and the matcher evaluates.
//! Comparison is defined for JSON numbers, strings, and booleans; values of
//! differing types are incomparable and never match a range operator.

use std::cmp::Ordering;

use regex::Regex;
use serde_json::Value;

/// Filter operator applied to a single field
#[derive(Debug, Clone)]
pub enum FilterOp {
    /// Exact equality
    Eq(Value),
    /// Greater than
    Gt(Value),
    /// Greater than or equal
    Gte(Value),
    /// Less than
    Lt(Value),
    /// Less than or equal
    Lte(Value),
    /// Regex pattern match on string values; forces a multi-range index scan
    Matches(Regex),
}

impl FilterOp {
    /// Evaluates the operator against a concrete value.
    ///
    /// A missing or incomparable value never matches.
    pub fn matches_value(&self, value: &Value) -> bool {
        match self {
            FilterOp::Eq(target) => value == target,
            FilterOp::Gt(target) => {
                compare_values(value, target) == Some(Ordering::Greater)
            }
            FilterOp::Gte(target) => matches!(
                compare_values(value, target),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::Lt(target) => compare_values(value, target) == Some(Ordering::Less),
            FilterOp::Lte(target) => matches!(
                compare_values(value, target),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOp::Matches(re) => value.as_str().is_some_and(|s| re.is_match(s)),
        }
    }

    /// Returns true for operators that define a contiguous scan range.
    ///
    /// Pattern operators do not; an index scan driven by one runs multi-range.
    pub fn is_range_bound(&self) -> bool {
        !matches!(self, FilterOp::Matches(_))
    }
}

/// A single-field predicate
#[derive(Debug, Clone)]
pub struct Predicate {
    /// Field the predicate applies to
    pub field: String,
    /// Operator and comparison value
    pub op: FilterOp,
}

impl Predicate {
    pub fn new(field: impl Into<String>, op: FilterOp) -> Self {
        Self {
            field: field.into(),
            op,
        }
    }

    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Eq(value))
    }

    pub fn gt(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Gt(value))
    }

    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Gte(value))
    }

    pub fn lt(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Lt(value))
    }

    pub fn lte(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Lte(value))
    }

    pub fn matches(field: impl Into<String>, re: Regex) -> Self {
        Self::new(field, FilterOp::Matches(re))
    }
}

/// Orders two JSON values where an ordering exists.
///
/// Numbers compare numerically, strings lexicographically, booleans
/// false-before-true. Mixed types and structured values are incomparable.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            x.as_f64().and_then(|x| y.as_f64().and_then(|y| x.partial_cmp(&y)))
        }
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
