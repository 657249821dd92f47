//! In-memory collection fixture
//!
//! Stands in for the external planner and storage collaborators: documents
//! live in a map, every declared index is materialized as a sorted key list,
//! and candidate enumeration mirrors the engine contract — one index plan per
//! index whose leading field the clause constrains (declaration order), then
//! a full collection scan last.
//!
//! Index scans seek past keys below the leading field's lower bound without
//! counting them, then visit every later key; keys failing any field's range
//! bound surface as counted-but-skipped steps. A pattern predicate on the
//! leading field makes the scan multi-range: the whole index is visited.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::BTreeMap;

use racedb::plan::{
    AccessPath, Candidate, CandidatePlan, CandidatePlanner, DocumentStore, IndexSpec, RecordId,
    ScanStep,
};
use racedb::query::{compare_values, FilterOp, Predicate};
use serde_json::Value;

pub struct MemCollection {
    documents: BTreeMap<u64, Value>,
    indexes: Vec<IndexSpec>,
    next_id: u64,
    /// When set, clauses are planned from indexes alone (no collection scan),
    /// the way `$or` clauses are in the reference engine.
    require_indexes: bool,
}

impl MemCollection {
    pub fn new() -> Self {
        Self {
            documents: BTreeMap::new(),
            indexes: Vec::new(),
            next_id: 1,
            require_indexes: false,
        }
    }

    pub fn require_indexes(mut self) -> Self {
        self.require_indexes = true;
        self
    }

    pub fn ensure_index(&mut self, fields: &[&str]) {
        self.indexes.push(IndexSpec::new(fields.iter().copied()));
    }

    pub fn save(&mut self, document: Value) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;
        self.documents.insert(id, document);
        RecordId(id)
    }

    /// Removes every document; indexes stay declared.
    pub fn remove_all(&mut self) {
        self.documents.clear();
    }

    fn index_plan(&self, spec: &IndexSpec, clause: &[Predicate]) -> CandidatePlan {
        let leading = &spec.fields[0];
        let multi = clause
            .iter()
            .any(|p| p.field == *leading && !p.op.is_range_bound());

        let mut entries: Vec<(Vec<Value>, RecordId)> = self
            .documents
            .iter()
            .filter_map(|(id, doc)| {
                let key: Option<Vec<Value>> = spec
                    .fields
                    .iter()
                    .map(|f| doc.get(f).cloned())
                    .collect();
                key.map(|k| (k, RecordId(*id)))
            })
            .collect();
        entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));

        // Seek to the first key satisfying the leading field's lower bound;
        // keys before it are never visited.
        let start = entries
            .iter()
            .position(|(key, _)| lower_bound_holds(clause, leading, &key[0]))
            .unwrap_or(entries.len());

        let steps: Vec<ScanStep> = entries[start..]
            .iter()
            .map(|(key, record)| {
                if key_in_bounds(clause, &spec.fields, key) {
                    ScanStep::candidate(1, Candidate::keyed(*record, key.clone()))
                } else {
                    ScanStep::skipped(1)
                }
            })
            .collect();

        CandidatePlan::new(
            AccessPath::IndexScan {
                index: spec.clone(),
                multi,
            },
            steps,
        )
    }

    fn collection_plan(&self) -> CandidatePlan {
        let steps: Vec<ScanStep> = self
            .documents
            .keys()
            .map(|id| ScanStep::candidate(1, Candidate::unkeyed(RecordId(*id))))
            .collect();
        CandidatePlan::new(AccessPath::CollectionScan, steps)
    }
}

impl CandidatePlanner for MemCollection {
    fn candidates(&self, clause: &[Predicate]) -> Vec<CandidatePlan> {
        let mut plans: Vec<CandidatePlan> = self
            .indexes
            .iter()
            .filter(|spec| clause.iter().any(|p| p.field == spec.fields[0]))
            .map(|spec| self.index_plan(spec, clause))
            .collect();
        if !self.require_indexes {
            plans.push(self.collection_plan());
        }
        plans
    }
}

impl DocumentStore for MemCollection {
    fn fetch(&self, record: RecordId) -> Option<Value> {
        self.documents.get(&record.0).cloned()
    }
}

fn compare_keys(a: &[Value], b: &[Value]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match compare_values(x, y).unwrap_or(Ordering::Equal) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// True when every lower-bound constraint on `field` admits `value`.
fn lower_bound_holds(clause: &[Predicate], field: &str, value: &Value) -> bool {
    clause
        .iter()
        .filter(|p| p.field == field)
        .all(|p| match &p.op {
            FilterOp::Gte(_) | FilterOp::Gt(_) | FilterOp::Eq(_) => p.op.matches_value(value),
            _ => true,
        })
}

/// True when every range constraint covered by the index admits the key.
fn key_in_bounds(clause: &[Predicate], fields: &[String], key: &[Value]) -> bool {
    clause.iter().all(|p| {
        if !p.op.is_range_bound() {
            return true;
        }
        match fields.iter().position(|f| *f == p.field) {
            Some(pos) => p.op.matches_value(&key[pos]),
            None => true,
        }
    })
}
