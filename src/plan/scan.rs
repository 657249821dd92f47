//! Lazy scan streams produced by the external planner
//!
//! A candidate plan's work arrives as a stream of [`ScanStep`]s. Each step
//! accounts for the index keys it consumed; a step with no candidate is a key
//! (or run of keys) the scan visited but skipped as out of bounds. Collection
//! scans consume one position per step and carry no key values.

use serde_json::Value;

use super::access_path::AccessPath;

/// Opaque identifier of a stored document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub u64);

/// A record surfaced by a scan, with its index key values when index-backed
#[derive(Debug, Clone)]
pub struct Candidate {
    pub record: RecordId,
    /// Key values in index field order; `None` for collection scans
    pub key: Option<Vec<Value>>,
}

impl Candidate {
    pub fn keyed(record: RecordId, key: Vec<Value>) -> Self {
        Self {
            record,
            key: Some(key),
        }
    }

    pub fn unkeyed(record: RecordId) -> Self {
        Self { record, key: None }
    }
}

/// One unit of lazy production from an access path
#[derive(Debug, Clone)]
pub struct ScanStep {
    /// Index keys (or scan positions) consumed by this step, normally 1
    pub keys_examined: u64,
    /// The record this step surfaced, if any; bounds-skipped keys surface none
    pub candidate: Option<Candidate>,
}

impl ScanStep {
    pub fn candidate(keys_examined: u64, candidate: Candidate) -> Self {
        Self {
            keys_examined,
            candidate: Some(candidate),
        }
    }

    pub fn skipped(keys_examined: u64) -> Self {
        Self {
            keys_examined,
            candidate: None,
        }
    }
}

/// One candidate access path and its scan stream
pub struct CandidatePlan {
    pub path: AccessPath,
    pub steps: Box<dyn Iterator<Item = ScanStep>>,
}

impl CandidatePlan {
    pub fn new<I>(path: AccessPath, steps: I) -> Self
    where
        I: IntoIterator<Item = ScanStep>,
        I::IntoIter: 'static,
    {
        Self {
            path,
            steps: Box::new(steps.into_iter()),
        }
    }
}

impl std::fmt::Debug for CandidatePlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidatePlan")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
