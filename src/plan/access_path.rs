//! Access path descriptors
//!
//! The closed set of access strategies a candidate plan can take. The cursor
//! name derived here is part of the explain report's external contract.

/// Ordered key fields of one index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub fields: Vec<String>,
}

impl IndexSpec {
    pub fn new(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Key-pattern name, e.g. `a_1_b_1` for an ascending index on (a, b).
    pub fn key_pattern_name(&self) -> String {
        self.fields
            .iter()
            .map(|f| format!("{f}_1"))
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// One concrete access strategy for executing a clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPath {
    /// Bounded scan over one index; `multi` marks multi-range scans that may
    /// visit more than one key range (and the same record more than once)
    IndexScan { index: IndexSpec, multi: bool },
    /// Full collection scan in record order
    CollectionScan,
}

impl AccessPath {
    /// Cursor descriptor reported for this path.
    pub fn cursor_name(&self) -> String {
        match self {
            AccessPath::IndexScan { index, multi } => {
                let mut name = format!("IndexCursor {}", index.key_pattern_name());
                if *multi {
                    name.push_str(" multi");
                }
                name
            }
            AccessPath::CollectionScan => "BasicCursor".to_string(),
        }
    }

    /// Key fields when this path is index-backed.
    pub fn key_fields(&self) -> Option<&[String]> {
        match self {
            AccessPath::IndexScan { index, .. } => Some(&index.fields),
            AccessPath::CollectionScan => None,
        }
    }
}
