use crate::metadata::Identifier;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// Key/value pair attached to an injection point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataEntry {
    pub key: Identifier,
    pub value: Value,
}

impl MetadataEntry {
    /// Create a new metadata entry
    pub fn new(key: impl Into<Identifier>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Check whether this entry uses the given key
    pub fn has_key(&self, key: &Identifier) -> bool {
        &self.key == key
    }
}

/// Payload of a single tagging call: one entry or an ordered list of them
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataBatch {
    Single(MetadataEntry),
    Many(Vec<MetadataEntry>),
}

impl MetadataBatch {
    /// Entries in the order they will be stored
    pub fn entries(&self) -> &[MetadataEntry] {
        match self {
            MetadataBatch::Single(entry) => std::slice::from_ref(entry),
            MetadataBatch::Many(entries) => entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// First key that appears a second time within the batch
    ///
    /// A single entry can never collide with itself, so only `Many` batches
    /// are scanned.
    pub fn first_duplicate_key(&self) -> Option<&Identifier> {
        let MetadataBatch::Many(entries) = self else {
            return None;
        };

        let mut seen = HashSet::with_capacity(entries.len());
        entries
            .iter()
            .map(|entry| &entry.key)
            .find(|key| !seen.insert(*key))
    }
}

impl From<MetadataEntry> for MetadataBatch {
    fn from(entry: MetadataEntry) -> Self {
        MetadataBatch::Single(entry)
    }
}

impl From<Vec<MetadataEntry>> for MetadataBatch {
    fn from(entries: Vec<MetadataEntry>) -> Self {
        MetadataBatch::Many(entries)
    }
}

impl<const N: usize> From<[MetadataEntry; N]> for MetadataBatch {
    fn from(entries: [MetadataEntry; N]) -> Self {
        MetadataBatch::Many(entries.into())
    }
}
