//! # Record Store
//!
//! The immutable corpus and its id index.
//!
//! The store is built once at load time and never mutated afterwards.
//! All derived views (filtered results, citation graphs) are computed fresh
//! from it and only ever borrow records.

use crate::{CiteError, Record, RecordId};
use std::collections::BTreeMap;

/// The in-memory corpus snapshot.
///
/// Uses `BTreeMap` for the id index, giving deterministic iteration.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    /// Records in their original (load) order.
    records: Vec<Record>,

    /// Id index: RecordId -> position in `records`.
    index: BTreeMap<RecordId, usize>,
}

impl RecordStore {
    /// Build a store from the loaded records, preserving their order.
    ///
    /// Returns `CiteError::DuplicateRecord` if two records share an id.
    pub fn new(records: Vec<Record>) -> Result<Self, CiteError> {
        let mut index = BTreeMap::new();
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), position).is_some() {
                return Err(CiteError::DuplicateRecord(record.id.clone()));
            }
        }
        Ok(Self { records, index })
    }

    /// Create an empty store.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// All records in original order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over records in original order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Resolve an id. Dangling ids yield `None`.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    /// Resolve an id or fail with `CiteError::RecordNotFound`.
    pub fn require(&self, id: &RecordId) -> Result<&Record, CiteError> {
        self.get(id)
            .ok_or_else(|| CiteError::RecordNotFound(id.clone()))
    }

    /// Check whether an id resolves to a stored record.
    #[must_use]
    pub fn contains(&self, id: &RecordId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Build a new store from a sub-sequence of this one's records.
    ///
    /// Used to re-frame a filtered result as a corpus of its own.
    #[must_use]
    pub fn subset<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let records: Vec<Record> = records.into_iter().cloned().collect();
        let index = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.id.clone(), position))
            .collect();
        Self { records, index }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        let store = RecordStore::new(vec![Record::new("W1", "a"), Record::new("W2", "b")])
            .expect("store");

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get(&RecordId::new("W2")).map(Record::title_str),
            Some("b")
        );
        assert!(store.get(&RecordId::new("W9")).is_none());
    }

    #[test]
    fn preserves_load_order() {
        let store = RecordStore::new(vec![
            Record::new("W3", "c"),
            Record::new("W1", "a"),
            Record::new("W2", "b"),
        ])
        .expect("store");

        let ids: Vec<_> = store.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["W3", "W1", "W2"]);
    }

    #[test]
    fn duplicate_id_rejected() {
        let result = RecordStore::new(vec![Record::new("W1", "a"), Record::new("W1", "b")]);
        assert!(matches!(result, Err(CiteError::DuplicateRecord(id)) if id.as_str() == "W1"));
    }

    #[test]
    fn require_missing_fails() {
        let store = RecordStore::empty();
        assert!(matches!(
            store.require(&RecordId::new("W1")),
            Err(CiteError::RecordNotFound(_))
        ));
    }

    #[test]
    fn subset_keeps_order_and_index() {
        let store = RecordStore::new(vec![
            Record::new("W1", "a"),
            Record::new("W2", "b"),
            Record::new("W3", "c"),
        ])
        .expect("store");

        let sub = RecordStore::subset(store.iter().filter(|r| r.id.as_str() != "W2"));
        assert_eq!(sub.len(), 2);
        assert!(sub.contains(&RecordId::new("W3")));
        assert!(!sub.contains(&RecordId::new("W2")));
    }
}
