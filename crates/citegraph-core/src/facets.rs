//! # Facets
//!
//! The selectable values offered to a user for the category filters,
//! collected from the whole corpus.

use crate::RecordStore;
use crate::primitives::UNKNOWN_FACET;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Topic names grouped by field, then by domain. Every level is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicFacets {
    pub fields: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl TopicFacets {
    /// Collect the topic tree from every record's topics.
    ///
    /// A topic without a field or domain is filed under `"Unknown"`;
    /// a topic without a name is ignored.
    #[must_use]
    pub fn collect(store: &RecordStore) -> Self {
        let mut fields: BTreeMap<String, BTreeMap<String, BTreeSet<String>>> = BTreeMap::new();
        for topic in store.iter().flat_map(|r| r.topics.iter()) {
            let Some(name) = topic.name.as_deref() else {
                continue;
            };
            let field = topic.field.as_deref().unwrap_or(UNKNOWN_FACET);
            let domain = topic.domain.as_deref().unwrap_or(UNKNOWN_FACET);
            fields
                .entry(field.to_string())
                .or_default()
                .entry(domain.to_string())
                .or_default()
                .insert(name.to_string());
        }
        Self { fields }
    }

    /// Total number of distinct (field, domain, topic) leaves.
    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.fields
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeSet::len)
            .sum()
    }

    /// Whether no topic was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Distinct state tags, sorted.
#[must_use]
pub fn state_facets(store: &RecordStore) -> BTreeSet<String> {
    store
        .iter()
        .flat_map(|r| r.states.iter().cloned())
        .collect()
}
