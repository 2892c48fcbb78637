//! # Core Type Definitions
//!
//! This module contains all core types for the citegraph engine:
//! - Record identifiers (`RecordId`)
//! - The bibliographic record and its nested parts (`Record`, `Author`, `Topic`)
//! - Error types (`CiteError`)
//!
//! ## Tolerance Guarantees
//!
//! Records arrive from an external dataset and are frequently partial.
//! Every optional field deserializes to an empty/default value when it is
//! absent or `null`, so the engines operating on a `Record` never need to
//! handle a missing collection.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// =============================================================================
// RECORD IDENTIFIER
// =============================================================================

/// Opaque, unique identifier of a record in the corpus.
///
/// Citation sets reference other records by this id. An id that resolves to
/// no stored record is a dangling reference and is skipped by every consumer.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Create a new record id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last path segment of the id.
    ///
    /// Dataset ids are usually URLs (`https://openalex.org/W123`); the short
    /// form is what gets shown to a user.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// =============================================================================
// NESTED RECORD PARTS
// =============================================================================

/// One author of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

impl Author {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A topic classification with its field and domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

impl Topic {
    #[must_use]
    pub fn new(name: &str, field: &str, domain: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            field: Some(field.to_string()),
            domain: Some(domain.to_string()),
        }
    }
}

/// The single primary classification some dataset variants carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryTopic {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

/// Citation counters of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationCounts {
    /// Number of works citing this record. Absent means 0.
    #[serde(default, deserialize_with = "nullable")]
    pub forward: u64,
}

// =============================================================================
// RECORD
// =============================================================================

/// One publication in the corpus.
///
/// Records are immutable once the store is built. Field names follow the
/// dataset (`snake_case`); the camelCase spellings are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,

    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub url: Option<String>,

    /// ISO date (`YYYY-MM-DD`), compared lexically.
    #[serde(default, alias = "publicationDate")]
    pub publication_date: Option<String>,
    #[serde(default, alias = "publicationYear")]
    pub publication_year: Option<i32>,

    #[serde(
        default,
        alias = "is_open_access",
        alias = "isOpenAccess",
        deserialize_with = "nullable"
    )]
    pub is_oa: bool,

    #[serde(default, deserialize_with = "nullable")]
    pub authors: Vec<Author>,
    #[serde(default, deserialize_with = "nullable")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub topics: Vec<Topic>,
    #[serde(default, alias = "primaryTopic")]
    pub primary_topic: Option<PrimaryTopic>,
    #[serde(default, deserialize_with = "nullable")]
    pub states: Vec<String>,

    #[serde(default, alias = "citationCounts", deserialize_with = "nullable")]
    pub citation_counts: CitationCounts,

    /// Ids of records citing this record.
    #[serde(default, alias = "forwardCitations", deserialize_with = "nullable")]
    pub forward_citations: Vec<RecordId>,
    /// Ids of records this record cites.
    #[serde(default, alias = "backwardCitations", deserialize_with = "nullable")]
    pub backward_citations: Vec<RecordId>,
}

impl Record {
    /// Create a record with only an id and a title.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(id),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Title, or the empty string.
    #[must_use]
    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Journal, or the empty string.
    #[must_use]
    pub fn journal_str(&self) -> &str {
        self.journal.as_deref().unwrap_or("")
    }

    /// Forward citation count (0 when absent).
    #[must_use]
    pub fn forward_count(&self) -> u64 {
        self.citation_counts.forward
    }

    /// Author names joined with `sep`.
    #[must_use]
    pub fn author_names(&self, sep: &str) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(sep)
    }
}

/// Deserialize `null` as the type's default value.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the citegraph system.
///
/// - The filter and graph engines are total and never produce these
/// - Errors only arise at the edges: loading, configuration, export,
///   and caller misuse of the pagination cursor
#[derive(Debug, Error)]
pub enum CiteError {
    /// Two records in the corpus share the same id.
    #[error("Duplicate record id: {0}")]
    DuplicateRecord(RecordId),

    /// The requested record is not in the store.
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    /// A page outside `1..=total` was requested.
    #[error("Page {page} out of range (1..={total})")]
    PageOutOfRange { page: usize, total: usize },

    /// A page size of zero was requested.
    #[error("Page size must be at least 1")]
    InvalidPageSize,

    /// The corpus document could not be parsed.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Writing an export failed.
    #[error("Export error: {0}")]
    Export(String),

    /// The configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_takes_last_segment() {
        assert_eq!(RecordId::new("https://openalex.org/W42").short(), "W42");
        assert_eq!(RecordId::new("W42").short(), "W42");
    }

    #[test]
    fn partial_record_deserializes_with_defaults() {
        let json = r#"{"id": "W1", "title": "Only a title"}"#;
        let record: Record = serde_json::from_str(json).expect("parse");

        assert_eq!(record.id, RecordId::new("W1"));
        assert!(record.authors.is_empty());
        assert!(record.forward_citations.is_empty());
        assert_eq!(record.forward_count(), 0);
        assert!(!record.is_oa);
    }

    #[test]
    fn null_collections_become_empty() {
        let json = r#"{
            "id": "W1",
            "authors": null,
            "keywords": null,
            "citation_counts": null,
            "backward_citations": null,
            "is_oa": null
        }"#;
        let record: Record = serde_json::from_str(json).expect("parse");

        assert!(record.authors.is_empty());
        assert!(record.keywords.is_empty());
        assert_eq!(record.forward_count(), 0);
        assert!(record.backward_citations.is_empty());
    }

    #[test]
    fn camel_case_aliases_accepted() {
        let json = r#"{
            "id": "W1",
            "publicationDate": "2021-03-04",
            "citationCounts": {"forward": 7},
            "forwardCitations": ["W2"],
            "isOpenAccess": true
        }"#;
        let record: Record = serde_json::from_str(json).expect("parse");

        assert_eq!(record.publication_date.as_deref(), Some("2021-03-04"));
        assert_eq!(record.forward_count(), 7);
        assert_eq!(record.forward_citations, vec![RecordId::new("W2")]);
        assert!(record.is_oa);
    }

    #[test]
    fn author_names_joined() {
        let mut record = Record::new("W1", "t");
        record.authors = vec![Author::new("Ada"), Author::new("Grace")];
        assert_eq!(record.author_names(", "), "Ada, Grace");
    }
}
