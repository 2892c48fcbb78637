//! # Record Views
//!
//! Flat projections of a record for display: the detail view and the
//! result-table row. Missing values become placeholders, never errors.

use crate::Record;
use crate::primitives::NOT_AVAILABLE;
use serde::{Deserialize, Serialize};

/// Everything shown when a single record is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDetails {
    /// Last path segment of the record id.
    pub short_id: String,
    pub title: String,
    pub publication_date: String,
    pub topics: String,
    pub keywords: String,
    pub states: String,
    pub url: String,
}

impl RecordDetails {
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            short_id: record.id.short().to_string(),
            title: record.title_str().to_string(),
            publication_date: record
                .publication_date
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            topics: record
                .topics
                .iter()
                .filter_map(|t| t.name.as_deref())
                .collect::<Vec<_>>()
                .join(", "),
            keywords: record.keywords.join(", "),
            states: record.states.join(", "),
            url: record
                .url
                .clone()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

/// One row of the result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub title: String,
    /// Publication year, or empty.
    pub year: String,
    pub authors: String,
    pub citations: u64,
    /// `"Yes"` or `"No"`.
    pub open_access: String,
    pub kind: String,
}

impl ResultRow {
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            title: record.title_str().to_string(),
            year: record
                .publication_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
            authors: record.author_names(", "),
            citations: record.forward_count(),
            open_access: yes_no(record.is_oa).to_string(),
            kind: record.kind.clone().unwrap_or_default(),
        }
    }
}

/// Render a flag the way the result table and exports do.
#[must_use]
pub const fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}
