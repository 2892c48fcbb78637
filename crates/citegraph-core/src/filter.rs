//! # Filter Engine
//!
//! Multi-predicate record filtering.
//!
//! - A `FilterConfig` is the raw, user-assembled query value
//! - `CompiledFilter` normalizes it once (lower-casing, term splitting,
//!   defaulting of bounds) and evaluates records against it
//! - `filter()` is a stable filter: results keep the store's relative order
//!
//! Every predicate category is ANDed with the others. Inside a category
//! filter (field/domain/topic/state) the selected values are ORed, and an
//! empty selection passes everything. The engine is total: partial records
//! are evaluated against empty/default values and never cause an error.

use crate::{Record, RecordId, RecordStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// FILTER CONFIGURATION
// =============================================================================

/// The query configuration, rebuilt per search.
///
/// String fields that are `None` or blank impose no constraint. Category
/// sets are compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Whitespace-separated title terms; every term must occur in the title.
    pub title: Option<String>,
    /// Inclusive lower bound on `publication_date` (lexical).
    pub start_date: Option<String>,
    /// Inclusive upper bound on `publication_date` (lexical).
    pub end_date: Option<String>,
    /// Accepted topic fields.
    pub fields: BTreeSet<String>,
    /// Accepted topic domains.
    pub domains: BTreeSet<String>,
    /// Accepted topic names.
    pub topics: BTreeSet<String>,
    /// Accepted state tags.
    pub states: BTreeSet<String>,
    /// Substring of the space-joined author names.
    pub author: Option<String>,
    /// Substring of the journal name.
    pub journal: Option<String>,
    /// Substring of the space-joined keywords.
    pub keyword: Option<String>,
    /// Inclusive minimum forward citation count (default 0).
    pub min_cites: Option<u64>,
    /// Inclusive maximum forward citation count (default unbounded).
    pub max_cites: Option<u64>,
}

impl FilterConfig {
    /// Create an empty (pass-through) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, query: impl Into<String>) -> Self {
        self.title = Some(query.into());
        self
    }

    #[must_use]
    pub fn with_date_range(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_date = start.map(str::to_string);
        self.end_date = end.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.fields.insert(field.into());
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domains.insert(domain.into());
        self
    }

    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topics.insert(topic.into());
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.states.insert(state.into());
        self
    }

    #[must_use]
    pub fn with_author(mut self, query: impl Into<String>) -> Self {
        self.author = Some(query.into());
        self
    }

    #[must_use]
    pub fn with_journal(mut self, query: impl Into<String>) -> Self {
        self.journal = Some(query.into());
        self
    }

    #[must_use]
    pub fn with_keyword(mut self, query: impl Into<String>) -> Self {
        self.keyword = Some(query.into());
        self
    }

    #[must_use]
    pub fn with_citation_range(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_cites = min;
        self.max_cites = max;
        self
    }

    /// Compile into an evaluable filter.
    #[must_use]
    pub fn compile(&self) -> CompiledFilter {
        CompiledFilter::from_config(self)
    }
}

// =============================================================================
// CATEGORY FILTERS
// =============================================================================

/// A record attribute matched against an accepted-value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Field,
    Domain,
    Topic,
    State,
}

impl Category {
    /// All categories in evaluation order.
    pub const ALL: [Category; 4] = [
        Category::Field,
        Category::Domain,
        Category::Topic,
        Category::State,
    ];

    /// The record's lower-cased values for this category.
    ///
    /// Field and domain values come from every topic plus the primary topic.
    #[must_use]
    pub fn values(self, record: &Record) -> BTreeSet<String> {
        let primary = record.primary_topic.as_ref();
        let raw: Vec<&str> = match self {
            Category::Field => record
                .topics
                .iter()
                .filter_map(|t| t.field.as_deref())
                .chain(primary.and_then(|p| p.field.as_deref()))
                .collect(),
            Category::Domain => record
                .topics
                .iter()
                .filter_map(|t| t.domain.as_deref())
                .chain(primary.and_then(|p| p.domain.as_deref()))
                .collect(),
            Category::Topic => record
                .topics
                .iter()
                .filter_map(|t| t.name.as_deref())
                .collect(),
            Category::State => record.states.iter().map(String::as_str).collect(),
        };
        raw.into_iter().map(str::to_lowercase).collect()
    }

    fn selection(self, config: &FilterConfig) -> &BTreeSet<String> {
        match self {
            Category::Field => &config.fields,
            Category::Domain => &config.domains,
            Category::Topic => &config.topics,
            Category::State => &config.states,
        }
    }
}

// =============================================================================
// COMPILED FILTER
// =============================================================================

/// A normalized, ready-to-evaluate filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledFilter {
    title_terms: Vec<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    categories: Vec<(Category, BTreeSet<String>)>,
    author: Option<String>,
    journal: Option<String>,
    keyword: Option<String>,
    min_cites: u64,
    max_cites: u64,
}

/// Trim and lower-case a free-text query; blank means absent.
fn normalize_query(query: Option<&String>) -> Option<String> {
    query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty())
}

/// Trim a date bound; blank means absent.
fn normalize_bound(bound: Option<&String>) -> Option<String> {
    bound
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
}

impl CompiledFilter {
    /// Normalize a configuration.
    #[must_use]
    pub fn from_config(config: &FilterConfig) -> Self {
        let title_terms = config
            .title
            .as_deref()
            .map(|q| q.split_whitespace().map(str::to_lowercase).collect())
            .unwrap_or_default();

        let categories = Category::ALL
            .into_iter()
            .filter_map(|category| {
                let selected: BTreeSet<String> = category
                    .selection(config)
                    .iter()
                    .map(|v| v.trim().to_lowercase())
                    .filter(|v| !v.is_empty())
                    .collect();
                (!selected.is_empty()).then_some((category, selected))
            })
            .collect();

        Self {
            title_terms,
            start_date: normalize_bound(config.start_date.as_ref()),
            end_date: normalize_bound(config.end_date.as_ref()),
            categories,
            author: normalize_query(config.author.as_ref()),
            journal: normalize_query(config.journal.as_ref()),
            keyword: normalize_query(config.keyword.as_ref()),
            min_cites: config.min_cites.unwrap_or(0),
            max_cites: config.max_cites.unwrap_or(u64::MAX),
        }
    }

    /// Whether this filter accepts every record.
    #[must_use]
    pub fn is_pass_through(&self) -> bool {
        self.title_terms.is_empty()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.categories.is_empty()
            && self.author.is_none()
            && self.journal.is_none()
            && self.keyword.is_none()
            && self.min_cites == 0
            && self.max_cites == u64::MAX
    }

    /// Evaluate all predicates against one record.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.matches_title(record)
            && self.matches_dates(record)
            && self.matches_categories(record)
            && self.matches_text(record)
            && self.matches_citations(record)
    }

    fn matches_title(&self, record: &Record) -> bool {
        if self.title_terms.is_empty() {
            return true;
        }
        let title = record.title_str().to_lowercase();
        self.title_terms.iter().all(|term| title.contains(term))
    }

    // Plain lexical comparison; correct for zero-padded ISO dates only.
    fn matches_dates(&self, record: &Record) -> bool {
        if self.start_date.is_none() && self.end_date.is_none() {
            return true;
        }
        let Some(date) = record.publication_date.as_deref() else {
            return false;
        };
        let after_start = self.start_date.as_deref().is_none_or(|start| date >= start);
        let before_end = self.end_date.as_deref().is_none_or(|end| date <= end);
        after_start && before_end
    }

    fn matches_categories(&self, record: &Record) -> bool {
        self.categories.iter().all(|(category, selected)| {
            category
                .values(record)
                .iter()
                .any(|value| selected.contains(value))
        })
    }

    fn matches_text(&self, record: &Record) -> bool {
        if let Some(query) = &self.author {
            if !record.author_names(" ").to_lowercase().contains(query) {
                return false;
            }
        }
        if let Some(query) = &self.journal {
            if !record.journal_str().to_lowercase().contains(query) {
                return false;
            }
        }
        if let Some(query) = &self.keyword {
            if !record.keywords.join(" ").to_lowercase().contains(query) {
                return false;
            }
        }
        true
    }

    fn matches_citations(&self, record: &Record) -> bool {
        let cites = record.forward_count();
        cites >= self.min_cites && cites <= self.max_cites
    }
}

// =============================================================================
// FILTER ENTRY POINTS
// =============================================================================

/// Filter the store, preserving its original relative order.
#[must_use]
pub fn filter<'s>(store: &'s RecordStore, config: &FilterConfig) -> Vec<&'s Record> {
    let compiled = config.compile();
    if compiled.is_pass_through() {
        return store.iter().collect();
    }
    store.iter().filter(|r| compiled.matches(r)).collect()
}

/// Filter the store and return only the ids of matching records, in order.
#[must_use]
pub fn filter_ids(store: &RecordStore, config: &FilterConfig) -> Vec<RecordId> {
    filter(store, config)
        .into_iter()
        .map(|r| r.id.clone())
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
