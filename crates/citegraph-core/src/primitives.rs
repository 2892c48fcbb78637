//! # Engine Primitives
//!
//! Hardcoded runtime constants for the citegraph engine.
//!
//! These values are compiled into the binary and are immutable at runtime.
//! The application configuration may pick different defaults, but the
//! bounds below are always enforced by the core.

/// Records shown per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Citation graph depth used when the requested depth is missing,
/// non-numeric, or not positive.
pub const DEFAULT_GRAPH_DEPTH: usize = 1;

/// Maximum citation graph depth.
///
/// - Graph builds must be computationally bounded.
/// - There is no cap on the number of visited nodes; a high branching
///   factor at a large depth still yields a large graph.
pub const MAX_GRAPH_DEPTH: usize = 100;

/// Up to this many pages, every page link is shown.
///
/// Above it, the page links collapse into `1 … c-1 c c+1 … N`.
pub const MAX_FULL_PAGE_LINKS: usize = 7;

/// Grouping label for topics that lack a field or domain.
pub const UNKNOWN_FACET: &str = "Unknown";

/// Placeholder for missing values in record details.
pub const NOT_AVAILABLE: &str = "N/A";

/// Fixed column order of CSV exports.
pub const EXPORT_COLUMNS: [&str; 9] = [
    "url",
    "is_oa",
    "title",
    "doi",
    "type",
    "journal",
    "publication_year",
    "keywords",
    "authors",
];

/// Separator for multi-valued columns in CSV exports.
pub const EXPORT_LIST_SEPARATOR: &str = "|";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_depth_within_bound() {
        assert!(DEFAULT_GRAPH_DEPTH >= 1);
        assert!(DEFAULT_GRAPH_DEPTH <= MAX_GRAPH_DEPTH);
    }

    #[test]
    fn export_header_is_stable() {
        assert_eq!(
            EXPORT_COLUMNS.join(","),
            "url,is_oa,title,doi,type,journal,publication_year,keywords,authors"
        );
    }
}
