//! # citegraph-core
//!
//! The deterministic engine behind citegraph.
//!
//! A static bibliographic corpus is loaded once into a [`RecordStore`].
//! Everything the user sees is derived from it on demand:
//! - [`filter`] narrows the corpus with ANDed predicates
//! - [`build_graph`] traces the citation neighborhood of a seed record
//! - [`page`] windows any ordered sequence for display
//! - [`reduce`] moves a browsing session from one [`ViewState`] to the next
//!
//! ## Architectural Constraints
//!
//! - No async, no I/O besides writing exports to a caller-supplied writer
//! - No logging: the application logs around the engine
//! - BTreeMap/BTreeSet only; identical input gives identical output
//! - The store is read-only after construction

// =============================================================================
// MODULES
// =============================================================================

pub mod details;
pub mod export;
pub mod facets;
pub mod filter;
pub mod graph;
pub mod pagination;
pub mod primitives;
pub mod session;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{Author, CitationCounts, CiteError, PrimaryTopic, Record, RecordId, Topic};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use details::{RecordDetails, ResultRow, yes_no};
pub use export::{ExportRow, to_csv_string, write_csv};
pub use facets::{TopicFacets, state_facets};
pub use filter::{Category, CompiledFilter, FilterConfig, filter, filter_ids};
pub use graph::{
    CitationGraph, GraphEdge, GraphNode, NodeRole, build_graph, build_graph_for, parse_depth,
};
pub use pagination::{PageLink, clamp_page, page, total_pages, visible_pages};
pub use session::{Action, RowCommand, RowKind, ViewState, reduce};
pub use store::RecordStore;
