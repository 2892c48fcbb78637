//! # Session Module
//!
//! The explicit view state of one browsing session and its transitions.
//!
//! A `ViewState` is an immutable value. Every user action is an `Action`
//! and `reduce(store, &state, action)` returns the next state; nothing is
//! mutated in place. Row actions are plain `RowCommand` values, so any
//! front end (CLI, TUI, web) can drive the same transitions.

use crate::filter::{FilterConfig, filter_ids};
use crate::graph::{CitationGraph, build_graph};
use crate::pagination::{clamp_page, page, total_pages};
use crate::primitives::{DEFAULT_GRAPH_DEPTH, DEFAULT_PAGE_SIZE, MAX_GRAPH_DEPTH};
use crate::{CiteError, Record, RecordId, RecordStore};
use serde::{Deserialize, Serialize};

// =============================================================================
// ROW COMMANDS
// =============================================================================

/// What a row action asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Open the record's detail view.
    Details,
    /// Open the citation graph seeded at the record.
    Graph,
}

/// A row action bound to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCommand {
    pub kind: RowKind,
    pub record_id: RecordId,
}

impl RowCommand {
    #[must_use]
    pub fn new(kind: RowKind, record_id: RecordId) -> Self {
        Self { kind, record_id }
    }

    /// Resolve a 0-based row index on the current page into a command.
    ///
    /// Returns `None` when the row does not exist.
    #[must_use]
    pub fn for_row(state: &ViewState, kind: RowKind, row: usize) -> Option<Self> {
        let offset = state
            .page
            .saturating_sub(1)
            .saturating_mul(state.page_size)
            .saturating_add(row);
        let on_page = row < state.page_size;
        on_page
            .then(|| state.results.get(offset))
            .flatten()
            .map(|id| Self::new(kind, id.clone()))
    }
}

// =============================================================================
// ACTIONS
// =============================================================================

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run a new search; always returns to page 1.
    Search(FilterConfig),
    /// Jump to a page (clamped to the valid range).
    GotoPage(usize),
    NextPage,
    PrevPage,
    /// A row action from the result table.
    Row(RowCommand),
    /// Change the graph depth (0 or above `MAX_GRAPH_DEPTH` is bounded).
    SetDepth(usize),
    /// Rebuild the graph for the current seed and depth.
    RegenerateGraph,
    CloseGraph,
    CloseDetails,
}

// =============================================================================
// VIEW STATE
// =============================================================================

/// The complete state of one browsing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// The configuration of the last search.
    pub config: FilterConfig,
    /// Ids of the filtered records, in store order.
    pub results: Vec<RecordId>,
    pub page_size: usize,
    /// Current page, 1-indexed.
    pub page: usize,
    /// Depth used for graph builds.
    pub depth: usize,
    /// The selected graph seed, kept after the graph is closed.
    pub seed: Option<RecordId>,
    /// The open graph, if any.
    pub graph: Option<CitationGraph>,
    /// The record whose details are open, if any.
    pub details: Option<RecordId>,
}

impl ViewState {
    /// The initial state: every record, page 1.
    #[must_use]
    pub fn new(store: &RecordStore, page_size: usize, depth: usize) -> Self {
        let config = FilterConfig::default();
        Self {
            results: filter_ids(store, &config),
            config,
            page_size: page_size.max(1),
            page: 1,
            depth: bound_depth(depth),
            seed: None,
            graph: None,
            details: None,
        }
    }

    /// Initial state with the default page size and depth.
    #[must_use]
    pub fn with_defaults(store: &RecordStore) -> Self {
        Self::new(store, DEFAULT_PAGE_SIZE, DEFAULT_GRAPH_DEPTH)
    }

    /// Number of pages of the current results.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.results.len(), self.page_size)
    }

    /// Records on the current page.
    pub fn page_records<'s>(&self, store: &'s RecordStore) -> Result<Vec<&'s Record>, CiteError> {
        let ids = page(&self.results, self.page_size, self.page)?;
        Ok(ids.iter().filter_map(|id| store.get(id)).collect())
    }

    /// All filtered records, in order.
    #[must_use]
    pub fn result_records<'s>(&self, store: &'s RecordStore) -> Vec<&'s Record> {
        self.results.iter().filter_map(|id| store.get(id)).collect()
    }

    /// The record whose details are open.
    #[must_use]
    pub fn details_record<'s>(&self, store: &'s RecordStore) -> Option<&'s Record> {
        self.details.as_ref().and_then(|id| store.get(id))
    }
}

/// Clamp a depth into `1..=MAX_GRAPH_DEPTH`.
fn bound_depth(depth: usize) -> usize {
    depth.clamp(1, MAX_GRAPH_DEPTH)
}

/// Build the graph for `seed` if it resolves.
fn graph_for(store: &RecordStore, seed: &RecordId, depth: usize) -> Option<CitationGraph> {
    store.get(seed).map(|record| build_graph(store, record, depth))
}

// =============================================================================
// REDUCER
// =============================================================================

/// Compute the state that follows `action`.
#[must_use]
pub fn reduce(store: &RecordStore, state: &ViewState, action: Action) -> ViewState {
    let mut next = state.clone();
    match action {
        Action::Search(config) => {
            next.results = filter_ids(store, &config);
            next.config = config;
            next.page = 1;
        }
        Action::GotoPage(target) => {
            next.page = clamp_page(target, next.results.len(), next.page_size);
        }
        Action::NextPage => {
            next.page = clamp_page(
                next.page.saturating_add(1),
                next.results.len(),
                next.page_size,
            );
        }
        Action::PrevPage => {
            next.page = clamp_page(
                next.page.saturating_sub(1),
                next.results.len(),
                next.page_size,
            );
        }
        Action::Row(command) => match command.kind {
            RowKind::Details => {
                if store.contains(&command.record_id) {
                    next.details = Some(command.record_id);
                }
            }
            RowKind::Graph => {
                if let Some(graph) = graph_for(store, &command.record_id, next.depth) {
                    next.graph = Some(graph);
                    next.seed = Some(command.record_id);
                }
            }
        },
        Action::SetDepth(depth) => {
            next.depth = bound_depth(depth);
        }
        Action::RegenerateGraph => {
            if let Some(seed) = &next.seed {
                next.graph = graph_for(store, seed, next.depth);
            }
        }
        Action::CloseGraph => {
            next.graph = None;
        }
        Action::CloseDetails => {
            next.details = None;
        }
    }
    next
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(n: usize) -> RecordStore {
        let records = (0..n)
            .map(|i| {
                let mut r = Record::new(format!("W{}", i), format!("Paper {}", i));
                if i > 0 {
                    r.backward_citations = vec![RecordId::new(format!("W{}", i - 1))];
                }
                r
            })
            .collect();
        RecordStore::new(records).expect("store")
    }

    #[test]
    fn initial_state_shows_everything() {
        let store = corpus(25);
        let state = ViewState::with_defaults(&store);

        assert_eq!(state.results.len(), 25);
        assert_eq!(state.page, 1);
        assert_eq!(state.total_pages(), 3);
        assert_eq!(state.page_records(&store).expect("page").len(), 10);
    }

    #[test]
    fn search_resets_page() {
        let store = corpus(25);
        let state = ViewState::with_defaults(&store);
        let state = reduce(&store, &state, Action::GotoPage(3));
        assert_eq!(state.page, 3);

        let state = reduce(
            &store,
            &state,
            Action::Search(FilterConfig::new().with_title("paper 1")),
        );
        assert_eq!(state.page, 1);
        // Paper 1, Paper 10..=19 and Paper 21
        assert_eq!(state.results.len(), 12);
    }

    #[test]
    fn paging_is_clamped() {
        let store = corpus(25);
        let state = ViewState::with_defaults(&store);

        let state = reduce(&store, &state, Action::PrevPage);
        assert_eq!(state.page, 1);
        let state = reduce(&store, &state, Action::GotoPage(99));
        assert_eq!(state.page, 3);
        let state = reduce(&store, &state, Action::NextPage);
        assert_eq!(state.page, 3);
        assert_eq!(state.page_records(&store).expect("page").len(), 5);
    }

    #[test]
    fn reduce_does_not_touch_previous_state() {
        let store = corpus(5);
        let before = ViewState::with_defaults(&store);
        let snapshot = before.clone();
        let _ = reduce(&store, &before, Action::Search(FilterConfig::new().with_title("x")));
        assert_eq!(before, snapshot);
    }

    #[test]
    fn row_command_uses_global_offset() {
        let store = corpus(25);
        let state = reduce(&store, &ViewState::with_defaults(&store), Action::GotoPage(2));

        let command = RowCommand::for_row(&state, RowKind::Graph, 3).expect("row");
        assert_eq!(command.record_id, RecordId::new("W13"));
        assert!(RowCommand::for_row(&state, RowKind::Graph, 10).is_none());

        let last = reduce(&store, &state, Action::GotoPage(3));
        assert!(RowCommand::for_row(&last, RowKind::Details, 5).is_none());
    }

    #[test]
    fn graph_open_regenerate_close() {
        let store = corpus(5);
        let state = ViewState::with_defaults(&store);
        let command = RowCommand::new(RowKind::Graph, RecordId::new("W4"));

        let state = reduce(&store, &state, Action::Row(command));
        let graph = state.graph.clone().expect("graph");
        assert_eq!(graph.nodes.len(), 2);

        let state = reduce(&store, &state, Action::SetDepth(3));
        let state = reduce(&store, &state, Action::RegenerateGraph);
        assert_eq!(state.graph.as_ref().map(|g| g.nodes.len()), Some(4));

        let state = reduce(&store, &state, Action::CloseGraph);
        assert!(state.graph.is_none());
        assert_eq!(state.seed, Some(RecordId::new("W4")));
    }

    #[test]
    fn details_open_and_close() {
        let store = corpus(3);
        let state = ViewState::with_defaults(&store);
        let command = RowCommand::new(RowKind::Details, RecordId::new("W1"));

        let state = reduce(&store, &state, Action::Row(command));
        assert_eq!(
            state.details_record(&store).map(Record::title_str),
            Some("Paper 1")
        );

        let state = reduce(&store, &state, Action::CloseDetails);
        assert!(state.details.is_none());
    }

    #[test]
    fn unknown_record_ignored() {
        let store = corpus(3);
        let state = ViewState::with_defaults(&store);
        let command = RowCommand::new(RowKind::Graph, RecordId::new("missing"));
        let next = reduce(&store, &state, Action::Row(command));
        assert_eq!(next, state);
    }

    #[test]
    fn depth_is_bounded() {
        let store = corpus(3);
        let state = ViewState::with_defaults(&store);
        assert_eq!(reduce(&store, &state, Action::SetDepth(0)).depth, 1);
        assert_eq!(
            reduce(&store, &state, Action::SetDepth(10_000)).depth,
            MAX_GRAPH_DEPTH
        );
    }
}
