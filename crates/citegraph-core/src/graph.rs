//! # Citation Graph Builder
//!
//! Bounded bidirectional traversal over citation links, starting at a seed.
//!
//! The traversal is depth-first and runs on an explicit stack of frames, so
//! cyclic or very deep citation graphs never exhaust the call stack. Each
//! frame walks its record's backward citations first and its forward
//! citations second, both in stored order. This order decides which role a
//! node receives: the first visit wins and a role is never reassigned.
//!
//! - Dangling citation ids are skipped: no node, no edge, no expansion
//! - Nodes are unique by id, edges are unique by (source, target)
//! - A node is expanded again only when reached at a strictly smaller
//!   level than before, so every record within `max_depth` hops is found
//!   and each node is expanded at most `max_depth` times

use crate::primitives::{DEFAULT_GRAPH_DEPTH, MAX_GRAPH_DEPTH};
use crate::{CiteError, Record, RecordId, RecordStore};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// GRAPH VIEW TYPES
// =============================================================================

/// How a node was first reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    /// The traversal origin.
    Seed,
    /// Reached through a backward citation (a work the current record cites).
    Backward,
    /// Reached through a forward citation (a work citing the current record).
    Forward,
}

impl NodeRole {
    /// Stable lower-case name, used by renderers to pick a style.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            NodeRole::Seed => "seed",
            NodeRole::Backward => "backward",
            NodeRole::Forward => "forward",
        }
    }
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the citation graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: RecordId,
    /// Display label (the record title).
    pub label: String,
    pub role: NodeRole,
    /// Smallest number of hops from the seed at which the node was reached.
    pub level: usize,
}

/// A directed edge, always pointing from the citing to the cited record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: RecordId,
    pub target: RecordId,
}

impl GraphEdge {
    #[must_use]
    pub fn new(source: RecordId, target: RecordId) -> Self {
        Self { source, target }
    }

    /// Edge identifier, `source->target`.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}->{}", self.source, self.target)
    }
}

/// The graph handed to layout/rendering and export collaborators.
///
/// Nodes and edges are in first-discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationGraph {
    pub seed: RecordId,
    pub max_depth: usize,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl CitationGraph {
    /// Full records of the nodes, in first-discovery order.
    #[must_use]
    pub fn records<'s>(&self, store: &'s RecordStore) -> Vec<&'s Record> {
        self.nodes.iter().filter_map(|n| store.get(&n.id)).collect()
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &RecordId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Check if the graph contains a directed edge.
    #[must_use]
    pub fn contains_edge(&self, source: &RecordId, target: &RecordId) -> bool {
        self.edges
            .iter()
            .any(|e| &e.source == source && &e.target == target)
    }

    /// Number of nodes carrying a given role.
    #[must_use]
    pub fn count_role(&self, role: NodeRole) -> usize {
        self.nodes.iter().filter(|n| n.role == role).count()
    }
}

// =============================================================================
// DEPTH INPUT
// =============================================================================

/// Interpret a user-supplied depth.
///
/// Non-numeric, zero or negative input falls back to `DEFAULT_GRAPH_DEPTH`;
/// values above `MAX_GRAPH_DEPTH` are capped.
#[must_use]
pub fn parse_depth(input: &str) -> usize {
    match input.trim().parse::<i64>() {
        Ok(depth) if depth > 0 => usize::try_from(depth)
            .unwrap_or(MAX_GRAPH_DEPTH)
            .min(MAX_GRAPH_DEPTH),
        _ => DEFAULT_GRAPH_DEPTH,
    }
}

// =============================================================================
// TRAVERSAL
// =============================================================================

/// One pending expansion on the traversal stack.
///
/// `cursor` walks the record's backward citations, then its forward ones.
#[derive(Debug)]
struct Frame<'s> {
    record: &'s Record,
    level: usize,
    cursor: usize,
}

impl<'s> Frame<'s> {
    fn new(record: &'s Record, level: usize) -> Self {
        Self {
            record,
            level,
            cursor: 0,
        }
    }

    /// Next citation of this frame's record with the role it implies.
    fn next_citation(&mut self) -> Option<(&'s RecordId, NodeRole)> {
        let record = self.record;
        let backward = record.backward_citations.len();
        let next = if self.cursor < backward {
            record
                .backward_citations
                .get(self.cursor)
                .map(|id| (id, NodeRole::Backward))
        } else {
            record
                .forward_citations
                .get(self.cursor - backward)
                .map(|id| (id, NodeRole::Forward))
        };
        self.cursor += 1;
        next
    }
}

/// Accumulates the de-duplicated node and edge sets.
#[derive(Debug, Default)]
struct GraphAccumulator {
    nodes: Vec<GraphNode>,
    /// Node id -> position in `nodes`.
    node_index: BTreeMap<RecordId, usize>,
    edges: Vec<GraphEdge>,
    edge_set: BTreeSet<(RecordId, RecordId)>,
}

impl GraphAccumulator {
    /// Record a visit at `level`.
    ///
    /// Returns true if the node must be (re-)expanded: it is new, or it was
    /// only known at a deeper level.
    fn visit(&mut self, record: &Record, role: NodeRole, level: usize) -> bool {
        match self.node_index.get(&record.id) {
            Some(&position) => {
                let node = &mut self.nodes[position];
                if level < node.level {
                    node.level = level;
                    true
                } else {
                    false
                }
            }
            None => {
                self.node_index.insert(record.id.clone(), self.nodes.len());
                self.nodes.push(GraphNode {
                    id: record.id.clone(),
                    label: record.title_str().to_string(),
                    role,
                    level,
                });
                true
            }
        }
    }

    fn link(&mut self, source: &RecordId, target: &RecordId) {
        if self.edge_set.insert((source.clone(), target.clone())) {
            self.edges.push(GraphEdge::new(source.clone(), target.clone()));
        }
    }
}

/// Build the citation graph around `seed` up to `max_depth` hops.
///
/// A `max_depth` of 0 yields the seed alone; depths above `MAX_GRAPH_DEPTH`
/// are capped. The seed does not need to be in the store: its citation
/// lists are followed all the same.
#[must_use]
pub fn build_graph(store: &RecordStore, seed: &Record, max_depth: usize) -> CitationGraph {
    let max_depth = max_depth.min(MAX_GRAPH_DEPTH);
    let mut acc = GraphAccumulator::default();
    acc.visit(seed, NodeRole::Seed, 0);

    let mut stack: Vec<Frame<'_>> = Vec::new();
    if max_depth > 0 {
        stack.push(Frame::new(seed, 0));
    }

    while let Some(frame) = stack.last_mut() {
        let level = frame.level;
        let record = frame.record;
        let current = &record.id;
        let Some((cited_id, role)) = frame.next_citation() else {
            stack.pop();
            continue;
        };

        // Dangling reference: skipped entirely.
        let Some(neighbor) = store.get(cited_id) else {
            continue;
        };

        let next_level = level + 1;
        let expand = acc.visit(neighbor, role, next_level);

        match role {
            NodeRole::Backward => acc.link(current, &neighbor.id),
            _ => acc.link(&neighbor.id, current),
        }

        if expand && next_level < max_depth {
            stack.push(Frame::new(neighbor, next_level));
        }
    }

    CitationGraph {
        seed: seed.id.clone(),
        max_depth,
        nodes: acc.nodes,
        edges: acc.edges,
    }
}

/// Build the citation graph around the stored record `seed_id`.
pub fn build_graph_for(
    store: &RecordStore,
    seed_id: &RecordId,
    max_depth: usize,
) -> Result<CitationGraph, CiteError> {
    let seed = store.require(seed_id)?;
    Ok(build_graph(store, seed, max_depth))
}

// =============================================================================
// TESTS
// =============================================================================
