//! Knowledge graph module: relation catalog, edge extraction and inference.
//!
//! Explicit links between slices are plain [`Edge`] triples. The inference
//! functions derive the links those edges imply (transitive chains and
//! symmetric reverses) without touching the input, tagging every derived link
//! with the intermediate nodes that explain it.

mod catalog;
mod closure;
mod extraction;
mod inference;
mod symmetric;

pub use catalog::{inverse, properties, RelationshipProperties, RelationshipType};
pub use closure::compute_closure;
pub use extraction::{extract_derivation_edge, extract_link_edges, extract_routing_edges};
pub use inference::compute_all_inferences;
pub use symmetric::expand_symmetric;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Stable identifier of a slice.
pub type NodeId = String;

/// Default hop bound for closure computation.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// An explicit link (from --rel--> to).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub rel: RelationshipType,
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, rel: RelationshipType) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            rel,
        }
    }
}

/// A link implied by explicit edges but not stored anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InferredEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub rel: RelationshipType,
    /// Intermediate nodes in hop order. Empty for symmetric reverses.
    pub via: Vec<NodeId>,
    pub inferred: bool,
}

impl InferredEdge {
    pub fn new(
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        rel: RelationshipType,
        via: Vec<NodeId>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            rel,
            via,
            inferred: true,
        }
    }

    /// Number of explicit edges chained to produce this link.
    pub fn hop_count(&self) -> usize {
        self.via.len() + 1
    }

    pub(crate) fn key(&self) -> EdgeKey {
        (self.from.clone(), self.to.clone(), self.rel)
    }
}

/// Outcome of a single transitive closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureResult {
    pub start_id: NodeId,
    pub rel: RelationshipType,
    /// Every node reachable in one or more hops, excluding the start node.
    pub reachable: BTreeSet<NodeId>,
    /// Nodes reached in two or more hops.
    pub inferred: Vec<InferredEdge>,
    /// Set when `max_depth` cut the traversal short; `reachable` is then a lower bound.
    pub truncated: bool,
}

impl ClosureResult {
    pub(crate) fn empty(start_id: &str, rel: RelationshipType) -> Self {
        Self {
            start_id: start_id.to_string(),
            rel,
            reachable: BTreeSet::new(),
            inferred: Vec::new(),
            truncated: false,
        }
    }
}

/// Tuning for closure and whole-graph inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceOptions {
    pub max_depth: usize,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

pub(crate) type EdgeKey = (NodeId, NodeId, RelationshipType);

/// Distinct node ids appearing on either end of `edges`, sorted.
pub fn collect_node_ids(edges: &[Edge]) -> Vec<NodeId> {
    edges
        .iter()
        .flat_map(|e| [e.from.as_str(), e.to.as_str()])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
