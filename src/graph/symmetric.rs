//! Reverse-edge synthesis for symmetric relationship types.

use std::collections::HashSet;

use super::{Edge, InferredEdge};

/// Emit the missing reverse of every symmetric edge.
///
/// For each edge whose type is symmetric, `(to, from, rel)` is produced with an
/// empty `via` unless it is already explicit or was emitted earlier in the
/// same pass. Non-symmetric edges produce nothing. Running this again over
/// `edges` plus its own output yields no further edges.
pub fn expand_symmetric(edges: &[Edge]) -> Vec<InferredEdge> {
    let mut seen: HashSet<(&str, &str, _)> = edges
        .iter()
        .map(|e| (e.from.as_str(), e.to.as_str(), e.rel))
        .collect();
    let mut out = Vec::new();

    for edge in edges.iter().filter(|e| e.rel.is_symmetric()) {
        if seen.insert((edge.to.as_str(), edge.from.as_str(), edge.rel)) {
            out.push(InferredEdge::new(
                edge.to.as_str(),
                edge.from.as_str(),
                edge.rel,
                Vec::new(),
            ));
        }
    }

    out
}
