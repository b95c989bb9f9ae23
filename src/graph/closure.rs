//! Bounded BFS transitive closure along a single relationship type.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use super::{ClosureResult, Edge, InferenceOptions, InferredEdge, RelationshipType};

/// Compute every node reachable from `start_id` by chaining `rel` edges.
///
/// Only edges whose type is `rel` are followed, and only when `rel` is
/// transitive; any other relation yields an empty result. Nodes one hop away
/// are reported in `reachable` but not as inferred, since they duplicate an
/// explicit edge. Each node two or more hops away yields one [`InferredEdge`]
/// whose `via` lists the intermediates of the path that first discovered it.
///
/// Nodes are marked visited on discovery and never re-enqueued, so cycles
/// terminate and work stays O(V+E) in the filtered subgraph. Neighbours are
/// visited in ascending id order: when several shortest paths reach the same
/// node, `via` is the lexicographically smallest intermediate sequence.
///
/// Nodes at `max_depth` hops are not expanded. If one of them still has an
/// undiscovered successor the result is flagged `truncated`.
pub fn compute_closure(
    edges: &[Edge],
    start_id: &str,
    rel: RelationshipType,
    options: &InferenceOptions,
) -> ClosureResult {
    let mut result = ClosureResult::empty(start_id, rel);
    if !rel.is_transitive() {
        return result;
    }

    let mut adjacency: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    for edge in edges.iter().filter(|e| e.rel == rel) {
        adjacency
            .entry(edge.from.as_str())
            .or_default()
            .insert(edge.to.as_str());
    }

    let mut visited: HashSet<&str> = HashSet::new();
    // (node, depth, intermediates between start and node)
    let mut queue: VecDeque<(&str, usize, Vec<&str>)> = VecDeque::new();

    visited.insert(start_id);
    queue.push_back((start_id, 0, Vec::new()));

    while let Some((node, depth, via)) = queue.pop_front() {
        let Some(neighbors) = adjacency.get(node) else {
            continue;
        };

        if depth >= options.max_depth {
            if neighbors.iter().any(|next| !visited.contains(next)) {
                result.truncated = true;
            }
            continue;
        }

        let mut next_via = via;
        if depth > 0 {
            next_via.push(node);
        }

        for &next in neighbors {
            if !visited.insert(next) {
                continue;
            }
            result.reachable.insert(next.to_string());
            if !next_via.is_empty() {
                result.inferred.push(InferredEdge::new(
                    start_id,
                    next,
                    rel,
                    next_via.iter().map(|s| s.to_string()).collect(),
                ));
            }
            queue.push_back((next, depth + 1, next_via.clone()));
        }
    }

    if result.truncated {
        log::trace!(
            "Closure of {} from {} truncated at depth {}",
            rel,
            start_id,
            options.max_depth
        );
    }

    result
}
