//! Whole-graph inference: symmetric expansion plus per-node transitive closure.

use std::collections::HashSet;

use super::{
    compute_closure, expand_symmetric, Edge, EdgeKey, InferenceOptions, InferredEdge, NodeId,
    RelationshipType,
};

/// Compute every inferred edge implied by `edges`.
///
/// Symmetric expansion runs once; then a closure is computed for every
/// transitive relationship type from every id in `node_ids`. Results are merged
/// on `(from, to, rel)` so each implied link appears once, keeping the first
/// provenance found. Ids in `node_ids` that have no edges are harmless, and
/// edges may reference ids missing from `node_ids` (those nodes are then never
/// used as closure starts).
///
/// Cost is roughly O(relation types x nodes x (V+E)). That is fine for bounded
/// or interactive use such as explaining a single link or rendering a local
/// neighbourhood, but nothing is cached between calls; callers needing
/// continuous whole-graph materialisation should cache keyed on the edge set.
///
/// Output order is deterministic for a given input but carries no meaning.
pub fn compute_all_inferences(
    edges: &[Edge],
    node_ids: &[NodeId],
    options: &InferenceOptions,
) -> Vec<InferredEdge> {
    let mut seen: HashSet<EdgeKey> = HashSet::new();
    let mut result = Vec::new();

    let symmetric = expand_symmetric(edges);
    let symmetric_count = symmetric.len();
    for edge in symmetric {
        if seen.insert(edge.key()) {
            result.push(edge);
        }
    }

    let mut truncated = 0usize;
    for rel in RelationshipType::transitive() {
        if !edges.iter().any(|e| e.rel == rel) {
            continue;
        }
        for node_id in node_ids {
            let closure = compute_closure(edges, node_id, rel, options);
            if closure.truncated {
                truncated += 1;
            }
            for edge in closure.inferred {
                if seen.insert(edge.key()) {
                    result.push(edge);
                }
            }
        }
    }

    log::debug!(
        "Inferred {} edges ({} symmetric) from {} explicit edges over {} nodes",
        result.len(),
        symmetric_count,
        edges.len(),
        node_ids.len()
    );
    if truncated > 0 {
        log::warn!(
            "{} closures hit max_depth {}; inferred set is a lower bound",
            truncated,
            options.max_depth
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::collect_node_ids;

    fn as_set(edges: &[InferredEdge]) -> HashSet<(String, String, RelationshipType, Vec<String>)> {
        edges
            .iter()
            .map(|e| (e.from.clone(), e.to.clone(), e.rel, e.via.clone()))
            .collect()
    }

    fn ids(ids: &[&str]) -> Vec<NodeId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_symmetric_only() {
        let edges = vec![Edge::new("A", "B", RelationshipType::SeeAlso)];
        let result =
            compute_all_inferences(&edges, &ids(&["A", "B"]), &InferenceOptions::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].from, "B");
        assert_eq!(result[0].to, "A");
        assert!(result[0].via.is_empty());
    }

    #[test]
    fn test_all_transitive_chain() {
        let edges = vec![
            Edge::new("A", "B", RelationshipType::IsA),
            Edge::new("B", "C", RelationshipType::IsA),
        ];
        let result = compute_all_inferences(
            &edges,
            &ids(&["A", "B", "C"]),
            &InferenceOptions::default(),
        );
        let expected: HashSet<_> = [(
            "A".to_string(),
            "C".to_string(),
            RelationshipType::IsA,
            vec!["B".to_string()],
        )]
        .into_iter()
        .collect();
        assert_eq!(as_set(&result), expected);
        assert!(!result.iter().any(|e| e.from == "A" && e.to == "B"));
    }

    #[test]
    fn test_all_mixed_relations_deduplicated() {
        let edges = vec![
            Edge::new("A", "B", RelationshipType::DependsOn),
            Edge::new("B", "C", RelationshipType::DependsOn),
            Edge::new("C", "D", RelationshipType::DependsOn),
            Edge::new("A", "X", RelationshipType::SeeAlso),
            Edge::new("A", "B", RelationshipType::EvidenceFor),
            Edge::new("B", "C", RelationshipType::EvidenceFor),
        ];
        let nodes = collect_node_ids(&edges);
        let result = compute_all_inferences(&edges, &nodes, &InferenceOptions::default());

        // A->C, A->D, B->D (depends_on) and X->A (see_also)
        assert_eq!(result.len(), 4);
        assert_eq!(as_set(&result).len(), result.len());
        assert!(result.iter().all(|e| e.rel != RelationshipType::EvidenceFor));
        assert!(result
            .iter()
            .any(|e| e.from == "B" && e.to == "D" && e.via == vec!["C".to_string()]));
    }

    #[test]
    fn test_all_idempotent() {
        let edges = vec![
            Edge::new("A", "B", RelationshipType::PartOf),
            Edge::new("B", "C", RelationshipType::PartOf),
            Edge::new("C", "A", RelationshipType::PartOf),
            Edge::new("A", "C", RelationshipType::SeeAlso),
        ];
        let nodes = collect_node_ids(&edges);
        let first = compute_all_inferences(&edges, &nodes, &InferenceOptions::default());
        let second = compute_all_inferences(&edges, &nodes, &InferenceOptions::default());
        assert_eq!(as_set(&first), as_set(&second));
    }

    #[test]
    fn test_all_does_not_mutate_input() {
        let edges = vec![
            Edge::new("A", "B", RelationshipType::DependsOn),
            Edge::new("B", "C", RelationshipType::DependsOn),
        ];
        let before = edges.clone();
        let _ = compute_all_inferences(&edges, &ids(&["A"]), &InferenceOptions::default());
        assert_eq!(edges, before);
    }

    #[test]
    fn test_all_only_starts_from_given_nodes() {
        let edges = vec![
            Edge::new("A", "B", RelationshipType::DependsOn),
            Edge::new("B", "C", RelationshipType::DependsOn),
            Edge::new("C", "D", RelationshipType::DependsOn),
        ];
        let result = compute_all_inferences(
            &edges,
            &ids(&["B", "ghost"]),
            &InferenceOptions::default(),
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].from, "B");
        assert_eq!(result[0].to, "D");
    }

    #[test]
    fn test_all_empty_graph() {
        let result = compute_all_inferences(&[], &ids(&["A"]), &InferenceOptions::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_all_respects_max_depth() {
        let edges = vec![
            Edge::new("A", "B", RelationshipType::RoutesTo),
            Edge::new("B", "C", RelationshipType::RoutesTo),
            Edge::new("C", "D", RelationshipType::RoutesTo),
        ];
        let result =
            compute_all_inferences(&edges, &ids(&["A"]), &InferenceOptions { max_depth: 2 });
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].to, "C");
    }
}
