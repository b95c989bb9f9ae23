//! Edge extraction from slice frontmatter and body text.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde_yaml_ng::Value as YamlValue;

use super::{Edge, RelationshipType};
use crate::ingest::frontmatter::{get_field, scalar_to_string};

/// Extract explicit links from the `tt.links` list of a slice's frontmatter.
///
/// Each entry is a mapping with a string `rel` and a scalar `to` field (an
/// optional `label` is ignored); numeric targets are read as ids. Entries with
/// an unknown `rel` or missing fields are skipped with a warning. Repeated
/// `(to, rel)` pairs collapse to one edge.
pub fn extract_link_edges(slice_id: &str, frontmatter: &YamlValue) -> Vec<Edge> {
    let links = get_field(frontmatter, "tt.links").and_then(YamlValue::as_sequence);
    let Some(links) = links else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for link in links {
        let rel = link.get("rel").and_then(YamlValue::as_str);
        let to = link.get("to").and_then(scalar_to_string);
        let (Some(rel), Some(to)) = (rel, to) else {
            log::warn!("Skipping malformed link in {}: {:?}", slice_id, link);
            continue;
        };

        let rel = match rel.parse::<RelationshipType>() {
            Ok(rel) => rel,
            Err(e) => {
                log::warn!("Skipping link {} -> {}: {}", slice_id, to, e);
                continue;
            }
        };

        if seen.insert((to.clone(), rel)) {
            edges.push(Edge::new(slice_id, to, rel));
        }
    }

    edges
}

/// Extract the single derivation back-reference of a slice.
///
/// Reads `tt.derived_from.id`, then top-level `derived_from.id`. A bare scalar
/// in place of the mapping is accepted too.
pub fn extract_derivation_edge(slice_id: &str, frontmatter: &YamlValue) -> Option<Edge> {
    ["tt.derived_from", "derived_from"]
        .iter()
        .filter_map(|path| get_field(frontmatter, path))
        .find_map(|value| match value.get("id") {
            Some(id) => scalar_to_string(id),
            None => scalar_to_string(value),
        })
        .filter(|target| !target.trim().is_empty())
        .map(|target| Edge::new(slice_id, target, RelationshipType::DerivedFrom))
}

fn routing_chain_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[\w-]+(?:[ \t]*→[ \t]*[\w-]+)+").expect("Invalid regex pattern")
    })
}

/// Extract agent routing chains from body text.
/// Matches patterns like: "Agent-A → Agent-B → Agent-C", which yields
/// `routes_to` edges A→B and B→C between `agent:`-prefixed lowercase ids.
pub fn extract_routing_edges(content: &str) -> Vec<Edge> {
    let mut edges = Vec::new();

    for chain in routing_chain_regex().find_iter(content) {
        let agents: Vec<String> = chain
            .as_str()
            .split('→')
            .map(|name| format!("agent:{}", name.trim().to_lowercase()))
            .collect();

        for pair in agents.windows(2) {
            edges.push(Edge::new(
                pair[0].as_str(),
                pair[1].as_str(),
                RelationshipType::RoutesTo,
            ));
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> YamlValue {
        serde_yaml_ng::from_str(s).unwrap()
    }

    #[test]
    fn test_extract_links_basic() {
        let fm = yaml(
            r#"
tt:
  id: 01A
  links:
    - rel: depends_on
      to: 01B
    - rel: see_also
      to: 01C
      label: background
"#,
        );
        let edges = extract_link_edges("01A", &fm);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0], Edge::new("01A", "01B", RelationshipType::DependsOn));
        assert_eq!(edges[1], Edge::new("01A", "01C", RelationshipType::SeeAlso));
    }

    #[test]
    fn test_extract_links_skips_unknown_and_malformed() {
        let fm = yaml(
            r#"
tt:
  links:
    - rel: related_to
      to: 01B
    - rel: is_a
    - to: 01D
    - rel: is_a
      to: 01E
"#,
        );
        let edges = extract_link_edges("01A", &fm);
        assert_eq!(edges, vec![Edge::new("01A", "01E", RelationshipType::IsA)]);
    }

    #[test]
    fn test_extract_links_collapses_duplicates() {
        let fm = yaml(
            r#"
tt:
  links:
    - { rel: blocks, to: 01B }
    - { rel: blocks, to: 01B, label: again }
    - { rel: depends_on, to: 01B }
"#,
        );
        assert_eq!(extract_link_edges("01A", &fm).len(), 2);
    }

    #[test]
    fn test_extract_numeric_targets() {
        let fm = yaml(
            r#"
tt:
  id: 123
  links:
    - rel: depends_on
      to: 456
  derived_from:
    id: 789
"#,
        );
        assert_eq!(
            extract_link_edges("123", &fm),
            vec![Edge::new("123", "456", RelationshipType::DependsOn)]
        );
        assert_eq!(
            extract_derivation_edge("123", &fm),
            Some(Edge::new("123", "789", RelationshipType::DerivedFrom))
        );
        let bare = yaml("derived_from: 42\n");
        assert_eq!(extract_derivation_edge("1", &bare).unwrap().to, "42");
    }

    #[test]
    fn test_extract_links_absent() {
        assert!(extract_link_edges("01A", &yaml("tt:\n  id: 01A\n")).is_empty());
        assert!(extract_link_edges("01A", &yaml("tt:\n  links: nope\n")).is_empty());
    }

    #[test]
    fn test_extract_derivation_nested_and_top_level() {
        let nested = yaml("tt:\n  derived_from:\n    id: 01SRC\n");
        assert_eq!(
            extract_derivation_edge("01A", &nested),
            Some(Edge::new("01A", "01SRC", RelationshipType::DerivedFrom))
        );

        let top = yaml("derived_from:\n  id: 01TOP\n  note: summary\n");
        assert_eq!(extract_derivation_edge("01A", &top).unwrap().to, "01TOP");

        let bare = yaml("derived_from: 01BARE\n");
        assert_eq!(extract_derivation_edge("01A", &bare).unwrap().to, "01BARE");

        assert!(extract_derivation_edge("01A", &yaml("tt:\n  id: 01A\n")).is_none());
        assert!(extract_derivation_edge("01A", &yaml("derived_from:\n  id: ''\n")).is_none());
    }

    #[test]
    fn test_extract_routing_basic() {
        let content = "DefaultChains: Agent-A → Agent-B";
        let edges = extract_routing_edges(content);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].from, "agent:agent-a");
        assert_eq!(edges[0].to, "agent:agent-b");
        assert_eq!(edges[0].rel, RelationshipType::RoutesTo);
    }

    #[test]
    fn test_extract_routing_chain() {
        let edges = extract_routing_edges("Triage → Research → Writer");
        assert_eq!(edges.len(), 2);
        assert_eq!(
            edges[0],
            Edge::new("agent:triage", "agent:research", RelationshipType::RoutesTo)
        );
        assert_eq!(
            edges[1],
            Edge::new("agent:research", "agent:writer", RelationshipType::RoutesTo)
        );
    }

    #[test]
    fn test_extract_routing_multiple() {
        let edges = extract_routing_edges("A → B and C → D");
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].from, "agent:a");
        assert_eq!(edges[0].to, "agent:b");
        assert_eq!(edges[1].from, "agent:c");
        assert_eq!(edges[1].to, "agent:d");
    }

    #[test]
    fn test_extract_routing_no_matches() {
        assert!(extract_routing_edges("No arrows here, just text.").is_empty());
    }
}
