//! Slice loading: discovers slice files, parses their frontmatter and turns
//! links into the flat edge list the inference engine consumes.

pub mod frontmatter;
pub mod walker;

pub use frontmatter::{get_field, parse_frontmatter, slice_id, slice_title, split_frontmatter};
pub use walker::{discover_slices, SliceFile};

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use serde_yaml_ng::Value as YamlValue;

use crate::error::{Result, SlicesError};
use crate::graph::{
    collect_node_ids, extract_derivation_edge, extract_link_edges, extract_routing_edges, Edge,
    NodeId,
};

/// A parsed slice
#[derive(Debug, Clone)]
pub struct Slice {
    pub id: NodeId,
    pub title: String,
    pub frontmatter: YamlValue,
    pub body: String,
    pub path: PathBuf,
}

impl Slice {
    /// Frontmatter links plus the derivation back-reference.
    pub fn link_edges(&self) -> Vec<Edge> {
        let mut edges = extract_link_edges(&self.id, &self.frontmatter);
        edges.extend(extract_derivation_edge(&self.id, &self.frontmatter));
        edges
    }

    /// `routes_to` edges between agents named in body routing chains.
    pub fn routing_edges(&self) -> Vec<Edge> {
        extract_routing_edges(&self.body)
    }

    /// All explicit edges declared by this slice.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = self.link_edges();
        edges.extend(self.routing_edges());
        edges
    }
}

/// Edge snapshot of a slices directory
#[derive(Debug, Clone, Default)]
pub struct GraphSnapshot {
    /// Ids of every loaded slice in file name order, followed by the sorted
    /// `agent:` ids named in routing chains.
    pub node_ids: Vec<NodeId>,
    pub edges: Vec<Edge>,
}

/// Read and parse a single slice file.
pub fn read_slice(path: &Path) -> Result<Slice> {
    let content = std::fs::read_to_string(path)?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let (frontmatter, body) = parse_frontmatter(&content, &path.display().to_string())?;

    let id = slice_id(&frontmatter, stem);
    let title = slice_title(&frontmatter, &id);

    Ok(Slice {
        id,
        title,
        body: body.to_string(),
        frontmatter,
        path: path.to_path_buf(),
    })
}

/// Load every slice in `dir` and collect its edges.
///
/// Slices with unparsable frontmatter are skipped with a warning so one broken
/// file does not hide the rest of the graph.
pub fn load_snapshot(dir: &Path, extension: &str) -> Result<GraphSnapshot> {
    let mut snapshot = GraphSnapshot::default();
    let mut agents: BTreeSet<NodeId> = BTreeSet::new();

    for file in discover_slices(dir, extension)? {
        let slice = match read_slice(&file.path) {
            Ok(slice) => slice,
            Err(SlicesError::Parse(msg)) => {
                log::warn!("Skipping {}: {}", file.path.display(), msg);
                continue;
            }
            Err(e) => return Err(e),
        };

        let routing = slice.routing_edges();
        agents.extend(collect_node_ids(&routing));
        snapshot.edges.extend(slice.link_edges());
        snapshot.edges.extend(routing);
        snapshot.node_ids.push(slice.id);
    }

    let slice_count = snapshot.node_ids.len();
    // Agents are closure starts too, unless a slice already carries that id
    let known: HashSet<NodeId> = snapshot.node_ids.iter().cloned().collect();
    snapshot
        .node_ids
        .extend(agents.into_iter().filter(|agent| !known.contains(agent)));

    log::info!(
        "Loaded {} slices ({} routing agents) with {} explicit edges from {}",
        slice_count,
        snapshot.node_ids.len() - slice_count,
        snapshot.edges.len(),
        dir.display()
    );
    Ok(snapshot)
}

/// Find a slice file by id.
///
/// Tries `<id>.<extension>` first, then the first file (by name) whose stem
/// starts with or contains `id`. Empty ids and ids containing path separators
/// or `..` are rejected so the lookup stays inside `dir`.
pub fn find_slice(dir: &Path, extension: &str, id: &str) -> Result<PathBuf> {
    if id.trim().is_empty() {
        return Err(SlicesError::InvalidInput("Slice id must not be empty".to_string()));
    }
    if id.contains(['/', '\\']) || id.contains("..") {
        return Err(SlicesError::InvalidInput(format!(
            "Slice id must not contain path components: {}",
            id
        )));
    }

    let exact = dir.join(format!("{}.{}", id, extension));
    if exact.is_file() {
        return Ok(exact);
    }

    discover_slices(dir, extension)?
        .into_iter()
        .find(|f| f.stem.starts_with(id) || f.stem.contains(id))
        .map(|f| f.path)
        .ok_or_else(|| SlicesError::SliceNotFound(id.to_string()))
}
