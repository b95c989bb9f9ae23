pub mod config;
pub mod error;
pub mod graph;
pub mod ingest;

pub use config::Config;
pub use error::{Result, SlicesError};
pub use graph::{
    collect_node_ids, compute_all_inferences, compute_closure, expand_symmetric, ClosureResult,
    Edge, InferenceOptions, InferredEdge, NodeId, RelationshipProperties, RelationshipType,
};
pub use ingest::{load_snapshot, GraphSnapshot};
