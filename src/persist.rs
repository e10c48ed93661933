//! On-disk JSON form of a generated state graph.
//!
//! The file keeps the node table (three positions per node), the
//! weighted edge list by node index, and the truncation flag, so a
//! reloaded graph answers solution queries exactly like a freshly
//! generated one.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enumerate::Enumeration;
use crate::graph::StateGraph;
use crate::transition::PuzzleState;

/// Serialized graph. `nodes[i]` is the state of node id `i`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphFile {
    pub truncated: bool,
    pub nodes: Vec<PuzzleState>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: usize,
    pub to: usize,
    pub steps: u32,
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed graph file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("node {0} appears twice in the graph file")]
    DuplicateNode(usize),
    #[error("edge references node {0}, file has {1} nodes")]
    NodeOutOfRange(usize, usize),
}

impl From<&Enumeration> for GraphFile {
    fn from(enumeration: &Enumeration) -> Self {
        let graph = &enumeration.graph;
        let mut edges = Vec::with_capacity(graph.edge_count());
        for (id, _) in graph.iter() {
            for edge in graph.out_edges(id) {
                edges.push(EdgeRecord {
                    from: id,
                    to: edge.to,
                    steps: edge.steps,
                });
            }
        }
        Self {
            truncated: enumeration.truncated,
            nodes: graph.iter().map(|(_, state)| state).collect(),
            edges,
        }
    }
}

impl TryFrom<GraphFile> for Enumeration {
    type Error = PersistError;

    fn try_from(file: GraphFile) -> Result<Self, PersistError> {
        let node_count = file.nodes.len();
        let mut graph = StateGraph::new();
        for (position, &state) in file.nodes.iter().enumerate() {
            if graph.add_node(state) != position {
                return Err(PersistError::DuplicateNode(position));
            }
        }
        for record in file.edges {
            for id in [record.from, record.to] {
                if id >= node_count {
                    return Err(PersistError::NodeOutOfRange(id, node_count));
                }
            }
            graph.add_edge(record.from, record.to, record.steps);
        }
        Ok(Enumeration {
            graph,
            truncated: file.truncated,
        })
    }
}

/// Write an enumeration to `path` as JSON.
pub fn save(path: &Path, enumeration: &Enumeration) -> Result<(), PersistError> {
    let file = GraphFile::from(enumeration);
    fs::write(path, serde_json::to_string(&file)?)?;
    Ok(())
}

/// Load an enumeration previously written by [`save`].
pub fn load(path: &Path) -> Result<Enumeration, PersistError> {
    let file: GraphFile = serde_json::from_str(&fs::read_to_string(path)?)?;
    Enumeration::try_from(file)
}
