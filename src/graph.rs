//! Owned adjacency-list graph over puzzle states.
//!
//! Nodes are states, edges are single legal moves. The enumerator
//! builds it incrementally; everything downstream only reads it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::transition::PuzzleState;

/// Index of a state in the node table.
pub type NodeId = usize;

/// Uniform cost of a single wolf move.
pub const STEP_WEIGHT: u32 = 1;

/// Outgoing edge of the state graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub to: NodeId,
    pub steps: u32,
}

#[derive(Debug, Clone, Default)]
pub struct StateGraph {
    nodes: Vec<PuzzleState>,
    index: HashMap<PuzzleState, NodeId>,
    edges: Vec<Vec<Edge>>,
}

impl StateGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a state and return its id. Idempotent: re-inserting an
    /// existing state returns the id it already has.
    pub fn add_node(&mut self, state: PuzzleState) -> NodeId {
        if let Some(&id) = self.index.get(&state) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(state);
        self.edges.push(Vec::new());
        self.index.insert(state, id);
        id
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId, steps: u32) {
        self.edges[from].push(Edge { to, steps });
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    pub fn state(&self, id: NodeId) -> PuzzleState {
        self.nodes[id]
    }

    pub fn node_id(&self, state: &PuzzleState) -> Option<NodeId> {
        self.index.get(state).copied()
    }

    pub fn contains(&self, state: &PuzzleState) -> bool {
        self.index.contains_key(state)
    }

    pub fn out_edges(&self, id: NodeId) -> &[Edge] {
        &self.edges[id]
    }

    /// All nodes with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, PuzzleState)> + '_ {
        self.nodes.iter().copied().enumerate()
    }
}
