//! Locating solved states and the shortest way to reach them.
//!
//! A state is solved when the two statues stand on the pedestal pair,
//! in either order. Paths are found with Dijkstra over the step
//! weights; with every edge costing one step this visits in
//! breadth-first order, but the weighted form keeps the query generic.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use thiserror::Error;

use crate::graph::{NodeId, StateGraph};
use crate::tiles::Tile;
use crate::transition::PuzzleState;

/// The unordered pair of pedestal tiles both statues must reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalTiles {
    a: Tile,
    b: Tile,
}

impl GoalTiles {
    pub fn new(a: Tile, b: Tile) -> Self {
        Self { a, b }
    }

    /// True when the statues stand on the pedestals, in either order.
    pub fn matches(&self, state: &PuzzleState) -> bool {
        (state.shadow == self.a && state.mirror == self.b)
            || (state.shadow == self.b && state.mirror == self.a)
    }
}

/// A minimal-step route from the start state to a solved state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Visited states from start to goal, inclusive.
    pub path: Vec<PuzzleState>,
    /// Number of moves, `path.len() - 1`.
    pub steps: u32,
}

/// Outcome of a solution query over a (possibly partial) graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved(Solution),
    /// The graph holds no state satisfying the goal. Check
    /// [`crate::enumerate::Enumeration::truncated`] before reading
    /// this as "unsolvable".
    NoGoalStates,
    /// Goal states exist but none is reachable from the start.
    GoalsUnreachable { goal_states: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("start state {0} is not a node of the state graph")]
    StartNotInGraph(PuzzleState),
}

/// Find the minimum-step path from `start` to the nearest goal state.
///
/// Ties between equally near goal states break on whichever the scan
/// meets first.
pub fn shortest_solution(
    graph: &StateGraph,
    start: PuzzleState,
    goals: GoalTiles,
) -> Result<SolveOutcome, SearchError> {
    let source = graph
        .node_id(&start)
        .ok_or(SearchError::StartNotInGraph(start))?;

    let goal_ids: Vec<NodeId> = graph
        .iter()
        .filter(|(_, state)| goals.matches(state))
        .map(|(id, _)| id)
        .collect();
    if goal_ids.is_empty() {
        return Ok(SolveOutcome::NoGoalStates);
    }

    let (dist, prev) = dijkstra(graph, source);

    let mut best: Option<(u32, NodeId)> = None;
    for &goal in &goal_ids {
        if let Some(steps) = dist[goal] {
            if best.map_or(true, |(shortest, _)| steps < shortest) {
                best = Some((steps, goal));
            }
        }
    }
    let Some((steps, goal)) = best else {
        return Ok(SolveOutcome::GoalsUnreachable {
            goal_states: goal_ids.len(),
        });
    };

    let mut path = Vec::new();
    let mut node = goal;
    loop {
        path.push(graph.state(node));
        match prev[node] {
            Some(parent) => node = parent,
            None => break,
        }
    }
    path.reverse();

    Ok(SolveOutcome::Solved(Solution { path, steps }))
}

/// Single-source distances and predecessors over the step weights.
fn dijkstra(graph: &StateGraph, source: NodeId) -> (Vec<Option<u32>>, Vec<Option<NodeId>>) {
    let mut dist: Vec<Option<u32>> = vec![None; graph.node_count()];
    let mut prev: Vec<Option<NodeId>> = vec![None; graph.node_count()];
    let mut heap: BinaryHeap<Reverse<(u32, NodeId)>> = BinaryHeap::new();

    dist[source] = Some(0);
    heap.push(Reverse((0, source)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if dist[node] != Some(cost) {
            continue; // stale queue entry
        }
        for edge in graph.out_edges(node) {
            let candidate = cost + edge.steps;
            if dist[edge.to].map_or(true, |known| candidate < known) {
                dist[edge.to] = Some(candidate);
                prev[edge.to] = Some(node);
                heap.push(Reverse((candidate, edge.to)));
            }
        }
    }

    (dist, prev)
}
