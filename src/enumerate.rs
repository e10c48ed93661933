//! Exhaustive exploration of the reachable state space.
//!
//! Depth-first with an explicit stack. Successors are pushed whether
//! or not they have been visited and duplicates are discarded at pop
//! time; marking at push time would drop edges from predecessors
//! discovered while a state is still open. Exploration ends when the
//! stack drains or the node ceiling is reached.

use std::collections::HashSet;

use thiserror::Error;

use crate::graph::{StateGraph, STEP_WEIGHT};
use crate::tiles::{Tile, TileMap};
use crate::transition::{self, PuzzleState};

/// Number of ordered triples of distinct tiles on the 21-tile room; no
/// run can produce more states than this.
pub const MAX_DISTINCT_STATES: usize = 21 * 20 * 19;

#[derive(Debug, Clone)]
pub struct EnumeratorConfig {
    /// Stop once the graph holds this many states.
    pub max_states: usize,
}

impl Default for EnumeratorConfig {
    fn default() -> Self {
        Self {
            max_states: MAX_DISTINCT_STATES,
        }
    }
}

/// A generated state graph plus whether the ceiling cut it short.
#[derive(Debug, Clone)]
pub struct Enumeration {
    pub graph: StateGraph,
    /// True when the node ceiling stopped exploration; the graph may
    /// then be missing reachable states.
    pub truncated: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnumerateError {
    #[error("start position {0} is not a tile of the map")]
    StartOutsideMap(Tile),
    #[error("start state {0} puts two pieces on the same tile")]
    StartCollision(PuzzleState),
}

/// Check that a start state lies on the map with all pieces on
/// distinct tiles.
pub fn validate_start(map: &TileMap, start: PuzzleState) -> Result<(), EnumerateError> {
    for tile in start.positions() {
        if !map.contains(tile) {
            return Err(EnumerateError::StartOutsideMap(tile));
        }
    }
    if !start.is_collision_free() {
        return Err(EnumerateError::StartCollision(start));
    }
    Ok(())
}

/// Build the graph of every state reachable from `start`.
pub fn enumerate(
    map: &TileMap,
    start: PuzzleState,
    config: &EnumeratorConfig,
) -> Result<Enumeration, EnumerateError> {
    validate_start(map, start)?;

    let mut graph = StateGraph::new();
    let mut truncated = false;

    if config.max_states == 0 {
        return Ok(Enumeration {
            graph,
            truncated: true,
        });
    }

    let mut visited: HashSet<PuzzleState> = HashSet::new();
    let mut stack = vec![start];

    'explore: while let Some(state) = stack.pop() {
        if !visited.insert(state) {
            continue;
        }
        let from = graph.add_node(state);
        for next in transition::next_states(map, state) {
            if graph.node_id(&next).is_none() && graph.node_count() >= config.max_states {
                truncated = true;
                break 'explore;
            }
            let to = graph.add_node(next);
            graph.add_edge(from, to, STEP_WEIGHT);
            stack.push(next);
        }
    }

    Ok(Enumeration { graph, truncated })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> PuzzleState {
        PuzzleState::new(11, 13, 9)
    }

    #[test]
    fn test_every_state_is_collision_free() {
        let map = TileMap::sacred_grove();
        let result = enumerate(&map, start(), &EnumeratorConfig::default()).unwrap();
        assert!(result.graph.node_count() > 0);
        for (_, state) in result.graph.iter() {
            assert!(state.is_collision_free(), "collision in {}", state);
        }
    }

    #[test]
    fn test_reruns_are_identical() {
        let map = TileMap::sacred_grove();
        let config = EnumeratorConfig::default();
        let first = enumerate(&map, start(), &config).unwrap();
        let second = enumerate(&map, start(), &config).unwrap();

        let nodes =
            |g: &StateGraph| g.iter().map(|(_, s)| s).collect::<HashSet<PuzzleState>>();
        let edges = |g: &StateGraph| {
            g.iter()
                .flat_map(|(id, s)| {
                    g.out_edges(id)
                        .iter()
                        .map(move |e| (s, g.state(e.to)))
                        .collect::<Vec<_>>()
                })
                .collect::<HashSet<(PuzzleState, PuzzleState)>>()
        };

        assert_eq!(nodes(&first.graph), nodes(&second.graph));
        assert_eq!(edges(&first.graph), edges(&second.graph));
        assert!(!first.truncated);
        assert!(!second.truncated);
    }

    #[test]
    fn test_ceiling_is_respected() {
        let map = TileMap::sacred_grove();
        let config = EnumeratorConfig { max_states: 10 };
        let result = enumerate(&map, start(), &config).unwrap();
        assert!(result.graph.node_count() <= 10);
        assert!(result.truncated);
    }

    #[test]
    fn test_zero_ceiling_yields_empty_truncated_graph() {
        let map = TileMap::sacred_grove();
        let config = EnumeratorConfig { max_states: 0 };
        let result = enumerate(&map, start(), &config).unwrap();
        assert_eq!(result.graph.node_count(), 0);
        assert!(result.truncated);
    }

    #[test]
    fn test_stuck_start_is_a_single_terminal_node() {
        let map = TileMap::sacred_grove();
        // The wolf's only neighbor is occupied by the shadow statue.
        let stuck = PuzzleState::new(13, 12, 11);
        let result = enumerate(&map, stuck, &EnumeratorConfig::default()).unwrap();
        assert_eq!(result.graph.node_count(), 1);
        assert_eq!(result.graph.edge_count(), 0);
        assert!(!result.truncated);
    }

    #[test]
    fn test_start_validation() {
        let map = TileMap::sacred_grove();
        let config = EnumeratorConfig::default();
        assert_eq!(
            enumerate(&map, PuzzleState::new(25, 1, 2), &config).unwrap_err(),
            EnumerateError::StartOutsideMap(25)
        );
        assert_eq!(
            enumerate(&map, PuzzleState::new(1, 1, 2), &config).unwrap_err(),
            EnumerateError::StartCollision(PuzzleState::new(1, 1, 2))
        );
    }

    #[test]
    fn test_full_run_stays_within_state_universe() {
        let map = TileMap::sacred_grove();
        let result = enumerate(&map, start(), &EnumeratorConfig::default()).unwrap();
        assert!(result.graph.node_count() <= MAX_DISTINCT_STATES);
        assert!(!result.truncated);
    }
}
