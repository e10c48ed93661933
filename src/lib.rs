//! Solver library for the Sacred Grove statue puzzle.
//!
//! A wolf and two guardian statues move on a 21-tile room. The statues
//! copy the wolf's moves (one mirrored, one in the same direction) and
//! the room is solved when both statues stand on the pedestal tiles.
//! This crate enumerates the reachable state space exhaustively and
//! answers minimum-step solution queries over it.

pub mod enumerate;
pub mod graph;
pub mod persist;
pub mod search;
pub mod tiles;
pub mod transition;
pub mod walk;

// Re-export main types
pub use enumerate::{
    enumerate, validate_start, EnumerateError, Enumeration, EnumeratorConfig, MAX_DISTINCT_STATES,
};
pub use graph::{Edge, NodeId, StateGraph, STEP_WEIGHT};
pub use persist::{load, save, GraphFile, PersistError};
pub use search::{shortest_solution, GoalTiles, SearchError, Solution, SolveOutcome};
pub use tiles::{Direction, Tile, TileMap, TileMapError};
pub use transition::{apply_move, legal_destinations, next_states, PuzzleState};
pub use walk::{random_walk, Trajectory, WalkEnd};
