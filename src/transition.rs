//! Move semantics for the three pieces.
//!
//! The wolf picks a destination tile; both statues react to the compass
//! direction of that move. The mirror statue steps the opposite way,
//! the shadow statue steps the same way, and either stays put when
//! there is no tile that way or the other statue currently stands on
//! it. A move is legal only when the resulting triple is collision
//! free.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::tiles::{Direction, Tile, TileMap};

/// Joint position of the wolf and both statues: the unit of the search
/// space. Two states are the same configuration iff all three
/// positions match. A move never mutates a state, it produces a new
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuzzleState {
    pub wolf: Tile,
    pub shadow: Tile,
    pub mirror: Tile,
}

impl PuzzleState {
    pub fn new(wolf: Tile, shadow: Tile, mirror: Tile) -> Self {
        Self {
            wolf,
            shadow,
            mirror,
        }
    }

    pub fn positions(self) -> [Tile; 3] {
        [self.wolf, self.shadow, self.mirror]
    }

    /// No two pieces on the same tile.
    pub fn is_collision_free(self) -> bool {
        self.wolf != self.shadow && self.wolf != self.mirror && self.shadow != self.mirror
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.wolf, self.shadow, self.mirror)
    }
}

/// Tiles the wolf may try to move to: neighbors of its tile not
/// occupied by a statue. Empty means the wolf is stuck, which ends
/// that branch of exploration without being an error.
pub fn legal_destinations(map: &TileMap, state: PuzzleState) -> SmallVec<[Tile; 4]> {
    map.neighbors(state.wolf)
        .filter(|&tile| tile != state.shadow && tile != state.mirror)
        .collect()
}

/// Where a statue ends up when asked to step `dir`: the neighbor that
/// way, unless there is none or `other` (the other statue's pre-move
/// tile) blocks it.
fn statue_step(map: &TileMap, from: Tile, dir: Direction, other: Tile) -> Tile {
    match map.neighbor_in_direction(from, dir) {
        Some(to) if to != other => to,
        _ => from,
    }
}

/// Apply a wolf move to `dest`, returning the resulting state or
/// `None` when the move is illegal from `state`.
///
/// Both statues step against each other's pre-move positions before
/// the combined triple is validated; reordering those two phases
/// changes which moves are legal.
pub fn apply_move(map: &TileMap, state: PuzzleState, dest: Tile) -> Option<PuzzleState> {
    if dest == state.shadow || dest == state.mirror {
        return None;
    }
    let dir = map.direction_between(state.wolf, dest)?;
    let shadow = statue_step(map, state.shadow, dir, state.mirror);
    let mirror = statue_step(map, state.mirror, dir.inverse(), state.shadow);
    let next = PuzzleState::new(dest, shadow, mirror);
    next.is_collision_free().then_some(next)
}

/// All states reachable from `state` in one legal wolf move.
pub fn next_states(map: &TileMap, state: PuzzleState) -> SmallVec<[PuzzleState; 4]> {
    legal_destinations(map, state)
        .into_iter()
        .filter_map(|dest| apply_move(map, state, dest))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statues_follow_the_wolf() {
        let map = TileMap::sacred_grove();
        // Wolf walks north from the canonical start: the shadow statue
        // has no tile to its north and stays, the mirror statue steps
        // south.
        let start = PuzzleState::new(11, 13, 9);
        let next = apply_move(&map, start, 7);
        assert_eq!(next, Some(PuzzleState::new(7, 13, 15)));
    }

    #[test]
    fn test_statue_blocked_by_other_statue_stays() {
        let map = TileMap::sacred_grove();
        // Wolf moves east; the shadow statue's eastern neighbor is the
        // mirror statue's current tile, so the shadow must stay put.
        let state = PuzzleState::new(9, 11, 12);
        let next = apply_move(&map, state, 10).expect("move is legal");
        assert_eq!(next.shadow, 11);
        assert_eq!(next, PuzzleState::new(10, 11, 12));
    }

    #[test]
    fn test_illegal_when_statue_lands_on_wolf() {
        let map = TileMap::sacred_grove();
        // Wolf moves east onto 11 while the mirror statue, stepping
        // west, arrives on 11 as well.
        let state = PuzzleState::new(10, 16, 12);
        assert_eq!(apply_move(&map, state, 11), None);
    }

    #[test]
    fn test_destination_must_be_free_and_adjacent() {
        let map = TileMap::sacred_grove();
        let state = PuzzleState::new(11, 13, 9);
        // Not adjacent.
        assert_eq!(apply_move(&map, state, 5), None);
        // Adjacent variants occupied by a statue are not offered.
        let occupied = PuzzleState::new(11, 12, 9);
        assert_eq!(apply_move(&map, occupied, 12), None);
        assert!(!legal_destinations(&map, occupied).contains(&12));
    }

    #[test]
    fn test_transition_is_deterministic() {
        let map = TileMap::sacred_grove();
        let state = PuzzleState::new(11, 13, 9);
        for dest in legal_destinations(&map, state) {
            assert_eq!(apply_move(&map, state, dest), apply_move(&map, state, dest));
        }
        assert_eq!(apply_move(&map, state, 5), apply_move(&map, state, 5));
    }

    #[test]
    fn test_stuck_wolf_has_no_next_states() {
        let map = TileMap::sacred_grove();
        // Tile 13's only neighbor is 12, and the shadow statue is on
        // it.
        let state = PuzzleState::new(13, 12, 11);
        assert!(legal_destinations(&map, state).is_empty());
        assert!(next_states(&map, state).is_empty());
    }

    #[test]
    fn test_next_states_from_start() {
        let map = TileMap::sacred_grove();
        let start = PuzzleState::new(11, 13, 9);
        let next = next_states(&map, start);
        // All four neighbors of 11 are free, but walking west sends
        // the mirror statue east onto the wolf's destination, so only
        // three moves survive validation.
        assert_eq!(next.len(), 3);
        assert!(next.contains(&PuzzleState::new(7, 13, 15)));
        assert!(next.contains(&PuzzleState::new(17, 13, 5)));
        assert!(next.contains(&PuzzleState::new(12, 13, 9)));
        for state in &next {
            assert!(state.is_collision_free());
        }
    }
}
