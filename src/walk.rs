//! Illustrative random walk through the puzzle.
//!
//! Picks a uniformly random legal wolf destination each step and lets
//! the statues react. Not a solving strategy; it exists to print
//! example trajectories of the statue coupling.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::search::GoalTiles;
use crate::tiles::TileMap;
use crate::transition::{self, PuzzleState};

/// Append-only log of the states a walk passed through, start
/// included.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    states: Vec<PuzzleState>,
}

impl Trajectory {
    pub fn record(&mut self, state: PuzzleState) {
        self.states.push(state);
    }

    pub fn states(&self) -> &[PuzzleState] {
        &self.states
    }

    /// Number of moves taken, not counting the start state.
    pub fn moves(&self) -> usize {
        self.states.len().saturating_sub(1)
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (step, state) in self.states.iter().enumerate() {
            writeln!(
                f,
                "step {:>3} | wolf {:>2} | shadow {:>2} | mirror {:>2}",
                step, state.wolf, state.shadow, state.mirror
            )?;
        }
        Ok(())
    }
}

/// Why a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEnd {
    GoalReached,
    /// The wolf had no legal destination left.
    Stuck,
    /// The chosen move collided a statue with the wolf; the walk is
    /// abandoned rather than re-rolled.
    Collision,
    StepLimit,
}

/// Walk at random from `start` until the goal, a dead end, or
/// `max_steps` moves.
pub fn random_walk<R: Rng>(
    map: &TileMap,
    start: PuzzleState,
    goals: GoalTiles,
    max_steps: usize,
    rng: &mut R,
) -> (Trajectory, WalkEnd) {
    let mut trajectory = Trajectory::default();
    trajectory.record(start);
    let mut state = start;

    if goals.matches(&state) {
        return (trajectory, WalkEnd::GoalReached);
    }

    let mut steps = 0;
    loop {
        let destinations = transition::legal_destinations(map, state);
        let Some(&dest) = destinations.choose(rng) else {
            return (trajectory, WalkEnd::Stuck);
        };
        match transition::apply_move(map, state, dest) {
            Some(next) => {
                state = next;
                trajectory.record(state);
            }
            None => return (trajectory, WalkEnd::Collision),
        }
        steps += 1;
        if goals.matches(&state) {
            return (trajectory, WalkEnd::GoalReached);
        }
        if steps >= max_steps {
            return (trajectory, WalkEnd::StepLimit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_walk_records_legal_states() {
        let map = TileMap::sacred_grove();
        let start = PuzzleState::new(11, 13, 9);
        let mut rng = StdRng::seed_from_u64(7);
        let (trajectory, _) =
            random_walk(&map, start, GoalTiles::new(5, 15), 50, &mut rng);

        assert_eq!(trajectory.states()[0], start);
        assert!(trajectory.moves() <= 50);
        for pair in trajectory.states().windows(2) {
            assert!(
                transition::next_states(&map, pair[0]).contains(&pair[1]),
                "{} -> {} is not a legal move",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_walk_is_reproducible_with_a_seed() {
        let map = TileMap::sacred_grove();
        let start = PuzzleState::new(11, 13, 9);
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            random_walk(&map, start, GoalTiles::new(5, 15), 30, &mut rng)
                .0
                .states()
                .to_vec()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_stuck_walk_ends_immediately() {
        let map = TileMap::sacred_grove();
        // The wolf's only neighbor is occupied by the shadow statue.
        let stuck = PuzzleState::new(13, 12, 11);
        let mut rng = StdRng::seed_from_u64(0);
        let (trajectory, end) =
            random_walk(&map, stuck, GoalTiles::new(5, 15), 10, &mut rng);
        assert_eq!(end, WalkEnd::Stuck);
        assert_eq!(trajectory.moves(), 0);
    }

    #[test]
    fn test_solved_start_ends_with_goal() {
        let map = TileMap::sacred_grove();
        let solved = PuzzleState::new(10, 5, 15);
        let mut rng = StdRng::seed_from_u64(0);
        let (trajectory, end) =
            random_walk(&map, solved, GoalTiles::new(5, 15), 10, &mut rng);
        assert_eq!(end, WalkEnd::GoalReached);
        assert_eq!(trajectory.moves(), 0);
    }
}
