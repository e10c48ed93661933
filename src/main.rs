//! CLI entry point for the statue puzzle solver.
//!
//! Usage:
//!   statue-solver generate [--output graph.json] [options]
//!   statue-solver solve [--graph graph.json] [options]
//!   statue-solver walk [--seed N] [options]
//!
//! Options:
//!   --start <w,s,m>      Start state as wolf,shadow,mirror tiles (default: 11,13,9)
//!   --goals <a,b>        Pedestal tiles, either order (default: 5,15)
//!   --max-states <n>     State ceiling for generation (default: 7980)
//!   --max-steps <n>      Step limit for a random walk (default: 200)

mod enumerate;
mod graph;
mod persist;
mod search;
mod tiles;
mod transition;
mod walk;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use enumerate::{enumerate, validate_start, Enumeration, EnumeratorConfig, MAX_DISTINCT_STATES};
use search::{shortest_solution, GoalTiles, SolveOutcome};
use tiles::{Tile, TileMap};
use transition::PuzzleState;
use walk::WalkEnd;

#[derive(Parser)]
#[command(name = "statue-solver")]
#[command(about = "Exhaustive state-graph solver for the Sacred Grove statue puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the reachable state graph and optionally save it
    Generate {
        /// Start state as wolf,shadow,mirror tile numbers
        #[arg(long, default_value = "11,13,9", value_parser = parse_state)]
        start: PuzzleState,

        /// Stop once the graph holds this many states
        #[arg(long, default_value_t = MAX_DISTINCT_STATES)]
        max_states: usize,

        /// Where to write the graph as JSON
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Find the shortest solution path
    Solve {
        /// Load a previously generated graph instead of generating one
        #[arg(long, value_name = "FILE")]
        graph: Option<PathBuf>,

        /// Start state as wolf,shadow,mirror tile numbers
        #[arg(long, default_value = "11,13,9", value_parser = parse_state)]
        start: PuzzleState,

        /// Pedestal tiles both statues must reach, in either order
        #[arg(long, default_value = "5,15", value_parser = parse_goals)]
        goals: GoalTiles,

        /// State ceiling when generating in-process
        #[arg(long, default_value_t = MAX_DISTINCT_STATES)]
        max_states: usize,
    },

    /// Print a random example trajectory
    Walk {
        /// Start state as wolf,shadow,mirror tile numbers
        #[arg(long, default_value = "11,13,9", value_parser = parse_state)]
        start: PuzzleState,

        /// Pedestal tiles both statues must reach, in either order
        #[arg(long, default_value = "5,15", value_parser = parse_goals)]
        goals: GoalTiles,

        /// Give up after this many moves
        #[arg(long, default_value_t = 200)]
        max_steps: usize,

        /// Seed for a reproducible walk
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Solve report printed as JSON
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<PuzzleState>>,
    goal_states: usize,
    states: usize,
    edges: usize,
    truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

fn parse_state(raw: &str) -> Result<PuzzleState, String> {
    let tiles = parse_tiles(raw)?;
    match tiles.as_slice() {
        &[wolf, shadow, mirror] => Ok(PuzzleState::new(wolf, shadow, mirror)),
        _ => Err(format!(
            "expected wolf,shadow,mirror tile numbers, got \"{}\"",
            raw
        )),
    }
}

fn parse_goals(raw: &str) -> Result<GoalTiles, String> {
    let tiles = parse_tiles(raw)?;
    match tiles.as_slice() {
        &[a, b] => Ok(GoalTiles::new(a, b)),
        _ => Err(format!("expected two tile numbers, got \"{}\"", raw)),
    }
}

fn parse_tiles(raw: &str) -> Result<Vec<Tile>, String> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<Tile>()
                .map_err(|_| format!("\"{}\" is not a tile number", part.trim()))
        })
        .collect()
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            start,
            max_states,
            output,
        } => {
            let map = TileMap::sacred_grove();
            let config = EnumeratorConfig { max_states };
            let result = match enumerate(&map, start, &config) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(2);
                }
            };

            println!(
                "Generated state graph with {} states and {} moves{}",
                result.graph.node_count(),
                result.graph.edge_count(),
                if result.truncated {
                    " (state ceiling reached, graph is partial)"
                } else {
                    ""
                }
            );

            if let Some(path) = output {
                if let Err(e) = persist::save(&path, &result) {
                    eprintln!("Error writing {}: {}", path.display(), e);
                    std::process::exit(2);
                }
                println!("Saved the graph to {}", path.display());
            }
        }

        Commands::Solve {
            graph,
            start,
            goals,
            max_states,
        } => {
            let enumeration = match graph {
                Some(path) => match persist::load(&path) {
                    Ok(enumeration) => enumeration,
                    Err(e) => {
                        eprintln!("Error loading {}: {}", path.display(), e);
                        std::process::exit(2);
                    }
                },
                None => {
                    let map = TileMap::sacred_grove();
                    let config = EnumeratorConfig { max_states };
                    match enumerate(&map, start, &config) {
                        Ok(enumeration) => enumeration,
                        Err(e) => {
                            eprintln!("Error: {}", e);
                            std::process::exit(2);
                        }
                    }
                }
            };

            let outcome = match shortest_solution(&enumeration.graph, start, goals) {
                Ok(outcome) => outcome,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(2);
                }
            };

            let output = format_outcome(&enumeration, goals, &outcome);
            println!("{}", serde_json::to_string_pretty(&output).unwrap());

            if output.solved {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }

        Commands::Walk {
            start,
            goals,
            max_steps,
            seed,
        } => {
            let map = TileMap::sacred_grove();
            if let Err(e) = validate_start(&map, start) {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let (trajectory, end) = walk::random_walk(&map, start, goals, max_steps, &mut rng);

            print!("{}", trajectory);
            match end {
                WalkEnd::GoalReached => {
                    println!("Goal reached in {} moves.", trajectory.moves())
                }
                WalkEnd::Stuck => println!("No legal move left; walk abandoned."),
                WalkEnd::Collision => {
                    println!("A statue collided with the wolf; walk abandoned.")
                }
                WalkEnd::StepLimit => println!("Step limit reached without solving."),
            }
        }
    }
}

fn format_outcome(
    enumeration: &Enumeration,
    goals: GoalTiles,
    outcome: &SolveOutcome,
) -> SolveOutput {
    let goal_states = enumeration
        .graph
        .iter()
        .filter(|(_, state)| goals.matches(state))
        .count();

    let mut output = SolveOutput {
        solved: false,
        steps: None,
        path: None,
        goal_states,
        states: enumeration.graph.node_count(),
        edges: enumeration.graph.edge_count(),
        truncated: enumeration.truncated,
        reason: None,
    };

    match outcome {
        SolveOutcome::Solved(solution) => {
            output.solved = true;
            output.steps = Some(solution.steps);
            output.path = Some(solution.path.clone());
        }
        SolveOutcome::NoGoalStates => {
            output.reason = Some(if enumeration.truncated {
                "no goal states in graph; exploration was truncated, the search may be incomplete"
                    .to_string()
            } else {
                "no goal states in graph; searched exhaustively".to_string()
            });
        }
        SolveOutcome::GoalsUnreachable { goal_states } => {
            output.reason = Some(format!(
                "{} goal state(s) in graph, none reachable from the start",
                goal_states
            ));
        }
    }

    output
}
