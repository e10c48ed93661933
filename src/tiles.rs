//! The room the puzzle is played in: 21 tiles joined by compass-labeled
//! edges.
//!
//! The map is built once at startup from an edge table and only queried
//! afterwards. Lookups that can miss return `Option` rather than a
//! sentinel tile.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Tile identifier. The built-in room numbers its tiles 1..=21.
pub type Tile = u8;

/// Compass direction of a tile edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The opposite compass direction (N↔S, E↔W).
    pub fn inverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// Structural faults detected while building a map.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TileMapError {
    #[error("edge references tile {0}, map has tiles 1..={1}")]
    TileOutOfRange(Tile, u8),
    #[error("tile {0} already has an edge going {1:?}")]
    DuplicateDirection(Tile, Direction),
}

/// Directed adjacency of the room.
///
/// Every edge carries the compass direction a piece walks to traverse
/// it. The built-in room pairs each edge with its inverse twin, but
/// that is a property of the edge table, not of this structure.
#[derive(Debug, Clone)]
pub struct TileMap {
    adjacency: Vec<SmallVec<[(Direction, Tile); 4]>>,
}

impl TileMap {
    /// Build a map with tiles `1..=tile_count` from a directed edge
    /// list. Rejects edges touching unknown tiles and tiles with two
    /// edges in the same direction.
    pub fn from_edges(
        tile_count: u8,
        edges: &[(Tile, Tile, Direction)],
    ) -> Result<Self, TileMapError> {
        let mut adjacency = vec![SmallVec::new(); tile_count as usize];
        for &(from, to, dir) in edges {
            for tile in [from, to] {
                if tile < 1 || tile > tile_count {
                    return Err(TileMapError::TileOutOfRange(tile, tile_count));
                }
            }
            let out = &mut adjacency[(from - 1) as usize];
            if out.iter().any(|&(d, _)| d == dir) {
                return Err(TileMapError::DuplicateDirection(from, dir));
            }
            out.push((dir, to));
        }
        Ok(Self { adjacency })
    }

    /// The fixed guardian-statue room.
    ///
    /// Edges are listed once per tile pair; the inverse twin is added
    /// automatically.
    pub fn sacred_grove() -> Self {
        let mut edges = Vec::with_capacity(GROVE_EDGES.len() * 2);
        for &(from, to, dir) in GROVE_EDGES {
            edges.push((from, to, dir));
            edges.push((to, from, dir.inverse()));
        }
        Self::from_edges(GROVE_TILES, &edges).expect("built-in edge table is well formed")
    }

    pub fn tile_count(&self) -> u8 {
        self.adjacency.len() as u8
    }

    pub fn contains(&self, tile: Tile) -> bool {
        tile >= 1 && tile <= self.tile_count()
    }

    /// Tiles one step away from `tile`.
    pub fn neighbors(&self, tile: Tile) -> impl Iterator<Item = Tile> + '_ {
        self.out_edges(tile).iter().map(|&(_, to)| to)
    }

    /// The neighbor reached by walking `dir` from `tile`, if the room
    /// has an edge that way.
    pub fn neighbor_in_direction(&self, tile: Tile, dir: Direction) -> Option<Tile> {
        self.out_edges(tile)
            .iter()
            .find(|&&(d, _)| d == dir)
            .map(|&(_, to)| to)
    }

    /// Compass direction of the edge `from -> to`, if the tiles are
    /// adjacent.
    pub fn direction_between(&self, from: Tile, to: Tile) -> Option<Direction> {
        self.out_edges(from)
            .iter()
            .find(|&&(_, t)| t == to)
            .map(|&(d, _)| d)
    }

    fn out_edges(&self, tile: Tile) -> &[(Direction, Tile)] {
        match self.adjacency.get(tile.wrapping_sub(1) as usize) {
            Some(out) => out,
            None => &[],
        }
    }
}

const GROVE_TILES: u8 = 21;

/// One entry per connected tile pair, walked west-to-east or
/// north-to-south. `sacred_grove` adds the inverse twin of each.
const GROVE_EDGES: &[(Tile, Tile, Direction)] = &[
    (1, 2, Direction::East),
    (1, 4, Direction::South),
    (2, 3, Direction::East),
    (2, 5, Direction::South),
    (3, 6, Direction::South),
    (4, 5, Direction::East),
    (5, 6, Direction::East),
    (6, 7, Direction::East),
    (7, 8, Direction::East),
    (5, 9, Direction::South),
    (6, 10, Direction::South),
    (7, 11, Direction::South),
    (8, 12, Direction::South),
    (9, 10, Direction::East),
    (10, 11, Direction::East),
    (11, 12, Direction::East),
    (12, 13, Direction::East),
    (9, 15, Direction::South),
    (10, 16, Direction::South),
    (11, 17, Direction::South),
    (12, 18, Direction::South),
    (14, 15, Direction::East),
    (15, 16, Direction::East),
    (16, 17, Direction::East),
    (17, 18, Direction::East),
    (14, 19, Direction::South),
    (15, 20, Direction::South),
    (16, 21, Direction::South),
    (19, 20, Direction::East),
    (20, 21, Direction::East),
];
