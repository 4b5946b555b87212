#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze-forage workspace.
//!
//! This crate defines the vocabulary that connects the authoritative world
//! to the traversal systems: tile coordinates and grid dimensions, the
//! three-valued terrain classification, the cardinal movement directions,
//! the construction trace emitted for presentation adapters, the
//! revealed-knowledge cache that enforces fog-of-war, and the error
//! taxonomy. Every failure in this taxonomy is unrecoverable at the point
//! of detection; callers abort the current operation rather than retry.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single grid tile expressed as x and y coordinates.
///
/// The y axis grows downward, matching the row-major terrain layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    x: u32,
    y: u32,
}

impl Tile {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the tile.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row of the tile.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Returns the tile one step away in the provided direction.
    ///
    /// Yields `None` when the step would leave the non-negative quadrant;
    /// upper bounds are the grid's concern, not the tile's.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Tile> {
        let (dx, dy) = direction.offset();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Self::new(x, y))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Describes the discrete width and height of a terrain grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDim {
    width: u32,
    height: u32,
}

impl GridDim {
    /// Creates a new grid dimension descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of tile columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of tile rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of tiles contained in the grid.
    #[must_use]
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reports whether the tile lies within the grid bounds.
    #[must_use]
    pub const fn contains(&self, tile: Tile) -> bool {
        tile.x() < self.width && tile.y() < self.height
    }

    /// Reports whether the tile lies strictly inside the border ring.
    ///
    /// The border ring (x ∈ {0, width-1} or y ∈ {0, height-1}) is never
    /// carved during construction and always classifies as wall.
    #[must_use]
    pub const fn is_interior(&self, tile: Tile) -> bool {
        tile.x() >= 1 && tile.y() >= 1 && tile.x() + 1 < self.width && tile.y() + 1 < self.height
    }

    /// Converts the tile into a dense row-major index.
    #[must_use]
    pub fn index(&self, tile: Tile) -> Option<usize> {
        if !self.contains(tile) {
            return None;
        }
        let row = usize::try_from(tile.y()).ok()?;
        let column = usize::try_from(tile.x()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        Some(row * width + column)
    }

    /// Iterates every tile of the grid in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> {
        let width = self.width;
        let height = self.height;
        (0..height).flat_map(move |y| (0..width).map(move |x| Tile::new(x, y)))
    }
}

/// Three-valued classification of a terrain tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Impassable tile, including everything outside the grid bounds.
    Wall,
    /// Carved tile that agents may occupy.
    Walkable,
    /// Carved tile holding a nonzero amount in the resource ledger.
    Resource,
}

impl TileKind {
    /// Numeric code consumed by presentation adapters: wall=1, walkable=2,
    /// resource=3. Zero is reserved for undiscovered tiles and never
    /// produced by classification.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Wall => 1,
            Self::Walkable => 2,
            Self::Resource => 3,
        }
    }

    /// Reports whether an agent may stand on a tile of this kind.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Cardinal movement directions available to agents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Canonical enumeration order used wherever neighbors are scanned.
    ///
    /// Tie-breaks that say "first encountered wins" resolve against this
    /// order, which keeps such scans deterministic.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Coordinate shift applied by a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Direction of the single step from `from` to `to`, if the two tiles
    /// are exactly one step apart.
    #[must_use]
    pub fn between(from: Tile, to: Tile) -> Option<Direction> {
        Self::ALL
            .into_iter()
            .find(|direction| from.step(*direction) == Some(to))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(label)
    }
}

/// Finite stockpile description handed to the maze builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceAllocation {
    stockpile: u32,
    min_per_site: u32,
    max_per_site: u32,
}

impl ResourceAllocation {
    /// Creates a new allocation descriptor.
    #[must_use]
    pub const fn new(stockpile: u32, min_per_site: u32, max_per_site: u32) -> Self {
        Self {
            stockpile,
            min_per_site,
            max_per_site,
        }
    }

    /// Total amount of resource available for placement.
    #[must_use]
    pub const fn stockpile(&self) -> u32 {
        self.stockpile
    }

    /// Minimum amount drawn for a single site.
    #[must_use]
    pub const fn min_per_site(&self) -> u32 {
        self.min_per_site
    }

    /// Maximum amount drawn for a single site.
    #[must_use]
    pub const fn max_per_site(&self) -> u32 {
        self.max_per_site
    }
}

/// Label attached to a batch of tiles in the construction trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceAction {
    /// A random walk advanced through the listed tiles.
    Seek,
    /// Loop erasure rolled the walk back across the listed tiles.
    Reset,
    /// The listed tiles were carved into walkable terrain.
    Clear,
}

/// One labeled batch of tiles recorded during construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    /// Label describing what happened to the batch.
    pub action: TraceAction,
    /// Tiles affected, in the order the algorithm touched them.
    pub tiles: Vec<Tile>,
}

/// Ordered observational log of maze construction.
///
/// Consumed only by presentation adapters for animation playback. The log
/// never feeds back into the construction algorithm or its randomness.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionTrace {
    steps: Vec<TraceStep>,
}

impl ConstructionTrace {
    /// Creates an empty trace.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Appends a labeled batch of tiles to the log.
    pub fn record(&mut self, action: TraceAction, tiles: Vec<Tile>) {
        self.steps.push(TraceStep { action, tiles });
    }

    /// Recorded batches in the order they were produced.
    #[must_use]
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }
}

/// Per-holder cache of terrain knowledge revealed so far.
///
/// Initialized fully undiscovered and updated only with the revealed-tile
/// batches the player interface discloses, so it diverges permanently from
/// the true terrain. Agents act on this cache alone.
#[derive(Clone, Debug)]
pub struct KnownTerrain {
    dim: GridDim,
    cells: Vec<Option<TileKind>>,
}

impl KnownTerrain {
    /// Creates a fully undiscovered cache matching the grid dimensions.
    #[must_use]
    pub fn new(dim: GridDim) -> Self {
        Self {
            dim,
            cells: vec![None; dim.area()],
        }
    }

    /// Dimensions of the cached grid.
    #[must_use]
    pub const fn dim(&self) -> GridDim {
        self.dim
    }

    /// Merges a revealed batch into the cache. Entries outside the grid
    /// bounds are ignored.
    pub fn absorb(&mut self, revealed: &BTreeMap<Tile, TileKind>) {
        for (tile, kind) in revealed {
            if let Some(index) = self.dim.index(*tile) {
                self.cells[index] = Some(*kind);
            }
        }
    }

    /// Classification of the tile, or `None` while it remains undiscovered
    /// (or lies outside the grid).
    #[must_use]
    pub fn kind(&self, tile: Tile) -> Option<TileKind> {
        let index = self.dim.index(tile)?;
        self.cells[index]
    }

    /// Reports whether the tile can be walked on, failing with
    /// [`StepError::Undiscovered`] when the tile has never been revealed.
    ///
    /// Probing an undiscovered tile indicates an agent logic bug: agents
    /// only examine their four immediate neighbors, which the 3×3 reveal
    /// window always covers.
    pub fn walkability(&self, tile: Tile) -> Result<bool, StepError> {
        self.kind(tile)
            .map(TileKind::is_walkable)
            .ok_or(StepError::Undiscovered(tile))
    }

    /// Number of tiles revealed so far.
    #[must_use]
    pub fn discovered_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

/// Single completed agent move: the direction taken and the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentStep {
    /// Direction of travel for the step.
    pub direction: Direction,
    /// Tile the agent occupies after the step.
    pub tile: Tile,
}

/// Rejection of a requested player move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The destination classifies as a wall tile.
    #[error("destination {0} is a wall tile")]
    WallTile(Tile),
    /// The destination is neither adjacent to nor equal to the current
    /// position.
    #[error("{from} -> {to} is not an adjacent move")]
    NotAdjacent {
        /// Position the player occupied when the move was requested.
        from: Tile,
        /// Destination the move named.
        to: Tile,
    },
}

/// Failure of a single agent step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StepError {
    /// The player interface rejected the submitted move.
    #[error(transparent)]
    Move(#[from] MoveError),
    /// The agent probed a tile it has never observed.
    #[error("tile {0} is undiscovered")]
    Undiscovered(Tile),
    /// The agent has no walkable neighbor to move to. Unreachable on
    /// generated mazes, where the start zone is always carved and
    /// connected.
    #[error("no walkable neighbor of {0}")]
    NoWalkableNeighbor(Tile),
}

/// Fatal failure during maze construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// The requested grid is too small to hold a border ring plus interior.
    #[error("grid {0}x{1} is smaller than the 3x3 minimum")]
    DegenerateGrid(u32, u32),
    /// A random walk reached a tile with zero eligible neighbors.
    #[error("no valid moves from {0}")]
    NoValidMoves(Tile),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_offsets_match_grid_orientation() {
        assert_eq!(Direction::Up.offset(), (0, -1));
        assert_eq!(Direction::Down.offset(), (0, 1));
        assert_eq!(Direction::Left.offset(), (-1, 0));
        assert_eq!(Direction::Right.offset(), (1, 0));
    }

    #[test]
    fn step_rejects_leaving_the_quadrant() {
        let origin = Tile::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Down), Some(Tile::new(0, 1)));
        assert_eq!(origin.step(Direction::Right), Some(Tile::new(1, 0)));
    }

    #[test]
    fn between_recovers_single_step_directions() {
        let center = Tile::new(3, 3);
        for direction in Direction::ALL {
            let neighbor = center.step(direction).expect("in-quadrant step");
            assert_eq!(Direction::between(center, neighbor), Some(direction));
        }
        assert_eq!(Direction::between(center, Tile::new(5, 3)), None);
        assert_eq!(Direction::between(center, center), None);
    }

    #[test]
    fn interior_excludes_the_border_ring() {
        let dim = GridDim::new(5, 4);
        assert!(dim.is_interior(Tile::new(1, 1)));
        assert!(dim.is_interior(Tile::new(3, 2)));
        assert!(!dim.is_interior(Tile::new(0, 2)));
        assert!(!dim.is_interior(Tile::new(4, 2)));
        assert!(!dim.is_interior(Tile::new(2, 0)));
        assert!(!dim.is_interior(Tile::new(2, 3)));
    }

    #[test]
    fn index_is_row_major_and_bounded() {
        let dim = GridDim::new(4, 3);
        assert_eq!(dim.index(Tile::new(0, 0)), Some(0));
        assert_eq!(dim.index(Tile::new(3, 2)), Some(11));
        assert_eq!(dim.index(Tile::new(1, 2)), Some(9));
        assert_eq!(dim.index(Tile::new(4, 0)), None);
        assert_eq!(dim.tiles().count(), dim.area());
    }

    #[test]
    fn tile_kind_codes_match_presentation_contract() {
        assert_eq!(TileKind::Wall.code(), 1);
        assert_eq!(TileKind::Walkable.code(), 2);
        assert_eq!(TileKind::Resource.code(), 3);
        assert!(!TileKind::Wall.is_walkable());
        assert!(TileKind::Walkable.is_walkable());
        assert!(TileKind::Resource.is_walkable());
    }

    #[test]
    fn known_terrain_raises_on_undiscovered_probe() {
        let dim = GridDim::new(5, 5);
        let mut known = KnownTerrain::new(dim);
        let probe = Tile::new(2, 2);
        assert_eq!(known.walkability(probe), Err(StepError::Undiscovered(probe)));

        let mut revealed = BTreeMap::new();
        let _ = revealed.insert(probe, TileKind::Walkable);
        let _ = revealed.insert(Tile::new(2, 1), TileKind::Wall);
        known.absorb(&revealed);

        assert_eq!(known.walkability(probe), Ok(true));
        assert_eq!(known.walkability(Tile::new(2, 1)), Ok(false));
        assert_eq!(known.discovered_count(), 2);
    }

    #[test]
    fn trace_records_batches_in_order() {
        let mut trace = ConstructionTrace::new();
        trace.record(TraceAction::Seek, vec![Tile::new(1, 1), Tile::new(1, 2)]);
        trace.record(TraceAction::Clear, vec![Tile::new(1, 1)]);

        let steps = trace.steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].action, TraceAction::Seek);
        assert_eq!(steps[0].tiles.len(), 2);
        assert_eq!(steps[1].action, TraceAction::Clear);
    }

    #[test]
    fn trace_serializes_with_snake_case_labels() {
        let mut trace = ConstructionTrace::new();
        trace.record(TraceAction::Reset, vec![Tile::new(2, 3)]);
        let json = serde_json::to_string(&trace).expect("serialize trace");
        assert!(json.contains("\"reset\""));

        let restored: ConstructionTrace = serde_json::from_str(&json).expect("deserialize trace");
        assert_eq!(restored, trace);
    }
}
