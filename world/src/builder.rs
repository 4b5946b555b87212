//! Randomized maze construction using loop-erased random walks.
//!
//! A Wilson's-algorithm variant: a clear zone around the player start seeds
//! the walkable region, then every remaining tile is connected to it by
//! random walks whose self-intersections are erased. Resource sites are the
//! walk origins until the stockpile runs dry, which is what embeds every
//! resource on a carved, reachable tile.

use maze_forage_core::{
    ConstructionError, ConstructionTrace, Direction, GridDim, ResourceAllocation, Tile, TileKind,
    TraceAction,
};
use rand::{seq::SliceRandom, Rng};

use crate::{resources::Resources, Terrain};

/// Tuning knobs for maze construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuilderConfig {
    clear_radius: u32,
}

impl BuilderConfig {
    /// Creates a configuration with the provided clear-zone radius.
    #[must_use]
    pub const fn new(clear_radius: u32) -> Self {
        Self { clear_radius }
    }

    /// Radius of the zone carved around the player start; the default of 1
    /// produces a 3×3 zone.
    #[must_use]
    pub const fn clear_radius(&self) -> u32 {
        self.clear_radius
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Owner of a fully constructed maze: terrain, resource ledger, player
/// start, and the observational construction trace.
///
/// The terrain is carved exactly once during [`MazeBuilder::generate`] and
/// never mutated afterward.
#[derive(Clone, Debug)]
pub struct MazeBuilder {
    terrain: Terrain,
    player_start: Tile,
    resources: Resources,
    trace: ConstructionTrace,
}

impl MazeBuilder {
    /// Generates a maze with the default configuration.
    ///
    /// The outcome is deterministic up to the injected random source.
    pub fn generate<R: Rng>(
        dim: GridDim,
        allocation: ResourceAllocation,
        rng: &mut R,
    ) -> Result<Self, ConstructionError> {
        Self::generate_with(dim, allocation, BuilderConfig::default(), rng)
    }

    /// Generates a maze with explicit configuration.
    pub fn generate_with<R: Rng>(
        dim: GridDim,
        allocation: ResourceAllocation,
        config: BuilderConfig,
        rng: &mut R,
    ) -> Result<Self, ConstructionError> {
        if dim.width() < 3 || dim.height() < 3 {
            return Err(ConstructionError::DegenerateGrid(dim.width(), dim.height()));
        }

        let mut terrain = Terrain::all_walls(dim);
        let mut trace = ConstructionTrace::new();
        let mut resources = Resources::new(allocation);

        let interior: Vec<Tile> = dim.tiles().filter(|tile| dim.is_interior(*tile)).collect();
        let player_start = interior
            .choose(rng)
            .copied()
            .ok_or(ConstructionError::DegenerateGrid(dim.width(), dim.height()))?;

        let zone = clear_zone(&mut terrain, player_start, config.clear_radius());
        trace.record(TraceAction::Clear, zone);

        let mut availability = Availability::from_terrain(&terrain);

        // Resource sites double as walk origins while the stockpile lasts.
        while resources.stockpile() > 0 {
            let Some(site) = availability.random_unresolved(rng) else {
                break;
            };
            resources.place(site, rng);
            let walk = random_walk(&terrain, site, rng, &mut trace)?;
            carve_walk(&mut terrain, &walk, &mut trace);
            availability.resolve_walk(&walk);
        }

        // Connect every remaining tile so the whole grid, not just the
        // resource sites, ends up in one component.
        while let Some(start) = availability.random_unresolved(rng) {
            let walk = random_walk(&terrain, start, rng, &mut trace)?;
            carve_walk(&mut terrain, &walk, &mut trace);
            availability.resolve_walk(&walk);
        }

        Ok(Self {
            terrain,
            player_start,
            resources,
            trace,
        })
    }

    /// Read-only access to the carved terrain.
    #[must_use]
    pub const fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Dimensions of the maze.
    #[must_use]
    pub const fn dim(&self) -> GridDim {
        self.terrain.dim()
    }

    /// Starting tile for players traversing the maze. Always interior and
    /// always carved.
    #[must_use]
    pub const fn player_start(&self) -> Tile {
        self.player_start
    }

    /// Read-only access to the resource ledger.
    #[must_use]
    pub const fn resources(&self) -> &Resources {
        &self.resources
    }

    pub(crate) fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    /// Step-by-step construction log for animation playback.
    #[must_use]
    pub const fn trace(&self) -> &ConstructionTrace {
        &self.trace
    }

    /// Reports whether the tile is a wall in the true terrain.
    #[must_use]
    pub fn is_wall(&self, tile: Tile) -> bool {
        self.terrain.is_wall(tile)
    }

    /// Three-valued classification of the tile: resource when the ledger
    /// holds a nonzero amount there, otherwise wall or walkable per the
    /// terrain mask.
    #[must_use]
    pub fn tile_kind(&self, tile: Tile) -> TileKind {
        if self.resources.is_resource_site(tile) {
            TileKind::Resource
        } else if self.terrain.is_wall(tile) {
            TileKind::Wall
        } else {
            TileKind::Walkable
        }
    }

    /// Fabricates a builder from handcrafted parts, bypassing generation.
    #[cfg(any(test, feature = "terrain_scaffolding"))]
    #[must_use]
    pub fn from_parts(terrain: Terrain, player_start: Tile, resources: Resources) -> Self {
        Self {
            terrain,
            player_start,
            resources,
            trace: ConstructionTrace::new(),
        }
    }
}

/// Loop-erased random walk from `start` until an already-carved tile is
/// reached. The returned path starts at `start` and ends on the carved tile
/// it merged into.
fn random_walk<R: Rng>(
    terrain: &Terrain,
    start: Tile,
    rng: &mut R,
    trace: &mut ConstructionTrace,
) -> Result<Vec<Tile>, ConstructionError> {
    let dim = terrain.dim();
    let mut path = vec![start];
    let mut current = start;

    while terrain.is_wall(current) {
        // An adjacent carved tile ends the walk deterministically;
        // otherwise wander to a random interior neighbor.
        let carved_neighbor = Direction::ALL
            .into_iter()
            .filter_map(|direction| current.step(direction))
            .find(|neighbor| terrain.is_walkable(*neighbor));

        let next = match carved_neighbor {
            Some(tile) => tile,
            None => {
                let candidates: Vec<Tile> = Direction::ALL
                    .into_iter()
                    .filter_map(|direction| current.step(direction))
                    .filter(|neighbor| dim.is_interior(*neighbor))
                    .collect();
                candidates
                    .choose(rng)
                    .copied()
                    .ok_or(ConstructionError::NoValidMoves(current))?
            }
        };

        if let Some(position) = path.iter().position(|tile| *tile == next) {
            // Loop erasure: log the detour, then truncate back to the
            // revisited tile.
            trace.record(TraceAction::Seek, path.clone());
            let erased: Vec<Tile> = path[position..].iter().rev().copied().collect();
            trace.record(TraceAction::Reset, erased);
            path.truncate(position + 1);
        } else {
            path.push(next);
        }
        current = next;
    }

    trace.record(TraceAction::Seek, path.clone());
    Ok(path)
}

fn carve_walk(terrain: &mut Terrain, walk: &[Tile], trace: &mut ConstructionTrace) {
    let dim = terrain.dim();
    for tile in walk {
        if dim.is_interior(*tile) {
            terrain.carve(*tile);
        }
    }
    trace.record(TraceAction::Clear, walk.to_vec());
}

/// Carves the interior tiles within `radius` of `center`, returning the
/// carved zone.
fn clear_zone(terrain: &mut Terrain, center: Tile, radius: u32) -> Vec<Tile> {
    let dim = terrain.dim();
    let radius = i32::try_from(radius).unwrap_or(i32::MAX);
    let mut zone = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let Some(tile) = offset_tile(center, dx, dy) else {
                continue;
            };
            if dim.is_interior(tile) {
                terrain.carve(tile);
                zone.push(tile);
            }
        }
    }
    zone
}

pub(crate) fn offset_tile(tile: Tile, dx: i32, dy: i32) -> Option<Tile> {
    let x = tile.x().checked_add_signed(dx)?;
    let y = tile.y().checked_add_signed(dy)?;
    Some(Tile::new(x, y))
}

/// Construction bookkeeping: tracks which tiles no longer need a walk.
///
/// Seeded from the carved mask with the border ring pre-marked resolved,
/// which keeps walks from wandering off-grid or being retried at edges.
#[derive(Debug)]
struct Availability {
    dim: GridDim,
    resolved: Vec<bool>,
}

impl Availability {
    fn from_terrain(terrain: &Terrain) -> Self {
        let dim = terrain.dim();
        let mut availability = Self {
            dim,
            resolved: dim.tiles().map(|tile| terrain.is_walkable(tile)).collect(),
        };
        for tile in dim.tiles() {
            if !dim.is_interior(tile) {
                availability.mark(tile);
            }
        }
        availability
    }

    fn random_unresolved<R: Rng>(&self, rng: &mut R) -> Option<Tile> {
        let unresolved: Vec<Tile> = self
            .dim
            .tiles()
            .filter(|tile| {
                self.dim
                    .index(*tile)
                    .map_or(false, |index| !self.resolved[index])
            })
            .collect();
        unresolved.choose(rng).copied()
    }

    /// Marks every walk tile and all of its in-bounds neighbors resolved.
    fn resolve_walk(&mut self, walk: &[Tile]) {
        for tile in walk {
            self.mark(*tile);
            for direction in Direction::ALL {
                if let Some(neighbor) = tile.step(direction) {
                    self.mark(neighbor);
                }
            }
        }
    }

    fn mark(&mut self, tile: Tile) {
        if let Some(index) = self.dim.index(tile) {
            self.resolved[index] = true;
        }
    }
}
