//! Fog-of-war player interface.
//!
//! The sole arbiter of agent position and visibility: it owns the maze
//! builder outright, validates every move against the true terrain, and is
//! the only component permitted to reveal terrain classification to an
//! agent, one 3×3 window at a time.

use std::collections::BTreeMap;

use maze_forage_core::{Direction, GridDim, KnownTerrain, MoveError, Tile, TileKind};

use crate::{
    builder::{offset_tile, MazeBuilder},
    resources::MineYield,
};

/// Wraps a finished maze and exposes only fog-limited views plus validated
/// movement.
#[derive(Clone, Debug)]
pub struct PlayerInterface {
    builder: MazeBuilder,
    player_pos: Tile,
    known: KnownTerrain,
}

impl PlayerInterface {
    /// Creates an interface positioned at the maze's player start, with the
    /// starting neighborhood already revealed.
    #[must_use]
    pub fn new(builder: MazeBuilder) -> Self {
        let player_pos = builder.player_start();
        let mut interface = Self {
            known: KnownTerrain::new(builder.dim()),
            player_pos,
            builder,
        };
        let revealed = interface.discovered_tiles(player_pos);
        interface.known.absorb(&revealed);
        interface
    }

    /// Current player position.
    #[must_use]
    pub const fn player_pos(&self) -> Tile {
        self.player_pos
    }

    /// Dimensions of the wrapped maze.
    #[must_use]
    pub const fn dim(&self) -> GridDim {
        self.builder.dim()
    }

    /// Read-only access to the wrapped maze builder.
    #[must_use]
    pub const fn builder(&self) -> &MazeBuilder {
        &self.builder
    }

    /// The interface's own revealed-knowledge cache, covering everything it
    /// has disclosed so far.
    #[must_use]
    pub const fn known(&self) -> &KnownTerrain {
        &self.known
    }

    /// Moves the player to the destination tile.
    ///
    /// Fails with [`MoveError::WallTile`] when the destination classifies
    /// as wall, and with [`MoveError::NotAdjacent`] when the destination is
    /// neither 4-adjacent to nor equal to the current position. Moving onto
    /// the current position is a legal no-op re-reveal. On success the
    /// position updates and the destination's 3×3 neighborhood
    /// classification is returned.
    pub fn move_to(&mut self, dest: Tile) -> Result<BTreeMap<Tile, TileKind>, MoveError> {
        if self.builder.is_wall(dest) {
            return Err(MoveError::WallTile(dest));
        }

        if Direction::between(self.player_pos, dest).is_some() {
            self.player_pos = dest;
        } else if dest != self.player_pos {
            return Err(MoveError::NotAdjacent {
                from: self.player_pos,
                to: dest,
            });
        }

        let revealed = self.discovered_tiles(dest);
        self.known.absorb(&revealed);
        Ok(revealed)
    }

    /// Classification of the 3×3 neighborhood centered on the current
    /// position, without moving. Resolved against the true terrain, so the
    /// result never contains an undiscovered entry.
    #[must_use]
    pub fn current_visible_tiles(&self) -> BTreeMap<Tile, TileKind> {
        self.discovered_tiles(self.player_pos)
    }

    /// Three-valued classification of an arbitrary tile.
    #[must_use]
    pub fn tile_kind(&self, tile: Tile) -> TileKind {
        self.builder.tile_kind(tile)
    }

    /// Mines the resource site at `source` through the owned ledger.
    pub fn mine(&mut self, capacity: u32, rate: f64, source: Tile) -> MineYield {
        self.builder.resources_mut().mine(capacity, rate, source)
    }

    /// Tiles observable from `pos`: the 3×3 block centered there, with
    /// out-of-bounds corners clamped away. A player standing on any carved
    /// tile always sees all nine.
    fn discovered_tiles(&self, pos: Tile) -> BTreeMap<Tile, TileKind> {
        let dim = self.builder.dim();
        let mut tiles = BTreeMap::new();
        for dy in -1..=1 {
            for dx in -1..=1 {
                let Some(tile) = offset_tile(pos, dx, dy) else {
                    continue;
                };
                if dim.contains(tile) {
                    let _ = tiles.insert(tile, self.builder.tile_kind(tile));
                }
            }
        }
        tiles
    }
}
