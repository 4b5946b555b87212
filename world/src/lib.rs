#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative terrain state for maze-forage.
//!
//! The [`Terrain`] mask is owned exclusively by the [`MazeBuilder`] that
//! carved it and is never mutated after construction finishes. The
//! [`PlayerInterface`] wraps the builder and is the only component allowed
//! to reveal terrain to an agent, so nothing outside this crate holds a
//! mutable alias onto the grid.

pub mod builder;
pub mod interface;
pub mod resources;

pub use builder::{BuilderConfig, MazeBuilder};
pub use interface::PlayerInterface;
pub use resources::{MineYield, Resources};

use maze_forage_core::{GridDim, Tile};
use thiserror::Error;

/// Dense boolean walkable mask over a grid: `true` means carved.
///
/// Everything outside the grid bounds classifies as wall, and the border
/// ring is never carved, so agents can probe freely without bounds errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terrain {
    dim: GridDim,
    cells: Vec<bool>,
}

impl Terrain {
    /// Creates an uncarved terrain where every tile is wall.
    #[must_use]
    pub fn all_walls(dim: GridDim) -> Self {
        Self {
            dim,
            cells: vec![false; dim.area()],
        }
    }

    /// Dimensions of the terrain grid.
    #[must_use]
    pub const fn dim(&self) -> GridDim {
        self.dim
    }

    /// Reports whether the tile has been carved walkable. Out-of-bounds
    /// tiles are walls.
    #[must_use]
    pub fn is_walkable(&self, tile: Tile) -> bool {
        self.dim
            .index(tile)
            .map_or(false, |index| self.cells[index])
    }

    /// Reports whether the tile is a wall.
    #[must_use]
    pub fn is_wall(&self, tile: Tile) -> bool {
        !self.is_walkable(tile)
    }

    /// Number of carved tiles.
    #[must_use]
    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// Marks the tile walkable. Construction only ever flips wall tiles to
    /// walkable, never the reverse.
    pub(crate) fn carve(&mut self, tile: Tile) {
        if let Some(index) = self.dim.index(tile) {
            self.cells[index] = true;
        }
    }

    /// Copies the mask into row-major rows of booleans, the persisted
    /// wire shape: outer index is y, inner index is x, wall=false.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        let width = self.dim.width() as usize;
        self.cells.chunks(width).map(<[bool]>::to_vec).collect()
    }

    /// Reconstructs a terrain from row-major rows of booleans.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, TerrainFormatError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(TerrainFormatError::Empty);
        }

        let mut cells = Vec::with_capacity(height * width);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(TerrainFormatError::RaggedRow {
                    row: index,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        let width = u32::try_from(width).map_err(|_| TerrainFormatError::Oversized)?;
        let height = u32::try_from(height).map_err(|_| TerrainFormatError::Oversized)?;
        Ok(Self {
            dim: GridDim::new(width, height),
            cells,
        })
    }

    /// Serializes the mask as a JSON array-of-arrays of booleans, with no
    /// header or versioning.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.to_rows()).expect("bool rows always serialize")
    }

    /// Restores a terrain from the JSON produced by [`Terrain::to_json`].
    pub fn from_json(json: &str) -> Result<Self, TerrainFormatError> {
        let rows: Vec<Vec<bool>> = serde_json::from_str(json)?;
        Self::from_rows(rows)
    }
}

/// Rejection of a persisted terrain payload.
#[derive(Debug, Error)]
pub enum TerrainFormatError {
    /// The payload contained no rows or no columns.
    #[error("terrain payload is empty")]
    Empty,
    /// A row's length disagreed with the first row's.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Cell count of the first row.
        expected: usize,
        /// Cell count of the offending row.
        found: usize,
    },
    /// The grid exceeds the addressable coordinate range.
    #[error("terrain dimensions exceed the coordinate range")]
    Oversized,
    /// The payload was not valid JSON of the expected shape.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
