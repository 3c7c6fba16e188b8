//! Export of a tile grid as a tileset-indexed layer, the shape tilemap
//! renderers consume.

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::grid::TileGrid;
use crate::tile::{EMPTY_INDEX, TileKind};

/// Pixel size of one tile in the world tileset.
pub const DEFAULT_TILE_SIZE: u32 = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Row-major tileset indices, `-1` for no tile.
    pub data: Vec<i32>,
}

impl TileLayer {
    pub fn from_grid(name: &str, grid: &TileGrid) -> Self {
        Self {
            name: name.to_string(),
            width: grid.width(),
            height: grid.height(),
            tile_width: DEFAULT_TILE_SIZE,
            tile_height: DEFAULT_TILE_SIZE,
            data: grid.cells().iter().map(|t| t.tile_index()).collect(),
        }
    }

    /// Painted tiles only, row by row: `(x, y, tileset index)`.
    pub fn painted(&self) -> impl Iterator<Item = (usize, usize, i32)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .filter(|(_, index)| **index != EMPTY_INDEX)
            .map(move |(i, index)| (i % width, i / width, *index))
    }

    pub fn to_grid(&self) -> Result<TileGrid, GenerateError> {
        let cells = self
            .data
            .iter()
            .map(|&index| TileKind::from_tile_index(index))
            .collect::<Result<Vec<_>, _>>()?;
        TileGrid::from_cells(self.width, self.height, cells).ok_or(GenerateError::LayerMismatch {
            expected: self.width * self.height,
            actual: self.data.len(),
        })
    }
}
