//! Tile painting on a generated level.
//!
//! The editor holds the selected brush and the mapping between world pixels
//! and tile coordinates. Clicks that land outside the level are ignored.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use sandlot_benchmark::GenerationMetrics;

use crate::grid::TileGrid;
use crate::tile::TileKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Brush {
    #[default]
    Grass,
    Dirt,
    Stone,
    Water,
    Erase,
}

impl Brush {
    /// Inventory slots 1 to 5, in hotbar order.
    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(Brush::Grass),
            2 => Some(Brush::Dirt),
            3 => Some(Brush::Stone),
            4 => Some(Brush::Water),
            5 => Some(Brush::Erase),
            _ => None,
        }
    }

    pub fn tile(self) -> TileKind {
        match self {
            Brush::Grass => TileKind::Grass,
            Brush::Dirt => TileKind::Dirt,
            Brush::Stone => TileKind::Stone,
            Brush::Water => TileKind::Water,
            Brush::Erase => TileKind::Empty,
        }
    }
}

impl FromStr for Brush {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grass" => Ok(Brush::Grass),
            "dirt" => Ok(Brush::Dirt),
            "stone" => Ok(Brush::Stone),
            "water" => Ok(Brush::Water),
            "erase" | "remove" => Ok(Brush::Erase),
            other => Err(format!("unknown brush '{other}'")),
        }
    }
}

impl fmt::Display for Brush {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Brush::Grass => "grass",
            Brush::Dirt => "dirt",
            Brush::Stone => "stone",
            Brush::Water => "water",
            Brush::Erase => "erase",
        };
        f.write_str(name)
    }
}

/// World pixel <-> tile conversion for a scaled, offset tile layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileMapping {
    pub tile_size: u32,
    pub scale: u32,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for TileMapping {
    fn default() -> Self {
        Self {
            tile_size: 16,
            scale: 2,
            origin_x: 0.0,
            origin_y: 200.0,
        }
    }
}

impl TileMapping {
    /// On-screen size of one tile in world pixels.
    pub fn tile_pixels(&self) -> f64 {
        (self.tile_size * self.scale) as f64
    }

    pub fn world_to_tile(&self, world_x: f64, world_y: f64) -> (i32, i32) {
        let size = self.tile_pixels();
        (
            ((world_x - self.origin_x) / size).floor() as i32,
            ((world_y - self.origin_y) / size).floor() as i32,
        )
    }

    /// Top-left corner of a tile in world pixels.
    pub fn tile_to_world(&self, tile_x: i32, tile_y: i32) -> (f64, f64) {
        let size = self.tile_pixels();
        (
            self.origin_x + tile_x as f64 * size,
            self.origin_y + tile_y as f64 * size,
        )
    }
}

#[derive(Default)]
pub struct Editor {
    pub brush: Brush,
    pub mapping: TileMapping,
    metrics: Option<Arc<GenerationMetrics>>,
}

impl Editor {
    pub fn new(brush: Brush, mapping: TileMapping) -> Self {
        Self { brush, mapping, metrics: None }
    }

    pub fn with_metrics(mut self, metrics: Arc<GenerationMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Switch brush by hotbar slot. Unknown slots keep the current brush.
    pub fn select_slot(&mut self, slot: u8) -> bool {
        match Brush::from_slot(slot) {
            Some(brush) => {
                self.brush = brush;
                true
            }
            None => false,
        }
    }

    /// Paint the tile at tile coordinates. Returns `false` when the
    /// coordinates are outside the grid.
    pub fn paint(&self, grid: &mut TileGrid, tile_x: i32, tile_y: i32) -> bool {
        let applied = grid.set(tile_x, tile_y, self.brush.tile());
        if applied {
            log::trace!("Painted {} at ({}, {})", self.brush, tile_x, tile_y);
        } else {
            log::debug!("Ignored {} outside the level at ({}, {})", self.brush, tile_x, tile_y);
        }
        if let Some(metrics) = &self.metrics {
            metrics.record_edit(applied);
        }
        applied
    }

    pub fn paint_world(&self, grid: &mut TileGrid, world_x: f64, world_y: f64) -> bool {
        let (x, y) = self.mapping.world_to_tile(world_x, world_y);
        self.paint(grid, x, y)
    }
}
