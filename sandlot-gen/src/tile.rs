//! Tile kinds and their tileset indices.
//!
//! The numeric indices address cells of the 16x16 world tileset image and
//! must not change, or existing tilesets render the wrong sprites.

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

/// Tileset index used for "no tile".
pub const EMPTY_INDEX: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    #[default]
    Empty,
    Dirt,
    Grass,
    Stone,
    Water,
    TreeShort,
    TreeTallBase,
    TreeTallMid,
    TreeTallTop,
}

impl TileKind {
    pub const ALL: [TileKind; 9] = [
        TileKind::Empty,
        TileKind::Dirt,
        TileKind::Grass,
        TileKind::Stone,
        TileKind::Water,
        TileKind::TreeShort,
        TileKind::TreeTallBase,
        TileKind::TreeTallMid,
        TileKind::TreeTallTop,
    ];

    /// Index into the world tileset, or [`EMPTY_INDEX`].
    pub fn tile_index(self) -> i32 {
        match self {
            TileKind::Empty => EMPTY_INDEX,
            TileKind::Grass => 0,
            TileKind::Stone => 8,
            TileKind::Dirt => 16,
            TileKind::Water => 192,
            TileKind::TreeShort => 49,
            TileKind::TreeTallBase => 80,
            TileKind::TreeTallMid => 64,
            TileKind::TreeTallTop => 48,
        }
    }

    pub fn from_tile_index(index: i32) -> Result<Self, GenerateError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tile_index() == index)
            .ok_or(GenerateError::UnknownTileIndex(index))
    }

    pub fn is_empty(self) -> bool {
        self == TileKind::Empty
    }

    /// Every painted tile collides, water and trees included.
    pub fn is_solid(self) -> bool {
        !self.is_empty()
    }

    /// Single character used by text previews.
    pub fn glyph(self) -> char {
        match self {
            TileKind::Empty => ' ',
            TileKind::Dirt => '#',
            TileKind::Grass => '"',
            TileKind::Stone => '@',
            TileKind::Water => '~',
            TileKind::TreeShort => 't',
            TileKind::TreeTallBase => '|',
            TileKind::TreeTallMid => '|',
            TileKind::TreeTallTop => 'T',
        }
    }
}
