pub trait LevelGenerator: Send + Sync {
    fn generate(
        &self,
        width: i32,
        height: i32,
        rng: &mut dyn RandomSource,
    ) -> Result<TileGrid, GenerateError>;
}

pub mod editor;
pub mod error;
pub mod grid;
pub mod layer;
pub mod random;
pub mod settings;
pub mod terrain;
pub mod tile;

pub use error::GenerateError;
pub use grid::{HeightProfile, TileGrid};
pub use layer::TileLayer;
pub use random::{RandomSource, SeededRandom};
pub use settings::GeneratorSettings;
pub use terrain::{GeneratedLevel, TerrainGenerator};
pub use tile::TileKind;
