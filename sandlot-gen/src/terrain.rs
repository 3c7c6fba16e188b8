//! Side-view terrain generation.
//!
//! A level is built in four passes over a fresh grid:
//! 1. height profile: one wavy surface row per column
//! 2. ground fill: dirt down to the bottom, grass on top, trees above
//! 3. stone layer: a noisy stone band some rows below the surface
//! 4. water: shallow surface pools and deep underground lakes
//!
//! Derived rows and columns saturate instead of overflowing; anything that
//! lands outside the grid is skipped.
//!
//! Passes 2 and 3 share one column sweep, so the random stream is consumed
//! column by column (trees, then stone offset, then stone cells). Seeds stay
//! compatible with levels produced by earlier builds only as long as this
//! draw order is kept.

use std::sync::Arc;
use std::time::{Duration, Instant};

use sandlot_benchmark::GenerationMetrics;

use crate::error::GenerateError;
use crate::grid::{HeightProfile, TileGrid};
use crate::random::RandomSource;
use crate::settings::{GeneratorSettings, Span, WaterFeature};
use crate::tile::TileKind;
use crate::LevelGenerator;

/// A generated level together with the surface profile it was built from.
#[derive(Debug, Clone)]
pub struct GeneratedLevel {
    pub grid: TileGrid,
    pub profile: HeightProfile,
}

#[derive(Default)]
pub struct TerrainGenerator {
    settings: GeneratorSettings,
    metrics: Option<Arc<GenerationMetrics>>,
}

impl TerrainGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: GeneratorSettings) -> Self {
        Self { settings, metrics: None }
    }

    pub fn with_metrics(mut self, metrics: Arc<GenerationMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Reject bad dimensions before anything is allocated.
    fn check_dimensions(&self, width: i32, height: i32) -> Result<(usize, usize), GenerateError> {
        if width <= 0 || height <= 0 {
            return Err(GenerateError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
            });
        }
        let cells = width as u64 * height as u64;
        if cells > self.settings.max_cells {
            return Err(GenerateError::TooLarge {
                cells,
                limit: self.settings.max_cells,
            });
        }
        Ok((width as usize, height as usize))
    }

    pub fn generate_level<R: RandomSource + ?Sized>(
        &self,
        width: i32,
        height: i32,
        rng: &mut R,
    ) -> Result<GeneratedLevel, GenerateError> {
        let (w, h) = self.check_dimensions(width, height)?;
        let settings = &self.settings;
        let started = Instant::now();

        let mut grid = TileGrid::new(w, h);

        let pass_start = Instant::now();
        let profile = height_profile(width, settings, rng);
        let profile_time = pass_start.elapsed();

        let pass_start = Instant::now();
        let mut stone_time = Duration::ZERO;
        for x in 0..width {
            let surface = profile.as_slice()[x as usize];
            fill_ground(&mut grid, x, surface);
            place_trees(&mut grid, x, surface, settings, rng);
            let stone_start = Instant::now();
            lay_stone(&mut grid, x, surface, settings, rng);
            stone_time += stone_start.elapsed();
        }
        let ground_time = pass_start.elapsed().saturating_sub(stone_time);

        let pass_start = Instant::now();
        let start = settings.water_start(width);
        carve_water(&mut grid, &profile, start, &settings.surface_water, rng);
        carve_water(&mut grid, &profile, start, &settings.underground_water, rng);
        let water_time = pass_start.elapsed();

        let elapsed = started.elapsed();
        log::debug!(
            "Generated {}x{} level in {:.2?} \
             (profile {:.2?}, ground {:.2?}, stone {:.2?}, water {:.2?})",
            width,
            height,
            elapsed,
            profile_time,
            ground_time,
            stone_time,
            water_time
        );

        if let Some(metrics) = &self.metrics {
            metrics.record_profile(profile_time);
            metrics.record_ground(ground_time);
            metrics.record_stone(stone_time);
            metrics.record_water(water_time);
            metrics.record_generation(elapsed, w * h);
        }

        Ok(GeneratedLevel { grid, profile })
    }
}

impl LevelGenerator for TerrainGenerator {
    fn generate(
        &self,
        width: i32,
        height: i32,
        rng: &mut dyn RandomSource,
    ) -> Result<TileGrid, GenerateError> {
        self.generate_level(width, height, rng).map(|level| level.grid)
    }
}

/// Pass 1. Base is drawn before amplitude for every column.
fn height_profile<R: RandomSource + ?Sized>(
    width: i32,
    settings: &GeneratorSettings,
    rng: &mut R,
) -> HeightProfile {
    let rows = (0..width)
        .map(|x| {
            let base = draw(rng, settings.surface_base);
            let amplitude = draw(rng, settings.surface_amplitude);
            let wave = (x as f64 * settings.wave_frequency).sin();
            (base as f64 + amplitude as f64 * wave).floor() as i32
        })
        .collect();
    HeightProfile::new(rows)
}

/// Pass 2a. Dirt from the surface to the bottom, grass on the surface row.
fn fill_ground(grid: &mut TileGrid, x: i32, surface: i32) {
    let height = grid.height() as i32;
    for y in surface.max(0)..height {
        grid.set(x, y, TileKind::Dirt);
    }
    if surface < height {
        grid.set(x, surface, TileKind::Grass);
    }
}

/// Pass 2b. Both tree checks always draw once the surface is inside the
/// level; a tall tree replaces a short one. Trees that would poke above
/// row 0 are dropped.
fn place_trees<R: RandomSource + ?Sized>(
    grid: &mut TileGrid,
    x: i32,
    surface: i32,
    settings: &GeneratorSettings,
    rng: &mut R,
) {
    if surface >= grid.height() as i32 {
        return;
    }

    if rng.chance(settings.short_tree_chance) && surface >= 1 {
        grid.set(x, surface - 1, TileKind::TreeShort);
    }
    if rng.chance(settings.tall_tree_chance) && surface >= 3 {
        grid.set(x, surface - 1, TileKind::TreeTallBase);
        grid.set(x, surface - 2, TileKind::TreeTallMid);
        grid.set(x, surface - 3, TileKind::TreeTallTop);
    }
}

/// Pass 3. Every cell of the band gets its own fill draw.
fn lay_stone<R: RandomSource + ?Sized>(
    grid: &mut TileGrid,
    x: i32,
    surface: i32,
    settings: &GeneratorSettings,
    rng: &mut R,
) {
    let top = surface.saturating_add(draw(rng, settings.stone_offset));
    for y in top.max(0)..grid.height() as i32 {
        if rng.chance(settings.stone_fill_chance) {
            grid.set(x, y, TileKind::Stone);
        }
    }
}

/// Pass 4. Depths are measured from the original surface profile, never from
/// water or stone placed earlier. A depth is drawn for every span column,
/// including columns past the right edge, which are then skipped.
fn carve_water<R: RandomSource + ?Sized>(
    grid: &mut TileGrid,
    profile: &HeightProfile,
    start: Span,
    feature: &WaterFeature,
    rng: &mut R,
) {
    for _ in 0..feature.iterations {
        let first = draw(rng, start);
        let span = draw(rng, feature.span);
        for x in first..first.saturating_add(span) {
            let offset = draw(rng, feature.depth);
            let Some(surface) = profile.get(x) else {
                continue;
            };
            let depth = surface.saturating_add(offset);
            for y in depth..depth.saturating_add(feature.band_rows) {
                grid.set(x, y, TileKind::Water);
            }
        }
    }
}

#[inline]
fn draw<R: RandomSource + ?Sized>(rng: &mut R, span: Span) -> i32 {
    rng.between(span.min, span.max)
}
