//! Tunable generation parameters.
//!
//! Defaults reproduce the classic sandlot terrain. Settings can also be
//! loaded from a JSON file; missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

/// Largest level the generator accepts by default (4096 x 4096 tiles).
pub const DEFAULT_MAX_CELLS: u64 = 16_777_216;

/// Bound on every row/column offset in the settings. Keeps surface, stone
/// and water arithmetic well inside `i32`.
pub const COORD_LIMIT: i32 = 1_000_000;

fn check_coord(name: &str, value: i32, min: i32) -> Result<(), GenerateError> {
    if !(min..=COORD_LIMIT).contains(&value) {
        return Err(GenerateError::InvalidSettings(format!(
            "{name} must be within [{min}, {COORD_LIMIT}], got {value}"
        )));
    }
    Ok(())
}

/// Inclusive integer range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub min: i32,
    pub max: i32,
}

impl Span {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    fn validate(&self, name: &str) -> Result<(), GenerateError> {
        check_coord(&format!("{name}.min"), self.min, -COORD_LIMIT)?;
        check_coord(&format!("{name}.max"), self.max, -COORD_LIMIT)?;
        if self.min > self.max {
            return Err(GenerateError::InvalidSettings(format!(
                "{name}: min {} is greater than max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// One family of water bands ("carve `band_rows` rows of water near a depth
/// across a horizontal span").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterFeature {
    pub iterations: u32,
    pub span: Span,
    /// Added to the surface row of each column.
    pub depth: Span,
    pub band_rows: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Multiplier on the raw column index fed to `sin`. Fixed in tile units,
    /// so wider levels get more wave cycles.
    pub wave_frequency: f64,
    pub surface_base: Span,
    pub surface_amplitude: Span,
    pub short_tree_chance: f64,
    pub tall_tree_chance: f64,
    /// Rows between the surface and the top of the stone layer.
    pub stone_offset: Span,
    /// Per-cell fill chance inside the stone layer. The leftover gaps are
    /// purely cosmetic.
    pub stone_fill_chance: f64,
    pub water_start_min: i32,
    /// Water spans start at most this many columns before the right edge.
    pub water_right_margin: i32,
    pub surface_water: WaterFeature,
    pub underground_water: WaterFeature,
    pub max_cells: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            wave_frequency: 0.3,
            surface_base: Span::new(11, 13),
            surface_amplitude: Span::new(1, 5),
            short_tree_chance: 0.2,
            tall_tree_chance: 0.2,
            stone_offset: Span::new(15, 20),
            stone_fill_chance: 0.999,
            water_start_min: 5,
            water_right_margin: 15,
            surface_water: WaterFeature {
                iterations: 10,
                span: Span::new(5, 10),
                depth: Span::new(0, 3),
                band_rows: 3,
            },
            underground_water: WaterFeature {
                iterations: 5,
                span: Span::new(15, 25),
                depth: Span::new(50, 53),
                band_rows: 3,
            },
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl GeneratorSettings {
    pub fn from_json(text: &str) -> Result<Self, GenerateError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, GenerateError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GenerateError::InvalidSettings(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), GenerateError> {
        self.surface_base.validate("surface_base")?;
        self.surface_amplitude.validate("surface_amplitude")?;
        self.stone_offset.validate("stone_offset")?;
        for (name, feature) in [
            ("surface_water", &self.surface_water),
            ("underground_water", &self.underground_water),
        ] {
            feature.span.validate(&format!("{name}.span"))?;
            feature.depth.validate(&format!("{name}.depth"))?;
            check_coord(&format!("{name}.band_rows"), feature.band_rows, 0)?;
        }
        check_coord("water_start_min", self.water_start_min, 0)?;
        check_coord("water_right_margin", self.water_right_margin, 0)?;
        for (name, p) in [
            ("short_tree_chance", self.short_tree_chance),
            ("tall_tree_chance", self.tall_tree_chance),
            ("stone_fill_chance", self.stone_fill_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GenerateError::InvalidSettings(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        if !self.wave_frequency.is_finite() {
            return Err(GenerateError::InvalidSettings("wave_frequency must be finite".into()));
        }
        Ok(())
    }

    /// Start column range for water spans on a level `width` tiles wide.
    /// Narrow levels collapse the range to its minimum.
    pub fn water_start(&self, width: i32) -> Span {
        let max = width
            .saturating_sub(self.water_right_margin)
            .max(self.water_start_min);
        Span::new(self.water_start_min, max)
    }

    /// Lowest and highest surface row the profile pass can produce.
    pub fn surface_bounds(&self) -> (i32, i32) {
        let amplitude = self.surface_amplitude;
        let reach = amplitude.min.saturating_abs().max(amplitude.max.saturating_abs());
        (
            self.surface_base.min.saturating_sub(reach),
            self.surface_base.max.saturating_add(reach),
        )
    }
}
