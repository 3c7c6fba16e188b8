use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sandlot_benchmark::GenerationMetrics;
use sandlot_gen::editor::{Brush, Editor, TileMapping};
use sandlot_gen::{GeneratorSettings, SeededRandom, TerrainGenerator};
use sandlot_level::{Compression, LevelCodec};

mod preview;

#[derive(Parser)]
#[command(name = "sandlot", about = "Side-view sandbox level generator and tile editor")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a new level
    Generate {
        #[arg(long, default_value = "1000")]
        width: i32,

        #[arg(long, default_value = "1000")]
        height: i32,

        /// Level seed (random when omitted)
        #[arg(short, long, env = "SANDLOT_SEED")]
        seed: Option<u64>,

        /// JSON file overriding generator settings
        #[arg(long, env = "SANDLOT_SETTINGS")]
        settings: Option<PathBuf>,

        #[arg(short, long, default_value = "level.lvl")]
        out: PathBuf,

        /// Also export the tile layer as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Store tile data without zlib compression
        #[arg(long)]
        uncompressed: bool,

        /// Print the top-left corner of the level
        #[arg(long)]
        preview: bool,

        /// Print a generation report
        #[arg(long)]
        report: bool,
    },

    /// Paint tiles into an existing level
    Paint {
        level: PathBuf,

        /// grass, dirt, stone, water or erase
        #[arg(short, long)]
        brush: Brush,

        /// Tile coordinates, X,Y (repeatable)
        #[arg(long, value_parser = preview::parse_pair::<i32>)]
        tile: Vec<(i32, i32)>,

        /// World pixel coordinates, X,Y (repeatable)
        #[arg(long, value_parser = preview::parse_pair::<f64>)]
        world: Vec<(f64, f64)>,

        /// Write the result here instead of overwriting the level
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// JSON settings file; its max_cells bounds the level read
        #[arg(long, env = "SANDLOT_SETTINGS")]
        settings: Option<PathBuf>,
    },

    /// Show dimensions and tile counts of a level
    Info {
        level: PathBuf,

        #[arg(long, env = "SANDLOT_SETTINGS")]
        settings: Option<PathBuf>,
    },

    /// Print a window of a level as text
    Preview {
        level: PathBuf,

        #[arg(long, env = "SANDLOT_SETTINGS")]
        settings: Option<PathBuf>,

        #[arg(long, default_value = "0..40", value_parser = preview::parse_range)]
        rows: std::ops::Range<usize>,

        #[arg(long, default_value = "0..120", value_parser = preview::parse_range)]
        cols: std::ops::Range<usize>,
    },
}

fn load_settings(path: Option<&Path>) -> Result<GeneratorSettings> {
    match path {
        Some(path) => GeneratorSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(GeneratorSettings::default()),
    }
}

/// Codec for reading existing levels, bounded by the configured cell limit.
fn level_codec(settings: Option<&Path>) -> Result<LevelCodec> {
    let settings = load_settings(settings)?;
    Ok(LevelCodec::new().with_max_cells(settings.max_cells))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Generate {
            width,
            height,
            seed,
            settings,
            out,
            json,
            uncompressed,
            preview: show_preview,
            report,
        } => {
            let settings = load_settings(settings.as_deref())?;
            let seed = seed.unwrap_or_else(rand::random);

            let metrics = Arc::new(GenerationMetrics::new(format!(
                "width={} height={} seed={}",
                width, height, seed
            )));
            let generator = TerrainGenerator::with_settings(settings).with_metrics(metrics.clone());

            println!("Generating {}x{} level with seed {}", width, height, seed);
            let mut rng = SeededRandom::new(seed);
            let level = generator
                .generate_level(width, height, &mut rng)
                .context("Level generation failed")?;

            let compression = if uncompressed { Compression::None } else { Compression::Zlib };
            let codec = LevelCodec::new()
                .with_compression(compression)
                .with_max_cells(generator.settings().max_cells)
                .with_metrics(metrics.clone());
            codec.save(&out, &level.grid)?;
            println!("Saved level to {:?}", out);

            if let Some(json) = json {
                sandlot_level::export_layer_json(&json, "World", &level.grid)?;
                println!("Exported tile layer to {:?}", json);
            }
            if show_preview {
                print!("{}", preview::render(&level.grid, 0..40, 0..120));
            }
            if report {
                println!("{}", metrics.generate_report());
            }
        }

        Command::Paint { level, brush, tile, world, out, settings } => {
            if tile.is_empty() && world.is_empty() {
                bail!("nothing to paint: pass --tile X,Y or --world X,Y");
            }
            let codec = level_codec(settings.as_deref())?;
            let mut grid = codec.load(&level)?;
            let editor = Editor::new(brush, TileMapping::default());

            let mut applied = 0;
            for (x, y) in tile {
                if editor.paint(&mut grid, x, y) {
                    applied += 1;
                } else {
                    log::warn!(
                        "Tile ({}, {}) is outside the {}x{} level",
                        x,
                        y,
                        grid.width(),
                        grid.height()
                    );
                }
            }
            for (x, y) in world {
                if editor.paint_world(&mut grid, x, y) {
                    applied += 1;
                } else {
                    log::warn!("World point ({}, {}) is outside the level", x, y);
                }
            }

            let target = out.unwrap_or(level);
            codec.save(&target, &grid)?;
            println!("Painted {} tile(s) with {}, saved to {:?}", applied, brush, target);
        }

        Command::Info { level, settings } => {
            let grid = level_codec(settings.as_deref())?.load(&level)?;
            println!("{:?}: {}x{} tiles", level, grid.width(), grid.height());
            for (kind, count) in preview::tile_counts(&grid) {
                let name = format!("{:?}", kind);
                println!("  {:<14} {:>10}  (tile index {})", name, count, kind.tile_index());
            }
        }

        Command::Preview { level, settings, rows, cols } => {
            let grid = level_codec(settings.as_deref())?.load(&level)?;
            print!("{}", preview::render(&grid, rows, cols));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandlot_gen::TileGrid;

    #[test]
    fn test_generate_defaults() {
        let args = Args::try_parse_from(["sandlot", "generate", "--seed", "7"]).unwrap();
        match args.command {
            Command::Generate { width, height, seed, out, uncompressed, .. } => {
                assert_eq!((width, height), (1000, 1000));
                assert_eq!(seed, Some(7));
                assert_eq!(out, PathBuf::from("level.lvl"));
                assert!(!uncompressed);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_paint_arguments() {
        let args = Args::try_parse_from([
            "sandlot", "paint", "a.lvl", "--brush", "water", "--tile", "3,4", "--tile", "5,6",
            "--world", "70.5,210",
        ])
        .unwrap();
        match args.command {
            Command::Paint { brush, tile, world, .. } => {
                assert_eq!(brush, Brush::Water);
                assert_eq!(tile, vec![(3, 4), (5, 6)]);
                assert_eq!(world, vec![(70.5, 210.0)]);
            }
            _ => panic!("expected paint"),
        }
    }

    #[test]
    fn test_rejects_unknown_brush() {
        assert!(Args::try_parse_from(["sandlot", "paint", "a.lvl", "--brush", "lava"]).is_err());
    }

    #[test]
    fn test_info_settings_argument() {
        let args =
            Args::try_parse_from(["sandlot", "info", "a.lvl", "--settings", "s.json"]).unwrap();
        match args.command {
            Command::Info { level, settings } => {
                assert_eq!(level, PathBuf::from("a.lvl"));
                assert_eq!(settings, Some(PathBuf::from("s.json")));
            }
            _ => panic!("expected info"),
        }
    }

    #[test]
    fn test_level_codec_uses_settings_limit() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("small.json");
        std::fs::write(&settings, r#"{ "max_cells": 50 }"#).unwrap();
        let level = dir.path().join("level.lvl");
        LevelCodec::new().save(&level, &TileGrid::new(10, 10)).unwrap();

        let err = level_codec(Some(settings.as_path())).unwrap().load(&level).unwrap_err();
        assert!(format!("{:#}", err).contains("exceeds the limit of 50 cells"));
        assert_eq!(level_codec(None).unwrap().load(&level).unwrap().width(), 10);
    }

    #[test]
    fn test_level_codec_reports_missing_settings() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = level_codec(Some(missing.as_path())).unwrap_err();
        assert!(err.to_string().contains("Failed to load settings"));
    }

    #[test]
    fn test_preview_ranges() {
        let args = Args::try_parse_from(["sandlot", "preview", "a.lvl", "--rows", "5..9"]).unwrap();
        match args.command {
            Command::Preview { rows, cols, .. } => {
                assert_eq!(rows, 5..9);
                assert_eq!(cols, 0..120);
            }
            _ => panic!("expected preview"),
        }
    }
}
