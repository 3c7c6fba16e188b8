//! On-disk level files.
//!
//! A level file is a fixed header followed by one blob wrapped the same way
//! region chunks are: `[length:4][compression:1][payload:N]`, where
//! `length` counts the compression byte plus the payload. The payload is the
//! tileset index of every cell as a big endian `i16`, row by row.

use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use flate2::Compression as ZlibLevel;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use sandlot_benchmark::GenerationMetrics;
use sandlot_gen::settings::DEFAULT_MAX_CELLS;
use sandlot_gen::{TileGrid, TileKind, TileLayer};

pub mod header;

use header::{HEADER_BYTES, Header};

/// Bytes taken by the blob length and compression type.
const BLOB_PREFIX_BYTES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    Zlib,
    None,
}

impl Compression {
    pub fn id(self) -> u8 {
        match self {
            Compression::Zlib => 2,
            Compression::None => 3,
        }
    }

    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            2 => Ok(Compression::Zlib),
            3 => Ok(Compression::None),
            other => bail!("unsupported compression type {}", other),
        }
    }
}

#[derive(Debug)]
pub struct LevelCodec {
    compression: Compression,
    max_cells: u64,
    metrics: Option<Arc<GenerationMetrics>>,
}

impl Default for LevelCodec {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            max_cells: DEFAULT_MAX_CELLS,
            metrics: None,
        }
    }
}

impl LevelCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_max_cells(mut self, max_cells: u64) -> Self {
        self.max_cells = max_cells;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<GenerationMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn encode(&self, grid: &TileGrid) -> Result<Vec<u8>> {
        let started = Instant::now();
        let header = Header {
            width: u32::try_from(grid.width()).context("level too wide to encode")?,
            height: u32::try_from(grid.height()).context("level too tall to encode")?,
        };

        let mut raw = Vec::with_capacity(grid.cells().len() * 2);
        for tile in grid.cells() {
            raw.extend_from_slice(&(tile.tile_index() as i16).to_be_bytes());
        }

        let payload = match self.compression {
            Compression::Zlib => {
                let mut encoder = ZlibEncoder::new(Vec::new(), ZlibLevel::default());
                encoder.write_all(&raw).context("Failed to compress level")?;
                encoder.finish().context("Failed to finish compression")?
            }
            Compression::None => raw.clone(),
        };

        let mut out = Vec::with_capacity(HEADER_BYTES + BLOB_PREFIX_BYTES + payload.len());
        header.write(&mut out);
        let total_len = (payload.len() + 1) as u32;
        out.extend_from_slice(&total_len.to_be_bytes());
        out.push(self.compression.id());
        out.extend_from_slice(&payload);

        if let Some(metrics) = &self.metrics {
            metrics.record_encode(started.elapsed(), raw.len(), out.len());
        }
        log::debug!(
            "Encoded {}x{} level: {} raw bytes -> {} bytes ({:?})",
            header.width,
            header.height,
            raw.len(),
            out.len(),
            self.compression
        );
        Ok(out)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<TileGrid> {
        let started = Instant::now();
        let header = Header::read(bytes)?;
        if header.cells() > self.max_cells {
            bail!(
                "level of {}x{} exceeds the limit of {} cells",
                header.width, header.height, self.max_cells
            );
        }

        let blob = &bytes[HEADER_BYTES..];
        if blob.len() < BLOB_PREFIX_BYTES {
            bail!("level file truncated before tile data");
        }
        let length = u32::from_be_bytes([blob[0], blob[1], blob[2], blob[3]]) as usize;
        if length == 0 || blob.len() - 4 < length {
            bail!("level blob length {} does not match {} available bytes", length, blob.len() - 4);
        }
        let compression = Compression::from_id(blob[4])?;
        let payload = &blob[BLOB_PREFIX_BYTES..4 + length];

        let expected = header.cells() as usize * 2;
        let raw = match compression {
            Compression::Zlib => {
                let mut raw = Vec::with_capacity(expected);
                // Read one byte past the expected size so oversized payloads are caught
                ZlibDecoder::new(payload)
                    .take(expected as u64 + 1)
                    .read_to_end(&mut raw)
                    .context("Failed to decompress level")?;
                raw
            }
            Compression::None => payload.to_vec(),
        };
        if raw.len() != expected {
            bail!("level holds {} bytes of tile data, expected {}", raw.len(), expected);
        }

        let cells = raw
            .chunks_exact(2)
            .map(|pair| TileKind::from_tile_index(i16::from_be_bytes([pair[0], pair[1]]) as i32))
            .collect::<Result<Vec<_>, _>>()?;
        let grid = TileGrid::from_cells(header.width as usize, header.height as usize, cells)
            .context("tile count does not match level dimensions")?;

        if let Some(metrics) = &self.metrics {
            metrics.record_decode(started.elapsed());
        }
        Ok(grid)
    }

    pub fn save(&self, path: &Path, grid: &TileGrid) -> Result<()> {
        let bytes = self.encode(grid)?;
        std::fs::write(path, &bytes)
            .with_context(|| format!("Failed to write level to {}", path.display()))?;
        log::info!("Saved level to {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    pub fn load(&self, path: &Path) -> Result<TileGrid> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read level from {}", path.display()))?;
        self.decode(&bytes)
            .with_context(|| format!("Failed to decode level {}", path.display()))
    }
}

/// Write the grid as a JSON tile layer for external tilemap tooling.
pub fn export_layer_json(path: &Path, name: &str, grid: &TileGrid) -> Result<()> {
    let layer = TileLayer::from_grid(name, grid);
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &layer).context("Failed to serialize tile layer")?;
    writer.flush().context("Failed to flush tile layer")?;
    log::info!("Exported tile layer '{}' to {}", name, path.display());
    Ok(())
}

pub fn import_layer_json(path: &Path) -> Result<TileGrid> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let layer: TileLayer = serde_json::from_str(&text).context("Failed to parse tile layer")?;
    Ok(layer.to_grid()?)
}
