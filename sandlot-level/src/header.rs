//! Level file header.
//!
//! Layout (big endian):
//! - magic: 4 bytes, `SLVL`
//! - version: 1 byte
//! - width: u32
//! - height: u32

use anyhow::{Result, bail};

pub const MAGIC: &[u8; 4] = b"SLVL";
pub const VERSION: u8 = 1;
pub const HEADER_BYTES: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
}

impl Header {
    pub fn cells(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(MAGIC);
        out.push(VERSION);
        out.extend_from_slice(&self.width.to_be_bytes());
        out.extend_from_slice(&self.height.to_be_bytes());
    }

    pub fn read(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_BYTES {
            bail!("level file too short: {} bytes, header needs {}", bytes.len(), HEADER_BYTES);
        }
        if &bytes[0..4] != MAGIC {
            bail!("not a level file (bad magic {:02x?})", &bytes[0..4]);
        }
        if bytes[4] != VERSION {
            bail!("unsupported level file version {}", bytes[4]);
        }
        let width = u32::from_be_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]);
        let height = u32::from_be_bytes([bytes[9], bytes[10], bytes[11], bytes[12]]);
        if width == 0 || height == 0 {
            bail!("level has empty dimensions {}x{}", width, height);
        }
        Ok(Self { width, height })
    }
}
