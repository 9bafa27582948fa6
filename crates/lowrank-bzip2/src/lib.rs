//! # Lowrank Bzip2
//!
//! Bzip2 byte-stream codec for the lowrank image codec.
//!
//! Finished containers pass through exactly one layer of a general-purpose
//! byte compressor before hitting disk. This crate provides that layer via
//! the `bzip2` crate, behind the pluggable traits from `lowrank-core`, so
//! the container format never depends on a specific backend.
//!
//! ## Example
//!
//! ```ignore
//! use lowrank_bzip2::Bzip2Codec;
//! use lowrank_core::{Codec, Compressor, Decompressor};
//!
//! let codec = Bzip2Codec::new();
//! let compressed = codec.compress(data)?;
//! let original = codec.decompress(&compressed)?;
//! ```

use std::io::Read;

use bzip2::read::{BzDecoder, BzEncoder};
use bzip2::Compression;

use lowrank_core::{Codec, CompressionLevel, Compressor, Decompressor, Error, Result};

/// Map a generic level onto bzip2 block sizes (1-9, in 100kB units).
fn map_level(level: CompressionLevel) -> Compression {
    let raw = level.to_level().clamp(1, 9) as u32;
    Compression::new(raw)
}

/// Bzip2 compressor.
#[derive(Debug, Clone)]
pub struct Bzip2Compressor {
    level: CompressionLevel,
}

impl Bzip2Compressor {
    /// Create a new bzip2 compressor with default settings.
    pub fn new() -> Self {
        Self {
            level: CompressionLevel::Default,
        }
    }

    /// Create with a compression level.
    pub fn with_level(level: CompressionLevel) -> Self {
        Self { level }
    }
}

impl Default for Bzip2Compressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for Bzip2Compressor {
    fn name(&self) -> &'static str {
        "bzip2"
    }

    fn level(&self) -> CompressionLevel {
        self.level
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = BzEncoder::new(input, map_level(self.level));
        let mut output = Vec::new();
        encoder
            .read_to_end(&mut output)
            .map_err(|e| Error::codec("bzip2", e.to_string()))?;
        Ok(output)
    }
}

/// Bzip2 decompressor.
#[derive(Debug, Clone, Default)]
pub struct Bzip2Decompressor;

impl Bzip2Decompressor {
    /// Create a new bzip2 decompressor.
    pub fn new() -> Self {
        Self
    }
}

impl Decompressor for Bzip2Decompressor {
    fn name(&self) -> &'static str {
        "bzip2"
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = BzDecoder::new(input);
        let mut output = Vec::new();
        decoder
            .read_to_end(&mut output)
            .map_err(|e| Error::codec("bzip2", e.to_string()))?;
        Ok(output)
    }
}

/// Bzip2 codec combining compression and decompression.
#[derive(Debug, Clone)]
pub struct Bzip2Codec {
    compressor: Bzip2Compressor,
    decompressor: Bzip2Decompressor,
}

impl Default for Bzip2Codec {
    fn default() -> Self {
        <Self as Codec>::new()
    }
}

impl Compressor for Bzip2Codec {
    fn name(&self) -> &'static str {
        self.compressor.name()
    }

    fn level(&self) -> CompressionLevel {
        self.compressor.level()
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.compressor.compress(input)
    }
}

impl Decompressor for Bzip2Codec {
    fn name(&self) -> &'static str {
        self.decompressor.name()
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.decompressor.decompress(input)
    }
}

impl Codec for Bzip2Codec {
    fn new() -> Self {
        Self {
            compressor: Bzip2Compressor::new(),
            decompressor: Bzip2Decompressor::new(),
        }
    }

    fn with_level(level: CompressionLevel) -> Self {
        Self {
            compressor: Bzip2Compressor::with_level(level),
            decompressor: Bzip2Decompressor::new(),
        }
    }
}
