//! Pluggable traits for the byte-stream compressor wrapped around containers.
//!
//! The container format is independent of any specific compressor: encoding
//! applies exactly one layer of a [`Compressor`], decoding undoes exactly one
//! layer of a [`Decompressor`]. Implementations live in their own crates
//! (e.g. `lowrank-bzip2`) so the codec core never links a particular backend.

use crate::error::Result;
use crate::types::{CompressionLevel, CompressionRatio};

/// One-shot compression operations.
pub trait Compressor {
    /// Name of the compression algorithm (e.g. "bzip2").
    fn name(&self) -> &'static str;

    /// Get the configured compression level.
    fn level(&self) -> CompressionLevel;

    /// Compress data in one shot.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// One-shot decompression operations.
pub trait Decompressor {
    /// Name of the decompression algorithm.
    fn name(&self) -> &'static str;

    /// Decompress data in one shot.
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// Combined codec for both compression and decompression.
pub trait Codec: Compressor + Decompressor {
    /// Create a new codec with default settings.
    fn new() -> Self
    where
        Self: Sized;

    /// Create a new codec with the specified level.
    fn with_level(level: CompressionLevel) -> Self
    where
        Self: Sized;

    /// Round-trip test: compress then decompress.
    /// Returns true if the data matches.
    fn verify_roundtrip(&self, data: &[u8]) -> Result<bool> {
        let compressed = self.compress(data)?;
        let decompressed = self.decompress(&compressed)?;
        Ok(data == decompressed.as_slice())
    }

    /// Get the compression ratio for given data.
    fn measure_ratio(&self, data: &[u8]) -> Result<CompressionRatio> {
        let compressed = self.compress(data)?;
        Ok(CompressionRatio::new(data.len(), compressed.len()))
    }
}
