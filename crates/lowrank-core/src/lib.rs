//! # Lowrank Core
//!
//! Core traits, types, and errors for the lowrank image codec.
//!
//! The codec approximates an image matrix by its top-k singular triplets,
//! quantizes them to a fixed bit width, and serializes them into a compact
//! binary container. This crate holds the pieces every other workspace
//! member shares:
//!
//! - [`Error`] / [`Result`] - the error taxonomy (validation, format, domain)
//! - [`Compressor`] / [`Decompressor`] / [`Codec`] - the pluggable
//!   byte-stream compressor wrapped around finished containers
//! - [`CompressionLevel`] / [`CompressionRatio`] - shared value types
//!
//! ## Example
//!
//! ```ignore
//! use lowrank_core::{Codec, CompressionLevel};
//! use lowrank_bzip2::Bzip2Codec;
//!
//! let codec = Bzip2Codec::with_level(CompressionLevel::Best);
//! let compressed = codec.compress(data)?;
//! let original = codec.decompress(&compressed)?;
//! ```

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::{Codec, Compressor, Decompressor};
pub use types::{CompressionLevel, CompressionRatio};
