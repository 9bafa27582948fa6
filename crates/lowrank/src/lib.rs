//! # Lowrank
//!
//! SVD-based image compression with quantized, bit-packed containers.
//!
//! An image matrix is approximated by its top-k singular triplets; the
//! triplet is quantized to a configurable bit width, serialized into a
//! compact binary container, and wrapped in one layer of a pluggable
//! byte-stream compressor (bzip2 by default).
//!
//! ## Pipeline
//!
//! ```text
//! image ──> normalized matrix ──> truncated SVD ──> quantize ──> bit-pack
//!                                                                   │
//! image <── reconstruct <── dequantize <── unpack <── container <───┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use lowrank::{approx, container, svd, RankSelection};
//! use lowrank_bzip2::Bzip2Codec;
//! use lowrank_core::Codec;
//!
//! let codec = Bzip2Codec::new();
//! let rank = RankSelection::Percentage(0.1).select(svd::full_rank(m, n))?;
//! let triplet = svd::truncated_svd(&matrix, m, n, rank)?;
//! let bytes = container::encode(&triplet, 8, &codec)?;
//!
//! let decoded = container::decode(&bytes, &codec)?;
//! let reconstructed = approx::reconstruct(&decoded);
//! ```
//!
//! The codec is lossy by design and whole-file only: one encode or decode
//! call holds the full matrix in memory, and every operation is a pure,
//! deterministic function of its inputs.

pub mod approx;
pub mod bitpack;
pub mod container;
pub mod image;
pub mod quantize;
pub mod svd;

pub use approx::{reconstruct, RankSelection};
pub use container::{decode, encode, TruncatedSvd, HEADER_SIZE, MAX_BITS};
pub use image::{ColorMode, ImageMatrix};
pub use svd::{full_rank, truncated_svd};

// Re-export the core surface so binary users need one import.
pub use lowrank_core::{Codec, CompressionLevel, CompressionRatio, Compressor, Decompressor, Error, Result};
