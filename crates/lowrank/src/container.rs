//! Binary container for quantized singular triplets.
//!
//! ## Format Overview
//!
//! All integers little-endian. Layout before the byte-stream compressor:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │ Header (11 bytes)                                   │
//! │  - Bit width: u8 (1-64)                             │
//! │  - Max |singular value|: f32                        │
//! │  - k (retained components): u16                     │
//! │  - m (row dimension): u16                           │
//! │  - n (column dimension): u16                        │
//! ├─────────────────────────────────────────────────────┤
//! │ Packed U' : k*m codes, ceil(bits/8) bytes each      │
//! │ Packed V' : k*n codes                               │
//! │ Packed S' : k codes                                 │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The whole buffer passes through exactly one layer of a pluggable
//! [`Compressor`]; [`decode`] undoes exactly one layer. Encode and decode
//! are pure transformations - nothing mutates after creation.

use lowrank_core::{Compressor, Decompressor, Error, Result};
use tracing::debug;

use crate::bitpack;
use crate::quantize;

/// Container header size in bytes.
pub const HEADER_SIZE: usize = 11;

/// Widest bit width a container may carry; codes are held in `u64`.
pub const MAX_BITS: u8 = 64;

/// Truncated singular value decomposition of an m×n matrix.
///
/// Factors are stored flat and row-major, in the orientation the container
/// serializes: each of the k rows of `u` is one left singular vector
/// (length m), each row of `vt` one right singular vector (length n).
#[derive(Debug, Clone, PartialEq)]
pub struct TruncatedSvd {
    /// Number of retained singular triplets (k).
    pub rank: usize,
    /// Row dimension of the original matrix (m).
    pub rows: usize,
    /// Column dimension of the original matrix (n).
    pub cols: usize,
    /// Left singular vectors, k×m row-major.
    pub u: Vec<f32>,
    /// Singular values, descending, length k.
    pub s: Vec<f32>,
    /// Right singular vectors, k×n row-major.
    pub vt: Vec<f32>,
}

impl TruncatedSvd {
    /// Number of scalars in the original dense matrix.
    pub fn raw_values(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of scalars this triplet stores: k left vectors, k right
    /// vectors, and the k singular values themselves.
    pub fn stored_values(&self) -> usize {
        self.rank * (self.rows + self.cols) + self.rank
    }

    /// Fraction of scalar storage saved relative to the dense matrix.
    pub fn storage_reduction(&self) -> f64 {
        if self.raw_values() == 0 {
            return 0.0;
        }
        1.0 - self.stored_values() as f64 / self.raw_values() as f64
    }

    fn validate(&self) -> Result<()> {
        if self.rank == 0 {
            return Err(Error::validation("rank must be at least 1"));
        }
        for (dim, name) in [(self.rank, "k"), (self.rows, "m"), (self.cols, "n")] {
            if dim > u16::MAX as usize {
                return Err(Error::validation(format!(
                    "dimension {} = {} does not fit in 16 bits",
                    name, dim
                )));
            }
        }
        if self.u.len() != self.rank * self.rows {
            return Err(Error::validation(format!(
                "U' holds {} values, expected k*m = {}",
                self.u.len(),
                self.rank * self.rows
            )));
        }
        if self.vt.len() != self.rank * self.cols {
            return Err(Error::validation(format!(
                "V' holds {} values, expected k*n = {}",
                self.vt.len(),
                self.rank * self.cols
            )));
        }
        if self.s.len() != self.rank {
            return Err(Error::validation(format!(
                "S' holds {} values, expected k = {}",
                self.s.len(),
                self.rank
            )));
        }
        Ok(())
    }
}

/// Parsed header fields.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Header {
    bits: u8,
    max_singular: f32,
    rank: u16,
    rows: u16,
    cols: u16,
}

impl Header {
    fn to_bytes(self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0] = self.bits;
        buf[1..5].copy_from_slice(&self.max_singular.to_le_bytes());
        buf[5..7].copy_from_slice(&self.rank.to_le_bytes());
        buf[7..9].copy_from_slice(&self.rows.to_le_bytes());
        buf[9..11].copy_from_slice(&self.cols.to_le_bytes());
        buf
    }

    fn from_bytes(buf: &[u8; HEADER_SIZE]) -> Result<Self> {
        let bits = buf[0];
        if bits == 0 || bits > MAX_BITS {
            return Err(Error::format_at(
                format!("bit width {} out of range [1, {}]", bits, MAX_BITS),
                0,
            ));
        }
        let max_singular = f32::from_le_bytes([buf[1], buf[2], buf[3], buf[4]]);
        let rank = u16::from_le_bytes([buf[5], buf[6]]);
        if rank == 0 {
            return Err(Error::format_at("zero retained rank", 5));
        }
        Ok(Self {
            bits,
            max_singular,
            rank,
            rows: u16::from_le_bytes([buf[7], buf[8]]),
            cols: u16::from_le_bytes([buf[9], buf[10]]),
        })
    }
}

/// Encode a triplet into a compressed container.
///
/// U' and V' are quantized with the symmetric [-1, 1] policy, S' with the
/// magnitude policy scaled by max |S'| (which the header carries for the
/// inverse). The concatenated header and body pass through one layer of
/// `compressor`.
pub fn encode(svd: &TruncatedSvd, bits: u8, compressor: &impl Compressor) -> Result<Vec<u8>> {
    quantize::check_bits(bits)?;
    svd.validate()?;

    let max_singular = quantize::peak_magnitude(&svd.s);

    let header = Header {
        bits,
        max_singular,
        rank: svd.rank as u16,
        rows: svd.rows as u16,
        cols: svd.cols as u16,
    };

    let width = bitpack::bytes_per_code(bits);
    let body_len = width * (svd.u.len() + svd.vt.len() + svd.s.len());
    let mut data = Vec::with_capacity(HEADER_SIZE + body_len);
    data.extend_from_slice(&header.to_bytes());

    let u_codes = quantize::compress_symmetric_slice(&svd.u, bits)?;
    data.extend_from_slice(&bitpack::pack(&u_codes, bits)?);

    let v_codes = quantize::compress_symmetric_slice(&svd.vt, bits)?;
    data.extend_from_slice(&bitpack::pack(&v_codes, bits)?);

    let s_codes = quantize::compress_magnitude(&svd.s, max_singular, bits)?;
    data.extend_from_slice(&bitpack::pack(&s_codes, bits)?);

    debug!(
        bits,
        rank = svd.rank,
        rows = svd.rows,
        cols = svd.cols,
        container_bytes = data.len(),
        "encoding container"
    );

    compressor.compress(&data)
}

/// Decode a compressed container back into a triplet.
///
/// Undoes one layer of `decompressor`, parses the fixed header, derives the
/// three region lengths from (k, m, n, bits), and dequantizes. Any
/// structural mismatch rejects the whole container.
pub fn decode(bytes: &[u8], decompressor: &impl Decompressor) -> Result<TruncatedSvd> {
    let raw = decompressor.decompress(bytes)?;

    if raw.len() < HEADER_SIZE {
        return Err(Error::format(format!(
            "container holds {} bytes, shorter than the {}-byte header",
            raw.len(),
            HEADER_SIZE
        )));
    }

    let mut header_buf = [0u8; HEADER_SIZE];
    header_buf.copy_from_slice(&raw[..HEADER_SIZE]);
    let header = Header::from_bytes(&header_buf)?;

    let rank = header.rank as usize;
    let rows = header.rows as usize;
    let cols = header.cols as usize;

    let width = bitpack::bytes_per_code(header.bits);
    let u_len = rank * rows * width;
    let v_len = rank * cols * width;
    let s_len = rank * width;

    let body = &raw[HEADER_SIZE..];
    if body.len() != u_len + v_len + s_len {
        return Err(Error::format(format!(
            "body holds {} bytes but header implies {}",
            body.len(),
            u_len + v_len + s_len
        )));
    }

    debug!(
        bits = header.bits,
        rank,
        rows,
        cols,
        max_singular = header.max_singular,
        "decoding container"
    );

    let (u_region, rest) = body.split_at(u_len);
    let (v_region, s_region) = rest.split_at(v_len);

    let u_codes = bitpack::unpack(u_region, header.bits, rank * rows)?;
    let v_codes = bitpack::unpack(v_region, header.bits, rank * cols)?;
    let s_codes = bitpack::unpack(s_region, header.bits, rank)?;

    Ok(TruncatedSvd {
        rank,
        rows,
        cols,
        u: quantize::decompress_symmetric_slice(&u_codes, header.bits)?,
        vt: quantize::decompress_symmetric_slice(&v_codes, header.bits)?,
        s: quantize::decompress_magnitude_slice(&s_codes, header.bits, header.max_singular)?,
    })
}
