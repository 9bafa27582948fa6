//! Fixed-bit-width quantization of bounded real values.
//!
//! Two policies are implemented:
//!
//! - **Symmetric**: values in [-1, 1] (singular vector entries) map onto the
//!   integer grid [0, 2^bits - 1]. The range is fixed, so no side data is
//!   needed to invert.
//! - **Magnitude**: non-negative values (singular values) are scaled by the
//!   array maximum before hitting the same grid. The maximum travels in the
//!   container header as the rescale factor.
//!
//! Quantization truncates toward zero, matching the container's byte-exact
//! layout; the worst-case reconstruction error after a round trip is one
//! grid step, 2/(2^bits - 1) on the symmetric [-1, 1] range.
//!
//! All entry points take flat slices. Matrix shape is carried separately by
//! the container header and restored with an explicit reshape on decode.

use lowrank_core::{Error, Result};

/// Largest code representable at the given bit width.
pub fn max_code(bits: u8) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Validate a bit width, which must be in [1, 64].
pub fn check_bits(bits: u8) -> Result<()> {
    if bits == 0 || bits > 64 {
        return Err(Error::validation(format!(
            "bit width {} out of range [1, 64]",
            bits
        )));
    }
    Ok(())
}

/// Quantize a value in [-1, 1] to an unsigned code.
///
/// The value is clamped to [-1, 1], shifted to [0, 1], scaled by
/// (2^bits - 1), and truncated toward zero. With bits=8: -1.0 -> 0,
/// 0.0 -> 127, 1.0 -> 255.
pub fn compress_symmetric(value: f32, bits: u8) -> u64 {
    let clamped = value.clamp(-1.0, 1.0) as f64;
    let unit = (clamped + 1.0) / 2.0;
    // 2^bits - 1 is not exact in f64 past the 53-bit mantissa, so the
    // product can land one past the top code; clamp back onto the grid.
    ((unit * max_code(bits) as f64) as u64).min(max_code(bits))
}

/// Invert [`compress_symmetric`].
///
/// The code is clamped to [0, 2^bits - 1] before rescaling, so corrupt
/// codes still land inside [-1, 1].
pub fn decompress_symmetric(code: u64, bits: u8) -> f32 {
    let max = max_code(bits);
    let unit = code.min(max) as f64 / max as f64;
    (unit * 2.0 - 1.0) as f32
}

/// Quantize a slice of [-1, 1] values.
pub fn compress_symmetric_slice(values: &[f32], bits: u8) -> Result<Vec<u64>> {
    check_bits(bits)?;
    Ok(values
        .iter()
        .map(|&v| compress_symmetric(v, bits))
        .collect())
}

/// Dequantize a slice of symmetric codes.
pub fn decompress_symmetric_slice(codes: &[u64], bits: u8) -> Result<Vec<f32>> {
    check_bits(bits)?;
    Ok(codes
        .iter()
        .map(|&q| decompress_symmetric(q, bits))
        .collect())
}

/// Quantize non-negative values relative to a caller-supplied maximum.
///
/// Each value is scaled by `max`, multiplied by (2^bits - 1), and truncated.
/// The caller supplies the maximum explicitly (the container stores it in
/// the header anyway); an all-zero input has no usable scale and fails with
/// a domain error rather than propagating an undefined result.
pub fn compress_magnitude(values: &[f32], max: f32, bits: u8) -> Result<Vec<u64>> {
    check_bits(bits)?;
    if !(max > 0.0) {
        return Err(Error::domain("all values zero"));
    }
    let top = max_code(bits);
    let scale = top as f64;
    // The value equal to `max` scales to exactly 2^bits - 1, which f64
    // rounds up past the grid at wide bit widths; clamp like the
    // symmetric policy does.
    Ok(values
        .iter()
        .map(|&v| (((v / max) as f64 * scale) as u64).min(top))
        .collect())
}

/// Invert magnitude quantization: rescale * code / (2^bits - 1).
pub fn decompress_magnitude(code: u64, bits: u8, rescale: f32) -> f32 {
    (rescale as f64 * (code as f64 / max_code(bits) as f64)) as f32
}

/// Dequantize a slice of magnitude codes.
pub fn decompress_magnitude_slice(codes: &[u64], bits: u8, rescale: f32) -> Result<Vec<f32>> {
    check_bits(bits)?;
    Ok(codes
        .iter()
        .map(|&q| decompress_magnitude(q, bits, rescale))
        .collect())
}

/// Maximum absolute value of a slice, for the magnitude policy's rescale.
pub fn peak_magnitude(values: &[f32]) -> f32 {
    values.iter().fold(0.0f32, |acc, v| acc.max(v.abs()))
}
