//! Byte-aligned packing of fixed-bit-width unsigned codes.
//!
//! Each code independently occupies ceil(bits/8) bytes: its `bits` value
//! bits are laid down MSB-first, right-padded with zero bits into the
//! least-significant positions of the group's final byte. Codes never share
//! a byte, so any code can be located by index without scanning.
//!
//! ```text
//! bits = 12:
//! [ a b c d e f g h ] [ i j k l 0 0 0 0 ] [ a b c d e f g h ] ...
//! ^ code 0, byte 0    ^ code 0, byte 1    ^ code 1, byte 0
//! ```
//!
//! The packed region is not self-describing: `unpack` needs the code count,
//! which the container derives from its header fields.

use lowrank_core::{Error, Result};

use crate::quantize::{check_bits, max_code};

/// Number of bytes one code occupies at the given bit width.
pub fn bytes_per_code(bits: u8) -> usize {
    (bits as usize).div_ceil(8)
}

/// Zero pad bits appended after a code's own bits, (8 - bits mod 8) mod 8.
fn pad_bits(bits: u8) -> u32 {
    ((8 - bits as u32 % 8) % 8) as u32
}

/// Pack codes into a byte buffer, one ceil(bits/8)-byte group per code.
///
/// Fails with a validation error if any code needs more than `bits` bits.
pub fn pack(codes: &[u64], bits: u8) -> Result<Vec<u8>> {
    check_bits(bits)?;

    let max = max_code(bits);
    let width = bytes_per_code(bits);
    let pad = pad_bits(bits);

    let mut data = Vec::with_capacity(codes.len() * width);
    for (i, &code) in codes.iter().enumerate() {
        if code > max {
            return Err(Error::validation(format!(
                "code {} at index {} exceeds {}-bit maximum {}",
                code, i, bits, max
            )));
        }
        // Shift the code's MSB up to the group's first bit; the group then
        // reads out big-endian with the pad zeros already in place.
        let group = code << pad;
        for byte in 0..width {
            data.push((group >> (8 * (width - 1 - byte))) as u8);
        }
    }

    Ok(data)
}

/// Unpack exactly `count` codes from a packed byte buffer.
///
/// Fails with a validation error if the buffer length is not exactly
/// count * ceil(bits/8).
pub fn unpack(bytes: &[u8], bits: u8, count: usize) -> Result<Vec<u64>> {
    check_bits(bits)?;

    let width = bytes_per_code(bits);
    let expected = count * width;
    if bytes.len() != expected {
        return Err(Error::validation(format!(
            "packed buffer holds {} bytes, expected {} ({} codes of {} bytes)",
            bytes.len(),
            expected,
            count,
            width
        )));
    }

    let pad = pad_bits(bits);
    let mut codes = Vec::with_capacity(count);
    for group in bytes.chunks_exact(width) {
        let mut acc = 0u64;
        for &byte in group {
            acc = (acc << 8) | byte as u64;
        }
        codes.push(acc >> pad);
    }

    Ok(codes)
}
