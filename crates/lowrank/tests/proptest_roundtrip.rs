//! Property-based tests for the quantizer, bit packer, and container.
//!
//! These verify the codec laws across a wide range of inputs:
//! - symmetric quantization error is bounded by one grid step
//! - pack/unpack is lossless for every bit width in [1, 64]
//! - container round trips reproduce shape exactly and values within bounds

use proptest::prelude::*;

use lowrank::{bitpack, container, quantize, TruncatedSvd};
use lowrank_bzip2::Bzip2Codec;
use lowrank_core::Codec;

/// Strategy for quantizer bit widths, covering the full accepted range.
fn quantizer_bits_strategy() -> impl Strategy<Value = u8> {
    1u8..=64
}

/// Strategy for packer bit widths (full u64 range).
fn packer_bits_strategy() -> impl Strategy<Value = u8> {
    1u8..=64
}

/// Strategy for code counts matching observed container regions.
fn count_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![Just(1usize), Just(5), Just(300)]
}

/// Strategy for singular vector entries.
fn unit_value_strategy() -> impl Strategy<Value = f32> {
    -1.0f32..=1.0f32
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Property: symmetric round trip lands within one quantization step.
    #[test]
    fn prop_symmetric_quantizer_error_bound(
        bits in quantizer_bits_strategy(),
        value in unit_value_strategy(),
    ) {
        let step = 2.0 / quantize::max_code(bits) as f64;
        for &v in &[value, -1.0, 0.0, 1.0] {
            let code = quantize::compress_symmetric(v, bits);
            prop_assert!(code <= quantize::max_code(bits));

            // One grid step plus f32 representation noise.
            let restored = quantize::decompress_symmetric(code, bits);
            let error = (restored as f64 - v as f64).abs();
            prop_assert!(
                error <= step + 1e-6,
                "bits={} v={} restored={} error={} step={}",
                bits, v, restored, error, step
            );
        }
    }

    /// Property: pack then unpack returns the codes unchanged.
    #[test]
    fn prop_pack_unpack_roundtrip(
        bits in packer_bits_strategy(),
        count in count_strategy(),
        seed in any::<u64>(),
    ) {
        // Derive codes from the seed so every width gets in-range values.
        let max = quantize::max_code(bits);
        let codes: Vec<u64> = (0..count)
            .map(|i| {
                let x = seed
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(i as u64);
                if max == u64::MAX { x } else { x % (max + 1) }
            })
            .collect();

        let packed = bitpack::pack(&codes, bits).unwrap();
        prop_assert_eq!(packed.len(), count * bitpack::bytes_per_code(bits));

        let unpacked = bitpack::unpack(&packed, bits, count).unwrap();
        prop_assert_eq!(unpacked, codes);
    }

    /// Property: magnitude round trip lands within one step of the scale.
    #[test]
    fn prop_magnitude_quantizer_error_bound(
        bits in quantizer_bits_strategy(),
        values in prop::collection::vec(0.0f32..100.0, 1..20),
        peak in 1.0f32..1000.0,
    ) {
        let mut values = values;
        values.push(peak * 0.1); // ensure a non-zero maximum
        let max = quantize::peak_magnitude(&values);
        prop_assume!(max > 0.0);

        let codes = quantize::compress_magnitude(&values, max, bits).unwrap();
        let step = max as f64 / quantize::max_code(bits) as f64;
        // One step, plus f32 rounding proportional to the scale.
        let slack = max as f64 * 1e-6 + 1e-6;

        for (&v, &code) in values.iter().zip(codes.iter()) {
            let restored = quantize::decompress_magnitude(code, bits, max);
            let error = (restored as f64 - v as f64).abs();
            prop_assert!(
                error <= step + slack,
                "bits={} v={} restored={} error={} step={}",
                bits, v, restored, error, step
            );
        }
    }

    /// Property: container round trip preserves k, m, n exactly and every
    /// region within its quantizer bound.
    #[test]
    fn prop_container_roundtrip(
        bits in 2u8..=64,
        rank in 1usize..4,
        rows in 1usize..8,
        cols in 1usize..8,
        seed in any::<u32>(),
    ) {
        let mix = |i: usize| {
            let x = (seed as u64)
                .wrapping_mul(2862933555777941757)
                .wrapping_add(i as u64 * 3037000493);
            ((x >> 33) as f32 / (1u64 << 31) as f32) * 2.0 - 1.0
        };

        let svd = TruncatedSvd {
            rank,
            rows,
            cols,
            u: (0..rank * rows).map(mix).collect(),
            s: (0..rank).map(|i| (rank - i) as f32 * 1.5).collect(),
            vt: (0..rank * cols).map(|i| mix(i + 7919)).collect(),
        };

        let codec = <Bzip2Codec as Codec>::new();
        let decoded = container::decode(
            &container::encode(&svd, bits, &codec).unwrap(),
            &codec,
        ).unwrap();

        prop_assert_eq!(decoded.rank, svd.rank);
        prop_assert_eq!(decoded.rows, svd.rows);
        prop_assert_eq!(decoded.cols, svd.cols);

        let vec_step = 2.0 / quantize::max_code(bits) as f64;
        for (a, b) in svd.u.iter().zip(decoded.u.iter()) {
            prop_assert!(((a - b) as f64).abs() <= vec_step + 1e-6);
        }
        for (a, b) in svd.vt.iter().zip(decoded.vt.iter()) {
            prop_assert!(((a - b) as f64).abs() <= vec_step + 1e-6);
        }

        let peak = quantize::peak_magnitude(&svd.s);
        let sv_step = peak as f64 / quantize::max_code(bits) as f64;
        for (a, b) in svd.s.iter().zip(decoded.s.iter()) {
            prop_assert!(((a - b) as f64).abs() <= sv_step * (1.0 + 1e-5) + 1e-5);
        }
    }
}

#[test]
fn random_sample_error_bound_8bit() {
    // 1000 random samples through the default 8-bit grid.
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let step = 2.0 / quantize::max_code(8) as f64;

    for _ in 0..1000 {
        let v: f32 = rng.gen_range(-1.0..=1.0);
        let restored = quantize::decompress_symmetric(quantize::compress_symmetric(v, 8), 8);
        assert!((restored as f64 - v as f64).abs() <= step + 1e-6);
    }
}
