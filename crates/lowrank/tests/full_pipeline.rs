//! End-to-end pipeline tests: matrix -> truncated SVD -> container -> matrix.

use lowrank::image::{denormalize_samples, normalize_samples};
use lowrank::{approx, container, quantize, svd, RankSelection};
use lowrank_bzip2::Bzip2Codec;
use lowrank_core::{Codec, CompressionLevel};

/// Synthetic "image": smooth gradients compress well under low rank.
fn synthetic_image(rows: usize, cols: usize) -> Vec<u8> {
    (0..rows * cols)
        .map(|i| {
            let (r, c) = (i / cols, i % cols);
            let v = 0.5
                + 0.25 * ((r as f32) * 0.11).sin()
                + 0.25 * ((c as f32) * 0.07).cos();
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        })
        .collect()
}

fn mean_abs_error(a: &[f32], b: &[f32]) -> f32 {
    let sum: f32 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum();
    sum / a.len() as f32
}

#[test]
fn full_pipeline_reconstructs_image_closely() {
    let (rows, cols) = (32, 48);
    let pixels = synthetic_image(rows, cols);
    let matrix = normalize_samples(&pixels);

    let total = svd::full_rank(rows, cols);
    let rank = RankSelection::Percentage(0.5).select(total).unwrap();
    let triplet = svd::truncated_svd(&matrix, rows, cols, rank).unwrap();

    let codec = Bzip2Codec::with_level(CompressionLevel::Best);
    let bytes = container::encode(&triplet, 12, &codec).unwrap();

    let decoded = container::decode(&bytes, &codec).unwrap();
    assert_eq!(decoded.rows, rows);
    assert_eq!(decoded.cols, cols);

    let reconstructed = approx::reconstruct(&decoded);
    assert_eq!(reconstructed.len(), matrix.len());

    // Half the singular values at 12-bit precision: close but lossy.
    let mae = mean_abs_error(&matrix, &reconstructed);
    assert!(mae < 0.05, "mean absolute error too high: {}", mae);

    // And the result survives the trip back to pixels.
    let out = denormalize_samples(&reconstructed);
    assert_eq!(out.len(), pixels.len());
}

#[test]
fn lower_bit_width_degrades_gracefully() {
    let (rows, cols) = (24, 24);
    let matrix = normalize_samples(&synthetic_image(rows, cols));
    let triplet = svd::truncated_svd(&matrix, rows, cols, 8).unwrap();

    let codec = <Bzip2Codec as Codec>::new();

    let coarse = approx::reconstruct(
        &container::decode(&container::encode(&triplet, 4, &codec).unwrap(), &codec).unwrap(),
    );
    let fine = approx::reconstruct(
        &container::decode(&container::encode(&triplet, 16, &codec).unwrap(), &codec).unwrap(),
    );

    let coarse_err = mean_abs_error(&matrix, &coarse);
    let fine_err = mean_abs_error(&matrix, &fine);
    assert!(
        fine_err <= coarse_err + 1e-6,
        "16-bit ({}) should not be worse than 4-bit ({})",
        fine_err,
        coarse_err
    );
}

#[test]
fn container_is_deterministic_for_same_input() {
    let matrix = normalize_samples(&synthetic_image(16, 16));
    let triplet = svd::truncated_svd(&matrix, 16, 16, 4).unwrap();
    let codec = <Bzip2Codec as Codec>::new();

    let first = container::encode(&triplet, 8, &codec).unwrap();
    let second = container::encode(&triplet, 8, &codec).unwrap();
    assert_eq!(first, second);
}

#[test]
fn quantizer_grid_matches_container_bit_width() {
    // A container encoded at b bits cannot express more than 2^b levels per
    // sample; spot-check the grid the decoded vectors live on.
    let bits = 6u8;
    let matrix = normalize_samples(&synthetic_image(12, 12));
    let triplet = svd::truncated_svd(&matrix, 12, 12, 3).unwrap();
    let codec = <Bzip2Codec as Codec>::new();

    let decoded =
        container::decode(&container::encode(&triplet, bits, &codec).unwrap(), &codec).unwrap();

    let max = quantize::max_code(bits) as f64;
    for &x in decoded.u.iter().chain(decoded.vt.iter()) {
        // Every decoded entry sits on the 2^bits-point grid over [-1, 1].
        let grid_pos = ((x as f64 + 1.0) / 2.0) * max;
        assert!(
            (grid_pos - grid_pos.round()).abs() < 1e-3,
            "value {} off the {}-bit grid",
            x,
            bits
        );
    }
}
