//! Truncated SVD provider.
//!
//! Computes the top-k singular triplets of a dense row-major matrix by
//! power iteration with deflation: find the dominant triplet, subtract its
//! rank-one contribution, repeat. Triplets come out in descending singular
//! value order, which the container format requires.
//!
//! Iteration starts from a fixed-seed generator, so the decomposition of a
//! given matrix is deterministic across runs.

use lowrank_core::{Error, Result};

use crate::container::TruncatedSvd;

/// Power iteration sweeps per triplet.
const POWER_ITERATIONS: usize = 100;

/// Singular values below this are treated as exhausted rank.
const SIGMA_FLOOR: f32 = 1e-10;

/// Number of singular values a full decomposition of an m×n matrix yields.
pub fn full_rank(rows: usize, cols: usize) -> usize {
    rows.min(cols)
}

/// Compute the top `rank` singular triplets of a row-major matrix.
///
/// Returns factors in the container's orientation: k×m left vectors and
/// k×n right vectors, both row-major. If the matrix runs out of energy
/// before `rank` triplets (e.g. a rank-2 matrix asked for rank 5), the
/// returned triplet carries however many were found.
pub fn truncated_svd(data: &[f32], rows: usize, cols: usize, rank: usize) -> Result<TruncatedSvd> {
    if rows == 0 || cols == 0 {
        return Err(Error::validation("matrix dimensions must be non-zero"));
    }
    if data.len() != rows * cols {
        return Err(Error::validation(format!(
            "matrix holds {} values, expected {}x{} = {}",
            data.len(),
            rows,
            cols,
            rows * cols
        )));
    }
    if rank == 0 || rank > full_rank(rows, cols) {
        return Err(Error::validation(format!(
            "rank {} out of range [1, {}]",
            rank,
            full_rank(rows, cols)
        )));
    }

    let mut residual = data.to_vec();
    let mut u = Vec::with_capacity(rank * rows);
    let mut s = Vec::with_capacity(rank);
    let mut vt = Vec::with_capacity(rank * cols);

    for triplet in 0..rank {
        let (left, sigma, right) = dominant_triplet(&residual, rows, cols, triplet as u64);

        if sigma < SIGMA_FLOOR && triplet > 0 {
            break;
        }

        // Deflate: residual -= sigma * left * right^T
        for i in 0..rows {
            let weight = sigma * left[i];
            let row = &mut residual[i * cols..(i + 1) * cols];
            for (cell, &rj) in row.iter_mut().zip(right.iter()) {
                *cell -= weight * rj;
            }
        }

        u.extend_from_slice(&left);
        s.push(sigma);
        vt.extend_from_slice(&right);
    }

    Ok(TruncatedSvd {
        rank: s.len(),
        rows,
        cols,
        u,
        s,
        vt,
    })
}

/// Find the dominant singular triplet of a matrix by power iteration.
fn dominant_triplet(a: &[f32], rows: usize, cols: usize, seed: u64) -> (Vec<f32>, f32, Vec<f32>) {
    // Deterministic start vector (LCG, fixed base seed).
    let mut state = 0x5DEECE66Du64.wrapping_add(seed);
    let mut v = vec![0.0f32; cols];
    for val in &mut v {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        *val = ((state >> 33) as f32 / (1u64 << 31) as f32) * 2.0 - 1.0;
    }
    normalize(&mut v);

    let mut u = vec![0.0f32; rows];

    for _ in 0..POWER_ITERATIONS {
        // u = A v
        for i in 0..rows {
            let mut sum = 0.0f32;
            let row = &a[i * cols..(i + 1) * cols];
            for (x, y) in row.iter().zip(v.iter()) {
                sum += x * y;
            }
            u[i] = sum;
        }
        normalize(&mut u);

        // v = A^T u
        for (j, vj) in v.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for i in 0..rows {
                sum += a[i * cols + j] * u[i];
            }
            *vj = sum;
        }
        normalize(&mut v);
    }

    // sigma = u^T A v
    let mut sigma = 0.0f32;
    for i in 0..rows {
        let row = &a[i * cols..(i + 1) * cols];
        let mut row_sum = 0.0f32;
        for (x, y) in row.iter().zip(v.iter()) {
            row_sum += x * y;
        }
        sigma += u[i] * row_sum;
    }

    // Power iteration can converge with either sign pairing; fold the sign
    // into the right vector so sigma is non-negative.
    if sigma < 0.0 {
        sigma = -sigma;
        for val in &mut v {
            *val = -*val;
        }
    }

    (u, sigma, v)
}

/// Normalize a vector to unit length.
fn normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 1e-10 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
