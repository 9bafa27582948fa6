//! Rank selection and low-rank reconstruction.

use lowrank_core::{Error, Result};
use tracing::info;

use crate::container::TruncatedSvd;

/// How many singular triplets to retain out of the full decomposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RankSelection {
    /// Keep exactly this many triplets.
    Count(usize),
    /// Keep this fraction of the available triplets, at least one.
    Percentage(f64),
}

impl RankSelection {
    /// Resolve the selection against the total number of available
    /// singular values.
    pub fn select(&self, total: usize) -> Result<usize> {
        if total == 0 {
            return Err(Error::validation("decomposition has no singular values"));
        }
        match *self {
            RankSelection::Count(count) => {
                if count == 0 || count > total {
                    return Err(Error::validation(format!(
                        "retained count {} out of range [1, {}]",
                        count, total
                    )));
                }
                Ok(count)
            }
            RankSelection::Percentage(fraction) => {
                if !(fraction > 0.0 && fraction <= 1.0) {
                    return Err(Error::validation(format!(
                        "retained percentage {} out of range (0, 1]",
                        fraction
                    )));
                }
                // Ties round to even, matching the reference pipeline's
                // half-to-even rounding.
                Ok(((total as f64 * fraction).round_ties_even() as usize).max(1))
            }
        }
    }
}

/// Reconstruct the dense m×n matrix from a triplet.
///
/// Accumulates S'[i] * outer(U' row i, V' row i) for i ascending. The
/// accumulation order is fixed so repeated calls on the same triplet are
/// bit-identical.
pub fn reconstruct(svd: &TruncatedSvd) -> Vec<f32> {
    let (m, n) = (svd.rows, svd.cols);
    let mut matrix = vec![0.0f32; m * n];

    for t in 0..svd.rank {
        let sigma = svd.s[t];
        let left = &svd.u[t * m..(t + 1) * m];
        let right = &svd.vt[t * n..(t + 1) * n];

        for (i, &li) in left.iter().enumerate() {
            let weight = sigma * li;
            let row = &mut matrix[i * n..(i + 1) * n];
            for (cell, &rj) in row.iter_mut().zip(right.iter()) {
                *cell += weight * rj;
            }
        }
    }

    matrix
}

/// Log how many scalars the triplet stores versus the dense matrix.
pub fn report_storage(svd: &TruncatedSvd) {
    info!(
        raw_values = svd.raw_values(),
        stored_values = svd.stored_values(),
        reduction_percent = format!("{:.1}", svd.storage_reduction() * 100.0),
        "storage accounting"
    );
}
