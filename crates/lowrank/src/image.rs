//! Image ⇄ normalized matrix conversion.
//!
//! The codec operates on a real matrix with entries in [0, 1]. Grayscale
//! images map directly (m = height, n = width). Color images pack the RGB
//! channels of each pixel row into one matrix row, so n = 3 * width - the
//! interleaved layout the `image` crate already stores.

use std::path::Path;

use image::{GrayImage, RgbImage};
use lowrank_core::{Error, Result};
use tracing::info;

/// How pixel data maps onto matrix columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// One matrix column per pixel.
    #[default]
    Grayscale,
    /// Three matrix columns (R, G, B) per pixel.
    Color,
}

impl ColorMode {
    /// Matrix columns occupied by one pixel.
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Grayscale => 1,
            ColorMode::Color => 3,
        }
    }
}

/// A dense matrix of normalized pixel values in [0, 1], row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMatrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f32>,
}

/// Normalize 8-bit samples into [0, 1].
pub fn normalize_samples(samples: &[u8]) -> Vec<f32> {
    samples.iter().map(|&p| p as f32 / 255.0).collect()
}

/// Map [0, 1] values back to 8-bit samples, clamping out-of-range
/// reconstruction artifacts.
pub fn denormalize_samples(values: &[f32]) -> Vec<u8> {
    values
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect()
}

/// Load an image file as a normalized matrix.
pub fn load_matrix(path: impl AsRef<Path>, mode: ColorMode) -> Result<ImageMatrix> {
    let img = image::open(path.as_ref()).map_err(|e| Error::codec("image", e.to_string()))?;

    let (rows, cols, samples) = match mode {
        ColorMode::Grayscale => {
            let gray = img.to_luma8();
            let (w, h) = gray.dimensions();
            (h as usize, w as usize, gray.into_raw())
        }
        ColorMode::Color => {
            let rgb = img.to_rgb8();
            let (w, h) = rgb.dimensions();
            (h as usize, w as usize * 3, rgb.into_raw())
        }
    };

    info!(rows, cols, mode = ?mode, "loaded image as matrix");

    Ok(ImageMatrix {
        rows,
        cols,
        data: normalize_samples(&samples),
    })
}

/// Save a normalized matrix as an image file.
pub fn save_matrix(path: impl AsRef<Path>, matrix: &ImageMatrix, mode: ColorMode) -> Result<()> {
    if matrix.data.len() != matrix.rows * matrix.cols {
        return Err(Error::validation(format!(
            "matrix holds {} values, expected {}x{} = {}",
            matrix.data.len(),
            matrix.rows,
            matrix.cols,
            matrix.rows * matrix.cols
        )));
    }
    if matrix.cols % mode.channels() != 0 {
        return Err(Error::validation(format!(
            "column count {} is not a whole number of {}-channel pixels",
            matrix.cols,
            mode.channels()
        )));
    }

    let samples = denormalize_samples(&matrix.data);
    let width = (matrix.cols / mode.channels()) as u32;
    let height = matrix.rows as u32;

    match mode {
        ColorMode::Grayscale => GrayImage::from_raw(width, height, samples)
            .ok_or_else(|| Error::validation("pixel buffer does not match dimensions"))?
            .save(path.as_ref())
            .map_err(|e| Error::codec("image", e.to_string()))?,
        ColorMode::Color => RgbImage::from_raw(width, height, samples)
            .ok_or_else(|| Error::validation("pixel buffer does not match dimensions"))?
            .save(path.as_ref())
            .map_err(|e| Error::codec("image", e.to_string()))?,
    }

    info!(path = %path.as_ref().display(), "saved image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range() {
        let normalized = normalize_samples(&[0, 128, 255]);
        assert_eq!(normalized[0], 0.0);
        assert!((normalized[1] - 128.0 / 255.0).abs() < 1e-7);
        assert_eq!(normalized[2], 1.0);
    }

    #[test]
    fn test_denormalize_clamps_artifacts() {
        let samples = denormalize_samples(&[-0.2, 0.0, 0.5, 1.0, 1.7]);
        assert_eq!(samples, vec![0, 0, 128, 255, 255]);
    }

    #[test]
    fn test_sample_roundtrip_is_exact() {
        let original: Vec<u8> = (0..=255).collect();
        let roundtrip = denormalize_samples(&normalize_samples(&original));
        assert_eq!(original, roundtrip);
    }

    #[test]
    fn test_color_mode_channels() {
        assert_eq!(ColorMode::Grayscale.channels(), 1);
        assert_eq!(ColorMode::Color.channels(), 3);
    }

    #[test]
    fn test_save_rejects_mismatched_dimensions() {
        let matrix = ImageMatrix {
            rows: 2,
            cols: 2,
            data: vec![0.0; 3],
        };
        assert!(save_matrix("/tmp/never-written.png", &matrix, ColorMode::Grayscale).is_err());

        // 4 columns cannot hold whole RGB pixels
        let matrix = ImageMatrix {
            rows: 1,
            cols: 4,
            data: vec![0.0; 4],
        };
        assert!(save_matrix("/tmp/never-written.png", &matrix, ColorMode::Color).is_err());
    }
}
