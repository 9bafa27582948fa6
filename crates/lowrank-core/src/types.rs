//! Core type definitions shared across the workspace.

/// Compression level presets for the byte-stream codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressionLevel {
    /// Optimized for speed over ratio.
    Fast,

    /// Balanced speed and ratio.
    #[default]
    Default,

    /// Optimized for ratio over speed.
    Best,

    /// Custom level (algorithm-specific range).
    Custom(i32),
}

impl CompressionLevel {
    /// Convert to a numeric level for algorithms.
    pub fn to_level(self) -> i32 {
        match self {
            CompressionLevel::Fast => 1,
            CompressionLevel::Default => 6,
            CompressionLevel::Best => 9,
            CompressionLevel::Custom(level) => level,
        }
    }

    /// Create from a numeric level.
    pub fn from_level(level: i32) -> Self {
        match level {
            1..=3 => CompressionLevel::Fast,
            4..=6 => CompressionLevel::Default,
            7..=9 => CompressionLevel::Best,
            _ => CompressionLevel::Custom(level),
        }
    }
}

/// Compression ratio metrics.
#[derive(Debug, Clone, Copy)]
pub struct CompressionRatio {
    /// Original uncompressed size in bytes.
    pub original_size: usize,
    /// Compressed size in bytes.
    pub compressed_size: usize,
}

impl CompressionRatio {
    /// Create a new ratio from sizes.
    pub fn new(original: usize, compressed: usize) -> Self {
        CompressionRatio {
            original_size: original,
            compressed_size: compressed,
        }
    }

    /// Calculate ratio (original / compressed). Higher is better.
    pub fn ratio(&self) -> f64 {
        if self.compressed_size == 0 {
            return 0.0;
        }
        self.original_size as f64 / self.compressed_size as f64
    }

    /// Calculate space savings as a percentage (0-100).
    pub fn savings_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - (self.compressed_size as f64 / self.original_size as f64)) * 100.0
    }

    /// Check if compression was effective (saved space).
    pub fn is_effective(&self) -> bool {
        self.compressed_size < self.original_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_roundtrip() {
        assert_eq!(CompressionLevel::Default.to_level(), 6);
        assert_eq!(CompressionLevel::from_level(9), CompressionLevel::Best);
        assert_eq!(
            CompressionLevel::from_level(42),
            CompressionLevel::Custom(42)
        );
    }

    #[test]
    fn test_ratio_math() {
        let ratio = CompressionRatio::new(1000, 250);
        assert!((ratio.ratio() - 4.0).abs() < f64::EPSILON);
        assert!((ratio.savings_percent() - 75.0).abs() < 1e-9);
        assert!(ratio.is_effective());

        let expanded = CompressionRatio::new(10, 20);
        assert!(!expanded.is_effective());
    }

    #[test]
    fn test_ratio_degenerate_sizes() {
        assert_eq!(CompressionRatio::new(100, 0).ratio(), 0.0);
        assert_eq!(CompressionRatio::new(0, 100).savings_percent(), 0.0);
    }
}
