//! Error types for encoding and decoding operations.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Codec error types.
///
/// Errors are surfaced to the caller immediately; none of them represent
/// transient conditions, so nothing is retried. A container that fails any
/// structural check is rejected whole.
#[derive(Debug, Error)]
pub enum Error {
    /// Argument outside its allowed range.
    #[error("invalid argument: {message}")]
    Validation { message: String },

    /// Container bytes are truncated, corrupt, or internally inconsistent.
    #[error("malformed container: {message}")]
    Format { message: String },

    /// Input data admits no meaningful encoding.
    #[error("degenerate input: {message}")]
    Domain { message: String },

    /// I/O error from an underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by the wrapped byte-stream codec.
    #[error("{algorithm} error: {message}")]
    Codec {
        algorithm: &'static str,
        message: String,
    },
}

impl Error {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// Create a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Error::Format {
            message: message.into(),
        }
    }

    /// Create a format error with offset context.
    pub fn format_at(message: impl Into<String>, offset: usize) -> Self {
        Error::Format {
            message: format!("{} at offset {}", message.into(), offset),
        }
    }

    /// Create a domain error.
    pub fn domain(message: impl Into<String>) -> Self {
        Error::Domain {
            message: message.into(),
        }
    }

    /// Create a codec-specific error.
    pub fn codec(algorithm: &'static str, message: impl Into<String>) -> Self {
        Error::Codec {
            algorithm,
            message: message.into(),
        }
    }

    /// Get error category for log fields.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "validation",
            Error::Format { .. } => "format",
            Error::Domain { .. } => "domain",
            Error::Io(_) => "io",
            Error::Codec { .. } => "codec",
        }
    }
}
