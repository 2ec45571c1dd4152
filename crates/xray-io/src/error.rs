//! Error types for I/O operations.
//!
//! Provides unified error handling for decoding sources and encoding banners.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Unsupported bit depth or color layout.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;

impl From<IoError> for xray_core::Error {
    /// Any failure to read a source surfaces as a decode error at the core
    /// boundary.
    fn from(err: IoError) -> Self {
        xray_core::Error::decode(err.to_string())
    }
}
