//! Error types for xray-core operations.
//!
//! Every failure in a generation job maps onto one of a small set of kinds.
//! A job either completes with a full buffer or returns one of these errors;
//! there is no local recovery and no partial result.
//!
//! # Usage
//!
//! ```rust
//! use xray_core::{Error, ErrorKind, Result};
//!
//! fn check(width: u32, height: u32) -> Result<()> {
//!     if width == 0 || height == 0 {
//!         return Err(Error::invalid_dimensions(width, height, "zero area"));
//!     }
//!     Ok(())
//! }
//!
//! let err = check(0, 500).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidDimensions);
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing or synthesizing a banner.
///
/// # Categories
///
/// - **Source errors**: [`Decode`](Error::Decode)
/// - **Dimension errors**: [`InvalidDimensions`](Error::InvalidDimensions),
///   [`DimensionMismatch`](Error::DimensionMismatch)
/// - **Allocation errors**: [`ContextUnavailable`](Error::ContextUnavailable)
/// - **Configuration errors**: [`InvalidConfig`](Error::InvalidConfig)
#[derive(Debug, Error)]
pub enum Error {
    /// A source raster could not be read or rasterized.
    ///
    /// Returned for unsupported channel layouts, truncated pixel data, or
    /// (via `xray-io`) undecodable files.
    #[error("decode error: {reason}")]
    Decode {
        /// Description of what could not be decoded
        reason: String,
    },

    /// Invalid image or canvas dimensions.
    ///
    /// Returned when a requested width or height is zero, when a source
    /// raster has zero area, or when a size calculation would overflow.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// The output buffer could not be allocated at the requested size.
    #[error("context unavailable: failed to allocate {requested} bytes ({reason})")]
    ContextUnavailable {
        /// Bytes requested
        requested: usize,
        /// Failure reason
        reason: String,
    },

    /// Two buffers that must correspond pixel-for-pixel differ in size.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First buffer width
        a_width: u32,
        /// First buffer height
        a_height: u32,
        /// Second buffer width
        b_width: u32,
        /// Second buffer height
        b_height: u32,
    },

    /// Options or limits are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of an [`Error`].
///
/// Callers that present failures to end users should only surface the kind,
/// never the detailed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::Decode`].
    Decode,
    /// See [`Error::InvalidDimensions`] and [`Error::DimensionMismatch`].
    InvalidDimensions,
    /// See [`Error::ContextUnavailable`].
    ContextUnavailable,
    /// See [`Error::InvalidConfig`].
    InvalidConfig,
}

impl ErrorKind {
    /// Generic, user-facing description of this kind of failure.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::Decode => "One of the images could not be read.",
            Self::InvalidDimensions => "The images or output size are not usable.",
            Self::ContextUnavailable => "Not enough memory to build the banner.",
            Self::InvalidConfig => "The generation settings are not valid.",
        }
    }
}

impl Error {
    /// Creates an [`Error::Decode`] error.
    #[inline]
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ContextUnavailable`] error.
    #[inline]
    pub fn context_unavailable(requested: usize, reason: impl Into<String>) -> Self {
        Self::ContextUnavailable {
            requested,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::InvalidConfig`] error.
    #[inline]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidDimensions { .. } | Self::DimensionMismatch { .. } => {
                ErrorKind::InvalidDimensions
            }
            Self::ContextUnavailable { .. } => ErrorKind::ContextUnavailable,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }
}
