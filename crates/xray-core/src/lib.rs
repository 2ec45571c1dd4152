//! # xray-core
//!
//! Core types for dual-theme banner synthesis.
//!
//! A banner is built from two images: a *light* variant meant for a white
//! page and a *dark* variant meant for a black page. The synthesized output
//! carries an alpha channel chosen so that it reads as the light image on
//! white and as the dark image on black. This crate holds the vocabulary
//! shared by the rest of the workspace:
//!
//! - [`SourceImage`] - decoded 8-bit RGB/RGBA input raster
//! - [`RgbaBuffer`] - fixed-size RGBA canvas (normalized inputs and output)
//! - [`ProcessOptions`], [`GenerationMode`], [`AlphaLimits`] - job configuration
//! - [`pixel`] - brightness metrics ([`luma`], [`rms_intensity`])
//! - [`Error`], [`ErrorKind`] - failure taxonomy
//!
//! ## Crate Structure
//!
//! ```text
//! xray-core (this crate)
//!    ^
//!    |
//!    +-- xray-io  (decode sources, encode PNG)
//!    +-- xray-ops (cover fit, blend strategies, compositor)
//!    +-- xray-cli (the `xray` binary)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod options;
pub mod pixel;

pub use error::{Error, ErrorKind, Result};
pub use image::{check_canvas_area, RgbaBuffer, SourceImage, MAX_CANVAS_AREA, RGBA_CHANNELS};
pub use options::{
    AlphaLimits, GenerationMode, ProcessOptions, ALPHA_BYTE_MAX, ALPHA_BYTE_MIN, ALPHA_CEIL,
    ALPHA_FLOOR, BANNER_HEIGHT, BANNER_WIDTH,
};
pub use pixel::{luma, rms_intensity, to_byte, Rgb8, Rgba8};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use xray_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::image::{RgbaBuffer, SourceImage};
    pub use crate::options::{AlphaLimits, GenerationMode, ProcessOptions};
    pub use crate::pixel::{luma, rms_intensity, Rgb8, Rgba8};
}
