//! # xray-io
//!
//! Image I/O around the banner synthesis core.
//!
//! The core never touches files. This crate is the collaborator on both
//! sides of it:
//!
//! - **Loading**: decode PNG or JPEG sources (from a path, memory, or a
//!   `data:` URL) into [`ImageData`], then into a [`xray_core::SourceImage`]
//! - **Export**: encode an [`xray_core::RgbaBuffer`] as a lossless 8-bit RGBA
//!   PNG ([`GeneratedImage`]), with the alpha channel stored exactly
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use xray_io::{read_source, GeneratedImage};
//!
//! let light = read_source("light.png")?;
//! let dark = read_source("dark.jpg")?;
//! // ... run the compositor ...
//! let out = GeneratedImage::encode(&pixels)?;
//! out.write("banner.png")?;
//! ```
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Bit Depths |
//! |--------|------|-------|------------|
//! | PNG | Yes | Yes | 1-16 in, 8 out |
//! | JPEG | Yes | No | 8, 16 gray |
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;

#[cfg(feature = "png")]
pub mod generated;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use detect::Format;
pub use error::{IoError, IoResult};
#[cfg(feature = "png")]
pub use generated::GeneratedImage;

use base64::{engine::general_purpose, Engine as _};
use std::path::Path;
use tracing::debug;
use xray_core::{RgbaBuffer, SourceImage};

/// Reads an image from a file, auto-detecting the format.
///
/// The format is detected by magic bytes, then by extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported
/// - The file is corrupted
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), ?format, "Reading image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        _ => Err(IoError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        )),
    }
}

/// Reads an image from memory, detecting the format from magic bytes.
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageData> {
    match Format::from_bytes(data) {
        #[cfg(feature = "png")]
        Format::Png => png::read_from_memory(data),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read_from_memory(data),

        _ => Err(IoError::UnsupportedFormat("unrecognized image signature".into())),
    }
}

/// Reads an image from a `data:image/...;base64,` URL.
///
/// # Example
///
/// ```rust,ignore
/// let image = xray_io::read_data_url("data:image/png;base64,iVBORw0KGgo...")?;
/// ```
pub fn read_data_url(url: &str) -> IoResult<ImageData> {
    if !url.starts_with("data:image/") {
        return Err(IoError::UnsupportedFormat("not an image data URL".into()));
    }
    let start = url
        .find(";base64,")
        .ok_or_else(|| IoError::DecodeError("data URL is not base64 encoded".into()))?;
    let bytes = general_purpose::STANDARD
        .decode(&url[start + ";base64,".len()..])
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    read_from_memory(&bytes)
}

/// Reads a file and converts it into a core [`SourceImage`].
///
/// Every failure, including unreadable files, is reported as a core
/// decode error.
pub fn read_source<P: AsRef<Path>>(path: P) -> xray_core::Result<SourceImage> {
    read(path)?.to_source()
}

/// Image data container for I/O operations.
///
/// Holds interleaved pixel data with 3 (RGB) or 4 (RGBA) channels.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Number of channels (3 for RGB, 4 for RGBA).
    pub channels: u32,
    /// Raw pixel data.
    pub data: PixelData,
}

/// Raw pixel data storage.
#[derive(Debug, Clone)]
pub enum PixelData {
    /// 8-bit unsigned data.
    U8(Vec<u8>),
    /// 16-bit unsigned data.
    U16(Vec<u16>),
}

impl ImageData {
    /// Creates ImageData from u8 pixel data.
    pub fn from_u8(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            data: PixelData::U8(data),
        }
    }

    /// Copies an RGBA buffer into an 8-bit, 4-channel image.
    pub fn from_rgba_buffer(buffer: &RgbaBuffer) -> Self {
        Self::from_u8(buffer.width(), buffer.height(), 4, buffer.as_bytes().to_vec())
    }

    /// Returns the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Converts pixel data to u8.
    pub fn to_u8(&self) -> Vec<u8> {
        match &self.data {
            PixelData::U8(data) => data.clone(),
            PixelData::U16(data) => data.iter().map(|&v| (v >> 8) as u8).collect(),
        }
    }

    /// Converts into a core [`SourceImage`], reducing to 8 bits per channel.
    ///
    /// # Errors
    ///
    /// The core rejects zero-area rasters, channel counts other than 3/4,
    /// and data whose length does not match the dimensions.
    pub fn to_source(&self) -> xray_core::Result<SourceImage> {
        SourceImage::new(self.width, self.height, self.channels, self.to_u8())
    }

    /// Converts into an [`RgbaBuffer`], adding opaque alpha to RGB data.
    pub fn to_rgba_buffer(&self) -> xray_core::Result<RgbaBuffer> {
        let bytes = self.to_u8();
        let rgba = match self.channels {
            4 => bytes,
            3 => bytes
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            n => {
                return Err(xray_core::Error::decode(format!(
                    "unsupported channel count {n}"
                )));
            }
        };
        RgbaBuffer::from_raw(self.width, self.height, rgba)
    }
}
