//! Raster containers.
//!
//! - [`SourceImage`] - a decoded 8-bit RGB or RGBA raster handed in by a loader
//! - [`RgbaBuffer`] - a fixed-size interleaved RGBA buffer, used both for the
//!   normalized light/dark canvases and for the synthesized output
//!
//! Both types validate their layout on construction, so code downstream can
//! index pixels without re-checking lengths.

use crate::error::{Error, Result};
use crate::pixel::{Rgb8, Rgba8};

/// Number of channels in an [`RgbaBuffer`] pixel.
pub const RGBA_CHANNELS: usize = 4;

/// Largest canvas area in pixels, 16384 x 16384.
pub const MAX_CANVAS_AREA: u64 = 16_384 * 16_384;

/// Fails with [`Error::ContextUnavailable`] if a `width`x`height` canvas
/// exceeds [`MAX_CANVAS_AREA`].
pub fn check_canvas_area(width: u32, height: u32) -> Result<()> {
    let area = width as u64 * height as u64;
    if area > MAX_CANVAS_AREA {
        let requested = usize::try_from(area.saturating_mul(RGBA_CHANNELS as u64)).unwrap_or(usize::MAX);
        return Err(Error::context_unavailable(
            requested,
            format!("{width}x{height} exceeds the {MAX_CANVAS_AREA} pixel canvas limit"),
        ));
    }
    Ok(())
}

/// Checked `width * height * channels` in bytes.
fn byte_len(width: u32, height: u32, channels: usize) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels))
}

// ============================================================================
// SourceImage
// ============================================================================

/// An immutable decoded raster, 8 bits per channel.
///
/// Holds either 3 (RGB) or 4 (RGBA, straight alpha) interleaved channels.
///
/// # Example
///
/// ```
/// use xray_core::SourceImage;
///
/// let img = SourceImage::new(2, 1, 3, vec![255, 0, 0, 0, 0, 255]).unwrap();
/// assert_eq!(img.pixel(1, 0), [0, 0, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    channels: u32,
    data: Vec<u8>,
}

impl SourceImage {
    /// Wraps decoded pixel data.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if the raster has zero area
    /// - [`Error::Decode`] if `channels` is not 3 or 4, or `data` does not
    ///   hold exactly `width * height * channels` bytes
    pub fn new(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "source raster has zero area"));
        }
        if channels != 3 && channels != 4 {
            return Err(Error::decode(format!(
                "unsupported channel count {channels}, expected RGB or RGBA"
            )));
        }
        let expected = byte_len(width, height, channels as usize)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "size overflow"))?;
        if data.len() != expected {
            return Err(Error::decode(format!(
                "expected {expected} bytes of pixel data, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Wraps interleaved RGB data.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, 3, data)
    }

    /// Wraps interleaved RGBA data.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, 4, data)
    }

    /// A single-color image.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> Result<Self> {
        let len = byte_len(width, height, RGBA_CHANNELS)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "size overflow"))?;
        let data = color.iter().copied().cycle().take(len).collect();
        Self::new(width, height, 4, data)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of channels (3 or 4).
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Whether the raster carries an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Raw interleaved pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the pixel at (x, y) as RGBA. RGB sources report alpha 255.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let c = self.channels as usize;
        let idx = (y as usize * self.width as usize + x as usize) * c;
        let p = &self.data[idx..idx + c];
        if c == 4 {
            [p[0], p[1], p[2], p[3]]
        } else {
            [p[0], p[1], p[2], 255]
        }
    }
}

// ============================================================================
// RgbaBuffer
// ============================================================================

/// A width x height interleaved RGBA buffer, 8 bits per channel.
///
/// Used for the normalized light and dark canvases and for the synthesized
/// banner. Allocation is fallible: a buffer that cannot be reserved yields
/// [`Error::ContextUnavailable`] instead of aborting the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaBuffer {
    /// Allocates a zeroed buffer.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if width or height is zero
    /// - [`Error::ContextUnavailable`] if the area exceeds
    ///   [`MAX_CANVAS_AREA`] or the allocation fails
    pub fn allocate(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
        }
        check_canvas_area(width, height)?;
        let len = byte_len(width, height, RGBA_CHANNELS)
            .ok_or_else(|| Error::context_unavailable(usize::MAX, "buffer size overflows usize"))?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| Error::context_unavailable(len, e.to_string()))?;
        data.resize(len, 0);

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Allocates a buffer filled with one color.
    pub fn filled(width: u32, height: u32, color: Rgba8) -> Result<Self> {
        let mut buf = Self::allocate(width, height)?;
        for px in buf.data.chunks_exact_mut(RGBA_CHANNELS) {
            px.copy_from_slice(&color);
        }
        Ok(buf)
    }

    /// Wraps existing RGBA bytes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if the length does not match.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
        }
        match byte_len(width, height, RGBA_CHANNELS) {
            Some(len) if len == data.len() => Ok(Self {
                width,
                height,
                data,
            }),
            _ => Err(Error::invalid_dimensions(
                width,
                height,
                format!("{} bytes do not form an RGBA buffer of this size", data.len()),
            )),
        }
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of bytes in one row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * RGBA_CHANNELS
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA bytes.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer, returning its bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * RGBA_CHANNELS
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the buffer.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgba8 {
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Returns the color channels of the pixel at (x, y).
    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> Rgb8 {
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Writes the pixel at (x, y).
    #[inline]
    pub fn put(&mut self, x: u32, y: u32, px: Rgba8) {
        let i = self.index(x, y);
        self.data[i..i + RGBA_CHANNELS].copy_from_slice(&px);
    }

    /// Iterates over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba8> + '_ {
        self.data
            .chunks_exact(RGBA_CHANNELS)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Whether both buffers have the same dimensions.
    #[inline]
    pub fn same_size(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions()
    }
}
