//! Cover-fit normalization.
//!
//! Brings a [`SourceImage`] of any size onto a fixed canvas: the source is
//! scaled uniformly until it covers the whole canvas, centered, and the
//! excess is cropped. Source alpha is composited over a solid background, so
//! the resulting [`RgbaBuffer`] is always opaque.
//!
//! # Example
//!
//! ```rust
//! use xray_core::SourceImage;
//! use xray_ops::normalize::normalize;
//!
//! let src = SourceImage::solid(3, 1, [10, 20, 30, 255]).unwrap();
//! let canvas = normalize(&src, 6, 4, [255, 255, 255]).unwrap();
//! assert_eq!(canvas.dimensions(), (6, 4));
//! assert_eq!(canvas.get(5, 3), [10, 20, 30, 255]);
//! ```

use crate::parallel::for_each_row;
use crate::resize::{resample_rgba, zeroed, AxisMap, Filter};
use tracing::{debug, trace};
use xray_core::{to_byte, Error, Result, Rgb8, RgbaBuffer, SourceImage, RGBA_CHANNELS};

/// Placement of a scaled source on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFit {
    /// Uniform scale factor (canvas pixels per source pixel).
    pub scale: f32,
    /// Canvas x of the scaled source's left edge (zero or negative).
    pub offset_x: f32,
    /// Canvas y of the scaled source's top edge (zero or negative).
    pub offset_y: f32,
}

impl CoverFit {
    /// Computes the cover placement of a `src_w`x`src_h` source on a
    /// `width`x`height` canvas.
    ///
    /// `scale = max(width / src_w, height / src_h)`, centered.
    pub fn compute(src_w: u32, src_h: u32, width: u32, height: u32) -> Self {
        let scale = (width as f32 / src_w as f32).max(height as f32 / src_h as f32);
        Self {
            scale,
            offset_x: width as f32 / 2.0 - src_w as f32 / 2.0 * scale,
            offset_y: height as f32 / 2.0 - src_h as f32 / 2.0 * scale,
        }
    }

    /// Horizontal canvas-to-source mapping.
    #[inline]
    pub fn x_map(&self) -> AxisMap {
        AxisMap {
            scale: self.scale,
            offset: self.offset_x,
        }
    }

    /// Vertical canvas-to-source mapping.
    #[inline]
    pub fn y_map(&self) -> AxisMap {
        AxisMap {
            scale: self.scale,
            offset: self.offset_y,
        }
    }
}

/// Normalizes `source` onto a `width`x`height` canvas filled with
/// `background`, using the default bilinear filter.
///
/// # Errors
///
/// - [`Error::InvalidDimensions`] if width or height is zero
/// - [`Error::ContextUnavailable`] if the canvas exceeds
///   [`MAX_CANVAS_AREA`](xray_core::MAX_CANVAS_AREA) or a buffer cannot be
///   allocated
pub fn normalize(source: &SourceImage, width: u32, height: u32, background: Rgb8) -> Result<RgbaBuffer> {
    normalize_with_filter(source, width, height, background, Filter::default())
}

/// [`normalize`] with an explicit resampling filter.
pub fn normalize_with_filter(
    source: &SourceImage,
    width: u32,
    height: u32,
    background: Rgb8,
    filter: Filter,
) -> Result<RgbaBuffer> {
    trace!(
        src_w = source.width(),
        src_h = source.height(),
        width,
        height,
        "normalize"
    );
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "canvas width and height must be > 0"));
    }
    let mut canvas = RgbaBuffer::allocate(width, height)?;

    let fit = CoverFit::compute(source.width(), source.height(), width, height);
    debug!(
        scale = fit.scale,
        offset_x = fit.offset_x,
        offset_y = fit.offset_y,
        %filter,
        "cover fit"
    );

    let premultiplied = premultiply(source)?;
    let resampled = resample_rgba(
        &premultiplied,
        (source.width() as usize, source.height() as usize),
        (width as usize, height as usize),
        fit.x_map(),
        fit.y_map(),
        filter,
    )?;

    let row_len = canvas.row_len();
    let bg = background.map(|c| c as f64);

    for_each_row(canvas.as_bytes_mut(), row_len, |y, row| {
        let src_row = &resampled[y * row_len..(y + 1) * row_len];
        for (dst, px) in row
            .chunks_exact_mut(RGBA_CHANNELS)
            .zip(src_row.chunks_exact(RGBA_CHANNELS))
        {
            // Ringing filters can leave coverage slightly outside [0, 1].
            let coverage = px[3].clamp(0.0, 1.0) as f64;
            for c in 0..3 {
                dst[c] = to_byte(px[c] as f64 + bg[c] * (1.0 - coverage));
            }
            dst[3] = 255;
        }
    });

    Ok(canvas)
}

/// Converts a source to premultiplied f32 RGBA: color in `[0, 255]`
/// scaled by coverage, coverage in `[0, 1]`.
fn premultiply(source: &SourceImage) -> Result<Vec<f32>> {
    let channels = source.channels() as usize;
    let pixels = source.data().len() / channels;
    let mut out = zeroed(pixels.saturating_mul(RGBA_CHANNELS))?;

    for (dst, px) in out
        .chunks_exact_mut(RGBA_CHANNELS)
        .zip(source.data().chunks_exact(channels))
    {
        let a = if channels == 4 { px[3] as f32 / 255.0 } else { 1.0 };
        dst.copy_from_slice(&[px[0] as f32 * a, px[1] as f32 * a, px[2] as f32 * a, a]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use xray_core::ErrorKind;

    const WHITE: Rgb8 = [255, 255, 255];
    const BLACK: Rgb8 = [0, 0, 0];

    #[test]
    fn test_cover_fit_wide_canvas() {
        let fit = CoverFit::compute(100, 100, 1500, 500);
        assert_relative_eq!(fit.scale, 15.0);
        assert_relative_eq!(fit.offset_x, 0.0);
        assert_relative_eq!(fit.offset_y, -500.0);
    }

    #[test]
    fn test_cover_fit_tall_source() {
        let fit = CoverFit::compute(300, 600, 1500, 500);
        assert_relative_eq!(fit.scale, 5.0);
        assert_relative_eq!(fit.offset_y, 250.0 - 1500.0);
    }

    #[test]
    fn test_single_pixel_covers_banner() {
        let src = SourceImage::from_rgb(1, 1, vec![12, 34, 56]).unwrap();
        for filter in [Filter::Nearest, Filter::Bilinear, Filter::Bicubic, Filter::Lanczos3] {
            let canvas = normalize_with_filter(&src, 1500, 500, WHITE, filter).unwrap();
            assert_eq!(canvas.dimensions(), (1500, 500));
            assert!(canvas.pixels().all(|p| p == [12, 34, 56, 255]), "{filter}");
        }
    }

    #[test]
    fn test_small_source_leaves_no_background() {
        // Opaque black source on a white canvas: any white would be bleed.
        let src = SourceImage::solid(3, 2, [0, 0, 0, 255]).unwrap();
        let canvas = normalize(&src, 10, 10, WHITE).unwrap();
        assert!(canvas.pixels().all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_transparent_source_shows_background() {
        let src = SourceImage::solid(4, 4, [200, 10, 10, 0]).unwrap();
        let light = normalize(&src, 8, 8, WHITE).unwrap();
        let dark = normalize(&src, 8, 8, BLACK).unwrap();
        assert!(light.pixels().all(|p| p == [255, 255, 255, 255]));
        assert!(dark.pixels().all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_half_alpha_over_background() {
        let src = SourceImage::solid(2, 2, [0, 0, 0, 128]).unwrap();
        let canvas = normalize(&src, 2, 2, WHITE).unwrap();
        // 255 * (1 - 128/255) = 127
        assert_eq!(canvas.get(0, 0), [127, 127, 127, 255]);
    }

    #[test]
    fn test_center_crop_keeps_middle() {
        // Three columns red | green | blue, cropped to a square of the middle.
        let src = SourceImage::from_rgb(3, 1, vec![255, 0, 0, 0, 255, 0, 0, 0, 255]).unwrap();
        let canvas = normalize_with_filter(&src, 1, 1, WHITE, Filter::Nearest).unwrap();
        assert_eq!(canvas.get(0, 0), [0, 255, 0, 255]);
    }

    #[test]
    fn test_zero_canvas() {
        let src = SourceImage::solid(1, 1, [0, 0, 0, 255]).unwrap();
        let err = normalize(&src, 0, 500, WHITE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDimensions);
    }

    #[test]
    fn test_oversized_canvas_is_unavailable() {
        let src = SourceImage::solid(2, 2, [9, 9, 9, 255]).unwrap();
        for (w, h) in [(u32::MAX, u32::MAX), (200_000, 200_000), (16_385, 16_385)] {
            let err = normalize(&src, w, h, WHITE).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ContextUnavailable, "{w}x{h}");
        }
    }
}
