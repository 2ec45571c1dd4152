//! Pixel metrics and 8-bit conversions.
//!
//! Two scalar brightness metrics drive every alpha decision in the blend
//! strategies:
//!
//! - [`luma`] - perceptual brightness with Rec.601 weights (green highest)
//! - [`rms_intensity`] - root-mean-square of the three channels
//!
//! Both operate on 8-bit sRGB triples and return a value in `[0, 255]`.
//!
//! # Example
//!
//! ```
//! use xray_core::pixel::{luma, rms_intensity};
//!
//! // Pure red: luma collapses it, RMS keeps it bright.
//! assert!((luma([255, 0, 0]) - 76.245).abs() < 1e-3);
//! assert!((rms_intensity([255, 0, 0]) - 147.224).abs() < 1e-3);
//! ```

/// 8-bit RGB triple.
pub type Rgb8 = [u8; 3];

/// 8-bit RGBA quadruple.
pub type Rgba8 = [u8; 4];

// ============================================================================
// Rec.601 Luma Constants
// ============================================================================

/// Rec.601 luma coefficient for red channel.
pub const REC601_LUMA_R: f64 = 0.299;

/// Rec.601 luma coefficient for green channel.
pub const REC601_LUMA_G: f64 = 0.587;

/// Rec.601 luma coefficient for blue channel.
pub const REC601_LUMA_B: f64 = 0.114;

/// Rec.601 luma coefficients as an array [R, G, B].
pub const REC601_LUMA: [f64; 3] = [REC601_LUMA_R, REC601_LUMA_G, REC601_LUMA_B];

/// Perceptual brightness of an 8-bit triple.
///
/// `Y = 0.299*R + 0.587*G + 0.114*B`, in `[0, 255]`.
///
/// # Example
/// ```
/// use xray_core::pixel::luma;
/// assert!((luma([255, 255, 255]) - 255.0).abs() < 1e-3);
/// assert_eq!(luma([0, 0, 0]), 0.0);
/// ```
#[inline]
pub fn luma(rgb: Rgb8) -> f64 {
    rgb[0] as f64 * REC601_LUMA_R + rgb[1] as f64 * REC601_LUMA_G + rgb[2] as f64 * REC601_LUMA_B
}

/// Root-mean-square brightness of an 8-bit triple.
///
/// `sqrt((R^2 + G^2 + B^2) / 3)`, in `[0, 255]`. Unlike [`luma`], a saturated
/// single-channel color such as pure blue keeps a large value.
///
/// # Example
/// ```
/// use xray_core::pixel::rms_intensity;
/// assert!((rms_intensity([100, 0, 0]) - 57.735).abs() < 1e-3);
/// ```
#[inline]
pub fn rms_intensity(rgb: Rgb8) -> f64 {
    let [r, g, b] = rgb.map(|c| c as f64);
    ((r * r + g * g + b * b) / 3.0).sqrt()
}

/// Channel-wise maximum of two triples.
#[inline]
pub fn max_channels(a: Rgb8, b: Rgb8) -> Rgb8 {
    [a[0].max(b[0]), a[1].max(b[1]), a[2].max(b[2])]
}

/// Stores a float channel value the way an 8-bit clamped pixel array does.
///
/// Clamps to `[0, 255]`, then rounds to nearest with ties to even.
/// NaN maps to 0.
///
/// # Example
/// ```
/// use xray_core::pixel::to_byte;
/// assert_eq!(to_byte(154.08), 154);
/// assert_eq!(to_byte(0.5), 0);
/// assert_eq!(to_byte(1.5), 2);
/// assert_eq!(to_byte(300.0), 255);
/// assert_eq!(to_byte(-4.0), 0);
/// ```
#[inline]
pub fn to_byte(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0).round_ties_even() as u8
}
