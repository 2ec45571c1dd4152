//! Resampling filters and separable resampling.
//!
//! The cover fit needs more than a plain resize: the scaled source is offset
//! so it stays centered, which places destination samples at fractional
//! source positions. [`AxisMap`] describes that mapping per axis and
//! [`resample_rgba`] runs the two separable passes.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - Fastest, no interpolation (blocky)
//! - [`Filter::Bilinear`] - Linear interpolation, closest to browser canvas smoothing
//! - [`Filter::Bicubic`] - Cubic interpolation (sharper than bilinear)
//! - [`Filter::Lanczos3`] - High-quality sinc-based (best for downscaling)
//!
//! # Example
//!
//! ```rust
//! use xray_ops::resize::{resample_rgba, AxisMap, Filter};
//!
//! let src = vec![0.5f32; 16 * 16 * 4];
//! let map = AxisMap { scale: 2.0, offset: 0.0 };
//! let dst = resample_rgba(&src, (16, 16), (32, 32), map, map, Filter::Bilinear).unwrap();
//! assert_eq!(dst.len(), 32 * 32 * 4);
//! ```

use crate::parallel::for_each_row;
use std::fmt;
use std::str::FromStr;
use xray_core::{Error, Result, RGBA_CHANNELS};

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation (smooth, fast).
    #[default]
    Bilinear,
    /// Bicubic interpolation (sharper than bilinear).
    Bicubic,
    /// Lanczos-3 (high quality, best for downscaling).
    Lanczos3,
}

impl Filter {
    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Nearest => 0.5,
            Filter::Bilinear => 1.0,
            Filter::Bicubic => 2.0,
            Filter::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            Filter::Nearest => nearest_weight(x),
            Filter::Bilinear => bilinear_weight(x),
            Filter::Bicubic => bicubic_weight(x),
            Filter::Lanczos3 => lanczos_weight(x, 3.0),
        }
    }

    /// Lowercase name used in configs and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Nearest => "nearest",
            Filter::Bilinear => "bilinear",
            Filter::Bicubic => "bicubic",
            Filter::Lanczos3 => "lanczos3",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "nearest" | "box" => Ok(Filter::Nearest),
            "bilinear" | "linear" => Ok(Filter::Bilinear),
            "bicubic" | "cubic" | "mitchell" => Ok(Filter::Bicubic),
            "lanczos" | "lanczos3" => Ok(Filter::Lanczos3),
            other => Err(Error::invalid_config(format!("unknown filter '{other}'"))),
        }
    }
}

/// Nearest-neighbor weight function.
#[inline]
fn nearest_weight(x: f32) -> f32 {
    if x.abs() < 0.5 { 1.0 } else { 0.0 }
}

/// Bilinear (triangle) weight function.
#[inline]
fn bilinear_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Bicubic (Mitchell-Netravali) weight function.
#[inline]
fn bicubic_weight(x: f32) -> f32 {
    // Mitchell-Netravali with B=1/3, C=1/3
    const B: f32 = 1.0 / 3.0;
    const C: f32 = 1.0 / 3.0;

    let ax = x.abs();
    if ax < 1.0 {
        ((12.0 - 9.0 * B - 6.0 * C) * ax * ax * ax
            + (-18.0 + 12.0 * B + 6.0 * C) * ax * ax
            + (6.0 - 2.0 * B))
            / 6.0
    } else if ax < 2.0 {
        ((-B - 6.0 * C) * ax * ax * ax
            + (6.0 * B + 30.0 * C) * ax * ax
            + (-12.0 * B - 48.0 * C) * ax
            + (8.0 * B + 24.0 * C))
            / 6.0
    } else {
        0.0
    }
}

/// Lanczos weight function.
#[inline]
fn lanczos_weight(x: f32, a: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < a {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Affine mapping from destination pixels onto one source axis.
///
/// A source of length `n` is drawn at destination coordinates
/// `[offset, offset + n * scale)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMap {
    /// Destination pixels per source pixel.
    pub scale: f32,
    /// Destination coordinate of the source's leading edge.
    pub offset: f32,
}

impl AxisMap {
    /// Source sample position (pixel centers at integers) for the center of
    /// destination pixel `dst`.
    #[inline]
    pub fn source_center(&self, dst: usize) -> f32 {
        (dst as f32 + 0.5 - self.offset) / self.scale - 0.5
    }
}

/// Normalized weights over a contiguous run of source samples.
#[derive(Debug, Clone)]
struct Taps {
    start: usize,
    weights: Vec<f32>,
}

/// Zeroed f32 buffer of `len` samples, or [`Error::ContextUnavailable`].
pub(crate) fn zeroed(len: usize) -> Result<Vec<f32>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|e| {
        Error::context_unavailable(len.saturating_mul(std::mem::size_of::<f32>()), e.to_string())
    })?;
    buf.resize(len, 0.0);
    Ok(buf)
}

/// Checked `rows * width * RGBA_CHANNELS`.
fn sample_len(rows: usize, width: usize) -> Result<usize> {
    rows.checked_mul(width)
        .and_then(|n| n.checked_mul(RGBA_CHANNELS))
        .ok_or_else(|| Error::context_unavailable(usize::MAX, "resample buffer size overflows usize"))
}

/// Builds the filter taps for every destination sample on one axis.
///
/// Sample positions are clamped to the source, so samples near or beyond an
/// edge replicate the edge pixel.
fn axis_taps(src_len: usize, dst_len: usize, map: AxisMap, filter: Filter) -> Result<Vec<Taps>> {
    let widen = (1.0 / map.scale).max(1.0);
    let support = filter.support() * widen;
    let last = src_len as isize - 1;

    let mut taps = Vec::new();
    taps.try_reserve_exact(dst_len).map_err(|e| {
        Error::context_unavailable(dst_len.saturating_mul(std::mem::size_of::<Taps>()), e.to_string())
    })?;

    for d in 0..dst_len {
        let center = map.source_center(d);
        let left = ((center - support).floor() as isize).clamp(0, last) as usize;
        let right = ((center + support).ceil() as isize).clamp(0, last) as usize;

        let mut weights: Vec<f32> = (left..=right)
            .map(|s| filter.weight((s as f32 - center) / widen))
            .collect();
        let sum: f32 = weights.iter().sum();

        if sum.abs() > 1e-8 {
            for w in &mut weights {
                *w /= sum;
            }
            taps.push(Taps { start: left, weights });
        } else {
            let nearest = (center.round() as isize).clamp(0, last) as usize;
            taps.push(Taps {
                start: nearest,
                weights: vec![1.0],
            });
        }
    }
    Ok(taps)
}

/// Resamples 4-channel f32 data through an arbitrary per-axis mapping.
///
/// Input and output are interleaved RGBA. Premultiply alpha beforehand when
/// the source is not opaque.
///
/// # Arguments
///
/// * `src` - Source pixel data (RGBA)
/// * `src_size` - Source `(width, height)`
/// * `dst_size` - Destination `(width, height)`
/// * `x_map`, `y_map` - Destination-to-source mapping per axis
/// * `filter` - Resampling filter
///
/// # Errors
///
/// - [`Error::InvalidDimensions`] if any size is zero or `src` does not
///   match `src_size`
/// - [`Error::InvalidConfig`] if a mapping scale is not positive
/// - [`Error::ContextUnavailable`] if a working buffer cannot be allocated
pub fn resample_rgba(
    src: &[f32],
    src_size: (usize, usize),
    dst_size: (usize, usize),
    x_map: AxisMap,
    y_map: AxisMap,
    filter: Filter,
) -> Result<Vec<f32>> {
    let (src_w, src_h) = src_size;
    let (dst_w, dst_h) = dst_size;
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return Err(Error::invalid_dimensions(
            dst_w as u32,
            dst_h as u32,
            "source and destination sizes must be > 0",
        ));
    }
    let src_len = sample_len(src_h, src_w)?;
    if src.len() != src_len {
        return Err(Error::invalid_dimensions(
            src_w as u32,
            src_h as u32,
            format!("expected {src_len} samples, got {}", src.len()),
        ));
    }
    if !(x_map.scale > 0.0 && y_map.scale > 0.0) {
        return Err(Error::invalid_config("resample scale must be > 0"));
    }

    // Largest buffer first.
    let mut result = zeroed(sample_len(dst_h, dst_w)?)?;

    let taps_x = axis_taps(src_w, dst_w, x_map, filter)?;
    let taps_y = axis_taps(src_h, dst_h, y_map, filter)?;

    // Only source rows reached by a vertical tap go through the first pass.
    let row_lo = taps_y.iter().map(|t| t.start).min().unwrap_or(0);
    let row_hi = taps_y
        .iter()
        .map(|t| t.start + t.weights.len())
        .max()
        .unwrap_or(src_h);

    let mut temp = zeroed(sample_len(row_hi - row_lo, dst_w)?)?;
    resample_horizontal(src, src_w, row_lo, &taps_x, &mut temp);
    resample_vertical(&temp, row_lo, &taps_y, &mut result);

    Ok(result)
}

/// Horizontal pass; `dst` receives rows starting at source row `row_lo`.
fn resample_horizontal(src: &[f32], src_w: usize, row_lo: usize, taps: &[Taps], dst: &mut [f32]) {
    let row_len = taps.len() * RGBA_CHANNELS;

    for_each_row(dst, row_len, |i, row| {
        let y = row_lo + i;
        for (x, tap) in taps.iter().enumerate() {
            let mut sum = [0.0f32; RGBA_CHANNELS];
            for (k, &w) in tap.weights.iter().enumerate() {
                let idx = (y * src_w + tap.start + k) * RGBA_CHANNELS;
                for c in 0..RGBA_CHANNELS {
                    sum[c] += src[idx + c] * w;
                }
            }
            row[x * RGBA_CHANNELS..(x + 1) * RGBA_CHANNELS].copy_from_slice(&sum);
        }
    });
}

/// Vertical pass; `src` holds rows starting at source row `row_lo`.
fn resample_vertical(src: &[f32], row_lo: usize, taps: &[Taps], dst: &mut [f32]) {
    let row_len = dst.len() / taps.len();

    for_each_row(dst, row_len, |y, row| {
        let tap = &taps[y];
        for (k, &w) in tap.weights.iter().enumerate() {
            let src_row = &src[(tap.start + k - row_lo) * row_len..][..row_len];
            for (d, &s) in row.iter_mut().zip(src_row) {
                *d += s * w;
            }
        }
    });
}
