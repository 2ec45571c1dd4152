//! Per-pixel blend strategies.
//!
//! Each strategy maps a pair of opaque source triples, one from the light
//! canvas and one from the dark canvas, to a single RGBA pixel whose alpha
//! byte stays inside the configured byte limits (`[1, 254]` by default).
//!
//! # Strategies
//!
//! - **Blended** - every pixel serves both themes. Alpha is derived from the
//!   brightness difference of the two inputs and color from the dark input,
//!   so the pixel reproduces the dark image exactly over black and
//!   approximates the light image over white.
//! - **Pattern** - pixels alternate between a *light slot* (tuned to vanish
//!   on black and show the light image on white) and a *dark slot* (the
//!   reverse). The layout is rows for scanlines or a checkerboard for
//!   interlaced output. Slots are either grayscale (pure black or white
//!   color, alpha from [`luma`]) or color-preserving.
//!
//! # Example
//!
//! ```rust
//! use xray_core::ProcessOptions;
//! use xray_ops::blend::BlendStrategy;
//!
//! let strategy = BlendStrategy::from_options(&ProcessOptions::banner());
//! let px = strategy.apply(0, 0, [255, 0, 0], [100, 0, 0]);
//! assert_eq!(px, [154, 0, 0, 165]);
//! ```

use xray_core::pixel::max_channels;
use xray_core::{luma, rms_intensity, to_byte, AlphaLimits, GenerationMode, ProcessOptions, Rgb8, Rgba8};

/// Which theme a pattern pixel serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Shows the light image on white, vanishes on black.
    Light,
    /// Shows the dark image on black, vanishes on white.
    Dark,
}

/// Spatial assignment of pattern slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternLayout {
    /// Even rows are light slots.
    Rows,
    /// `(x + y)` even is a light slot.
    Checkerboard,
}

impl PatternLayout {
    /// Slot for the pixel at (x, y).
    #[inline]
    pub fn slot(self, x: u32, y: u32) -> Slot {
        let even = match self {
            PatternLayout::Rows => y % 2 == 0,
            PatternLayout::Checkerboard => (x + y) % 2 == 0,
        };
        if even { Slot::Light } else { Slot::Dark }
    }
}

/// Intermediate result of the blended strategy, before quantization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendedSolution {
    /// Light triple after the optional normalize step.
    pub light: [f64; 3],
    /// Clamped alpha in `[floor, ceil]`.
    pub alpha: f64,
    /// Output color, `min(255, dark / alpha)` per channel.
    pub color: [f64; 3],
}

/// Solves the blended strategy for one pixel pair without quantizing.
///
/// With `normalize`, each light channel is first raised to at least the
/// matching dark channel.
pub fn solve_blended(light: Rgb8, dark: Rgb8, normalize: bool, limits: &AlphaLimits) -> BlendedSolution {
    let light = if normalize { max_channels(light, dark) } else { light };

    let int_light = rms_intensity(light);
    let int_dark = rms_intensity(dark);
    let alpha = limits.clamp(1.0 - (int_light - int_dark) / 255.0);

    BlendedSolution {
        light: light.map(|c| c as f64),
        alpha,
        color: dark.map(|c| (c as f64 / alpha).min(255.0)),
    }
}

/// Blended strategy for one pixel pair.
#[inline]
pub fn blend_blended(light: Rgb8, dark: Rgb8, normalize: bool, limits: &AlphaLimits) -> Rgba8 {
    let s = solve_blended(light, dark, normalize, limits);
    [
        to_byte(s.color[0]),
        to_byte(s.color[1]),
        to_byte(s.color[2]),
        float_alpha_byte(s.alpha, limits),
    ]
}

/// Grayscale light slot: black, more opaque where the light image is darker.
#[inline]
pub fn hide_light_gray(light: Rgb8, limits: &AlphaLimits) -> Rgba8 {
    let alpha = limits.clamp_byte(255.0 - luma(light));
    [0, 0, 0, to_byte(alpha)]
}

/// Grayscale dark slot: white, more opaque where the dark image is brighter.
#[inline]
pub fn hide_dark_gray(dark: Rgb8, limits: &AlphaLimits) -> Rgba8 {
    let alpha = limits.clamp_byte(luma(dark));
    [255, 255, 255, to_byte(alpha)]
}

/// Color-preserving light slot.
///
/// Alpha is the smallest value that can reproduce the darkest channel over
/// white; color is solved from `shown = C*a + 255*(1 - a)`.
#[inline]
pub fn light_slot_color(light: Rgb8, limits: &AlphaLimits) -> Rgba8 {
    let min = light[0].min(light[1]).min(light[2]) as f64;
    let alpha = (1.0 - min / 255.0).max(limits.floor);
    let solve = |c: u8| ((c as f64 - 255.0 * (1.0 - alpha)) / alpha).clamp(0.0, 255.0);
    [
        to_byte(solve(light[0])),
        to_byte(solve(light[1])),
        to_byte(solve(light[2])),
        float_alpha_byte(alpha, limits),
    ]
}

/// Color-preserving dark slot.
///
/// Alpha is the brightest channel's share of full scale; color is solved
/// from `shown = C*a` over black.
#[inline]
pub fn dark_slot_color(dark: Rgb8, limits: &AlphaLimits) -> Rgba8 {
    let max = dark[0].max(dark[1]).max(dark[2]) as f64;
    let alpha = (max / 255.0).max(limits.floor);
    let solve = |c: u8| (c as f64 / alpha).clamp(0.0, 255.0);
    [
        to_byte(solve(dark[0])),
        to_byte(solve(dark[1])),
        to_byte(solve(dark[2])),
        float_alpha_byte(alpha, limits),
    ]
}

/// `floor(alpha * 255)` clamped to the byte limits.
#[inline]
fn float_alpha_byte(alpha: f64, limits: &AlphaLimits) -> u8 {
    limits.clamp_byte((alpha * 255.0).floor()) as u8
}

/// A blend strategy with its sub-options resolved once per job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlendStrategy {
    /// Inverse alpha compositing.
    Blended {
        /// Raise light channels to at least the dark ones.
        normalize: bool,
        /// Alpha limits.
        limits: AlphaLimits,
    },
    /// Interleaved light and dark slots.
    Pattern {
        /// Slot layout.
        layout: PatternLayout,
        /// Color-preserving slots instead of grayscale.
        preserve_color: bool,
        /// Alpha limits.
        limits: AlphaLimits,
    },
}

impl BlendStrategy {
    /// Resolves the strategy selected by `options`.
    pub fn from_options(options: &ProcessOptions) -> Self {
        let limits = options.limits;
        match options.mode {
            GenerationMode::Blended => BlendStrategy::Blended {
                normalize: options.normalize,
                limits,
            },
            GenerationMode::Scanlines => BlendStrategy::Pattern {
                layout: PatternLayout::Rows,
                preserve_color: options.preserve_color,
                limits,
            },
            GenerationMode::Interlaced => BlendStrategy::Pattern {
                layout: PatternLayout::Checkerboard,
                preserve_color: options.preserve_color,
                limits,
            },
        }
    }

    /// Output pixel at (x, y) for the given light and dark triples.
    #[inline]
    pub fn apply(&self, x: u32, y: u32, light: Rgb8, dark: Rgb8) -> Rgba8 {
        match *self {
            BlendStrategy::Blended { normalize, ref limits } => {
                blend_blended(light, dark, normalize, limits)
            }
            BlendStrategy::Pattern {
                layout,
                preserve_color,
                ref limits,
            } => match (layout.slot(x, y), preserve_color) {
                (Slot::Light, false) => hide_light_gray(light, limits),
                (Slot::Dark, false) => hide_dark_gray(dark, limits),
                (Slot::Light, true) => light_slot_color(light, limits),
                (Slot::Dark, true) => dark_slot_color(dark, limits),
            },
        }
    }
}
