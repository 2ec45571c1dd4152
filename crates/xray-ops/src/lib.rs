//! # xray-ops
//!
//! Image operations for dual-theme banner synthesis.
//!
//! # Modules
//!
//! - [`resize`] - Resampling filters and separable resampling
//! - [`normalize`] - Cover fit of a source onto a fixed canvas
//! - [`blend`] - Per-pixel blend strategies (blended, scanlines, interlaced)
//! - [`compositor`] - Job driver: normalize both sources, then blend
//! - [`preview`] - Composite a banner over a theme page color
//! - [`safe_zone`] - Regions of the banner hidden by platform chrome
//!
//! # Example
//!
//! ```rust
//! use xray_core::{GenerationMode, ProcessOptions, SourceImage};
//! use xray_ops::{Compositor, Filter};
//!
//! let light = SourceImage::solid(8, 8, [240, 240, 240, 255]).unwrap();
//! let dark = SourceImage::solid(8, 8, [30, 30, 30, 255]).unwrap();
//!
//! let job = Compositor::new(
//!     ProcessOptions::banner()
//!         .with_size(30, 10)
//!         .with_mode(GenerationMode::Interlaced),
//! )
//! .unwrap()
//! .with_filter(Filter::Bicubic);
//!
//! let banner = job.generate(&light, &dark).unwrap();
//! assert_eq!(banner.dimensions(), (30, 10));
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - process rows with Rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod parallel;

pub mod blend;
pub mod compositor;
pub mod normalize;
pub mod preview;
pub mod resize;
pub mod safe_zone;

pub use blend::{BlendStrategy, PatternLayout, Slot};
pub use compositor::{generate, Compositor, DARK_BACKGROUND, LIGHT_BACKGROUND};
pub use normalize::{normalize, normalize_with_filter, CoverFit};
pub use preview::{preview, simulate, PreviewTheme};
pub use resize::Filter;
pub use safe_zone::{overlay_safe_zones, SafeZone, SafeZoneKind, BANNER_SAFE_ZONES};
