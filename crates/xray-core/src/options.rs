//! Generation options.
//!
//! [`ProcessOptions`] configures one generation job: output size, blend
//! strategy and its sub-options, and the alpha clamp limits that keep the
//! output away from fully opaque or fully transparent pixels.
//!
//! All types are `serde`-serializable so a job can be described in a YAML
//! or JSON config file:
//!
//! ```yaml
//! width: 1500
//! height: 500
//! mode: scanlines
//! preserve_color: true
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default banner width in pixels.
pub const BANNER_WIDTH: u32 = 1500;

/// Default banner height in pixels.
pub const BANNER_HEIGHT: u32 = 500;

/// Default lower bound for a blended alpha value.
pub const ALPHA_FLOOR: f64 = 0.005;

/// Default upper bound for a blended alpha value.
pub const ALPHA_CEIL: f64 = 0.995;

/// Smallest alpha byte ever emitted by default.
pub const ALPHA_BYTE_MIN: u8 = 1;

/// Largest alpha byte ever emitted by default.
pub const ALPHA_BYTE_MAX: u8 = 254;

/// Blend strategy for a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Inverse alpha compositing; keeps color.
    #[default]
    Blended,
    /// Alternating rows: even rows carry the light image, odd rows the dark.
    Scanlines,
    /// Checkerboard: `(x + y)` even carries the light image.
    Interlaced,
}

impl GenerationMode {
    /// All modes, in menu order.
    pub const ALL: [GenerationMode; 3] = [Self::Blended, Self::Scanlines, Self::Interlaced];

    /// Lowercase name used in configs and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Blended => "blended",
            Self::Scanlines => "scanlines",
            Self::Interlaced => "interlaced",
        }
    }

    /// Whether this mode interleaves light and dark pixels by position.
    #[inline]
    pub fn is_pattern(self) -> bool {
        !matches!(self, Self::Blended)
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GenerationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "blended" | "blend" => Ok(Self::Blended),
            "scanlines" | "scanline" | "rows" => Ok(Self::Scanlines),
            "interlaced" | "interlace" | "checkerboard" => Ok(Self::Interlaced),
            other => Err(Error::invalid_config(format!(
                "unknown mode '{other}' (expected blended, scanlines or interlaced)"
            ))),
        }
    }
}

/// Alpha clamp limits.
///
/// `floor`/`ceil` bound the floating-point alpha in the blended strategy and
/// `floor` alone bounds the color-preserving pattern strategies.
/// `byte_min`/`byte_max` bound every emitted alpha byte.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaLimits {
    /// Lower bound for a float alpha.
    pub floor: f64,
    /// Upper bound for a float alpha.
    pub ceil: f64,
    /// Smallest alpha byte.
    pub byte_min: u8,
    /// Largest alpha byte.
    pub byte_max: u8,
}

impl Default for AlphaLimits {
    fn default() -> Self {
        Self {
            floor: ALPHA_FLOOR,
            ceil: ALPHA_CEIL,
            byte_min: ALPHA_BYTE_MIN,
            byte_max: ALPHA_BYTE_MAX,
        }
    }
}

impl AlphaLimits {
    /// Checks the limits describe a non-empty range strictly inside (0, 1)
    /// and (0, 255).
    pub fn validate(&self) -> Result<()> {
        if !(self.floor > 0.0 && self.floor <= self.ceil && self.ceil < 1.0) {
            return Err(Error::invalid_config(format!(
                "alpha limits must satisfy 0 < floor <= ceil < 1, got {}..{}",
                self.floor, self.ceil
            )));
        }
        if self.byte_min == 0 || self.byte_max == 255 || self.byte_min > self.byte_max {
            return Err(Error::invalid_config(format!(
                "alpha byte limits must satisfy 1 <= min <= max <= 254, got {}..{}",
                self.byte_min, self.byte_max
            )));
        }
        Ok(())
    }

    /// Clamps a float alpha to `[floor, ceil]`.
    #[inline]
    pub fn clamp(&self, alpha: f64) -> f64 {
        alpha.max(self.floor).min(self.ceil)
    }

    /// Clamps an alpha expressed in byte units to `[byte_min, byte_max]`.
    #[inline]
    pub fn clamp_byte(&self, alpha: f64) -> f64 {
        alpha.max(self.byte_min as f64).min(self.byte_max as f64)
    }
}

/// Configuration for one generation job.
///
/// # Example
///
/// ```
/// use xray_core::{GenerationMode, ProcessOptions};
///
/// let opts = ProcessOptions::banner().with_mode(GenerationMode::Scanlines);
/// assert_eq!((opts.width, opts.height), (1500, 500));
/// assert!(opts.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessOptions {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Brightness offset. Carried for callers but not applied.
    pub brightness: f64,
    /// Blend strategy.
    pub mode: GenerationMode,
    /// Blended mode only: raise each light channel to at least the dark one.
    pub normalize: bool,
    /// Pattern modes only: keep hue at the cost of a faint ghost on the
    /// off-theme background.
    pub preserve_color: bool,
    /// Alpha clamp limits.
    pub limits: AlphaLimits,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self::banner()
    }
}

impl ProcessOptions {
    /// Options for a 1500x500 banner, blended, normalized.
    pub fn banner() -> Self {
        Self {
            width: BANNER_WIDTH,
            height: BANNER_HEIGHT,
            brightness: 0.0,
            mode: GenerationMode::Blended,
            normalize: true,
            preserve_color: false,
            limits: AlphaLimits::default(),
        }
    }

    /// Sets the output size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the blend strategy.
    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the normalize flag.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Sets the preserve-color flag.
    pub fn with_preserve_color(mut self, preserve_color: bool) -> Self {
        self.preserve_color = preserve_color;
        self
    }

    /// Sets the alpha limits.
    pub fn with_limits(mut self, limits: AlphaLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Validates dimensions and limits.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if width or height is zero
    /// - [`Error::InvalidConfig`] if the alpha limits are inconsistent
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid_dimensions(
                self.width,
                self.height,
                "output width and height must be > 0",
            ));
        }
        if !self.brightness.is_finite() {
            return Err(Error::invalid_config("brightness must be finite"));
        }
        self.limits.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_banner() {
        let opts = ProcessOptions::default();
        assert_eq!(opts.width, 1500);
        assert_eq!(opts.height, 500);
        assert_eq!(opts.mode, GenerationMode::Blended);
        assert!(opts.normalize);
        assert!(!opts.preserve_color);
        assert_eq!(opts.limits, AlphaLimits::default());
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("SCANLINES".parse::<GenerationMode>().unwrap(), GenerationMode::Scanlines);
        assert_eq!("checkerboard".parse::<GenerationMode>().unwrap(), GenerationMode::Interlaced);
        assert!("stripes".parse::<GenerationMode>().is_err());
        for mode in GenerationMode::ALL {
            assert_eq!(mode.name().parse::<GenerationMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_validate_zero_size() {
        let err = ProcessOptions::banner().with_size(0, 500).validate().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidDimensions);
    }

    #[test]
    fn test_validate_limits() {
        let bad = AlphaLimits {
            floor: 0.0,
            ..AlphaLimits::default()
        };
        assert!(bad.validate().is_err());

        let bad = AlphaLimits {
            byte_max: 255,
            ..AlphaLimits::default()
        };
        assert!(bad.validate().is_err());

        let bad = AlphaLimits {
            floor: 0.9,
            ceil: 0.5,
            ..AlphaLimits::default()
        };
        assert!(bad.validate().is_err());

        assert!(AlphaLimits::default().validate().is_ok());
    }

    #[test]
    fn test_limits_clamp() {
        let l = AlphaLimits::default();
        assert_eq!(l.clamp(1.2), 0.995);
        assert_eq!(l.clamp(-0.3), 0.005);
        assert_eq!(l.clamp_byte(0.0), 1.0);
        assert_eq!(l.clamp_byte(255.0), 254.0);
        assert_eq!(l.clamp_byte(100.4), 100.4);
    }

    #[test]
    fn test_yaml_partial_config() {
        let yaml = "mode: interlaced\npreserve_color: true\nlimits:\n  byte_max: 250\n";
        let opts: ProcessOptions = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(opts.mode, GenerationMode::Interlaced);
        assert!(opts.preserve_color);
        assert_eq!(opts.width, 1500);
        assert_eq!(opts.limits.byte_max, 250);
        assert_eq!(opts.limits.byte_min, 1);
    }
}
