//! Banner compositor.
//!
//! Drives a whole job: both sources are cover-fit onto their theme
//! backgrounds (white for light, black for dark), then every output pixel is
//! produced by the job's [`BlendStrategy`].
//!
//! # Example
//!
//! ```rust
//! use xray_core::{ProcessOptions, SourceImage};
//! use xray_ops::compositor::generate;
//!
//! let light = SourceImage::solid(30, 10, [250, 250, 250, 255]).unwrap();
//! let dark = SourceImage::solid(30, 10, [20, 20, 20, 255]).unwrap();
//! let opts = ProcessOptions::banner().with_size(150, 50);
//!
//! let out = generate(&light, &dark, &opts).unwrap();
//! assert_eq!(out.dimensions(), (150, 50));
//! assert!(out.pixels().all(|p| (1..=254).contains(&p[3])));
//! ```

use crate::blend::BlendStrategy;
use crate::normalize::normalize_with_filter;
use crate::parallel::for_each_row;
use crate::resize::Filter;
use tracing::{debug, trace, warn};
use xray_core::{Error, ProcessOptions, Result, Rgb8, RgbaBuffer, SourceImage, RGBA_CHANNELS};

/// Canvas fill behind the light source.
pub const LIGHT_BACKGROUND: Rgb8 = [255, 255, 255];

/// Canvas fill behind the dark source.
pub const DARK_BACKGROUND: Rgb8 = [0, 0, 0];

/// A validated generation job.
#[derive(Debug, Clone)]
pub struct Compositor {
    options: ProcessOptions,
    strategy: BlendStrategy,
    filter: Filter,
}

impl Compositor {
    /// Validates `options` and resolves the blend strategy.
    ///
    /// # Errors
    ///
    /// Whatever [`ProcessOptions::validate`] reports.
    pub fn new(options: ProcessOptions) -> Result<Self> {
        options.validate()?;
        if options.brightness != 0.0 {
            warn!(brightness = options.brightness, "brightness offset is not applied");
        }
        let strategy = BlendStrategy::from_options(&options);
        debug!(
            mode = %options.mode,
            normalize = options.normalize,
            preserve_color = options.preserve_color,
            width = options.width,
            height = options.height,
            "compositor configured"
        );
        Ok(Self {
            options,
            strategy,
            filter: Filter::default(),
        })
    }

    /// Sets the resampling filter used by the cover fit.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Job options.
    #[inline]
    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Resampling filter.
    #[inline]
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Resolved blend strategy.
    #[inline]
    pub fn strategy(&self) -> &BlendStrategy {
        &self.strategy
    }

    /// Cover-fits both sources onto their theme backgrounds.
    pub fn normalize_pair(&self, light: &SourceImage, dark: &SourceImage) -> Result<(RgbaBuffer, RgbaBuffer)> {
        let (w, h) = (self.options.width, self.options.height);
        let light = normalize_with_filter(light, w, h, LIGHT_BACKGROUND, self.filter)?;
        let dark = normalize_with_filter(dark, w, h, DARK_BACKGROUND, self.filter)?;
        Ok((light, dark))
    }

    /// Blends two equal-sized normalized canvases into the output banner.
    ///
    /// # Errors
    ///
    /// - [`Error::DimensionMismatch`] if the canvases differ in size
    /// - [`Error::ContextUnavailable`] if the output cannot be allocated
    pub fn composite(&self, light: &RgbaBuffer, dark: &RgbaBuffer) -> Result<RgbaBuffer> {
        if !light.same_size(dark) {
            return Err(Error::dimension_mismatch(light.dimensions(), dark.dimensions()));
        }
        let (width, height) = light.dimensions();
        trace!(width, height, "composite");

        let mut out = RgbaBuffer::allocate(width, height)?;
        let row_len = out.row_len();
        let strategy = self.strategy;

        for_each_row(out.as_bytes_mut(), row_len, |y, row| {
            let light_row = &light.as_bytes()[y * row_len..(y + 1) * row_len];
            let dark_row = &dark.as_bytes()[y * row_len..(y + 1) * row_len];
            let pixels = row
                .chunks_exact_mut(RGBA_CHANNELS)
                .zip(light_row.chunks_exact(RGBA_CHANNELS))
                .zip(dark_row.chunks_exact(RGBA_CHANNELS));

            for (x, ((dst, l), d)) in pixels.enumerate() {
                let px = strategy.apply(x as u32, y as u32, [l[0], l[1], l[2]], [d[0], d[1], d[2]]);
                dst.copy_from_slice(&px);
            }
        });

        Ok(out)
    }

    /// Runs the full job: normalize both sources, then composite.
    pub fn generate(&self, light: &SourceImage, dark: &SourceImage) -> Result<RgbaBuffer> {
        let (light, dark) = self.normalize_pair(light, dark)?;
        self.composite(&light, &dark)
    }
}

/// One-shot generation with the default filter.
///
/// # Errors
///
/// [`Error::InvalidDimensions`] or [`Error::InvalidConfig`] for bad options,
/// [`Error::ContextUnavailable`] if a buffer cannot be allocated.
pub fn generate(light: &SourceImage, dark: &SourceImage, options: &ProcessOptions) -> Result<RgbaBuffer> {
    Compositor::new(options.clone())?.generate(light, dark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xray_core::{ErrorKind, GenerationMode};

    fn gradient(width: u32, height: u32, seed: u32) -> SourceImage {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(((x * 7 + seed) % 256) as u8);
                data.push(((y * 13 + seed) % 256) as u8);
                data.push(((x + y + seed * 3) % 256) as u8);
            }
        }
        SourceImage::from_rgb(width, height, data).unwrap()
    }

    #[test]
    fn test_output_size_and_alpha_range() {
        let light = gradient(64, 40, 3);
        let dark = gradient(20, 90, 11);
        for mode in GenerationMode::ALL {
            for preserve_color in [false, true] {
                let opts = ProcessOptions::banner()
                    .with_size(120, 40)
                    .with_mode(mode)
                    .with_preserve_color(preserve_color);
                let out = generate(&light, &dark, &opts).unwrap();
                assert_eq!(out.dimensions(), (120, 40));
                assert!(out.pixels().all(|p| (1..=254).contains(&p[3])), "{mode}");
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let light = gradient(33, 17, 1);
        let dark = gradient(17, 33, 2);
        let job = Compositor::new(ProcessOptions::banner().with_size(90, 30))
            .unwrap()
            .with_filter(Filter::Lanczos3);
        let a = job.generate(&light, &dark).unwrap();
        let b = job.generate(&light, &dark).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_pixel_sources_fill_banner() {
        let light = SourceImage::from_rgb(1, 1, vec![255, 0, 0]).unwrap();
        let dark = SourceImage::from_rgb(1, 1, vec![100, 0, 0]).unwrap();
        let out = generate(&light, &dark, &ProcessOptions::banner()).unwrap();
        assert_eq!(out.dimensions(), (1500, 500));
        assert!(out.pixels().all(|p| p == [154, 0, 0, 165]));
    }

    #[test]
    fn test_scanlines_rows_alternate() {
        let light = SourceImage::solid(4, 4, [255, 255, 255, 255]).unwrap();
        let dark = SourceImage::solid(4, 4, [0, 0, 0, 255]).unwrap();
        let opts = ProcessOptions::banner()
            .with_size(6, 4)
            .with_mode(GenerationMode::Scanlines);
        let out = generate(&light, &dark, &opts).unwrap();
        for x in 0..6 {
            assert_eq!(out.get(x, 0), [0, 0, 0, 1]);
            assert_eq!(out.get(x, 1), [255, 255, 255, 1]);
            assert_eq!(out.get(x, 2), [0, 0, 0, 1]);
        }
    }

    #[test]
    fn test_composite_size_mismatch() {
        let job = Compositor::new(ProcessOptions::banner()).unwrap();
        let a = RgbaBuffer::filled(4, 4, [0, 0, 0, 255]).unwrap();
        let b = RgbaBuffer::filled(4, 5, [0, 0, 0, 255]).unwrap();
        let err = job.composite(&a, &b).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDimensions);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let err = Compositor::new(ProcessOptions::banner().with_size(1500, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDimensions);
    }

    #[test]
    fn test_oversized_banner_is_unavailable() {
        let light = gradient(4, 4, 1);
        let dark = gradient(4, 4, 2);
        for (w, h) in [(u32::MAX, u32::MAX), (200_000, 200_000)] {
            let opts = ProcessOptions::banner().with_size(w, h);
            let err = generate(&light, &dark, &opts).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ContextUnavailable, "{w}x{h}");
        }
    }

    #[test]
    fn test_brightness_is_carried_not_applied() {
        let light = gradient(10, 10, 5);
        let dark = gradient(10, 10, 9);
        let base = ProcessOptions::banner().with_size(10, 10);
        let shifted = ProcessOptions {
            brightness: 40.0,
            ..base.clone()
        };
        let job = Compositor::new(shifted).unwrap();
        assert_eq!(job.options().brightness, 40.0);
        assert_eq!(
            job.generate(&light, &dark).unwrap(),
            generate(&light, &dark, &base).unwrap()
        );
    }
}
