//! Theme preview.
//!
//! Shows what a synthesized banner looks like on a page: the banner is
//! composited over an opaque theme color with the Porter-Duff *over*
//! operator, `shown = fg * a + bg * (1 - a)`.

use crate::parallel::for_each_row;
use std::fmt;
use std::str::FromStr;
use tracing::trace;
use xray_core::{to_byte, Error, Result, Rgb8, RgbaBuffer, RGBA_CHANNELS};

/// Page background of a display theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewTheme {
    /// White page, `#FFFFFF`.
    Light,
    /// Dim blue-gray page, `#15202B`.
    Dim,
    /// Black page, `#000000`.
    Dark,
}

impl PreviewTheme {
    /// All themes.
    pub const ALL: [PreviewTheme; 3] = [Self::Light, Self::Dim, Self::Dark];

    /// Page color.
    pub fn background(self) -> Rgb8 {
        match self {
            Self::Light => [0xFF, 0xFF, 0xFF],
            Self::Dim => [0x15, 0x20, 0x2B],
            Self::Dark => [0x00, 0x00, 0x00],
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dim => "dim",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for PreviewTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PreviewTheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "light" | "white" => Ok(Self::Light),
            "dim" => Ok(Self::Dim),
            "dark" | "black" => Ok(Self::Dark),
            other => Err(Error::invalid_config(format!(
                "unknown theme '{other}' (expected light, dim or dark)"
            ))),
        }
    }
}

/// Composites one straight-alpha pixel over an opaque color.
#[inline]
pub fn over_opaque(fg: [u8; 4], bg: Rgb8) -> Rgb8 {
    let a = fg[3] as f64 / 255.0;
    [0, 1, 2].map(|c| to_byte(fg[c] as f64 * a + bg[c] as f64 * (1.0 - a)))
}

/// Composites `buffer` over a solid `background`. The result is opaque.
pub fn simulate(buffer: &RgbaBuffer, background: Rgb8) -> Result<RgbaBuffer> {
    let (width, height) = buffer.dimensions();
    trace!(width, height, ?background, "simulate");

    let mut out = RgbaBuffer::allocate(width, height)?;
    let row_len = out.row_len();

    for_each_row(out.as_bytes_mut(), row_len, |y, row| {
        let src = &buffer.as_bytes()[y * row_len..(y + 1) * row_len];
        for (dst, px) in row
            .chunks_exact_mut(RGBA_CHANNELS)
            .zip(src.chunks_exact(RGBA_CHANNELS))
        {
            let rgb = over_opaque([px[0], px[1], px[2], px[3]], background);
            dst.copy_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
    });

    Ok(out)
}

/// [`simulate`] against a theme's page color.
pub fn preview(buffer: &RgbaBuffer, theme: PreviewTheme) -> Result<RgbaBuffer> {
    simulate(buffer, theme.background())
}
