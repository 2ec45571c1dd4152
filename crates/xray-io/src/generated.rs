//! Encoded banner artifact.
//!
//! [`GeneratedImage`] is what a generation job hands to download or preview
//! code: the PNG bytes of the synthesized buffer plus its dimensions. PNG is
//! the only container used since it stores the alpha channel exactly.

use crate::{png, ImageData, IoResult};
use base64::{engine::general_purpose, Engine as _};
use std::path::Path;
use tracing::debug;
use xray_core::RgbaBuffer;

/// An immutable, encoded banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    width: u32,
    height: u32,
    png: Vec<u8>,
}

impl GeneratedImage {
    /// Encodes a synthesized RGBA buffer as an 8-bit RGBA PNG.
    pub fn encode(pixels: &RgbaBuffer) -> IoResult<Self> {
        let png = png::encode(&ImageData::from_rgba_buffer(pixels))?;
        debug!(
            width = pixels.width(),
            height = pixels.height(),
            bytes = png.len(),
            "Encoded banner"
        );
        Ok(Self {
            width: pixels.width(),
            height: pixels.height(),
            png,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoded PNG bytes.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// `data:image/png;base64,...` rendering of the PNG.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(&self.png)
        )
    }

    /// Writes the PNG bytes to a file.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {
        std::fs::write(path, &self.png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_preserves_alpha() {
        let mut buf = RgbaBuffer::allocate(3, 2).unwrap();
        buf.put(0, 0, [0, 0, 0, 1]);
        buf.put(2, 1, [255, 255, 255, 254]);

        let out = GeneratedImage::encode(&buf).unwrap();
        assert_eq!((out.width(), out.height()), (3, 2));

        let back = crate::read_from_memory(out.png_bytes()).unwrap();
        assert_eq!(back.channels, 4);
        assert_eq!(back.to_u8(), buf.as_bytes());
    }

    #[test]
    fn test_data_url_prefix() {
        let buf = RgbaBuffer::filled(1, 1, [9, 9, 9, 100]).unwrap();
        let out = GeneratedImage::encode(&buf).unwrap();
        let url = out.to_data_url();
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));

        let back = crate::read_data_url(&url).unwrap();
        assert_eq!(back.to_u8(), vec![9, 9, 9, 100]);
    }
}
