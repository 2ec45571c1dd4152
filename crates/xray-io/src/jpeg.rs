//! JPEG format support (read only).
//!
//! Sources authored as photos often arrive as JPEG. They are decoded to
//! 8-bit RGB; grayscale and CMYK inputs are converted. Banners are never
//! written as JPEG since that would discard the alpha channel.

use crate::{ImageData, IoError, IoResult, PixelData};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::trace;

/// Reads a JPEG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Reads a JPEG image from an in-memory byte slice.
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageData> {
    decode(data)
}

fn decode<R: Read>(reader: R) -> IoResult<ImageData> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    trace!(width, height, format = ?info.pixel_format, "jpeg::decode");

    let data = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels,
        jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
        jpeg_decoder::PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .flat_map(|cmyk| {
                let c = cmyk[0] as f32 / 255.0;
                let m = cmyk[1] as f32 / 255.0;
                let y = cmyk[2] as f32 / 255.0;
                let k = cmyk[3] as f32 / 255.0;

                let r = ((1.0 - c) * (1.0 - k) * 255.0) as u8;
                let g = ((1.0 - m) * (1.0 - k) * 255.0) as u8;
                let b = ((1.0 - y) * (1.0 - k) * 255.0) as u8;

                [r, g, b]
            })
            .collect(),
        // 16-bit grayscale, big-endian: keep the high byte
        jpeg_decoder::PixelFormat::L16 => pixels
            .chunks_exact(2)
            .flat_map(|l16| [l16[0], l16[0], l16[0]])
            .collect(),
    };

    Ok(ImageData {
        width,
        height,
        channels: 3,
        data: PixelData::U8(data),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_stream_is_decode_error() {
        let err = read_from_memory(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = read("/nonexistent/dark.jpg").unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}
