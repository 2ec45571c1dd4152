//! PNG format support.
//!
//! Reads 8-bit and 16-bit PNG sources (palette, grayscale and low bit depths
//! are expanded to RGB/RGBA) and writes 8-bit PNGs with the alpha channel
//! stored losslessly.
//!
//! # Example
//!
//! ```rust,ignore
//! use xray_io::png::{read, write};
//!
//! let image = read("light.png")?;
//! write("banner.png", &image)?;
//! ```

use crate::{ImageData, IoError, IoResult, PixelData};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Seek, Write};
use std::path::Path;
use tracing::trace;

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Reads a PNG image from an in-memory byte slice.
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageData> {
    decode(Cursor::new(data))
}

/// Decodes the first frame of a PNG stream.
fn decode<R: BufRead + Seek>(reader: R) -> IoResult<ImageData> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let width = info.width;
    let height = info.height;
    let bytes = &buf[..info.buffer_size()];
    trace!(width, height, color = ?info.color_type, depth = ?info.bit_depth, "png::decode");

    let (channels, data) = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgb, png::BitDepth::Eight) => (3, PixelData::U8(bytes.to_vec())),
        (png::ColorType::Rgba, png::BitDepth::Eight) => (4, PixelData::U8(bytes.to_vec())),
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => (3, PixelData::U16(bytes_to_u16(bytes))),
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => (4, PixelData::U16(bytes_to_u16(bytes))),
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            let rgb: Vec<u8> = bytes.iter().flat_map(|&g| [g, g, g]).collect();
            (3, PixelData::U8(rgb))
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            let rgba: Vec<u8> = bytes
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect();
            (4, PixelData::U8(rgba))
        }
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => {
            let rgb: Vec<u16> = bytes_to_u16(bytes).into_iter().flat_map(|g| [g, g, g]).collect();
            (3, PixelData::U16(rgb))
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Sixteen) => {
            let rgba: Vec<u16> = bytes_to_u16(bytes)
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect();
            (4, PixelData::U16(rgba))
        }
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    Ok(ImageData {
        width,
        height,
        channels,
        data,
    })
}

/// Writes an image to a PNG file.
///
/// Converts to 8-bit if necessary. Alpha is written untouched.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    encode_to(BufWriter::new(file), image)
}

/// Encodes an image to PNG bytes in memory.
pub fn encode(image: &ImageData) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    encode_to(&mut out, image)?;
    Ok(out)
}

fn encode_to<W: Write>(writer: W, image: &ImageData) -> IoResult<()> {
    let color_type = match image.channels {
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
    };

    let mut encoder = png::Encoder::new(writer, image.width, image.height);
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    let u8_data = image.to_u8();
    png_writer
        .write_image_data(&u8_data)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

/// Converts big-endian byte slice to u16 vector.
fn bytes_to_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
        .collect()
}
