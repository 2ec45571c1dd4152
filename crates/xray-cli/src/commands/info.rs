//! Image info command.
//!
//! Reports dimensions and the alpha range, which tells whether an exported
//! banner keeps every pixel translucent (alpha strictly inside 0..255).

use crate::InfoArgs;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use xray_io::{Format, ImageData};

/// Alpha statistics of one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlphaSummary {
    /// Smallest alpha byte.
    pub min: u8,
    /// Largest alpha byte.
    pub max: u8,
    /// Pixels with alpha 0.
    pub transparent: usize,
    /// Pixels with alpha 255.
    pub opaque: usize,
}

impl AlphaSummary {
    /// Whether no pixel is fully transparent or fully opaque.
    pub fn is_translucent(&self) -> bool {
        self.transparent == 0 && self.opaque == 0
    }
}

/// Everything `info` prints for one file.
#[derive(Debug, Clone, Serialize)]
struct ImageReport {
    file: String,
    format: String,
    width: u32,
    height: u32,
    channels: u32,
    size_bytes: u64,
    alpha: AlphaSummary,
    translucent: bool,
}

/// Computes alpha statistics; images without alpha count as opaque.
pub fn alpha_summary(image: &ImageData) -> AlphaSummary {
    if image.channels != 4 {
        return AlphaSummary {
            min: 255,
            max: 255,
            transparent: 0,
            opaque: image.pixel_count(),
        };
    }

    let data = image.to_u8();
    let mut summary = AlphaSummary {
        min: u8::MAX,
        max: u8::MIN,
        transparent: 0,
        opaque: 0,
    };
    for px in data.chunks_exact(4) {
        let a = px[3];
        summary.min = summary.min.min(a);
        summary.max = summary.max.max(a);
        match a {
            0 => summary.transparent += 1,
            255 => summary.opaque += 1,
            _ => {}
        }
    }
    summary
}

fn report(path: &Path) -> Result<ImageReport> {
    let size_bytes = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat: {}", path.display()))?
        .len();
    let format = Format::detect(path).unwrap_or(Format::Unknown);
    let image = xray_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    let alpha = alpha_summary(&image);

    Ok(ImageReport {
        file: path.display().to_string(),
        format: format!("{format:?}"),
        width: image.width,
        height: image.height,
        channels: image.channels,
        size_bytes,
        translucent: alpha.is_translucent(),
        alpha,
    })
}

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    let reports = args
        .input
        .iter()
        .map(|p| report(p))
        .collect::<Result<Vec<_>>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for (i, r) in reports.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_text(r, verbose);
    }
    Ok(())
}

/// Prints one report in human-readable form.
fn print_text(r: &ImageReport, verbose: bool) {
    println!("{}", r.file);
    println!("  Resolution: {}x{}", r.width, r.height);
    println!("  Channels:   {}", r.channels);
    println!("  File size:  {}", super::format_size(r.size_bytes));
    println!("  Alpha:      {}..{}", r.alpha.min, r.alpha.max);
    println!(
        "  Translucent: {}",
        if r.translucent { "yes" } else { "no" }
    );
    if verbose {
        println!("  Format:     {}", r.format);
        println!("  Alpha 0:    {}", r.alpha.transparent);
        println!("  Alpha 255:  {}", r.alpha.opaque);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rgba() {
        let img = ImageData::from_u8(3, 1, 4, vec![0, 0, 0, 1, 0, 0, 0, 254, 0, 0, 0, 128]);
        let s = alpha_summary(&img);
        assert_eq!((s.min, s.max, s.transparent, s.opaque), (1, 254, 0, 0));
        assert!(s.is_translucent());
    }

    #[test]
    fn test_summary_extremes() {
        let img = ImageData::from_u8(2, 1, 4, vec![0, 0, 0, 0, 9, 9, 9, 255]);
        let s = alpha_summary(&img);
        assert_eq!((s.transparent, s.opaque), (1, 1));
        assert!(!s.is_translucent());
    }

    #[test]
    fn test_summary_rgb_is_opaque() {
        let img = ImageData::from_u8(2, 2, 3, vec![7; 12]);
        let s = alpha_summary(&img);
        assert_eq!(s.opaque, 4);
        assert!(!s.is_translucent());
    }

    #[test]
    fn test_report_json_shape() {
        let s = AlphaSummary { min: 1, max: 254, transparent: 0, opaque: 0 };
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["min"], 1);
        assert_eq!(json["max"], 254);
    }
}
