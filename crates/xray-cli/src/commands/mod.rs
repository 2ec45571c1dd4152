//! CLI command implementations

pub mod generate;
pub mod info;
pub mod preview;

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tracing::debug;
use xray_core::{RgbaBuffer, SourceImage};
use xray_io::GeneratedImage;

/// Replaces a core error with the generic message for its kind.
///
/// The detailed error is still logged at debug level.
pub fn user_facing(err: xray_core::Error) -> anyhow::Error {
    debug!(error = %err, "operation failed");
    anyhow!(err.kind().user_message())
}

/// Load a source image from path
pub fn load_source(path: &Path) -> Result<SourceImage> {
    xray_io::read_source(path)
        .map_err(user_facing)
        .with_context(|| format!("Failed to load: {}", path.display()))
}

/// Load a generated banner (or any image) as an RGBA buffer
pub fn load_rgba(path: &Path) -> Result<RgbaBuffer> {
    xray_io::read(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?
        .to_rgba_buffer()
        .map_err(user_facing)
        .with_context(|| format!("Failed to load: {}", path.display()))
}

/// Encode and save an RGBA buffer as PNG
pub fn save_png(path: &Path, buffer: &RgbaBuffer) -> Result<GeneratedImage> {
    let image = GeneratedImage::encode(buffer)
        .with_context(|| format!("Failed to encode: {}", path.display()))?;
    image
        .write(path)
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    Ok(image)
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_user_facing_hides_details() {
        let err = user_facing(xray_core::Error::invalid_dimensions(0, 5, "secret detail"));
        assert!(!err.to_string().contains("secret"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_source(Path::new("/nonexistent/light.png")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load"));
    }
}
