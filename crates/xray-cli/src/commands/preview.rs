//! Theme preview command.
//!
//! Writes `<stem>-<theme>.png` for each requested theme.

use crate::PreviewArgs;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;
use xray_ops::{overlay_safe_zones, preview, PreviewTheme, BANNER_SAFE_ZONES};

/// Parses `--theme` values; empty means all themes.
fn themes(names: &[String]) -> Result<Vec<PreviewTheme>> {
    if names.is_empty() {
        return Ok(PreviewTheme::ALL.to_vec());
    }
    names
        .iter()
        .map(|n| n.parse::<PreviewTheme>().map_err(anyhow::Error::from))
        .collect()
}

/// Output path for one theme.
fn output_path(input: &Path, dir: Option<&Path>, theme: PreviewTheme) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("banner");
    let dir = dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{stem}-{theme}.png"))
}

/// Runs the preview command.
pub fn run(args: PreviewArgs, verbose: bool) -> Result<()> {
    let themes = themes(&args.theme)?;
    let banner = super::load_rgba(&args.input)?;

    if let Some(dir) = &args.output {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create: {}", dir.display()))?;
    }

    for theme in themes {
        let mut shown = preview(&banner, theme).map_err(super::user_facing)?;
        if args.safe_zones {
            overlay_safe_zones(&mut shown, &BANNER_SAFE_ZONES);
        }

        let path = output_path(&args.input, args.output.as_deref(), theme);
        super::save_png(&path, &shown)?;
        info!(%theme, path = %path.display(), "preview written");

        if verbose {
            println!("{} -> {}", theme, path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_selection() {
        assert_eq!(themes(&[]).unwrap().len(), 3);
        let picked = themes(&["dim".into(), "light".into()]).unwrap();
        assert_eq!(picked, vec![PreviewTheme::Dim, PreviewTheme::Light]);
        assert!(themes(&["sepia".into()]).is_err());
    }

    #[test]
    fn test_output_path() {
        let p = output_path(Path::new("out/x-ray-header.png"), None, PreviewTheme::Dark);
        assert_eq!(p, PathBuf::from("out/x-ray-header-dark.png"));
        let p = output_path(Path::new("banner.png"), Some(Path::new("prev")), PreviewTheme::Dim);
        assert_eq!(p, PathBuf::from("prev/banner-dim.png"));
    }
}
