//! Banner generation command.
//!
//! Options come from, in increasing priority: defaults, `--config` file,
//! command-line flags.

use crate::config::GenerateConfig;
use crate::GenerateArgs;
use anyhow::{Context, Result};
use tracing::{debug, info};
use xray_core::GenerationMode;
use xray_ops::{Compositor, Filter};

/// Applies command-line overrides on top of a loaded config.
fn resolve(args: &GenerateArgs) -> Result<(xray_core::ProcessOptions, Filter)> {
    let config = match &args.config {
        Some(path) => GenerateConfig::from_file(path)?,
        None => GenerateConfig::default(),
    };
    let mut filter = config.filter()?;
    let mut options = config.options;

    if let Some(mode) = &args.mode {
        options.mode = mode.parse::<GenerationMode>()?;
    }
    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(height) = args.height {
        options.height = height;
    }
    if let Some(name) = &args.filter {
        filter = name.parse::<Filter>()?;
    }
    if args.no_normalize {
        options.normalize = false;
    }
    if args.preserve_color {
        options.preserve_color = true;
    }
    if let Some(brightness) = args.brightness {
        options.brightness = brightness;
    }

    Ok((options, filter))
}

/// Runs the generate command.
pub fn run(args: GenerateArgs, verbose: bool) -> Result<()> {
    let (options, filter) = resolve(&args)?;
    debug!(?options, %filter, "resolved options");

    let light = super::load_source(&args.light)?;
    let dark = super::load_source(&args.dark)?;

    let job = Compositor::new(options)
        .map_err(super::user_facing)
        .context("Invalid generation settings")?
        .with_filter(filter);
    let banner = job
        .generate(&light, &dark)
        .map_err(super::user_facing)
        .context("Failed to generate banner")?;

    let image = super::save_png(&args.output, &banner)?;
    info!(path = %args.output.display(), "banner written");

    if verbose {
        let opts = job.options();
        println!(
            "{} + {} -> {} ({}x{}, {}, {})",
            args.light.display(),
            args.dark.display(),
            args.output.display(),
            image.width(),
            image.height(),
            opts.mode,
            super::format_size(image.png_bytes().len() as u64),
        );
    }

    if args.data_url {
        println!("{}", image.to_data_url());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> GenerateArgs {
        GenerateArgs {
            light: PathBuf::from("light.png"),
            dark: PathBuf::from("dark.png"),
            output: PathBuf::from("out.png"),
            config: None,
            mode: None,
            width: None,
            height: None,
            filter: None,
            no_normalize: false,
            preserve_color: false,
            brightness: None,
            data_url: false,
        }
    }

    #[test]
    fn test_defaults() {
        let (options, filter) = resolve(&args()).unwrap();
        assert_eq!(options, xray_core::ProcessOptions::banner());
        assert_eq!(filter, Filter::Bilinear);
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.yaml");
        std::fs::write(&path, "mode: interlaced\nwidth: 300\nfilter: nearest\n").unwrap();

        let mut a = args();
        a.config = Some(path);
        a.mode = Some("scanlines".into());
        a.no_normalize = true;
        let (options, filter) = resolve(&a).unwrap();
        assert_eq!(options.mode, GenerationMode::Scanlines);
        assert_eq!(options.width, 300);
        assert!(!options.normalize);
        assert_eq!(filter, Filter::Nearest);
    }

    #[test]
    fn test_bad_mode() {
        let mut a = args();
        a.mode = Some("stripes".into());
        assert!(resolve(&a).is_err());
    }
}
