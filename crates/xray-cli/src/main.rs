//! xray - dual-theme banner generator
//!
//! Builds one banner that reads as the light image on white pages and as
//! the dark image on black pages.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "xray")]
#[command(author, version, about = "Dual-theme banner generator")]
#[command(long_about = "
Synthesizes a single banner with an alpha channel that shows one image on a
light page and another on a dark page. Every alpha value stays inside
[1, 254] so platforms keep the upload lossless.

Examples:
  xray generate light.png dark.jpg                 # 1500x500 x-ray-header.png
  xray generate light.png dark.png -m scanlines --preserve-color
  xray generate light.png dark.png -c banner.yaml -o out.png
  xray preview x-ray-header.png --safe-zones       # one PNG per theme
  xray info x-ray-header.png --json                # alpha range check
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a dual-theme banner from a light and a dark image
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Render a banner over light, dim and dark page colors
    #[command(visible_alias = "p")]
    Preview(PreviewArgs),

    /// Show dimensions and alpha range of images
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Image shown on light pages
    light: PathBuf,

    /// Image shown on dark pages
    dark: PathBuf,

    /// Output PNG
    #[arg(short, long, default_value = "x-ray-header.png")]
    output: PathBuf,

    /// YAML job config; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Blend mode: blended, scanlines, interlaced
    #[arg(short, long)]
    mode: Option<String>,

    /// Output width
    #[arg(short, long)]
    width: Option<u32>,

    /// Output height
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Resampling filter: nearest, bilinear, bicubic, lanczos3
    #[arg(short, long)]
    filter: Option<String>,

    /// Blended mode: do not raise light channels to the dark ones
    #[arg(long)]
    no_normalize: bool,

    /// Pattern modes: keep hue instead of grayscale slots
    #[arg(long)]
    preserve_color: bool,

    /// Brightness offset (accepted, not applied)
    #[arg(long, allow_hyphen_values = true)]
    brightness: Option<f64>,

    /// Also print the banner as a data URL
    #[arg(long)]
    data_url: bool,
}

#[derive(Args)]
struct PreviewArgs {
    /// Generated banner
    input: PathBuf,

    /// Output directory (defaults to the banner's directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Themes to render: light, dim, dark (default: all)
    #[arg(short, long, value_delimiter = ',')]
    theme: Vec<String>,

    /// Mark crop and avatar zones
    #[arg(short, long)]
    safe_zones: bool,
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let verbose = cli.verbose > 0;
    match cli.command {
        Commands::Generate(args) => commands::generate::run(args, verbose),
        Commands::Preview(args) => commands::preview::run(args, verbose),
        Commands::Info(args) => commands::info::run(args, verbose),
    }
}
