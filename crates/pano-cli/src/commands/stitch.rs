use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use pano_core::io::{load_frames_from_dir, save_panorama};
use pano_core::pipeline::config::{CanvasSizing, ProjectionConfig, StitchConfig, StitchStrategy};
use pano_core::pipeline::run_stitch_reported;

use crate::progress::CliReporter;
use crate::summary;

#[derive(Args)]
pub struct StitchArgs {
    /// Capture directory (frames named like angle_045.jpg)
    pub dir: PathBuf,

    /// Horizontal field of view per frame, degrees
    #[arg(long, default_value = "54.0")]
    pub fov: f64,

    /// Canvas width in pixels for the full turn (default: native resolution)
    #[arg(long)]
    pub canvas_width: Option<usize>,

    /// Canvas resolution in pixels per degree (alternative to --canvas-width)
    #[arg(long, conflicts_with = "canvas_width")]
    pub pixels_per_degree: Option<f64>,

    /// Feather ramp width in pixels (default: full triangular feather)
    #[arg(long)]
    pub blend_width: Option<usize>,

    /// Vertical shift applied to every frame, pixels
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub vertical_offset: i64,

    /// Equalize per-frame brightness against the first frame
    #[arg(long)]
    pub exposure_normalize: bool,

    /// Maximum tolerated hole fraction within the covered span
    #[arg(long, default_value = "0.05")]
    pub max_hole_fraction: f64,

    /// TOML config file; overrides the flags above
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the stitch statistics as JSON
    #[arg(long)]
    pub stats: Option<PathBuf>,

    /// Output image path (PNG or TIFF by extension)
    #[arg(short, long, default_value = "panorama.png")]
    pub output: PathBuf,
}

fn build_config(args: &StitchArgs) -> Result<StitchConfig> {
    if let Some(ref path) = args.config {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        return toml::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()));
    }

    let sizing = match (args.canvas_width, args.pixels_per_degree) {
        (Some(px), _) => CanvasSizing::WidthPx(px),
        (None, Some(ppd)) => CanvasSizing::PixelsPerDegree(ppd),
        (None, None) => CanvasSizing::Native,
    };

    Ok(StitchConfig {
        strategy: StitchStrategy::Angle,
        projection: ProjectionConfig {
            hfov_deg: args.fov,
            sizing,
            blend_width_px: args.blend_width,
            vertical_offset_px: args.vertical_offset,
            exposure_normalize: args.exposure_normalize,
            max_hole_fraction: args.max_hole_fraction,
        },
    })
}

pub fn run(args: &StitchArgs) -> Result<()> {
    let config = build_config(args)?;
    summary::print_stitch_summary(&config, &args.dir, &args.output);

    let frames = load_frames_from_dir(&args.dir)?;
    if frames.is_empty() {
        bail!("No usable frames in {}", args.dir.display());
    }
    tracing::debug!(frames = frames.len(), "Capture directory loaded");
    println!("Loaded {} frames", frames.len());

    let result = run_stitch_reported(frames, &config, Arc::new(CliReporter::new()))?;

    save_panorama(&result, &args.output)?;
    if let Some(ref stats_path) = args.stats {
        let json = serde_json::to_string_pretty(&result.stats)?;
        std::fs::write(stats_path, json)
            .with_context(|| format!("Failed to write stats to {}", stats_path.display()))?;
    }

    summary::print_result_summary(&result.stats);
    println!("Saved to {}", args.output.display());
    Ok(())
}
