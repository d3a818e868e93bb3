use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pano_core::io::scan_dir;
use pano_core::normalize::covered_columns;

/// Column count used to estimate angular coverage.
const COVERAGE_SAMPLES: usize = 3600;

#[derive(Args)]
pub struct InfoArgs {
    /// Capture directory
    pub dir: PathBuf,

    /// Horizontal field of view used for the coverage estimate, degrees
    #[arg(long, default_value = "54.0")]
    pub fov: f64,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let entries = scan_dir(&args.dir)?;

    println!("Directory:   {}", args.dir.display());
    println!("Frames:      {}", entries.len());

    if entries.is_empty() {
        return Ok(());
    }

    if let Some((first, _)) = entries.first() {
        let (w, h) = image::image_dimensions(first)?;
        println!("Dimensions:  {}x{}", w, h);
    }

    let angles: Vec<f64> = entries.iter().map(|(_, a)| *a).collect();
    println!(
        "Angle range: {:.1}\u{b0} to {:.1}\u{b0}",
        angles[0],
        angles[angles.len() - 1]
    );

    let mut max_gap = 0.0f64;
    for pair in angles.windows(2) {
        max_gap = max_gap.max(pair[1] - pair[0]);
    }
    max_gap = max_gap.max(angles[0] + 360.0 - angles[angles.len() - 1]);
    println!("Widest gap:  {:.1}\u{b0}", max_gap);

    let covered = covered_columns(&angles, args.fov, COVERAGE_SAMPLES);
    let percent =
        100.0 * covered.iter().filter(|&&c| c).count() as f64 / COVERAGE_SAMPLES as f64;
    println!("Coverage:    {:.1}% at {}\u{b0} FOV", percent, args.fov);

    Ok(())
}
