use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::finalize::StitchResult;
use crate::frame::CapturedFrame;
use crate::stitcher::make_stitcher;

use super::config::StitchConfig;
use super::types::{NoOpReporter, ProgressReporter};

/// Run the full stitch pipeline with a thread-safe progress reporter.
pub fn run_stitch_reported(
    frames: Vec<CapturedFrame>,
    config: &StitchConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<StitchResult> {
    config.projection.validate()?;

    let stitcher = make_stitcher(&config.strategy);
    info!(
        strategy = %config.strategy,
        frames = frames.len(),
        hfov_deg = config.projection.hfov_deg,
        "Starting stitch run"
    );
    stitcher.stitch(frames, &config.projection, reporter.as_ref())
}

/// Run the full stitch pipeline without progress feedback.
pub fn run_stitch(frames: Vec<CapturedFrame>, config: &StitchConfig) -> Result<StitchResult> {
    run_stitch_reported(frames, config, Arc::new(NoOpReporter))
}
