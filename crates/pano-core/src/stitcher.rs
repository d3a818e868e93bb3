use std::time::Instant;

use crate::canvas::accumulate;
use crate::error::Result;
use crate::finalize::{finalize, StitchResult};
use crate::frame::CapturedFrame;
use crate::ingest::order_frames;
use crate::normalize::normalize;
use crate::pipeline::config::{ProjectionConfig, StitchStrategy};
use crate::pipeline::{ProgressReporter, StitchStage};

/// Capability interface for panorama stitching strategies.
///
/// The angle-driven compositor is the one strategy designed here;
/// feature-matching alternatives implement the same contract and are
/// selected through [`StitchStrategy`].
pub trait Stitcher: Send + Sync {
    fn name(&self) -> &'static str;

    fn stitch(
        &self,
        frames: Vec<CapturedFrame>,
        config: &ProjectionConfig,
        reporter: &dyn ProgressReporter,
    ) -> Result<StitchResult>;
}

/// Angle-driven compositor: places frames by their known capture angles on
/// a cylindrical canvas, no feature matching involved.
pub struct AngleStitcher;

impl Stitcher for AngleStitcher {
    fn name(&self) -> &'static str {
        "angle"
    }

    fn stitch(
        &self,
        frames: Vec<CapturedFrame>,
        config: &ProjectionConfig,
        reporter: &dyn ProgressReporter,
    ) -> Result<StitchResult> {
        let start = Instant::now();

        reporter.begin_stage(StitchStage::Ingest, Some(frames.len()));
        let frames = order_frames(frames)?;
        let angles: Vec<f64> = frames.iter().map(|f| f.angle_deg).collect();
        reporter.finish_stage();

        let canvas = accumulate(&frames, config, reporter)?;
        // Frames are no longer needed; the canvas holds everything.
        drop(frames);

        reporter.begin_stage(StitchStage::Normalize, None);
        let (normalized, report) = normalize(&canvas, &angles, config)?;
        drop(canvas);
        reporter.finish_stage();

        reporter.begin_stage(StitchStage::Finalize, None);
        let result = finalize(&normalized, &report, &angles, config, start.elapsed());
        reporter.finish_stage();

        Ok(result)
    }
}

/// Select the stitcher implementation for a configured strategy.
pub fn make_stitcher(strategy: &StitchStrategy) -> Box<dyn Stitcher> {
    match strategy {
        StitchStrategy::Angle => Box::new(AngleStitcher),
    }
}
