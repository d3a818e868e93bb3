use ndarray::{Array2, Array3};
use rayon::prelude::*;
use tracing::debug;

use crate::consts::{COLOR_CHANNEL_COUNT, PARALLEL_FRAME_THRESHOLD};
use crate::error::Result;
use crate::exposure::exposure_gains;
use crate::frame::CapturedFrame;
use crate::pipeline::config::ProjectionConfig;
use crate::pipeline::{ProgressReporter, StitchStage};
use crate::project::project_frame;

/// Accumulation buffers for one stitch run: weighted color sums and a
/// parallel weight map. Created once, never resized, horizontally circular.
pub struct PanoramaCanvas {
    /// Accumulated weighted color, shape = (height, width, 3)
    pub color: Array3<f32>,
    /// Accumulated weight mass, shape = (height, width)
    pub weight: Array2<f32>,
}

impl PanoramaCanvas {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            color: Array3::zeros((height, width, COLOR_CHANNEL_COUNT)),
            weight: Array2::zeros((height, width)),
        }
    }

    pub fn width(&self) -> usize {
        self.weight.ncols()
    }

    pub fn height(&self) -> usize {
        self.weight.nrows()
    }

    /// Merge another accumulator into this one (for parallel frame
    /// processing). Accumulation is commutative, so merge order does not
    /// affect the result.
    pub fn merge(&mut self, other: &PanoramaCanvas) {
        self.color += &other.color;
        self.weight += &other.weight;
    }
}

/// Project all frames and accumulate them into a single canvas.
///
/// Frames must already be ordered (the first frame is the exposure
/// reference). Above [`PARALLEL_FRAME_THRESHOLD`] frames, each frame gets a
/// private accumulator and the buffers are merged serially afterwards; the
/// merge cost is O(canvas size), not O(frame count), and no lock is taken
/// on a shared buffer.
pub fn accumulate(
    frames: &[CapturedFrame],
    config: &ProjectionConfig,
    reporter: &dyn ProgressReporter,
) -> Result<PanoramaCanvas> {
    let height = frames[0].height();
    let width = config.canvas_width(frames[0].width())?;
    debug!(canvas_w = width, canvas_h = height, "Allocating canvas");

    let gains = exposure_gains(frames, config.exposure_normalize);

    reporter.begin_stage(StitchStage::Project, Some(frames.len()));
    let canvas = if frames.len() >= PARALLEL_FRAME_THRESHOLD {
        let accumulators: Vec<PanoramaCanvas> = frames
            .par_iter()
            .zip(gains.par_iter())
            .map(|(frame, &gain)| {
                let mut acc = PanoramaCanvas::new(height, width);
                project_frame(frame, gain, config, &mut acc);
                acc
            })
            .collect();
        reporter.finish_stage();

        reporter.begin_stage(StitchStage::Accumulate, Some(accumulators.len()));
        let mut merged = PanoramaCanvas::new(height, width);
        for (done, acc) in accumulators.iter().enumerate() {
            merged.merge(acc);
            reporter.advance(done + 1);
        }
        merged
    } else {
        let mut acc = PanoramaCanvas::new(height, width);
        for (done, (frame, &gain)) in frames.iter().zip(gains.iter()).enumerate() {
            project_frame(frame, gain, config, &mut acc);
            reporter.advance(done + 1);
        }
        reporter.finish_stage();
        reporter.begin_stage(StitchStage::Accumulate, None);
        acc
    };
    reporter.finish_stage();

    Ok(canvas)
}
