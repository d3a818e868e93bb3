use std::time::Duration;

use ndarray::Array3;
use serde::Serialize;
use tracing::info;

use crate::consts::{COLOR_CHANNEL_COUNT, FULL_TURN_DEG, SEAM_SCORE_STEEPNESS};
use crate::normalize::CoverageReport;
use crate::pipeline::config::ProjectionConfig;
use crate::project::canvas_column;

/// Blend quality of one seam between two adjacent frames.
/// 1.0 is an invisible seam.
#[derive(Clone, Debug, Serialize)]
pub struct SeamScore {
    pub left_angle_deg: f64,
    pub right_angle_deg: f64,
    pub score: f64,
}

/// Serializable statistics record for one stitch run.
#[derive(Clone, Debug, Serialize)]
pub struct StitchStats {
    /// Percentage of the covered span with nonzero weight.
    pub coverage_percent: f64,
    /// Hole pixels counted before repair.
    pub hole_count: usize,
    pub hole_fraction: f64,
    pub frames_used: usize,
    pub seam_scores: Vec<SeamScore>,
    /// Mean of the per-seam scores; 1.0 when there was nothing to blend.
    pub mean_seam_score: f64,
    pub canvas_width: usize,
    pub canvas_height: usize,
    pub crop_start_col: usize,
    pub crop_width: usize,
    pub elapsed_ms: u64,
}

/// Final composed panorama plus its statistics record.
#[derive(Clone, Debug)]
pub struct StitchResult {
    /// Cropped 8-bit RGB panorama, shape = (height, width, 3)
    pub image: Array3<u8>,
    pub stats: StitchStats,
}

/// Crop the normalized canvas to the covered column range, convert to 8-bit,
/// and assemble the result record. Reads its inputs without mutating them,
/// so finalizing the same canvas twice yields bit-identical output.
pub fn finalize(
    normalized: &Array3<f32>,
    report: &CoverageReport,
    angles: &[f64],
    config: &ProjectionConfig,
    elapsed: Duration,
) -> StitchResult {
    let (height, width, _) = normalized.dim();
    let crop = report.crop;

    let mut image = Array3::<u8>::zeros((height, crop.width, COLOR_CHANNEL_COUNT));
    for row in 0..height {
        for out_col in 0..crop.width {
            let src_col = (crop.start + out_col) % width;
            for channel in 0..COLOR_CHANNEL_COUNT {
                let value = normalized[[row, src_col, channel]].clamp(0.0, 1.0);
                image[[row, out_col, channel]] = (value * 255.0).round() as u8;
            }
        }
    }

    let seam_scores = score_seams(normalized, report, angles, config);
    let mean_seam_score = if seam_scores.is_empty() {
        1.0
    } else {
        seam_scores.iter().map(|s| s.score).sum::<f64>() / seam_scores.len() as f64
    };

    let coverage_percent = if report.span_pixels > 0 {
        100.0 * (report.span_pixels - report.hole_count) as f64 / report.span_pixels as f64
    } else {
        0.0
    };

    let stats = StitchStats {
        coverage_percent,
        hole_count: report.hole_count,
        hole_fraction: report.hole_fraction,
        frames_used: angles.len(),
        seam_scores,
        mean_seam_score,
        canvas_width: width,
        canvas_height: height,
        crop_start_col: crop.start,
        crop_width: crop.width,
        elapsed_ms: elapsed.as_millis() as u64,
    };

    info!(
        coverage = stats.coverage_percent,
        holes = stats.hole_count,
        seam_score = stats.mean_seam_score,
        elapsed_ms = stats.elapsed_ms,
        "Stitch finalized"
    );

    StitchResult { image, stats }
}

/// Score each seam between adjacent overlapping frames: the mean absolute
/// color step across the seam column, mapped through `1 / (1 + k * delta)`.
fn score_seams(
    normalized: &Array3<f32>,
    report: &CoverageReport,
    angles: &[f64],
    config: &ProjectionConfig,
) -> Vec<SeamScore> {
    let (_, width, _) = normalized.dim();
    let (row_start, row_end) = report.row_range;
    if angles.len() < 2 || row_end <= row_start {
        return Vec::new();
    }

    let mut scores = Vec::new();
    for i in 0..angles.len() {
        let left = angles[i];
        let right = angles[(i + 1) % angles.len()];
        let gap = (right - left).rem_euclid(FULL_TURN_DEG);
        // Only adjacent frames whose slices overlap form a seam.
        if gap <= 0.0 || gap >= config.hfov_deg {
            continue;
        }
        let seam_col = canvas_column(left + gap / 2.0, width);
        let next_col = (seam_col + 1) % width;

        let mut delta = 0.0f64;
        let rows = row_end - row_start;
        for row in row_start..row_end {
            for channel in 0..COLOR_CHANNEL_COUNT {
                delta += (normalized[[row, seam_col, channel]]
                    - normalized[[row, next_col, channel]])
                    .abs() as f64;
            }
        }
        delta /= (rows * COLOR_CHANNEL_COUNT) as f64;

        scores.push(SeamScore {
            left_angle_deg: left,
            right_angle_deg: right,
            score: 1.0 / (1.0 + SEAM_SCORE_STEEPNESS * delta),
        });
    }
    scores
}
