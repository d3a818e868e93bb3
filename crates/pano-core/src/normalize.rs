use ndarray::Array3;
use tracing::{info, warn};

use crate::canvas::PanoramaCanvas;
use crate::consts::{COLOR_CHANNEL_COUNT, FULL_TURN_DEG, WEIGHT_EPSILON};
use crate::error::{Result, StitchError};
use crate::pipeline::config::ProjectionConfig;

/// Contiguous covered column range, circular: `start + width` may wrap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropSpan {
    pub start: usize,
    pub width: usize,
}

/// Coverage accounting produced alongside the normalized canvas.
#[derive(Clone, Debug)]
pub struct CoverageReport {
    /// Zero-weight pixels inside the covered span, counted before filling.
    pub hole_count: usize,
    pub hole_fraction: f64,
    /// Total pixels inside the covered span (columns x covered rows).
    pub span_pixels: usize,
    /// Per-column membership in the covered angular span.
    pub covered_columns: Vec<bool>,
    pub crop: CropSpan,
    /// Row range reached by frames after the vertical offset, half-open.
    pub row_range: (usize, usize),
}

/// Circular angular distance between two angles in degrees.
fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(FULL_TURN_DEG);
    d.min(FULL_TURN_DEG - d)
}

/// Columns inside the frames' combined angular span.
///
/// A column is covered when it falls inside some frame's `hfov`-wide arc.
/// Uncovered gaps no wider than one frame are closed afterwards: a missing
/// or dropped frame leaves such a gap, and its pixels must count as holes
/// rather than silently shrinking the span. Wider gaps mean the scan never
/// pointed there (partial scan) and stay outside the span.
pub fn covered_columns(angles: &[f64], hfov_deg: f64, canvas_width: usize) -> Vec<bool> {
    let mut covered = vec![false; canvas_width];
    let half_fov = hfov_deg / 2.0;
    for (col, flag) in covered.iter_mut().enumerate() {
        // Multiply before dividing so exact arc boundaries stay exact.
        let col_angle = col as f64 * FULL_TURN_DEG / canvas_width as f64;
        if angles
            .iter()
            .any(|&a| angular_distance(col_angle, a) <= half_fov)
        {
            *flag = true;
        }
    }

    close_small_gaps(&mut covered, hfov_deg, canvas_width);
    covered
}

fn close_small_gaps(covered: &mut [bool], hfov_deg: f64, canvas_width: usize) {
    let degrees_per_col = FULL_TURN_DEG / canvas_width as f64;
    let max_gap_cols = (hfov_deg / degrees_per_col).round() as usize;

    let runs = uncovered_runs(covered);
    for (start, len) in runs {
        if len <= max_gap_cols && len < canvas_width {
            for i in 0..len {
                covered[(start + i) % canvas_width] = true;
            }
        }
    }
}

/// Maximal runs of uncovered columns, treating the axis as circular.
/// Returns (start, length) pairs.
fn uncovered_runs(covered: &[bool]) -> Vec<(usize, usize)> {
    let n = covered.len();
    if covered.iter().all(|&c| c) {
        return Vec::new();
    }
    if covered.iter().all(|&c| !c) {
        return vec![(0, n)];
    }

    // Start scanning from a covered column so no run is split by the wrap.
    let origin = covered
        .iter()
        .position(|&c| c)
        .unwrap_or(0);
    let mut runs = Vec::new();
    let mut run_start: Option<usize> = None;
    for step in 0..n {
        let idx = (origin + step) % n;
        if covered[idx] {
            if let Some(start) = run_start.take() {
                let len = (idx + n - start) % n;
                runs.push((start, len));
            }
        } else if run_start.is_none() {
            run_start = Some(idx);
        }
    }
    if let Some(start) = run_start {
        let len = (origin + n - start) % n;
        runs.push((start, len));
    }
    runs
}

/// Bounding covered range: the complement of the widest uncovered run.
fn crop_span(covered: &[bool]) -> CropSpan {
    let n = covered.len();
    let runs = uncovered_runs(covered);
    match runs.iter().max_by_key(|(_, len)| *len) {
        None => CropSpan { start: 0, width: n },
        Some(&(gap_start, gap_len)) => CropSpan {
            start: (gap_start + gap_len) % n,
            width: n - gap_len,
        },
    }
}

/// Rows reached by frame pixels after the vertical offset, half-open.
pub fn covered_rows(canvas_height: usize, vertical_offset_px: i64) -> (usize, usize) {
    let h = canvas_height as i64;
    let start = vertical_offset_px.max(0).min(h);
    let end = (h + vertical_offset_px).clamp(0, h);
    (start as usize, end.max(start) as usize)
}

/// Divide accumulated color by accumulated weight, classify and repair
/// coverage holes.
///
/// The canvas is read-only here; repeated normalization of the same
/// accumulated canvas yields bit-identical output. Fails with
/// [`StitchError::InsufficientCoverage`] when the hole fraction inside the
/// covered span exceeds the configured maximum.
pub fn normalize(
    canvas: &PanoramaCanvas,
    angles: &[f64],
    config: &ProjectionConfig,
) -> Result<(Array3<f32>, CoverageReport)> {
    let (height, width) = (canvas.height(), canvas.width());
    let covered = covered_columns(angles, config.hfov_deg, width);
    let (row_start, row_end) = covered_rows(height, config.vertical_offset_px);

    let mut output = Array3::<f32>::zeros((height, width, COLOR_CHANNEL_COUNT));
    for row in 0..height {
        for col in 0..width {
            let w = canvas.weight[[row, col]];
            if w > WEIGHT_EPSILON {
                for channel in 0..COLOR_CHANNEL_COUNT {
                    output[[row, col, channel]] = canvas.color[[row, col, channel]] / w;
                }
            }
        }
    }

    // Count holes before repairing them.
    let mut hole_count = 0usize;
    for row in row_start..row_end {
        for (col, &is_covered) in covered.iter().enumerate() {
            if is_covered && canvas.weight[[row, col]] <= WEIGHT_EPSILON {
                hole_count += 1;
            }
        }
    }

    let covered_col_count = covered.iter().filter(|&&c| c).count();
    let span_pixels = covered_col_count * (row_end - row_start);
    let hole_fraction = if span_pixels > 0 {
        hole_count as f64 / span_pixels as f64
    } else {
        0.0
    };

    if hole_fraction > config.max_hole_fraction {
        return Err(StitchError::InsufficientCoverage {
            hole_fraction,
            max_hole_fraction: config.max_hole_fraction,
            hole_count,
        });
    }
    if hole_count > 0 {
        warn!(
            hole_count,
            hole_fraction, "Coverage holes detected, repairing"
        );
        fill_holes(canvas, &covered, (row_start, row_end), &mut output);
    }

    let crop = crop_span(&covered);
    info!(
        covered_columns = covered_col_count,
        hole_count,
        crop_start = crop.start,
        crop_width = crop.width,
        "Canvas normalized"
    );

    Ok((
        output,
        CoverageReport {
            hole_count,
            hole_fraction,
            span_pixels,
            covered_columns: covered,
            crop,
            row_range: (row_start, row_end),
        },
    ))
}

/// Repair holes by nearest-valid-neighbor search along the (circular) row.
/// When both directions hit valid pixels at the same distance, the two are
/// averaged.
fn fill_holes(
    canvas: &PanoramaCanvas,
    covered: &[bool],
    row_range: (usize, usize),
    output: &mut Array3<f32>,
) {
    let width = canvas.width();
    for row in row_range.0..row_range.1 {
        for (col, &is_covered) in covered.iter().enumerate() {
            if !is_covered || canvas.weight[[row, col]] > WEIGHT_EPSILON {
                continue;
            }
            for dist in 1..=width / 2 {
                let left = (col + width - dist) % width;
                let right = (col + dist) % width;
                let left_ok = canvas.weight[[row, left]] > WEIGHT_EPSILON;
                let right_ok = canvas.weight[[row, right]] > WEIGHT_EPSILON;
                if !left_ok && !right_ok {
                    continue;
                }
                for channel in 0..COLOR_CHANNEL_COUNT {
                    let value = match (left_ok, right_ok) {
                        (true, true) => {
                            (output[[row, left, channel]] + output[[row, right, channel]]) / 2.0
                        }
                        (true, false) => output[[row, left, channel]],
                        _ => output[[row, right, channel]],
                    };
                    output[[row, col, channel]] = value;
                }
                break;
            }
        }
    }
}
