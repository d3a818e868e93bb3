use crate::canvas::PanoramaCanvas;
use crate::consts::{COLOR_CHANNEL_COUNT, FULL_TURN_DEG};
use crate::frame::CapturedFrame;
use crate::pipeline::config::ProjectionConfig;

/// Blend weight for a pixel at `theta_local` degrees from the slice center.
///
/// The weight ramps linearly from 0 at the slice edge to 1 over `ramp_deg`
/// degrees. With `ramp_deg == hfov/2` this is the triangular feather
/// `max(0, 1 - |theta| / (hfov/2))`: 1 at the center, 0 at the edge, and
/// summing to exactly 1 where two equal-FOV frames spaced hfov/2 apart
/// overlap. Narrower ramps give a trapezoid with a flat center plateau.
pub fn feather_weight(theta_local_deg: f64, hfov_deg: f64, ramp_deg: f64) -> f32 {
    let edge_distance = hfov_deg / 2.0 - theta_local_deg.abs();
    if edge_distance <= 0.0 {
        return 0.0;
    }
    (edge_distance / ramp_deg).min(1.0) as f32
}

/// Feather ramp in degrees for a frame of `frame_width` columns.
pub fn ramp_degrees(config: &ProjectionConfig, frame_width: usize) -> f64 {
    let half_fov = config.hfov_deg / 2.0;
    match config.blend_width_px {
        Some(px) => {
            let deg = px as f64 * config.hfov_deg / frame_width as f64;
            deg.clamp(config.hfov_deg / frame_width as f64, half_fov)
        }
        None => half_fov,
    }
}

/// Local angle of a source column, degrees from the slice center.
///
/// Columns are sampled at their centers, so a frame of width W spans
/// (-hfov/2, hfov/2) exclusive.
pub fn column_angle(col: usize, frame_width: usize, hfov_deg: f64) -> f64 {
    ((col as f64 + 0.5) / frame_width as f64 - 0.5) * hfov_deg
}

/// Destination canvas column for a global angle, resolved circularly.
pub fn canvas_column(theta_global_deg: f64, canvas_width: usize) -> usize {
    let col = (theta_global_deg.rem_euclid(FULL_TURN_DEG) / FULL_TURN_DEG
        * canvas_width as f64)
        .round() as usize;
    col % canvas_width
}

/// Project one frame onto the canvas, accumulating weighted color and
/// weight mass. Pure with respect to the frame; only the accumulator is
/// written. Column indices wrap modulo the canvas width, rows outside the
/// canvas (after the vertical offset) are clipped.
pub fn project_frame(
    frame: &CapturedFrame,
    gain: f32,
    config: &ProjectionConfig,
    canvas: &mut PanoramaCanvas,
) {
    let (height, width, _) = frame.data.dim();
    let canvas_w = canvas.width();
    let canvas_h = canvas.height();
    let ramp = ramp_degrees(config, width);

    for col in 0..width {
        let theta_local = column_angle(col, width, config.hfov_deg);
        let weight = feather_weight(theta_local, config.hfov_deg, ramp);
        if weight <= 0.0 {
            continue;
        }
        let theta_global = frame.angle_deg + theta_local;
        let dest_col = canvas_column(theta_global, canvas_w);

        for row in 0..height {
            let dest_row = row as i64 + config.vertical_offset_px;
            if dest_row < 0 || dest_row >= canvas_h as i64 {
                continue;
            }
            let dest_row = dest_row as usize;
            for channel in 0..COLOR_CHANNEL_COUNT {
                canvas.color[[dest_row, dest_col, channel]] +=
                    frame.data[[row, col, channel]] * gain * weight;
            }
            canvas.weight[[dest_row, dest_col]] += weight;
        }
    }
}
