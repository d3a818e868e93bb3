use tracing::info;

use crate::consts::{ANGLE_TOLERANCE_DEG, FULL_TURN_DEG};
use crate::error::{Result, StitchError};
use crate::frame::CapturedFrame;

/// Validate and sort captured frames ascending by angle modulo 360.
///
/// Fails on zero frames, fewer than two frames, mixed resolutions, or two
/// angles that coincide within [`ANGLE_TOLERANCE_DEG`] (checked across the
/// 0/360 seam as well). Runs before any canvas buffer is allocated.
pub fn order_frames(mut frames: Vec<CapturedFrame>) -> Result<Vec<CapturedFrame>> {
    if frames.is_empty() {
        return Err(StitchError::EmptyInput);
    }
    if frames.len() < 2 {
        return Err(StitchError::TooFewFrames {
            found: frames.len(),
        });
    }

    let (expected_h, expected_w) = (frames[0].height(), frames[0].width());
    for frame in &frames {
        if frame.height() != expected_h || frame.width() != expected_w {
            return Err(StitchError::DimensionMismatch {
                expected_w,
                expected_h,
                found_w: frame.width(),
                found_h: frame.height(),
                angle_deg: frame.angle_deg,
            });
        }
    }

    frames.sort_by(|a, b| a.angle_deg.total_cmp(&b.angle_deg));

    for pair in frames.windows(2) {
        if pair[1].angle_deg - pair[0].angle_deg < ANGLE_TOLERANCE_DEG {
            return Err(StitchError::DuplicateAngle {
                first: pair[0].angle_deg,
                second: pair[1].angle_deg,
            });
        }
    }
    // First and last can also coincide across the wrap.
    let first = frames[0].angle_deg;
    let last = frames[frames.len() - 1].angle_deg;
    if first + FULL_TURN_DEG - last < ANGLE_TOLERANCE_DEG {
        return Err(StitchError::DuplicateAngle {
            first: last,
            second: first,
        });
    }

    info!(
        frames = frames.len(),
        first_deg = first,
        last_deg = last,
        "Ordered capture frames"
    );
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn frame(angle: f64) -> CapturedFrame {
        CapturedFrame::new(Array3::zeros((4, 6, 3)), angle)
    }

    #[test]
    fn sorts_by_angle() {
        let sorted = order_frames(vec![frame(180.0), frame(10.0), frame(350.0)]).unwrap();
        let angles: Vec<f64> = sorted.iter().map(|f| f.angle_deg).collect();
        assert_eq!(angles, vec![10.0, 180.0, 350.0]);
    }

    #[test]
    fn normalizes_negative_angles() {
        // -10 degrees is stored as 350.
        let sorted = order_frames(vec![frame(-10.0), frame(20.0)]).unwrap();
        assert_eq!(sorted[1].angle_deg, 350.0);
    }

    #[test]
    fn rejects_wrap_duplicate() {
        let result = order_frames(vec![frame(0.01), frame(359.99), frame(180.0)]);
        assert!(matches!(result, Err(StitchError::DuplicateAngle { .. })));
    }
}
