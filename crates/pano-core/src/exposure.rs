use tracing::debug;

use crate::consts::{EXPOSURE_GAIN_RANGE, WEIGHT_EPSILON};
use crate::frame::CapturedFrame;

/// Multiplicative gain per frame that equalizes mean luminance against the
/// first (reference) frame. Returns unit gains when disabled. Suppresses
/// visible brightness steps across seams when the camera metered each
/// capture independently.
pub fn exposure_gains(frames: &[CapturedFrame], enabled: bool) -> Vec<f32> {
    if !enabled || frames.is_empty() {
        return vec![1.0; frames.len()];
    }

    let reference = frames[0].luminance();
    if reference <= WEIGHT_EPSILON {
        return vec![1.0; frames.len()];
    }

    frames
        .iter()
        .map(|frame| {
            let lum = frame.luminance();
            let gain = if lum > WEIGHT_EPSILON {
                (reference / lum).clamp(EXPOSURE_GAIN_RANGE.0, EXPOSURE_GAIN_RANGE.1)
            } else {
                1.0
            };
            debug!(
                angle_deg = frame.angle_deg,
                luminance = lum,
                gain,
                "Exposure gain"
            );
            gain
        })
        .collect()
}
