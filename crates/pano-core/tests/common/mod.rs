use ndarray::Array3;
use pano_core::frame::CapturedFrame;
use pano_core::pipeline::ProgressReporter;

/// Progress reporter that swallows everything, for tests.
pub struct Silent;
impl ProgressReporter for Silent {}

/// Frame filled with a single RGB color.
pub fn solid_frame(height: usize, width: usize, rgb: [f32; 3], angle_deg: f64) -> CapturedFrame {
    let mut data = Array3::<f32>::zeros((height, width, 3));
    for row in 0..height {
        for col in 0..width {
            for channel in 0..3 {
                data[[row, col, channel]] = rgb[channel];
            }
        }
    }
    CapturedFrame::new(data, angle_deg)
}

/// Gray frame with the same value in all channels.
pub fn uniform_frame(height: usize, width: usize, value: f32, angle_deg: f64) -> CapturedFrame {
    solid_frame(height, width, [value, value, value], angle_deg)
}

/// A complete evenly-spaced ring of `count` identical gray frames.
pub fn ring_frames(count: usize, height: usize, width: usize, value: f32) -> Vec<CapturedFrame> {
    (0..count)
        .map(|i| uniform_frame(height, width, value, i as f64 * 360.0 / count as f64))
        .collect()
}
