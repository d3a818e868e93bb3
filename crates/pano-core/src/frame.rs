use ndarray::Array3;
use std::path::PathBuf;

use crate::consts::{FULL_TURN_DEG, LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::error::Result;

/// A single captured RGB frame at a known rotation angle.
/// Pixel values are f32 in [0.0, 1.0], shape = (height, width, 3).
#[derive(Clone, Debug)]
pub struct CapturedFrame {
    /// Pixel data, row-major, shape = (height, width, 3)
    pub data: Array3<f32>,
    /// Rotation angle around the vertical axis, 0 <= angle < 360
    pub angle_deg: f64,
    /// Mean luminance reported by the capture side, if known
    pub mean_luminance: Option<f32>,
    /// Originating file, if the frame was loaded from disk
    pub source: Option<PathBuf>,
}

impl CapturedFrame {
    pub fn new(data: Array3<f32>, angle_deg: f64) -> Self {
        Self {
            data,
            angle_deg: angle_deg.rem_euclid(FULL_TURN_DEG),
            mean_luminance: None,
            source: None,
        }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Mean luminance of the frame. Uses capture metadata when present,
    /// otherwise computes BT.601 luminance over all pixels.
    pub fn luminance(&self) -> f32 {
        if let Some(lum) = self.mean_luminance {
            return lum;
        }
        let (h, w, _) = self.data.dim();
        if h == 0 || w == 0 {
            return 0.0;
        }
        let mut sum = 0.0f64;
        for row in 0..h {
            for col in 0..w {
                let r = self.data[[row, col, 0]];
                let g = self.data[[row, col, 1]];
                let b = self.data[[row, col, 2]];
                sum += (LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b) as f64;
            }
        }
        (sum / (h * w) as f64) as f32
    }
}

/// Capability the capture collaborator implements: produce the frame taken
/// at a requested rotation angle. The compositor never depends on motor or
/// camera specifics, only on this trait.
pub trait FrameSource {
    fn capture(&mut self, angle_deg: f64) -> Result<CapturedFrame>;
}
