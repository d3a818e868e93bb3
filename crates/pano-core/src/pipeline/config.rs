use serde::{Deserialize, Serialize};

use crate::consts::FULL_TURN_DEG;
use crate::error::{Result, StitchError};

/// How the canvas width for the full 360 degrees is determined.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum CanvasSizing {
    /// Match the source resolution: frame_width / hfov pixels per degree.
    #[default]
    Native,
    /// Fixed canvas width in pixels.
    WidthPx(usize),
    /// Explicit angular resolution.
    PixelsPerDegree(f64),
}

/// Geometry and blending parameters, fixed for the lifetime of one stitch run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Horizontal field of view of one frame, degrees.
    pub hfov_deg: f64,
    #[serde(default)]
    pub sizing: CanvasSizing,
    /// Feather ramp half-width in pixels. `None` (and anything at or above
    /// half the frame width) gives the full triangular feather, which makes
    /// overlapping weights of frames spaced at hfov/2 sum to exactly 1.
    #[serde(default)]
    pub blend_width_px: Option<usize>,
    /// Vertical shift applied to every frame, in canvas rows.
    #[serde(default)]
    pub vertical_offset_px: i64,
    /// Equalize per-frame brightness against the first sorted frame before
    /// accumulation.
    #[serde(default)]
    pub exposure_normalize: bool,
    /// Maximum tolerated fraction of hole pixels within the covered span.
    #[serde(default = "default_max_hole_fraction")]
    pub max_hole_fraction: f64,
}

fn default_max_hole_fraction() -> f64 {
    0.05
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            hfov_deg: 54.0,
            sizing: CanvasSizing::default(),
            blend_width_px: None,
            vertical_offset_px: 0,
            exposure_normalize: false,
            max_hole_fraction: default_max_hole_fraction(),
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.hfov_deg > 0.0 && self.hfov_deg <= FULL_TURN_DEG) {
            return Err(StitchError::InvalidConfig(format!(
                "hfov_deg must be in (0, 360], got {}",
                self.hfov_deg
            )));
        }
        if !(0.0..=1.0).contains(&self.max_hole_fraction) {
            return Err(StitchError::InvalidConfig(format!(
                "max_hole_fraction must be in [0, 1], got {}",
                self.max_hole_fraction
            )));
        }
        match self.sizing {
            CanvasSizing::WidthPx(0) => Err(StitchError::InvalidConfig(
                "canvas width must be positive".into(),
            )),
            CanvasSizing::PixelsPerDegree(ppd) if ppd <= 0.0 => Err(StitchError::InvalidConfig(
                format!("pixels_per_degree must be positive, got {ppd}"),
            )),
            _ => Ok(()),
        }
    }

    /// Canvas width in pixels for the full turn, given the frame width.
    pub fn canvas_width(&self, frame_width: usize) -> Result<usize> {
        let width = match self.sizing {
            CanvasSizing::Native => {
                (frame_width as f64 / self.hfov_deg * FULL_TURN_DEG).round() as usize
            }
            CanvasSizing::WidthPx(px) => px,
            CanvasSizing::PixelsPerDegree(ppd) => (ppd * FULL_TURN_DEG).round() as usize,
        };
        if width == 0 {
            return Err(StitchError::InvalidConfig(
                "computed canvas width is zero".into(),
            ));
        }
        Ok(width)
    }
}

/// Stitching strategy selected by the caller. Alternate (feature-matching)
/// strategies plug in as further variants behind the same interface.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum StitchStrategy {
    #[default]
    Angle,
}

impl std::fmt::Display for StitchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Angle => write!(f, "angle"),
        }
    }
}

/// Full configuration for one stitch run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StitchConfig {
    #[serde(default)]
    pub strategy: StitchStrategy,
    #[serde(default)]
    pub projection: ProjectionConfig,
}
