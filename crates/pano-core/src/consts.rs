/// Minimum frame count to use frame-level Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;

/// Degrees in a full turn around the rotation axis.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Two capture angles closer than this are treated as the same position.
pub const ANGLE_TOLERANCE_DEG: f64 = 0.05;

/// Accumulated weight below this counts as "no coverage".
pub const WEIGHT_EPSILON: f32 = 1e-6;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Exposure gains are clamped to this range to keep a badly metered frame
/// from dominating the composite.
pub const EXPOSURE_GAIN_RANGE: (f32, f32) = (0.25, 4.0);

/// Steepness `k` of the seam score mapping `1 / (1 + k * delta)`.
pub const SEAM_SCORE_STEEPNESS: f64 = 8.0;

/// Number of color channels in a captured frame (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;
