use thiserror::Error;

#[derive(Error, Debug)]
pub enum StitchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("No usable input frames")]
    EmptyInput,

    #[error("Need at least two usable frames, found {found}")]
    TooFewFrames { found: usize },

    #[error("Duplicate capture angle: {first:.3}\u{b0} and {second:.3}\u{b0} coincide within tolerance")]
    DuplicateAngle { first: f64, second: f64 },

    #[error(
        "Frame at {angle_deg:.1}\u{b0} is {found_w}x{found_h}, expected {expected_w}x{expected_h}"
    )]
    DimensionMismatch {
        expected_w: usize,
        expected_h: usize,
        found_w: usize,
        found_h: usize,
        angle_deg: f64,
    },

    #[error(
        "Insufficient coverage: hole fraction {hole_fraction:.4} exceeds maximum {max_hole_fraction:.4} ({hole_count} hole pixels)"
    )]
    InsufficientCoverage {
        hole_fraction: f64,
        max_hole_fraction: f64,
        hole_count: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cannot recover capture angle: {0}")]
    AngleParse(String),
}

pub type Result<T> = std::result::Result<T, StitchError>;
