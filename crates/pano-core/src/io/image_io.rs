use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use ndarray::Array3;
use tracing::{info, warn};

use crate::consts::{ANGLE_TOLERANCE_DEG, COLOR_CHANNEL_COUNT};
use crate::error::{Result, StitchError};
use crate::finalize::StitchResult;
use crate::frame::{CapturedFrame, FrameSource};

const FRAME_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "tif", "tiff"];

/// Extract the capture angle from a file name like `angle_045.jpg` or
/// `angle-132.5.png`. Returns `None` when no angle marker is present.
pub fn parse_angle_from_name(name: &str) -> Option<f64> {
    let lower = name.to_ascii_lowercase();
    let rest = &lower[lower.find("angle")? + "angle".len()..];
    let rest = rest.trim_start_matches(['_', '-']);

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in rest.char_indices() {
        if c.is_ascii_digit() {
            end = i + 1;
        } else if c == '.' && !seen_dot && end == i {
            seen_dot = true;
            end = i + 1;
        } else {
            break;
        }
    }
    rest[..end].trim_end_matches('.').parse().ok()
}

/// Decode one image file into a captured frame at the given angle.
pub fn load_frame(path: &Path, angle_deg: f64) -> Result<CapturedFrame> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut data = Array3::<f32>::zeros((height as usize, width as usize, COLOR_CHANNEL_COUNT));
    for (col, row, pixel) in rgb.enumerate_pixels() {
        for channel in 0..COLOR_CHANNEL_COUNT {
            data[[row as usize, col as usize, channel]] = pixel.0[channel] as f32 / 255.0;
        }
    }

    let mut frame = CapturedFrame::new(data, angle_deg);
    frame.source = Some(path.to_path_buf());
    Ok(frame)
}

/// Scan a capture directory and load every frame whose name carries an
/// angle marker. Files that fail to decode or carry no angle are logged and
/// skipped; the compositor degrades coverage instead of aborting, subject
/// to the hole-fraction check downstream.
pub fn load_frames_from_dir(dir: &Path) -> Result<Vec<CapturedFrame>> {
    let mut frames = Vec::new();
    let mut skipped = 0usize;

    for (path, angle) in scan_dir(dir)? {
        match load_frame(&path, angle) {
            Ok(frame) => frames.push(frame),
            Err(err) => {
                warn!(path = %path.display(), %err, "Dropping undecodable frame");
                skipped += 1;
            }
        }
    }

    info!(
        loaded = frames.len(),
        skipped,
        dir = %dir.display(),
        "Loaded capture directory"
    );
    Ok(frames)
}

/// Angle-annotated image files in a directory, sorted by angle. Does not
/// decode any pixels.
pub fn scan_dir(dir: &Path) -> Result<Vec<(PathBuf, f64)>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if !is_image {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => continue,
        };
        match parse_angle_from_name(name) {
            Some(angle) => entries.push((path, angle)),
            None => {
                warn!(path = %path.display(), "No capture angle in file name, skipping");
            }
        }
    }
    entries.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(entries)
}

/// Save the composed panorama, choosing PNG or TIFF from the extension.
pub fn save_panorama(result: &StitchResult, path: &Path) -> Result<()> {
    let (height, width, _) = result.image.dim();

    let mut img = RgbImage::new(width as u32, height as u32);
    for row in 0..height {
        for col in 0..width {
            img.put_pixel(
                col as u32,
                row as u32,
                Rgb([
                    result.image[[row, col, 0]],
                    result.image[[row, col, 1]],
                    result.image[[row, col, 2]],
                ]),
            );
        }
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some("tiff" | "tif") => img.save_with_format(path, ImageFormat::Tiff)?,
        _ => img.save_with_format(path, ImageFormat::Png)?,
    }
    Ok(())
}

/// [`FrameSource`] over a directory of already-captured, angle-annotated
/// files. Stands in for the motor/camera collaborator when replaying a
/// finished scan.
pub struct DirectorySource {
    entries: Vec<(PathBuf, f64)>,
}

impl DirectorySource {
    pub fn open(dir: &Path) -> Result<Self> {
        Ok(Self {
            entries: scan_dir(dir)?,
        })
    }

    pub fn angles(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, a)| *a).collect()
    }
}

impl FrameSource for DirectorySource {
    fn capture(&mut self, angle_deg: f64) -> Result<CapturedFrame> {
        let found = self
            .entries
            .iter()
            .find(|(_, a)| (a - angle_deg).abs() < ANGLE_TOLERANCE_DEG);
        match found {
            Some((path, angle)) => load_frame(path, *angle),
            None => Err(StitchError::AngleParse(format!(
                "no capture at {angle_deg:.2}\u{b0}"
            ))),
        }
    }
}
