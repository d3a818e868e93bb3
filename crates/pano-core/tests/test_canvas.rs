mod common;

use approx::assert_abs_diff_eq;
use common::{uniform_frame, Silent};
use pano_core::canvas::{accumulate, PanoramaCanvas};
use pano_core::consts::WEIGHT_EPSILON;
use pano_core::pipeline::config::ProjectionConfig;

fn config_18() -> ProjectionConfig {
    ProjectionConfig {
        hfov_deg: 18.0,
        ..Default::default()
    }
}

#[test]
fn test_canvas_dimensions_native_sizing() {
    // 60 px over 18 degrees -> 3.333 px/deg -> 1200 px for the full turn.
    let frames = vec![
        uniform_frame(4, 60, 0.5, 0.0),
        uniform_frame(4, 60, 0.5, 15.0),
    ];
    let canvas = accumulate(&frames, &config_18(), &Silent).unwrap();
    assert_eq!(canvas.width(), 1200);
    assert_eq!(canvas.height(), 4);
}

#[test]
fn test_wraparound_frame_contributes_to_both_edges() {
    // A frame centered at 359 degrees spans [350, 8]: weight must land on
    // columns near both 0 and width-1 with no discontinuity at the seam.
    let frames = vec![uniform_frame(4, 60, 0.8, 359.0)];
    let canvas = accumulate(&frames, &config_18(), &Silent).unwrap();
    let w = canvas.width();

    assert!(canvas.weight[[0, 0]] > WEIGHT_EPSILON);
    assert!(canvas.weight[[0, w - 1]] > WEIGHT_EPSILON);

    // Adjacent columns across the seam differ by one feather step, nothing
    // more: the weight profile is continuous through the wrap.
    let step = (canvas.weight[[0, 0]] - canvas.weight[[0, w - 1]]).abs();
    let interior_step = (canvas.weight[[0, 1]] - canvas.weight[[0, 0]]).abs();
    assert!(step < interior_step * 4.0 + 1e-3, "seam step {step} too large");

    // Color ratio stays exact across the seam.
    for col in [0, w - 1] {
        let value = canvas.color[[0, col, 0]] / canvas.weight[[0, col]];
        assert_abs_diff_eq!(value, 0.8, epsilon = 1e-4);
    }
}

#[test]
fn test_accumulation_is_order_independent() {
    let a = uniform_frame(4, 60, 0.2, 0.0);
    let b = uniform_frame(4, 60, 0.5, 9.0);
    let c = uniform_frame(4, 60, 0.9, 18.0);

    let forward = accumulate(
        &[a.clone(), b.clone(), c.clone()],
        &config_18(),
        &Silent,
    )
    .unwrap();
    let backward = accumulate(&[c, b, a], &config_18(), &Silent).unwrap();

    for (x, y) in forward.weight.iter().zip(backward.weight.iter()) {
        assert_abs_diff_eq!(x, y, epsilon = 1e-5);
    }
    for (x, y) in forward.color.iter().zip(backward.color.iter()) {
        assert_abs_diff_eq!(x, y, epsilon = 1e-5);
    }
}

#[test]
fn test_parallel_matches_sequential() {
    // Six frames take the parallel path; three stay sequential. Splitting
    // the same input both ways must agree.
    let frames: Vec<_> = (0..6)
        .map(|i| uniform_frame(4, 60, 0.1 + 0.1 * i as f32, i as f64 * 15.0))
        .collect();

    let all = accumulate(&frames, &config_18(), &Silent).unwrap();

    let mut manual = PanoramaCanvas::new(all.height(), all.width());
    for chunk in frames.chunks(2) {
        let part = accumulate(chunk, &config_18(), &Silent).unwrap();
        manual.merge(&part);
    }

    for (x, y) in all.weight.iter().zip(manual.weight.iter()) {
        assert_abs_diff_eq!(x, y, epsilon = 1e-5);
    }
    for (x, y) in all.color.iter().zip(manual.color.iter()) {
        assert_abs_diff_eq!(x, y, epsilon = 1e-5);
    }
}

#[test]
fn test_vertical_offset_shifts_rows() {
    let config = ProjectionConfig {
        hfov_deg: 18.0,
        vertical_offset_px: 2,
        ..Default::default()
    };
    let frames = vec![uniform_frame(6, 60, 0.5, 0.0)];
    let canvas = accumulate(&frames, &config, &Silent).unwrap();

    // Rows 0 and 1 receive nothing; the frame's top row lands on row 2.
    assert!(canvas.weight[[0, 0]] <= WEIGHT_EPSILON);
    assert!(canvas.weight[[1, 0]] <= WEIGHT_EPSILON);
    assert!(canvas.weight[[2, 0]] > WEIGHT_EPSILON);
}
