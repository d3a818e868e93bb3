use approx::assert_abs_diff_eq;
use pano_core::pipeline::config::ProjectionConfig;
use pano_core::project::{canvas_column, column_angle, feather_weight, ramp_degrees};

#[test]
fn test_feather_peaks_at_center() {
    let w = feather_weight(0.0, 18.0, 9.0);
    assert_abs_diff_eq!(w, 1.0, epsilon = 1e-6);
}

#[test]
fn test_feather_zero_at_slice_edge() {
    assert_eq!(feather_weight(9.0, 18.0, 9.0), 0.0);
    assert_eq!(feather_weight(-9.0, 18.0, 9.0), 0.0);
    assert_eq!(feather_weight(12.0, 18.0, 9.0), 0.0);
}

#[test]
fn test_feather_linear_in_angle() {
    // Triangular feather: w = 1 - |theta| / (hfov/2).
    for i in 0..=18 {
        let theta = -9.0 + i as f64;
        let expected = (1.0 - theta.abs() / 9.0) as f32;
        assert_abs_diff_eq!(feather_weight(theta, 18.0, 9.0), expected, epsilon = 1e-6);
    }
}

#[test]
fn test_adjacent_weights_sum_to_one() {
    // Two equal-FOV frames spaced hfov/2 apart: at any point covered by
    // exactly those two, the blend weights sum to 1.
    let hfov = 18.0;
    let spacing = hfov / 2.0;
    for i in 1..100 {
        let theta = spacing * i as f64 / 100.0; // global angle between centers
        let w_left = feather_weight(theta, hfov, hfov / 2.0);
        let w_right = feather_weight(theta - spacing, hfov, hfov / 2.0);
        assert_abs_diff_eq!(w_left + w_right, 1.0, epsilon = 1e-5);
    }
}

#[test]
fn test_trapezoid_plateau_with_narrow_ramp() {
    // Ramp of 3 degrees on an 18-degree slice: flat 1.0 inside, linear ramp
    // over the outer 3 degrees.
    assert_abs_diff_eq!(feather_weight(0.0, 18.0, 3.0), 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(feather_weight(5.9, 18.0, 3.0), 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(feather_weight(7.5, 18.0, 3.0), 0.5, epsilon = 1e-6);
    assert_eq!(feather_weight(9.0, 18.0, 3.0), 0.0);
}

#[test]
fn test_default_ramp_is_full_triangle() {
    let config = ProjectionConfig {
        hfov_deg: 18.0,
        ..Default::default()
    };
    assert_abs_diff_eq!(ramp_degrees(&config, 60), 9.0, epsilon = 1e-9);

    // Explicit half-frame blend width degenerates to the same triangle.
    let explicit = ProjectionConfig {
        hfov_deg: 18.0,
        blend_width_px: Some(30),
        ..Default::default()
    };
    assert_abs_diff_eq!(ramp_degrees(&explicit, 60), 9.0, epsilon = 1e-9);
}

#[test]
fn test_column_angle_spans_fov() {
    // Pixel centers: the first and last columns sit just inside the edges.
    let first = column_angle(0, 60, 18.0);
    let last = column_angle(59, 60, 18.0);
    assert!(first > -9.0 && first < -8.5);
    assert!(last < 9.0 && last > 8.5);
    assert_abs_diff_eq!(first, -last, epsilon = 1e-9);
}

#[test]
fn test_canvas_column_wraps() {
    assert_eq!(canvas_column(0.0, 1200), 0);
    assert_eq!(canvas_column(360.0, 1200), 0);
    assert_eq!(canvas_column(359.95, 1200), 0); // rounds up and wraps
    assert_eq!(canvas_column(-0.5, 1200), canvas_column(359.5, 1200));
    assert_eq!(canvas_column(180.0, 1200), 600);
}
