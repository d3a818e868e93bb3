mod common;

use common::uniform_frame;
use pano_core::error::StitchError;
use pano_core::ingest::order_frames;

#[test]
fn test_empty_input() {
    let result = order_frames(vec![]);
    assert!(matches!(result, Err(StitchError::EmptyInput)));
}

#[test]
fn test_single_frame_rejected() {
    let result = order_frames(vec![uniform_frame(4, 6, 0.5, 0.0)]);
    assert!(matches!(
        result,
        Err(StitchError::TooFewFrames { found: 1 })
    ));
}

#[test]
fn test_exact_duplicate_angle() {
    let frames = vec![
        uniform_frame(4, 6, 0.5, 45.0),
        uniform_frame(4, 6, 0.5, 45.0),
    ];
    match order_frames(frames) {
        Err(StitchError::DuplicateAngle { first, second }) => {
            assert_eq!(first, 45.0);
            assert_eq!(second, 45.0);
        }
        other => panic!("expected DuplicateAngle, got {other:?}"),
    }
}

#[test]
fn test_near_duplicate_within_tolerance() {
    let frames = vec![
        uniform_frame(4, 6, 0.5, 45.0),
        uniform_frame(4, 6, 0.5, 45.01),
        uniform_frame(4, 6, 0.5, 90.0),
    ];
    assert!(matches!(
        order_frames(frames),
        Err(StitchError::DuplicateAngle { .. })
    ));
}

#[test]
fn test_dimension_mismatch() {
    let frames = vec![
        uniform_frame(4, 6, 0.5, 0.0),
        uniform_frame(4, 8, 0.5, 90.0),
    ];
    match order_frames(frames) {
        Err(StitchError::DimensionMismatch {
            expected_w,
            found_w,
            angle_deg,
            ..
        }) => {
            assert_eq!(expected_w, 6);
            assert_eq!(found_w, 8);
            assert_eq!(angle_deg, 90.0);
        }
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }
}

#[test]
fn test_sorted_ascending_mod_360() {
    let frames = vec![
        uniform_frame(4, 6, 0.5, 350.0),
        uniform_frame(4, 6, 0.5, 10.0),
        uniform_frame(4, 6, 0.5, 180.0),
    ];
    let sorted = order_frames(frames).unwrap();
    let angles: Vec<f64> = sorted.iter().map(|f| f.angle_deg).collect();
    assert_eq!(angles, vec![10.0, 180.0, 350.0]);
}
