//! Frame-level bounding box computation.

use crate::error::{Error, Result};
use crate::frame::LandmarkFrame;
use crate::types::BoundingBox;

/// Axis-aligned bounding box over every landmark in the frame (not
/// per-region).
///
/// `x`/`y` are the exact minima and `width`/`height` the exact
/// max-minus-min spans; a single-landmark frame yields a valid
/// zero-area box. Returns [`Error::EmptyFrame`] when the frame has no
/// landmarks — callers must check the "no face" sentinel first.
pub fn compute_bounds(frame: &LandmarkFrame) -> Result<BoundingBox> {
    let mut landmarks = frame.landmarks().iter();
    let first = landmarks.next().ok_or(Error::EmptyFrame)?;

    let (mut min_x, mut max_x) = (first.x, first.x);
    let (mut min_y, mut max_y) = (first.y, first.y);

    for lm in landmarks {
        min_x = min_x.min(lm.x);
        max_x = max_x.max(lm.x);
        min_y = min_y.min(lm.y);
        max_y = max_y.max(lm.y);
    }

    Ok(BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::NormalizedLandmark;

    #[test]
    fn exact_min_max_semantics() {
        let normalized = [
            NormalizedLandmark::new(0.2, 0.7, 0.0),
            NormalizedLandmark::new(0.8, 0.1, 0.0),
            NormalizedLandmark::new(0.5, 0.5, 0.0),
        ];
        let frame = LandmarkFrame::from_normalized(&normalized, 100, 100).unwrap();
        let bbox = compute_bounds(&frame).unwrap();

        assert_eq!(bbox.x, 20.0);
        assert_eq!(bbox.y, 10.0);
        assert_eq!(bbox.x + bbox.width, 80.0);
        assert_eq!(bbox.y + bbox.height, 70.0);
    }

    #[test]
    fn single_landmark_is_zero_area_not_an_error() {
        let normalized = [NormalizedLandmark::new(0.5, 0.5, 0.0)];
        let frame = LandmarkFrame::from_normalized(&normalized, 200, 200).unwrap();
        let bbox = compute_bounds(&frame).unwrap();

        assert_eq!(bbox.x, 100.0);
        assert_eq!(bbox.y, 100.0);
        assert_eq!(bbox.width, 0.0);
        assert_eq!(bbox.height, 0.0);
    }

    #[test]
    fn empty_frame_is_an_error() {
        let frame = LandmarkFrame::from_normalized(&[], 100, 100).unwrap();
        assert!(matches!(compute_bounds(&frame), Err(Error::EmptyFrame)));
    }

    #[test]
    fn dimensions_are_never_negative() {
        let normalized: Vec<_> = (0..50)
            .map(|i| NormalizedLandmark::new((i as f32 * 0.37).fract(), (i as f32 * 0.61).fract(), 0.0))
            .collect();
        let frame = LandmarkFrame::from_normalized(&normalized, 640, 480).unwrap();
        let bbox = compute_bounds(&frame).unwrap();

        assert!(bbox.width >= 0.0);
        assert!(bbox.height >= 0.0);
    }
}
