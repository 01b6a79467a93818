//! Per-frame landmark data as received from the external tracker.
//!
//! The tracker hands over either a "no face" signal or an ordered list
//! of landmarks normalized to [0,1] relative to the image dimensions.
//! This module denormalizes them into pixel space once, at frame
//! construction; everything downstream works in pixels.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Landmark;

/// One landmark as produced by the tracker: x/y normalized to [0,1]
/// relative to image width/height, z normalized relative to width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl NormalizedLandmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// The per-image result of the external tracker.
///
/// `NoFace` is a defined outcome, distinct from a detection with an
/// empty landmark list; callers branch on it before building a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerOutput {
    NoFace,
    Landmarks(Vec<NormalizedLandmark>),
}

impl TrackerOutput {
    pub fn is_no_face(&self) -> bool {
        match self {
            TrackerOutput::NoFace => true,
            TrackerOutput::Landmarks(landmarks) => landmarks.is_empty(),
        }
    }
}

/// One tracker result denormalized to pixel space, plus the source
/// image dimensions.
///
/// Landmark count is tracker-defined (nominally 468, or a refined
/// variant with extra iris points); all landmarks in a frame share it.
/// Frames are immutable and independent: nothing here refers to a
/// previous frame's data.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    landmarks: Vec<Landmark>,
    image_width: u32,
    image_height: u32,
}

impl LandmarkFrame {
    /// Build a frame from normalized tracker landmarks.
    ///
    /// x is scaled by image width, y by image height, and z by image
    /// width. Depth deliberately uses width as its scale reference;
    /// that is the tracker's depth convention and must be preserved.
    ///
    /// Returns [`Error::InvalidFrame`] if landmarks are present but
    /// either image dimension is zero.
    pub fn from_normalized(
        normalized: &[NormalizedLandmark],
        image_width: u32,
        image_height: u32,
    ) -> Result<Self> {
        if !normalized.is_empty() && (image_width == 0 || image_height == 0) {
            return Err(Error::InvalidFrame {
                width: image_width,
                height: image_height,
            });
        }

        let w = image_width as f32;
        let h = image_height as f32;
        let landmarks = normalized
            .iter()
            .map(|n| Landmark::new(n.x * w, n.y * h, n.z * w))
            .collect();

        Ok(Self {
            landmarks,
            image_width,
            image_height,
        })
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn num_landmarks(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Consume the frame, yielding its pixel-space landmarks.
    pub fn into_landmarks(self) -> Vec<Landmark> {
        self.landmarks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denormalizes_into_pixel_space() {
        let normalized = [NormalizedLandmark::new(0.5, 0.25, 0.1)];
        let frame = LandmarkFrame::from_normalized(&normalized, 640, 480).unwrap();

        let lm = frame.landmarks()[0];
        assert!((lm.x - 320.0).abs() < 1e-4);
        assert!((lm.y - 120.0).abs() < 1e-4);
        // z scales by width, not height
        assert!((lm.z - 64.0).abs() < 1e-4);
    }

    #[test]
    fn rejects_zero_dimensions_with_landmarks() {
        let normalized = [NormalizedLandmark::new(0.5, 0.5, 0.0)];

        let err = LandmarkFrame::from_normalized(&normalized, 0, 480).unwrap_err();
        assert!(matches!(err, Error::InvalidFrame { width: 0, height: 480 }));

        let err = LandmarkFrame::from_normalized(&normalized, 640, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidFrame { width: 640, height: 0 }));
    }

    #[test]
    fn empty_landmark_list_is_constructible() {
        // Zero dimensions are tolerated when there is nothing to scale.
        let frame = LandmarkFrame::from_normalized(&[], 0, 0).unwrap();
        assert!(frame.is_empty());
        assert_eq!(frame.num_landmarks(), 0);
    }

    #[test]
    fn no_face_sentinel() {
        assert!(TrackerOutput::NoFace.is_no_face());
        assert!(TrackerOutput::Landmarks(Vec::new()).is_no_face());
        assert!(
            !TrackerOutput::Landmarks(vec![NormalizedLandmark::new(0.1, 0.2, 0.0)]).is_no_face()
        );
    }

    #[test]
    fn preserves_landmark_order() {
        let normalized: Vec<_> = (0..10)
            .map(|i| NormalizedLandmark::new(i as f32 * 0.1, 0.0, 0.0))
            .collect();
        let frame = LandmarkFrame::from_normalized(&normalized, 100, 100).unwrap();

        for (i, lm) in frame.landmarks().iter().enumerate() {
            assert!((lm.x - i as f32 * 10.0).abs() < 1e-4);
        }
    }
}
