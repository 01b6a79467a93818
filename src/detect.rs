//! The full per-frame decomposition pipeline and its wire-facing
//! result type.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::bounds::compute_bounds;
use crate::error::Result;
use crate::frame::{LandmarkFrame, TrackerOutput};
use crate::regions::{RegionExtractor, RegionSpecTable};
use crate::types::{BoundingBox, Landmark, Region};

/// The decomposition result for one image, shaped for the API payload.
///
/// "No face" is a defined outcome, not an error: `face_detected` is
/// false and everything else is empty/absent. Coordinates are in
/// source-image pixel space; callers that resized the image before
/// tracking must account for that themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectResult {
    pub face_detected: bool,
    pub landmarks: Vec<Landmark>,
    pub bbox: Option<BoundingBox>,
    pub num_landmarks: usize,
    /// Regions in spec-declaration order; serialized as a map of
    /// region name to points, preserving that order.
    #[serde(serialize_with = "regions_as_map")]
    pub facial_regions: Vec<Region>,
}

impl DetectResult {
    pub fn no_face() -> Self {
        Self {
            face_detected: false,
            landmarks: Vec::new(),
            bbox: None,
            num_landmarks: 0,
            facial_regions: Vec::new(),
        }
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.facial_regions.iter().find(|r| r.name == name)
    }
}

fn regions_as_map<S: Serializer>(
    regions: &[Region],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(regions.len()))?;
    for region in regions {
        map.serialize_entry(region.name, &region.points)?;
    }
    map.end()
}

/// Decompose one tracker result into named regions and a bounding box,
/// with the default permissive extractor.
pub fn decompose(
    output: &TrackerOutput,
    image_width: u32,
    image_height: u32,
    table: &RegionSpecTable,
) -> Result<DetectResult> {
    decompose_with(
        output,
        image_width,
        image_height,
        table,
        &RegionExtractor::new(),
    )
}

/// [`decompose`] with a caller-supplied extractor (e.g. a strict one).
///
/// Pure computation: no I/O, no retained state, no reference to any
/// prior frame. Safe to call from multiple threads on independent
/// frames; the table is the only shared input and is read-only.
pub fn decompose_with(
    output: &TrackerOutput,
    image_width: u32,
    image_height: u32,
    table: &RegionSpecTable,
    extractor: &RegionExtractor,
) -> Result<DetectResult> {
    let normalized = match output {
        TrackerOutput::NoFace => return Ok(DetectResult::no_face()),
        TrackerOutput::Landmarks(landmarks) if landmarks.is_empty() => {
            return Ok(DetectResult::no_face())
        }
        TrackerOutput::Landmarks(landmarks) => landmarks,
    };

    let frame = LandmarkFrame::from_normalized(normalized, image_width, image_height)?;
    let bbox = compute_bounds(&frame)?;
    let facial_regions = extractor.extract_all(&frame, table)?;
    let num_landmarks = frame.num_landmarks();

    Ok(DetectResult {
        face_detected: true,
        landmarks: frame.into_landmarks(),
        bbox: Some(bbox),
        num_landmarks,
        facial_regions,
    })
}
