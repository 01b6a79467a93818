//! Static facial region catalog and per-frame region extraction.
//!
//! A [`RegionSpecTable`] maps region names to ordered landmark index
//! lists against one tracker mesh topology. The index order is the
//! polygon/polyline traversal order and is preserved verbatim through
//! extraction; reordering it would break the closed-loop drawing
//! contract of every consumer.
//!
//! Tables carry a version name because landmark topology can change
//! between tracker releases. Pairing a table with a tracker whose mesh
//! it was not curated for is a configuration error; with the default
//! permissive policy it surfaces only as degraded (truncated) regions.

use tracing::debug;

use crate::error::{Error, Result};
use crate::frame::LandmarkFrame;
use crate::types::Region;

/// Table version curated against the 468-point face mesh topology
/// (also valid for the iris-refined variant, which only appends points).
pub const TABLE_VERSION_MEDIAPIPE_468: &str = "mediapipe-468.v1";

// Index lists are statics rather than consts so the derived lip splits
// can borrow sub-slices with 'static lifetime.

static OUTER_LIP: [usize; 20] = [
    61, 84, 17, 314, 405, 320, 307, 375, 321, 308, 324, 318, 402, 317, 14, 87, 178, 88, 95, 78,
];

static INNER_LIP: [usize; 19] = [
    78, 81, 80, 82, 13, 312, 311, 310, 415, 308, 324, 318, 402, 317, 14, 87, 178, 88, 95,
];

static LEFT_EYE: [usize; 16] = [
    33, 7, 163, 144, 145, 153, 154, 155, 133, 173, 157, 158, 159, 160, 161, 246,
];

static RIGHT_EYE: [usize; 16] = [
    263, 249, 390, 373, 374, 380, 381, 382, 362, 398, 384, 385, 386, 387, 388, 466,
];

static FACE_OVAL: [usize; 36] = [
    10, 338, 297, 332, 284, 251, 389, 356, 454, 323, 361, 288, 397, 365, 379, 378, 400, 377, 152,
    148, 176, 149, 150, 136, 172, 58, 132, 93, 234, 127, 162, 21, 54, 103, 67, 109,
];

static LEFT_UNDER_EYE: [usize; 16] = [
    226, 25, 110, 24, 23, 22, 26, 112, 243, 244, 128, 121, 120, 119, 118, 117,
];

static RIGHT_UNDER_EYE: [usize; 16] = [
    446, 255, 339, 254, 253, 252, 256, 341, 463, 464, 357, 350, 349, 348, 347, 346,
];

// Perioral ring; the lower edge reuses the lower-lip indices on
// purpose. Overlap between specs is intentional data, not a bug.
static AROUND_MOUTH: [usize; 21] = [
    57, 186, 92, 165, 167, 164, 393, 391, 322, 410, 287, 324, 318, 402, 317, 14, 87, 178, 88, 95,
    78,
];

// Eyebrow-to-eyelid bands.
static LEFT_EYESHADOW: [usize; 19] = [
    226, 113, 225, 224, 223, 222, 221, 189, 244, 243, 173, 157, 158, 159, 160, 161, 246, 33, 130,
];

static RIGHT_EYESHADOW: [usize; 19] = [
    446, 342, 445, 444, 443, 442, 441, 413, 464, 463, 398, 384, 385, 386, 387, 388, 466, 263, 359,
];

/// The static index-ordering definition for one region, independent of
/// any frame's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionSpec {
    pub name: &'static str,
    /// Landmark indices in traversal order.
    pub indices: &'static [usize],
    /// Whether the traversal is a closed loop.
    pub closed: bool,
}

/// Fixed mapping from region name to [`RegionSpec`], in a stable
/// declaration order.
///
/// Constructed once at startup and shared read-only; concurrent
/// readers need no locking because the table is never mutated.
#[derive(Debug, Clone)]
pub struct RegionSpecTable {
    version: &'static str,
    specs: Vec<RegionSpec>,
}

impl RegionSpecTable {
    /// The makeup region catalog for the 468-point mesh.
    ///
    /// `upper_lip` and `lower_lip` are the first and last 10 entries of
    /// the `outer_lip` loop, a derived positional split rather than
    /// independently curated anatomy. Whether that split is correct for
    /// every loop ordering is unverified; it matches the shipped
    /// behavior and is kept as-is.
    pub fn mediapipe_468() -> Self {
        Self {
            version: TABLE_VERSION_MEDIAPIPE_468,
            specs: vec![
                RegionSpec {
                    name: "outer_lip",
                    indices: &OUTER_LIP,
                    closed: true,
                },
                RegionSpec {
                    name: "inner_lip",
                    indices: &INNER_LIP,
                    closed: true,
                },
                RegionSpec {
                    name: "upper_lip",
                    indices: &OUTER_LIP[..10],
                    closed: false,
                },
                RegionSpec {
                    name: "lower_lip",
                    indices: &OUTER_LIP[10..],
                    closed: false,
                },
                RegionSpec {
                    name: "left_eye",
                    indices: &LEFT_EYE,
                    closed: true,
                },
                RegionSpec {
                    name: "right_eye",
                    indices: &RIGHT_EYE,
                    closed: true,
                },
                RegionSpec {
                    name: "face_oval",
                    indices: &FACE_OVAL,
                    closed: true,
                },
                RegionSpec {
                    name: "left_under_eye",
                    indices: &LEFT_UNDER_EYE,
                    closed: true,
                },
                RegionSpec {
                    name: "right_under_eye",
                    indices: &RIGHT_UNDER_EYE,
                    closed: true,
                },
                RegionSpec {
                    name: "around_mouth",
                    indices: &AROUND_MOUTH,
                    closed: true,
                },
                RegionSpec {
                    name: "left_eyeshadow",
                    indices: &LEFT_EYESHADOW,
                    closed: true,
                },
                RegionSpec {
                    name: "right_eyeshadow",
                    indices: &RIGHT_EYESHADOW,
                    closed: true,
                },
            ],
        }
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    /// All specs in declaration order. Extraction iterates in this
    /// order so output is reproducible across runs.
    pub fn specs(&self) -> &[RegionSpec] {
        &self.specs
    }

    pub fn get(&self, name: &str) -> Option<&RegionSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for RegionSpecTable {
    fn default() -> Self {
        Self::mediapipe_468()
    }
}

/// How the extractor treats spec indices outside the frame's landmark
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexPolicy {
    /// Drop out-of-range indices silently, yielding a shorter region.
    /// Trackers configured without iris refinement report fewer
    /// landmarks, and rendering should degrade to a shorter polygon
    /// rather than abort. This is the documented default contract.
    #[default]
    Permissive,
    /// Fail with [`Error::Configuration`] on the first out-of-range
    /// index, for deployments that would rather surface a table/tracker
    /// mismatch than render truncated regions.
    Strict,
}

/// Resolves region specs against one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionExtractor {
    policy: IndexPolicy,
}

impl RegionExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: IndexPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> IndexPolicy {
        self.policy
    }

    /// Resolve one spec against a frame.
    ///
    /// Emits the frame's landmark for each in-range index, in the exact
    /// order the spec declares them. Under [`IndexPolicy::Permissive`]
    /// out-of-range indices are skipped, so the output may be shorter
    /// than the spec; relative order of the surviving points is always
    /// preserved.
    pub fn extract(&self, frame: &LandmarkFrame, spec: &RegionSpec) -> Result<Region> {
        let landmarks = frame.landmarks();
        let mut points = Vec::with_capacity(spec.indices.len());
        let mut dropped = 0usize;

        for &idx in spec.indices {
            match landmarks.get(idx) {
                Some(lm) => points.push(*lm),
                None => {
                    if self.policy == IndexPolicy::Strict {
                        return Err(Error::Configuration(format!(
                            "region '{}' references landmark {} but the frame has {}",
                            spec.name,
                            idx,
                            landmarks.len()
                        )));
                    }
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            debug!(
                region = spec.name,
                dropped,
                frame_landmarks = landmarks.len(),
                "dropped out-of-range landmark indices"
            );
        }

        Ok(Region {
            name: spec.name,
            points,
            closed: spec.closed,
        })
    }

    /// Resolve every spec in the table, in declaration order.
    pub fn extract_all(
        &self,
        frame: &LandmarkFrame,
        table: &RegionSpecTable,
    ) -> Result<Vec<Region>> {
        let mut regions = Vec::with_capacity(table.len());
        for spec in table.specs() {
            regions.push(self.extract(frame, spec)?);
        }
        Ok(regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::NormalizedLandmark;

    fn full_frame(n: usize) -> LandmarkFrame {
        let normalized: Vec<_> = (0..n)
            .map(|i| NormalizedLandmark::new(i as f32 / n as f32, i as f32 / n as f32, 0.0))
            .collect();
        LandmarkFrame::from_normalized(&normalized, 1000, 1000).unwrap()
    }

    #[test]
    fn catalog_names_and_order() {
        let table = RegionSpecTable::mediapipe_468();
        let names: Vec<_> = table.specs().iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "outer_lip",
                "inner_lip",
                "upper_lip",
                "lower_lip",
                "left_eye",
                "right_eye",
                "face_oval",
                "left_under_eye",
                "right_under_eye",
                "around_mouth",
                "left_eyeshadow",
                "right_eyeshadow",
            ]
        );
        assert_eq!(table.version(), TABLE_VERSION_MEDIAPIPE_468);
    }

    #[test]
    fn lip_split_is_positional() {
        let table = RegionSpecTable::mediapipe_468();
        let outer = table.get("outer_lip").unwrap();
        let upper = table.get("upper_lip").unwrap();
        let lower = table.get("lower_lip").unwrap();

        assert_eq!(outer.indices.len(), 20);
        assert_eq!(upper.indices, &outer.indices[..10]);
        assert_eq!(lower.indices, &outer.indices[10..]);
        // Slices of a loop are open polylines
        assert!(!upper.closed);
        assert!(!lower.closed);
    }

    #[test]
    fn around_mouth_reuses_lower_lip_indices() {
        let table = RegionSpecTable::mediapipe_468();
        let around = table.get("around_mouth").unwrap();
        let lower = table.get("lower_lip").unwrap();

        for idx in lower.indices {
            assert!(
                around.indices.contains(idx),
                "around_mouth should contain lower_lip index {idx}"
            );
        }

        // The reuse is the whole lower edge, verbatim and in order
        let tail = &around.indices[around.indices.len() - lower.indices.len()..];
        assert_eq!(tail, lower.indices);
    }

    #[test]
    fn all_indices_fit_468_mesh() {
        let table = RegionSpecTable::mediapipe_468();
        for spec in table.specs() {
            for &idx in spec.indices {
                assert!(idx < 468, "{}: index {} out of mesh range", spec.name, idx);
            }
        }
    }

    #[test]
    fn extract_preserves_declared_order() {
        let table = RegionSpecTable::mediapipe_468();
        let frame = full_frame(468);
        let spec = table.get("outer_lip").unwrap();

        let region = RegionExtractor::new().extract(&frame, spec).unwrap();
        assert_eq!(region.num_points(), 20);
        for (point, &idx) in region.points.iter().zip(spec.indices) {
            assert_eq!(*point, frame.landmarks()[idx]);
        }
    }

    #[test]
    fn permissive_drops_out_of_range_indices() {
        let table = RegionSpecTable::mediapipe_468();
        // 100 landmarks: outer_lip keeps only indices below 100, in order
        let frame = full_frame(100);
        let spec = table.get("outer_lip").unwrap();

        let region = RegionExtractor::new().extract(&frame, spec).unwrap();
        let expected: Vec<_> = spec.indices.iter().filter(|&&i| i < 100).collect();
        assert_eq!(region.num_points(), expected.len());
        for (point, &&idx) in region.points.iter().zip(expected.iter()) {
            assert_eq!(*point, frame.landmarks()[idx]);
        }
    }

    #[test]
    fn strict_fails_on_out_of_range_index() {
        let table = RegionSpecTable::mediapipe_468();
        let frame = full_frame(100);
        let spec = table.get("left_eye").unwrap();

        let extractor = RegionExtractor::with_policy(IndexPolicy::Strict);
        let err = extractor.extract(&frame, spec).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn extract_all_runs_in_declaration_order() {
        let table = RegionSpecTable::mediapipe_468();
        let frame = full_frame(468);

        let regions = RegionExtractor::new().extract_all(&frame, &table).unwrap();
        assert_eq!(regions.len(), table.len());
        for (region, spec) in regions.iter().zip(table.specs()) {
            assert_eq!(region.name, spec.name);
        }
    }

    #[test]
    fn extract_all_is_idempotent() {
        let table = RegionSpecTable::mediapipe_468();
        let frame = full_frame(468);
        let extractor = RegionExtractor::new();

        let first = extractor.extract_all(&frame, &table).unwrap();
        let second = extractor.extract_all(&frame, &table).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn tiny_frame_yields_empty_regions_without_failing() {
        let table = RegionSpecTable::mediapipe_468();
        let frame = full_frame(10);

        // left_eye's smallest index is 7, so a 10-landmark frame keeps
        // exactly one point
        let region = RegionExtractor::new()
            .extract(&frame, table.get("left_eye").unwrap())
            .unwrap();
        assert_eq!(region.num_points(), 1);
        assert_eq!(region.points[0], frame.landmarks()[7]);

        // face_oval's smallest index is 10, so nothing survives
        let region = RegionExtractor::new()
            .extract(&frame, table.get("face_oval").unwrap())
            .unwrap();
        assert!(region.is_empty());
    }
}
