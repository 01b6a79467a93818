//! # face-regions
//!
//! Facial region decomposition for real-time makeup overlay rendering.
//!
//! This crate turns a raw per-frame facial landmark point cloud (as
//! produced by an external face tracker) into a stable set of named,
//! correctly-ordered geometric regions — lips, eyes, eyeshadow zones,
//! face contour, under-eye and perioral bands — suitable for drawing
//! augmented makeup overlays.
//!
//! It provides:
//! - **Region catalog**: a versioned, immutable table of named regions,
//!   each an ordered landmark index list ([`RegionSpecTable`])
//! - **Extraction**: resolving specs against a frame with graceful
//!   degradation on short meshes ([`RegionExtractor`])
//! - **Bounds**: an exact axis-aligned box over the whole frame
//!   ([`compute_bounds`])
//! - **Overlay**: a debug renderer for landmarks, bounds, and region
//!   outlines ([`OverlayAnnotator`])
//!
//! Detection itself is out of scope: the tracker is an external
//! collaborator whose output this crate consumes.
//!
//! ## Quick Start
//!
//! ```rust
//! use face_regions::{decompose, NormalizedLandmark, RegionSpecTable, TrackerOutput};
//!
//! // The catalog is built once at startup and shared read-only.
//! let table = RegionSpecTable::mediapipe_468();
//!
//! // Landmarks arrive from the tracker normalized to [0,1].
//! let landmarks: Vec<NormalizedLandmark> = (0..468)
//!     .map(|i| NormalizedLandmark::new(0.5, i as f32 / 468.0, 0.0))
//!     .collect();
//!
//! let result = decompose(&TrackerOutput::Landmarks(landmarks), 640, 480, &table).unwrap();
//! assert!(result.face_detected);
//! assert_eq!(result.region("outer_lip").unwrap().num_points(), 20);
//!
//! // "No face" is a defined outcome, not an error.
//! let result = decompose(&TrackerOutput::NoFace, 640, 480, &table).unwrap();
//! assert!(!result.face_detected);
//! ```
//!
//! ## Concurrency
//!
//! Each frame is pure in-memory computation with no shared mutable
//! state; independent frames may be decomposed from multiple threads
//! simultaneously against the same (read-only) table.

mod annotate;
mod bounds;
mod detect;
mod error;
mod frame;
mod regions;
mod types;

pub use annotate::OverlayAnnotator;
pub use bounds::compute_bounds;
pub use detect::{decompose, decompose_with, DetectResult};
pub use error::{Error, Result};
pub use frame::{LandmarkFrame, NormalizedLandmark, TrackerOutput};
pub use regions::{
    IndexPolicy, RegionExtractor, RegionSpec, RegionSpecTable, TABLE_VERSION_MEDIAPIPE_468,
};
pub use types::{polygon_area, BoundingBox, Landmark, Region};
