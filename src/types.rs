use serde::{Deserialize, Serialize};

/// A single tracked facial point in source-image pixel space.
///
/// `x` and `y` are pixel coordinates. `z` is depth relative to image
/// width (the tracker scales depth by width, not height). Immutable
/// once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned bounding box defined by top-left corner, width, and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// A named, ordered set of landmark points forming a polyline or
/// closed polygon for one facial feature.
///
/// Derived from a [`crate::RegionSpec`] against one frame; recomputed
/// every frame. Point order follows the spec's index declaration
/// order, which encodes the traversal direction consumers draw with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub name: &'static str,
    pub points: Vec<Landmark>,
    /// Whether the points form a closed loop (last point connects back
    /// to the first) rather than an open polyline.
    pub closed: bool,
}

impl Region {
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Area enclosed by this region's points, in square pixels.
    /// Open polylines are treated as if closed; fewer than 3 points
    /// yield zero.
    pub fn area(&self) -> f32 {
        polygon_area(&self.points)
    }
}

/// Calculate the area of a polygon using the shoelace formula.
/// Only x/y are considered; depth is ignored.
pub fn polygon_area(points: &[Landmark]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    let n = points.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }

    (area / 2.0).abs()
}
