//! Debug overlay rendering.
//!
//! Thin read-only consumer of the decomposition output: paints each
//! landmark as a small dot, the frame bounding box as a rectangle, and
//! region outlines as polylines (closed where the region is a loop).
//! All drawing is clipped to the image; inputs are never mutated.

use image::{Rgba, RgbaImage};

use crate::types::{BoundingBox, Landmark, Region};

const LANDMARK_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
const BBOX_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
const REGION_COLOR: Rgba<u8> = Rgba([255, 64, 160, 255]);

/// Stateless renderer for annotated debug frames.
#[derive(Debug, Clone, Copy)]
pub struct OverlayAnnotator {
    marker_radius: i32,
}

impl OverlayAnnotator {
    pub fn new() -> Self {
        Self { marker_radius: 2 }
    }

    pub fn with_marker_radius(marker_radius: i32) -> Self {
        Self { marker_radius }
    }

    /// Draw landmarks, bounding box, and region outlines onto `img`.
    pub fn annotate(
        &self,
        img: &mut RgbaImage,
        landmarks: &[Landmark],
        bbox: Option<&BoundingBox>,
        regions: &[Region],
    ) {
        for region in regions {
            self.draw_region(img, region);
        }
        self.draw_landmarks(img, landmarks);
        if let Some(bbox) = bbox {
            self.draw_bbox(img, bbox);
        }
    }

    pub fn draw_landmarks(&self, img: &mut RgbaImage, landmarks: &[Landmark]) {
        for lm in landmarks {
            draw_circle(
                img,
                lm.x as i32,
                lm.y as i32,
                self.marker_radius,
                LANDMARK_COLOR,
            );
        }
    }

    pub fn draw_bbox(&self, img: &mut RgbaImage, bbox: &BoundingBox) {
        draw_rect(
            img,
            bbox.x as i32,
            bbox.y as i32,
            bbox.width as i32,
            bbox.height as i32,
            BBOX_COLOR,
        );
    }

    /// Draw one region as a polyline through its points, closing the
    /// loop when the region says so. Regions with fewer than 2 points
    /// have no edges to draw.
    pub fn draw_region(&self, img: &mut RgbaImage, region: &Region) {
        let points = &region.points;
        if points.len() < 2 {
            return;
        }

        for pair in points.windows(2) {
            draw_line(
                img,
                pair[0].x as i32,
                pair[0].y as i32,
                pair[1].x as i32,
                pair[1].y as i32,
                REGION_COLOR,
            );
        }

        if region.closed {
            let first = points[0];
            let last = points[points.len() - 1];
            draw_line(
                img,
                last.x as i32,
                last.y as i32,
                first.x as i32,
                first.y as i32,
                REGION_COLOR,
            );
        }
    }
}

impl Default for OverlayAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

fn put_pixel_clipped(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    if x >= 0 && x < w as i32 && y >= 0 && y < h as i32 {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_rect(img: &mut RgbaImage, x: i32, y: i32, w: i32, h: i32, color: Rgba<u8>) {
    for dx in 0..=w {
        put_pixel_clipped(img, x + dx, y, color);
        put_pixel_clipped(img, x + dx, y + h, color);
    }
    for dy in 0..=h {
        put_pixel_clipped(img, x, y + dy, color);
        put_pixel_clipped(img, x + w, y + dy, color);
    }
}

fn draw_circle(img: &mut RgbaImage, cx: i32, cy: i32, radius: i32, color: Rgba<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put_pixel_clipped(img, cx + dx, cy + dy, color);
            }
        }
    }
}

fn draw_line(img: &mut RgbaImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        put_pixel_clipped(img, x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}
