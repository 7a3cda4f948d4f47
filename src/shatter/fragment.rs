// fragment.rs - Geometry of one shatter triangle
//
// Computed eagerly at construction; fragments never change afterwards.

use glam::Vec2;
use serde::Serialize;

/// Axis-aligned rectangle in image pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn bounding(points: &[Vec2]) -> Self {
        if points.is_empty() { return Self::default(); }
        let (min, max) = points.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(lo, hi), &p| (lo.min(p), hi.max(p)),
        );
        Self { x: min.x, y: min.y, w: max.x - min.x, h: max.y - min.y }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Whole-pixel size for a raster surface, never smaller than 1x1
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.w.ceil() as u32).max(1),
            (self.h.ceil() as u32).max(1),
        )
    }
}

/// Triangle with its bounding box and centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentGeometry {
    pub vertices: [Vec2; 3],
    pub bounds: Rect,
    pub centroid: Vec2,
}

impl FragmentGeometry {
    pub fn new(v0: Vec2, v1: Vec2, v2: Vec2) -> Self {
        let vertices = [v0, v1, v2];
        Self {
            vertices,
            bounds: Rect::bounding(&vertices),
            centroid: (v0 + v1 + v2) / 3.0,
        }
    }

    /// Twice the signed area, positive for counter-clockwise in y-up
    pub fn signed_area2(&self) -> f32 {
        let [a, b, c] = self.vertices;
        (b - a).perp_dot(c - a)
    }

    pub fn is_degenerate(&self) -> bool {
        self.signed_area2().abs() <= f32::EPSILON
    }

    /// Inclusive point-in-triangle test, independent of winding
    pub fn contains(&self, p: Vec2) -> bool {
        let [a, b, c] = self.vertices;
        let d0 = (b - a).perp_dot(p - a);
        let d1 = (c - b).perp_dot(p - b);
        let d2 = (a - c).perp_dot(p - c);
        let neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
        let pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
        !(neg && pos) && !self.is_degenerate()
    }
}
