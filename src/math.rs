// math.rs - Scalar and vector helpers
//
// Pure functions shared by the sky mesh and the shatter pipeline.
// Randomness is always drawn from a caller-supplied generator.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

/// Radians to degrees
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians / PI * 180.0
}

/// Degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

/// `min(max(x, lo), hi)`.
///
/// When `lo > hi` the upper bound wins, so the result is `hi`.
#[inline]
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    x.max(lo).min(hi)
}

/// Linear interpolation, `t` is not clamped
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Uniform sample in `[min, max)`. Returns `min` when the range is empty.
#[inline]
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.random::<f32>()
}

/// -1 for negative input, +1 otherwise (zero included)
#[inline]
pub fn sign(x: f32) -> f32 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

/// Point on a sphere from latitude / longitude (radians)
pub fn polar(lat: f32, lon: f32, radius: f32) -> Vec3 {
    Vec3::new(
        lat.cos() * lon.cos() * radius,
        lat.sin() * radius,
        lat.cos() * lon.sin() * radius,
    )
}

/// Unit normal of the triangle `(v0, v1, v2)`, right-handed winding.
///
/// Collinear or coincident vertices have no normal; the division by a zero
/// length yields NaN components. Use [`try_face_normal`] when the input may
/// be degenerate.
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let n = (v1 - v0).cross(v2 - v0);
    n / n.length()
}

/// Like [`face_normal`] but returns `None` for zero-area triangles.
pub fn try_face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Option<Vec3> {
    (v1 - v0).cross(v2 - v0).try_normalize()
}
