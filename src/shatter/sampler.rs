// sampler.rs - Ring point cloud around the focal point
//
// Points are jittered on concentric rings, then clamped into the image.
// Output order is stable: focal point first, then ring by ring.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::SampleRing;
use crate::math::{clamp, random_range};

/// Sample the triangulation point cloud for a click at `focus`.
///
/// `jitter` scales each ring's radius into the max per-axis offset.
pub fn sample_rings<R: Rng + ?Sized>(
    focus: Vec2,
    size: Vec2,
    rings: &[SampleRing],
    jitter: f32,
    rng: &mut R,
) -> Vec<Vec2> {
    let total = 1 + rings.iter().map(|r| r.count as usize).sum::<usize>();
    let mut points = Vec::with_capacity(total);
    points.push(focus);

    for ring in rings {
        let variance = ring.radius * jitter;
        for i in 0..ring.count {
            let angle = i as f32 / ring.count as f32 * TAU;
            let x = angle.cos() * ring.radius + focus.x + random_range(rng, -variance, variance);
            let y = angle.sin() * ring.radius + focus.y + random_range(rng, -variance, variance);
            points.push(Vec2::new(x, y));
        }
    }

    for p in &mut points {
        p.x = clamp(p.x, 0.0, size.x);
        p.y = clamp(p.y, 0.0, size.y);
    }

    log::debug!("sampled {} points around ({}, {})", points.len(), focus.x, focus.y);
    points
}
