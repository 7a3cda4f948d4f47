// schedule.rs - Outward animation schedule
//
// Delay grows with the centroid's distance from the focal point, so the
// image breaks up from the click outwards. Rotation direction depends only
// on which quadrant around the focus the fragment sits in.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::fragment::FragmentGeometry;
use crate::config::ShatterConfig;
use crate::math::{random_range, sign};
use crate::timeline::{FragmentTransform, FragmentTween};

/// Animation parameters of one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FragmentSchedule {
    /// Centroid distance from the focal point, in pixels.
    pub distance: f32,
    /// Seconds before the fragment starts moving.
    pub delay: f32,
    pub rotation_x: f32,
    pub rotation_y: f32,
    /// `floor(distance)`: farther fragments stack above nearer ones.
    pub z_index: u32,
}

impl FragmentSchedule {
    pub fn new<R: Rng + ?Sized>(
        geometry: &FragmentGeometry,
        focus: Vec2,
        config: &ShatterConfig,
        rng: &mut R,
    ) -> Self {
        let offset = geometry.centroid - focus;
        let distance = offset.length();
        let (lo, hi) = config.delay_jitter;
        Self {
            distance,
            delay: distance * config.delay_per_px * random_range(rng, lo, hi),
            rotation_x: config.rotation_x * sign(offset.y),
            rotation_y: -config.rotation_y * sign(offset.x),
            z_index: distance.floor() as u32,
        }
    }

    /// Tween from rest to the fly-away target
    pub fn tween(&self, config: &ShatterConfig) -> FragmentTween {
        FragmentTween {
            delay: self.delay,
            fly_duration: config.fly_duration,
            fade_start: config.fade_start,
            fade_duration: config.fade_duration,
            target: FragmentTransform {
                z: config.depth,
                rotation_x: self.rotation_x,
                rotation_y: self.rotation_y,
                opacity: 0.0,
            },
        }
    }
}
