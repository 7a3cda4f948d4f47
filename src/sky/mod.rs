// sky/ - Animated octahedron sky
//
// The GPU side only needs static attribute buffers plus one scalar time
// uniform per mesh. Everything here is CPU-side and renderer agnostic.

mod attributes;
mod octahedron;

pub use attributes::FaceAttributes;
pub use octahedron::{octahedron, triangles_per_face};

use glam::Vec3;
use rand::Rng;

use crate::config::SkyConfig;

/// Elapsed-time uniform fed to a mesh's shader every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShaderClock {
    pub elapsed: f32,
}

impl ShaderClock {
    /// `elapsed + dt`
    #[must_use]
    pub fn advanced(self, dt: f32) -> Self {
        Self { elapsed: self.elapsed + dt }
    }

    pub fn advance(&mut self, dt: f32) {
        *self = self.advanced(dt);
    }
}

/// Inner mesh whose faces drift outward, driven by per-face attributes.
#[derive(Debug, Clone)]
pub struct SkyOctahedron {
    pub attributes: FaceAttributes,
    pub clock: ShaderClock,
}

impl SkyOctahedron {
    pub fn new<R: Rng + ?Sized>(config: &SkyConfig, rng: &mut R) -> Self {
        let positions = octahedron(config.radius, config.detail);
        Self {
            attributes: FaceAttributes::build(&positions, config.max_delay, rng),
            clock: ShaderClock::default(),
        }
    }

    pub fn render(&mut self, dt: f32) {
        self.clock.advance(dt);
    }
}

/// Outer translucent shell, positions only.
#[derive(Debug, Clone)]
pub struct SkyShell {
    pub positions: Vec<Vec3>,
    pub clock: ShaderClock,
}

impl SkyShell {
    pub fn new(config: &SkyConfig) -> Self {
        Self {
            positions: octahedron(config.shell_radius, config.shell_detail),
            clock: ShaderClock::default(),
        }
    }

    pub fn render(&mut self, dt: f32) {
        self.clock.advance(dt);
    }

    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }
}
