// session.rs - Working set of one shatter event
//
// Built in one go from an image and a focal point; on failure nothing is
// returned, so a caller's previous session is never half-overwritten.

use glam::Vec2;
use image::RgbaImage;
use rand::Rng;

use super::delaunay::{Triangulate, validate_indices};
use super::fragment::FragmentGeometry;
use super::sampler::sample_rings;
use super::schedule::FragmentSchedule;
use super::surface::cut_surface;
use crate::config::ShatterConfig;
use crate::error::ShatterError;
use crate::timeline::{FragmentTransform, FragmentTween, Timeline};

/// One flying piece of the image.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub geometry: FragmentGeometry,
    pub schedule: FragmentSchedule,
    pub tween: FragmentTween,
    /// Raster the size of `geometry.bounds`
    pub surface: RgbaImage,
}

impl Fragment {
    pub fn new<R: Rng + ?Sized>(
        geometry: FragmentGeometry,
        focus: Vec2,
        source: &RgbaImage,
        config: &ShatterConfig,
        rng: &mut R,
    ) -> Self {
        let schedule = FragmentSchedule::new(&geometry, focus, config, rng);
        Self {
            geometry,
            tween: schedule.tween(config),
            schedule,
            surface: cut_surface(source, &geometry),
        }
    }

    pub fn transform_at(&self, t: f32) -> FragmentTransform {
        self.tween.sample(t)
    }
}

/// Sample points, triangles and fragments for the active shatter.
#[derive(Debug, Clone, Default)]
pub struct ShatterSession {
    pub focus: Vec2,
    pub vertices: Vec<Vec2>,
    pub indices: Vec<usize>,
    pub fragments: Vec<Fragment>,
    timeline: Timeline,
}

impl ShatterSession {
    /// Sample, triangulate and schedule a shatter of `source` around `focus`.
    pub fn shatter<T, R>(
        source: &RgbaImage,
        focus: Vec2,
        config: &ShatterConfig,
        triangulator: &T,
        rng: &mut R,
    ) -> Result<Self, ShatterError>
    where
        T: Triangulate + ?Sized,
        R: Rng + ?Sized,
    {
        let expected = (config.image_width, config.image_height);
        if source.dimensions() != expected {
            return Err(ShatterError::ImageSize { expected, actual: source.dimensions() });
        }

        let size = Vec2::new(config.image_width as f32, config.image_height as f32);
        let vertices = sample_rings(focus, size, &config.rings, config.jitter, rng);
        let indices = triangulator.triangulate(&vertices)?;
        validate_indices(&indices, vertices.len())?;

        let fragments: Vec<Fragment> = indices
            .chunks_exact(3)
            .map(|t| {
                let geometry = FragmentGeometry::new(vertices[t[0]], vertices[t[1]], vertices[t[2]]);
                Fragment::new(geometry, focus, source, config, rng)
            })
            .collect();

        let duration = fragments.iter().map(|f| f.tween.end()).fold(0.0, f32::max);
        log::info!(
            "shatter at ({:.1}, {:.1}): {} fragments over {:.2}s",
            focus.x,
            focus.y,
            fragments.len(),
            duration
        );

        Ok(Self { focus, vertices, indices, fragments, timeline: Timeline::new(duration) })
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.indices.is_empty() && self.fragments.is_empty()
    }

    /// Running and not yet finished
    pub fn is_active(&self) -> bool {
        !self.fragments.is_empty() && !self.timeline.is_finished()
    }

    pub fn elapsed(&self) -> f32 {
        self.timeline.elapsed()
    }

    pub fn duration(&self) -> f32 {
        self.timeline.duration()
    }

    /// Advance the animation; true on the tick every fragment has finished.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.fragments.is_empty() { return false; }
        self.timeline.advance(dt)
    }

    pub fn transforms(&self) -> impl Iterator<Item = FragmentTransform> + '_ {
        let t = self.timeline.elapsed();
        self.fragments.iter().map(move |f| f.transform_at(t))
    }

    /// Release every fragment and clear the working set.
    pub fn reset(&mut self) {
        self.fragments.clear();
        self.vertices.clear();
        self.indices.clear();
        self.timeline = Timeline::default();
    }
}
