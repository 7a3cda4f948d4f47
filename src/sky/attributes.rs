// attributes.rs - Per-face vertex attributes for the sky mesh
//
// Each triangle gets a normal, a center and a delay, written identically
// to its three vertices so the vertex shader can move whole faces.

use glam::Vec3;
use rand::Rng;

use crate::math::{random_range, try_face_normal};

/// Position buffer plus the three parallel per-face attribute buffers.
///
/// All buffers hold one entry per vertex, three vertices per face.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceAttributes {
    pub positions: Vec<Vec3>,
    pub face_normals: Vec<Vec3>,
    pub centers: Vec<Vec3>,
    pub delays: Vec<f32>,
}

impl FaceAttributes {
    /// Derive attributes from a triangle-soup position buffer.
    ///
    /// One delay in `[0, max_delay)` is drawn per face, not per vertex.
    /// Zero-area faces get a zero normal instead of NaN. A trailing partial
    /// triangle is dropped.
    pub fn build<R: Rng + ?Sized>(positions: &[Vec3], max_delay: f32, rng: &mut R) -> Self {
        let faces = positions.len() / 3;
        if positions.len() % 3 != 0 {
            log::warn!("dropping {} trailing vertices", positions.len() % 3);
        }

        let mut face_normals = Vec::with_capacity(faces * 3);
        let mut centers = Vec::with_capacity(faces * 3);
        let mut delays = Vec::with_capacity(faces * 3);
        let mut degenerate = 0;

        for tri in positions.chunks_exact(3) {
            let (v0, v1, v2) = (tri[0], tri[1], tri[2]);
            let normal = try_face_normal(v0, v1, v2).unwrap_or_else(|| {
                degenerate += 1;
                Vec3::ZERO
            });
            let center = (v0 + v1 + v2) / 3.0;
            let delay = random_range(rng, 0.0, max_delay);

            face_normals.extend([normal; 3]);
            centers.extend([center; 3]);
            delays.extend([delay; 3]);
        }

        if degenerate > 0 {
            log::warn!("{degenerate} of {faces} faces are degenerate");
        }
        log::debug!("built attributes for {faces} faces");

        Self {
            positions: positions[..faces * 3].to_vec(),
            face_normals,
            centers,
            delays,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Flat `[x, y, z, ...]` views for upload as vertex attributes
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn face_normals_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.face_normals)
    }

    pub fn centers_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.centers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sky::octahedron;
    use approx::assert_abs_diff_eq;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn buffers_are_parallel() {
        let positions = octahedron(90.0, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let attrs = FaceAttributes::build(&positions, 0.5, &mut rng);
        assert_eq!(attrs.vertex_count(), positions.len());
        assert_eq!(attrs.face_normals.len(), positions.len());
        assert_eq!(attrs.centers.len(), positions.len());
        assert_eq!(attrs.delays.len(), positions.len());
        assert_eq!(attrs.positions_flat().len(), positions.len() * 3);
        assert_eq!(attrs.positions, positions);
    }

    #[test]
    fn attributes_are_shared_within_a_face() {
        let positions = octahedron(90.0, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let attrs = FaceAttributes::build(&positions, 0.5, &mut rng);

        for f in 0..attrs.face_count() {
            let i = f * 3;
            for k in 1..3 {
                assert_eq!(attrs.face_normals[i], attrs.face_normals[i + k]);
                assert_eq!(attrs.centers[i], attrs.centers[i + k]);
                assert_eq!(attrs.delays[i], attrs.delays[i + k]);
            }
            let mean = (positions[i] + positions[i + 1] + positions[i + 2]) / 3.0;
            assert_abs_diff_eq!(attrs.centers[i], mean, epsilon = 1e-4);
            assert!((attrs.face_normals[i].length() - 1.0).abs() < 1e-5);
        }
    }

    struct Counting<R> {
        inner: R,
        draws: usize,
    }

    impl<R: RngCore> RngCore for Counting<R> {
        fn next_u32(&mut self) -> u32 {
            self.draws += 1;
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.draws += 1;
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            self.draws += 1;
            self.inner.fill_bytes(dst);
        }
    }

    #[test]
    fn one_random_draw_per_face() {
        let positions = octahedron(1.0, 1);
        let mut rng = Counting { inner: ChaCha8Rng::seed_from_u64(5), draws: 0 };
        let attrs = FaceAttributes::build(&positions, 0.5, &mut rng);
        assert_eq!(rng.draws, attrs.face_count());
        assert!(attrs.delays.iter().all(|d| (0.0..0.5).contains(d)));
    }

    #[test]
    fn degenerate_face_gets_zero_normal() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let attrs = FaceAttributes::build(&positions, 0.5, &mut rng);
        assert_eq!(attrs.face_normals, vec![Vec3::ZERO; 3]);
        assert!(attrs.centers.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn trailing_vertices_are_dropped() {
        let mut positions = octahedron(1.0, 0);
        positions.push(Vec3::Y);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let attrs = FaceAttributes::build(&positions, 0.5, &mut rng);
        assert_eq!(attrs.vertex_count(), 24);
    }
}
