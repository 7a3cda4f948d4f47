// octahedron.rs - Subdivided octahedron base mesh
//
// Output is a triangle soup: three positions per face, nothing shared,
// so every face can carry its own attributes.

use glam::Vec3;

const VERTICES: [Vec3; 6] = [
    Vec3::X,
    Vec3::NEG_X,
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::Z,
    Vec3::NEG_Z,
];

// Counter-clockwise seen from outside
const FACES: [[usize; 3]; 8] = [
    [0, 2, 4],
    [0, 4, 3],
    [0, 3, 5],
    [0, 5, 2],
    [1, 2, 5],
    [1, 5, 3],
    [1, 3, 4],
    [1, 4, 2],
];

/// Triangles produced per base face at a given subdivision level
#[inline]
pub fn triangles_per_face(detail: u32) -> usize {
    let cols = detail as usize + 1;
    cols * cols
}

/// Build the octahedron of `radius`, each face split `detail` times.
pub fn octahedron(radius: f32, detail: u32) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(FACES.len() * triangles_per_face(detail) * 3);
    for [a, b, c] in FACES {
        subdivide(VERTICES[a], VERTICES[b], VERTICES[c], detail, &mut out);
    }
    for v in &mut out {
        *v = v.normalize() * radius;
    }
    out
}

fn subdivide(a: Vec3, b: Vec3, c: Vec3, detail: u32, out: &mut Vec<Vec3>) {
    let cols = detail as usize + 1;

    // grid[i][j]: row i walks from edge ab towards c
    let grid: Vec<Vec<Vec3>> = (0..=cols)
        .map(|i| {
            let t = i as f32 / cols as f32;
            let aj = a.lerp(c, t);
            let bj = b.lerp(c, t);
            let rows = cols - i;
            (0..=rows)
                .map(|j| {
                    if rows == 0 { aj } else { aj.lerp(bj, j as f32 / rows as f32) }
                })
                .collect()
        })
        .collect();

    for i in 0..cols {
        for j in 0..2 * (cols - i) - 1 {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend([grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
            } else {
                out.extend([grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_octahedron_has_eight_faces() {
        let positions = octahedron(1.0, 0);
        assert_eq!(positions.len(), 24);
    }

    #[test]
    fn face_count_grows_quadratically() {
        for detail in 0..6 {
            let positions = octahedron(90.0, detail);
            assert_eq!(positions.len(), 8 * triangles_per_face(detail) * 3);
        }
        assert_eq!(octahedron(90.0, 4).len() / 3, 200);
    }

    #[test]
    fn vertices_lie_on_sphere() {
        for v in octahedron(150.0, 3) {
            assert!((v.length() - 150.0).abs() < 1e-3, "{v} is off the sphere");
        }
    }

    #[test]
    fn faces_wind_outward() {
        for detail in 0..5 {
            let positions = octahedron(1.0, detail);
            for tri in positions.chunks_exact(3) {
                let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
                let center = (tri[0] + tri[1] + tri[2]) / 3.0;
                assert!(n.dot(center) > 0.0, "inward face at detail {detail}");
            }
        }
    }
}
