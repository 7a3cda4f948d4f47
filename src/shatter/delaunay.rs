// delaunay.rs - Point set triangulation
//
// Bowyer-Watson insertion inside a large enclosing triangle. Runs in
// double precision; input sizes here are a few dozen points.
//
// Coincident points are inserted once. A finite enclosing triangle can
// leave thin pockets between the mesh and the convex hull, mostly along
// collinear runs on the image border. Those pockets are ear-clipped after
// the enclosing vertices are stripped, so the result covers the hull.

use glam::{DVec2, Vec2};

use crate::error::TriangulationError;

// Squared distance under which two points count as one
const COINCIDENT: f64 = 1e-9;
// Twice the signed area under which a triangle counts as flat
const FLAT: f64 = 1e-9;
// Relative slack of the in-circle test
const IN_CIRCLE: f64 = 1e-12;

/// A triangulation backend.
///
/// Returns a flat index list, three indices per triangle, referencing
/// `points`. Winding order is unspecified.
pub trait Triangulate {
    fn triangulate(&self, points: &[Vec2]) -> Result<Vec<usize>, TriangulationError>;
}

/// Check that `indices` describes whole triangles over `len` points.
pub fn validate_indices(indices: &[usize], len: usize) -> Result<(), TriangulationError> {
    if indices.len() % 3 != 0 {
        return Err(TriangulationError::MalformedIndices { len: indices.len() });
    }
    match indices.iter().find(|&&i| i >= len) {
        Some(&index) => Err(TriangulationError::IndexOutOfRange { index, len }),
        None => Ok(()),
    }
}

/// Delaunay triangulation by incremental insertion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Delaunay;

#[derive(Debug, Clone, Copy)]
struct Triangle {
    v: [usize; 3],
    center: DVec2,
    r2: f64,
}

impl Triangle {
    fn new(v: [usize; 3], pts: &[DVec2]) -> Self {
        let (a, b, c) = (pts[v[0]], pts[v[1]], pts[v[2]]);
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));

        // Flat triangle: zero radius so later inserts never select it
        if d.abs() < FLAT {
            return Self { v, center: (a + b + c) / 3.0, r2: 0.0 };
        }

        let (a2, b2, c2) = (a.length_squared(), b.length_squared(), c.length_squared());
        let center = DVec2::new(
            (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
            (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
        );
        Self { v, center, r2: center.distance_squared(a) }
    }

    #[inline]
    fn encloses(&self, p: DVec2) -> bool {
        self.r2 > 0.0 && p.distance_squared(self.center) - self.r2 <= IN_CIRCLE * self.r2
    }
}

impl Triangulate for Delaunay {
    fn triangulate(&self, points: &[Vec2]) -> Result<Vec<usize>, TriangulationError> {
        let n = points.len();
        if n < 3 {
            return Err(TriangulationError::TooFewPoints(n));
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(TriangulationError::NonFinite { index });
        }

        let mut pts: Vec<DVec2> = points.iter().map(|p| p.as_dvec2()).collect();

        // Enclosing triangle
        let (min, max) = pts.iter().fold(
            (DVec2::splat(f64::MAX), DVec2::splat(f64::MIN)),
            |(lo, hi), &p| (lo.min(p), hi.max(p)),
        );
        let span = (max - min).max_element().max(1.0);
        let mid = (min + max) * 0.5;
        pts.push(DVec2::new(mid.x - 20.0 * span, mid.y - span));
        pts.push(DVec2::new(mid.x, mid.y + 20.0 * span));
        pts.push(DVec2::new(mid.x + 20.0 * span, mid.y - span));

        let mut tris = vec![Triangle::new([n, n + 1, n + 2], &pts)];
        let mut edges: Vec<[usize; 2]> = Vec::new();
        let mut inserted: Vec<usize> = Vec::with_capacity(n);
        let mut skipped = 0;

        for i in 0..n {
            let p = pts[i];
            if inserted.iter().any(|&j| pts[j].distance_squared(p) < COINCIDENT) {
                skipped += 1;
                continue;
            }

            edges.clear();
            tris.retain(|t| {
                if !t.encloses(p) { return true; }
                edges.extend([[t.v[0], t.v[1]], [t.v[1], t.v[2]], [t.v[2], t.v[0]]]);
                false
            });

            if edges.is_empty() {
                skipped += 1;
                continue;
            }

            // Cavity boundary: edges that belong to exactly one removed triangle
            for e in 0..edges.len() {
                let [a, b] = edges[e];
                let shared = edges.iter().filter(|&&[c, d]| (a == c && b == d) || (a == d && b == c)).count();
                if shared == 1 {
                    tris.push(Triangle::new([a, b, i], &pts));
                }
            }
            inserted.push(i);
        }

        if skipped > 0 {
            log::debug!("skipped {skipped} coincident points");
        }

        let mut mesh: Vec<[usize; 3]> = tris
            .iter()
            .filter(|t| t.v.iter().all(|&v| v < n) && t.r2 > 0.0)
            .map(|t| ccw(t.v, &pts))
            .collect();
        fill_to_hull(&mut mesh, &pts[..n]);

        let indices: Vec<usize> = mesh.into_iter().flatten().collect();

        log::debug!("triangulated {} points into {} triangles", n, indices.len() / 3);
        Ok(indices)
    }
}

#[inline]
fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

fn ccw([a, b, c]: [usize; 3], pts: &[DVec2]) -> [usize; 3] {
    if orient(pts[a], pts[b], pts[c]) < 0.0 { [a, c, b] } else { [a, b, c] }
}

/// Ordered boundary loop of a counter-clockwise mesh, interior on the left.
///
/// `None` when the boundary is not a single simple loop.
fn boundary_loop(mesh: &[[usize; 3]], len: usize) -> Option<Vec<usize>> {
    let mut directed: Vec<[usize; 2]> = mesh
        .iter()
        .flat_map(|&[a, b, c]| [[a, b], [b, c], [c, a]])
        .collect();
    directed.sort_unstable();

    let mut next = vec![None; len];
    let mut edges = 0;
    for &[a, b] in &directed {
        if directed.binary_search(&[b, a]).is_ok() { continue; }
        if next[a].replace(b).is_some() { return None; }
        edges += 1;
    }

    let start = next.iter().position(Option::is_some)?;
    let mut ring = vec![start];
    let mut v = next[start]?;
    while v != start {
        if ring.len() > edges { return None; }
        ring.push(v);
        v = next[v]?;
    }
    (ring.len() == edges).then_some(ring)
}

/// Clip triangles off every reflex boundary vertex until the boundary is convex.
fn fill_to_hull(mesh: &mut Vec<[usize; 3]>, pts: &[DVec2]) {
    let Some(mut ring) = boundary_loop(mesh, pts.len()) else {
        if !mesh.is_empty() {
            log::debug!("mesh boundary is not a simple loop, hull left unfilled");
        }
        return;
    };

    let mut filled = 0;
    'clip: while ring.len() > 3 {
        let len = ring.len();
        let mut reflex = 0;
        for k in 0..len {
            let (a, b, c) = (ring[(k + len - 1) % len], ring[k], ring[(k + 1) % len]);
            let (pa, pb, pc) = (pts[a], pts[b], pts[c]);
            if orient(pa, pb, pc) >= -FLAT { continue; }
            reflex += 1;

            // The ear (a, c, b) must not swallow another boundary vertex
            let blocked = ring.iter().any(|&v| {
                let p = pts[v];
                v != a && v != b && v != c
                    && orient(pa, pc, p) > FLAT
                    && orient(pc, pb, p) > FLAT
                    && orient(pb, pa, p) > FLAT
            });
            if blocked { continue; }

            mesh.push([a, c, b]);
            ring.remove(k);
            filled += 1;
            continue 'clip;
        }
        if reflex > 0 {
            log::debug!("hull fill stalled at {reflex} reflex vertices");
        }
        break;
    }

    if filled > 0 {
        log::debug!("filled {filled} hull pockets");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(points: &[Vec2], t: &[usize]) -> f32 {
        let (a, b, c) = (points[t[0]], points[t[1]], points[t[2]]);
        (b - a).perp_dot(c - a).abs() * 0.5
    }

    #[test]
    fn square_splits_in_two() {
        let points = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
        let indices = Delaunay.triangulate(&points).unwrap();
        assert_eq!(indices.len(), 6);
        let total: f32 = indices.chunks_exact(3).map(|t| area(&points, t)).sum();
        assert!((total - 1.0).abs() < 1e-5);
    }

    #[test]
    fn grid_covers_its_hull() {
        let mut points = Vec::new();
        for y in 0..5 {
            for x in 0..6 {
                points.push(Vec2::new(x as f32 * 10.0, y as f32 * 10.0));
            }
        }
        let indices = Delaunay.triangulate(&points).unwrap();
        validate_indices(&indices, points.len()).unwrap();
        let total: f32 = indices.chunks_exact(3).map(|t| area(&points, t)).sum();
        assert!((total - 50.0 * 40.0).abs() < 1e-2, "area {total}");
        // 2n - 2 - h for a grid whose hull holds 18 points
        assert_eq!(indices.len() / 3, 2 * 30 - 2 - 18);
    }

    #[test]
    fn delaunay_property_holds() {
        let points: Vec<Vec2> = (0..40)
            .map(|i| {
                let f = i as f32;
                Vec2::new((f * 37.0) % 101.0, (f * 53.0) % 89.0)
            })
            .collect();
        let indices = Delaunay.triangulate(&points).unwrap();
        let pts: Vec<DVec2> = points.iter().map(|p| p.as_dvec2()).collect();
        for t in indices.chunks_exact(3) {
            let tri = Triangle::new([t[0], t[1], t[2]], &pts);
            for (k, p) in pts.iter().enumerate() {
                if t.contains(&k) || tri.r2 == 0.0 { continue; }
                assert!(p.distance_squared(tri.center) >= tri.r2 * (1.0 - 1e-6));
            }
        }
    }

    fn hull_area(points: &[Vec2]) -> f64 {
        let mut pts: Vec<DVec2> = points.iter().map(|p| p.as_dvec2()).collect();
        pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        pts.dedup();
        let mut hull: Vec<DVec2> = Vec::new();
        for pass in [pts.clone(), pts.into_iter().rev().collect()] {
            let base = hull.len();
            for p in pass {
                while hull.len() >= base + 2 && orient(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
                    hull.pop();
                }
                hull.push(p);
            }
            hull.pop();
        }
        (0..hull.len()).map(|i| hull[i].perp_dot(hull[(i + 1) % hull.len()])).sum::<f64>() * 0.5
    }

    #[test]
    fn ring_samples_cover_their_hull() {
        use crate::config::ShatterConfig;
        use crate::shatter::sample_rings;
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let config = ShatterConfig::default();
        let size = Vec2::new(768.0, 485.0);
        let foci = [
            Vec2::new(0.0, 242.5),
            Vec2::new(768.0, 485.0),
            Vec2::ZERO,
            Vec2::new(768.0, 0.0),
            Vec2::new(384.0, 0.0),
            Vec2::new(384.0, 242.5),
            Vec2::new(700.0, 40.0),
        ];
        for focus in foci {
            for seed in 0..200 {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let points = sample_rings(focus, size, &config.rings, config.jitter, &mut rng);
                let indices = Delaunay.triangulate(&points).unwrap();
                let pts: Vec<DVec2> = points.iter().map(|p| p.as_dvec2()).collect();
                let area: f64 = indices
                    .chunks_exact(3)
                    .map(|t| orient(pts[t[0]], pts[t[1]], pts[t[2]]).abs() * 0.5)
                    .sum();
                let hull = hull_area(&points);
                assert!((area - hull).abs() < 1e-6 * hull.max(1.0), "focus {focus} seed {seed}: {area} vs {hull}");
            }
        }
    }

    #[test]
    fn pocket_along_collinear_edge_is_filled() {
        // Fan over a long straight bottom edge, apex far enough to make clipped slivers likely
        let mut points: Vec<Vec2> = (0..=20).map(|i| Vec2::new(i as f32 * 40.0, 0.0)).collect();
        points.push(Vec2::new(400.0, 3.0));
        points.push(Vec2::new(400.0, 500.0));
        let indices = Delaunay.triangulate(&points).unwrap();
        validate_indices(&indices, points.len()).unwrap();
        let total: f32 = indices.chunks_exact(3).map(|t| area(&points, t)).sum();
        assert!((total as f64 - hull_area(&points)).abs() < 1.0, "area {total}");
    }

    #[test]
    fn filled_triangles_wind_counter_clockwise() {
        let points: Vec<Vec2> = (0..30)
            .map(|i| {
                let f = i as f32;
                Vec2::new((f * 37.0) % 101.0, (f * 53.0) % 89.0)
            })
            .collect();
        let indices = Delaunay.triangulate(&points).unwrap();
        let pts: Vec<DVec2> = points.iter().map(|p| p.as_dvec2()).collect();
        for t in indices.chunks_exact(3) {
            assert!(orient(pts[t[0]], pts[t[1]], pts[t[2]]) >= -FLAT);
        }
    }

    #[test]
    fn duplicates_are_tolerated() {
        let points = [Vec2::ZERO, Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 3.0)];
        let indices = Delaunay.triangulate(&points).unwrap();
        validate_indices(&indices, points.len()).unwrap();
        assert_eq!(indices.len(), 3);
    }

    #[test]
    fn collinear_points_give_no_area() {
        let points = [Vec2::ZERO, Vec2::X, Vec2::X * 2.0];
        let indices = Delaunay.triangulate(&points).unwrap();
        let total: f32 = indices.chunks_exact(3).map(|t| area(&points, t)).sum();
        assert_eq!(total, 0.0);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Delaunay.triangulate(&[Vec2::ZERO]), Err(TriangulationError::TooFewPoints(1)));
        let points = [Vec2::ZERO, Vec2::new(f32::NAN, 1.0), Vec2::ONE];
        assert_eq!(Delaunay.triangulate(&points), Err(TriangulationError::NonFinite { index: 1 }));
    }

    #[test]
    fn index_validation() {
        assert!(validate_indices(&[0, 1, 2], 3).is_ok());
        assert_eq!(validate_indices(&[0, 1], 3), Err(TriangulationError::MalformedIndices { len: 2 }));
        assert_eq!(
            validate_indices(&[0, 1, 5], 3),
            Err(TriangulationError::IndexOutOfRange { index: 5, len: 3 })
        );
    }
}
