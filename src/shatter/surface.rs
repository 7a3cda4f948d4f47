// surface.rs - Per-fragment raster cut from the source image
//
// Pixels whose centers fall inside the triangle are copied, the rest stay
// transparent. The surface is positioned at the fragment's bounding box.

use glam::Vec2;
use image::{Rgba, RgbaImage};

use super::fragment::FragmentGeometry;

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Cut the triangle out of `source` into a surface the size of its bounds.
pub fn cut_surface(source: &RgbaImage, geometry: &FragmentGeometry) -> RgbaImage {
    let (w, h) = geometry.bounds.pixel_size();
    let origin = geometry.bounds.origin();
    let (sw, sh) = source.dimensions();
    let mut surface = RgbaImage::from_pixel(w, h, CLEAR);

    if geometry.is_degenerate() || sw == 0 || sh == 0 {
        return surface;
    }

    for (x, y, px) in surface.enumerate_pixels_mut() {
        let p = origin + Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
        if !geometry.contains(p) { continue; }
        let sx = (p.x.floor() as i64).clamp(0, sw as i64 - 1) as u32;
        let sy = (p.y.floor() as i64).clamp(0, sh as i64 - 1) as u32;
        *px = *source.get_pixel(sx, sy);
    }

    surface
}
