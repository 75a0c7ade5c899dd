use crate::coords::{PixelRect, Vec2};
use crate::math::ops;

/// Rasterizes a square point of `size` pixels centred on `p`.
///
/// A size-1 point covers exactly the pixel containing `p`.
pub fn rasterize_point(p: Vec2, size: f32, bounds: PixelRect, mut emit: impl FnMut([usize; 2])) {
    let n = (ops::round(size) as i64).max(1);
    let half = n as f32 * 0.5;
    let x0 = ops::floor(p.x - half + 0.5) as i64;
    let y0 = ops::floor(p.y - half + 0.5) as i64;

    for y in y0.max(0)..y0 + n {
        for x in x0.max(0)..x0 + n {
            if bounds.contains(x as usize, y as usize) {
                emit([x as usize, y as usize]);
            }
        }
    }
}
