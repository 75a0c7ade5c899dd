use crate::coords::{PixelRect, Vec2};
use crate::math::ops;

/// Bresenham walk from `from` to `to`, both endpoints included.
///
/// Yields one pixel per step along the major axis, in order from `from`.
#[derive(Debug, Clone)]
pub struct LinePixels {
    pos: [i64; 2],
    step: [i64; 2],
    dx: i64,
    dy: i64,
    err: i64,
    remaining: usize,
}

pub fn line_pixels(from: [i64; 2], to: [i64; 2]) -> LinePixels {
    let dx = (to[0] - from[0]).abs();
    let dy = -(to[1] - from[1]).abs();
    LinePixels {
        pos: from,
        step: [(to[0] - from[0]).signum(), (to[1] - from[1]).signum()],
        dx,
        dy,
        err: dx + dy,
        remaining: dx.max(-dy) as usize + 1,
    }
}

impl Iterator for LinePixels {
    type Item = [i64; 2];

    fn next(&mut self) -> Option<[i64; 2]> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.pos;
        self.remaining -= 1;

        if self.remaining > 0 {
            let e2 = 2 * self.err;
            if e2 >= self.dy {
                self.err += self.dy;
                self.pos[0] += self.step[0];
            }
            if e2 <= self.dx {
                self.err += self.dx;
                self.pos[1] += self.step[1];
            }
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LinePixels {}

/// Rasterizes a screen-space segment `width` pixels thick.
///
/// Endpoints are taken as the pixels containing `a` and `b`. Extra thickness is added
/// along the minor axis. `emit` receives each pixel inside `bounds` together with the
/// screen-space parameter `t ∈ [0, 1]` of its step.
pub fn rasterize_line(a: Vec2, b: Vec2, width: f32, bounds: PixelRect, mut emit: impl FnMut([usize; 2], f32)) {
    let from = [ops::floor(a.x) as i64, ops::floor(a.y) as i64];
    let to = [ops::floor(b.x) as i64, ops::floor(b.y) as i64];
    let x_major = (to[0] - from[0]).abs() >= (to[1] - from[1]).abs();

    let thickness = (ops::round(width) as i64).max(1);
    let first = -(thickness - 1) / 2;

    let pixels = line_pixels(from, to);
    let last = pixels.len().saturating_sub(1).max(1) as f32;

    for (k, [x, y]) in pixels.enumerate() {
        let t = k as f32 / last;
        for o in first..first + thickness {
            let (px, py) = if x_major { (x, y + o) } else { (x + o, y) };
            if px < 0 || py < 0 {
                continue;
            }
            let (px, py) = (px as usize, py as usize);
            if bounds.contains(px, py) {
                emit([px, py], t);
            }
        }
    }
}
