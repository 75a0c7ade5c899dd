use crate::coords::{PixelRect, Vec2};

use super::samples::SamplePattern;
use super::{to_fixed, Winding, SUBPIXEL_ONE};

/// Integer edge function `E(p) = a·p.x + b·p.y + c`, positive on the inner side.
#[derive(Debug, Copy, Clone)]
struct Edge {
    a: i64,
    b: i64,
    c: i64,
    /// 0 for top and left edges, 1 otherwise: samples exactly on the edge need `E > 0`.
    bias: i64,
}

impl Edge {
    fn new([x0, y0]: [i64; 2], [x1, y1]: [i64; 2]) -> Self {
        let (dx, dy) = (x1 - x0, y1 - y0);
        let top = dy == 0 && dx > 0;
        let left = dy < 0;
        Self {
            a: -dy,
            b: dx,
            c: dy * x0 - dx * y0,
            bias: if top || left { 0 } else { 1 },
        }
    }

    #[inline]
    fn eval(&self, x: i64, y: i64) -> i64 {
        self.a * x + self.b * y + self.c
    }
}

/// A triangle snapped to the sub-pixel grid, ready for coverage tests.
///
/// Vertices are reordered internally so the edge functions are positive inside; the
/// barycentric weights reported by [`TriangleSetup::rasterize`] always refer to the
/// caller's original vertex order.
#[derive(Debug, Clone)]
pub struct TriangleSetup {
    edges: [Edge; 3],
    area: i64,
    winding: Winding,
    swapped: bool,
    min: [i64; 2],
    max: [i64; 2],
}

impl TriangleSetup {
    /// Returns `None` for triangles with zero area after snapping.
    pub fn new(positions: [Vec2; 3]) -> Option<Self> {
        let mut v = positions.map(|p| [to_fixed(p.x), to_fixed(p.y)]);

        let area = Edge::new(v[0], v[1]).eval(v[2][0], v[2][1]);
        if area == 0 {
            return None;
        }

        let winding = if area > 0 { Winding::Clockwise } else { Winding::CounterClockwise };
        let swapped = area < 0;
        if swapped {
            v.swap(1, 2);
        }

        // Edge i is opposite vertex i, so it yields that vertex's weight.
        let edges = [Edge::new(v[1], v[2]), Edge::new(v[2], v[0]), Edge::new(v[0], v[1])];

        let min = [v[0][0].min(v[1][0]).min(v[2][0]), v[0][1].min(v[1][1]).min(v[2][1])];
        let max = [v[0][0].max(v[1][0]).max(v[2][0]), v[0][1].max(v[1][1]).max(v[2][1])];

        Some(Self { edges, area: area.abs(), winding, swapped, min, max })
    }

    #[inline]
    pub fn winding(&self) -> Winding {
        self.winding
    }

    /// Pixels whose sample positions may be covered, clipped to `bounds`.
    pub fn pixel_bounds(&self, bounds: PixelRect) -> Option<PixelRect> {
        let x0 = self.min[0].div_euclid(SUBPIXEL_ONE).max(0);
        let y0 = self.min[1].div_euclid(SUBPIXEL_ONE).max(0);
        let x1 = self.max[0].div_euclid(SUBPIXEL_ONE) + 1;
        let y1 = self.max[1].div_euclid(SUBPIXEL_ONE) + 1;
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        PixelRect::new(x0 as usize, y0 as usize, (x1 - x0) as usize, (y1 - y0) as usize).intersect(bounds)
    }

    /// Calls `emit(pixel, sample, barycentric)` for every covered sample in `bounds`.
    ///
    /// Rows are visited top to bottom, pixels left to right, samples in pattern order.
    /// A sample exactly on an edge is covered only if that edge is a top or left edge.
    pub fn rasterize(
        &self,
        bounds: PixelRect,
        pattern: &SamplePattern,
        mut emit: impl FnMut([usize; 2], usize, [f32; 3]),
    ) -> usize {
        let Some(rect) = self.pixel_bounds(bounds) else {
            return 0;
        };

        let offsets: Vec<[i64; 3]> = (0..pattern.len())
            .map(|s| {
                let [ox, oy] = pattern.fixed(s);
                self.edges.map(|e| e.a * ox + e.b * oy - e.bias)
            })
            .collect();
        let step = self.edges.map(|e| e.a * SUBPIXEL_ONE);
        let inv_area = 1.0 / self.area as f32;

        let mut covered = 0;
        for y in rect.ys() {
            let py = y as i64 * SUBPIXEL_ONE;
            let px = rect.x as i64 * SUBPIXEL_ONE;
            let mut row = self.edges.map(|e| e.eval(px, py));

            for x in rect.xs() {
                for (s, off) in offsets.iter().enumerate() {
                    let biased = [row[0] + off[0], row[1] + off[1], row[2] + off[2]];
                    if biased[0] < 0 || biased[1] < 0 || biased[2] < 0 {
                        continue;
                    }

                    let e = [0, 1, 2].map(|i| (biased[i] + self.edges[i].bias) as f32 * inv_area);
                    let bary = if self.swapped { [e[0], e[2], e[1]] } else { e };
                    emit([x, y], s, bary);
                    covered += 1;
                }

                for i in 0..3 {
                    row[i] += step[i];
                }
            }
        }
        covered
    }
}
