//! Attribute interpolation.
//!
//! Screen-space barycentric weights are not linear in clip space once a perspective divide
//! happened. Varyings are therefore blended with weights `bᵢ/wᵢ`, renormalized. Depth is
//! the exception: it was divided by `w` already and is blended linearly in screen space.

use crate::math::Varying;
use crate::raster::ScreenVertex;
use crate::shader::ClipVertex;

/// Converts screen-space barycentrics into perspective-correct ones.
///
/// Falls back to the screen weights if the corrected sum vanishes.
#[inline]
pub fn perspective_weights(bary: [f32; 3], inv_w: [f32; 3]) -> [f32; 3] {
    let p = [bary[0] * inv_w[0], bary[1] * inv_w[1], bary[2] * inv_w[2]];
    let sum = p[0] + p[1] + p[2];
    if sum.abs() > f32::MIN_POSITIVE {
        let inv = 1.0 / sum;
        [p[0] * inv, p[1] * inv, p[2] * inv]
    } else {
        bary
    }
}

/// Perspective-correct version of a screen-space line parameter.
#[inline]
pub fn perspective_t(t: f32, inv_w: [f32; 2]) -> f32 {
    let a = (1.0 - t) * inv_w[0];
    let b = t * inv_w[1];
    let sum = a + b;
    if sum.abs() > f32::MIN_POSITIVE { b / sum } else { t }
}

/// Interpolates varyings and depth across one projected triangle.
#[derive(Debug)]
pub struct TriangleInterpolator<'a, Vy> {
    varyings: [&'a Vy; 3],
    inv_w: [f32; 3],
    depth: [f32; 3],
}

impl<'a, Vy: Varying> TriangleInterpolator<'a, Vy> {
    pub fn new(vertices: [&'a ClipVertex<Vy>; 3], screen: &[ScreenVertex; 3]) -> Self {
        Self {
            varyings: vertices.map(|v| &v.varyings),
            inv_w: screen.map(|s| s.inv_w),
            depth: screen.map(|s| s.depth),
        }
    }

    /// Varyings and window depth at screen barycentrics `bary`.
    #[inline]
    pub fn at(&self, bary: [f32; 3]) -> (Vy, f32) {
        let w = perspective_weights(bary, self.inv_w);
        let [a, b, c] = self.varyings;
        let varyings = Vy::weighted_sum3(a, w[0], b, w[1], c, w[2]);
        let depth = bary[0] * self.depth[0] + bary[1] * self.depth[1] + bary[2] * self.depth[2];
        (varyings, depth)
    }
}

/// Interpolates varyings and depth along one projected segment.
#[derive(Debug)]
pub struct LineInterpolator<'a, Vy> {
    varyings: [&'a Vy; 2],
    inv_w: [f32; 2],
    depth: [f32; 2],
}

impl<'a, Vy: Varying> LineInterpolator<'a, Vy> {
    pub fn new(vertices: [&'a ClipVertex<Vy>; 2], screen: &[ScreenVertex; 2]) -> Self {
        Self {
            varyings: vertices.map(|v| &v.varyings),
            inv_w: screen.map(|s| s.inv_w),
            depth: screen.map(|s| s.depth),
        }
    }

    /// Varyings and window depth at screen parameter `t`.
    #[inline]
    pub fn at(&self, t: f32) -> (Vy, f32) {
        let tp = perspective_t(t, self.inv_w);
        let varyings = Vy::lerp(self.varyings[0], self.varyings[1], tp);
        let depth = self.depth[0] + (self.depth[1] - self.depth[0]) * t;
        (varyings, depth)
    }
}
