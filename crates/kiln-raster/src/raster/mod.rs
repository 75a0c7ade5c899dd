//! Rasterizer core.
//!
//! Turns screen-space primitives into covered pixels or samples. Nothing here knows about
//! shaders or targets: every routine takes a pixel bounds rectangle (viewport ∩ scissor ∩
//! target ∩ owned rows) and reports coverage through a callback.
//!
//! Screen space has its origin at the top-left corner, +Y down, and pixel centres at
//! `(x + 0.5, y + 0.5)`.

mod line;
mod point;
mod samples;
mod triangle;

pub use line::{line_pixels, rasterize_line, LinePixels};
pub use point::rasterize_point;
pub use samples::{SamplePattern, SUPPORTED_SAMPLE_COUNTS};
pub use triangle::TriangleSetup;

use crate::coords::{Vec2, Vec4, Viewport};
use crate::math::ops;

/// Fractional bits of the fixed-point vertex snap.
pub const SUBPIXEL_BITS: u32 = 8;

pub(crate) const SUBPIXEL_ONE: i64 = 1 << SUBPIXEL_BITS;

/// Snapped coordinates are clamped to this magnitude so edge products fit in `i64`.
const MAX_FIXED: i64 = 1 << 28;

#[inline]
pub(crate) fn to_fixed(v: f32) -> i64 {
    let snapped = ops::round(v * SUBPIXEL_ONE as f32);
    // `as` saturates and maps NaN to 0.
    (snapped as i64).clamp(-MAX_FIXED, MAX_FIXED)
}

/// Winding of a triangle as displayed (screen space, +Y down).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Which triangles to discard before rasterization, by displayed winding.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CullMode {
    #[default]
    None,
    Clockwise,
    CounterClockwise,
}

impl CullMode {
    #[inline]
    pub fn culls(self, winding: Winding) -> bool {
        match self {
            CullMode::None => false,
            CullMode::Clockwise => winding == Winding::Clockwise,
            CullMode::CounterClockwise => winding == Winding::CounterClockwise,
        }
    }
}

/// A vertex after the perspective divide and viewport transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenVertex {
    pub position: Vec2,
    /// Window depth, already mapped into the depth range.
    pub depth: f32,
    /// `1 / w`, kept for perspective-correct interpolation.
    pub inv_w: f32,
}

/// Perspective divide plus viewport and depth range mapping.
///
/// `clip.w` must be positive; the clipper guarantees this for everything it lets through.
#[inline]
pub fn project(clip: Vec4, viewport: Viewport, (near, far): (f32, f32)) -> ScreenVertex {
    let inv_w = 1.0 / clip.w;
    let ndc_z = clip.z * inv_w;
    ScreenVertex {
        position: viewport.ndc_to_screen(clip.x * inv_w, clip.y * inv_w),
        depth: near + ndc_z * (far - near),
        inv_w,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn project_maps_ndc_corners() {
        let vp = Viewport::from_size([4, 4]);
        let lo = project(Vec4::new(-2.0, -2.0, 0.0, 2.0), vp, (0.0, 1.0));
        assert_eq!(lo.position, Vec2::new(0.0, 4.0));
        assert_eq!(lo.depth, 0.0);
        assert_eq!(lo.inv_w, 0.5);

        let hi = project(Vec4::new(1.0, 1.0, 1.0, 1.0), vp, (0.25, 0.75));
        assert_eq!(hi.position, Vec2::new(4.0, 0.0));
        assert_relative_eq!(hi.depth, 0.75);
    }

    #[test]
    fn fixed_point_snaps_to_subpixels() {
        assert_eq!(to_fixed(1.0), 256);
        assert_eq!(to_fixed(0.5), 128);
        assert_eq!(to_fixed(-0.25), -64);
        assert_eq!(to_fixed(f32::NAN), 0);
        assert_eq!(to_fixed(1.0e12), MAX_FIXED);
    }

    #[test]
    fn cull_modes() {
        assert!(!CullMode::None.culls(Winding::Clockwise));
        assert!(CullMode::Clockwise.culls(Winding::Clockwise));
        assert!(!CullMode::Clockwise.culls(Winding::CounterClockwise));
        assert!(CullMode::CounterClockwise.culls(Winding::CounterClockwise));
    }
}
