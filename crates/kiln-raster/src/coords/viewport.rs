use crate::math::ops;

use super::{PixelRect, Vec2};

/// Viewport rectangle in screen pixels.
///
/// Maps NDC `[-1, 1]²` (+Y up) onto the rectangle (+Y down). Fractional origins
/// and sizes are allowed; coverage is always clamped to the target afterwards.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering a whole `[width, height]` target.
    #[inline]
    pub fn from_size([width, height]: [usize; 2]) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Converts NDC x/y to screen pixels.
    #[inline]
    pub fn ndc_to_screen(self, ndc_x: f32, ndc_y: f32) -> Vec2 {
        Vec2::new(
            self.x + (ndc_x + 1.0) * 0.5 * self.width,
            self.y + (1.0 - ndc_y) * 0.5 * self.height,
        )
    }

    /// Smallest pixel rectangle containing the viewport, clipped at the origin.
    pub fn pixel_bounds(self) -> PixelRect {
        let x0 = ops::floor(self.x.max(0.0));
        let y0 = ops::floor(self.y.max(0.0));
        let x1 = ops::ceil((self.x + self.width).max(0.0));
        let y1 = ops::ceil((self.y + self.height).max(0.0));
        PixelRect::new(x0 as usize, y0 as usize, (x1 - x0) as usize, (y1 - y0) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_corners_map_to_screen_corners() {
        let vp = Viewport::from_size([4, 4]);
        assert_eq!(vp.ndc_to_screen(-1.0, 1.0), Vec2::new(0.0, 0.0));
        assert_eq!(vp.ndc_to_screen(1.0, -1.0), Vec2::new(4.0, 4.0));
        assert_eq!(vp.ndc_to_screen(0.0, 0.0), Vec2::new(2.0, 2.0));
    }

    #[test]
    fn offset_viewport_translates() {
        let vp = Viewport::new(10.0, 20.0, 4.0, 2.0);
        assert_eq!(vp.ndc_to_screen(-1.0, 1.0), Vec2::new(10.0, 20.0));
        assert_eq!(vp.pixel_bounds(), PixelRect::new(10, 20, 4, 2));
    }

    #[test]
    fn fractional_viewport_bounds_round_outwards() {
        let vp = Viewport::new(-1.5, 0.25, 4.0, 2.5);
        assert_eq!(vp.pixel_bounds(), PixelRect::new(0, 0, 3, 3));
    }

    #[test]
    fn validity() {
        assert!(Viewport::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!Viewport::new(0.0, 0.0, 0.0, 1.0).is_valid());
        assert!(!Viewport::new(0.0, 0.0, f32::INFINITY, 1.0).is_valid());
        assert!(!Viewport::new(f32::NAN, 0.0, 1.0, 1.0).is_valid());
    }
}
