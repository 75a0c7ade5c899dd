use core::ops::Range;

/// Axis-aligned rectangle of whole pixels (top-left origin, half-open).
///
/// Used for scissor rectangles, tile bounds and rasterization bounding boxes.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl PixelRect {
    #[inline]
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle covering a whole `[width, height]` target.
    #[inline]
    pub const fn from_size([width, height]: [usize; 2]) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub const fn max_x(self) -> usize {
        self.x + self.width
    }

    #[inline]
    pub const fn max_y(self) -> usize {
        self.y + self.height
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn xs(self) -> Range<usize> {
        self.x..self.max_x()
    }

    #[inline]
    pub fn ys(self) -> Range<usize> {
        self.y..self.max_y()
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, x: usize, y: usize) -> bool {
        x >= self.x && y >= self.y && x < self.max_x() && y < self.max_y()
    }

    #[inline]
    pub fn intersect(self, other: PixelRect) -> Option<PixelRect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.max_x().min(other.max_x());
        let y1 = self.max_y().min(other.max_y());

        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(PixelRect::new(x0, y0, x1 - x0, y1 - y0))
        }
    }

    /// Restricts the rectangle to a band of rows.
    #[inline]
    pub fn clamp_rows(self, rows: Range<usize>) -> Option<PixelRect> {
        let y0 = self.y.max(rows.start);
        let y1 = self.max_y().min(rows.end);
        if y1 <= y0 || self.width == 0 {
            None
        } else {
            Some(PixelRect::new(self.x, y0, self.width, y1 - y0))
        }
    }
}
