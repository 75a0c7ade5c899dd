use super::SUBPIXEL_ONE;

/// Sample counts with a defined pattern.
pub const SUPPORTED_SAMPLE_COUNTS: [u32; 5] = [1, 2, 4, 8, 16];

// Standard D3D positions, in 1/16 pixel relative to the pixel centre.
const PATTERN_1: [[i8; 2]; 1] = [[0, 0]];
const PATTERN_2: [[i8; 2]; 2] = [[4, 4], [-4, -4]];
const PATTERN_4: [[i8; 2]; 4] = [[-2, -6], [6, -2], [-6, 2], [2, 6]];
const PATTERN_8: [[i8; 2]; 8] = [[1, -3], [-1, 3], [5, 1], [-3, -5], [-5, 5], [-7, -1], [3, 7], [7, -7]];
const PATTERN_16: [[i8; 2]; 16] = [
    [1, 1],
    [-1, -3],
    [-3, 2],
    [4, -1],
    [-5, -2],
    [2, 5],
    [5, 3],
    [3, -5],
    [-2, 6],
    [0, -7],
    [-4, -6],
    [-6, 4],
    [-8, 0],
    [7, -4],
    [6, 7],
    [-7, -8],
];

/// Sample positions within a pixel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SamplePattern {
    offsets: &'static [[i8; 2]],
}

impl SamplePattern {
    /// Pattern for `count` samples, if supported.
    pub fn new(count: u32) -> Option<Self> {
        let offsets: &'static [[i8; 2]] = match count {
            1 => &PATTERN_1,
            2 => &PATTERN_2,
            4 => &PATTERN_4,
            8 => &PATTERN_8,
            16 => &PATTERN_16,
            _ => return None,
        };
        Some(Self { offsets })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offset of sample `i` from the pixel centre, in pixels.
    #[inline]
    pub fn offset(&self, i: usize) -> [f32; 2] {
        let [x, y] = self.offsets[i];
        [x as f32 / 16.0, y as f32 / 16.0]
    }

    /// Position of sample `i` from the pixel's top-left corner, in sub-pixel units.
    #[inline]
    pub(crate) fn fixed(&self, i: usize) -> [i64; 2] {
        let [x, y] = self.offsets[i];
        let half = SUBPIXEL_ONE / 2;
        let step = SUBPIXEL_ONE / 16;
        [half + x as i64 * step, half + y as i64 * step]
    }
}

impl Default for SamplePattern {
    fn default() -> Self {
        Self { offsets: &PATTERN_1 }
    }
}
