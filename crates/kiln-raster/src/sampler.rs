//! Texture sampling for fragment shaders.
//!
//! A texture is any [`Target`]: usually a [`Buffer2d`](crate::target::Buffer2d) filled by the
//! caller, or the color output of an earlier draw call. Coordinates are normalized `[u, v]`
//! with `(0, 0)` at the top-left texel corner. Sample 0 of each texel is read.
//!
//! `v` spans the full texture height. A target that only owns some rows (a tile) is read at
//! the nearest owned row.

use core::ops::Range;

use crate::math::{ops, Varying};
use crate::target::Target;

/// How coordinates outside `[0, 1]` are folded back onto the texture.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    #[default]
    Clamp,
    Repeat,
    Mirror,
}

impl WrapMode {
    /// Folds an integer texel coordinate into `0..len`. Always 0 when `len` is 0.
    #[inline]
    fn fold(self, i: i64, len: usize) -> usize {
        let n = len as i64;
        if n <= 0 {
            return 0;
        }
        let folded = match self {
            WrapMode::Clamp => i.clamp(0, n - 1),
            WrapMode::Repeat => i.rem_euclid(n),
            WrapMode::Mirror => {
                let period = i.rem_euclid(2 * n);
                if period < n { period } else { 2 * n - 1 - period }
            }
        };
        folded as usize
    }
}

/// Maps normalized texture coordinates to a value.
pub trait Sampler {
    type Sample;

    fn sample(&self, uv: [f32; 2]) -> Self::Sample;
}

/// The texels a sampler may read: width, full height and the owned rows.
///
/// Only built for targets with at least one readable texel, so every folded coordinate
/// satisfies [`Target::in_bounds`] for sample 0.
#[derive(Debug, Clone)]
struct Footprint {
    width: usize,
    height: usize,
    rows: Range<usize>,
}

impl Footprint {
    fn of<T: Target>(texture: &T) -> Option<Self> {
        let [width, height] = texture.size();
        let rows = texture.rows();
        let readable = width > 0 && texture.samples() > 0 && !rows.is_empty() && rows.end <= height;
        readable.then_some(Self { width, height, rows })
    }

    #[inline]
    fn x(&self, wrap: WrapMode, i: i64) -> usize {
        wrap.fold(i, self.width)
    }

    #[inline]
    fn y(&self, wrap: WrapMode, i: i64) -> usize {
        wrap.fold(i, self.height).clamp(self.rows.start, self.rows.end - 1)
    }
}

/// Nearest-texel sampling.
#[derive(Debug, Clone)]
pub struct Nearest<'a, T> {
    texture: &'a T,
    wrap: WrapMode,
    footprint: Footprint,
}

impl<'a, T: Target> Nearest<'a, T> {
    /// `None` when `texture` has no readable texel (zero width, no owned rows or no samples).
    pub fn new(texture: &'a T, wrap: WrapMode) -> Option<Self> {
        let footprint = Footprint::of(texture)?;
        Some(Self { texture, wrap, footprint })
    }
}

impl<T: Target> Sampler for Nearest<'_, T> {
    type Sample = T::Texel;

    fn sample(&self, [u, v]: [f32; 2]) -> T::Texel {
        let f = &self.footprint;
        let x = f.x(self.wrap, ops::floor(u * f.width as f32) as i64);
        let y = f.y(self.wrap, ops::floor(v * f.height as f32) as i64);
        // SAFETY: `Footprint` keeps x below the width and y inside the owned rows.
        unsafe { self.texture.get_unchecked([x, y], 0) }
    }
}

/// Bilinear filtering between the four nearest texel centers.
#[derive(Debug, Clone)]
pub struct Bilinear<'a, T> {
    texture: &'a T,
    wrap: WrapMode,
    footprint: Footprint,
}

impl<'a, T: Target> Bilinear<'a, T> {
    /// `None` when `texture` has no readable texel (zero width, no owned rows or no samples).
    pub fn new(texture: &'a T, wrap: WrapMode) -> Option<Self> {
        let footprint = Footprint::of(texture)?;
        Some(Self { texture, wrap, footprint })
    }
}

impl<T> Sampler for Bilinear<'_, T>
where
    T: Target,
    T::Texel: Varying,
{
    type Sample = T::Texel;

    fn sample(&self, [u, v]: [f32; 2]) -> T::Texel {
        let f = &self.footprint;
        let fx = u * f.width as f32 - 0.5;
        let fy = v * f.height as f32 - 0.5;
        let (x0, y0) = (ops::floor(fx), ops::floor(fy));
        let (tx, ty) = (fx - x0, fy - y0);

        let (x0, y0) = (x0 as i64, y0 as i64);
        let xs = [f.x(self.wrap, x0), f.x(self.wrap, x0 + 1)];
        let ys = [f.y(self.wrap, y0), f.y(self.wrap, y0 + 1)];

        // SAFETY: `Footprint` keeps every coordinate inside the readable texels.
        let texel = |x: usize, y: usize| unsafe { self.texture.get_unchecked([x, y], 0) };

        let top = T::Texel::lerp(&texel(xs[0], ys[0]), &texel(xs[1], ys[0]), tx);
        let bottom = T::Texel::lerp(&texel(xs[0], ys[1]), &texel(xs[1], ys[1]), tx);
        T::Texel::lerp(&top, &bottom, ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Buffer2d;
    use approx::assert_abs_diff_eq;

    fn ramp() -> Buffer2d<f32> {
        let mut tex = Buffer2d::new([2, 2], 0.0f32);
        tex.set([1, 0], 0, 1.0);
        tex.set([0, 1], 0, 2.0);
        tex.set([1, 1], 0, 3.0);
        tex
    }

    // ── wrap ──────────────────────────────────────────────────────────────

    #[test]
    fn wrap_modes_fold_coordinates() {
        assert_eq!(WrapMode::Clamp.fold(-3, 4), 0);
        assert_eq!(WrapMode::Clamp.fold(9, 4), 3);
        assert_eq!(WrapMode::Repeat.fold(-1, 4), 3);
        assert_eq!(WrapMode::Repeat.fold(5, 4), 1);
        assert_eq!(WrapMode::Mirror.fold(4, 4), 3);
        assert_eq!(WrapMode::Mirror.fold(-1, 4), 0);
    }

    #[test]
    fn wrap_modes_tolerate_empty_axes() {
        for wrap in [WrapMode::Clamp, WrapMode::Repeat, WrapMode::Mirror] {
            assert_eq!(wrap.fold(5, 0), 0);
            assert_eq!(wrap.fold(-5, 0), 0);
        }
    }

    // ── footprint ─────────────────────────────────────────────────────────

    #[test]
    fn empty_textures_have_no_sampler() {
        let empty = Buffer2d::new([0, 0], 1.0f32);
        assert!(Nearest::new(&empty, WrapMode::Repeat).is_none());
        assert!(Bilinear::new(&empty, WrapMode::Mirror).is_none());
        let no_rows = Buffer2d::new([4, 0], 1.0f32);
        assert!(Nearest::new(&no_rows, WrapMode::Clamp).is_none());
    }

    #[test]
    fn row_tiles_read_only_their_own_rows() {
        let mut tex = Buffer2d::new([2, 4], 0.0f32);
        for y in 0..4 {
            for x in 0..2 {
                tex.set([x, y], 0, (y * 10 + x) as f32);
            }
        }
        let tiles = tex.row_tiles(2);
        let lower = &tiles[1];
        assert_eq!(lower.get([0, 0], 0), None);

        // Rows above the band read the first owned row, rows below the last.
        let nearest = Nearest::new(lower, WrapMode::Clamp).unwrap();
        assert_eq!(nearest.sample([0.0, 0.0]), 20.0);
        assert_eq!(nearest.sample([0.75, 0.6]), 21.0);
        assert_eq!(nearest.sample([0.75, 0.9]), 31.0);

        let repeat = Nearest::new(lower, WrapMode::Repeat).unwrap();
        assert_eq!(repeat.sample([0.25, 1.1]), 20.0);

        let bilinear = Bilinear::new(lower, WrapMode::Repeat).unwrap();
        assert_abs_diff_eq!(bilinear.sample([0.25, 0.625]), 20.0);
        assert_abs_diff_eq!(bilinear.sample([0.25, 0.75]), 25.0, epsilon = 1e-6);
    }

    // ── nearest ───────────────────────────────────────────────────────────

    #[test]
    fn nearest_picks_containing_texel() {
        let tex = ramp();
        let s = Nearest::new(&tex, WrapMode::Clamp).unwrap();
        assert_eq!(s.sample([0.25, 0.25]), 0.0);
        assert_eq!(s.sample([0.75, 0.25]), 1.0);
        assert_eq!(s.sample([0.25, 0.75]), 2.0);
        assert_eq!(s.sample([1.5, 1.5]), 3.0);
    }

    #[test]
    fn nearest_repeats() {
        let tex = ramp();
        let s = Nearest::new(&tex, WrapMode::Repeat).unwrap();
        assert_eq!(s.sample([1.75, 0.25]), 1.0);
    }

    // ── bilinear ──────────────────────────────────────────────────────────

    #[test]
    fn bilinear_hits_texel_centers_exactly() {
        let tex = ramp();
        let s = Bilinear::new(&tex, WrapMode::Clamp).unwrap();
        assert_abs_diff_eq!(s.sample([0.75, 0.75]), 3.0);
        assert_abs_diff_eq!(s.sample([0.25, 0.25]), 0.0);
    }

    #[test]
    fn bilinear_blends_between_centers() {
        let tex = ramp();
        let s = Bilinear::new(&tex, WrapMode::Clamp).unwrap();
        assert_abs_diff_eq!(s.sample([0.5, 0.5]), 1.5, epsilon = 1e-6);
        assert_abs_diff_eq!(s.sample([0.5, 0.25]), 0.5, epsilon = 1e-6);
    }
}
