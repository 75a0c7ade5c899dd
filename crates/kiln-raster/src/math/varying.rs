use crate::color::Color;
use crate::coords::{Vec2, Vec4};

/// A fixed-shape bundle of values that can be linearly combined.
///
/// Implemented by everything a vertex shader hands to the rasterizer. The clipper uses
/// [`Varying::lerp`] to synthesize vertices on clip planes; the interpolator uses
/// [`Varying::weighted_sum3`] with perspective-corrected barycentric weights.
///
/// Implementations must be linear: `weighted_sum2(a, 1.0, b, 0.0) == a`.
pub trait Varying: Clone {
    /// Returns `a * wa + b * wb`.
    fn weighted_sum2(a: &Self, wa: f32, b: &Self, wb: f32) -> Self;

    /// Returns `a * wa + b * wb + c * wc`.
    fn weighted_sum3(a: &Self, wa: f32, b: &Self, wb: f32, c: &Self, wc: f32) -> Self {
        let ab = Self::weighted_sum2(a, wa, b, wb);
        Self::weighted_sum2(&ab, 1.0, c, wc)
    }

    #[inline]
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        Self::weighted_sum2(a, 1.0 - t, b, t)
    }
}

impl Varying for () {
    #[inline]
    fn weighted_sum2(_: &Self, _: f32, _: &Self, _: f32) -> Self {}

    #[inline]
    fn weighted_sum3(_: &Self, _: f32, _: &Self, _: f32, _: &Self, _: f32) -> Self {}
}

impl Varying for f32 {
    #[inline]
    fn weighted_sum2(a: &Self, wa: f32, b: &Self, wb: f32) -> Self {
        a * wa + b * wb
    }

    #[inline]
    fn weighted_sum3(a: &Self, wa: f32, b: &Self, wb: f32, c: &Self, wc: f32) -> Self {
        a * wa + b * wb + c * wc
    }
}

impl<const N: usize> Varying for [f32; N] {
    #[inline]
    fn weighted_sum2(a: &Self, wa: f32, b: &Self, wb: f32) -> Self {
        core::array::from_fn(|i| a[i] * wa + b[i] * wb)
    }

    #[inline]
    fn weighted_sum3(a: &Self, wa: f32, b: &Self, wb: f32, c: &Self, wc: f32) -> Self {
        core::array::from_fn(|i| a[i] * wa + b[i] * wb + c[i] * wc)
    }
}

impl Varying for Vec2 {
    #[inline]
    fn weighted_sum2(a: &Self, wa: f32, b: &Self, wb: f32) -> Self {
        *a * wa + *b * wb
    }
}

impl Varying for Vec4 {
    #[inline]
    fn weighted_sum2(a: &Self, wa: f32, b: &Self, wb: f32) -> Self {
        *a * wa + *b * wb
    }
}

impl Varying for Color {
    #[inline]
    fn weighted_sum2(a: &Self, wa: f32, b: &Self, wb: f32) -> Self {
        Color::from_premul(
            a.r * wa + b.r * wb,
            a.g * wa + b.g * wb,
            a.b * wa + b.b * wb,
            a.a * wa + b.a * wb,
        )
    }
}

macro_rules! impl_varying_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Varying),+> Varying for ($($name,)+) {
            #[inline]
            fn weighted_sum2(a: &Self, wa: f32, b: &Self, wb: f32) -> Self {
                ($($name::weighted_sum2(&a.$idx, wa, &b.$idx, wb),)+)
            }

            #[inline]
            fn weighted_sum3(a: &Self, wa: f32, b: &Self, wb: f32, c: &Self, wc: f32) -> Self {
                ($($name::weighted_sum3(&a.$idx, wa, &b.$idx, wb, &c.$idx, wc),)+)
            }
        }
    };
}

impl_varying_tuple!(A 0);
impl_varying_tuple!(A 0, B 1);
impl_varying_tuple!(A 0, B 1, C 2);
impl_varying_tuple!(A 0, B 1, C 2, D 3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_lerp_endpoints() {
        assert_eq!(f32::lerp(&2.0, &4.0, 0.0), 2.0);
        assert_eq!(f32::lerp(&2.0, &4.0, 1.0), 4.0);
        assert_eq!(f32::lerp(&2.0, &4.0, 0.5), 3.0);
    }

    #[test]
    fn arrays_combine_componentwise() {
        let out = <[f32; 2]>::weighted_sum3(&[1.0, 0.0], 0.5, &[0.0, 1.0], 0.25, &[2.0, 2.0], 0.25);
        assert_eq!(out, [1.0, 0.75]);
    }

    #[test]
    fn tuples_combine_each_field() {
        let a = (1.0f32, [0.0f32, 2.0]);
        let b = (3.0f32, [4.0f32, 0.0]);
        let m = <(f32, [f32; 2])>::lerp(&a, &b, 0.5);
        assert_eq!(m, (2.0, [2.0, 1.0]));
    }

    #[test]
    fn colors_combine_premultiplied() {
        let c = Color::weighted_sum2(&Color::white(), 0.5, &Color::transparent(), 0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.5, 0.5, 0.5));
    }
}
