//! Float operations with unspecified precision, selected at compile time.
//!
//! The pipeline never calls `f32::sqrt`/`sin`/... directly; it goes through this module so
//! that the `libm` feature can swap in a portable software implementation for constrained
//! targets without touching pipeline logic.

#[cfg(not(feature = "libm"))]
mod std_ops {
    #[inline(always)]
    pub fn sqrt(x: f32) -> f32 {
        f32::sqrt(x)
    }

    #[inline(always)]
    pub fn floor(x: f32) -> f32 {
        f32::floor(x)
    }

    #[inline(always)]
    pub fn ceil(x: f32) -> f32 {
        f32::ceil(x)
    }

    #[inline(always)]
    pub fn round(x: f32) -> f32 {
        f32::round(x)
    }

    #[inline(always)]
    pub fn sin(x: f32) -> f32 {
        f32::sin(x)
    }

    #[inline(always)]
    pub fn cos(x: f32) -> f32 {
        f32::cos(x)
    }

    #[inline(always)]
    pub fn tan(x: f32) -> f32 {
        f32::tan(x)
    }
}

#[cfg(feature = "libm")]
mod libm_ops {
    #[inline(always)]
    pub fn sqrt(x: f32) -> f32 {
        libm::sqrtf(x)
    }

    #[inline(always)]
    pub fn floor(x: f32) -> f32 {
        libm::floorf(x)
    }

    #[inline(always)]
    pub fn ceil(x: f32) -> f32 {
        libm::ceilf(x)
    }

    #[inline(always)]
    pub fn round(x: f32) -> f32 {
        libm::roundf(x)
    }

    #[inline(always)]
    pub fn sin(x: f32) -> f32 {
        libm::sinf(x)
    }

    #[inline(always)]
    pub fn cos(x: f32) -> f32 {
        libm::cosf(x)
    }

    #[inline(always)]
    pub fn tan(x: f32) -> f32 {
        libm::tanf(x)
    }
}

#[cfg(not(feature = "libm"))]
pub use std_ops::*;

#[cfg(feature = "libm")]
pub use libm_ops::*;

/// Absolute value. Exact, so it needs no backend.
#[inline(always)]
pub fn abs(x: f32) -> f32 {
    f32::abs(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn backend_agrees_with_known_values() {
        assert_eq!(sqrt(9.0), 3.0);
        assert_eq!(floor(-0.5), -1.0);
        assert_eq!(ceil(0.25), 1.0);
        assert_eq!(round(2.5), 3.0);
        assert_abs_diff_eq!(sin(0.0), 0.0);
        assert_abs_diff_eq!(cos(0.0), 1.0);
        assert_abs_diff_eq!(tan(core::f32::consts::FRAC_PI_4), 1.0, epsilon = 1e-6);
        assert_eq!(abs(-2.0), 2.0);
    }
}
