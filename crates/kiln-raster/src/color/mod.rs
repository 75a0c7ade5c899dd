//! Pixel formats, blending and multisample resolve.
//!
//! Scope:
//! - [`Color`]: linear premultiplied RGBA (`f32`)
//! - [`Rgba8`]: premultiplied RGBA bytes, the usual export format
//! - [`Blend`]: how a texel type combines an incoming fragment with the stored value
//! - [`Resolve`]: how a texel type averages its samples

mod blend;
mod resolve;

pub use blend::{Blend, BlendMode};
pub use resolve::Resolve;

use bytemuck::{Pod, Zeroable};

/// Premultiplied RGBA bytes (`[r, g, b, a]`).
pub type Rgba8 = [u8; 4];

/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Opaque color from straight components.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a premultiplied color from straight bytes (`0`–`255`).
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    /// Quantizes to premultiplied bytes.
    #[inline]
    pub fn to_rgba8(self) -> Rgba8 {
        let c = self.clamped();
        [to_u8(c.r), to_u8(c.g), to_u8(c.b), to_u8(c.a)]
    }

    /// Quantizes to straight-alpha bytes, the layout image encoders expect.
    #[inline]
    pub fn to_straight_rgba8(self) -> Rgba8 {
        let (r, g, b, a) = self.clamped().to_straight();
        [to_u8(r), to_u8(g), to_u8(b), to_u8(a)]
    }

    /// Expands premultiplied bytes.
    #[inline]
    pub fn from_rgba8([r, g, b, a]: Rgba8) -> Self {
        Self::from_premul(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Clamps all channels to [0, 1] and enforces premultiplication.
    #[inline]
    pub fn clamped(self) -> Self {
        let a = self.a.clamp(0.0, 1.0);

        // Clamp premultiplied rgb so it cannot exceed alpha.
        let r = self.r.clamp(0.0, a);
        let g = self.g.clamp(0.0, a);
        let b = self.b.clamp(0.0, a);

        Self { r, g, b, a }
    }

    /// Scales every channel (including alpha) by `k`.
    #[inline]
    pub fn scaled(self, k: f32) -> Self {
        Self::from_premul(self.r * k, self.g * k, self.b * k, self.a * k)
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_roundtrip_keeps_channels() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.25, 0.0, 0.5));
        assert_eq!(c.to_straight(), (1.0, 0.5, 0.0, 0.5));
    }

    #[test]
    fn transparent_straight_is_zero() {
        assert_eq!(Color::transparent().to_straight(), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn clamped_enforces_premultiplication() {
        let c = Color::from_premul(2.0, 0.2, -1.0, 0.5).clamped();
        assert_eq!(c, Color::from_premul(0.5, 0.2, 0.0, 0.5));
    }

    #[test]
    fn byte_conversions() {
        assert_eq!(Color::white().to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Color::from_straight(1.0, 0.0, 0.0, 0.5).to_rgba8(), [128, 0, 0, 128]);
        assert_eq!(Color::from_straight(1.0, 0.0, 0.0, 0.5).to_straight_rgba8(), [255, 0, 0, 128]);
        assert_eq!(Color::from_rgba8([255, 0, 0, 255]), Color::rgb(1.0, 0.0, 0.0));
    }
}
