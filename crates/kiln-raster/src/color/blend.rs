use super::{Color, Rgba8};

/// How an incoming fragment color combines with the value already in the target.
///
/// Colors are treated as premultiplied. `Replace` never reads the target.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// `src`
    #[default]
    Replace,
    /// Source-over: `src + dst * (1 - src.a)`
    Alpha,
    /// `src + dst`, saturating
    Additive,
    /// `src * dst`
    Multiply,
}

/// A texel type the blend unit can write.
///
/// Implemented for the built-in pixel formats. Custom attachment types implement this to
/// participate in blending; `BlendMode::Replace` is the only mode that every type must
/// honor exactly.
pub trait Blend: Copy {
    fn blend(mode: BlendMode, dst: Self, src: Self) -> Self;
}

impl Blend for Color {
    #[inline]
    fn blend(mode: BlendMode, dst: Self, src: Self) -> Self {
        match mode {
            BlendMode::Replace => src,
            BlendMode::Alpha => {
                let k = 1.0 - src.a;
                Color::from_premul(
                    src.r + dst.r * k,
                    src.g + dst.g * k,
                    src.b + dst.b * k,
                    src.a + dst.a * k,
                )
            }
            BlendMode::Additive => Color::from_premul(
                (src.r + dst.r).min(1.0),
                (src.g + dst.g).min(1.0),
                (src.b + dst.b).min(1.0),
                (src.a + dst.a).min(1.0),
            ),
            BlendMode::Multiply => {
                Color::from_premul(src.r * dst.r, src.g * dst.g, src.b * dst.b, src.a * dst.a)
            }
        }
    }
}

impl Blend for Rgba8 {
    #[inline]
    fn blend(mode: BlendMode, dst: Self, src: Self) -> Self {
        match mode {
            BlendMode::Replace => src,
            BlendMode::Additive => core::array::from_fn(|i| src[i].saturating_add(dst[i])),
            _ => Color::blend(mode, Color::from_rgba8(dst), Color::from_rgba8(src)).to_rgba8(),
        }
    }
}

/// Packed `0xAARRGGBB`, the layout of most window surfaces.
impl Blend for u32 {
    #[inline]
    fn blend(mode: BlendMode, dst: Self, src: Self) -> Self {
        if mode == BlendMode::Replace {
            return src;
        }
        let unpack = |v: u32| -> Rgba8 {
            let [a, r, g, b] = v.to_be_bytes();
            [r, g, b, a]
        };
        let [r, g, b, a] = Rgba8::blend(mode, unpack(dst), unpack(src));
        u32::from_be_bytes([a, r, g, b])
    }
}

/// Single-channel intensity. `Alpha` has no coverage channel to work with and replaces.
impl Blend for f32 {
    #[inline]
    fn blend(mode: BlendMode, dst: Self, src: Self) -> Self {
        match mode {
            BlendMode::Replace | BlendMode::Alpha => src,
            BlendMode::Additive => src + dst,
            BlendMode::Multiply => src * dst,
        }
    }
}
