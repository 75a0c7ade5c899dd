//! Depth, stencil and blend.
//!
//! Per sample, in order: stencil test, depth test, depth write, stencil update, blend and
//! color write. A sample failing either test mutates no attachment. Tests on unattached
//! targets (see [`Target::ATTACHED`]) always pass.

use crate::color::{Blend, BlendMode};
use crate::pipeline::Attachments;
use crate::target::Target;

/// Comparison between an incoming value and the stored one.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum CompareFunc {
    Always,
    Never,
    #[default]
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
}

impl CompareFunc {
    /// `incoming <op> stored`
    #[inline]
    pub fn test<T: PartialOrd>(self, incoming: T, stored: T) -> bool {
        match self {
            CompareFunc::Always => true,
            CompareFunc::Never => false,
            CompareFunc::Less => incoming < stored,
            CompareFunc::LessEqual => incoming <= stored,
            CompareFunc::Greater => incoming > stored,
            CompareFunc::GreaterEqual => incoming >= stored,
            CompareFunc::Equal => incoming == stored,
            CompareFunc::NotEqual => incoming != stored,
        }
    }
}

/// Depth test configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DepthState {
    pub compare: CompareFunc,
    pub write: bool,
}

impl Default for DepthState {
    fn default() -> Self {
        Self { compare: CompareFunc::Less, write: true }
    }
}

impl DepthState {
    /// Test always passes, depth is never written.
    pub const DISABLED: DepthState = DepthState { compare: CompareFunc::Always, write: false };

    pub const fn new(compare: CompareFunc, write: bool) -> Self {
        Self { compare, write }
    }
}

/// Stencil update applied when a sample passes both tests.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum StencilOp {
    #[default]
    Keep,
    Zero,
    Replace,
    IncrementClamp,
    DecrementClamp,
    Invert,
    IncrementWrap,
    DecrementWrap,
}

impl StencilOp {
    #[inline]
    pub fn apply(self, value: u8, reference: u8) -> u8 {
        match self {
            StencilOp::Keep => value,
            StencilOp::Zero => 0,
            StencilOp::Replace => reference,
            StencilOp::IncrementClamp => value.saturating_add(1),
            StencilOp::DecrementClamp => value.saturating_sub(1),
            StencilOp::Invert => !value,
            StencilOp::IncrementWrap => value.wrapping_add(1),
            StencilOp::DecrementWrap => value.wrapping_sub(1),
        }
    }
}

/// Stencil test configuration.
///
/// The test compares `reference & read_mask` against `stored & read_mask`. Only bits in
/// `write_mask` are updated by `pass_op`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StencilState {
    pub compare: CompareFunc,
    pub reference: u8,
    pub read_mask: u8,
    pub write_mask: u8,
    pub pass_op: StencilOp,
}

impl Default for StencilState {
    fn default() -> Self {
        Self {
            compare: CompareFunc::Always,
            reference: 0,
            read_mask: 0xff,
            write_mask: 0xff,
            pass_op: StencilOp::Keep,
        }
    }
}

impl StencilState {
    #[inline]
    pub fn passes(&self, stored: u8) -> bool {
        self.compare.test(self.reference & self.read_mask, stored & self.read_mask)
    }

    /// New stored value after a passing sample.
    #[inline]
    pub fn updated(&self, stored: u8) -> u8 {
        let next = self.pass_op.apply(stored, self.reference);
        (stored & !self.write_mask) | (next & self.write_mask)
    }
}

/// Fixed-function state of the output stage.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct OutputMerger {
    pub depth: DepthState,
    pub stencil: Option<StencilState>,
    pub blend: BlendMode,
}

impl OutputMerger {
    /// Runs the tests for one sample and commits on success. Returns whether color was written.
    pub fn commit<C, D, S>(
        &self,
        targets: &mut Attachments<C, D, S>,
        pixel: [usize; 2],
        sample: usize,
        color: C::Texel,
        depth: f32,
    ) -> bool
    where
        C: Target,
        C::Texel: Blend,
        D: Target<Texel = f32>,
        S: Target<Texel = u8>,
    {
        let stencil = match (&self.stencil, S::ATTACHED) {
            (Some(state), true) => {
                let Some(stored) = targets.stencil.get(pixel, sample) else {
                    return false;
                };
                if !state.passes(stored) {
                    return false;
                }
                Some((state, stored))
            }
            _ => None,
        };

        if D::ATTACHED {
            let Some(stored) = targets.depth.get(pixel, sample) else {
                return false;
            };
            if !self.depth.compare.test(depth, stored) {
                return false;
            }
            if self.depth.write {
                targets.depth.set(pixel, sample, depth);
            }
        }

        if let Some((state, stored)) = stencil {
            let next = state.updated(stored);
            if next != stored {
                targets.stencil.set(pixel, sample, next);
            }
        }

        let out = match self.blend {
            BlendMode::Replace => color,
            mode => match targets.color.get(pixel, sample) {
                Some(dst) => C::Texel::blend(mode, dst, color),
                None => return false,
            },
        };
        targets.color.set(pixel, sample, out)
    }
}
