use core::ops::Range;

use crate::error::DrawError;
use crate::target::{Empty, Target, Tiled};

/// The targets one draw call writes into.
///
/// Depth texels are `f32`, stencil texels `u8`. Absent attachments are [`Empty`], which
/// turns the corresponding test off.
#[derive(Debug)]
pub struct Attachments<C, D = Empty<f32>, S = Empty<u8>> {
    pub color: C,
    pub depth: D,
    pub stencil: S,
}

impl<C> Attachments<C> {
    pub fn color_only(color: C) -> Self {
        Self { color, depth: Empty::new(), stencil: Empty::new() }
    }
}

impl<C, D> Attachments<C, D> {
    pub fn with_depth(color: C, depth: D) -> Self {
        Self { color, depth, stencil: Empty::new() }
    }
}

impl<C, D, S> Attachments<C, D, S> {
    pub fn with_depth_stencil(color: C, depth: D, stencil: S) -> Self {
        Self { color, depth, stencil }
    }

    pub fn into_parts(self) -> (C, D, S) {
        (self.color, self.depth, self.stencil)
    }

    /// Every attached target must match the color target's size and the sample count.
    pub(crate) fn check(&self, samples: usize) -> Result<(), DrawError>
    where
        C: Target,
        D: Target,
        S: Target,
    {
        let found = self.color.samples();
        if found != samples {
            return Err(DrawError::SampleCountMismatch { attachment: "color", expected: samples, found });
        }
        let size = self.color.size();
        check_attachment("depth", &self.depth, size, samples)?;
        check_attachment("stencil", &self.stencil, size, samples)
    }

    /// Splits every attachment along the same row bands.
    pub(crate) fn split_rows(
        &mut self,
        bands: &[Range<usize>],
    ) -> Vec<Attachments<C::Tile<'_>, D::Tile<'_>, S::Tile<'_>>>
    where
        C: Tiled,
        D: Tiled,
        S: Tiled,
    {
        let colors = self.color.split_rows(bands);
        let depths = self.depth.split_rows(bands);
        let stencils = self.stencil.split_rows(bands);

        colors
            .into_iter()
            .zip(depths)
            .zip(stencils)
            .map(|((color, depth), stencil)| Attachments { color, depth, stencil })
            .collect()
    }
}

fn check_attachment<T: Target>(
    attachment: &'static str,
    target: &T,
    size: [usize; 2],
    samples: usize,
) -> Result<(), DrawError> {
    if !T::ATTACHED {
        return Ok(());
    }
    if target.size() != size {
        return Err(DrawError::TargetSizeMismatch { attachment, expected: size, found: target.size() });
    }
    if target.samples() != samples {
        return Err(DrawError::SampleCountMismatch { attachment, expected: samples, found: target.samples() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Buffer2d;

    #[test]
    fn matching_targets_pass() {
        let a = Attachments::with_depth(Buffer2d::new([4, 4], 0u32), Buffer2d::new([4, 4], 1.0f32));
        assert_eq!(a.check(1), Ok(()));
    }

    #[test]
    fn size_mismatch_names_attachment() {
        let a = Attachments::with_depth(Buffer2d::new([4, 4], 0u32), Buffer2d::new([2, 4], 1.0f32));
        assert_eq!(
            a.check(1),
            Err(DrawError::TargetSizeMismatch { attachment: "depth", expected: [4, 4], found: [2, 4] })
        );
    }

    #[test]
    fn sample_mismatch_is_reported() {
        let a = Attachments::color_only(Buffer2d::new([4, 4], 0u32));
        assert_eq!(
            a.check(4),
            Err(DrawError::SampleCountMismatch { attachment: "color", expected: 4, found: 1 })
        );

        let b = Attachments::with_depth_stencil(
            Buffer2d::with_samples([2, 2], 4, 0u32),
            Buffer2d::with_samples([2, 2], 4, 1.0f32),
            Buffer2d::new([2, 2], 0u8),
        );
        assert_eq!(
            b.check(4),
            Err(DrawError::SampleCountMismatch { attachment: "stencil", expected: 4, found: 1 })
        );
    }

    #[test]
    fn split_keeps_attachments_aligned() {
        let mut a = Attachments::with_depth(Buffer2d::new([2, 4], 0u32), Buffer2d::new([2, 4], 1.0f32));
        let tiles = a.split_rows(&[0..1, 1..4]);
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[1].color.rows(), 1..4);
        assert_eq!(tiles[1].depth.rows(), 1..4);
    }
}
