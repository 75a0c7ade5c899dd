//! Target buffers.
//!
//! A target is a 2D grid of texels (color, depth, stencil or any user attachment),
//! optionally with several samples per pixel. The pipeline only talks to targets through
//! [`Target`]; [`Tiled`] adds the ability to hand out disjoint row bands to workers.
//!
//! Storage conventions for the built-in [`Buffer2d`]:
//! - row-major, origin top-left
//! - samples of one pixel are adjacent: `index = (y * width + x) * samples + s`

mod buffer;
mod empty;
mod tile;

pub use buffer::Buffer2d;
pub use empty::Empty;
pub use tile::{partition_rows, RowTile, Tiled};

use core::ops::Range;

/// Something the pipeline can read texels from and write texels into.
///
/// Coordinates are global pixel coordinates. A target may own only a band of rows
/// (see [`Target::rows`]); access outside that band is out of bounds.
pub trait Target {
    type Texel: Copy;

    /// `false` for placeholder attachments that store nothing (see [`Empty`]).
    /// Depth and stencil tests are skipped for unattached targets.
    const ATTACHED: bool = true;

    /// `[width, height]` of the full target in pixels.
    fn size(&self) -> [usize; 2];

    /// Samples stored per pixel.
    fn samples(&self) -> usize {
        1
    }

    /// Rows this target may address. The full height unless this is a tile.
    fn rows(&self) -> Range<usize> {
        0..self.size()[1]
    }

    #[inline]
    fn in_bounds(&self, [x, y]: [usize; 2], sample: usize) -> bool {
        x < self.size()[0] && self.rows().contains(&y) && sample < self.samples()
    }

    /// Bounds-checked read.
    #[inline]
    fn get(&self, pos: [usize; 2], sample: usize) -> Option<Self::Texel> {
        if self.in_bounds(pos, sample) {
            // SAFETY: bounds checked above.
            Some(unsafe { self.get_unchecked(pos, sample) })
        } else {
            None
        }
    }

    /// Bounds-checked write. Returns `false` and writes nothing when out of bounds.
    #[inline]
    fn set(&mut self, pos: [usize; 2], sample: usize, texel: Self::Texel) -> bool {
        if self.in_bounds(pos, sample) {
            // SAFETY: bounds checked above.
            unsafe { self.set_unchecked(pos, sample, texel) };
            true
        } else {
            false
        }
    }

    /// # Safety
    /// `pos` and `sample` must satisfy [`Target::in_bounds`].
    unsafe fn get_unchecked(&self, pos: [usize; 2], sample: usize) -> Self::Texel;

    /// # Safety
    /// `pos` and `sample` must satisfy [`Target::in_bounds`].
    unsafe fn set_unchecked(&mut self, pos: [usize; 2], sample: usize, texel: Self::Texel);
}

impl<T: Target + ?Sized> Target for &mut T {
    type Texel = T::Texel;
    const ATTACHED: bool = T::ATTACHED;

    #[inline]
    fn size(&self) -> [usize; 2] {
        (**self).size()
    }

    #[inline]
    fn samples(&self) -> usize {
        (**self).samples()
    }

    #[inline]
    fn rows(&self) -> Range<usize> {
        (**self).rows()
    }

    #[inline]
    unsafe fn get_unchecked(&self, pos: [usize; 2], sample: usize) -> Self::Texel {
        // SAFETY: forwarded contract.
        unsafe { (**self).get_unchecked(pos, sample) }
    }

    #[inline]
    unsafe fn set_unchecked(&mut self, pos: [usize; 2], sample: usize, texel: Self::Texel) {
        // SAFETY: forwarded contract.
        unsafe { (**self).set_unchecked(pos, sample, texel) }
    }
}
