use core::ops::Range;

use super::Target;

/// A target that can be split into disjoint horizontal bands.
///
/// Each tile borrows its band exclusively, so workers can write concurrently without
/// synchronization. Non-overlap is enforced once, when the bands are handed out.
pub trait Tiled: Target {
    type Tile<'a>: Target<Texel = Self::Texel> + Send
    where
        Self: 'a;

    /// Returns one tile per band, in order. Bands must be sorted and disjoint.
    fn split_rows(&mut self, bands: &[Range<usize>]) -> Vec<Self::Tile<'_>>;
}

/// Exclusive view of a band of rows of a contiguous buffer.
///
/// Addressed with the owner's global coordinates; rows outside the band are out of bounds.
#[derive(Debug)]
pub struct RowTile<'a, T> {
    data: &'a mut [T],
    width: usize,
    height: usize,
    samples: usize,
    rows: Range<usize>,
}

impl<'a, T> RowTile<'a, T> {
    pub(crate) fn new(
        data: &'a mut [T],
        width: usize,
        height: usize,
        samples: usize,
        rows: Range<usize>,
    ) -> Self {
        debug_assert_eq!(data.len(), (rows.end - rows.start) * width * samples);
        Self { data, width, height, samples, rows }
    }

    #[inline]
    fn index(&self, [x, y]: [usize; 2], sample: usize) -> usize {
        ((y - self.rows.start) * self.width + x) * self.samples + sample
    }
}

impl<T: Copy> Target for RowTile<'_, T> {
    type Texel = T;

    #[inline]
    fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    #[inline]
    fn samples(&self) -> usize {
        self.samples
    }

    #[inline]
    fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    #[inline]
    unsafe fn get_unchecked(&self, pos: [usize; 2], sample: usize) -> T {
        let i = self.index(pos, sample);
        // SAFETY: caller guarantees `pos` lies in this tile's rows.
        unsafe { *self.data.get_unchecked(i) }
    }

    #[inline]
    unsafe fn set_unchecked(&mut self, pos: [usize; 2], sample: usize, texel: T) {
        let i = self.index(pos, sample);
        // SAFETY: caller guarantees `pos` lies in this tile's rows.
        unsafe { *self.data.get_unchecked_mut(i) = texel };
    }
}

/// Splits `height` rows into at most `count` contiguous bands of near-equal size.
///
/// The first `height % count` bands get one extra row. Empty bands are omitted, so
/// fewer bands than requested are returned for very short targets.
pub fn partition_rows(height: usize, count: usize) -> Vec<Range<usize>> {
    let count = count.max(1);
    let rows_per_band = height / count;
    let remainder = height % count;

    let mut bands = Vec::with_capacity(count);
    let mut start = 0;
    for i in 0..count {
        let extra = if i < remainder { 1 } else { 0 };
        let end = start + rows_per_band + extra;
        if end > start {
            bands.push(start..end);
        }
        start = end;
    }
    bands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_covers_every_row_once() {
        let bands = partition_rows(10, 3);
        assert_eq!(bands, vec![0..4, 4..7, 7..10]);
    }

    #[test]
    fn partition_drops_empty_bands() {
        assert_eq!(partition_rows(2, 4), vec![0..1, 1..2]);
        assert!(partition_rows(0, 4).is_empty());
    }

    #[test]
    fn partition_zero_count_is_single_band() {
        assert_eq!(partition_rows(5, 0), vec![0..5]);
    }
}
