use core::ops::Range;

use bytemuck::Pod;

use crate::color::Resolve;

use super::tile::{partition_rows, RowTile, Tiled};
use super::Target;

/// Contiguous in-memory target.
///
/// The whole grid lives in one `Vec`, so row bands are contiguous sub-slices and can be
/// handed to workers with no locking (see [`Tiled`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer2d<T> {
    width: usize,
    height: usize,
    samples: usize,
    data: Vec<T>,
}

impl<T: Copy> Buffer2d<T> {
    /// Single-sample buffer filled with `fill`.
    pub fn new(size: [usize; 2], fill: T) -> Self {
        Self::with_samples(size, 1, fill)
    }

    /// Multisampled buffer filled with `fill`. `samples` is raised to at least 1.
    ///
    /// # Panics
    /// If `width * height * samples` overflows `usize`.
    pub fn with_samples([width, height]: [usize; 2], samples: usize, fill: T) -> Self {
        let samples = samples.max(1);
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(samples));
        let Some(len) = len else {
            panic!("buffer of {width}x{height}x{samples} samples overflows usize");
        };
        Self { width, height, samples, data: vec![fill; len] }
    }

    /// Overwrites every sample of every pixel.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Resets every sample to `T::default()`.
    pub fn clear(&mut self)
    where
        T: Default,
    {
        self.data.fill(T::default());
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// All samples of one pixel, or `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[T]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = self.index([x, y], 0);
        Some(&self.data[start..start + self.samples])
    }

    /// Sample 0 of each pixel, row by row.
    pub fn iter_pixels(&self) -> impl Iterator<Item = ([usize; 2], T)> + '_ {
        let width = self.width;
        self.data
            .chunks_exact(self.samples)
            .enumerate()
            .map(move |(i, px)| ([i % width, i / width], px[0]))
    }

    /// Averages each pixel's samples into a single-sample buffer.
    pub fn resolve(&self) -> Buffer2d<T>
    where
        T: Resolve,
    {
        if self.samples == 1 {
            return self.clone();
        }
        Buffer2d {
            width: self.width,
            height: self.height,
            samples: 1,
            data: self.data.chunks_exact(self.samples).map(T::resolve).collect(),
        }
    }

    /// Raw bytes of the storage, the only persistence format the core offers.
    pub fn as_bytes(&self) -> &[u8]
    where
        T: Pod,
    {
        bytemuck::cast_slice(&self.data)
    }

    /// Splits the buffer into `count` horizontal tiles of near-equal height.
    pub fn row_tiles(&mut self, count: usize) -> Vec<RowTile<'_, T>>
    where
        T: Send,
    {
        let bands = partition_rows(self.height, count);
        self.split_rows(&bands)
    }

    #[inline]
    fn index(&self, [x, y]: [usize; 2], sample: usize) -> usize {
        (y * self.width + x) * self.samples + sample
    }
}

impl<T: Copy> Target for Buffer2d<T> {
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
    unsafe fn get_unchecked(&self, pos: [usize; 2], sample: usize) -> T {
        let i = self.index(pos, sample);
        // SAFETY: caller guarantees `pos`/`sample` are in bounds.
        unsafe { *self.data.get_unchecked(i) }
    }

    #[inline]
    unsafe fn set_unchecked(&mut self, pos: [usize; 2], sample: usize, texel: T) {
        let i = self.index(pos, sample);
        // SAFETY: caller guarantees `pos`/`sample` are in bounds.
        unsafe { *self.data.get_unchecked_mut(i) = texel };
    }
}

impl<T: Copy + Send> Tiled for Buffer2d<T> {
    type Tile<'a>
        = RowTile<'a, T>
    where
        Self: 'a;

    /// # Panics
    /// Panics if `bands` are unsorted, overlapping or extend past the buffer height.
    fn split_rows(&mut self, bands: &[Range<usize>]) -> Vec<RowTile<'_, T>> {
        let stride = self.width * self.samples;
        let (width, samples, height) = (self.width, self.samples, self.height);

        let mut rest: &mut [T] = &mut self.data;
        let mut row = 0;
        let mut tiles = Vec::with_capacity(bands.len());

        for band in bands {
            assert!(
                band.start >= row && band.start <= band.end && band.end <= height,
                "Buffer2d::split_rows: band {band:?} overlaps a previous band or exceeds height {height}"
            );

            let (_, tail) = core::mem::take(&mut rest).split_at_mut((band.start - row) * stride);
            let (chunk, tail) = tail.split_at_mut((band.end - band.start) * stride);
            tiles.push(RowTile::new(chunk, width, height, samples, band.clone()));

            rest = tail;
            row = band.end;
        }

        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── access ────────────────────────────────────────────────────────────

    #[test]
    fn checked_access_rejects_out_of_bounds() {
        let mut buf = Buffer2d::new([3, 2], 0u8);
        assert!(buf.set([2, 1], 0, 7));
        assert_eq!(buf.get([2, 1], 0), Some(7));
        assert!(!buf.set([3, 0], 0, 1));
        assert!(!buf.set([0, 2], 0, 1));
        assert!(!buf.set([0, 0], 1, 1));
        assert_eq!(buf.get([0, 2], 0), None);
    }

    #[test]
    fn samples_are_interleaved_per_pixel() {
        let mut buf = Buffer2d::with_samples([2, 1], 4, 0u8);
        buf.set([1, 0], 3, 9);
        assert_eq!(buf.as_slice()[7], 9);
        assert_eq!(buf.pixel(1, 0), Some(&[0u8, 0, 0, 9][..]));
    }

    #[test]
    fn iter_pixels_is_row_major() {
        let mut buf = Buffer2d::new([2, 2], 0u8);
        buf.set([1, 0], 0, 1);
        buf.set([0, 1], 0, 2);
        let v: Vec<_> = buf.iter_pixels().collect();
        assert_eq!(v, vec![([0, 0], 0), ([1, 0], 1), ([0, 1], 2), ([1, 1], 0)]);
    }

    #[test]
    #[should_panic(expected = "overflows")]
    fn oversized_buffers_panic_instead_of_wrapping() {
        let _ = Buffer2d::with_samples([usize::MAX / 2 + 1, 1], 2, 0u8);
    }

    #[test]
    fn zero_samples_are_raised_to_one() {
        let buf = Buffer2d::with_samples([3, 2], 0, 0u8);
        assert_eq!(buf.samples(), 1);
        assert_eq!(buf.as_slice().len(), 6);
    }

    // ── resolve / bytes ───────────────────────────────────────────────────

    #[test]
    fn resolve_averages_samples() {
        let mut buf = Buffer2d::with_samples([1, 1], 2, 0.0f32);
        buf.set([0, 0], 0, 1.0);
        let r = buf.resolve();
        assert_eq!(r.samples(), 1);
        assert_eq!(r.get([0, 0], 0), Some(0.5));
    }

    #[test]
    fn as_bytes_exposes_raw_storage() {
        let buf = Buffer2d::new([2, 1], [1u8, 2, 3, 4]);
        assert_eq!(buf.as_bytes(), &[1, 2, 3, 4, 1, 2, 3, 4]);
    }

    // ── tiling ────────────────────────────────────────────────────────────

    #[test]
    fn tiles_write_through_to_owner() {
        let mut buf = Buffer2d::new([2, 4], 0u8);
        {
            let mut tiles = buf.row_tiles(2);
            assert_eq!(tiles.len(), 2);
            assert!(tiles[0].set([1, 1], 0, 5));
            assert!(tiles[1].set([0, 3], 0, 6));
        }
        assert_eq!(buf.get([1, 1], 0), Some(5));
        assert_eq!(buf.get([0, 3], 0), Some(6));
    }

    #[test]
    fn tiles_reject_rows_they_do_not_own() {
        let mut buf = Buffer2d::new([2, 4], 0u8);
        let mut tiles = buf.row_tiles(2);
        assert!(!tiles[0].set([0, 2], 0, 1));
        assert!(!tiles[1].set([0, 1], 0, 1));
        assert_eq!(tiles[1].rows(), 2..4);
    }

    #[test]
    fn split_rows_allows_gaps() {
        let mut buf = Buffer2d::new([1, 5], 0u8);
        let mut tiles = buf.split_rows(&[1..2, 3..5]);
        assert!(tiles[0].set([0, 1], 0, 1));
        assert!(tiles[1].set([0, 4], 0, 2));
        drop(tiles);
        assert_eq!(buf.as_slice(), &[0, 1, 0, 0, 2]);
    }

    #[test]
    #[should_panic(expected = "overlaps")]
    fn split_rows_rejects_overlap() {
        let mut buf = Buffer2d::new([1, 4], 0u8);
        let _ = buf.split_rows(&[0..3, 2..4]);
    }
}
