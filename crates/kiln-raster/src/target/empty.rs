use core::marker::PhantomData;
use core::ops::Range;

use super::tile::Tiled;
use super::Target;

/// Placeholder attachment that stores nothing.
///
/// Reads return `T::default()`, writes are dropped, and the pipeline skips the tests
/// that would use it (`ATTACHED = false`).
#[derive(Debug, Copy, Clone)]
pub struct Empty<T>(PhantomData<T>);

impl<T> Empty<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Empty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default> Target for Empty<T> {
    type Texel = T;
    const ATTACHED: bool = false;

    #[inline]
    fn size(&self) -> [usize; 2] {
        [usize::MAX, usize::MAX]
    }

    #[inline]
    fn samples(&self) -> usize {
        usize::MAX
    }

    #[inline]
    unsafe fn get_unchecked(&self, _: [usize; 2], _: usize) -> T {
        T::default()
    }

    #[inline]
    unsafe fn set_unchecked(&mut self, _: [usize; 2], _: usize, _: T) {}
}

impl<T: Copy + Default + Send> Tiled for Empty<T> {
    type Tile<'a>
        = Empty<T>
    where
        Self: 'a;

    fn split_rows(&mut self, bands: &[Range<usize>]) -> Vec<Empty<T>> {
        bands.iter().map(|_| Empty::new()).collect()
    }
}
