//! Primitive assembly.
//!
//! Turns an index stream (explicit, or implicit `0..n`) into groups of 1, 2 or 3 vertex
//! indices according to a [`Topology`]. Strip and fan topologies keep a sliding window of
//! the last indices, so each stream entry is read exactly once.

use crate::error::DrawError;

/// How consecutive indices form primitives.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Topology {
    PointList,
    LineList,
    LineStrip,
    #[default]
    TriangleList,
    /// Every triangle keeps the winding of the first one.
    TriangleStrip,
    /// All triangles share the first index.
    TriangleFan,
}

impl Topology {
    /// Number of primitives produced by `index_count` indices.
    pub fn primitive_count(self, index_count: usize) -> usize {
        match self {
            Topology::PointList => index_count,
            Topology::LineList => index_count / 2,
            Topology::LineStrip => index_count.saturating_sub(1),
            Topology::TriangleList => index_count / 3,
            Topology::TriangleStrip | Topology::TriangleFan => index_count.saturating_sub(2),
        }
    }
}

/// Random access to vertex payloads by zero-based index.
pub trait VertexSource {
    type Vertex;

    fn len(&self) -> usize;

    fn fetch(&self, index: usize) -> Option<&Self::Vertex>;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> VertexSource for [V] {
    type Vertex = V;

    #[inline]
    fn len(&self) -> usize {
        <[V]>::len(self)
    }

    #[inline]
    fn fetch(&self, index: usize) -> Option<&V> {
        self.get(index)
    }
}

impl<V> VertexSource for Vec<V> {
    type Vertex = V;

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn fetch(&self, index: usize) -> Option<&V> {
        self.get(index)
    }
}

impl<V, const N: usize> VertexSource for [V; N] {
    type Vertex = V;

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn fetch(&self, index: usize) -> Option<&V> {
        self.get(index)
    }
}

/// Index stream feeding the assembler.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IndexStream<'a> {
    /// `0..count`
    Implicit(usize),
    Explicit(&'a [u32]),
}

impl<'a> IndexStream<'a> {
    /// Explicit indices if given, otherwise every vertex in order.
    pub fn new(indices: Option<&'a [u32]>, vertex_count: usize) -> Self {
        match indices {
            Some(ix) => IndexStream::Explicit(ix),
            None => IndexStream::Implicit(vertex_count),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            IndexStream::Implicit(n) => *n,
            IndexStream::Explicit(ix) => ix.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            IndexStream::Implicit(n) => (i < *n).then_some(i as u32),
            IndexStream::Explicit(ix) => ix.get(i).copied(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Fails on the first index that does not name a vertex.
    pub fn validate(&self, vertex_count: usize) -> Result<(), DrawError> {
        match self.iter().find(|&i| i as usize >= vertex_count) {
            Some(index) => Err(DrawError::IndexOutOfRange { index, vertex_count }),
            None => Ok(()),
        }
    }
}

/// Checks every index against `vertex_count` before anything is shaded or written.
pub fn validate_indices(indices: Option<&[u32]>, vertex_count: usize) -> Result<(), DrawError> {
    IndexStream::new(indices, vertex_count).validate(vertex_count)
}

/// Vertex indices of one assembled primitive.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrimitiveIndices {
    Point([u32; 1]),
    Line([u32; 2]),
    Triangle([u32; 3]),
}

impl PrimitiveIndices {
    pub fn as_slice(&self) -> &[u32] {
        match self {
            PrimitiveIndices::Point(ix) => ix,
            PrimitiveIndices::Line(ix) => ix,
            PrimitiveIndices::Triangle(ix) => ix,
        }
    }
}

/// Lazy primitive iterator over an index stream.
///
/// Incomplete trailing groups are ignored.
#[derive(Debug, Clone)]
pub struct Primitives<'a> {
    topology: Topology,
    stream: IndexStream<'a>,
    cursor: usize,
    window: [u32; 2],
    primed: usize,
    odd: bool,
}

impl<'a> Primitives<'a> {
    pub fn new(topology: Topology, stream: IndexStream<'a>) -> Self {
        Self { topology, stream, cursor: 0, window: [0; 2], primed: 0, odd: false }
    }

    #[inline]
    fn fetch(&mut self) -> Option<u32> {
        let i = self.stream.get(self.cursor)?;
        self.cursor += 1;
        Some(i)
    }

    /// Fills the sliding window with the first `n` indices of a strip or fan.
    fn prime(&mut self, n: usize) -> Option<()> {
        while self.primed < n {
            let i = self.fetch()?;
            self.window[self.primed] = i;
            self.primed += 1;
        }
        Some(())
    }
}

impl Iterator for Primitives<'_> {
    type Item = PrimitiveIndices;

    fn next(&mut self) -> Option<PrimitiveIndices> {
        match self.topology {
            Topology::PointList => Some(PrimitiveIndices::Point([self.fetch()?])),
            Topology::LineList => {
                let a = self.fetch()?;
                let b = self.fetch()?;
                Some(PrimitiveIndices::Line([a, b]))
            }
            Topology::TriangleList => {
                let a = self.fetch()?;
                let b = self.fetch()?;
                let c = self.fetch()?;
                Some(PrimitiveIndices::Triangle([a, b, c]))
            }
            Topology::LineStrip => {
                self.prime(1)?;
                let b = self.fetch()?;
                let a = core::mem::replace(&mut self.window[0], b);
                Some(PrimitiveIndices::Line([a, b]))
            }
            Topology::TriangleStrip => {
                self.prime(2)?;
                let c = self.fetch()?;
                let [a, b] = self.window;
                self.window = [b, c];
                let tri = if self.odd { [b, a, c] } else { [a, b, c] };
                self.odd = !self.odd;
                Some(PrimitiveIndices::Triangle(tri))
            }
            Topology::TriangleFan => {
                self.prime(2)?;
                let c = self.fetch()?;
                let [pivot, b] = self.window;
                self.window[1] = c;
                Some(PrimitiveIndices::Triangle([pivot, b, c]))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.topology.primitive_count(self.stream.len());
        let done = self.topology.primitive_count(self.cursor);
        let left = total.saturating_sub(done);
        (left, Some(left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble(topology: Topology, indices: &[u32]) -> Vec<PrimitiveIndices> {
        Primitives::new(topology, IndexStream::Explicit(indices)).collect()
    }

    fn tris(v: &[[u32; 3]]) -> Vec<PrimitiveIndices> {
        v.iter().copied().map(PrimitiveIndices::Triangle).collect()
    }

    // ── lists ─────────────────────────────────────────────────────────────

    #[test]
    fn point_list_emits_each_index() {
        let p = assemble(Topology::PointList, &[4, 2]);
        assert_eq!(p, vec![PrimitiveIndices::Point([4]), PrimitiveIndices::Point([2])]);
    }

    #[test]
    fn line_list_drops_trailing_index() {
        let p = assemble(Topology::LineList, &[0, 1, 2]);
        assert_eq!(p, vec![PrimitiveIndices::Line([0, 1])]);
    }

    #[test]
    fn triangle_list_groups_triples() {
        let p = assemble(Topology::TriangleList, &[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(p, tris(&[[0, 1, 2], [3, 4, 5]]));
    }

    // ── strips and fans ───────────────────────────────────────────────────

    #[test]
    fn line_strip_chains_segments() {
        let p = assemble(Topology::LineStrip, &[0, 1, 2, 3]);
        assert_eq!(
            p,
            vec![
                PrimitiveIndices::Line([0, 1]),
                PrimitiveIndices::Line([1, 2]),
                PrimitiveIndices::Line([2, 3]),
            ]
        );
    }

    #[test]
    fn triangle_strip_preserves_winding() {
        let p = assemble(Topology::TriangleStrip, &[0, 1, 2, 3, 4]);
        assert_eq!(p, tris(&[[0, 1, 2], [2, 1, 3], [2, 3, 4]]));
    }

    #[test]
    fn triangle_fan_pivots_on_first() {
        let p = assemble(Topology::TriangleFan, &[0, 1, 2, 3, 4]);
        assert_eq!(p, tris(&[[0, 1, 2], [0, 2, 3], [0, 3, 4]]));
    }

    #[test]
    fn short_strips_produce_nothing() {
        assert!(assemble(Topology::TriangleStrip, &[0, 1]).is_empty());
        assert!(assemble(Topology::LineStrip, &[0]).is_empty());
        assert!(assemble(Topology::TriangleFan, &[]).is_empty());
    }

    #[test]
    fn implicit_stream_is_sequential() {
        let p: Vec<_> = Primitives::new(Topology::TriangleList, IndexStream::new(None, 6)).collect();
        assert_eq!(p, tris(&[[0, 1, 2], [3, 4, 5]]));
    }

    #[test]
    fn size_hint_matches_output() {
        let it = Primitives::new(Topology::TriangleStrip, IndexStream::Implicit(6));
        assert_eq!(it.size_hint(), (4, Some(4)));
        assert_eq!(it.count(), 4);
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn validate_reports_first_bad_index() {
        let s = IndexStream::Explicit(&[0, 5, 9]);
        assert_eq!(s.validate(6), Err(DrawError::IndexOutOfRange { index: 9, vertex_count: 6 }));
        assert_eq!(s.validate(10), Ok(()));
    }

    #[test]
    fn implicit_stream_is_always_valid() {
        assert_eq!(validate_indices(None, 3), Ok(()));
        assert_eq!(validate_indices(Some(&[3]), 3), Err(DrawError::IndexOutOfRange { index: 3, vertex_count: 3 }));
    }

    #[test]
    fn vertex_sources_fetch_by_index() {
        let v = vec![10, 20];
        assert_eq!(VertexSource::fetch(&v, 1), Some(&20));
        assert_eq!(VertexSource::fetch(&v[..], 2), None);
        assert_eq!(VertexSource::len(&[1, 2, 3]), 3);
    }
}
