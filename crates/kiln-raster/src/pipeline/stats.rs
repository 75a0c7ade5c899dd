use std::fmt;

/// Counters for one draw call.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Vertex stage invocations.
    pub vertices_shaded: usize,
    /// Primitives assembled from the index stream.
    pub primitives: usize,
    /// Primitives removed by face culling.
    pub culled: usize,
    /// Primitives with nothing left after clipping.
    pub clipped_away: usize,
    /// Fragment stage invocations.
    pub fragments_shaded: usize,
    pub fragments_discarded: usize,
    /// Samples that passed every test and were written.
    pub samples_written: usize,
}

impl DrawStats {
    /// Combines the stats of tiles that each processed the full primitive list.
    ///
    /// Primitive counters are the same on every tile and are taken once; fragment
    /// counters are summed.
    pub fn merge_tiles(tiles: &[DrawStats]) -> DrawStats {
        let Some(first) = tiles.first() else {
            return DrawStats::default();
        };
        tiles.iter().skip(1).fold(*first, |mut acc, t| {
            acc.fragments_shaded += t.fragments_shaded;
            acc.fragments_discarded += t.fragments_discarded;
            acc.samples_written += t.samples_written;
            acc
        })
    }
}

impl fmt::Display for DrawStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} primitives ({} culled, {} clipped away), {} fragments ({} discarded), {} samples written",
            self.vertices_shaded,
            self.primitives,
            self.culled,
            self.clipped_away,
            self.fragments_shaded,
            self.fragments_discarded,
            self.samples_written
        )
    }
}
