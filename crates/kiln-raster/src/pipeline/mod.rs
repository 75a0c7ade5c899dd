//! Pipeline orchestration.
//!
//! A [`Pipeline`] pairs a validated [`PipelineConfig`] with a vertex and a fragment shader.
//! Each draw call runs, in order:
//!
//! 1. index validation and attachment checks (nothing is written if these fail)
//! 2. the vertex stage, once per referenced vertex, into a shared [`VertexCache`]
//! 3. per primitive, in submission order: clip, project, cull, rasterize, interpolate,
//!    fragment stage, depth/stencil/blend
//!
//! [`Pipeline::draw_tiled`] splits the attachments into horizontal bands and runs step 3 on
//! one thread per band. Every worker walks the whole primitive list but only touches its own
//! rows, so per-pixel write order is the same as in [`Pipeline::draw`].

mod attachments;
mod config;
mod pass;
mod stats;

pub use attachments::Attachments;
pub use config::{PipelineConfig, Workers};
pub use stats::DrawStats;

use crate::assembly::{IndexStream, VertexSource};
use crate::color::Blend;
use crate::coords::{PixelRect, Viewport};
use crate::error::{ConfigError, DrawError};
use crate::output::OutputMerger;
use crate::raster::SamplePattern;
use crate::shader::{FragmentShader, VertexCache, VertexShader};
use crate::target::{partition_rows, Target, Tiled};

use pass::DrawPass;

/// A configured vertex + fragment shader pair.
#[derive(Debug, Clone)]
pub struct Pipeline<VS, FS> {
    config: PipelineConfig,
    vertex: VS,
    fragment: FS,
}

impl<VS, FS> Pipeline<VS, FS> {
    /// Validates `config`. This is the only place configuration errors are reported.
    pub fn new(config: PipelineConfig, vertex: VS, fragment: FS) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            log::warn!("pipeline configuration rejected: {err}");
            return Err(err);
        }
        Ok(Self { config, vertex, fragment })
    }

    #[inline]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Draws on the calling thread.
    ///
    /// `indices` selects vertices from `vertices`; `None` uses every vertex in order.
    /// Input errors are reported before any attachment is modified.
    pub fn draw<V, U, Src, C, D, S>(
        &self,
        uniforms: &U,
        vertices: &Src,
        indices: Option<&[u32]>,
        targets: &mut Attachments<C, D, S>,
    ) -> Result<DrawStats, DrawError>
    where
        Src: VertexSource<Vertex = V> + ?Sized,
        VS: VertexShader<V, U>,
        FS: FragmentShader<VS::Varyings, U, Output = C::Texel>,
        C: Target,
        C::Texel: Blend,
        D: Target<Texel = f32>,
        S: Target<Texel = u8>,
    {
        let stream = self.prepare(vertices, indices, targets)?;
        let cache = VertexCache::build(&self.vertex, uniforms, vertices, &stream);

        let pass = self.pass(uniforms, &cache, stream, targets.color.size());
        let mut stats = pass.run(targets);
        stats.vertices_shaded = cache.shaded();

        self.log_summary(&stats, 1);
        Ok(stats)
    }

    /// Draws with `config.workers` threads, one horizontal band of the targets each.
    ///
    /// Produces the same attachments as [`Pipeline::draw`]. With one worker (or a target too
    /// short to split) no thread is spawned.
    pub fn draw_tiled<V, U, Src, C, D, S>(
        &self,
        uniforms: &U,
        vertices: &Src,
        indices: Option<&[u32]>,
        targets: &mut Attachments<C, D, S>,
    ) -> Result<DrawStats, DrawError>
    where
        Src: VertexSource<Vertex = V> + ?Sized,
        U: Sync,
        VS: VertexShader<V, U>,
        FS: FragmentShader<VS::Varyings, U, Output = C::Texel>,
        C: Tiled,
        C::Texel: Blend,
        D: Tiled<Texel = f32>,
        S: Tiled<Texel = u8>,
    {
        let stream = self.prepare(vertices, indices, targets)?;
        let cache = VertexCache::build(&self.vertex, uniforms, vertices, &stream);

        let size = targets.color.size();
        let pass = self.pass(uniforms, &cache, stream, size);
        let bands = partition_rows(size[1], self.config.workers.count());

        let mut stats = if bands.len() <= 1 {
            pass.run(targets)
        } else {
            let tiles = targets.split_rows(&bands);
            let per_tile: Vec<DrawStats> = std::thread::scope(|scope| {
                let pass = &pass;
                let handles: Vec<_> = tiles
                    .into_iter()
                    .map(|mut tile| scope.spawn(move || pass.run(&mut tile)))
                    .collect();

                handles
                    .into_iter()
                    .map(|h| match h.join() {
                        Ok(stats) => stats,
                        Err(panic) => std::panic::resume_unwind(panic),
                    })
                    .collect()
            });
            DrawStats::merge_tiles(&per_tile)
        };
        stats.vertices_shaded = cache.shaded();

        self.log_summary(&stats, bands.len().max(1));
        Ok(stats)
    }

    /// Input validation shared by both draw paths.
    fn prepare<'i, Src, C, D, S>(
        &self,
        vertices: &Src,
        indices: Option<&'i [u32]>,
        targets: &Attachments<C, D, S>,
    ) -> Result<IndexStream<'i>, DrawError>
    where
        Src: VertexSource + ?Sized,
        C: Target,
        D: Target,
        S: Target,
    {
        let stream = IndexStream::new(indices, vertices.len());
        stream.validate(vertices.len())?;
        targets.check(self.config.samples as usize)?;
        Ok(stream)
    }

    fn pass<'a, U, Vy>(
        &'a self,
        uniforms: &'a U,
        cache: &'a VertexCache<Vy>,
        stream: IndexStream<'a>,
        size: [usize; 2],
    ) -> DrawPass<'a, FS, U, Vy> {
        let viewport = self.config.viewport.unwrap_or_else(|| Viewport::from_size(size));
        let bounds = viewport
            .pixel_bounds()
            .intersect(PixelRect::from_size(size))
            .and_then(|b| match self.config.scissor {
                Some(scissor) => b.intersect(scissor),
                None => Some(b),
            });

        DrawPass {
            config: &self.config,
            fragment: &self.fragment,
            uniforms,
            cache,
            stream,
            viewport,
            bounds,
            pattern: SamplePattern::new(self.config.samples).unwrap_or_default(),
            merger: OutputMerger {
                depth: self.config.depth,
                stencil: self.config.stencil,
                blend: self.config.blend,
            },
        }
    }

    fn log_summary(&self, stats: &DrawStats, workers: usize) {
        log::debug!(
            "draw {:?} on {workers} worker(s), {}x MSAA: {stats}",
            self.config.topology,
            self.config.samples
        );
    }
}
