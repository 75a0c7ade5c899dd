use crate::assembly::{IndexStream, PrimitiveIndices, Primitives};
use crate::clip::{ClipOutcome, Clipper};
use crate::color::Blend;
use crate::coords::{PixelRect, Viewport};
use crate::interp::{LineInterpolator, TriangleInterpolator};
use crate::math::Varying;
use crate::output::OutputMerger;
use crate::raster::{project, rasterize_line, rasterize_point, SamplePattern, TriangleSetup};
use crate::shader::{ClipVertex, FragCoord, FragmentOutput, FragmentShader, VertexCache};
use crate::target::Target;

use super::{Attachments, DrawStats, PipelineConfig};

/// Everything a worker needs to rasterize the full primitive list into its attachments.
///
/// Shared by reference between workers; only the attachments are per worker.
pub(crate) struct DrawPass<'a, FS, U, Vy> {
    pub config: &'a PipelineConfig,
    pub fragment: &'a FS,
    pub uniforms: &'a U,
    pub cache: &'a VertexCache<Vy>,
    pub stream: IndexStream<'a>,
    pub viewport: Viewport,
    /// Viewport ∩ scissor ∩ target. `None` when nothing can be covered.
    pub bounds: Option<PixelRect>,
    pub pattern: SamplePattern,
    pub merger: OutputMerger,
}

impl<FS, U, Vy: Varying> DrawPass<'_, FS, U, Vy> {
    /// Processes every primitive in submission order, writing only rows `targets` owns.
    pub fn run<C, D, S>(&self, targets: &mut Attachments<C, D, S>) -> DrawStats
    where
        FS: FragmentShader<Vy, U, Output = C::Texel>,
        C: Target,
        C::Texel: Blend,
        D: Target<Texel = f32>,
        S: Target<Texel = u8>,
    {
        let mut stats = DrawStats::default();
        let bounds = self.bounds.and_then(|b| b.clamp_rows(targets.color.rows()));
        let mut clipper = Clipper::new(self.config.clip_planes);

        for (n, prim) in Primitives::new(self.config.topology, self.stream).enumerate() {
            stats.primitives += 1;

            match prim {
                PrimitiveIndices::Triangle([i0, i1, i2]) => {
                    let (Some(a), Some(b), Some(c)) = (self.cache.get(i0), self.cache.get(i1), self.cache.get(i2))
                    else {
                        continue;
                    };
                    let mut culled = false;
                    let outcome = clipper.triangle([a, b, c], |tri| {
                        culled |= self.triangle(tri, bounds, targets, &mut stats);
                    });
                    if outcome == ClipOutcome::Rejected {
                        stats.clipped_away += 1;
                        log::trace!("triangle {n} clipped away");
                    } else if culled {
                        stats.culled += 1;
                        log::trace!("triangle {n} culled");
                    }
                }
                PrimitiveIndices::Line([i0, i1]) => {
                    let (Some(a), Some(b)) = (self.cache.get(i0), self.cache.get(i1)) else {
                        continue;
                    };
                    match clipper.line(a, b) {
                        Some(segment) => self.line(&segment, bounds, targets, &mut stats),
                        None => {
                            stats.clipped_away += 1;
                            log::trace!("line {n} clipped away");
                        }
                    }
                }
                PrimitiveIndices::Point([i]) => {
                    let Some(p) = self.cache.get(i) else {
                        continue;
                    };
                    if clipper.point(p) {
                        self.point(p, bounds, targets, &mut stats);
                    } else {
                        stats.clipped_away += 1;
                        log::trace!("point {n} clipped away");
                    }
                }
            }
        }

        stats
    }

    /// Rasterizes one clipped triangle. Returns `true` if it was culled.
    fn triangle<C, D, S>(
        &self,
        tri: [&ClipVertex<Vy>; 3],
        bounds: Option<PixelRect>,
        targets: &mut Attachments<C, D, S>,
        stats: &mut DrawStats,
    ) -> bool
    where
        FS: FragmentShader<Vy, U, Output = C::Texel>,
        C: Target,
        C::Texel: Blend,
        D: Target<Texel = f32>,
        S: Target<Texel = u8>,
    {
        let screen = tri.map(|v| project(v.position, self.viewport, self.config.depth_range));
        // Zero area after snapping: no coverage.
        let Some(setup) = TriangleSetup::new(screen.map(|s| s.position)) else {
            return false;
        };
        if self.config.cull.culls(setup.winding()) {
            return true;
        }
        let Some(bounds) = bounds else {
            return false;
        };

        let interp = TriangleInterpolator::new(tri, &screen);
        setup.rasterize(bounds, &self.pattern, |pixel, sample, bary| {
            let (varyings, depth) = interp.at(bary);
            self.shade(targets, stats, pixel, sample, &varyings, depth);
        });
        false
    }

    fn line<C, D, S>(
        &self,
        segment: &[ClipVertex<Vy>; 2],
        bounds: Option<PixelRect>,
        targets: &mut Attachments<C, D, S>,
        stats: &mut DrawStats,
    ) where
        FS: FragmentShader<Vy, U, Output = C::Texel>,
        C: Target,
        C::Texel: Blend,
        D: Target<Texel = f32>,
        S: Target<Texel = u8>,
    {
        let Some(bounds) = bounds else {
            return;
        };
        let screen = segment.each_ref().map(|v| project(v.position, self.viewport, self.config.depth_range));
        let interp = LineInterpolator::new([&segment[0], &segment[1]], &screen);

        rasterize_line(screen[0].position, screen[1].position, self.config.line_width, bounds, |pixel, t| {
            let (varyings, depth) = interp.at(t);
            for sample in 0..self.pattern.len() {
                self.shade(targets, stats, pixel, sample, &varyings, depth);
            }
        });
    }

    fn point<C, D, S>(
        &self,
        p: &ClipVertex<Vy>,
        bounds: Option<PixelRect>,
        targets: &mut Attachments<C, D, S>,
        stats: &mut DrawStats,
    ) where
        FS: FragmentShader<Vy, U, Output = C::Texel>,
        C: Target,
        C::Texel: Blend,
        D: Target<Texel = f32>,
        S: Target<Texel = u8>,
    {
        let Some(bounds) = bounds else {
            return;
        };
        let screen = project(p.position, self.viewport, self.config.depth_range);

        rasterize_point(screen.position, self.config.point_size, bounds, |pixel| {
            for sample in 0..self.pattern.len() {
                self.shade(targets, stats, pixel, sample, &p.varyings, screen.depth);
            }
        });
    }

    /// Fragment stage plus output merge for one sample.
    #[inline]
    fn shade<C, D, S>(
        &self,
        targets: &mut Attachments<C, D, S>,
        stats: &mut DrawStats,
        pixel: [usize; 2],
        sample: usize,
        varyings: &Vy,
        depth: f32,
    ) where
        FS: FragmentShader<Vy, U, Output = C::Texel>,
        C: Target,
        C::Texel: Blend,
        D: Target<Texel = f32>,
        S: Target<Texel = u8>,
    {
        stats.fragments_shaded += 1;
        let frag = FragCoord { pixel, sample, depth };

        let (color, depth) = match self.fragment.shade(varyings, &frag, self.uniforms) {
            FragmentOutput::Color(color) => (color, depth),
            FragmentOutput::ColorDepth(color, depth) => (color, depth),
            FragmentOutput::Discard => {
                stats.fragments_discarded += 1;
                return;
            }
        };

        if self.merger.commit(targets, pixel, sample, color, depth) {
            stats.samples_written += 1;
        }
    }
}
