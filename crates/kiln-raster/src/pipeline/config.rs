use crate::assembly::Topology;
use crate::clip::ClipPlanes;
use crate::color::BlendMode;
use crate::coords::{PixelRect, Viewport};
use crate::error::ConfigError;
use crate::output::{DepthState, StencilState};
use crate::raster::{CullMode, SUPPORTED_SAMPLE_COUNTS};

/// How many threads `draw_tiled` splits the target across.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Workers {
    #[default]
    Single,
    Fixed(usize),
    /// One per available hardware thread.
    Auto,
}

impl Workers {
    pub fn count(self) -> usize {
        match self {
            Workers::Single => 1,
            Workers::Fixed(n) => n.max(1),
            Workers::Auto => std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        }
    }
}

/// Fixed-function state for one pipeline.
///
/// Built with `Default` plus the `with_*` methods, validated once by
/// [`Pipeline::new`](super::Pipeline::new) and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub topology: Topology,
    pub cull: CullMode,
    pub depth: DepthState,
    pub stencil: Option<StencilState>,
    pub blend: BlendMode,
    pub samples: u32,
    /// `None` maps NDC onto the whole color target.
    pub viewport: Option<Viewport>,
    pub scissor: Option<PixelRect>,
    pub clip_planes: ClipPlanes,
    /// Window depth for NDC `z = 0` and `z = 1`.
    pub depth_range: (f32, f32),
    pub line_width: f32,
    pub point_size: f32,
    pub workers: Workers,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            topology: Topology::TriangleList,
            cull: CullMode::None,
            depth: DepthState::default(),
            stencil: None,
            blend: BlendMode::Replace,
            samples: 1,
            viewport: None,
            scissor: None,
            clip_planes: ClipPlanes::all(),
            depth_range: (0.0, 1.0),
            line_width: 1.0,
            point_size: 1.0,
            workers: Workers::Single,
        }
    }
}

impl PipelineConfig {
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_cull(mut self, cull: CullMode) -> Self {
        self.cull = cull;
        self
    }

    pub fn with_depth(mut self, depth: DepthState) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_stencil(mut self, stencil: StencilState) -> Self {
        self.stencil = Some(stencil);
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn with_scissor(mut self, scissor: PixelRect) -> Self {
        self.scissor = Some(scissor);
        self
    }

    pub fn with_clip_planes(mut self, planes: ClipPlanes) -> Self {
        self.clip_planes = planes;
        self
    }

    pub fn with_depth_range(mut self, near: f32, far: f32) -> Self {
        self.depth_range = (near, far);
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_point_size(mut self, size: f32) -> Self {
        self.point_size = size;
        self
    }

    pub fn with_workers(mut self, workers: Workers) -> Self {
        self.workers = workers;
        self
    }

    /// Checks everything that can be checked without a target.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(vp) = self.viewport {
            if !vp.is_valid() {
                return Err(ConfigError::InvalidViewport { width: vp.width, height: vp.height });
            }
        }
        if let Some(s) = self.scissor {
            if s.is_empty() {
                return Err(ConfigError::EmptyScissor);
            }
            if s.x.checked_add(s.width).is_none() || s.y.checked_add(s.height).is_none() {
                return Err(ConfigError::ScissorOverflow);
            }
        }
        if !SUPPORTED_SAMPLE_COUNTS.contains(&self.samples) {
            return Err(ConfigError::UnsupportedSampleCount(self.samples));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(ConfigError::InvalidLineWidth(self.line_width));
        }
        if !(self.point_size.is_finite() && self.point_size > 0.0) {
            return Err(ConfigError::InvalidPointSize(self.point_size));
        }
        let (near, far) = self.depth_range;
        if !(near.is_finite() && far.is_finite() && near <= far) {
            return Err(ConfigError::InvalidDepthRange { near, far });
        }
        if self.workers == Workers::Fixed(0) {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }
}
