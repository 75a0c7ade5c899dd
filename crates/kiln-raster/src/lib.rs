//! Kiln raster: a CPU rasterization pipeline.
//!
//! Callers supply a vertex shader, a fragment shader, uniforms and a vertex stream; the
//! pipeline performs primitive assembly, clipping, rasterization, perspective-correct
//! interpolation, fragment evaluation and depth/stencil/blend into any [`Target`].
//!
//! Convention:
//! - clip space is homogeneous, visible where `0 <= z <= w` and `|x|, |y| <= w`
//! - NDC +Y is up; screen space +Y is down with pixel centres at `x + 0.5`
//! - colors are linear premultiplied RGBA
//!
//! ```no_run
//! use kiln_raster::prelude::*;
//!
//! let vs = |v: &[f32; 2], _: &()| ClipVertex::new(Vec4::point(v[0], v[1], 0.5), ());
//! let fs = |_: &(), _: &FragCoord, _: &()| FragmentOutput::Color(Color::white());
//!
//! let pipeline = Pipeline::new(PipelineConfig::default(), vs, fs)?;
//! let mut targets = Attachments::color_only(Buffer2d::new([64, 64], Color::black()));
//! let triangle: [[f32; 2]; 3] = [[-1.0, -1.0], [1.0, -1.0], [0.0, 1.0]];
//! pipeline.draw(&(), &triangle[..], None, &mut targets)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assembly;
pub mod clip;
pub mod color;
pub mod coords;
pub mod error;
pub mod interp;
pub mod logging;
pub mod math;
pub mod output;
pub mod pipeline;
pub mod raster;
pub mod sampler;
pub mod shader;
pub mod target;

pub use error::{ConfigError, DrawError};
pub use pipeline::{Attachments, DrawStats, Pipeline, PipelineConfig, Workers};
pub use target::Target;

/// The types most draw calls need.
pub mod prelude {
    pub use crate::assembly::Topology;
    pub use crate::clip::ClipPlanes;
    pub use crate::color::{BlendMode, Color, Rgba8};
    pub use crate::coords::{Mat4, PixelRect, Vec2, Vec4, Viewport};
    pub use crate::error::{ConfigError, DrawError};
    pub use crate::math::Varying;
    pub use crate::output::{CompareFunc, DepthState, StencilOp, StencilState};
    pub use crate::pipeline::{Attachments, DrawStats, Pipeline, PipelineConfig, Workers};
    pub use crate::raster::CullMode;
    pub use crate::sampler::{Bilinear, Nearest, Sampler, WrapMode};
    pub use crate::shader::{ClipVertex, FragCoord, FragmentOutput, FragmentShader, VertexShader};
    pub use crate::target::{Buffer2d, Empty, Target, Tiled};
}
