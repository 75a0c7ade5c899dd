//! Coordinate and geometry types shared across pipeline stages.
//!
//! Spaces used by the pipeline:
//! - Clip space: homogeneous `Vec4` emitted by vertex shaders
//! - NDC: clip / w, x and y in [-1, 1] with +Y up, z in [0, 1]
//! - Screen space: pixels, origin top-left, +X right, +Y down
//!
//! The viewport maps NDC to screen space. Pixel centers sit at `(x + 0.5, y + 0.5)`.

mod mat4;
mod rect;
mod vec2;
mod vec4;
mod viewport;

pub use mat4::Mat4;
pub use rect::PixelRect;
pub use vec2::Vec2;
pub use vec4::Vec4;
pub use viewport::Viewport;
