//! Numeric building blocks shared by the pipeline stages.
//!
//! - [`ops`]: the narrow float backend (std or `libm`)
//! - [`Varying`]: linear combination over per-vertex attribute bundles

pub mod ops;
mod varying;

pub use varying::Varying;
