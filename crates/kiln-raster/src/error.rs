use std::fmt;

/// Pipeline configuration rejected by [`Pipeline::new`](crate::pipeline::Pipeline::new).
///
/// Configuration is validated once at construction and never during a draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Viewport with non-positive or non-finite extent or origin.
    InvalidViewport { width: f32, height: f32 },
    /// Scissor rectangle with zero area.
    EmptyScissor,
    /// Scissor rectangle whose far edge does not fit in `usize`.
    ScissorOverflow,
    /// Sample count other than 1, 2, 4, 8 or 16.
    UnsupportedSampleCount(u32),
    /// Line width that is not a finite value > 0.
    InvalidLineWidth(f32),
    /// Point size that is not a finite value > 0.
    InvalidPointSize(f32),
    /// Depth range that is non-finite or has `near > far`.
    InvalidDepthRange { near: f32, far: f32 },
    /// `Workers::Fixed(0)`.
    ZeroWorkers,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidViewport { width, height } => {
                write!(f, "invalid viewport {width}x{height}: extent must be positive and finite")
            }
            ConfigError::EmptyScissor => write!(f, "scissor rectangle has zero area"),
            ConfigError::ScissorOverflow => write!(f, "scissor rectangle extends past usize::MAX"),
            ConfigError::UnsupportedSampleCount(n) => {
                write!(f, "unsupported sample count {n} (expected 1, 2, 4, 8 or 16)")
            }
            ConfigError::InvalidLineWidth(w) => write!(f, "invalid line width {w}"),
            ConfigError::InvalidPointSize(s) => write!(f, "invalid point size {s}"),
            ConfigError::InvalidDepthRange { near, far } => {
                write!(f, "invalid depth range [{near}, {far}]")
            }
            ConfigError::ZeroWorkers => write!(f, "worker count must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Bad input to a draw call.
///
/// Always detected before any target is touched, so a failed draw leaves every
/// attachment unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// An index (explicit or implicit) names a vertex the source does not have.
    IndexOutOfRange { index: u32, vertex_count: usize },
    /// An attachment's size differs from the color target's.
    TargetSizeMismatch {
        attachment: &'static str,
        expected: [usize; 2],
        found: [usize; 2],
    },
    /// An attachment's samples-per-pixel differs from the configured sample count.
    SampleCountMismatch {
        attachment: &'static str,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::IndexOutOfRange { index, vertex_count } => {
                write!(f, "vertex index {index} out of range for {vertex_count} vertices")
            }
            DrawError::TargetSizeMismatch { attachment, expected, found } => write!(
                f,
                "{attachment} target is {}x{}, expected {}x{}",
                found[0], found[1], expected[0], expected[1]
            ),
            DrawError::SampleCountMismatch { attachment, expected, found } => write!(
                f,
                "{attachment} target has {found} samples per pixel, pipeline expects {expected}"
            ),
        }
    }
}

impl std::error::Error for DrawError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let e = DrawError::IndexOutOfRange { index: 7, vertex_count: 3 };
        assert_eq!(e.to_string(), "vertex index 7 out of range for 3 vertices");

        let e = DrawError::TargetSizeMismatch { attachment: "depth", expected: [4, 4], found: [2, 4] };
        assert_eq!(e.to_string(), "depth target is 2x4, expected 4x4");

        let e = ConfigError::UnsupportedSampleCount(3);
        assert!(e.to_string().contains("unsupported sample count 3"));
    }
}
