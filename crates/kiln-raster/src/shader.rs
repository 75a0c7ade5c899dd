//! Vertex and fragment stage contracts.
//!
//! Shaders are plain values implementing [`VertexShader`] / [`FragmentShader`], or closures
//! with a matching signature. Both stages are pure: they receive shared references only and
//! must be callable from several workers at once (`Sync`).

use crate::assembly::{IndexStream, VertexSource};
use crate::coords::Vec4;
use crate::math::Varying;

/// Output of the vertex stage: a homogeneous clip-space position plus varyings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipVertex<Vy> {
    pub position: Vec4,
    pub varyings: Vy,
}

impl<Vy> ClipVertex<Vy> {
    #[inline]
    pub const fn new(position: Vec4, varyings: Vy) -> Self {
        Self { position, varyings }
    }
}

impl<Vy: Varying> ClipVertex<Vy> {
    /// Vertex at parameter `t` along `self -> other`; position and varyings alike.
    #[inline]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            varyings: Vy::lerp(&self.varyings, &other.varyings, t),
        }
    }
}

/// Where a fragment is being evaluated.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FragCoord {
    pub pixel: [usize; 2],
    /// Sample index within the pixel. Always 0 without multisampling.
    pub sample: usize,
    /// Interpolated window-space depth.
    pub depth: f32,
}

/// Result of the fragment stage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FragmentOutput<T> {
    Color(T),
    /// Color plus a depth value replacing the interpolated one.
    ColorDepth(T, f32),
    Discard,
}

impl<T> FragmentOutput<T> {
    pub fn color(&self) -> Option<&T> {
        match self {
            FragmentOutput::Color(c) | FragmentOutput::ColorDepth(c, _) => Some(c),
            FragmentOutput::Discard => None,
        }
    }
}

impl<T> From<T> for FragmentOutput<T> {
    fn from(color: T) -> Self {
        FragmentOutput::Color(color)
    }
}

/// Maps one input vertex to clip space.
pub trait VertexShader<V, U>: Sync {
    type Varyings: Varying + Send + Sync;

    fn shade(&self, vertex: &V, uniforms: &U) -> ClipVertex<Self::Varyings>;
}

impl<V, U, Vy, F> VertexShader<V, U> for F
where
    F: Fn(&V, &U) -> ClipVertex<Vy> + Sync,
    Vy: Varying + Send + Sync,
{
    type Varyings = Vy;

    #[inline]
    fn shade(&self, vertex: &V, uniforms: &U) -> ClipVertex<Vy> {
        self(vertex, uniforms)
    }
}

/// Maps interpolated varyings to a color for one pixel or sample.
pub trait FragmentShader<Vy, U>: Sync {
    type Output: Copy;

    fn shade(&self, varyings: &Vy, frag: &FragCoord, uniforms: &U) -> FragmentOutput<Self::Output>;
}

impl<Vy, U, T, F> FragmentShader<Vy, U> for F
where
    F: Fn(&Vy, &FragCoord, &U) -> FragmentOutput<T> + Sync,
    T: Copy,
{
    type Output = T;

    #[inline]
    fn shade(&self, varyings: &Vy, frag: &FragCoord, uniforms: &U) -> FragmentOutput<T> {
        self(varyings, frag, uniforms)
    }
}

/// Vertex stage results, indexed by vertex id.
///
/// Built once per draw before any rasterization: every index referenced by the stream is
/// shaded exactly once. Read-only afterwards, so workers share it by reference.
#[derive(Debug)]
pub struct VertexCache<Vy> {
    slots: Vec<Option<ClipVertex<Vy>>>,
    shaded: usize,
}

impl<Vy> VertexCache<Vy> {
    pub fn build<V, U, VS, S>(shader: &VS, uniforms: &U, source: &S, stream: &IndexStream<'_>) -> Self
    where
        VS: VertexShader<V, U, Varyings = Vy>,
        S: VertexSource<Vertex = V> + ?Sized,
    {
        let mut slots: Vec<Option<ClipVertex<Vy>>> = (0..source.len()).map(|_| None).collect();
        let mut shaded = 0;

        for index in stream.iter() {
            let i = index as usize;
            let (Some(slot), Some(vertex)) = (slots.get_mut(i), source.fetch(i)) else {
                continue;
            };
            if slot.is_none() {
                *slot = Some(shader.shade(vertex, uniforms));
                shaded += 1;
            }
        }

        Self { slots, shaded }
    }

    #[inline]
    pub fn get(&self, index: u32) -> Option<&ClipVertex<Vy>> {
        self.slots.get(index as usize).and_then(Option::as_ref)
    }

    /// Number of vertex stage invocations spent building the cache.
    #[inline]
    pub fn shaded(&self) -> usize {
        self.shaded
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Counting(AtomicUsize);

    impl VertexShader<f32, f32> for Counting {
        type Varyings = f32;

        fn shade(&self, v: &f32, scale: &f32) -> ClipVertex<f32> {
            self.0.fetch_add(1, Ordering::Relaxed);
            ClipVertex::new(Vec4::point(*v, 0.0, 0.0), v * scale)
        }
    }

    // ── closures ──────────────────────────────────────────────────────────

    #[test]
    fn closures_are_shaders() {
        let vs = |v: &[f32; 2], _: &()| ClipVertex::new(Vec4::point(v[0], v[1], 0.0), v[0]);
        let fs = |vy: &f32, _: &FragCoord, _: &()| FragmentOutput::Color(*vy * 2.0);

        let out = VertexShader::shade(&vs, &[0.5, 1.0], &());
        assert_eq!(out.position, Vec4::new(0.5, 1.0, 0.0, 1.0));

        let frag = FragCoord { pixel: [0, 0], sample: 0, depth: 0.0 };
        assert_eq!(FragmentShader::shade(&fs, &out.varyings, &frag, &()), FragmentOutput::Color(1.0));
    }

    #[test]
    fn fragment_output_color_accessor() {
        assert_eq!(FragmentOutput::ColorDepth(3, 0.5).color(), Some(&3));
        assert_eq!(FragmentOutput::<i32>::Discard.color(), None);
        assert_eq!(FragmentOutput::from(7), FragmentOutput::Color(7));
    }

    #[test]
    fn clip_vertex_lerp_moves_everything() {
        let a = ClipVertex::new(Vec4::new(0.0, 0.0, 0.0, 1.0), 0.0f32);
        let b = ClipVertex::new(Vec4::new(2.0, 4.0, 1.0, 3.0), 10.0f32);
        let m = a.lerp(&b, 0.5);
        assert_eq!(m.position, Vec4::new(1.0, 2.0, 0.5, 2.0));
        assert_eq!(m.varyings, 5.0);
    }

    // ── cache ─────────────────────────────────────────────────────────────

    #[test]
    fn cache_shades_each_index_once() {
        let vs = Counting(AtomicUsize::new(0));
        let verts = [1.0f32, 2.0, 3.0, 4.0];
        let indices = [0u32, 1, 2, 2, 1, 0, 2, 1];
        let cache = VertexCache::build(&vs, &10.0, &verts[..], &IndexStream::Explicit(&indices));

        assert_eq!(vs.0.load(Ordering::Relaxed), 3);
        assert_eq!(cache.shaded(), 3);
        assert_eq!(cache.get(2).map(|v| v.varyings), Some(30.0));
        assert!(cache.get(3).is_none());
        assert!(cache.get(9).is_none());
    }

    #[test]
    fn implicit_stream_shades_all_vertices() {
        let vs = Counting(AtomicUsize::new(0));
        let verts = vec![1.0f32, 2.0];
        let cache = VertexCache::build(&vs, &1.0, &verts, &IndexStream::Implicit(verts.len()));
        assert_eq!(cache.shaded(), 2);
    }
}
