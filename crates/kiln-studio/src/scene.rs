//! The demo scene: a lit cube with a wireframe overlay standing on a checkerboard floor.

use anyhow::{Context, Result};
use kiln_raster::prelude::*;

const SKY: Color = Color::rgb(0.55, 0.7, 0.9);
const LIGHT: [f32; 3] = [0.36, 0.8, 0.48];
const QUAD: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// View and projection shared by every draw.
#[derive(Debug, Copy, Clone)]
struct Camera {
    view_proj: Mat4,
    model: Mat4,
}

impl Camera {
    fn new([width, height]: [usize; 2]) -> Self {
        let aspect = width as f32 / height as f32;
        let proj = Mat4::perspective(0.8, aspect, 0.1, 50.0);
        let view = Mat4::look_at([2.4, 1.8, 3.2], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        Self { view_proj: proj * view, model: Mat4::rotation_y(0.35) }
    }

    fn with_model(self, model: Mat4) -> Self {
        Self { model, ..self }
    }

    #[inline]
    fn project(&self, [x, y, z]: [f32; 3]) -> Vec4 {
        self.view_proj * (self.model * Vec4::point(x, y, z))
    }
}

struct Floor<'a> {
    camera: Camera,
    texture: Bilinear<'a, Buffer2d<Color>>,
}

// ── geometry ──────────────────────────────────────────────────────────────

type ColoredVertex = ([f32; 3], Color);
type TexturedVertex = ([f32; 3], [f32; 2]);

/// Unit cube, four vertices per face so each face keeps a flat color.
/// Faces wind counter-clockwise seen from outside.
fn cube() -> (Vec<ColoredVertex>, Vec<u32>) {
    let faces: [([f32; 3], [f32; 3], [f32; 3], Color); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], Color::rgb(0.9, 0.3, 0.2)),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0], Color::rgb(0.2, 0.7, 0.3)),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0], Color::rgb(0.95, 0.85, 0.3)),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0], Color::rgb(0.4, 0.4, 0.4)),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], Color::rgb(0.25, 0.4, 0.9)),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0], Color::rgb(0.8, 0.35, 0.8)),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (n, u, v, color) in faces {
        let lambert = (n[0] * LIGHT[0] + n[1] * LIGHT[1] + n[2] * LIGHT[2]).max(0.0);
        let lit = color.scaled(0.35 + 0.65 * lambert);
        let lit = Color::from_premul(lit.r, lit.g, lit.b, 1.0);

        let base = vertices.len() as u32;
        for (su, sv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            let p = core::array::from_fn(|i| n[i] * 0.5 + u[i] * su + v[i] * sv);
            vertices.push((p, lit));
        }
        indices.extend(QUAD.iter().map(|i| base + i));
    }
    (vertices, indices)
}

/// The twelve cube edges as a line list.
fn cube_edges() -> (Vec<[f32; 3]>, Vec<u32>) {
    let corners: Vec<[f32; 3]> = (0..8)
        .map(|i| [(i & 1) as f32 - 0.5, ((i >> 1) & 1) as f32 - 0.5, ((i >> 2) & 1) as f32 - 0.5])
        .collect();
    let mut indices = Vec::with_capacity(24);
    for a in 0..8u32 {
        for bit in [1, 2, 4] {
            if a & bit == 0 {
                indices.extend([a, a | bit]);
            }
        }
    }
    (corners, indices)
}

fn floor() -> [TexturedVertex; 4] {
    let (y, r) = (-0.5, 4.0);
    [
        ([-r, y, r], [0.0, 1.0]),
        ([r, y, r], [1.0, 1.0]),
        ([r, y, -r], [1.0, 0.0]),
        ([-r, y, -r], [0.0, 0.0]),
    ]
}

fn checkerboard(size: usize, cell: usize) -> Buffer2d<Color> {
    let light = Color::rgb(0.85, 0.85, 0.8);
    let dark = Color::rgb(0.25, 0.27, 0.3);
    let mut texture = Buffer2d::new([size, size], light);
    for y in 0..size {
        for x in 0..size {
            if (x / cell + y / cell) % 2 == 1 {
                texture.set([x, y], 0, dark);
            }
        }
    }
    texture
}

// ── shaders ───────────────────────────────────────────────────────────────

fn cube_vertex(v: &ColoredVertex, camera: &Camera) -> ClipVertex<Color> {
    ClipVertex::new(camera.project(v.0), v.1)
}

fn flat_fragment(color: &Color, _: &FragCoord, _: &Camera) -> FragmentOutput<Color> {
    FragmentOutput::Color(*color)
}

fn edge_vertex(p: &[f32; 3], camera: &Camera) -> ClipVertex<()> {
    ClipVertex::new(camera.project(*p), ())
}

fn edge_fragment(_: &(), _: &FragCoord, _: &Camera) -> FragmentOutput<Color> {
    FragmentOutput::Color(Color::rgb(0.05, 0.05, 0.08))
}

fn floor_vertex(v: &TexturedVertex, floor: &Floor<'_>) -> ClipVertex<[f32; 2]> {
    ClipVertex::new(floor.camera.project(v.0), v.1)
}

fn floor_fragment(uv: &[f32; 2], _: &FragCoord, floor: &Floor<'_>) -> FragmentOutput<Color> {
    let texel = floor.texture.sample([uv[0] * 6.0, uv[1] * 6.0]);
    FragmentOutput::Color(texel)
}

// ── render ────────────────────────────────────────────────────────────────

/// Renders the scene and returns the resolved color buffer.
pub fn render(size: [usize; 2], samples: u32, workers: Workers) -> Result<Buffer2d<Color>> {
    let base = PipelineConfig::default().with_samples(samples).with_workers(workers);
    let per_pixel = samples as usize;
    let mut targets = Attachments::with_depth(
        Buffer2d::with_samples(size, per_pixel, SKY),
        Buffer2d::with_samples(size, per_pixel, 1.0f32),
    );
    let camera = Camera::new(size);

    let checker = checkerboard(16, 2);
    let texture = Bilinear::new(&checker, WrapMode::Repeat).context("floor texture is empty")?;
    let uniforms = Floor { camera: camera.with_model(Mat4::IDENTITY), texture };
    let pipeline = Pipeline::new(base.clone(), floor_vertex, floor_fragment)?;
    let stats = pipeline.draw_tiled(&uniforms, &floor(), Some(&QUAD[..]), &mut targets)?;
    log::debug!("floor: {stats}");

    let (vertices, indices) = cube();
    let config = base.clone().with_cull(CullMode::Clockwise);
    let pipeline = Pipeline::new(config, cube_vertex, flat_fragment)?;
    let stats = pipeline.draw_tiled(&camera, &vertices, Some(&indices[..]), &mut targets)?;
    log::debug!("cube: {stats}");

    // Slightly inflated so the outline wins the depth test against its own faces.
    let (corners, edges) = cube_edges();
    let config = base
        .with_topology(Topology::LineList)
        .with_line_width(2.0)
        .with_depth(DepthState::new(CompareFunc::LessEqual, false));
    let pipeline = Pipeline::new(config, edge_vertex, edge_fragment)?;
    let outline = camera.with_model(camera.model * Mat4::scale(1.01, 1.01, 1.01));
    let stats = pipeline.draw_tiled(&outline, &corners, Some(&edges[..]), &mut targets)?;
    log::debug!("outline: {stats}");

    Ok(targets.color.resolve())
}
