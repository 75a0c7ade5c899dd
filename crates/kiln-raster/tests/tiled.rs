//! Banded multi-threaded drawing must match the single-threaded path exactly.

use kiln_raster::prelude::*;

type Vertex = ([f32; 3], Color);

fn transform(v: &Vertex, rotation: &Mat4) -> ClipVertex<Color> {
    let [x, y, z] = v.0;
    let p = *rotation * Vec4::point(x, y, z);
    // Push into (0, 1) depth with a mild perspective.
    let w = 1.5 + 0.25 * p.z;
    ClipVertex::new(Vec4::new(p.x, p.y, (p.z + 1.0) * 0.5 * w * 0.5, w), v.1)
}

fn shade(color: &Color, _: &FragCoord, _: &Mat4) -> FragmentOutput<Color> {
    FragmentOutput::Color(*color)
}

fn scene() -> Vec<Vertex> {
    let palette = [Color::rgb(1.0, 0.2, 0.1), Color::rgb(0.1, 0.8, 0.3), Color::rgb(0.2, 0.3, 1.0)];
    let mut verts = Vec::new();
    for i in 0..12 {
        let a = i as f32 * 0.53;
        let r = 0.4 + 0.05 * (i % 5) as f32;
        let z = -0.8 + 0.13 * i as f32;
        for k in 0..3 {
            let t = a + k as f32 * 2.1;
            verts.push(([r * t.cos() * 1.6, r * t.sin() * 1.6, z], palette[(i + k) % 3]));
        }
    }
    verts
}

fn render(config: PipelineConfig, tiled: bool) -> (Buffer2d<Color>, Buffer2d<f32>, DrawStats) {
    let size = [13, 11];
    let samples = config.samples as usize;
    let pipeline = Pipeline::new(config, transform, shade).expect("valid config");
    let mut targets = Attachments::with_depth(
        Buffer2d::with_samples(size, samples, Color::transparent()),
        Buffer2d::with_samples(size, samples, 1.0f32),
    );
    let uniforms = Mat4::rotation_z(0.3);
    let verts = scene();

    let stats = if tiled {
        pipeline.draw_tiled(&uniforms, &verts[..], None, &mut targets)
    } else {
        pipeline.draw(&uniforms, &verts[..], None, &mut targets)
    }
    .expect("valid draw");

    let (color, depth, _) = targets.into_parts();
    (color, depth, stats)
}

#[test]
fn banded_output_matches_sequential() {
    for workers in [Workers::Fixed(3), Workers::Fixed(16), Workers::Auto] {
        let config = PipelineConfig::default().with_samples(4).with_blend(BlendMode::Alpha);
        let (color, depth, stats) = render(config.clone(), false);
        let (tiled_color, tiled_depth, tiled_stats) = render(config.with_workers(workers), true);

        assert!(stats.samples_written > 0);
        assert_eq!(color, tiled_color, "{workers:?}");
        assert_eq!(depth, tiled_depth, "{workers:?}");
        assert_eq!(stats, tiled_stats, "{workers:?}");
    }
}

#[test]
fn banded_lines_match_sequential() {
    let config = PipelineConfig::default()
        .with_topology(Topology::LineStrip)
        .with_line_width(3.0)
        .with_depth(DepthState::DISABLED);
    let (color, _, stats) = render(config.clone(), false);
    let (tiled_color, _, tiled_stats) = render(config.with_workers(Workers::Fixed(4)), true);

    assert_eq!(color, tiled_color);
    assert_eq!(stats, tiled_stats);
}

#[test]
fn more_workers_than_rows_is_fine() {
    let config = PipelineConfig::default().with_workers(Workers::Fixed(64));
    let (color, _, _) = render(config.clone(), true);
    let (expected, _, _) = render(config.with_workers(Workers::Single), false);
    assert_eq!(color, expected);
}
