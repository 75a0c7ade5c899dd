//! Homogeneous clipping.
//!
//! Every primitive is tested against the view volume in clip space, before the perspective
//! divide. Per vertex an outcode records which boundaries it lies outside of; the OR and AND
//! of those codes give trivial accept and trivial reject. Everything else is clipped plane by
//! plane (Sutherland–Hodgman for triangles, parametric for lines) and re-triangulated as a fan.
//!
//! Boundaries and their inside half-spaces:
//!
//! | flag     | inside when  |
//! |----------|--------------|
//! | `W`      | `w >= ε`     |
//! | `NEAR`   | `z >= 0`     |
//! | `FAR`    | `z <= w`     |
//! | `LEFT`   | `x >= -w`    |
//! | `RIGHT`  | `x <= w`     |
//! | `BOTTOM` | `y >= -w`    |
//! | `TOP`    | `y <= w`     |
//!
//! `W` and `NEAR` are always active. A disabled side plane is replaced by a guard band at
//! `±GUARD_BAND · w`; the rasterizer scissors the rest exactly. A disabled `FAR` plane is
//! simply not tested.

use bitflags::bitflags;

use crate::coords::Vec4;
use crate::math::Varying;
use crate::shader::ClipVertex;

/// Smallest `w` a vertex may keep after clipping.
pub const W_EPSILON: f32 = 1.0e-5;

/// Half-extent, in NDC units, of the guard band used for disabled side planes.
pub const GUARD_BAND: f32 = 16.0;

bitflags! {
    /// Set of clip boundaries. Also used as the per-vertex outcode.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ClipPlanes: u8 {
        const W      = 1 << 0;
        const NEAR   = 1 << 1;
        const FAR    = 1 << 2;
        const LEFT   = 1 << 3;
        const RIGHT  = 1 << 4;
        const BOTTOM = 1 << 5;
        const TOP    = 1 << 6;
    }
}

impl ClipPlanes {
    /// Boundaries that cannot be switched off.
    pub const MANDATORY: ClipPlanes = ClipPlanes::W.union(ClipPlanes::NEAR);
}

impl Default for ClipPlanes {
    fn default() -> Self {
        ClipPlanes::all()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Plane {
    W,
    Near,
    Far,
    Left,
    Right,
    Bottom,
    Top,
}

impl Plane {
    const ALL: [Plane; 7] = [Plane::W, Plane::Near, Plane::Far, Plane::Left, Plane::Right, Plane::Bottom, Plane::Top];

    const fn flag(self) -> ClipPlanes {
        match self {
            Plane::W => ClipPlanes::W,
            Plane::Near => ClipPlanes::NEAR,
            Plane::Far => ClipPlanes::FAR,
            Plane::Left => ClipPlanes::LEFT,
            Plane::Right => ClipPlanes::RIGHT,
            Plane::Bottom => ClipPlanes::BOTTOM,
            Plane::Top => ClipPlanes::TOP,
        }
    }
}

/// What happened to a primitive.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClipOutcome {
    /// Entirely inside; passed through untouched.
    Inside,
    /// Straddled at least one boundary and was cut.
    Clipped,
    /// Nothing left.
    Rejected,
}

/// Clipper with reusable polygon scratch space.
#[derive(Debug)]
pub struct Clipper<Vy> {
    planes: ClipPlanes,
    polygon: Vec<ClipVertex<Vy>>,
    scratch: Vec<ClipVertex<Vy>>,
}

impl<Vy: Varying> Clipper<Vy> {
    pub fn new(planes: ClipPlanes) -> Self {
        Self {
            planes: planes | ClipPlanes::MANDATORY,
            polygon: Vec::with_capacity(9),
            scratch: Vec::with_capacity(9),
        }
    }

    /// Active boundaries (configured plus mandatory).
    #[inline]
    pub fn planes(&self) -> ClipPlanes {
        self.planes
    }

    /// Signed distance to a boundary; `>= 0` is inside.
    #[inline]
    fn distance(&self, plane: Plane, p: Vec4) -> f32 {
        let side = |flag| if self.planes.contains(flag) { p.w } else { GUARD_BAND * p.w };
        match plane {
            Plane::W => p.w - W_EPSILON,
            Plane::Near => p.z,
            Plane::Far => p.w - p.z,
            Plane::Left => p.x + side(ClipPlanes::LEFT),
            Plane::Right => side(ClipPlanes::RIGHT) - p.x,
            Plane::Bottom => p.y + side(ClipPlanes::BOTTOM),
            Plane::Top => side(ClipPlanes::TOP) - p.y,
        }
    }

    #[inline]
    fn tested(&self, plane: Plane) -> bool {
        plane != Plane::Far || self.planes.contains(ClipPlanes::FAR)
    }

    /// Boundaries `p` lies outside of.
    pub fn outcode(&self, p: Vec4) -> ClipPlanes {
        let mut code = ClipPlanes::empty();
        for plane in Plane::ALL {
            // NaN distances count as outside.
            if self.tested(plane) && !(self.distance(plane, p) >= 0.0) {
                code |= plane.flag();
            }
        }
        code
    }

    /// Clips a triangle and hands every resulting triangle to `emit`, in fan order.
    ///
    /// An inside triangle is emitted as the very same vertex references it came in as.
    pub fn triangle(
        &mut self,
        tri: [&ClipVertex<Vy>; 3],
        mut emit: impl FnMut([&ClipVertex<Vy>; 3]),
    ) -> ClipOutcome {
        let codes = tri.map(|v| self.outcode(v.position));
        let any = codes[0] | codes[1] | codes[2];
        let all = codes[0] & codes[1] & codes[2];

        if !all.is_empty() {
            return ClipOutcome::Rejected;
        }
        if any.is_empty() {
            emit(tri);
            return ClipOutcome::Inside;
        }

        self.polygon.clear();
        self.polygon.extend(tri.iter().map(|v| (*v).clone()));

        for plane in Plane::ALL {
            if !any.contains(plane.flag()) {
                continue;
            }
            self.clip_polygon(plane);
            if self.polygon.len() < 3 {
                return ClipOutcome::Rejected;
            }
        }

        let p = &self.polygon;
        for i in 1..p.len() - 1 {
            emit([&p[0], &p[i], &p[i + 1]]);
        }
        ClipOutcome::Clipped
    }

    /// One Sutherland–Hodgman pass of `self.polygon` against `plane`.
    fn clip_polygon(&mut self, plane: Plane) {
        self.scratch.clear();
        let n = self.polygon.len();

        for i in 0..n {
            let cur = &self.polygon[i];
            let next = &self.polygon[(i + 1) % n];
            let dc = self.distance(plane, cur.position);
            let dn = self.distance(plane, next.position);

            if dc >= 0.0 {
                self.scratch.push(cur.clone());
            }
            if (dc >= 0.0) != (dn >= 0.0) {
                let t = dc / (dc - dn);
                self.scratch.push(cur.lerp(next, t));
            }
        }

        core::mem::swap(&mut self.polygon, &mut self.scratch);
    }

    /// Clips a segment. Endpoints inside every boundary are returned unchanged.
    pub fn line(&self, a: &ClipVertex<Vy>, b: &ClipVertex<Vy>) -> Option<[ClipVertex<Vy>; 2]> {
        let (ca, cb) = (self.outcode(a.position), self.outcode(b.position));
        if !(ca & cb).is_empty() {
            return None;
        }
        if (ca | cb).is_empty() {
            return Some([a.clone(), b.clone()]);
        }

        let (mut t0, mut t1) = (0.0f32, 1.0f32);
        for plane in Plane::ALL {
            if !(ca | cb).contains(plane.flag()) {
                continue;
            }
            let da = self.distance(plane, a.position);
            let db = self.distance(plane, b.position);
            if da < 0.0 && db < 0.0 {
                return None;
            }
            let t = da / (da - db);
            if da < 0.0 {
                t0 = t0.max(t);
            } else if db < 0.0 {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }

        let start = if t0 > 0.0 { a.lerp(b, t0) } else { a.clone() };
        let end = if t1 < 1.0 { a.lerp(b, t1) } else { b.clone() };
        Some([start, end])
    }

    /// A point survives only if it is inside every boundary.
    #[inline]
    pub fn point(&self, p: &ClipVertex<Vy>) -> bool {
        self.outcode(p.position).is_empty()
    }
}

/// Convenience wrapper collecting the output of [`Clipper::triangle`].
pub fn clip_triangle<Vy: Varying>(planes: ClipPlanes, tri: &[ClipVertex<Vy>; 3]) -> Vec<[ClipVertex<Vy>; 3]> {
    let mut out = Vec::new();
    Clipper::new(planes).triangle([&tri[0], &tri[1], &tri[2]], |t| out.push(t.map(Clone::clone)));
    out
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn v(x: f32, y: f32, z: f32, w: f32) -> ClipVertex<f32> {
        ClipVertex::new(Vec4::new(x, y, z, w), z)
    }

    // ── outcodes ──────────────────────────────────────────────────────────

    #[test]
    fn mandatory_planes_cannot_be_disabled() {
        let c = Clipper::<f32>::new(ClipPlanes::empty());
        assert_eq!(c.planes(), ClipPlanes::MANDATORY);
        assert_eq!(c.outcode(Vec4::new(0.0, 0.0, -1.0, 1.0)), ClipPlanes::NEAR);
        assert_eq!(c.outcode(Vec4::new(0.0, 0.0, 0.0, 0.0)), ClipPlanes::W);
    }

    #[test]
    fn outcode_flags_each_violated_plane() {
        let c = Clipper::<f32>::new(ClipPlanes::all());
        assert!(c.outcode(Vec4::new(0.5, -0.5, 0.5, 1.0)).is_empty());
        assert_eq!(c.outcode(Vec4::new(2.0, 0.0, 0.5, 1.0)), ClipPlanes::RIGHT);
        assert_eq!(c.outcode(Vec4::new(0.0, -2.0, 2.0, 1.0)), ClipPlanes::BOTTOM | ClipPlanes::FAR);
        assert!(c.outcode(Vec4::new(f32::NAN, 0.0, 0.5, 1.0)).contains(ClipPlanes::LEFT));
    }

    #[test]
    fn disabled_side_plane_uses_guard_band() {
        let c = Clipper::<f32>::new(ClipPlanes::MANDATORY | ClipPlanes::FAR);
        assert!(c.outcode(Vec4::new(3.0, -3.0, 0.5, 1.0)).is_empty());
        assert_eq!(c.outcode(Vec4::new(20.0, 0.0, 0.5, 1.0)), ClipPlanes::RIGHT);
    }

    // ── triangles ─────────────────────────────────────────────────────────

    #[test]
    fn inside_triangle_is_unchanged() {
        let tri = [v(-0.5, -0.5, 0.2, 1.0), v(0.5, -0.5, 0.4, 1.0), v(0.0, 0.5, 0.6, 2.0)];
        let out = clip_triangle(ClipPlanes::all(), &tri);
        assert_eq!(out, vec![tri.clone()]);

        let mut c = Clipper::new(ClipPlanes::all());
        let outcome = c.triangle([&tri[0], &tri[1], &tri[2]], |t| {
            assert!(core::ptr::eq(t[0], &tri[0]));
        });
        assert_eq!(outcome, ClipOutcome::Inside);
    }

    #[test]
    fn triangle_outside_one_plane_is_rejected() {
        let tri = [v(2.0, 0.0, 0.5, 1.0), v(3.0, 0.0, 0.5, 1.0), v(2.5, 1.0, 0.5, 1.0)];
        let mut c = Clipper::new(ClipPlanes::all());
        assert_eq!(c.triangle([&tri[0], &tri[1], &tri[2]], |_| panic!("emitted")), ClipOutcome::Rejected);
    }

    #[test]
    fn near_clip_splits_into_fan() {
        let tri = [v(-0.5, -0.5, 0.5, 1.0), v(0.5, -0.5, 0.5, 1.0), v(0.0, 0.5, -0.5, 1.0)];
        let out = clip_triangle(ClipPlanes::all(), &tri);
        assert_eq!(out.len(), 2);

        let m1 = &out[0][2];
        assert_relative_eq!(m1.position.x, 0.25);
        assert_relative_eq!(m1.position.y, 0.0);
        assert_relative_eq!(m1.position.z, 0.0);
        assert_relative_eq!(m1.varyings, 0.0);

        let m2 = &out[1][2];
        assert_relative_eq!(m2.position.x, -0.25);
        assert_eq!(out[1][0], out[0][0]);
    }

    #[test]
    fn vertex_behind_eye_leaves_positive_w() {
        // Perspective-style vertex behind the camera: negative z and w.
        let tri = [v(-0.5, -0.5, 0.5, 1.0), v(0.5, -0.5, 0.5, 1.0), v(0.0, 0.0, -2.0, -1.0)];
        let out = clip_triangle(ClipPlanes::all(), &tri);
        assert!(!out.is_empty());
        for t in &out {
            for vert in t {
                assert!(vert.position.w > 0.0);
                assert!(vert.position.z >= -1.0e-6);
            }
        }
    }

    #[test]
    fn clipping_against_two_planes() {
        let tri = [v(-3.0, -3.0, 0.5, 1.0), v(3.0, -3.0, 0.5, 1.0), v(0.0, 3.0, 0.5, 1.0)];
        let out = clip_triangle(ClipPlanes::all(), &tri);
        assert!(out.len() >= 2);
        for t in &out {
            for vert in t {
                assert!(vert.position.x.abs() <= 1.0 + 1e-5);
                assert!(vert.position.y.abs() <= 1.0 + 1e-5);
            }
        }
    }

    // ── lines and points ──────────────────────────────────────────────────

    #[test]
    fn line_is_cut_at_boundary() {
        let c = Clipper::new(ClipPlanes::all());
        let [a, b] = c.line(&v(0.0, 0.0, 0.5, 1.0), &v(3.0, 0.0, 0.5, 1.0)).expect("visible");
        assert_eq!(a.position, Vec4::new(0.0, 0.0, 0.5, 1.0));
        assert_relative_eq!(b.position.x, 1.0);
    }

    #[test]
    fn line_outside_is_dropped() {
        let c = Clipper::new(ClipPlanes::all());
        assert!(c.line(&v(2.0, 0.0, 0.5, 1.0), &v(3.0, 1.0, 0.5, 1.0)).is_none());
        // Crosses two planes' outside regions without entering the volume.
        assert!(c.line(&v(0.0, 3.0, 0.5, 1.0), &v(3.0, 0.0, 0.5, 1.0)).is_none());
    }

    #[test]
    fn line_through_near_plane() {
        let c = Clipper::new(ClipPlanes::all());
        let [a, b] = c.line(&v(0.0, 0.0, -1.0, 1.0), &v(0.0, 0.0, 1.0, 1.0)).expect("visible");
        assert_relative_eq!(a.position.z, 0.0);
        assert_relative_eq!(a.varyings, 0.0);
        assert_eq!(b.position.z, 1.0);
    }

    #[test]
    fn points_are_all_or_nothing() {
        let c = Clipper::new(ClipPlanes::all());
        assert!(c.point(&v(0.9, 0.9, 0.5, 1.0)));
        assert!(!c.point(&v(1.1, 0.0, 0.5, 1.0)));
    }
}
