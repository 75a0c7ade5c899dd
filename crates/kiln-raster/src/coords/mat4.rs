use core::ops::Mul;

use crate::math::ops;

use super::Vec4;

/// Column-major 4x4 matrix for building vertex shaders.
///
/// Projection helpers are right-handed and target the pipeline's clip convention
/// (`0 <= z <= w` is visible depth).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub cols: [Vec4; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4::from_cols(
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    );

    #[inline]
    pub const fn from_cols(x: Vec4, y: Vec4, z: Vec4, w: Vec4) -> Self {
        Self { cols: [x, y, z, w] }
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = Vec4::point(x, y, z);
        m
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self::from_cols(
            Vec4::new(x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, z, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = (ops::sin(angle), ops::cos(angle));
        Self::from_cols(
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, c, s, 0.0),
            Vec4::new(0.0, -s, c, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = (ops::sin(angle), ops::cos(angle));
        Self::from_cols(
            Vec4::new(c, 0.0, -s, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(s, 0.0, c, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = (ops::sin(angle), ops::cos(angle));
        Self::from_cols(
            Vec4::new(c, s, 0.0, 0.0),
            Vec4::new(-s, c, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    /// Right-handed perspective projection.
    ///
    /// `fov_y` is the vertical field of view in radians. Points at `-near` map to depth 0,
    /// points at `-far` to depth 1.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / ops::tan(fov_y * 0.5);
        let r = far / (near - far);
        Self::from_cols(
            Vec4::new(f / aspect, 0.0, 0.0, 0.0),
            Vec4::new(0.0, f, 0.0, 0.0),
            Vec4::new(0.0, 0.0, r, -1.0),
            Vec4::new(0.0, 0.0, r * near, 0.0),
        )
    }

    /// Right-handed orthographic projection.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rw = 1.0 / (right - left);
        let rh = 1.0 / (top - bottom);
        let r = 1.0 / (near - far);
        Self::from_cols(
            Vec4::new(2.0 * rw, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * rh, 0.0, 0.0),
            Vec4::new(0.0, 0.0, r, 0.0),
            Vec4::new(-(left + right) * rw, -(top + bottom) * rh, r * near, 1.0),
        )
    }

    /// Right-handed view matrix looking from `eye` towards `target`.
    pub fn look_at(eye: [f32; 3], target: [f32; 3], up: [f32; 3]) -> Self {
        let f = normalize3(sub3(target, eye));
        let s = normalize3(cross3(f, up));
        let u = cross3(s, f);
        Self::from_cols(
            Vec4::new(s[0], u[0], -f[0], 0.0),
            Vec4::new(s[1], u[1], -f[1], 0.0),
            Vec4::new(s[2], u[2], -f[2], 0.0),
            Vec4::new(-dot3(eye, s), -dot3(eye, u), dot3(eye, f), 1.0),
        )
    }

    #[inline]
    pub fn row(&self, i: usize) -> Vec4 {
        let c = &self.cols;
        let pick = |v: Vec4| v.to_array()[i];
        Vec4::new(pick(c[0]), pick(c[1]), pick(c[2]), pick(c[3]))
    }

    pub fn transpose(&self) -> Self {
        Self::from_cols(self.row(0), self.row(1), self.row(2), self.row(3))
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, v: Vec4) -> Vec4 {
        let [a, b, c, d] = self.cols;
        a * v.x + b * v.y + c * v.z + d * v.w
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    #[inline]
    fn mul(self, rhs: Mat4) -> Mat4 {
        let [a, b, c, d] = rhs.cols;
        Mat4::from_cols(self * a, self * b, self * c, self * d)
    }
}

#[inline]
fn sub3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
fn dot3(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn cross3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize3(v: [f32; 3]) -> [f32; 3] {
    let len = ops::sqrt(dot3(v, v));
    if len <= f32::EPSILON {
        return v;
    }
    [v[0] / len, v[1] / len, v[2] / len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn identity_is_neutral() {
        let v = Vec4::new(1.0, -2.0, 3.0, 1.0);
        assert_eq!(Mat4::IDENTITY * v, v);
        let t = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(t * Mat4::IDENTITY, t);
    }

    #[test]
    fn translation_moves_points_not_directions() {
        let t = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(t * Vec4::point(0.0, 0.0, 0.0), Vec4::point(1.0, 2.0, 3.0));
        assert_eq!(t * Vec4::direction(1.0, 0.0, 0.0), Vec4::direction(1.0, 0.0, 0.0));
    }

    #[test]
    fn perspective_maps_near_and_far_to_depth_range() {
        let p = Mat4::perspective(core::f32::consts::FRAC_PI_2, 1.0, 0.5, 10.0);
        let near = p * Vec4::point(0.0, 0.0, -0.5);
        let far = p * Vec4::point(0.0, 0.0, -10.0);
        assert_abs_diff_eq!(near.z / near.w, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(far.z / far.w, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn look_at_puts_target_on_negative_z() {
        let v = Mat4::look_at([0.0, 0.0, 5.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let p = v * Vec4::point(0.0, 0.0, 0.0);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.z, -5.0, epsilon = 1e-6);
    }

    #[test]
    fn transpose_twice_is_identity() {
        let m = Mat4::rotation_y(0.3) * Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(m.transpose().transpose(), m);
    }
}
