use core::ops::{Add, Mul, Sub};

/// Screen-space position in pixels, +Y down, pixel centers at `.5`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

macro_rules! componentwise {
    ($($trait:ident::$method:ident => $op:tt),+) => {$(
        impl $trait for Vec2 {
            type Output = Vec2;
            #[inline]
            fn $method(self, rhs: Vec2) -> Vec2 {
                Vec2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }
    )+};
}

componentwise!(Add::add => +, Sub::sub => -);

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, k: f32) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}
