//! Two component vector.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use crate::math::VEC_EPSILON;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }

    #[inline]
    pub fn len_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn len(self) -> f32 {
        let len_sq = self.len_sq();
        if len_sq < VEC_EPSILON {
            return 0.0;
        }
        len_sq.sqrt()
    }

    /// Normalizes in place; near-zero vectors are left untouched.
    pub fn normalize(&mut self) {
        let len_sq = self.len_sq();
        if len_sq < VEC_EPSILON {
            return;
        }
        let inv_len = len_sq.sqrt().recip();
        self.x *= inv_len;
        self.y *= inv_len;
    }

    pub fn normalized(self) -> Self {
        let mut out = self;
        out.normalize();
        out
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn arithmetic_and_length() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.len(), 5.0);
        assert_eq!(v + Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0));
        assert_eq!(v - Vec2::new(1.0, 1.0), Vec2::new(2.0, 3.0));
        assert_eq!(v * 2.0, Vec2::new(6.0, 8.0));
        let n = v.normalized();
        assert_relative_eq!(n.x, 0.6, epsilon = 1e-6);
        assert_relative_eq!(n.y, 0.8, epsilon = 1e-6);
    }

    #[test]
    fn degenerate_vector_is_not_normalized() {
        let v = Vec2::new(0.0, 1e-4);
        assert_eq!(v.len(), 0.0);
        assert_eq!(v.normalized(), v);
    }
}
