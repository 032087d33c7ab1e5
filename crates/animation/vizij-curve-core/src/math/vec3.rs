//! Three component vector used for positions, scales and tangents.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use crate::error::AnimationError;
use crate::math::VEC_EPSILON;

/// 3D vector with f32 components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub fn from_array(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    /// Contiguous copy of the components, in `x, y, z` order.
    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn len_sq(self) -> f32 {
        self.dot(self)
    }

    /// Length of the vector, or 0 when the squared length is below [`VEC_EPSILON`].
    pub fn len(self) -> f32 {
        let len_sq = self.len_sq();
        if len_sq < VEC_EPSILON {
            return 0.0;
        }
        len_sq.sqrt()
    }

    /// Normalizes in place. Near-zero vectors are left untouched.
    pub fn normalize(&mut self) {
        let len_sq = self.len_sq();
        if len_sq < VEC_EPSILON {
            return;
        }
        let inv_len = len_sq.sqrt().recip();
        self.x *= inv_len;
        self.y *= inv_len;
        self.z *= inv_len;
    }

    /// Returns a unit-length copy. Near-zero vectors are returned unchanged.
    pub fn normalized(self) -> Self {
        let mut out = self;
        out.normalize();
        out
    }

    /// Like [`Vec3::normalized`] but reports near-zero input instead of passing it through.
    pub fn try_normalized(self) -> Result<Self, AnimationError> {
        if self.len_sq() < VEC_EPSILON {
            return Err(AnimationError::DegenerateVector);
        }
        Ok(self.normalized())
    }

    /// Angle in radians between two vectors; 0 if either is near zero.
    pub fn angle(self, other: Self) -> f32 {
        let sq_a = self.len_sq();
        let sq_b = other.len_sq();
        if sq_a < VEC_EPSILON || sq_b < VEC_EPSILON {
            return 0.0;
        }
        let cos = self.dot(other) / (sq_a.sqrt() * sq_b.sqrt());
        cos.clamp(-1.0, 1.0).acos()
    }

    /// Component of `self` along `onto`.
    pub fn project(self, onto: Self) -> Self {
        let mag_sq = onto.len_sq();
        if mag_sq < VEC_EPSILON {
            return Self::ZERO;
        }
        onto * (self.dot(onto) / mag_sq)
    }

    /// Component of `self` perpendicular to `onto`.
    pub fn reject(self, onto: Self) -> Self {
        self - self.project(onto)
    }

    /// Reflects `self` about the plane whose normal is `normal`.
    pub fn reflect(self, normal: Self) -> Self {
        let mag_sq = normal.len_sq();
        if mag_sq < VEC_EPSILON {
            return Self::ZERO;
        }
        let scale = self.dot(normal) / mag_sq;
        self - normal * (scale * 2.0)
    }

    #[inline]
    pub fn lerp(self, end: Self, t: f32) -> Self {
        Self::new(
            self.x + (end.x - self.x) * t,
            self.y + (end.y - self.y) * t,
            self.z + (end.z - self.z) * t,
        )
    }

    /// Spherical interpolation between the directions of `self` and `end`.
    ///
    /// Small `t` (below 0.01) falls back to [`Vec3::lerp`].
    pub fn slerp(self, end: Self, t: f32) -> Self {
        if t < 0.01 {
            return self.lerp(end, t);
        }
        let from = self.normalized();
        let to = end.normalized();

        let theta = from.angle(to);
        let sin_theta = theta.sin();
        if sin_theta.abs() < VEC_EPSILON {
            return self.lerp(end, t);
        }

        let a = ((1.0 - t) * theta).sin() / sin_theta;
        let b = (t * theta).sin() / sin_theta;
        from * a + to * b
    }

    #[inline]
    pub fn nlerp(self, end: Self, t: f32) -> Self {
        self.lerp(end, t).normalized()
    }

    /// Component-wise product.
    #[inline]
    pub fn mul_elem(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Equality within [`VEC_EPSILON`] on the squared distance.
    #[inline]
    pub fn approx_eq(self, other: Self) -> bool {
        (self - other).len_sq() < VEC_EPSILON
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Mul<Vec3> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.mul_elem(other)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Self::from_array(v)
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}
