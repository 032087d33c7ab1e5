//! Quaternions for orientation.
//!
//! Components are stored as `(x, y, z, w)` with `w` the scalar part. Multiplication
//! is the Hamilton product: `q1 * q2` applies `q2` first, then `q1`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::AnimationError;
use crate::math::{Mat4, Vec3, QUAT_EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub fn from_array(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Rotation of `angle` radians about `axis`. The axis is normalized first.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let norm = axis.normalized();
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(norm.x * s, norm.y * s, norm.z * s, c)
    }

    /// Shortest rotation taking direction `from` onto direction `to`.
    pub fn from_to(from: Vec3, to: Vec3) -> Self {
        let f = from.normalized();
        let t = to.normalized();

        if f.approx_eq(t) {
            return Self::IDENTITY;
        }
        if f.approx_eq(-t) {
            // Half turn about any axis orthogonal to `f`; pick the most orthogonal basis axis.
            let mut ortho = Vec3::X;
            if f.y.abs() < f.x.abs() {
                ortho = Vec3::Y;
            }
            if f.z.abs() < f.y.abs() && f.z.abs() < f.x.abs() {
                ortho = Vec3::Z;
            }
            let axis = f.cross(ortho).normalized();
            return Self::new(axis.x, axis.y, axis.z, 0.0);
        }

        let half = (f + t).normalized();
        let axis = f.cross(half);
        Self::new(axis.x, axis.y, axis.z, f.dot(half))
    }

    /// Orientation whose local +Z looks along `direction` with local +Y as close to `up`
    /// as possible.
    pub fn look_rotation(direction: Vec3, up: Vec3) -> Self {
        let f = direction.normalized();
        let desired_up = up.normalized();
        let r = desired_up.cross(f);
        let u = f.cross(r).normalized();

        let world_to_object = Self::from_to(Vec3::Z, f);
        let object_up = world_to_object * Vec3::Y;
        let u2u = if object_up.approx_eq(-u) {
            Self::from_axis_angle(f, std::f32::consts::PI)
        } else {
            Self::from_to(object_up, u)
        };

        (u2u * world_to_object).normalized()
    }

    /// Extracts the rotation from the up/forward basis of a matrix.
    pub fn from_mat4(m: &Mat4) -> Self {
        let mut up = m.y_axis().truncate().normalized();
        let forward = m.z_axis().truncate().normalized();
        let right = up.cross(forward);
        up = forward.cross(right);

        Self::look_rotation(forward, up)
    }

    #[inline]
    pub fn vector(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Rotation axis (unnormalized input yields a normalized axis; identity yields zero).
    pub fn axis(self) -> Vec3 {
        self.vector().normalized()
    }

    /// Rotation angle in radians.
    pub fn angle(self) -> f32 {
        2.0 * self.w.clamp(-1.0, 1.0).acos()
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[inline]
    pub fn len_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn len(self) -> f32 {
        let len_sq = self.len_sq();
        if len_sq < QUAT_EPSILON {
            return 0.0;
        }
        len_sq.sqrt()
    }

    /// Normalizes in place. Near-zero quaternions are left untouched.
    pub fn normalize(&mut self) {
        let len_sq = self.len_sq();
        if len_sq < QUAT_EPSILON {
            return;
        }
        let inv_len = len_sq.sqrt().recip();
        self.x *= inv_len;
        self.y *= inv_len;
        self.z *= inv_len;
        self.w *= inv_len;
    }

    /// Unit-length copy; near-zero quaternions become [`Quat::IDENTITY`].
    pub fn normalized(self) -> Self {
        if self.len_sq() < QUAT_EPSILON {
            return Self::IDENTITY;
        }
        let mut out = self;
        out.normalize();
        out
    }

    pub fn try_normalized(self) -> Result<Self, AnimationError> {
        if self.len_sq() < QUAT_EPSILON {
            return Err(AnimationError::DegenerateQuaternion);
        }
        Ok(self.normalized())
    }

    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse; near-zero quaternions yield [`Quat::IDENTITY`].
    pub fn inverse(self) -> Self {
        let len_sq = self.len_sq();
        if len_sq < QUAT_EPSILON {
            return Self::IDENTITY;
        }
        let recip = len_sq.recip();
        let c = self.conjugate();
        Self::new(c.x * recip, c.y * recip, c.z * recip, c.w * recip)
    }

    /// Plain blend, no renormalization and no neighborhood handling.
    #[inline]
    pub fn mix(self, to: Self, t: f32) -> Self {
        self * (1.0 - t) + to * t
    }

    /// Blend then renormalize. Callers flip `to` first when `dot < 0` to take the short
    /// path.
    #[inline]
    pub fn nlerp(self, to: Self, t: f32) -> Self {
        (self + (to - self) * t).normalized()
    }

    /// Raises a unit quaternion to `exponent` by scaling its angle.
    pub fn powf(self, exponent: f32) -> Self {
        let angle = 2.0 * self.w.clamp(-1.0, 1.0).acos();
        let axis = self.vector().normalized();

        let (half_sin, half_cos) = (exponent * angle * 0.5).sin_cos();
        Self::new(axis.x * half_sin, axis.y * half_sin, axis.z * half_sin, half_cos)
    }

    /// Constant angular velocity interpolation. Nearly (anti)parallel inputs fall back to
    /// [`Quat::nlerp`].
    pub fn slerp(self, end: Self, t: f32) -> Self {
        if self.dot(end).abs() > 1.0 - QUAT_EPSILON {
            return self.nlerp(end, t);
        }
        let delta = self.inverse() * end;
        (self * delta.powf(t)).normalized()
    }

    /// Component-wise equality within [`QUAT_EPSILON`].
    pub fn approx_eq(self, other: Self) -> bool {
        (self.x - other.x).abs() <= QUAT_EPSILON
            && (self.y - other.y).abs() <= QUAT_EPSILON
            && (self.z - other.z).abs() <= QUAT_EPSILON
            && (self.w - other.w).abs() <= QUAT_EPSILON
    }

    /// True when both quaternions describe the same rotation (`q` and `-q` included).
    pub fn same_orientation(self, other: Self) -> bool {
        self.approx_eq(other) || self.approx_eq(-other)
    }
}

impl Add for Quat {
    type Output = Self;
    #[inline]
    fn add(self, o: Self) -> Self {
        Self::new(self.x + o.x, self.y + o.y, self.z + o.z, self.w + o.w)
    }
}

impl Sub for Quat {
    type Output = Self;
    #[inline]
    fn sub(self, o: Self) -> Self {
        Self::new(self.x - o.x, self.y - o.y, self.z - o.z, self.w - o.w)
    }
}

impl Mul<f32> for Quat {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

impl Neg for Quat {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul for Quat {
    type Output = Self;
    fn mul(self, q: Self) -> Self {
        let p = self;
        Self::new(
            p.w * q.x + p.x * q.w + p.y * q.z - p.z * q.y,
            p.w * q.y - p.x * q.z + p.y * q.w + p.z * q.x,
            p.w * q.z + p.x * q.y - p.y * q.x + p.z * q.w,
            p.w * q.w - p.x * q.x - p.y * q.y - p.z * q.z,
        )
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 {
        let u = self.vector();
        let s = self.w;
        u * (2.0 * u.dot(v)) + v * (s * s - u.dot(u)) + u.cross(v) * (2.0 * s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!(a.approx_eq(b), "left={a:?} right={b:?}");
    }

    #[test]
    fn composition_applies_right_operand_first() {
        let yaw = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let roll = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2);

        // roll first: X -> Y, then yaw leaves Y alone.
        assert_vec_eq((yaw * roll) * Vec3::X, Vec3::Y);
        // yaw first: X -> -Z, then roll leaves Z alone.
        assert_vec_eq((roll * yaw) * Vec3::X, -Vec3::Z);
        assert_vec_eq((yaw * roll) * Vec3::X, yaw * (roll * Vec3::X));
    }

    #[test]
    fn rotating_vectors() {
        let q = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2);
        assert_vec_eq(q * Vec3::X, Vec3::Y);
        assert_vec_eq(q * Vec3::Z, Vec3::Z);
    }

    #[test]
    fn degenerate_quaternions_fall_back_to_identity() {
        let tiny = Quat::new(1e-4, 0.0, 0.0, 0.0);
        assert_eq!(tiny.len(), 0.0);
        assert_eq!(tiny.normalized(), Quat::IDENTITY);
        assert_eq!(tiny.inverse(), Quat::IDENTITY);
        assert!(tiny.try_normalized().is_err());

        let mut in_place = tiny;
        in_place.normalize();
        assert_eq!(in_place, tiny);
    }

    #[test]
    fn inverse_undoes_rotation() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0), 0.8);
        assert!((q * q.inverse()).approx_eq(Quat::IDENTITY));
        let v = Vec3::new(0.3, -1.0, 2.0);
        assert_vec_eq(q.inverse() * (q * v), v);
    }

    #[test]
    fn axis_and_angle_round_trip() {
        let axis = Vec3::new(0.0, 1.0, 1.0).normalized();
        let q = Quat::from_axis_angle(axis, 1.2);
        assert_relative_eq!(q.angle(), 1.2, epsilon = 1e-5);
        assert_vec_eq(q.axis(), axis);
    }

    #[test]
    fn from_to_maps_directions() {
        let q = Quat::from_to(Vec3::X, Vec3::Y);
        assert_vec_eq(q * Vec3::X, Vec3::Y);

        assert_eq!(Quat::from_to(Vec3::X, Vec3::X * 3.0), Quat::IDENTITY);

        let flip = Quat::from_to(Vec3::Y, -Vec3::Y);
        assert_vec_eq(flip * Vec3::Y, -Vec3::Y);
    }

    #[test]
    fn look_rotation_aligns_forward_and_up() {
        let forward = Vec3::new(1.0, 0.0, 1.0).normalized();
        let q = Quat::look_rotation(forward, Vec3::Y);
        assert_vec_eq(q * Vec3::Z, forward);
        assert_vec_eq(q * Vec3::Y, Vec3::Y);

        let upside_down = Quat::look_rotation(Vec3::Z, -Vec3::Y);
        assert_vec_eq(upside_down * Vec3::Z, Vec3::Z);
        assert_vec_eq(upside_down * Vec3::Y, -Vec3::Y);
    }

    #[test]
    fn powf_scales_the_angle() {
        let q = Quat::from_axis_angle(Vec3::X, PI * 0.5);
        let half = q.powf(0.5);
        assert!(half.approx_eq(Quat::from_axis_angle(Vec3::X, PI * 0.25)));
        assert!(Quat::IDENTITY.powf(0.3).approx_eq(Quat::IDENTITY));
    }

    #[test]
    fn slerp_midpoint_and_endpoints() {
        let a = Quat::IDENTITY;
        let b = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
        assert!(a.slerp(b, 0.0).approx_eq(a));
        assert!(a.slerp(b, 1.0).same_orientation(b));
        assert!(a
            .slerp(b, 0.5)
            .approx_eq(Quat::from_axis_angle(Vec3::Y, FRAC_PI_2 * 0.5)));
    }

    #[test]
    fn slerp_parallel_inputs_use_nlerp() {
        let q = Quat::from_axis_angle(Vec3::Z, 0.4);
        assert_eq!(q.slerp(q, 0.5), q.nlerp(q, 0.5));
        assert_eq!(q.slerp(-q, 0.25), q.nlerp(-q, 0.25));
    }

    #[test]
    fn nlerp_does_not_fix_the_neighborhood() {
        let a = Quat::IDENTITY;
        let b = -Quat::from_axis_angle(Vec3::Y, 0.5);
        let mid = a.nlerp(b, 0.5);
        let short = a.nlerp(-b, 0.5);
        assert!(short.approx_eq(Quat::from_axis_angle(Vec3::Y, 0.25)));
        // Long way round: well past a quarter turn, nowhere near the short midpoint.
        assert!(mid.angle() > FRAC_PI_2);
        assert!(!mid.same_orientation(short));
    }

    #[test]
    fn same_orientation_ignores_sign() {
        let q = Quat::from_axis_angle(Vec3::X, 1.0);
        assert!(q.same_orientation(-q));
        assert!(!q.approx_eq(-q));
    }
}
