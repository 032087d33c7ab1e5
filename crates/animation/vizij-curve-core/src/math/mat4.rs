//! 4x4 matrices, column-major (OpenGL/WebGL convention).

use log::warn;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

use crate::error::AnimationError;
use crate::math::{Quat, Vec3, Vec4, MAT4_EPSILON};

/// 4x4 transformation matrix.
///
/// Element `(row, col)` lives at `data[col * 4 + row]`; the last column holds the
/// translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4 {
    data: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, 0.0, // Column 0
            0.0, 1.0, 0.0, 0.0, // Column 1
            0.0, 0.0, 1.0, 0.0, // Column 2
            0.0, 0.0, 0.0, 1.0, // Column 3
        ],
    };

    pub const ZERO: Self = Self { data: [0.0; 16] };

    /// Builds a matrix from column-major data.
    #[inline]
    pub const fn from_cols_array(data: [f32; 16]) -> Self {
        Self { data }
    }

    #[inline]
    pub fn from_cols(x: Vec4, y: Vec4, z: Vec4, w: Vec4) -> Self {
        Self {
            data: [
                x.x, x.y, x.z, x.w, //
                y.x, y.y, y.z, y.w, //
                z.x, z.y, z.z, z.w, //
                w.x, w.y, w.z, w.w,
            ],
        }
    }

    /// Borrowed contiguous view in column-major order, ready for upload.
    #[inline]
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }

    #[inline]
    pub fn to_cols_array(self) -> [f32; 16] {
        self.data
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[col * 4 + row]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[col * 4 + row] = value;
    }

    #[inline]
    pub fn col(&self, col: usize) -> Vec4 {
        let i = col * 4;
        Vec4::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    #[inline]
    pub fn x_axis(&self) -> Vec4 {
        self.col(0)
    }

    #[inline]
    pub fn y_axis(&self) -> Vec4 {
        self.col(1)
    }

    #[inline]
    pub fn z_axis(&self) -> Vec4 {
        self.col(2)
    }

    /// Translation column.
    #[inline]
    pub fn w_axis(&self) -> Vec4 {
        self.col(3)
    }

    pub fn from_translation(v: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.set(0, 3, v.x);
        m.set(1, 3, v.y);
        m.set(2, 3, v.z);
        m
    }

    pub fn from_scale(v: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.set(0, 0, v.x);
        m.set(1, 1, v.y);
        m.set(2, 2, v.z);
        m
    }

    /// Rotation matrix whose columns are the rotated basis vectors.
    pub fn from_quat(q: Quat) -> Self {
        let r = q * Vec3::X;
        let u = q * Vec3::Y;
        let f = q * Vec3::Z;
        Self::from_cols(
            Vec4::from_vec3(r, 0.0),
            Vec4::from_vec3(u, 0.0),
            Vec4::from_vec3(f, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::ZERO;
        for row in 0..4 {
            for col in 0..4 {
                out.set(col, row, self.get(row, col));
            }
        }
        out
    }

    /// Transforms a point (`w = 1`), discarding the resulting `w`.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(p, 1.0)).truncate()
    }

    /// Transforms a direction (`w = 0`); translation is ignored.
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(v, 0.0)).truncate()
    }

    /// Determinant of the 3x3 matrix left after removing `skip_row` and `skip_col`.
    fn minor(&self, skip_row: usize, skip_col: usize) -> f32 {
        let mut m = [0.0f32; 9];
        let mut i = 0;
        for col in (0..4).filter(|c| *c != skip_col) {
            for row in (0..4).filter(|r| *r != skip_row) {
                m[i] = self.get(row, col);
                i += 1;
            }
        }
        // m is column-major 3x3.
        m[0] * (m[4] * m[8] - m[7] * m[5]) - m[3] * (m[1] * m[8] - m[7] * m[2])
            + m[6] * (m[1] * m[5] - m[4] * m[2])
    }

    fn cofactor(&self, row: usize, col: usize) -> f32 {
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.minor(row, col)
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        (0..4).map(|col| self.get(0, col) * self.cofactor(0, col)).sum()
    }

    /// Transpose of the cofactor matrix.
    pub fn adjugate(&self) -> Self {
        let mut out = Self::ZERO;
        for row in 0..4 {
            for col in 0..4 {
                out.set(col, row, self.cofactor(row, col));
            }
        }
        out
    }

    /// Inverse, or [`AnimationError::SingularMatrix`] when the determinant is exactly zero.
    pub fn try_inverse(&self) -> Result<Self, AnimationError> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(AnimationError::SingularMatrix { determinant: det });
        }
        Ok(self.adjugate() * det.recip())
    }

    /// Inverse that degrades to identity for singular matrices, logging a warning.
    pub fn inverse(&self) -> Self {
        match self.try_inverse() {
            Ok(inv) => inv,
            Err(err) => {
                warn!("Mat4::inverse: {err}; returning identity");
                Self::IDENTITY
            }
        }
    }

    /// Inverts in place; a singular matrix becomes identity.
    pub fn invert(&mut self) {
        *self = self.inverse();
    }

    /// Element-wise comparison within [`MAT4_EPSILON`].
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).abs() <= MAT4_EPSILON)
    }

    /// Perspective frustum from near-plane bounds.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        if left == right || top == bottom || near == far {
            warn!("Mat4::frustum: degenerate frustum ({left}, {right}, {bottom}, {top}, {near}, {far}); returning identity");
            return Self::IDENTITY;
        }
        Self::from_cols(
            Vec4::new((2.0 * near) / (right - left), 0.0, 0.0, 0.0),
            Vec4::new(0.0, (2.0 * near) / (top - bottom), 0.0, 0.0),
            Vec4::new(
                (right + left) / (right - left),
                (top + bottom) / (top - bottom),
                -(far + near) / (far - near),
                -1.0,
            ),
            Vec4::new(0.0, 0.0, (-2.0 * far * near) / (far - near), 0.0),
        )
    }

    /// Perspective projection; `fov` is the vertical field of view in degrees.
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let y_max = near * (fov.to_radians() * 0.5).tan();
        let x_max = y_max * aspect;
        Self::frustum(-x_max, x_max, -y_max, y_max, near, far)
    }

    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        if left == right || top == bottom || near == far {
            warn!("Mat4::ortho: degenerate volume ({left}, {right}, {bottom}, {top}, {near}, {far}); returning identity");
            return Self::IDENTITY;
        }
        Self::from_cols(
            Vec4::new(2.0 / (right - left), 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 / (top - bottom), 0.0, 0.0),
            Vec4::new(0.0, 0.0, -2.0 / (far - near), 0.0),
            Vec4::new(
                -((right + left) / (right - left)),
                -((top + bottom) / (top - bottom)),
                -((far + near) / (far - near)),
                1.0,
            ),
        )
    }

    /// View matrix looking from `position` at `target`.
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - position).normalized() * -1.0;
        let r = up.cross(f);
        if r == Vec3::ZERO {
            warn!("Mat4::look_at: up is parallel to the view direction; returning identity");
            return Self::IDENTITY;
        }
        let r = r.normalized();
        let u = f.cross(r).normalized();
        let t = Vec3::new(-r.dot(position), -u.dot(position), -f.dot(position));

        Self::from_cols(
            Vec4::new(r.x, u.x, f.x, 0.0),
            Vec4::new(r.y, u.y, f.y, 0.0),
            Vec4::new(r.z, u.z, f.z, 0.0),
            Vec4::new(t.x, t.y, t.z, 1.0),
        )
    }
}

impl Mul for Mat4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut out = Self::ZERO;
        for row in 0..4 {
            for col in 0..4 {
                let v = (0..4).map(|k| self.get(row, k) * rhs.get(k, col)).sum();
                out.set(row, col, v);
            }
        }
        out
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        let c = v.to_array();
        let mut out = [0.0f32; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = (0..4).map(|k| self.get(row, k) * c[k]).sum();
        }
        Vec4::from(out)
    }
}

impl Mul<f32> for Mat4 {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        let mut data = self.data;
        for v in data.iter_mut() {
            *v *= s;
        }
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_mat_near(a: &Mat4, b: &Mat4) {
        for (x, y) in a.as_slice().iter().zip(b.as_slice().iter()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-5);
        }
    }

    fn sample_matrix() -> Mat4 {
        Mat4::from_cols_array([
            2.0, 0.0, 1.0, 0.0, //
            1.0, 3.0, 0.0, 0.0, //
            0.0, 1.0, 4.0, 0.0, //
            5.0, -2.0, 3.0, 1.0,
        ])
    }

    #[test]
    fn column_major_layout() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(&m.as_slice()[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(m.get(0, 3), 1.0);
        assert_eq!(m.w_axis(), Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(m.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.transform_vector(Vec3::X), Vec3::X);
    }

    #[test]
    fn determinant_of_known_matrices() {
        assert_eq!(Mat4::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0)).determinant(), 24.0);
        // Upper 3x3 [[2,1,0],[0,3,1],[1,0,4]] has determinant 25.
        assert_relative_eq!(sample_matrix().determinant(), 25.0, epsilon = 1e-4);
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        let m = sample_matrix();
        let inv = m.try_inverse().expect("invertible");
        assert_mat_near(&(m * inv), &Mat4::IDENTITY);
        assert_mat_near(&(inv * m), &Mat4::IDENTITY);
        assert!(Mat4::IDENTITY.inverse().approx_eq(&Mat4::IDENTITY));
    }

    #[test]
    fn singular_matrix_reports_and_degrades() {
        let singular = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        let err = singular.try_inverse().unwrap_err();
        assert!(matches!(err, AnimationError::SingularMatrix { .. }));
        assert_eq!(singular.inverse(), Mat4::IDENTITY);

        let mut m = singular;
        m.invert();
        assert_eq!(m, Mat4::IDENTITY);
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let m = sample_matrix();
        let t = m.transpose();
        assert_eq!(t.get(3, 0), m.get(0, 3));
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn quaternion_matrix_matches_rotation() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.9);
        let m = Mat4::from_quat(q);
        let v = Vec3::new(0.5, -2.0, 1.0);
        assert!(m.transform_vector(v).approx_eq(q * v));
        let back = Quat::from_mat4(&m);
        assert!((back * v).approx_eq(q * v));
    }

    #[test]
    fn degenerate_projection_and_view_fall_back_to_identity() {
        assert_eq!(Mat4::frustum(1.0, 1.0, -1.0, 1.0, 0.1, 10.0), Mat4::IDENTITY);
        assert_eq!(Mat4::ortho(-1.0, 1.0, 2.0, 2.0, 0.1, 10.0), Mat4::IDENTITY);
        assert_eq!(
            Mat4::look_at(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::Y),
            Mat4::IDENTITY
        );
    }

    #[test]
    fn look_at_moves_target_onto_negative_z() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::Y);
        let p = view.transform_point(Vec3::ZERO);
        assert!(p.approx_eq(Vec3::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn perspective_maps_near_plane_to_minus_one() {
        let proj = Mat4::perspective(60.0, 1.5, 0.1, 100.0);
        let clip = proj * Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert_relative_eq!(clip.z / clip.w, -1.0, epsilon = 1e-4);
    }
}
