//! Local pose: position, rotation and non-uniform scale.

use serde::{Deserialize, Serialize};

use crate::math::{Mat4, Quat, Vec3, Vec4, VEC_EPSILON};

/// Transform representation for position, rotation, and scale
///
/// Applied to a point as scale, then rotation, then translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn from_scale(scale: Vec3) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    /// Parent-to-child composition: the result applies `child` first, then `self`.
    pub fn combine(&self, child: &Transform) -> Transform {
        let scale = self.scale.mul_elem(child.scale);
        let rotation = (self.rotation * child.rotation).normalized();
        let position = self.position + self.rotation * self.scale.mul_elem(child.position);
        Transform {
            position,
            rotation,
            scale,
        }
    }

    /// Maps back into the original space.
    ///
    /// Scale components below epsilon invert to 0, so a collapsed axis stays collapsed.
    pub fn inverse(&self) -> Transform {
        let rotation = self.rotation.inverse().normalized();
        let invert = |s: f32| if s.abs() < VEC_EPSILON { 0.0 } else { 1.0 / s };
        let scale = Vec3::new(invert(self.scale.x), invert(self.scale.y), invert(self.scale.z));
        let position = rotation * scale.mul_elem(-self.position);
        Transform {
            position,
            rotation,
            scale,
        }
    }

    /// Blends position and scale linearly, rotation by nlerp along the short path.
    pub fn mix(&self, other: &Transform, t: f32) -> Transform {
        let mut to = other.rotation;
        if self.rotation.dot(to) < 0.0 {
            to = -to;
        }
        Transform {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.nlerp(to, t),
            scale: self.scale.lerp(other.scale, t),
        }
    }

    /// Rotation basis scaled per axis, translation in the last column.
    ///
    /// Non-uniform scale combined with rotation produces skew.
    pub fn to_mat4(&self) -> Mat4 {
        let x = self.rotation * Vec3::X * self.scale.x;
        let y = self.rotation * Vec3::Y * self.scale.y;
        let z = self.rotation * Vec3::Z * self.scale.z;
        Mat4::from_cols(
            Vec4::from_vec3(x, 0.0),
            Vec4::from_vec3(y, 0.0),
            Vec4::from_vec3(z, 0.0),
            Vec4::from_vec3(self.position, 1.0),
        )
    }

    /// Recovers a transform from a matrix. Scale is read off the diagonal of the linear
    /// part with rotation removed, so skew is lost.
    pub fn from_mat4(m: &Mat4) -> Transform {
        let position = m.w_axis().truncate();
        let rotation = Quat::from_mat4(m);

        let rot_scale = Mat4::from_cols(
            Vec4::from_vec3(m.x_axis().truncate(), 0.0),
            Vec4::from_vec3(m.y_axis().truncate(), 0.0),
            Vec4::from_vec3(m.z_axis().truncate(), 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        );
        let scale_skew = rot_scale * Mat4::from_quat(rotation.inverse());
        let scale = Vec3::new(
            scale_skew.get(0, 0),
            scale_skew.get(1, 1),
            scale_skew.get(2, 2),
        );

        Transform {
            position,
            rotation,
            scale,
        }
    }

    /// Scale, rotate, then translate.
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.transform_vector(point)
    }

    /// Scale then rotate; translation does not apply to directions.
    #[inline]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * self.scale.mul_elem(vector)
    }

    /// Loose comparison: vectors by squared distance, rotations by `1 - |dot|`.
    pub fn approx_eq(&self, other: &Transform) -> bool {
        self.approx_eq_eps(other, 1e-5)
    }

    pub fn approx_eq_eps(&self, other: &Transform, eps: f32) -> bool {
        (self.position - other.position).len_sq() < eps
            && (self.scale - other.scale).len_sq() < eps
            && 1.0 - self.rotation.dot(other.rotation).abs() < eps
    }
}

impl From<Transform> for Mat4 {
    fn from(t: Transform) -> Self {
        t.to_mat4()
    }
}

impl From<&Mat4> for Transform {
    fn from(m: &Mat4) -> Self {
        Transform::from_mat4(m)
    }
}
