//! Conversions to and from nalgebra types for adapters that already speak nalgebra.

use nalgebra::{Matrix4, Quaternion, UnitQuaternion, Vector3, Vector4};

use crate::math::{Mat4, Quat, Vec3, Vec4};

impl From<Vector3<f32>> for Vec3 {
    fn from(v: Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for Vector3<f32> {
    fn from(v: Vec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector4<f32>> for Vec4 {
    fn from(v: Vector4<f32>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vec4> for Vector4<f32> {
    fn from(v: Vec4) -> Self {
        Vector4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Quaternion<f32>> for Quat {
    fn from(q: Quaternion<f32>) -> Self {
        Self::new(q.i, q.j, q.k, q.w)
    }
}

impl From<Quat> for Quaternion<f32> {
    fn from(q: Quat) -> Self {
        // nalgebra takes the scalar part first.
        Quaternion::new(q.w, q.x, q.y, q.z)
    }
}

impl From<UnitQuaternion<f32>> for Quat {
    fn from(q: UnitQuaternion<f32>) -> Self {
        Self::new(q.i, q.j, q.k, q.w)
    }
}

impl From<Quat> for UnitQuaternion<f32> {
    fn from(q: Quat) -> Self {
        UnitQuaternion::new_normalize(q.into())
    }
}

impl From<Matrix4<f32>> for Mat4 {
    fn from(m: Matrix4<f32>) -> Self {
        let mut data = [0.0f32; 16];
        data.copy_from_slice(m.as_slice());
        Mat4::from_cols_array(data)
    }
}

impl From<Mat4> for Matrix4<f32> {
    fn from(m: Mat4) -> Self {
        Matrix4::from_column_slice(m.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hamilton_product_agrees_with_nalgebra() {
        let a = Quat::from_axis_angle(Vec3::new(1.0, 0.5, -0.2), 0.7);
        let b = Quat::from_axis_angle(Vec3::new(-0.3, 1.0, 0.4), 1.3);
        let ours = a * b;
        let theirs: Quat = (UnitQuaternion::from(a) * UnitQuaternion::from(b)).into();
        assert_relative_eq!(ours.dot(theirs).abs(), 1.0, epsilon = 1e-5);
        assert!((ours * Vec3::X).approx_eq(a * (b * Vec3::X)));
    }

    #[test]
    fn vector_rotation_agrees_with_nalgebra() {
        let q = Quat::from_axis_angle(Vec3::new(0.2, 1.0, 0.0), 2.1);
        let v = Vec3::new(1.0, -2.0, 0.5);
        let theirs: Vec3 = (UnitQuaternion::from(q) * Vector3::from(v)).into();
        assert!((q * v).approx_eq(theirs));
    }

    #[test]
    fn slerp_agrees_with_nalgebra() {
        let a = Quat::from_axis_angle(Vec3::Y, 0.2);
        let b = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 1.4);
        let ours = a.slerp(b, 0.35);
        let theirs: Quat = UnitQuaternion::from(a)
            .slerp(&UnitQuaternion::from(b), 0.35)
            .into();
        assert_relative_eq!(ours.dot(theirs).abs(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn matrix_layout_is_column_major_on_both_sides() {
        let m = Mat4::from_translation(Vec3::new(4.0, 5.0, 6.0));
        let n: Matrix4<f32> = m.into();
        assert_eq!(n[(0, 3)], 4.0);
        assert_eq!(Mat4::from(n), m);
    }
}
