//! Per-kind behavior plugged into the generic sampling algorithm.

use std::ops::{Add, Mul};

use crate::math::{Quat, Vec3};

/// A value kind that a [`Track`](crate::track::Track) can produce from `N` stored floats.
///
/// The sampling skeleton is shared; implementors only supply how to build a value from
/// frame data, how to blend two values, and the quaternion-specific fixes around Hermite
/// evaluation.
pub trait TrackValue<const N: usize>:
    Copy + Default + Add<Output = Self> + Mul<f32, Output = Self>
{
    /// Builds a value from raw components. Used for tangents.
    fn from_components(c: &[f32; N]) -> Self;

    /// Builds a value from a frame's stored value.
    #[inline]
    fn cast(c: &[f32; N]) -> Self {
        Self::from_components(c)
    }

    /// Blend used by linear sampling.
    fn interpolate(a: Self, b: Self, t: f32) -> Self;

    /// Adjusts `b` so that blending from `a` takes the short path.
    #[inline]
    fn neighborhood(_a: &Self, _b: &mut Self) {}

    /// Applied to the raw Hermite result.
    #[inline]
    fn adjust_hermite(self) -> Self {
        self
    }
}

impl TrackValue<1> for f32 {
    #[inline]
    fn from_components(c: &[f32; 1]) -> Self {
        c[0]
    }

    #[inline]
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }
}

impl TrackValue<3> for Vec3 {
    #[inline]
    fn from_components(c: &[f32; 3]) -> Self {
        Vec3::from_array(*c)
    }

    #[inline]
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        a.lerp(b, t)
    }
}

impl TrackValue<4> for Quat {
    #[inline]
    fn from_components(c: &[f32; 4]) -> Self {
        Quat::from_array(*c)
    }

    /// Stored rotations are normalized on the way out; tangents are not.
    #[inline]
    fn cast(c: &[f32; 4]) -> Self {
        Quat::from_array(*c).normalized()
    }

    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        let b = if a.dot(b) < 0.0 { -b } else { b };
        a.mix(b, t).normalized()
    }

    #[inline]
    fn neighborhood(a: &Self, b: &mut Self) {
        if a.dot(*b) < 0.0 {
            *b = -*b;
        }
    }

    #[inline]
    fn adjust_hermite(self) -> Self {
        self.normalized()
    }
}
