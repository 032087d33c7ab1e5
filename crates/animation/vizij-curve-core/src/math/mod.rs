//! Value-type algebra used by tracks and transforms.
//!
//! Degenerate inputs never produce NaN: lengths below the epsilons here are treated as
//! zero and normalization becomes a no-op (vectors) or yields identity (quaternions).
//! The `try_*` variants report degeneracy instead.

pub mod interop;
pub mod mat4;
pub mod quat;
pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use mat4::Mat4;
pub use quat::Quat;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;

/// Squared-length threshold below which a vector is treated as zero.
pub const VEC_EPSILON: f32 = 0.000_001;
/// Squared-length / component threshold for quaternions.
pub const QUAT_EPSILON: f32 = 0.000_001;
pub const MAT4_EPSILON: f32 = 0.000_001;
