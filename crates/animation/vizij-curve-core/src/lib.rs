//! Vizij Curve Core (engine-agnostic)
//!
//! Keyframe curve sampling and rigid transform composition:
//! - `math`: Vec2/Vec3/Vec4, quaternions and column-major 4x4 matrices, with nalgebra
//!   conversions.
//! - `track`: keyframe tracks sampled with constant, linear or cubic Hermite
//!   interpolation, clamped or looping.
//! - `transform`: position/rotation/scale poses that compose, invert, blend and convert
//!   to and from matrices.
//! - `clip` / `stored_clip`: per-joint transform tracks grouped into clips, loadable from
//!   JSON.
//!
//! Sampling never fails. Missing data yields default values; the fallible surface is
//! limited to `try_*` math helpers and the JSON loader.

pub mod clip;
pub mod config;
pub mod error;
pub mod frame;
pub mod interpolation;
pub mod math;
pub mod stored_clip;
pub mod track;
pub mod transform;
pub mod transform_track;

// Re-exports for consumers
pub use clip::Clip;
pub use config::Config;
pub use error::AnimationError;
pub use frame::{Frame, QuaternionFrame, ScalarFrame, VectorFrame};
pub use interpolation::Interpolation;
pub use math::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use stored_clip::{
    parse_scalar_track_json, parse_scalar_track_json_with_config, parse_stored_clip_json,
    parse_stored_clip_json_with_config,
};
pub use track::{QuaternionTrack, ScalarTrack, Track, TrackValue, VectorTrack};
pub use transform::Transform;
pub use transform_track::TransformTrack;

/// Result type used by the fallible parts of the crate.
pub type Result<T> = core::result::Result<T, AnimationError>;
