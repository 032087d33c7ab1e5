//! Error types for curve sampling, matrix math and clip loading

use serde::{Deserialize, Serialize};

/// Errors surfaced by the fallible variants of the math layer and by the clip loader.
///
/// Sampling itself never fails; it degrades to default values instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// Matrix with a zero determinant cannot be inverted
    #[error("Matrix is not invertible (determinant {determinant})")]
    SingularMatrix { determinant: f32 },

    /// Vector too short to normalize
    #[error("Vector length is below epsilon")]
    DegenerateVector,

    /// Quaternion too short to normalize
    #[error("Quaternion length is below epsilon")]
    DegenerateQuaternion,

    /// Keyframe data with the wrong number of components
    #[error("Expected {expected} components for {context}, got {actual}")]
    ComponentCountMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// Keyframes stored out of time order
    #[error("Frame {index} of track '{track}' at time {time} precedes previous frame at {previous}")]
    UnorderedFrames {
        track: String,
        index: usize,
        previous: f32,
        time: f32,
    },

    /// Invalid time value
    #[error("Invalid time value: {time}")]
    InvalidTime { time: f32 },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Generic animation error
    #[error("Animation error: {message}")]
    Generic { message: String },
}

impl AnimationError {
    /// Create a new generic error
    pub fn new(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Degenerate-geometry errors have a usable fallback (identity / unchanged input).
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SingularMatrix { .. } | Self::DegenerateVector | Self::DegenerateQuaternion
        )
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::SingularMatrix { .. } | Self::DegenerateVector | Self::DegenerateQuaternion => {
                "geometry"
            }
            Self::ComponentCountMismatch { .. }
            | Self::UnorderedFrames { .. }
            | Self::InvalidTime { .. } => "validation",
            Self::Serialization { .. } => "serialization",
            Self::Generic { .. } => "generic",
        }
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
