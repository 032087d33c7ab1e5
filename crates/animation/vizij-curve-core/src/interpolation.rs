use serde::{Deserialize, Serialize};

/// How a track blends between neighboring keyframes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Hold the value of the frame at or before the sample time.
    Constant,
    #[default]
    Linear,
    /// Hermite spline through frame values using the stored tangents.
    Cubic,
}

impl Interpolation {
    /// Get the name of this interpolation mode
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Linear => "linear",
            Self::Cubic => "cubic",
        }
    }
}

impl From<&str> for Interpolation {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "constant" | "step" => Self::Constant,
            "cubic" | "hermite" | "cubicspline" => Self::Cubic,
            _ => Self::Linear, // Default to linear for unknown modes
        }
    }
}
