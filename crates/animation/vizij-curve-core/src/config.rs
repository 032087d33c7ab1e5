//! Loader configuration for vizij-curve-core.

use serde::{Deserialize, Serialize};

use crate::interpolation::Interpolation;

/// Defaults applied when stored clip data leaves a field out.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interpolation for tracks that do not name one.
    pub default_interpolation: Interpolation,
    /// Looping flag for clips that do not set one.
    pub default_looping: bool,
    /// Reject keyframes whose times decrease. Sampling assumes ordered frames.
    pub validate_frame_order: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_interpolation: Interpolation::Linear,
            default_looping: true,
            validate_frame_order: true,
        }
    }
}
