//! Position, rotation and scale tracks bound to one joint.

use crate::track::{QuaternionTrack, Track, VectorTrack};
use crate::transform::Transform;

fn span<T, const N: usize>(track: &Track<T, N>) -> Option<(f32, f32)> {
    (track.len() > 1).then(|| (track.start_time(), track.end_time()))
}

/// Component tracks animating a single joint of a pose.
///
/// A component only participates when its track holds more than one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformTrack {
    pub id: u32,
    pub position: VectorTrack,
    pub rotation: QuaternionTrack,
    pub scale: VectorTrack,
}

impl TransformTrack {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// True when at least one component is animated.
    pub fn is_valid(&self) -> bool {
        self.position.len() > 1 || self.rotation.len() > 1 || self.scale.len() > 1
    }

    fn animated_spans(&self) -> impl Iterator<Item = (f32, f32)> {
        [
            span(&self.position),
            span(&self.rotation),
            span(&self.scale),
        ]
        .into_iter()
        .flatten()
    }

    /// Earliest start over animated components, or 0 when none are animated.
    pub fn start_time(&self) -> f32 {
        self.animated_spans()
            .map(|(start, _)| start)
            .reduce(f32::min)
            .unwrap_or(0.0)
    }

    /// Latest end over animated components, or 0 when none are animated.
    pub fn end_time(&self) -> f32 {
        self.animated_spans()
            .map(|(_, end)| end)
            .reduce(f32::max)
            .unwrap_or(0.0)
    }

    /// Samples the animated components over `reference`; the rest pass through.
    pub fn sample(&self, reference: &Transform, time: f32, looping: bool) -> Transform {
        let mut result = *reference;
        if self.position.len() > 1 {
            result.position = self.position.sample(time, looping);
        }
        if self.rotation.len() > 1 {
            result.rotation = self.rotation.sample(time, looping);
        }
        if self.scale.len() > 1 {
            result.scale = self.scale.sample(time, looping);
        }
        result
    }
}
