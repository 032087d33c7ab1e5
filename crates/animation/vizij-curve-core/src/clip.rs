//! Named collection of joint tracks sampled into a pose.

use log::warn;

use crate::transform::Transform;
use crate::transform_track::TransformTrack;

/// Animation clip: one [`TransformTrack`] per animated joint.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub name: String,
    tracks: Vec<TransformTrack>,
    start_time: f32,
    end_time: f32,
    pub looping: bool,
}

impl Default for Clip {
    fn default() -> Self {
        Self {
            name: "No name given".to_string(),
            tracks: Vec::new(),
            start_time: 0.0,
            end_time: 0.0,
            looping: true,
        }
    }
}

impl Clip {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    #[inline]
    pub fn end_time(&self) -> f32 {
        self.end_time
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.end_time - self.start_time
    }

    /// Number of joint tracks.
    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Joint animated by the track at `index`.
    pub fn joint_at(&self, index: usize) -> Option<u32> {
        self.tracks.get(index).map(|t| t.id)
    }

    pub fn tracks(&self) -> &[TransformTrack] {
        &self.tracks
    }

    pub fn track(&self, joint: u32) -> Option<&TransformTrack> {
        self.tracks.iter().find(|t| t.id == joint)
    }

    /// Track for `joint`, appended empty if the clip has none yet.
    ///
    /// Call [`Clip::recalculate_duration`] after editing frames.
    pub fn track_mut(&mut self, joint: u32) -> &mut TransformTrack {
        let index = match self.tracks.iter().position(|t| t.id == joint) {
            Some(index) => index,
            None => {
                self.tracks.push(TransformTrack::new(joint));
                self.tracks.len() - 1
            }
        };
        &mut self.tracks[index]
    }

    /// Recomputes the clip span from its animated tracks.
    pub fn recalculate_duration(&mut self) {
        let mut span: Option<(f32, f32)> = None;
        for track in self.tracks.iter().filter(|t| t.is_valid()) {
            let (start, end) = (track.start_time(), track.end_time());
            span = Some(match span {
                Some((s, e)) => (s.min(start), e.max(end)),
                None => (start, end),
            });
        }
        let (start, end) = span.unwrap_or((0.0, 0.0));
        self.start_time = start;
        self.end_time = end;
    }

    /// Wraps (looping) or clamps `time` into the clip span. Empty spans map to 0.
    pub fn adjust_time_to_fit_range(&self, time: f32) -> f32 {
        let duration = self.duration();
        if duration <= 0.0 {
            return 0.0;
        }
        if self.looping {
            let mut local = (time - self.start_time) % duration;
            if local < 0.0 {
                local += duration;
            }
            local + self.start_time
        } else {
            time.clamp(self.start_time, self.end_time)
        }
    }

    /// Samples every track into `pose`, indexed by joint id. Returns the remapped time.
    ///
    /// Each joint starts from its current value in `pose`, so joints without animated
    /// components keep their pose.
    pub fn sample(&self, pose: &mut [Transform], time: f32) -> f32 {
        if self.duration() <= 0.0 {
            return 0.0;
        }
        let time = self.adjust_time_to_fit_range(time);

        for track in &self.tracks {
            let Some(joint) = pose.get_mut(track.id as usize) else {
                warn!(
                    "Clip '{}' animates joint {} but the pose has {} joints; skipping",
                    self.name,
                    track.id,
                    pose.len()
                );
                continue;
            };
            *joint = track.sample(joint, time, self.looping);
        }
        time
    }
}
