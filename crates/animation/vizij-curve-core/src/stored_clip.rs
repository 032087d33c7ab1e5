use log::debug;
use serde::Deserialize;

use crate::clip::Clip;
use crate::config::Config;
use crate::error::AnimationError;
use crate::frame::Frame;
use crate::interpolation::Interpolation;
use crate::track::{ScalarTrack, Track};
use crate::Result;

/// Public API: parse stored clip JSON (see fixtures/clips/*.json) into a [`Clip`] using
/// the default [`Config`].
///
/// Notes:
/// - Times are in seconds and kept as stored; frames must already be in time order.
/// - `in`/`out` tangents default to zero, `interpolation` and `looping` to the config.
/// - Rotation values are `[x, y, z, w]`.
/// - The clip span is recalculated once all tracks are loaded.
pub fn parse_stored_clip_json(s: &str) -> Result<Clip> {
    parse_stored_clip_json_with_config(s, &Config::default())
}

pub fn parse_stored_clip_json_with_config(s: &str, config: &Config) -> Result<Clip> {
    let sc: StoredClip = serde_json::from_str(s)?;

    let mut clip = Clip::new(sc.name);
    clip.looping = sc.looping.unwrap_or(config.default_looping);

    for st in sc.tracks {
        let context = |channel: &str| format!("joint {} {channel}", st.id);
        let track = clip.track_mut(st.id);
        if let Some(raw) = &st.position {
            track.position = to_track(raw, &context("position"), config)?;
        }
        if let Some(raw) = &st.rotation {
            track.rotation = to_track(raw, &context("rotation"), config)?;
        }
        if let Some(raw) = &st.scale {
            track.scale = to_track(raw, &context("scale"), config)?;
        }
    }

    clip.recalculate_duration();
    debug!(
        "Loaded clip '{}': {} tracks over [{}, {}]",
        clip.name,
        clip.len(),
        clip.start_time(),
        clip.end_time()
    );
    Ok(clip)
}

/// Parse a single stored track object holding one-component frames.
///
/// Frame values may be written as `1.5` or `[1.5]`.
pub fn parse_scalar_track_json(s: &str) -> Result<ScalarTrack> {
    parse_scalar_track_json_with_config(s, &Config::default())
}

pub fn parse_scalar_track_json_with_config(s: &str, config: &Config) -> Result<ScalarTrack> {
    let raw: StoredTrack = serde_json::from_str(s)?;
    to_track(&raw, "scalar track", config)
}

fn to_track<T, const N: usize>(
    raw: &StoredTrack,
    context: &str,
    config: &Config,
) -> Result<Track<T, N>> {
    let interpolation = raw
        .interpolation
        .as_deref()
        .map(Interpolation::from)
        .unwrap_or(config.default_interpolation);

    let mut frames: Vec<Frame<N>> = Vec::with_capacity(raw.frames.len());
    for (index, sf) in raw.frames.iter().enumerate() {
        if !sf.time.is_finite() {
            return Err(AnimationError::InvalidTime { time: sf.time });
        }
        if let Some(prev) = frames.last().filter(|_| config.validate_frame_order) {
            if sf.time < prev.time {
                return Err(AnimationError::UnorderedFrames {
                    track: context.to_string(),
                    index,
                    previous: prev.time,
                    time: sf.time,
                });
            }
        }

        let value = to_components::<N>(&sf.value, context)?;
        let in_tangent = match &sf.r#in {
            Some(c) => to_components::<N>(c, context)?,
            None => [0.0; N],
        };
        let out_tangent = match &sf.r#out {
            Some(c) => to_components::<N>(c, context)?,
            None => [0.0; N],
        };
        frames.push(Frame::new(sf.time, value).with_tangents(in_tangent, out_tangent));
    }

    Ok(Track::from_frames(frames, interpolation))
}

fn to_components<const N: usize>(raw: &RawComponents, context: &str) -> Result<[f32; N]> {
    let slice: &[f32] = match raw {
        RawComponents::Scalar(v) => std::slice::from_ref(v),
        RawComponents::Array(v) => v,
    };
    slice
        .try_into()
        .map_err(|_| AnimationError::ComponentCountMismatch {
            expected: N,
            actual: slice.len(),
            context: context.to_string(),
        })
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct StoredClip {
    #[serde(default)]
    pub name: String,
    pub looping: Option<bool>,
    #[serde(default)]
    pub tracks: Vec<StoredTransformTrack>,
}

#[derive(Debug, Deserialize)]
struct StoredTransformTrack {
    pub id: u32,
    pub position: Option<StoredTrack>,
    pub rotation: Option<StoredTrack>,
    pub scale: Option<StoredTrack>,
}

#[derive(Debug, Deserialize)]
struct StoredTrack {
    pub interpolation: Option<String>,
    #[serde(default)]
    pub frames: Vec<StoredFrame>,
}

#[derive(Debug, Deserialize)]
struct StoredFrame {
    pub time: f32,
    pub value: RawComponents,
    #[serde(default)]
    #[serde(rename = "in")]
    pub r#in: Option<RawComponents>,
    #[serde(default)]
    #[serde(rename = "out")]
    pub r#out: Option<RawComponents>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawComponents {
    Scalar(f32),
    Array(Vec<f32>),
}
