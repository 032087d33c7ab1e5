//! Keyframe tracks and their sampling engine.
//!
//! Model:
//! - A track owns frames ordered by non-decreasing time (the loader's job; nothing here
//!   sorts).
//! - Sampling first remaps the query time into the track span: looping tracks wrap,
//!   others clamp.
//! - The frame at or before the remapped time and its successor bound the segment that
//!   is blended, by holding (constant), [`TrackValue::interpolate`] (linear) or a
//!   Hermite spline (cubic).
//! - Missing data never errors: too few frames or a zero-length segment yield
//!   `T::default()`.

pub mod value;

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use crate::frame::Frame;
use crate::interpolation::Interpolation;
use crate::math::{Quat, Vec3};

pub use value::TrackValue;

pub type ScalarTrack = Track<f32, 1>;
pub type VectorTrack = Track<Vec3, 3>;
pub type QuaternionTrack = Track<Quat, 4>;

/// Ordered keyframes of one animated channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Track<T, const N: usize> {
    frames: Vec<Frame<N>>,
    interpolation: Interpolation,
    _value: PhantomData<T>,
}

impl<T, const N: usize> Default for Track<T, N> {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            interpolation: Interpolation::default(),
            _value: PhantomData,
        }
    }
}

/// Wraps `time` into `[start, start + duration)`, negative inputs included.
#[inline]
fn wrap_time(time: f32, start: f32, duration: f32) -> f32 {
    let mut local = (time - start) % duration;
    if local < 0.0 {
        local += duration;
    }
    local + start
}

impl<T, const N: usize> Track<T, N> {
    /// Create a new empty track with linear interpolation
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_interpolation(interpolation: Interpolation) -> Self {
        Self {
            interpolation,
            ..Self::default()
        }
    }

    #[inline]
    pub fn from_frames(frames: Vec<Frame<N>>, interpolation: Interpolation) -> Self {
        Self {
            frames,
            interpolation,
            _value: PhantomData,
        }
    }

    /// Grows with default frames or truncates to `size` frames.
    pub fn resize(&mut self, size: usize) {
        self.frames.resize(size, Frame::default());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn push(&mut self, frame: Frame<N>) {
        self.frames.push(frame);
    }

    #[inline]
    pub fn frames(&self) -> &[Frame<N>] {
        &self.frames
    }

    #[inline]
    pub fn frames_mut(&mut self) -> &mut [Frame<N>] {
        &mut self.frames
    }

    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    #[inline]
    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    /// Time of the first frame.
    ///
    /// # Panics
    /// If the track has no frames.
    pub fn start_time(&self) -> f32 {
        self.try_start_time()
            .unwrap_or_else(|| panic!("start_time called on an empty track"))
    }

    /// Time of the last frame.
    ///
    /// # Panics
    /// If the track has no frames.
    pub fn end_time(&self) -> f32 {
        self.try_end_time()
            .unwrap_or_else(|| panic!("end_time called on an empty track"))
    }

    #[inline]
    pub fn try_start_time(&self) -> Option<f32> {
        self.frames.first().map(|f| f.time)
    }

    #[inline]
    pub fn try_end_time(&self) -> Option<f32> {
        self.frames.last().map(|f| f.time)
    }

    /// Remaps `time` into the span of the track.
    ///
    /// Looping tracks wrap into `[start, end)`; others clamp to `[start, end]`. Tracks
    /// with fewer than two frames or no positive duration map everything to 0.
    pub fn adjust_time_to_fit_track(&self, time: f32, looping: bool) -> f32 {
        let size = self.frames.len();
        if size <= 1 {
            return 0.0;
        }
        let start = self.frames[0].time;
        let end = self.frames[size - 1].time;
        let duration = end - start;
        if duration <= 0.0 {
            return 0.0;
        }
        if looping {
            wrap_time(time, start, duration)
        } else {
            time.clamp(start, end)
        }
    }

    /// Index of the frame at or before `time`, always leaving room for a next frame.
    ///
    /// Returns `None` with fewer than two frames, or for a looping track without a
    /// positive duration.
    pub fn frame_index(&self, time: f32, looping: bool) -> Option<usize> {
        let size = self.frames.len();
        if size <= 1 {
            return None;
        }
        let last_segment = size - 2;

        let time = if looping {
            let start = self.frames[0].time;
            let duration = self.frames[size - 1].time - start;
            if duration <= 0.0 {
                return None;
            }
            wrap_time(time, start, duration)
        } else {
            if time <= self.frames[0].time {
                return Some(0);
            }
            if time >= self.frames[last_segment].time {
                return Some(last_segment);
            }
            time
        };

        self.frames
            .iter()
            .rposition(|f| time >= f.time)
            .map(|i| i.min(last_segment))
    }
}

impl<T: TrackValue<N>, const N: usize> Track<T, N> {
    /// Samples the track with its interpolation mode.
    pub fn sample(&self, time: f32, looping: bool) -> T {
        match self.interpolation {
            Interpolation::Constant => self.sample_constant(time, looping),
            Interpolation::Linear => self.sample_linear(time, looping),
            Interpolation::Cubic => self.sample_cubic(time, looping),
        }
    }

    fn sample_constant(&self, time: f32, looping: bool) -> T {
        if let [only] = self.frames.as_slice() {
            return T::cast(&only.value);
        }
        match self.frame_index(time, looping) {
            Some(frame) => T::cast(&self.frames[frame].value),
            None => T::default(),
        }
    }

    /// Locates the segment around `time`: `(this, next, t, frame_delta)`.
    fn segment(&self, time: f32, looping: bool) -> Option<(usize, usize, f32, f32)> {
        let this = self.frame_index(time, looping)?;
        if this + 1 >= self.frames.len() {
            return None;
        }
        let next = this + 1;

        let track_time = self.adjust_time_to_fit_track(time, looping);
        let this_time = self.frames[this].time;
        let frame_delta = self.frames[next].time - this_time;
        if frame_delta <= 0.0 {
            return None;
        }
        let t = (track_time - this_time) / frame_delta;
        Some((this, next, t, frame_delta))
    }

    fn sample_linear(&self, time: f32, looping: bool) -> T {
        let Some((this, next, t, _)) = self.segment(time, looping) else {
            return T::default();
        };
        let start = T::cast(&self.frames[this].value);
        let end = T::cast(&self.frames[next].value);
        T::interpolate(start, end, t)
    }

    fn sample_cubic(&self, time: f32, looping: bool) -> T {
        let Some((this, next, t, frame_delta)) = self.segment(time, looping) else {
            return T::default();
        };
        let this_frame = &self.frames[this];
        let next_frame = &self.frames[next];

        // Tangents are stored per unit time; scale them to the segment length.
        let point1 = T::cast(&this_frame.value);
        let slope1 = T::from_components(&this_frame.out_tangent) * frame_delta;
        let point2 = T::cast(&next_frame.value);
        let slope2 = T::from_components(&next_frame.in_tangent) * frame_delta;

        Self::hermite(t, point1, slope1, point2, slope2)
    }

    /// Cubic Hermite basis blend of two points and their scaled tangents.
    pub fn hermite(t: f32, p1: T, s1: T, p2: T, s2: T) -> T {
        let tt = t * t;
        let ttt = tt * t;

        let mut p2 = p2;
        T::neighborhood(&p1, &mut p2);

        let h1 = 2.0 * ttt - 3.0 * tt + 1.0;
        let h2 = -2.0 * ttt + 3.0 * tt;
        let h3 = ttt - 2.0 * tt + t;
        let h4 = ttt - tt;

        let result = p1 * h1 + p2 * h2 + s1 * h3 + s2 * h4;
        result.adjust_hermite()
    }
}

impl<T, const N: usize> Index<usize> for Track<T, N> {
    type Output = Frame<N>;

    fn index(&self, index: usize) -> &Frame<N> {
        &self.frames[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Track<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut Frame<N> {
        &mut self.frames[index]
    }
}
