// Node animation clips and a play-once clip player.
//
// Clips hold per-node translation/rotation/scale tracks sampled with linear
// interpolation (spherical for rotations). The player advances a clip in
// either direction and clamps at the ends, holding the final pose.

use fnv::FnvHashMap;
use glam::{Quat, Vec3};

#[derive(Clone, Debug, Default)]
pub struct TrackVec3 {
    pub times: Vec<f32>,
    pub values: Vec<Vec3>,
}

#[derive(Clone, Debug, Default)]
pub struct TrackQuat {
    pub times: Vec<f32>,
    pub values: Vec<Quat>,
}

#[derive(Clone, Debug, Default)]
pub struct AnimClip {
    pub name: String,
    pub duration: f32,
    pub translations: FnvHashMap<usize, TrackVec3>,
    pub rotations: FnvHashMap<usize, TrackQuat>,
    pub scales: FnvHashMap<usize, TrackVec3>,
}

impl AnimClip {
    /// Sample a translation track for `node`, falling back to `rest`.
    pub fn translation(&self, node: usize, t: f32, rest: Vec3) -> Vec3 {
        self.translations
            .get(&node)
            .map_or(rest, |tr| sample_vec3(tr, t, rest))
    }

    pub fn rotation(&self, node: usize, t: f32, rest: Quat) -> Quat {
        self.rotations
            .get(&node)
            .map_or(rest, |tr| sample_quat(tr, t, rest))
    }

    pub fn scale(&self, node: usize, t: f32, rest: Vec3) -> Vec3 {
        self.scales
            .get(&node)
            .map_or(rest, |tr| sample_vec3(tr, t, rest))
    }
}

/// Locate the keyframe segment containing `t` and the blend factor within it.
/// Returns `None` when `t` is outside the track (callers clamp to the ends).
fn segment(times: &[f32], t: f32) -> Option<(usize, f32)> {
    if times.len() < 2 || t <= times[0] || t >= times[times.len() - 1] {
        return None;
    }
    let i = times.partition_point(|&k| k <= t).saturating_sub(1);
    let t0 = times[i];
    let t1 = times[i + 1];
    let span = t1 - t0;
    let f = if span > 0.0 { (t - t0) / span } else { 0.0 };
    Some((i, f))
}

pub fn sample_vec3(tr: &TrackVec3, t: f32, default: Vec3) -> Vec3 {
    let (Some(first), Some(last)) = (tr.values.first(), tr.values.last()) else {
        return default;
    };
    if tr.times.is_empty() {
        return default;
    }
    match segment(&tr.times, t) {
        Some((i, f)) => tr.values[i].lerp(tr.values[i + 1], f),
        None if t <= tr.times[0] => *first,
        None => *last,
    }
}

pub fn sample_quat(tr: &TrackQuat, t: f32, default: Quat) -> Quat {
    let (Some(first), Some(last)) = (tr.values.first(), tr.values.last()) else {
        return default;
    };
    if tr.times.is_empty() {
        return default;
    }
    match segment(&tr.times, t) {
        Some((i, f)) => tr.values[i].slerp(tr.values[i + 1], f),
        None if t <= tr.times[0] => *first,
        None => *last,
    }
}

/// Plays a clip once in either direction and holds the final pose.
///
/// Each playback is tagged with a generation number supplied by the caller;
/// `advance` reports that generation exactly once when the playback reaches
/// its end.
#[derive(Clone, Debug)]
pub struct ClipPlayer {
    duration: f32,
    time: f32,
    time_scale: f32,
    running: bool,
    generation: u64,
}

impl ClipPlayer {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            time: 0.0,
            time_scale: 1.0,
            running: false,
            generation: 0,
        }
    }

    /// Start a playback. Positive rates play from the start, negative rates
    /// from the end.
    pub fn play(&mut self, time_scale: f32, generation: u64) {
        self.time_scale = time_scale;
        self.time = if time_scale >= 0.0 { 0.0 } else { self.duration };
        self.running = true;
        self.generation = generation;
    }

    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.time_scale = time_scale;
    }

    /// Advance by `dt_sec` of wall-clock time. Returns the playback generation
    /// when this call completed the playback.
    pub fn advance(&mut self, dt_sec: f32) -> Option<u64> {
        if !self.running {
            return None;
        }
        self.time += dt_sec * self.time_scale;
        if self.time_scale >= 0.0 && self.time >= self.duration {
            self.time = self.duration;
        } else if self.time_scale < 0.0 && self.time <= 0.0 {
            self.time = 0.0;
        } else {
            return None;
        }
        self.running = false;
        Some(self.generation)
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
