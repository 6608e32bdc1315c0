//! Animation clips and the avatar's clip player.
//!
//! glTF stores one channel per transform component; [`merge`] folds the
//! channels of a clip into a single track of full transforms so playback is a
//! lookup per frame.

use std::collections::HashMap;

use crate::data_structures::instance::Instance;

/// Keyframe values of one glTF animation channel.
#[derive(Clone, Debug)]
pub enum Keyframes {
    Translation(Vec<cgmath::Vector3<f32>>),
    Rotation(Vec<cgmath::Quaternion<f32>>),
    Scale(Vec<cgmath::Vector3<f32>>),
    Other,
}

/// One animation channel: a named clip fragment with keyframes and timing.
#[derive(Clone, Debug)]
pub struct AnimationClip {
    pub name: String,
    pub keyframes: Keyframes,
    pub timestamps: Vec<f32>,
}

/// A merged clip: one full transform per keyframe.
#[derive(Clone, Debug, Default)]
pub struct ModelAnimation {
    pub name: String,
    pub instances: Vec<Instance>,
    pub timestamps: Vec<f32>,
}

#[derive(Default)]
struct Track {
    trans: Vec<cgmath::Vector3<f32>>,
    rots: Vec<cgmath::Quaternion<f32>>,
    scals: Vec<cgmath::Vector3<f32>>,
    timestamps: Vec<f32>,
}

/// Merge per-component channels into one [`ModelAnimation`] per clip name,
/// preserving first-encounter order. Tracks of unequal length are padded with
/// their first value (or identity when a component is missing entirely).
pub fn merge(clips: Vec<AnimationClip>) -> Vec<ModelAnimation> {
    merge_with_base(clips, &Instance::default())
}

/// Like [`merge`], but components with no channel of their own fall back to
/// `base`, the node's rest pose. A rotation-only track on a child node then
/// rotates in place instead of collapsing the node onto its parent.
pub fn merge_with_base(clips: Vec<AnimationClip>, base: &Instance) -> Vec<ModelAnimation> {
    let mut order: Vec<String> = Vec::new();
    let mut tracks: HashMap<String, Track> = HashMap::new();

    for clip in clips {
        let track = tracks.entry(clip.name.clone()).or_insert_with(|| {
            order.push(clip.name.clone());
            Track::default()
        });
        match clip.keyframes {
            Keyframes::Translation(mut translations) => track.trans.append(&mut translations),
            Keyframes::Rotation(mut rotations) => track.rots.append(&mut rotations),
            Keyframes::Scale(mut scales) => track.scals.append(&mut scales),
            Keyframes::Other => {
                log::warn!("unsupported keyframe type in clip {}, skipped", clip.name)
            }
        }
        // Some tracks have fewer steps than others; keep the densest set of
        // timestamps for smooth playback.
        if clip.timestamps.len() > track.timestamps.len() {
            track.timestamps = clip.timestamps;
        }
    }

    order
        .into_iter()
        .map(|name| {
            let track = tracks.remove(&name).unwrap();
            let len = track
                .trans
                .len()
                .max(track.rots.len())
                .max(track.scals.len());
            let instances = (0..len)
                .map(|i| Instance {
                    position: component(&track.trans, i, base.position),
                    rotation: component(&track.rots, i, base.rotation),
                    scale: component(&track.scals, i, base.scale),
                })
                .collect();
            ModelAnimation {
                name,
                instances,
                timestamps: track.timestamps,
            }
        })
        .collect()
}

fn component<T: Copy>(track: &[T], i: usize, default: T) -> T {
    track
        .get(i)
        .or_else(|| track.first())
        .copied()
        .unwrap_or(default)
}

/// Clip player bound to exactly one merged clip.
///
/// Construction puts the player in the "playing" logical state: that is the
/// authorization to advance, not advancement itself. Time only moves when the
/// caller feeds [`advance`](Self::advance) a delta; otherwise the pose stays
/// frozen where it was, never reset or rewound.
#[derive(Clone, Debug)]
pub struct AnimationPlayer {
    animation: ModelAnimation,
    time: f32,
    playing: bool,
}

impl AnimationPlayer {
    pub fn new(animation: ModelAnimation) -> Self {
        Self {
            animation,
            time: 0.0,
            playing: true,
        }
    }

    pub fn advance(&mut self, delta: f32) {
        if self.playing {
            self.time += delta.max(0.0);
        }
    }

    /// The transform at the current playback time, looping over the clip
    /// duration. Step sampling: the last keyframe at or before the time.
    pub fn pose(&self) -> Instance {
        let instances = &self.animation.instances;
        if instances.is_empty() {
            return Instance::default();
        }
        let duration = self.animation.timestamps.last().copied().unwrap_or(0.0);
        if duration <= 0.0 {
            return instances[0].clone();
        }
        let t = self.time % duration;
        let idx = self
            .animation
            .timestamps
            .partition_point(|&ts| ts <= t)
            .saturating_sub(1)
            .min(instances.len() - 1);
        instances[idx].clone()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn clip_name(&self) -> &str {
        &self.animation.name
    }
}
