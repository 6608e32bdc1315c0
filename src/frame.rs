//! Pure per-frame state derivation.
//!
//! Every visual parameter of a frame is a deterministic function of three
//! independent input signals: wall-clock elapsed time, scroll offset and
//! pointer position. The derivation is kept free of GPU types so the mapping
//! can be tested exactly; the scene applies a [`FrameState`] to buffers and
//! transforms afterwards.

use crate::{clock::FrameTick, config::BackdropConfig, input::InputState};

/// Everything the scene mutates on one tick of the update loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameState {
    /// Planet rotation around Y, radians.
    pub planet_angle: f32,
    /// Star field rotation around Y, radians.
    pub star_angle: f32,
    /// Elapsed seconds fed to the star shader's `time` uniform.
    pub star_time: f32,
    /// Pointer-tracked key light position: direct in x, inverted in y,
    /// fixed depth.
    pub top_light_position: [f32; 3],
    /// Linear scroll parallax applied to the camera rig.
    pub camera_y: f32,
    /// Whether the viewer has scrolled to the end of the page.
    pub at_bottom: bool,
    /// Advance the avatar clip this frame. True iff the asset is loaded and
    /// the viewer is at the page bottom; otherwise the pose stays frozen.
    pub advance_avatar: bool,
    /// Seconds to advance the clip by when `advance_avatar` is set.
    pub avatar_delta: f32,
}

impl FrameState {
    pub fn derive(
        tick: FrameTick,
        input: &InputState,
        avatar_loaded: bool,
        config: &BackdropConfig,
    ) -> Self {
        let pointer = input.pointer();
        // A degenerate document height of 0 makes this trivially true, which
        // is the accepted behaviour rather than a special case.
        let at_bottom = input.viewport_height() + input.scroll_y() >= input.document_height();
        Self {
            planet_angle: tick.elapsed * config.planet_rotation_rate,
            star_angle: tick.elapsed * config.star_rotation_rate,
            star_time: tick.elapsed,
            top_light_position: [pointer.x, -pointer.y, config.top_light_z],
            camera_y: -(input.scroll_y() / input.viewport_height()) * config.objects_distance,
            at_bottom,
            advance_avatar: avatar_loaded && at_bottom,
            avatar_delta: tick.delta,
        }
    }
}
