//! Backdrop configuration: scene constants and asset locations.
//!
//! Everything the scene derives per frame is parameterised here so the
//! composer and the update loop never hard-code magic numbers. Asset file
//! locations are configuration inputs, never computed.

use std::path::PathBuf;

/// Axis-aligned bounds the star positions are drawn from.
///
/// `x` is drawn from `[-width / 2, width / 2)`, `y` from `[0, height)` and
/// `z` from `[-depth / 2, depth / 2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarBounds {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

/// Full backdrop configuration with the reference-instance defaults.
#[derive(Clone, Debug)]
pub struct BackdropConfig {
    /// Number of stars. Fixed at construction, the point cloud is never resized.
    pub star_count: usize,
    pub star_bounds: StarBounds,
    /// World offset of the star field root node.
    pub star_offset: [f32; 3],
    /// Base point size fed to the star shader (scaled by pixel ratio and the
    /// per-star scale attribute).
    pub star_point_size: f32,
    /// Star field spin rate in radians per elapsed second.
    pub star_rotation_rate: f32,

    pub planet_radius: f32,
    /// Longitudinal and latitudinal segment count of the generated sphere.
    pub planet_segments: u32,
    pub planet_offset: [f32; 3],
    /// Planet spin rate in radians per elapsed second.
    pub planet_rotation_rate: f32,
    pub planet_diffuse: Option<PathBuf>,
    pub planet_normal: Option<PathBuf>,

    /// Vertical distance between page sections; scroll parallax moves the
    /// camera by `-(scroll / viewport_height) * objects_distance`.
    pub objects_distance: f32,
    /// Virtual page length in viewport heights. The document height the
    /// scroll gate compares against is `viewport_height * page_length`.
    pub page_length: f32,

    /// Colour of the pointer-tracked key light (linear RGB) and its intensity.
    pub top_light_color: [f32; 3],
    pub top_light_intensity: f32,
    /// Depth the key light sits at while tracking the pointer in x/y.
    pub top_light_z: f32,
    pub bottom_light_color: [f32; 3],
    pub bottom_light_intensity: f32,
    pub bottom_light_position: [f32; 3],

    /// The glTF binary holding the avatar scene and its animation clips.
    pub avatar_path: PathBuf,
    /// Directory external glTF buffer/texture URIs are resolved against.
    pub decoder_dir: PathBuf,
    /// World offset the avatar sub-scene is spliced in at.
    pub avatar_offset: [f32; 3],

    pub camera_position: [f32; 3],
    pub camera_fov_deg: f32,

    /// Device pixel ratio is clamped to this before being fed to the shader.
    pub max_pixel_ratio: f32,

    pub carousel_slides: usize,
    pub carousel_links: usize,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            star_count: 150,
            star_bounds: StarBounds {
                width: 10.0,
                height: 20.0,
                depth: 20.0,
            },
            star_offset: [-1.0, -16.0, 0.0],
            star_point_size: 100.0,
            star_rotation_rate: 0.0030,
            planet_radius: 0.7,
            planet_segments: 64,
            planet_offset: [0.0, -0.1, 0.0],
            planet_rotation_rate: 0.075,
            planet_diffuse: Some("assets/planet_diffuse.jpg".into()),
            planet_normal: Some("assets/planet_normal.jpg".into()),
            objects_distance: 3.5,
            page_length: 3.0,
            top_light_color: [0.25, 0.25, 0.25],
            top_light_intensity: 3.5,
            top_light_z: 1.0,
            bottom_light_color: [0.0, 0.678, 1.0],
            bottom_light_intensity: 0.1,
            bottom_light_position: [0.0, -11.0, 4.0],
            avatar_path: "assets/avatar.glb".into(),
            decoder_dir: "assets".into(),
            avatar_offset: [0.0, -12.0, 0.0],
            camera_position: [0.0, 2.0, 4.0],
            camera_fov_deg: 45.0,
            max_pixel_ratio: 2.0,
            carousel_slides: 4,
            carousel_links: 4,
        }
    }
}
