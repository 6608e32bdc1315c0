//! Render pipeline definitions.
//!
//! - `scene` is the lit, textured pipeline for the planet and avatar
//! - `star` is the additive point-cloud pipeline for the star field
//! - `light` holds the point-light uniforms shared by the scene pipeline

pub mod light;
pub mod scene;
pub mod star;
