//! Scene data structures: models, textures, transforms and the scene graph.
//!
//! - `model` contains mesh and material definitions and their GPU resources
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `instance` holds per-instance transformation data
//! - `scene_graph` is the arena of nodes the backdrop scene is composed from

pub mod instance;
pub mod model;
pub mod scene_graph;
pub mod texture;
