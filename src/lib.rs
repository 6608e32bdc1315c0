//! starscape
//!
//! An animated 3D backdrop for a personal page: a procedural star field, an
//! orbiting planet, a skeletally-animated avatar and a parallax camera/light
//! rig driven by scroll offset and pointer position. A small carousel widget
//! manages paginated content independently of the 3D scene.
//!
//! High-level modules
//! - `camera`: camera, projection and uniforms for view/projection
//! - `carousel`: cyclic-index state machine for the paginated content widget
//! - `clock`: monotonic frame clock providing elapsed/delta seconds
//! - `config`: backdrop constants and asset locations
//! - `context`: central GPU and window context that owns device/queue/surface
//! - `data_structures`: scene data models (meshes, transforms, the scene graph)
//! - `flow`: the window event loop and the per-frame update task
//! - `frame`: pure per-frame state derivation from the input signals
//! - `input`: last-known scroll/pointer/viewport state written by event callbacks
//! - `pipelines`: render pipeline definitions (star points, lit scene geometry)
//! - `planet`: procedural sphere mesh and its textured material
//! - `resources`: asset loading (glTF avatar, animation clips, async slots)
//! - `scene`: scene composition and the per-frame render pass
//! - `starfield`: procedural star point cloud and its shader uniforms

pub mod camera;
pub mod carousel;
pub mod clock;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod frame;
pub mod input;
pub mod pipelines;
pub mod planet;
pub mod resources;
pub mod scene;
pub mod starfield;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use winit::dpi::PhysicalPosition;
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
