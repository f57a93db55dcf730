//! shelf-ngin
//!
//! A small WGPU scene renderer that assembles textured, lit compound objects from five
//! primitive meshes. Scene code never touches the GPU directly: it resolves texture and
//! material tags through registries and writes per-draw state into named shader
//! uniforms, one primitive at a time.
//!
//! High-level modules
//! - `camera`: a fixed perspective camera
//! - `config`: scene configuration (assets, texture manifest, lights, window)
//! - `context`: central GPU and window context that owns device/queue/pipeline
//! - `data_structures`: shapes, transforms, materials, lights and textures
//! - `flow`: the winit event loop that prepares and renders the scene
//! - `pipelines`: the scene pipeline and its named-uniform state
//! - `registry`: tag-addressed texture and material registries
//! - `render`: replay of queued draws in a render pass
//! - `resources`: image decoding, texture units and primitive meshes
//! - `scene`: the state broadcaster, compound objects and the shelf scene
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
#[cfg(not(target_arch = "wasm32"))]
pub mod flow;
pub mod pipelines;
pub mod registry;
pub mod render;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use config::SceneConfig;
pub use data_structures::{shapes::Shape, transform::compose};
pub use scene::{SceneManager, ShaderStateBroadcaster};
