//! Scene assembly on top of the registries and the shader uniforms.
//!
//! - `broadcaster` writes per-draw state into the active shader program
//! - `compound` describes compound objects as lists of primitives and draws them
//! - `catalog` holds the bottles, the shelf, the materials and the scene layout
//! - `manager` ties everything together for the prepare/render lifecycle

pub mod broadcaster;
pub mod catalog;
pub mod compound;
pub mod manager;

pub use broadcaster::ShaderStateBroadcaster;
pub use compound::{CompoundObject, PrimitiveSpec, SceneError, StepError, Surface, TextureTag};
pub use manager::SceneManager;
