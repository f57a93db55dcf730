//! Tag-addressed registries for the GPU resources the scene refers to by name.
//!
//! Both registries are populated once while the scene is prepared and only queried
//! afterwards. A lookup miss is always an explicit error, never a sentinel value.
//!
//! - `texture` maps tags to texture handles and to the texture unit they are bound to
//! - `material` maps tags to Phong material descriptors

pub mod material;
pub mod texture;

pub use material::{MaterialError, MaterialRegistry};
pub use texture::{TextureBackend, TextureError, TextureRegistry};
