//! Engine data structures: shapes, transforms, materials, lights and textures.
//!
//! - `shapes` contains the five primitive shapes and their generated geometry
//! - `transform` turns per-draw placement parameters into a model matrix
//! - `material` holds the Phong material descriptor
//! - `light` holds the fixed scene illumination
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod light;
pub mod material;
pub mod shapes;
pub mod texture;
pub mod transform;
