/**
 * This module contains all logic for turning external files and generated geometry
 * into GPU resources: image decoding, texture units and the primitive meshes.
 */
pub mod image;
pub mod mesh;
pub mod texture;

pub use image::{DecodedImage, ImageCrateDecoder, ImageDecoder};
pub use mesh::{MeshDrawer, ShapeMeshes};
pub use texture::GpuTextures;
