//! Surface material descriptors used by the Phong shading in the scene shader.

use cgmath::Vector3;

/// Diffuse and specular response of a surface.
///
/// Materials are registered once under a tag in the
/// [`MaterialRegistry`](crate::registry::material::MaterialRegistry) and are read-only
/// afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    /// Negative shininess has no meaning for the specular exponent and is clamped to 0.
    pub fn new(diffuse_color: [f32; 3], specular_color: [f32; 3], shininess: f32) -> Self {
        Self {
            diffuse_color: diffuse_color.into(),
            specular_color: specular_color.into(),
            shininess: shininess.max(0.0),
        }
    }
}

/// A material together with the tag it is registered under.
///
/// Used for static material tables such as [`crate::scene::catalog::MATERIALS`].
#[derive(Clone, Copy, Debug)]
pub struct MaterialDef {
    pub tag: &'static str,
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub shininess: f32,
}

impl MaterialDef {
    pub fn material(&self) -> Material {
        Material::new(self.diffuse_color, self.specular_color, self.shininess)
    }
}
