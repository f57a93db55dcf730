//! The single channel through which scene state reaches the shader.

use cgmath::{EuclideanSpace, Matrix4, Vector2, Vector4};

use crate::{
    camera::{Camera, Projection},
    data_structures::{
        light::{LightError, LightSetup, MAX_POINT_LIGHTS},
        material::Material,
        transform::TransformParams,
    },
    pipelines::uniforms::{self, ShaderProgram},
    registry::{MaterialError, MaterialRegistry, TextureError, TextureRegistry},
};

/// Writes per-draw state into the named uniforms of the active shader program.
///
/// Texture and material tags are resolved through the registries before anything is
/// written, so a lookup miss leaves the shader exactly as it was. When no shader is
/// bound every call is a no-op.
pub struct ShaderStateBroadcaster<'a, S: ?Sized, H> {
    shader: Option<&'a mut S>,
    textures: &'a TextureRegistry<H>,
    materials: &'a MaterialRegistry,
}

impl<'a, S: ShaderProgram + ?Sized, H> ShaderStateBroadcaster<'a, S, H> {
    pub fn new(
        shader: Option<&'a mut S>,
        textures: &'a TextureRegistry<H>,
        materials: &'a MaterialRegistry,
    ) -> Self {
        Self {
            shader,
            textures,
            materials,
        }
    }

    /// The bound shader, if any.
    pub fn shader(&self) -> Option<&S> {
        self.shader.as_deref()
    }

    fn active(&mut self, call: &str) -> Option<&mut S> {
        if self.shader.is_none() {
            log::debug!("{call}: no shader program bound, nothing written");
        }
        self.shader.as_deref_mut()
    }

    pub fn set_transformations(&mut self, params: &TransformParams) {
        self.set_transform(&params.to_matrix());
    }

    pub fn set_transform(&mut self, model: &Matrix4<f32>) {
        if let Some(shader) = self.active("set_transform") {
            shader.set_mat4(uniforms::MODEL, model);
        }
    }

    pub fn set_flat_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        if let Some(shader) = self.active("set_flat_color") {
            shader.set_bool(uniforms::USE_TEXTURE, false);
            shader.set_vec4(uniforms::OBJECT_COLOR, Vector4::new(r, g, b, a));
        }
    }

    /// Sample the texture registered under `tag` for the following draws.
    pub fn set_texture(&mut self, tag: &str) -> Result<u32, TextureError> {
        let slot = self.texture_slot(tag)?;
        self.set_texture_slot(slot);
        Ok(slot)
    }

    /// Slot of the texture registered under `tag`, without touching the shader.
    pub fn texture_slot(&self, tag: &str) -> Result<u32, TextureError> {
        self.textures.find_slot(tag)
    }

    pub fn set_texture_slot(&mut self, slot: u32) {
        if let Some(shader) = self.active("set_texture") {
            shader.set_bool(uniforms::USE_TEXTURE, true);
            shader.set_sampler_2d(uniforms::OBJECT_TEXTURE, slot);
        }
    }

    pub fn set_uv_scale(&mut self, u: f32, v: f32) {
        if let Some(shader) = self.active("set_uv_scale") {
            shader.set_vec2(uniforms::UV_SCALE, Vector2::new(u, v));
        }
    }

    pub fn set_material(&mut self, tag: &str) -> Result<(), MaterialError> {
        let material = *self.material(tag)?;
        self.apply_material(&material);
        Ok(())
    }

    /// Material registered under `tag`, without touching the shader.
    pub fn material(&self, tag: &str) -> Result<&'a Material, MaterialError> {
        self.materials.find(tag)
    }

    pub fn apply_material(&mut self, material: &Material) {
        if let Some(shader) = self.active("set_material") {
            shader.set_vec3(uniforms::MATERIAL_DIFFUSE, material.diffuse_color);
            shader.set_vec3(uniforms::MATERIAL_SPECULAR, material.specular_color);
            shader.set_float(uniforms::MATERIAL_SHININESS, material.shininess);
        }
    }

    /// Enable lighting and write the directional light and every point light.
    ///
    /// Point-light slots beyond `lights.points` are switched off.
    pub fn configure_lights(&mut self, lights: &LightSetup) -> Result<(), LightError> {
        if lights.points.len() > MAX_POINT_LIGHTS {
            return Err(LightError::TooManyPointLights(lights.points.len()));
        }
        let Some(shader) = self.active("configure_lights") else {
            return Ok(());
        };
        shader.set_bool(uniforms::USE_LIGHTING, true);

        let directional = &lights.directional;
        let name = uniforms::directional_light;
        shader.set_vec3(&name("direction"), directional.direction);
        shader.set_vec3(&name("ambient"), directional.ambient);
        shader.set_vec3(&name("diffuse"), directional.diffuse);
        shader.set_vec3(&name("specular"), directional.specular);
        shader.set_bool(&name("bActive"), directional.active);

        for index in 0..MAX_POINT_LIGHTS {
            let name = |field| uniforms::point_light(index, field);
            match lights.points.get(index) {
                Some(light) => {
                    shader.set_vec3(&name("position"), light.position);
                    shader.set_vec3(&name("ambient"), light.ambient);
                    shader.set_vec3(&name("diffuse"), light.diffuse);
                    shader.set_vec3(&name("specular"), light.specular);
                    shader.set_bool(&name("bActive"), light.active);
                }
                None => shader.set_bool(&name("bActive"), false),
            }
        }
        Ok(())
    }

    /// Write the camera matrices and the eye position used for specular highlights.
    pub fn set_view(&mut self, camera: &Camera, projection: &Projection) {
        if let Some(shader) = self.active("set_view") {
            shader.set_mat4(uniforms::VIEW, &camera.calc_matrix());
            shader.set_mat4(uniforms::PROJECTION, &projection.calc_matrix());
            shader.set_vec3(uniforms::VIEW_POSITION, camera.position.to_vec());
        }
    }
}
