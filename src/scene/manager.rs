use cgmath::Vector3;

use crate::{
    camera::{Camera, Projection},
    config::{SceneConfig, TextureSource},
    data_structures::{
        light::{LightError, LightSetup},
        material::MaterialDef,
    },
    pipelines::uniforms::ShaderProgram,
    registry::{MaterialRegistry, TextureBackend, TextureRegistry},
    resources::{image::ImageDecoder, mesh::MeshDrawer},
    scene::{
        broadcaster::ShaderStateBroadcaster,
        catalog::{MATERIALS, Placement, SCENE},
        compound::{self, CompoundObject, SceneError},
    },
};

/// Owns the scene state: the shader program, the texture backend, the meshes and both
/// registries.
///
/// The lifecycle is [`prepare_scene`](Self::prepare_scene) once, then
/// [`render_scene`](Self::render_scene) every frame. Textures are released by
/// [`destroy`](Self::destroy) or when the manager is dropped.
pub struct SceneManager<S, B: TextureBackend, M> {
    shader: S,
    backend: B,
    meshes: M,
    textures: TextureRegistry<B::Handle>,
    materials: MaterialRegistry,
}

impl<S, B, M> SceneManager<S, B, M>
where
    S: ShaderProgram,
    B: TextureBackend,
    M: MeshDrawer<S>,
{
    pub fn new(shader: S, backend: B, meshes: M) -> Self {
        Self {
            shader,
            backend,
            meshes,
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
        }
    }

    /// Load every texture of `sources` in order and bind them to their units.
    ///
    /// A texture that fails to load is logged and left out, the others are still
    /// loaded. Returns the number of bound units.
    pub fn load_scene_textures<D>(&mut self, decoder: &D, sources: &[TextureSource]) -> usize
    where
        D: ImageDecoder + ?Sized,
    {
        for source in sources {
            // failures are logged by the registry
            let _ = self
                .textures
                .load(&mut self.backend, decoder, &source.path, &source.tag);
        }
        let bound = self.textures.bind_all(&mut self.backend);
        if bound < sources.len() {
            log::warn!("{} of {} scene textures are available", bound, sources.len());
        }
        bound
    }

    pub fn define_object_materials(&mut self, defs: &[MaterialDef]) {
        self.materials.define_all(defs);
    }

    pub fn setup_scene_lights(&mut self, lights: &LightSetup) -> Result<(), LightError> {
        self.broadcaster().configure_lights(lights)
    }

    /// Load textures, define the materials, configure the lights and load every shape.
    pub fn prepare_scene<D>(&mut self, decoder: &D, config: &SceneConfig) -> Result<(), LightError>
    where
        D: ImageDecoder + ?Sized,
    {
        self.load_scene_textures(decoder, &config.textures);
        self.define_object_materials(&MATERIALS);
        self.setup_scene_lights(&config.lights)?;
        self.meshes.load_all();
        Ok(())
    }

    /// Draw the shelf scene. Returns every part that could not be drawn.
    pub fn render_scene(&mut self) -> Vec<SceneError> {
        self.render_placements(&SCENE)
    }

    pub fn render_placements(&mut self, placements: &[Placement]) -> Vec<SceneError> {
        placements
            .iter()
            .flat_map(|placement| {
                self.build(
                    &placement.compound.object(),
                    placement.position.into(),
                    placement.scale,
                    placement.fill,
                )
            })
            .collect()
    }

    pub fn build(
        &mut self,
        object: &CompoundObject,
        position: Vector3<f32>,
        scale: f32,
        fill: Option<&str>,
    ) -> Vec<SceneError> {
        let Self {
            shader,
            meshes,
            textures,
            materials,
            ..
        } = self;
        let mut broadcaster = ShaderStateBroadcaster::new(Some(shader), textures, materials);
        compound::build(object, position, scale, fill, &mut broadcaster, meshes)
    }

    pub fn update_view(&mut self, camera: &Camera, projection: &Projection) {
        self.broadcaster().set_view(camera, projection);
    }

    /// A broadcaster writing into this manager's shader.
    pub fn broadcaster(&mut self) -> ShaderStateBroadcaster<'_, S, B::Handle> {
        ShaderStateBroadcaster::new(Some(&mut self.shader), &self.textures, &self.materials)
    }

    pub fn shader(&self) -> &S {
        &self.shader
    }

    pub fn meshes(&self) -> &M {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut M {
        &mut self.meshes
    }

    pub fn textures(&self) -> &TextureRegistry<B::Handle> {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<S, B: TextureBackend, M> SceneManager<S, B, M> {
    /// Release every texture. The manager can be prepared again afterwards.
    pub fn destroy(&mut self) {
        self.textures.destroy(&mut self.backend);
    }
}

impl<S, B: TextureBackend, M> Drop for SceneManager<S, B, M> {
    fn drop(&mut self) {
        self.destroy();
    }
}
