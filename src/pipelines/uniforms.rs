//! Named shader uniforms and their GPU layout.
//!
//! Scene code talks to the shader through [`ShaderProgram`], a setter per uniform type
//! addressed by name. [`UniformState`] is the WGPU implementation: it resolves each name
//! to a field of one of two `Pod` blocks, [`ObjectUniform`] (rewritten before every
//! draw) and [`FrameUniform`] (camera and lights).
//!
//! Recognised names:
//!
//! | name | type | block |
//! |------|------|-------|
//! | `model` | mat4 | object |
//! | `objectColor` | vec4 | object |
//! | `objectTexture` | sampler2D / int | object |
//! | `bUseTexture` | bool | object |
//! | `UVscale` | vec2 | object |
//! | `material.diffuseColor`, `material.specularColor` | vec3 | object |
//! | `material.shininess` | float | object |
//! | `bUseLighting` | bool | frame |
//! | `view`, `projection` | mat4 | frame |
//! | `viewPosition` | vec3 | frame |
//! | `directionalLight.{direction,ambient,diffuse,specular}` | vec3 | frame |
//! | `directionalLight.bActive` | bool | frame |
//! | `pointLights[i].{position,ambient,diffuse,specular}` | vec3 | frame |
//! | `pointLights[i].bActive` | bool | frame |

use cgmath::{Matrix, Matrix4, SquareMatrix, Vector2, Vector3, Vector4};

use crate::data_structures::light::MAX_POINT_LIGHTS;

pub const MODEL: &str = "model";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const UV_SCALE: &str = "UVscale";
pub const MATERIAL_DIFFUSE: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR: &str = "material.specularColor";
pub const MATERIAL_SHININESS: &str = "material.shininess";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const VIEW: &str = "view";
pub const PROJECTION: &str = "projection";
pub const VIEW_POSITION: &str = "viewPosition";

/// `directionalLight.<field>`
pub fn directional_light(field: &str) -> String {
    format!("directionalLight.{field}")
}

/// `pointLights[<index>].<field>`
pub fn point_light(index: usize, field: &str) -> String {
    format!("pointLights[{index}].{field}")
}

/// Write access to the named uniforms of a shader program.
pub trait ShaderProgram {
    fn set_int(&mut self, name: &str, value: i32);
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_vec2(&mut self, name: &str, value: Vector2<f32>);
    fn set_vec3(&mut self, name: &str, value: Vector3<f32>);
    fn set_vec4(&mut self, name: &str, value: Vector4<f32>);
    fn set_mat4(&mut self, name: &str, value: &Matrix4<f32>);
    /// Select the texture unit sampled by the sampler uniform `name`.
    fn set_sampler_2d(&mut self, name: &str, unit: u32);
}

/// A value written to a named uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Bool(bool),
    Float(f32),
    Vec2(Vector2<f32>),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Mat4(Matrix4<f32>),
    Sampler2d(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightField {
    /// `direction` of the directional light or `position` of a point light.
    Placement,
    Ambient,
    Diffuse,
    Specular,
    Active,
}

impl LightField {
    fn parse(field: &str, placement: &str) -> Option<Self> {
        match field {
            "ambient" => Some(LightField::Ambient),
            "diffuse" => Some(LightField::Diffuse),
            "specular" => Some(LightField::Specular),
            "bActive" => Some(LightField::Active),
            f if f == placement => Some(LightField::Placement),
            _ => None,
        }
    }
}

/// The storage location a uniform name resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniformSlot {
    Model,
    ObjectColor,
    ObjectTexture,
    UseTexture,
    UvScale,
    MaterialDiffuse,
    MaterialSpecular,
    MaterialShininess,
    UseLighting,
    View,
    Projection,
    ViewPosition,
    Directional(LightField),
    Point(usize, LightField),
}

impl UniformSlot {
    pub fn parse(name: &str) -> Option<Self> {
        let slot = match name {
            MODEL => UniformSlot::Model,
            OBJECT_COLOR => UniformSlot::ObjectColor,
            OBJECT_TEXTURE => UniformSlot::ObjectTexture,
            USE_TEXTURE => UniformSlot::UseTexture,
            UV_SCALE => UniformSlot::UvScale,
            MATERIAL_DIFFUSE => UniformSlot::MaterialDiffuse,
            MATERIAL_SPECULAR => UniformSlot::MaterialSpecular,
            MATERIAL_SHININESS => UniformSlot::MaterialShininess,
            USE_LIGHTING => UniformSlot::UseLighting,
            VIEW => UniformSlot::View,
            PROJECTION => UniformSlot::Projection,
            VIEW_POSITION => UniformSlot::ViewPosition,
            _ => {
                if let Some(field) = name.strip_prefix("directionalLight.") {
                    return LightField::parse(field, "direction").map(UniformSlot::Directional);
                }
                let (index, field) = name.strip_prefix("pointLights[")?.split_once("].")?;
                let index: usize = index.parse().ok()?;
                if index >= MAX_POINT_LIGHTS {
                    return None;
                }
                return LightField::parse(field, "position").map(|f| UniformSlot::Point(index, f));
            }
        };
        Some(slot)
    }
}

/// Per-draw uniform block, bound with a dynamic offset.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`.
    pub normal: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub diffuse_color: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    pub use_texture: u32,
    pub uv_scale: [f32; 2],
    pub texture_slot: u32,
    pub _padding: u32,
}

impl Default for ObjectUniform {
    fn default() -> Self {
        let identity: [[f32; 4]; 4] = Matrix4::identity().into();
        Self {
            model: identity,
            normal: identity,
            object_color: [1.0, 1.0, 1.0, 1.0],
            diffuse_color: [1.0, 1.0, 1.0],
            shininess: 0.0,
            specular_color: [0.0, 0.0, 0.0],
            use_texture: 0,
            uv_scale: [1.0, 1.0],
            texture_slot: 0,
            _padding: 0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightRaw {
    /// Direction for the directional light, position for point lights.
    pub placement: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    pub _padding: u32,
    pub diffuse: [f32; 3],
    pub _padding2: u32,
    pub specular: [f32; 3],
    pub _padding3: u32,
}

impl LightRaw {
    fn set_vec3(&mut self, field: LightField, value: [f32; 3]) -> bool {
        match field {
            LightField::Placement => self.placement = value,
            LightField::Ambient => self.ambient = value,
            LightField::Diffuse => self.diffuse = value,
            LightField::Specular => self.specular = value,
            LightField::Active => return false,
        }
        true
    }
}

/// Camera and lighting, written once per frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    pub directional: LightRaw,
    pub points: [LightRaw; MAX_POINT_LIGHTS],
    pub use_lighting: u32,
    pub _padding: [u32; 3],
}

impl Default for FrameUniform {
    fn default() -> Self {
        let identity: [[f32; 4]; 4] = Matrix4::identity().into();
        Self {
            view: identity,
            projection: identity,
            view_position: [0.0, 0.0, 0.0, 1.0],
            directional: LightRaw::default(),
            points: [LightRaw::default(); MAX_POINT_LIGHTS],
            use_lighting: 0,
            _padding: [0; 3],
        }
    }
}

/// CPU copy of the scene shader's uniforms.
#[derive(Clone, Debug, Default)]
pub struct UniformState {
    pub object: ObjectUniform,
    pub frame: FrameUniform,
}

impl UniformState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` in the field `name` resolves to. Unknown names and values of the
    /// wrong type are logged and dropped.
    pub fn write(&mut self, name: &str, value: UniformValue) {
        let Some(slot) = UniformSlot::parse(name) else {
            log::warn!("scene shader has no uniform named `{name}`");
            return;
        };
        if !self.write_slot(slot, value) {
            log::warn!("uniform `{name}` cannot hold {value:?}");
        }
    }

    fn write_slot(&mut self, slot: UniformSlot, value: UniformValue) -> bool {
        use UniformValue as V;
        let object = &mut self.object;
        let frame = &mut self.frame;
        match (slot, value) {
            (UniformSlot::Model, V::Mat4(model)) => {
                object.model = model.into();
                let normal = model
                    .invert()
                    .map(|inverse| inverse.transpose())
                    .unwrap_or_else(Matrix4::identity);
                object.normal = normal.into();
            }
            (UniformSlot::ObjectColor, V::Vec4(color)) => object.object_color = color.into(),
            (UniformSlot::ObjectTexture, V::Sampler2d(unit)) => object.texture_slot = unit,
            (UniformSlot::ObjectTexture, V::Int(unit)) if unit >= 0 => {
                object.texture_slot = unit as u32
            }
            (UniformSlot::UseTexture, V::Bool(flag)) => object.use_texture = flag as u32,
            (UniformSlot::UseTexture, V::Int(flag)) => object.use_texture = (flag != 0) as u32,
            (UniformSlot::UvScale, V::Vec2(scale)) => object.uv_scale = scale.into(),
            (UniformSlot::MaterialDiffuse, V::Vec3(color)) => object.diffuse_color = color.into(),
            (UniformSlot::MaterialSpecular, V::Vec3(color)) => {
                object.specular_color = color.into()
            }
            (UniformSlot::MaterialShininess, V::Float(shininess)) => object.shininess = shininess,
            (UniformSlot::UseLighting, V::Bool(flag)) => frame.use_lighting = flag as u32,
            (UniformSlot::UseLighting, V::Int(flag)) => frame.use_lighting = (flag != 0) as u32,
            (UniformSlot::View, V::Mat4(view)) => frame.view = view.into(),
            (UniformSlot::Projection, V::Mat4(projection)) => frame.projection = projection.into(),
            (UniformSlot::ViewPosition, V::Vec3(position)) => {
                frame.view_position = position.extend(1.0).into()
            }
            (UniformSlot::Directional(LightField::Active), V::Bool(flag)) => {
                frame.directional.active = flag as u32
            }
            (UniformSlot::Directional(field), V::Vec3(value)) => {
                return frame.directional.set_vec3(field, value.into());
            }
            (UniformSlot::Point(index, LightField::Active), V::Bool(flag)) => {
                frame.points[index].active = flag as u32
            }
            (UniformSlot::Point(index, field), V::Vec3(value)) => {
                return frame.points[index].set_vec3(field, value.into());
            }
            _ => return false,
        }
        true
    }
}

impl ShaderProgram for UniformState {
    fn set_int(&mut self, name: &str, value: i32) {
        self.write(name, UniformValue::Int(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.write(name, UniformValue::Bool(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.write(name, UniformValue::Float(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.write(name, UniformValue::Vec2(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.write(name, UniformValue::Vec3(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.write(name, UniformValue::Vec4(value));
    }

    fn set_mat4(&mut self, name: &str, value: &Matrix4<f32>) {
        self.write(name, UniformValue::Mat4(*value));
    }

    fn set_sampler_2d(&mut self, name: &str, unit: u32) {
        self.write(name, UniformValue::Sampler2d(unit));
    }
}
