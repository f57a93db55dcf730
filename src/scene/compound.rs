//! Declarative compound objects and the routine that draws them.
//!
//! A [`CompoundObject`] is an ordered list of [`PrimitiveSpec`]s. [`build`] walks the
//! list and, for every part, writes transform, UV scale, surface and material through
//! the [`ShaderStateBroadcaster`] before drawing the part's shape.

use cgmath::Vector3;

use crate::{
    data_structures::{shapes::Shape, transform::TransformParams},
    pipelines::uniforms::ShaderProgram,
    registry::{MaterialError, TextureError},
    resources::mesh::MeshDrawer,
    scene::broadcaster::ShaderStateBroadcaster,
};

/// Which texture a part samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureTag {
    Named(&'static str),
    /// The texture chosen by the caller of [`build`], e.g. the label of a sauce bottle.
    Fill,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Surface {
    Texture(TextureTag),
    /// Flat RGBA colour.
    Color([f32; 4]),
}

/// One primitive of a compound, in the compound's local units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimitiveSpec {
    pub name: &'static str,
    pub shape: Shape,
    pub size: [f32; 3],
    pub offset: [f32; 3],
    /// Degrees about X, Y and Z.
    pub rotation: [f32; 3],
    pub surface: Surface,
    pub material: &'static str,
    pub uv_scale: [f32; 2],
}

impl PrimitiveSpec {
    /// An unrotated part with a UV scale of 1x1.
    pub const fn new(
        name: &'static str,
        shape: Shape,
        size: [f32; 3],
        offset: [f32; 3],
        surface: Surface,
        material: &'static str,
    ) -> Self {
        Self {
            name,
            shape,
            size,
            offset,
            rotation: [0.0; 3],
            surface,
            material,
            uv_scale: [1.0, 1.0],
        }
    }

    pub const fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = [x, y, z];
        self
    }

    pub const fn uv(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = [u, v];
        self
    }

    /// Placement of this part for a compound at `position` built with `scale`.
    ///
    /// Sizes and offsets are multiplied by `scale`. The vertical coordinate of
    /// `position` is given in units of the compound as well, so the part ends up at
    /// `(px + s·dx, s·(py + dy), pz + s·dz)`.
    pub fn transform(&self, position: Vector3<f32>, scale: f32) -> TransformParams {
        let [sx, sy, sz] = self.size;
        let [dx, dy, dz] = self.offset;
        let [rx, ry, rz] = self.rotation;
        TransformParams::new()
            .with_scale(scale * sx, scale * sy, scale * sz)
            .with_rotation(rx, ry, rz)
            .with_translation(
                position.x + scale * dx,
                scale * (position.y + dy),
                position.z + scale * dz,
            )
    }
}

/// Point of a compound at `position` built with `scale` that its part offsets are
/// measured from.
pub fn anchor(position: Vector3<f32>, scale: f32) -> Vector3<f32> {
    Vector3::new(position.x, scale * position.y, position.z)
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompoundObject {
    pub name: &'static str,
    pub parts: Vec<PrimitiveSpec>,
}

impl CompoundObject {
    pub fn new(name: &'static str, parts: Vec<PrimitiveSpec>) -> Self {
        Self { name, parts }
    }

    pub fn part(&self, name: &str) -> Option<&PrimitiveSpec> {
        self.parts.iter().find(|part| part.name == name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error(transparent)]
    Material(#[from] MaterialError),
    #[error("part samples the fill texture but none was given")]
    MissingFill,
}

/// A part that was skipped because its state could not be set.
#[derive(Debug, thiserror::Error)]
#[error("{compound}: part `{part}` was not drawn")]
pub struct SceneError {
    pub compound: &'static str,
    pub part: &'static str,
    #[source]
    pub source: StepError,
}

/// Draw every part of `object`.
///
/// A part whose texture or material cannot be resolved is logged and skipped; the
/// remaining parts are still drawn. Every skipped part is returned.
pub fn build<S, H, M>(
    object: &CompoundObject,
    position: Vector3<f32>,
    scale: f32,
    fill: Option<&str>,
    broadcaster: &mut ShaderStateBroadcaster<'_, S, H>,
    meshes: &mut M,
) -> Vec<SceneError>
where
    S: ShaderProgram + ?Sized,
    M: MeshDrawer<S> + ?Sized,
{
    let mut errors = Vec::new();
    for part in &object.parts {
        if let Err(source) = set_part_state(part, position, scale, fill, broadcaster) {
            let error = SceneError {
                compound: object.name,
                part: part.name,
                source,
            };
            log::error!("{error}: {}", error.source);
            errors.push(error);
            continue;
        }
        match broadcaster.shader() {
            Some(shader) => meshes.draw(part.shape, shader),
            None => log::debug!("{}: no shader program bound, `{}` skipped", object.name, part.name),
        }
    }
    errors
}

fn set_part_state<S, H>(
    part: &PrimitiveSpec,
    position: Vector3<f32>,
    scale: f32,
    fill: Option<&str>,
    broadcaster: &mut ShaderStateBroadcaster<'_, S, H>,
) -> Result<(), StepError>
where
    S: ShaderProgram + ?Sized,
{
    // resolve every tag first: a skipped part writes nothing
    let slot = match part.surface {
        Surface::Texture(TextureTag::Named(tag)) => Some(broadcaster.texture_slot(tag)?),
        Surface::Texture(TextureTag::Fill) => {
            Some(broadcaster.texture_slot(fill.ok_or(StepError::MissingFill)?)?)
        }
        Surface::Color(_) => None,
    };
    let material = *broadcaster.material(part.material)?;

    broadcaster.set_transformations(&part.transform(position, scale));
    broadcaster.set_uv_scale(part.uv_scale[0], part.uv_scale[1]);
    if let Some(slot) = slot {
        broadcaster.set_texture_slot(slot);
    } else if let Surface::Color([r, g, b, a]) = part.surface {
        broadcaster.set_flat_color(r, g, b, a);
    }
    broadcaster.apply_material(&material);
    Ok(())
}
