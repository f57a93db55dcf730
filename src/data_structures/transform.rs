//! Placement of a single primitive in world space.
//!
//! [`TransformParams`] is the transient per-draw description of where a primitive goes:
//! a non-uniform scale, one rotation per axis in degrees and a translation. It is turned
//! into the model matrix by [`compose`].

use cgmath::{Deg, Matrix4, Vector3};

/// Scale, per-axis rotation (degrees) and translation of one draw call.
///
/// Rotations are applied independently per axis, never as a combined quaternion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformParams {
    pub scale: Vector3<f32>,
    pub rotation_degrees: Vector3<f32>,
    pub translation: Vector3<f32>,
}

impl TransformParams {
    /// Identity placement: unit scale, no rotation, at the origin.
    pub fn new() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation_degrees: Vector3::new(0.0, 0.0, 0.0),
            translation: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation_degrees = Vector3::new(x, y, z);
        self
    }

    pub fn with_translation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translation = Vector3::new(x, y, z);
        self
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        compose(
            self.scale,
            self.rotation_degrees.x,
            self.rotation_degrees.y,
            self.rotation_degrees.z,
            self.translation,
        )
    }
}

impl Default for TransformParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the model matrix `T · Rz · Ry · Rx · S`.
///
/// The primitive is scaled first, then rotated about X, then Y, then Z, and finally
/// translated. The order is fixed: any two non-zero rotations give a different result
/// when swapped.
pub fn compose(
    scale: Vector3<f32>,
    x_rotation_degrees: f32,
    y_rotation_degrees: f32,
    z_rotation_degrees: f32,
    translation: Vector3<f32>,
) -> Matrix4<f32> {
    let scale = Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
    let rotation_x = Matrix4::from_angle_x(Deg(x_rotation_degrees));
    let rotation_y = Matrix4::from_angle_y(Deg(y_rotation_degrees));
    let rotation_z = Matrix4::from_angle_z(Deg(z_rotation_degrees));
    let translation = Matrix4::from_translation(translation);

    translation * rotation_z * rotation_y * rotation_x * scale
}
