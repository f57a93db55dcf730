//! Fixed scene illumination: one directional light and up to three point lights.
//!
//! These are constants written once into the shader while the scene is prepared. There
//! is no runtime light management.

use cgmath::Vector3;

/// Number of point-light slots the scene shader declares.
pub const MAX_POINT_LIGHTS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub active: bool,
}

impl PointLight {
    /// An active point light at `position` with grey ambient/diffuse/specular levels.
    pub fn grey(position: [f32; 3], ambient: f32, diffuse: f32, specular: f32) -> Self {
        Self {
            position: position.into(),
            ambient: Vector3::new(ambient, ambient, ambient),
            diffuse: Vector3::new(diffuse, diffuse, diffuse),
            specular: Vector3::new(specular, specular, specular),
            active: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightSetup {
    pub directional: DirectionalLight,
    pub points: Vec<PointLight>,
}

impl LightSetup {
    /// The kitchen lighting: reddish daylight through curtains plus three lamps above
    /// the shelf.
    pub fn kitchen() -> Self {
        let directional = DirectionalLight {
            direction: Vector3::new(-0.05, -0.3, -0.1),
            ambient: Vector3::new(0.07, 0.05, 0.05),
            diffuse: Vector3::new(0.8, 0.6, 0.6),
            specular: Vector3::new(1.0, 0.8, 0.8),
            active: true,
        };
        let points = vec![
            PointLight::grey([3.0, 2.0, 2.0], 0.1, 0.15, 0.35),
            PointLight::grey([-3.0, 2.0, 2.0], 0.1, 0.15, 0.35),
            PointLight::grey([0.0, 2.0, 2.0], 0.2, 0.5, 0.9),
        ];
        Self {
            directional,
            points,
        }
    }
}

impl Default for LightSetup {
    fn default() -> Self {
        Self::kitchen()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LightError {
    #[error("{0} point lights configured, the scene shader supports at most {max}", max = MAX_POINT_LIGHTS)]
    TooManyPointLights(usize),
}
