//! The five primitive shapes the scene is built from and their CPU-side geometry.
//!
//! All shapes are unit-sized in their local frame so that the model matrix alone decides
//! their final dimensions:
//!
//! - `Plane` spans -1..1 on X and Z at y = 0, facing +Y
//! - `Box` is the cube -0.5..0.5 on every axis
//! - `Cylinder` has radius 1 and stands on y = 0 up to y = 1, capped at both ends
//! - `TaperedCylinder` narrows from radius 1 at y = 0 to radius 0.5 at y = 1
//! - `Torus` lies in the XY plane around the Z axis with a ring radius of 1

use std::f32::consts::TAU;

/// Number of quads around the circumference of (tapered) cylinders.
pub const CYLINDER_SEGMENTS: u32 = 36;
pub const TORUS_MAIN_SEGMENTS: u32 = 36;
pub const TORUS_TUBE_SEGMENTS: u32 = 18;
pub const TORUS_TUBE_RADIUS: f32 = 0.1;
pub const TAPERED_TOP_RADIUS: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Plane,
    Box,
    Cylinder,
    TaperedCylinder,
    Torus,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Plane,
        Shape::Box,
        Shape::Cylinder,
        Shape::TaperedCylinder,
        Shape::Torus,
    ];

    pub fn geometry(self) -> Geometry {
        match self {
            Shape::Plane => plane(),
            Shape::Box => cube(),
            Shape::Cylinder => lathe(1.0, 1.0, CYLINDER_SEGMENTS),
            Shape::TaperedCylinder => lathe(1.0, TAPERED_TOP_RADIUS, CYLINDER_SEGMENTS),
            Shape::Torus => torus(TORUS_TUBE_RADIUS, TORUS_MAIN_SEGMENTS, TORUS_TUBE_SEGMENTS),
        }
    }
}

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Indexed triangle list.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    fn push(&mut self, position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> u32 {
        self.vertices.push(ModelVertex {
            position,
            normal,
            tex_coords,
        });
        self.vertices.len() as u32 - 1
    }

    /// Quad centred on `center` spanning `half` along `u` and `v`. `u × v` must equal
    /// `normal` for the triangles to wind counter-clockwise when seen from the front.
    fn quad(&mut self, center: [f32; 3], normal: [f32; 3], u: [f32; 3], v: [f32; 3], half: f32) {
        let corner = |su: f32, sv: f32| {
            [
                center[0] + half * (su * u[0] + sv * v[0]),
                center[1] + half * (su * u[1] + sv * v[1]),
                center[2] + half * (su * u[2] + sv * v[2]),
            ]
        };
        let a = self.push(corner(-1.0, -1.0), normal, [0.0, 0.0]);
        let b = self.push(corner(1.0, -1.0), normal, [1.0, 0.0]);
        let c = self.push(corner(1.0, 1.0), normal, [1.0, 1.0]);
        let d = self.push(corner(-1.0, 1.0), normal, [0.0, 1.0]);
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

fn plane() -> Geometry {
    let mut geometry = Geometry::default();
    geometry.quad(
        [0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 0.0, -1.0],
        1.0,
    );
    geometry
}

fn cube() -> Geometry {
    // (normal, u, v) per face with u × v = normal
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    let mut geometry = Geometry::default();
    for (normal, u, v) in FACES {
        let center = [normal[0] * 0.5, normal[1] * 0.5, normal[2] * 0.5];
        geometry.quad(center, normal, u, v, 0.5);
    }
    geometry
}

/// Surface of revolution around +Y from `bottom_radius` at y = 0 to `top_radius` at
/// y = 1, closed with a cap at each end.
fn lathe(bottom_radius: f32, top_radius: f32, segments: u32) -> Geometry {
    let segments = segments.max(3);
    let mut geometry = Geometry::default();
    let slope = bottom_radius - top_radius;

    let first_side = geometry.vertices.len() as u32;
    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let (sin, cos) = (u * TAU).sin_cos();
        let len = (cos * cos + slope * slope + sin * sin).sqrt();
        let normal = [cos / len, slope / len, sin / len];
        geometry.push([bottom_radius * cos, 0.0, bottom_radius * sin], normal, [u, 0.0]);
        geometry.push([top_radius * cos, 1.0, top_radius * sin], normal, [u, 1.0]);
    }
    for i in 0..segments {
        let bottom = first_side + 2 * i;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;
        geometry
            .indices
            .extend_from_slice(&[bottom, top, next_bottom, next_bottom, top, next_top]);
    }

    for (y, radius, normal_y) in [(0.0, bottom_radius, -1.0), (1.0, top_radius, 1.0)] {
        let normal = [0.0, normal_y, 0.0];
        let center = geometry.push([0.0, y, 0.0], normal, [0.5, 0.5]);
        let ring = geometry.vertices.len() as u32;
        for i in 0..=segments {
            let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
            geometry.push(
                [radius * cos, y, radius * sin],
                normal,
                [0.5 + 0.5 * cos, 0.5 + 0.5 * sin],
            );
        }
        for i in 0..segments {
            let (current, next) = (ring + i, ring + i + 1);
            if normal_y > 0.0 {
                geometry.indices.extend_from_slice(&[center, next, current]);
            } else {
                geometry.indices.extend_from_slice(&[center, current, next]);
            }
        }
    }
    geometry
}

fn torus(tube_radius: f32, main_segments: u32, tube_segments: u32) -> Geometry {
    let main_segments = main_segments.max(3);
    let tube_segments = tube_segments.max(3);
    let mut geometry = Geometry::default();

    for i in 0..=main_segments {
        let u = i as f32 / main_segments as f32;
        let (sin_theta, cos_theta) = (u * TAU).sin_cos();
        for j in 0..=tube_segments {
            let v = j as f32 / tube_segments as f32;
            let (sin_phi, cos_phi) = (v * TAU).sin_cos();
            let normal = [cos_phi * cos_theta, cos_phi * sin_theta, sin_phi];
            let position = [
                cos_theta + tube_radius * normal[0],
                sin_theta + tube_radius * normal[1],
                tube_radius * normal[2],
            ];
            geometry.push(position, normal, [u, v]);
        }
    }

    let row = tube_segments + 1;
    for i in 0..main_segments {
        for j in 0..tube_segments {
            let a = i * row + j;
            let b = a + row;
            geometry
                .indices
                .extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    geometry
}
