use std::collections::HashMap;

use wgpu::util::DeviceExt;

use crate::{
    data_structures::shapes::{Geometry, Shape},
    pipelines::uniforms::{ObjectUniform, UniformState},
};

/// Draws primitive shapes with whatever state `shader` currently holds.
pub trait MeshDrawer<S: ?Sized> {
    /// Make `shape` drawable. Loading a shape twice is a no-op.
    fn load(&mut self, shape: Shape);

    fn draw(&mut self, shape: Shape, shader: &S);

    fn load_all(&mut self) {
        for shape in Shape::ALL {
            self.load(shape);
        }
    }
}

#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, label: &str, geometry: &Geometry) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            num_elements: geometry.indices.len() as u32,
        }
    }
}

/// A queued draw together with the object uniform it was issued with.
#[derive(Clone, Copy, Debug)]
pub struct DrawCall {
    pub shape: Shape,
    pub object: ObjectUniform,
}

/// GPU meshes of the five primitive shapes.
///
/// Drawing does not touch the GPU directly: every draw is queued with a copy of the
/// object uniform and replayed by the frame's render pass.
pub struct ShapeMeshes {
    device: wgpu::Device,
    meshes: HashMap<Shape, GpuMesh>,
    draws: Vec<DrawCall>,
}

impl ShapeMeshes {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            device: device.clone(),
            meshes: HashMap::new(),
            draws: Vec::new(),
        }
    }

    pub fn mesh(&self, shape: Shape) -> Option<&GpuMesh> {
        self.meshes.get(&shape)
    }

    /// Draws queued since the last call, in issue order.
    pub fn take_draws(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.draws)
    }
}

impl MeshDrawer<UniformState> for ShapeMeshes {
    fn load(&mut self, shape: Shape) {
        if self.meshes.contains_key(&shape) {
            return;
        }
        let geometry = shape.geometry();
        log::debug!(
            "uploading {shape:?}: {} vertices, {} triangles",
            geometry.vertices.len(),
            geometry.triangle_count()
        );
        let mesh = GpuMesh::upload(&self.device, &format!("{shape:?}"), &geometry);
        self.meshes.insert(shape, mesh);
    }

    fn draw(&mut self, shape: Shape, shader: &UniformState) {
        if !self.meshes.contains_key(&shape) {
            log::warn!("{shape:?} was drawn before it was loaded");
            self.load(shape);
        }
        self.draws.push(DrawCall {
            shape,
            object: shader.object,
        });
    }
}
