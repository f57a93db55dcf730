//! Replay of queued draws in a render pass.
//!
//! Every [`DrawCall`] carries its own [`ObjectUniform`]. Before the pass the blocks are
//! packed into one buffer at [`OBJECT_UNIFORM_STRIDE`] intervals; in the pass each draw
//! selects its block with a dynamic offset and its texture unit with the bind group of
//! that unit.

use crate::{
    pipelines::{basic::OBJECT_UNIFORM_STRIDE, uniforms::ObjectUniform},
    resources::{mesh::DrawCall, mesh::ShapeMeshes, texture::GpuTextures},
};

/// Dynamic offset of the `index`-th object block.
pub fn dynamic_offset(index: usize) -> u32 {
    (index as wgpu::BufferAddress * OBJECT_UNIFORM_STRIDE) as u32
}

/// Object blocks of `draws`, each padded to [`OBJECT_UNIFORM_STRIDE`] bytes.
pub fn pack_objects(draws: &[DrawCall]) -> Vec<u8> {
    let stride = OBJECT_UNIFORM_STRIDE as usize;
    let mut bytes = vec![0u8; draws.len() * stride];
    for (chunk, draw) in bytes.chunks_exact_mut(stride).zip(draws) {
        let block = bytemuck::bytes_of(&draw.object);
        chunk[..block.len()].copy_from_slice(block);
    }
    bytes
}

/// GPU buffer holding one object block per draw of the current frame.
pub struct ObjectBuffer {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    capacity: usize,
}

impl ObjectBuffer {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Buffer"),
            size: capacity as wgpu::BufferAddress * OBJECT_UNIFORM_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
                }),
            }],
            label: Some("object_bind_group"),
        });
        Self {
            buffer,
            bind_group,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Upload the blocks of `draws`, growing the buffer when it is too small.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        draws: &[DrawCall],
    ) {
        if draws.len() > self.capacity {
            log::debug!("object buffer grows from {} to {} draws", self.capacity, draws.len());
            *self = Self::new(device, layout, draws.len().next_power_of_two());
        }
        if !draws.is_empty() {
            queue.write_buffer(&self.buffer, 0, &pack_objects(draws));
        }
    }
}

/// Record `draws` into `render_pass`. The scene pipeline and the frame bind group must
/// already be set.
pub fn draw_queued(
    render_pass: &mut wgpu::RenderPass<'_>,
    draws: &[DrawCall],
    objects: &ObjectBuffer,
    meshes: &ShapeMeshes,
    textures: &GpuTextures,
) {
    for (index, draw) in draws.iter().enumerate() {
        let Some(mesh) = meshes.mesh(draw.shape) else {
            log::warn!("{:?} has no mesh, draw skipped", draw.shape);
            continue;
        };
        render_pass.set_bind_group(1, &objects.bind_group, &[dynamic_offset(index)]);
        render_pass.set_bind_group(2, textures.bind_group(draw.object.texture_slot), &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.num_elements, 0, 0..1);
    }
}
