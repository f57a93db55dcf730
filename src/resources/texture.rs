use crate::{
    data_structures::texture::{PixelLayout, Texture},
    registry::texture::{MAX_TEXTURE_UNITS, TextureBackend},
    resources::image::DecodedImage,
};

/// Layout of group 2 of the scene pipeline: the texture of one unit and its sampler.
pub fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("texture_unit_bind_group_layout"),
    })
}

fn mk_unit_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &Texture,
    sampler: &wgpu::Sampler,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(texture.sampler.as_ref().unwrap_or(sampler)),
            },
        ],
        label: Some(label),
    })
}

struct BoundUnit {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// WGPU texture units.
///
/// Each unit is a bind group for group 2 of the scene pipeline. A draw selects its unit
/// through the `objectTexture` uniform; units without a texture fall back to a 1x1
/// white texture.
pub struct GpuTextures {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    units: Vec<Option<BoundUnit>>,
    fallback: wgpu::BindGroup,
}

impl GpuTextures {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = texture_layout(device);
        let sampler = crate::data_structures::texture::create_default_sampler(device);
        let white = Texture::create_solid(device, queue, [u8::MAX; 4], "fallback texture");
        let fallback = mk_unit_bind_group(device, &layout, &white, &sampler, "fallback unit");
        Self {
            device: device.clone(),
            queue: queue.clone(),
            layout,
            sampler,
            units: Vec::new(),
            fallback,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// The bind group for `unit`, or the fallback when nothing is bound there.
    pub fn bind_group(&self, unit: u32) -> &wgpu::BindGroup {
        self.units
            .get(unit as usize)
            .and_then(Option::as_ref)
            .map_or(&self.fallback, |bound| &bound.bind_group)
    }

    pub fn bound_units(&self) -> usize {
        self.units.iter().filter(|unit| unit.is_some()).count()
    }
}

impl TextureBackend for GpuTextures {
    type Handle = Texture;

    fn create(
        &mut self,
        label: &str,
        image: &DecodedImage,
        layout: PixelLayout,
    ) -> anyhow::Result<Texture> {
        Texture::from_decoded(&self.device, &self.queue, image, layout, label)
    }

    fn bind(&mut self, unit: u32, handle: &Texture) {
        let unit = unit as usize;
        if unit >= MAX_TEXTURE_UNITS {
            log::error!("texture unit {unit} is out of range");
            return;
        }
        if self.units.len() <= unit {
            self.units.resize_with(unit + 1, || None);
        }
        let bind_group = mk_unit_bind_group(
            &self.device,
            &self.layout,
            handle,
            &self.sampler,
            &format!("texture unit {unit}"),
        );
        self.units[unit] = Some(BoundUnit {
            texture: handle.texture.clone(),
            bind_group,
        });
    }

    fn release(&mut self, handle: Texture) {
        for unit in self.units.iter_mut() {
            if unit.as_ref().is_some_and(|bound| bound.texture == handle.texture) {
                *unit = None;
            }
        }
        handle.texture.destroy();
    }
}
