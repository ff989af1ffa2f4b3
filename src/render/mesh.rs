use glam::Mat4;
use wgpu::util::DeviceExt;

use super::helpers;
use crate::core::{ModelCpu, Release};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct DrawUniforms {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) normal: [[f32; 4]; 4],
    pub(crate) base_color: [f32; 4],
}

impl DrawUniforms {
    pub(crate) fn new(model: Mat4, base_color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal: model.inverse().transpose().to_cols_array_2d(),
            base_color,
        }
    }
}

/// One uploaded mesh part.
pub(crate) struct GpuDraw {
    pub(crate) part: usize,
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) base_color: [f32; 4],
}

/// GPU-side copy of a [`ModelCpu`]. Resources stay alive until [`Release::release`].
pub struct GpuModel {
    pub(crate) draws: Vec<GpuDraw>,
    textures: Vec<wgpu::Texture>,
}

pub(crate) struct UploadContext<'r> {
    pub(crate) device: &'r wgpu::Device,
    pub(crate) queue: &'r wgpu::Queue,
    pub(crate) layout: &'r wgpu::BindGroupLayout,
    pub(crate) sampler: &'r wgpu::Sampler,
    pub(crate) white: &'r wgpu::TextureView,
}

impl GpuModel {
    pub(crate) fn upload(ctx: &UploadContext<'_>, cpu: &ModelCpu) -> Self {
        let mut textures = Vec::new();
        let views: Vec<Option<wgpu::TextureView>> = cpu
            .textures
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let t = t.as_ref()?;
                let (tex, view) = helpers::create_rgba_texture(
                    ctx.device,
                    ctx.queue,
                    &format!("base_color_{}", i),
                    t.width,
                    t.height,
                    &t.rgba,
                );
                textures.push(tex);
                Some(view)
            })
            .collect();

        let draws = cpu
            .parts
            .iter()
            .enumerate()
            .filter(|(_, p)| p.indices.len() >= 3)
            .map(|(i, part)| {
                let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("part_vertices"),
                    contents: bytemuck::cast_slice(&part.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let index_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("part_indices"),
                    contents: bytemuck::cast_slice(&part.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                let uniform_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("part_uniforms"),
                    contents: bytemuck::bytes_of(&DrawUniforms::new(Mat4::IDENTITY, part.base_color)),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
                let view = part
                    .texture
                    .and_then(|t| views.get(t).and_then(Option::as_ref))
                    .unwrap_or(ctx.white);
                let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("part_bg"),
                    layout: ctx.layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: uniform_buffer.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::TextureView(view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::Sampler(ctx.sampler),
                        },
                    ],
                });
                GpuDraw {
                    part: i,
                    vertex_buffer,
                    index_buffer,
                    index_count: part.indices.len() as u32,
                    uniform_buffer,
                    bind_group,
                    base_color: part.base_color,
                }
            })
            .collect();

        Self { draws, textures }
    }

    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }
}

impl Release for GpuModel {
    fn release(&mut self) {
        for d in self.draws.drain(..) {
            d.vertex_buffer.destroy();
            d.index_buffer.destroy();
            d.uniform_buffer.destroy();
        }
        for t in self.textures.drain(..) {
            t.destroy();
        }
    }
}
