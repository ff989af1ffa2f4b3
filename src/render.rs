use crate::core::{
    ModelCpu, SceneParams, FILL_LIGHT_1_POSITION, FILL_LIGHT_2_POSITION, MAIN_LIGHT_POSITION,
};
use glam::{Mat4, Vec3};
use web_sys as web;

mod helpers;
mod mesh;

pub use mesh::GpuModel;
use mesh::{DrawUniforms, UploadContext};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    light_dir: [[f32; 4]; 3],
    light_color: [[f32; 4]; 3],
}

impl SceneUniforms {
    fn new(view_proj: Mat4, eye: Vec3, params: &SceneParams) -> Self {
        let dir = |p: [f32; 3]| Vec3::from(p).normalize().extend(0.0).to_array();
        let white = |intensity: f32| [1.0, 1.0, 1.0, intensity];
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: eye.extend(1.0).to_array(),
            ambient: white(params.ambient),
            light_dir: [
                dir(MAIN_LIGHT_POSITION),
                dir(FILL_LIGHT_1_POSITION),
                dir(FILL_LIGHT_2_POSITION),
            ],
            light_color: [
                white(params.main_light),
                white(params.fill_light_1),
                white(params.fill_light_2),
            ],
        }
    }
}

/// Per-frame inputs for [`GpuState::render`].
pub struct FrameView<'m> {
    pub view_proj: Mat4,
    pub eye: Vec3,
    /// Uploaded model with one world matrix per CPU mesh part.
    pub model: Option<(&'m GpuModel, &'m [Mat4])>,
    /// Unlit backdrop drawn before the model.
    pub backdrop: Option<(&'m GpuModel, &'m [Mat4])>,
}

fn write_draw_uniforms(queue: &wgpu::Queue, model: &GpuModel, matrices: &[Mat4]) {
    for d in &model.draws {
        let m = matrices.get(d.part).copied().unwrap_or(Mat4::IDENTITY);
        queue.write_buffer(
            &d.uniform_buffer,
            0,
            bytemuck::bytes_of(&DrawUniforms::new(m, d.base_color)),
        );
    }
}

fn draw_model(rpass: &mut wgpu::RenderPass<'_>, model: &GpuModel) {
    for d in &model.draws {
        rpass.set_bind_group(1, &d.bind_group, &[]);
        rpass.set_vertex_buffer(0, d.vertex_buffer.slice(..));
        rpass.set_index_buffer(d.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..d.index_count, 0, 0..1);
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    pipeline: wgpu::RenderPipeline,
    unlit_pipeline: wgpu::RenderPipeline,
    scene_buffer: wgpu::Buffer,
    scene_bg: wgpu::BindGroup,
    draw_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    // 1x1 white fallback for untextured parts
    _white_tex: wgpu::Texture,
    white_view: wgpu::TextureView,
    depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
    msaa_tex: wgpu::Texture,
    msaa_view: wgpu::TextureView,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bgl"),
            entries: &[
                helpers::uniform_layout_entry(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&scene_bgl, &draw_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_scene_pipeline(&device, &layout, &shader, format, "fs_main");
        let unlit_pipeline =
            helpers::make_scene_pipeline(&device, &layout, &shader, format, "fs_unlit");

        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("base_color_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let (white_tex, white_view) =
            helpers::create_rgba_texture(&device, &queue, "white", 1, 1, &[255, 255, 255, 255]);
        let (depth_tex, depth_view) = helpers::create_depth_texture(&device, width, height);
        let (msaa_tex, msaa_view) = helpers::create_msaa_texture(&device, format, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            unlit_pipeline,
            scene_buffer,
            scene_bg,
            draw_bgl,
            sampler,
            _white_tex: white_tex,
            white_view,
            depth_tex,
            depth_view,
            msaa_tex,
            msaa_view,
            width,
            height,
            clear_color: wgpu::Color::BLACK,
        })
    }

    /// Set the clear color from linear RGB.
    pub fn set_background(&mut self, rgb: [f32; 3]) {
        self.clear_color = wgpu::Color {
            r: rgb[0] as f64,
            g: rgb[1] as f64,
            b: rgb[2] as f64,
            a: 1.0,
        };
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_tex.destroy();
            (self.depth_tex, self.depth_view) =
                helpers::create_depth_texture(&self.device, width, height);
            self.msaa_tex.destroy();
            (self.msaa_tex, self.msaa_view) =
                helpers::create_msaa_texture(&self.device, self.config.format, width, height);
        }
    }

    pub fn upload_model(&self, cpu: &ModelCpu) -> GpuModel {
        GpuModel::upload(
            &UploadContext {
                device: &self.device,
                queue: &self.queue,
                layout: &self.draw_bgl,
                sampler: &self.sampler,
                white: &self.white_view,
            },
            cpu,
        )
    }

    pub fn render(&mut self, view: &FrameView<'_>, params: &SceneParams) -> Result<(), wgpu::SurfaceError> {
        let scene = SceneUniforms::new(view.view_proj, view.eye, params);
        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&scene));
        for (model, matrices) in view.backdrop.iter().chain(view.model.iter()) {
            write_draw_uniforms(&self.queue, model, matrices);
        }

        let frame = self.surface.get_current_texture()?;
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa_view,
                    resolve_target: Some(&target),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some((backdrop, _)) = view.backdrop {
                rpass.set_pipeline(&self.unlit_pipeline);
                rpass.set_bind_group(0, &self.scene_bg, &[]);
                draw_model(&mut rpass, backdrop);
            }
            if let Some((model, _)) = view.model {
                rpass.set_pipeline(&self.pipeline);
                rpass.set_bind_group(0, &self.scene_bg, &[]);
                draw_model(&mut rpass, model);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
