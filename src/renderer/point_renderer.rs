use glam::Mat4;
use wgpu::util::DeviceExt;

use super::{FrameRenderer, FrameView, GpuContext};
use crate::config::GalaxyConfig;
use crate::error::GalaxyResult;
use crate::input::SurfaceSize;
use crate::particles::{PointCloud, PointInstance, SpriteTexture};

/// Vertices per billboard quad, two triangles
const QUAD_VERTICES: u32 = 6;

const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32,
];

/// Point material shared by every particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMaterial {
    /// Base point size, multiplied by each particle's size attribute
    pub point_size: f32,
    pub opacity: f32,
}

impl PointMaterial {
    pub fn from_config(config: &GalaxyConfig) -> Self {
        Self {
            point_size: config.point_size,
            opacity: config.opacity,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointUniforms {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Physical surface size in pixels
    pub viewport: [f32; 2],
    pub point_size: f32,
    pub opacity: f32,
}

impl PointUniforms {
    pub fn new(view: &FrameView, viewport: SurfaceSize, material: &PointMaterial) -> Self {
        let model_view: Mat4 = view.view * view.model;
        Self {
            model_view: model_view.to_cols_array_2d(),
            projection: view.projection.to_cols_array_2d(),
            viewport: [viewport.width as f32, viewport.height as f32],
            point_size: material.point_size,
            opacity: material.opacity,
        }
    }
}

/// Per-upload GPU resources: the instance buffer and the sprite binding
struct UploadedCloud {
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    bind_group: wgpu::BindGroup,
}

/// Draws the point cloud as additive, depth-attenuated sprites in one
/// instanced draw call
pub struct PointCloudRenderer {
    context: GpuContext,
    material: PointMaterial,
    pixel_ratio: f64,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    sampler: wgpu::Sampler,
    cloud: Option<UploadedCloud>,
}

impl PointCloudRenderer {
    pub fn new(context: GpuContext, material: PointMaterial, pixel_ratio: f64) -> Self {
        let device = &context.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Galaxy Point Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/galaxy.wgsl").into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Galaxy Uniform Buffer"),
            size: std::mem::size_of::<PointUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Galaxy Sprite Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("galaxy_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
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

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Galaxy Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRIBUTES,
        };

        // Additive: overlapping points brighten toward white
        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Galaxy Point Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[instance_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.format(),
                    blend: Some(additive),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            // No depth attachment: points never occlude each other
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: context.sample_count(),
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        log::debug!(
            "[PointCloudRenderer] Pipeline created ({} sample(s), {:?})",
            context.sample_count(),
            context.format()
        );

        Self {
            context,
            material,
            pixel_ratio,
            pipeline,
            bind_group_layout,
            uniform_buffer,
            sampler,
            cloud: None,
        }
    }

    pub fn context(&self) -> &GpuContext {
        &self.context
    }

    pub fn material(&self) -> &PointMaterial {
        &self.material
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.pixel_ratio = pixel_ratio;
    }

    fn upload_sprite(&self, sprite: &SpriteTexture) -> wgpu::TextureView {
        let extent = wgpu::Extent3d {
            width: sprite.size(),
            height: sprite.size(),
            depth_or_array_layers: 1,
        };
        let texture = self.context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Galaxy Sprite Texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.context.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            sprite.pixels(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * sprite.size()),
                rows_per_image: Some(sprite.size()),
            },
            extent,
        );
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }
}

impl FrameRenderer for PointCloudRenderer {
    fn upload(&mut self, cloud: &PointCloud, sprite: &SpriteTexture) -> GalaxyResult<()> {
        let instances = cloud.instances();
        let instance_buffer =
            self.context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Galaxy Instance Buffer"),
                    contents: bytemuck::cast_slice(&instances),
                    usage: wgpu::BufferUsages::VERTEX,
                });

        let sprite_view = self.upload_sprite(sprite);
        let bind_group = self
            .context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("galaxy_bind_group"),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: self.uniform_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(&sprite_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(&self.sampler),
                    },
                ],
            });

        log::info!(
            "[PointCloudRenderer] Uploaded {} points, {}x{} sprite",
            instances.len(),
            sprite.size(),
            sprite.size()
        );

        self.cloud = Some(UploadedCloud {
            instance_buffer,
            instance_count: instances.len() as u32,
            bind_group,
        });
        Ok(())
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.context.resize(size.scaled(self.pixel_ratio));
    }

    fn draw(&mut self, view: &FrameView) -> GalaxyResult<()> {
        let Some(cloud) = self.cloud.as_ref() else {
            return Ok(());
        };

        let uniforms = PointUniforms::new(view, self.context.size(), &self.material);
        self.context
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let frame = self.context.acquire_frame()?;
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (attachment_view, resolve_target) = match self.context.msaa_view() {
            Some(msaa) => (msaa, Some(&frame_view)),
            None => (&frame_view, None),
        };

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Galaxy Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Galaxy Point Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: attachment_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &cloud.bind_group, &[]);
            pass.set_vertex_buffer(0, cloud.instance_buffer.slice(..));
            pass.draw(0..QUAD_VERTICES, 0..cloud.instance_count);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
