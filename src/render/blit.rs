use anyhow::Result;

use crate::effect::frame::FrameBuffer;
use crate::render::shader::{ShaderModulePackage, ShaderTemplateConfiguration};
use crate::render::texture::FrameTexture2DPackage;

/// Copies a [`FrameBuffer`] onto the surface one texel per pixel.
pub struct FrameBlitRenderer {
    device: std::sync::Arc<wgpu::Device>,
    queue: std::sync::Arc<wgpu::Queue>,
    gpu_pipeline: wgpu::RenderPipeline,
    gpu_sampler: wgpu::Sampler,
    bind_group_layout: wgpu::BindGroupLayout,
    frame_texture: Option<FrameTexture2DPackage>,
}

impl FrameBlitRenderer {
    pub fn from_device(
        device: std::sync::Arc<wgpu::Device>,
        queue: std::sync::Arc<wgpu::Queue>,
        format: wgpu::TextureFormat,
        tera: &tera::Tera,
    ) -> Result<Self> {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("FRAME_BLIT_BIND_GROUP_LAYOUT"),
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
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("FRAME_BLIT_RENDER_PIPELINE_LAYOUT"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let shader_module_package = ShaderModulePackage::from_templates(
            "blit/fullscreen.vert",
            "blit/blit.frag",
            "FRAME_BLIT",
            &device,
            tera,
            Some(&ShaderTemplateConfiguration::from_surface_format(format)),
        )?;

        let gpu_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("FRAME_BLIT_RENDER_PIPELINE"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module_package.vertex_shader_module,
                entry_point: "vs_main",
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module_package.fragment_shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent::REPLACE,
                        alpha: wgpu::BlendComponent::REPLACE,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        // Canvas pixels map 1:1 to surface pixels, so no filtering is wanted.
        let gpu_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("FRAME_BLIT_SAMPLER"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            device,
            queue,
            gpu_pipeline,
            gpu_sampler,
            bind_group_layout,
            frame_texture: None,
        })
    }

    pub fn upload_frame(&mut self, frame_buffer: &FrameBuffer) {
        let (width, height) = frame_buffer.dimensions();
        if width == 0 || height == 0 {
            return;
        }

        let needs_texture = match &self.frame_texture {
            Some(frame_texture) => frame_texture.dimensions() != (width, height),
            None => true,
        };
        if needs_texture {
            self.frame_texture = Some(self.create_frame_texture(width, height));
        }

        let frame_texture = match &self.frame_texture {
            Some(frame_texture) => frame_texture,
            None => return,
        };

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &frame_texture.gpu_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            frame_buffer.as_bytes(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    pub fn render_frame(&self, render_pass: &mut wgpu::RenderPass) {
        let frame_texture = match &self.frame_texture {
            Some(frame_texture) => frame_texture,
            None => return,
        };

        render_pass.set_pipeline(&self.gpu_pipeline);
        render_pass.set_bind_group(0, &frame_texture.gpu_bind_group, &[]);
        render_pass.draw(0..3, 0..1);
    }

    fn create_frame_texture(&self, width: u32, height: u32) -> FrameTexture2DPackage {
        log::debug!("Creating frame texture {width}x{height}");

        let gpu_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("FRAME_TEXTURE"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let gpu_texture_view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let gpu_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("FRAME_BLIT_BIND_GROUP"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&gpu_texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.gpu_sampler),
                },
            ],
        });

        FrameTexture2DPackage {
            gpu_texture,
            gpu_texture_view,
            gpu_bind_group,
        }
    }
}
