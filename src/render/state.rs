use anyhow::Result;

use crate::error::Error;
use crate::render::blit::FrameBlitRenderer;
use crate::render::shader::ShaderModulePackage;

pub struct RenderSystemState {
    #[allow(dead_code)]
    pub instance: wgpu::Instance,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    #[allow(dead_code)]
    pub adapter: wgpu::Adapter,
    pub device: std::sync::Arc<wgpu::Device>,
    pub queue: std::sync::Arc<wgpu::Queue>,
    pub frame_blit_renderer: FrameBlitRenderer,
    pub view_dimensions: winit::dpi::PhysicalSize<u32>,
}

impl RenderSystemState {
    pub async fn from_window(window: std::sync::Arc<winit::window::Window>) -> Result<Self> {
        let view_dimensions = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::BROWSER_WEBGPU,
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Some(adapter) => adapter,
            None => return Err(Error::new(String::from("Failed to retrieve adapter.")).into()),
        };

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: if cfg!(target_arch = "wasm32") {
                        wgpu::Limits::downlevel_webgl2_defaults()
                    } else {
                        wgpu::Limits::default()
                    },
                    label: None,
                    ..Default::default()
                },
                None,
            )
            .await?;

        let device = std::sync::Arc::new(device);
        let queue = std::sync::Arc::new(queue);

        let surface_caps = surface.get_capabilities(&adapter);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: view_dimensions.width.max(1),
            height: view_dimensions.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        let tera = ShaderModulePackage::load_templates()?;

        let frame_blit_renderer =
            FrameBlitRenderer::from_device(device.clone(), queue.clone(), surface_format, &tera)?;

        Ok(Self {
            instance,
            surface,
            surface_config,
            adapter,
            device,
            queue,
            frame_blit_renderer,
            view_dimensions,
        })
    }

    pub fn set_view_dimensions(&mut self, view_dimensions: winit::dpi::PhysicalSize<u32>) {
        self.view_dimensions = view_dimensions;
        self.surface_config.width = view_dimensions.width;
        self.surface_config.height = view_dimensions.height;
        self.surface.configure(&self.device, &self.surface_config);
    }
}
