use anyhow::Result;

use crate::effect::frame::FrameBuffer;
use crate::presenter::FramePainter;
use crate::render::state::RenderSystemState;

mod blit;
mod shader;
mod state;
mod texture;

pub struct RenderSystem {
    state: RenderSystemState,
}

impl RenderSystem {
    pub async fn from_window(window: std::sync::Arc<winit::window::Window>) -> Result<Self> {
        let state = RenderSystemState::from_window(window).await?;

        Ok(Self { state })
    }

    pub fn view_dimensions(&self) -> winit::dpi::PhysicalSize<u32> {
        self.state.view_dimensions
    }

    pub fn sync_view_dimensions(&mut self) {
        self.set_view_dimensions(self.state.view_dimensions);
    }

    pub fn set_view_dimensions(&mut self, view_dimensions: winit::dpi::PhysicalSize<u32>) {
        if view_dimensions.width == 0 || view_dimensions.height == 0 {
            self.state.view_dimensions = view_dimensions;
            return;
        }

        self.state.set_view_dimensions(view_dimensions);
    }

    pub fn upload_frame(&mut self, frame_buffer: &FrameBuffer) {
        self.state.frame_blit_renderer.upload_frame(frame_buffer);
    }

    pub fn render(&mut self) -> Result<()> {
        if self.state.view_dimensions.width == 0 || self.state.view_dimensions.height == 0 {
            return Ok(());
        }

        let output = self.state.surface.get_current_texture()?;

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.state
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("RENDER_SYSTEM_COMMAND_ENCODER"),
                });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("RENDER_SYSTEM_RENDER_PASS"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.state.frame_blit_renderer.render_frame(&mut render_pass);
        }

        self.state.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl FramePainter for RenderSystem {
    fn paint(&mut self, frame_buffer: &FrameBuffer) -> Result<()> {
        self.upload_frame(frame_buffer);
        self.render()
    }
}
