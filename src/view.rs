use anyhow::Result;

use crate::render::RenderSystem;

pub struct ViewSystem {
    pub window: std::sync::Arc<winit::window::Window>,
    pub render_system: RenderSystem,
}

impl ViewSystem {
    pub async fn from_window(window: winit::window::Window) -> Result<Self> {
        let window = std::sync::Arc::new(window);

        let render_system = RenderSystem::from_window(window.clone()).await?;

        Ok(Self {
            window,
            render_system,
        })
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        let view_dimensions = self.render_system.view_dimensions();
        (view_dimensions.width, view_dimensions.height)
    }
}
