pub struct FrameTexture2DPackage {
    pub gpu_texture: wgpu::Texture,
    #[allow(dead_code)]
    pub gpu_texture_view: wgpu::TextureView,
    pub gpu_bind_group: wgpu::BindGroup,
}

impl FrameTexture2DPackage {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.gpu_texture.width(), self.gpu_texture.height())
    }
}
