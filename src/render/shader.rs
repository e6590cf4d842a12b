use anyhow::Result;

const SHADER_TEMPLATES: [(&str, &str); 2] = [
    (
        "blit/fullscreen.vert",
        include_str!("../../shaders/blit/fullscreen.vert"),
    ),
    ("blit/blit.frag", include_str!("../../shaders/blit/blit.frag")),
];

pub struct ShaderModulePackage {
    pub vertex_shader_module: wgpu::ShaderModule,
    pub fragment_shader_module: wgpu::ShaderModule,
}

impl ShaderModulePackage {
    /// Shader templates are compiled into the binary so the web build needs no file access.
    pub fn load_templates() -> Result<tera::Tera> {
        let mut tera = tera::Tera::default();
        tera.add_raw_templates(SHADER_TEMPLATES)?;
        Ok(tera)
    }

    pub fn from_templates(
        vertex_template_name: &str,
        fragment_template_name: &str,
        name: &str,
        device: &wgpu::Device,
        tera: &tera::Tera,
        shader_template_config: Option<&ShaderTemplateConfiguration>,
    ) -> Result<Self> {
        let shader_template_context = match shader_template_config {
            Some(shader_template_config) => tera::Context::from_serialize(shader_template_config)?,
            None => tera::Context::new(),
        };

        let vertex_shader_source = ShaderModulePackage::render_shader(
            vertex_template_name,
            tera,
            &shader_template_context,
        )?;

        let fragment_shader_source = ShaderModulePackage::render_shader(
            fragment_template_name,
            tera,
            &shader_template_context,
        )?;

        if shader_template_config.is_some() {
            log::debug!(
                "Creating shader module package {name} from config: {:?}",
                shader_template_config
            );
        } else {
            log::debug!("Creating shader module package {name}");
        }

        Ok(ShaderModulePackage {
            vertex_shader_module: device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{}_VERTEX_SHADER_MODULE", name)),
                source: wgpu::ShaderSource::Wgsl(vertex_shader_source.into()),
            }),
            fragment_shader_module: device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{}_FRAGMENT_SHADER_MODULE", name)),
                source: wgpu::ShaderSource::Wgsl(fragment_shader_source.into()),
            }),
        })
    }

    fn render_shader(
        template_name: &str,
        tera: &tera::Tera,
        template_context: &tera::Context,
    ) -> Result<String> {
        match tera.render(template_name, template_context) {
            Ok(shader_source) => Ok(shader_source),
            Err(error) => Err(error.into()),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub struct ShaderTemplateConfiguration {
    /// The surface stores raw values, so the fragment stage encodes to sRGB itself.
    pub encode_srgb: bool,
}

impl ShaderTemplateConfiguration {
    pub fn from_surface_format(format: wgpu::TextureFormat) -> Self {
        Self {
            encode_srgb: !format.is_srgb(),
        }
    }
}
