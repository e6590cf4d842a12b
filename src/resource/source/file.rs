use std::path::PathBuf;

use anyhow::Result;

pub struct FileSystemImageSource {
    path: PathBuf,
}

impl FileSystemImageSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<image::DynamicImage> {
        if !self.path.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("The given path is not a file: {}", self.path.display()),
            )
            .into());
        }

        let image = image::open(&self.path)?;
        log::info!(
            "Loaded image {} ({}x{})",
            self.path.display(),
            image.width(),
            image.height()
        );

        Ok(image)
    }
}
