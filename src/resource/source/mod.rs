use anyhow::Result;

use crate::error::Error;

pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ImageSourceLocation {
    Path(std::path::PathBuf),
    Url(String),
}

impl std::fmt::Display for ImageSourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSourceLocation::Path(path) => write!(f, "{}", path.display()),
            ImageSourceLocation::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Loads and decodes the source image. Every failure is reported as
/// [`Error::ImageLoadFailure`].
pub async fn load_image(location: &ImageSourceLocation) -> Result<image::DynamicImage> {
    let result = match location {
        ImageSourceLocation::Path(path) => file::FileSystemImageSource::new(path.clone()).load(),
        ImageSourceLocation::Url(url) => load_url(url).await,
    };

    match result {
        Ok(image) => Ok(image),
        Err(error) => Err(Error::image_load_failure(location, error).into()),
    }
}

#[cfg(target_arch = "wasm32")]
async fn load_url(url: &str) -> Result<image::DynamicImage> {
    web::HttpImageSource::new(String::from(url)).load().await
}

#[cfg(not(target_arch = "wasm32"))]
async fn load_url(_url: &str) -> Result<image::DynamicImage> {
    Err(Error::new(String::from("Remote images are only supported in the web build")).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_image_load_failure() {
        let location = ImageSourceLocation::Path(std::path::PathBuf::from("does/not/exist.png"));

        let error = pollster::block_on(load_image(&location)).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::ImageLoadFailure { location, .. }) if location == "does/not/exist.png"
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn urls_need_the_web_build() {
        let location = ImageSourceLocation::Url(String::from("https://example.com/image.png"));

        assert!(pollster::block_on(load_image(&location)).is_err());
    }

    #[test]
    fn decodes_an_image_file() {
        let path = std::env::temp_dir()
            .join(format!("ticker_dither_source_{}.png", std::process::id()));
        image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let loaded = pollster::block_on(load_image(&ImageSourceLocation::Path(path.clone())));
        std::fs::remove_file(&path).ok();

        let loaded = loaded.unwrap();
        assert_eq!((loaded.width(), loaded.height()), (3, 2));
    }
}
