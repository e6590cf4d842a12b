use anyhow::Result;
use wasm_bindgen::JsCast;

use crate::error::Error;

pub struct HttpImageSource {
    url: String,
}

impl HttpImageSource {
    pub fn new(url: String) -> Self {
        Self { url }
    }

    pub async fn load(&self) -> Result<image::DynamicImage> {
        let window = web_sys::window()
            .ok_or_else(|| Error::new(String::from("No window available")))?;

        let response = wasm_bindgen_futures::JsFuture::from(window.fetch_with_str(&self.url))
            .await
            .map_err(|error| Error::new(format!("{error:?}")))?
            .dyn_into::<web_sys::Response>()
            .map_err(|error| Error::new(format!("{error:?}")))?;

        if !response.ok() {
            return Err(Error::new(format!("HTTP status {}", response.status())).into());
        }

        let buffer = response
            .array_buffer()
            .map_err(|error| Error::new(format!("{error:?}")))?;
        let buffer = wasm_bindgen_futures::JsFuture::from(buffer)
            .await
            .map_err(|error| Error::new(format!("{error:?}")))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

        let image = image::load_from_memory(&bytes)?;
        log::info!("Loaded image {} ({}x{})", self.url, image.width(), image.height());

        Ok(image)
    }
}
