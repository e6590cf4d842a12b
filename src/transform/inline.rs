use anyhow::Result;

use crate::transform::{ExecutionMode, FrameSink, Transformer, TransformerCore, TransformerMessage};

/// Runs the transformer on the caller's thread.
pub struct InlineTransformer<S: FrameSink> {
    core: TransformerCore,
    sink: S,
}

impl<S: FrameSink> InlineTransformer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            core: TransformerCore::new(),
            sink,
        }
    }
}

impl<S: FrameSink> Transformer for InlineTransformer<S> {
    fn post(&mut self, message: TransformerMessage) -> Result<()> {
        if let Some(frame_buffer) = self.core.handle(message) {
            self.sink.frame_ready(frame_buffer);
        }

        Ok(())
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Inline
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::effect::frame::FrameBuffer;
    use crate::effect::sample::ImageSample;

    #[test]
    fn replies_synchronously() {
        let (sender, receiver) = std::sync::mpsc::channel();
        let mut transformer = InlineTransformer::new(sender);

        transformer
            .post(TransformerMessage::DataImage(ImageSample::from_rgba_image(
                RgbaImage::from_pixel(3, 2, Rgba([255, 255, 255, 255])),
            )))
            .unwrap();
        assert!(receiver.try_recv().is_err());

        transformer
            .post(TransformerMessage::Running(FrameBuffer::new(3, 2, 9)))
            .unwrap();

        let frame = receiver.try_recv().unwrap();
        assert_eq!(frame.generation(), 9);
        assert!(frame.pixels().iter().all(|pixel| *pixel != 0));
        assert!(receiver.try_recv().is_err());
        assert_eq!(transformer.mode(), ExecutionMode::Inline);
    }
}
