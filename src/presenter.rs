use anyhow::Result;

use crate::effect::frame::FrameBuffer;
use crate::effect::sample::ImageSample;
use crate::transform::{Transformer, TransformerMessage};

/// Something that can blit a whole frame to the screen.
pub trait FramePainter {
    fn paint(&mut self, frame_buffer: &FrameBuffer) -> Result<()>;
}

/// Owns the animation loop: samples the image on resize and keeps exactly one
/// frame buffer circulating between itself and the transformer.
pub struct Presenter {
    transformer: Box<dyn Transformer>,
    image: Option<image::DynamicImage>,
    canvas_size: (u32, u32),
    generation: u64,
    pending_frame: Option<FrameBuffer>,
}

impl Presenter {
    pub fn new(transformer: Box<dyn Transformer>) -> Self {
        Self {
            transformer,
            image: None,
            canvas_size: (0, 0),
            generation: 0,
            pending_frame: None,
        }
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas_size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn set_image(&mut self, image: image::DynamicImage) -> Result<()> {
        self.image = Some(image);
        self.resize(self.canvas_size)
    }

    /// Resamples the image for the new canvas size and primes the loop with a fresh
    /// buffer. Buffers still in flight from before the resize are discarded on return.
    pub fn resize(&mut self, canvas_size: (u32, u32)) -> Result<()> {
        self.canvas_size = canvas_size;
        self.pending_frame = None;

        let image = match &self.image {
            Some(image) => image,
            None => return Ok(()),
        };

        let (width, height) = canvas_size;
        if width == 0 || height == 0 {
            return Ok(());
        }

        self.generation += 1;
        log::debug!("Resizing to {width}x{height}, generation {}", self.generation);

        let sample = ImageSample::from_image(image, width, height)?;
        self.transformer.post(TransformerMessage::DataImage(sample))?;
        self.transformer.post(TransformerMessage::Running(FrameBuffer::new(
            width,
            height,
            self.generation,
        )))?;

        Ok(())
    }

    /// Accepts a computed frame. Returns `true` when a tick should be scheduled.
    pub fn on_frame_ready(&mut self, frame_buffer: FrameBuffer) -> bool {
        if frame_buffer.generation() != self.generation
            || frame_buffer.dimensions() != self.canvas_size
        {
            log::debug!(
                "Discarding stale frame from generation {} (current {})",
                frame_buffer.generation(),
                self.generation
            );
            return false;
        }

        self.pending_frame = Some(frame_buffer);
        true
    }

    /// Paints the pending frame, if any, and sends it straight back for the next one.
    pub fn tick(&mut self, painter: &mut impl FramePainter) -> Result<bool> {
        let frame_buffer = match self.pending_frame.take() {
            Some(frame_buffer) => frame_buffer,
            None => return Ok(false),
        };

        let painted = painter.paint(&frame_buffer);
        self.transformer
            .post(TransformerMessage::Running(frame_buffer))?;
        painted?;

        Ok(true)
    }
}
