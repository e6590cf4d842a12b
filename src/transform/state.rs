use crate::effect::clock::Clock;
use crate::effect::frame::FrameBuffer;
use crate::effect::sample::ImageSample;
use crate::effect::threshold;
use crate::error::Error;
use crate::transform::TransformerMessage;

enum TransformerState {
    Uninitialized,
    Ready(ImageSample),
}

/// Message handling shared by the inline and threaded transformers.
pub struct TransformerCore {
    state: TransformerState,
    clock: Clock,
}

impl TransformerCore {
    pub fn new() -> Self {
        Self {
            state: TransformerState::Uninitialized,
            clock: Clock::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, TransformerState::Ready(_))
    }

    pub fn handle(&mut self, message: TransformerMessage) -> Option<FrameBuffer> {
        let now_ms = self.clock.now_ms();
        self.handle_at(message, now_ms)
    }

    /// Handles one message as if the clock read `now_ms`. Every `Running` message yields
    /// its buffer back; it is left untouched when no frame could be computed.
    pub fn handle_at(&mut self, message: TransformerMessage, now_ms: f64) -> Option<FrameBuffer> {
        match message {
            TransformerMessage::DataImage(sample) => {
                log::debug!("Transformer received image sample {:?}", sample.dimensions());
                self.state = TransformerState::Ready(sample);
                None
            }
            TransformerMessage::Running(mut frame_buffer) => {
                match &self.state {
                    TransformerState::Uninitialized => {
                        log::warn!("{}", Error::TransformerNotReady);
                    }
                    TransformerState::Ready(sample) => {
                        if let Err(error) =
                            threshold::render_frame(sample, &mut frame_buffer, now_ms)
                        {
                            log::debug!("Returning frame unchanged: {error}");
                        }
                    }
                }

                Some(frame_buffer)
            }
        }
    }
}

impl Default for TransformerCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::effect::frame::{BRIGHT, DARK};

    fn sample(width: u32, height: u32) -> ImageSample {
        ImageSample::from_rgba_image(RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])))
    }

    #[test]
    fn running_before_data_image_returns_untouched_buffer() {
        let mut core = TransformerCore::new();

        let frame = core
            .handle_at(TransformerMessage::Running(FrameBuffer::new(2, 2, 3)), 0.0)
            .unwrap();

        assert!(!core.is_ready());
        assert_eq!(frame.generation(), 3);
        assert!(frame.pixels().iter().all(|pixel| *pixel == 0));
    }

    #[test]
    fn data_image_produces_no_reply() {
        let mut core = TransformerCore::new();

        assert!(core
            .handle_at(TransformerMessage::DataImage(sample(2, 2)), 0.0)
            .is_none());
        assert!(core.is_ready());
    }

    #[test]
    fn every_running_message_gets_one_reply() {
        let mut core = TransformerCore::new();
        core.handle_at(TransformerMessage::DataImage(sample(4, 1)), 0.0);

        let mut frame = FrameBuffer::new(4, 1, 1);
        for _ in 0..3 {
            frame = core
                .handle_at(TransformerMessage::Running(frame), 1500.0)
                .unwrap();
            assert_eq!(frame.row(0).unwrap(), &[BRIGHT, BRIGHT, DARK, DARK]);
        }
    }

    #[test]
    fn stale_sized_frame_is_returned_untouched() {
        let mut core = TransformerCore::new();
        core.handle_at(TransformerMessage::DataImage(sample(4, 4)), 0.0);

        let frame = core
            .handle_at(TransformerMessage::Running(FrameBuffer::new(2, 2, 0)), 0.0)
            .unwrap();

        assert_eq!(frame.dimensions(), (2, 2));
        assert!(frame.pixels().iter().all(|pixel| *pixel == 0));
    }

    #[test]
    fn new_data_image_replaces_the_sample() {
        let mut core = TransformerCore::new();
        core.handle_at(TransformerMessage::DataImage(sample(2, 2)), 0.0);
        core.handle_at(TransformerMessage::DataImage(sample(3, 1)), 0.0);

        let frame = core
            .handle_at(TransformerMessage::Running(FrameBuffer::new(3, 1, 0)), 1500.0)
            .unwrap();

        assert_eq!(frame.row(0).unwrap(), &[BRIGHT, BRIGHT, DARK]);
    }
}
