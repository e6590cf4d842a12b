use anyhow::Result;

use crate::effect::frame::FrameBuffer;
use crate::effect::sample::ImageSample;
use crate::error::Error;

pub mod inline;
pub mod state;
pub mod thread;

pub use self::inline::InlineTransformer;
pub use self::state::TransformerCore;
pub use self::thread::ThreadedTransformer;

pub enum TransformerMessage {
    /// Static brightness source, sent once per resize.
    DataImage(ImageSample),
    /// Frame to compute, sent once per tick. Answered through the [`FrameSink`].
    Running(FrameBuffer),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecutionMode {
    Background,
    Inline,
}

/// Receives computed frames from a transformer.
pub trait FrameSink {
    fn frame_ready(&self, frame_buffer: FrameBuffer);
}

impl FrameSink for std::sync::mpsc::Sender<FrameBuffer> {
    fn frame_ready(&self, frame_buffer: FrameBuffer) {
        if self.send(frame_buffer).is_err() {
            log::debug!("Frame receiver is gone, dropping computed frame");
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_arch="wasm32")] {
        pub trait TransformerSink: FrameSink + Clone + 'static {}
        impl<T: FrameSink + Clone + 'static> TransformerSink for T {}
    } else {
        pub trait TransformerSink: FrameSink + Clone + Send + 'static {}
        impl<T: FrameSink + Clone + Send + 'static> TransformerSink for T {}
    }
}

pub trait Transformer {
    fn post(&mut self, message: TransformerMessage) -> Result<()>;
    fn mode(&self) -> ExecutionMode;
}

/// Picks the transformer implementation once, at startup. A background request falls
/// back to inline execution when threads are unavailable.
pub fn create_transformer(
    requested: ExecutionMode,
    sink: impl TransformerSink,
) -> Box<dyn Transformer> {
    let transformer: Box<dyn Transformer> = match requested {
        ExecutionMode::Inline => Box::new(InlineTransformer::new(sink)),
        ExecutionMode::Background => {
            cfg_if::cfg_if! {
                if #[cfg(target_arch="wasm32")] {
                    log::warn!(
                        "{}",
                        Error::UnsupportedBackgroundExecution(String::from(
                            "threads are not available on this target"
                        ))
                    );
                    Box::new(InlineTransformer::new(sink))
                } else {
                    match ThreadedTransformer::spawn(sink.clone()) {
                        Ok(transformer) => Box::new(transformer),
                        Err(error) => {
                            log::warn!(
                                "{}",
                                Error::UnsupportedBackgroundExecution(error.to_string())
                            );
                            Box::new(InlineTransformer::new(sink))
                        }
                    }
                }
            }
        }
    };

    log::info!("Transformer running in {:?} mode", transformer.mode());

    transformer
}
