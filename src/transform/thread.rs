use std::sync::mpsc;
use std::thread::JoinHandle;

use anyhow::Result;

use crate::error::Error;
use crate::transform::{ExecutionMode, FrameSink, Transformer, TransformerCore, TransformerMessage};

/// Runs the transformer on a dedicated thread. Messages are processed in send order.
pub struct ThreadedTransformer {
    sender: Option<mpsc::Sender<TransformerMessage>>,
    handle: Option<JoinHandle<()>>,
}

impl ThreadedTransformer {
    pub fn spawn<S>(sink: S) -> std::io::Result<Self>
    where
        S: FrameSink + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel::<TransformerMessage>();

        let handle = std::thread::Builder::new()
            .name(String::from("transformer"))
            .spawn(move || {
                let mut core = TransformerCore::new();

                for message in receiver {
                    if let Some(frame_buffer) = core.handle(message) {
                        sink.frame_ready(frame_buffer);
                    }
                }

                log::debug!("Transformer thread finished");
            })?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }
}

impl Transformer for ThreadedTransformer {
    fn post(&mut self, message: TransformerMessage) -> Result<()> {
        let sender = match &self.sender {
            Some(sender) => sender,
            None => {
                return Err(Error::new(String::from("The transformer thread was shut down")).into())
            }
        };

        match sender.send(message) {
            Ok(_) => Ok(()),
            Err(_) => Err(Error::new(String::from("The transformer thread has stopped")).into()),
        }
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Background
    }
}

impl Drop for ThreadedTransformer {
    fn drop(&mut self) {
        // Closing the channel ends the receive loop.
        self.sender.take();

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Transformer thread panicked");
            }
        }
    }
}
