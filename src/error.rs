#[derive(Debug)]
pub enum Error {
    ImageLoadFailure { location: String, reason: String },
    UnsupportedBackgroundExecution(String),
    TransformerNotReady,
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    Message(String),
}

impl Error {
    pub fn new(message: String) -> Self {
        Self::Message(message)
    }

    pub fn image_load_failure(
        location: impl std::fmt::Display,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::ImageLoadFailure {
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ImageLoadFailure { location, reason } => {
                write!(f, "Failed to load image from {location}: {reason}")
            }
            Error::UnsupportedBackgroundExecution(reason) => {
                write!(f, "Background execution is unavailable: {reason}")
            }
            Error::TransformerNotReady => {
                write!(f, "A frame was requested before any image sample was received")
            }
            Error::DimensionMismatch { expected, actual } => write!(
                f,
                "Frame dimensions {}x{} do not match image sample dimensions {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Error::Message(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for Error {}
