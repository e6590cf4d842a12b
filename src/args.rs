use crate::resource::source::ImageSourceLocation;
use crate::transform::ExecutionMode;

pub struct Args {
    pub image: ImageSourceLocation,
    pub execution_mode: ExecutionMode,
}

impl Args {
    /// Defaults for the web build, which has no command line.
    pub fn web_default() -> Self {
        Self {
            image: ImageSourceLocation::Url(String::from(DEFAULT_IMAGE_URL)),
            execution_mode: ExecutionMode::Background,
        }
    }
}

pub const DEFAULT_IMAGE_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/e/ec/Mona_Lisa%2C_by_Leonardo_da_Vinci%2C_from_C2RMF_retouched.jpg/260px-Mona_Lisa%2C_by_Leonardo_da_Vinci%2C_from_C2RMF_retouched.jpg";
