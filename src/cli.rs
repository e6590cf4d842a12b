use clap::Parser;

use ticker_dither::resource::source::ImageSourceLocation;
use ticker_dither::transform::ExecutionMode;

/// Animated two-colour threshold dithering of an image
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the image that drives the animation
    pub image: std::path::PathBuf,

    /// Compute frames on the render thread instead of a background thread
    #[arg(long)]
    pub inline: bool,
}

impl From<Cli> for ticker_dither::args::Args {
    fn from(value: Cli) -> Self {
        ticker_dither::args::Args {
            image: ImageSourceLocation::Path(value.image),
            execution_mode: match value.inline {
                true => ExecutionMode::Inline,
                false => ExecutionMode::Background,
            },
        }
    }
}
