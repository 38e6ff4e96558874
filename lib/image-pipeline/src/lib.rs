//! Filter pipeline engine.
//!
//! Decodes an uploaded image, runs the enabled effects in a fixed order,
//! composites an optional text overlay and re-encodes the result as PNG.
//!
//! ```no_run
//! use image_pipeline::{Collaborators, FilterSettings, process};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("photo.jpg")?;
//! let mut settings = FilterSettings::default();
//! settings.effects.grayscale = true;
//!
//! let output = process(&bytes, &settings, &Collaborators::default())?;
//! std::fs::write(image_pipeline::DOWNLOAD_FILE_NAME, &output.png)?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod color;
pub mod config;
pub mod executor;
pub mod font;
pub mod process;
pub mod segmentation;
pub mod text_overlay;

pub use config::{EffectConfig, FilterSettings, TextOverlayConfig};
pub use executor::{Execution, Pipeline};
pub use font::{EmbeddedFont, FileFont, FontProvider, SystemFont};
pub use image_effect::{EffectImage, EffectKind};
pub use process::{Collaborators, ProcessOutput, process};
pub use segmentation::Segmenter;

/// File name offered for the exported image.
pub const DOWNLOAD_FILE_NAME: &str = "filtered_image.png";

/// MIME type of the exported image.
pub const OUTPUT_MIME: &str = "image/png";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image_effect::ImageEffectError> for Error {
    fn from(e: image_effect::ImageEffectError) -> Self {
        match e {
            image_effect::ImageEffectError::External(name) => Error::CollaboratorUnavailable(name),
            e => Error::InvalidParameter(e.to_string()),
        }
    }
}

impl Error {
    /// Whether the request can still deliver an image after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ResourceUnavailable(_) | Error::CollaboratorUnavailable(_)
        )
    }
}
