//! One request, end to end: decode, filter, overlay, encode.

use crate::{
    EmbeddedFont, Error, FilterSettings, FontProvider, Pipeline, Result, Segmenter, codec,
    text_overlay,
};
use image::DynamicImage;
use image_effect::EffectImage;

/// Services the engine calls out to.
pub struct Collaborators {
    pub fonts: Box<dyn FontProvider>,
    pub segmenter: Option<Box<dyn Segmenter>>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            fonts: Box::new(EmbeddedFont),
            segmenter: None,
        }
    }
}

impl Collaborators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fonts(mut self, fonts: impl FontProvider + 'static) -> Self {
        self.fonts = Box::new(fonts);
        self
    }

    pub fn with_segmenter(mut self, segmenter: impl Segmenter + 'static) -> Self {
        self.segmenter = Some(Box::new(segmenter));
        self
    }
}

#[derive(Debug)]
pub struct ProcessOutput {
    /// The upload as decoded, for side-by-side display.
    pub original: DynamicImage,
    pub filtered: EffectImage,
    /// `filtered` encoded as PNG.
    pub png: Vec<u8>,
    /// Recoverable failures. The output is still valid when this is not empty.
    pub warnings: Vec<Error>,
}

/// Run one request.
///
/// Undecodable bytes and invalid settings fail the whole request. A missing
/// font or segmentation service is recorded in `warnings` and the rest of
/// the output is kept.
pub fn process(
    bytes: &[u8],
    settings: &FilterSettings,
    collaborators: &Collaborators,
) -> Result<ProcessOutput> {
    settings.validate()?;

    let original = codec::decode(bytes)?;
    settings.text.validate_for(original.height())?;

    let execution = Pipeline::new()
        .with_segmenter(collaborators.segmenter.as_deref())
        .execute(&original, &settings.effects)?;
    let mut warnings = execution.warnings;

    let filtered =
        match text_overlay::render(&execution.image, &settings.text, collaborators.fonts.as_ref()) {
            Ok(image) => image,
            Err(e) if e.is_recoverable() => {
                log::warn!("text overlay skipped: {e}");
                warnings.push(e);
                execution.image
            }
            Err(e) => return Err(e),
        };

    let png = codec::encode_png(&filtered)?;

    Ok(ProcessOutput {
        original,
        filtered,
        png,
        warnings,
    })
}
