pub mod base_effect;
pub mod blur_effect;
pub mod catalog;
pub mod filter_effect;
pub mod kernel;
pub mod stylized_effect;
pub mod working_image;

pub use catalog::{EffectKind, apply};
pub use working_image::{EffectImage, Layout};

pub type ImageEffectResult<T> = Result<T, ImageEffectError>;

#[derive(thiserror::Error, Debug)]
pub enum ImageEffectError {
    #[error("Unknown effect: {0}")]
    UnknownEffect(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Effect `{0}` is provided by an external collaborator")]
    External(String),
}

/// A pure image operation: the input is never modified and the same input
/// always yields the same output.
pub trait Effect {
    fn apply(&self, image: &EffectImage) -> EffectImage;
}

#[derive(Debug, Clone)]
pub enum ImageEffect {
    // Base effects
    Grayscale,
    Invert,
    Brightness(base_effect::BrightnessConfig),
    Contrast(base_effect::ContrastConfig),
    Sharpness(base_effect::SharpnessConfig),

    // Convolution effects
    Blur(blur_effect::BlurConfig),
    Emboss(stylized_effect::EmbossConfig),
    Contour(stylized_effect::ContourConfig),

    // Tone effects
    Vintage(filter_effect::VintageConfig),
    CoolTone(filter_effect::TemperatureConfig),
    WarmTone(filter_effect::TemperatureConfig),

    // Stylized effects
    PencilSketch(stylized_effect::PencilSketchConfig),
    Hdr(stylized_effect::HdrConfig),
    Cartoon(stylized_effect::CartoonConfig),
    Watercolor(blur_effect::BlurConfig),
}

impl ImageEffect {
    pub fn kind(&self) -> EffectKind {
        match self {
            ImageEffect::Grayscale => EffectKind::Grayscale,
            ImageEffect::Invert => EffectKind::Invert,
            ImageEffect::Brightness(_) => EffectKind::Brightness,
            ImageEffect::Contrast(_) => EffectKind::Contrast,
            ImageEffect::Sharpness(_) => EffectKind::Sharpness,
            ImageEffect::Blur(_) => EffectKind::Blur,
            ImageEffect::Emboss(_) => EffectKind::Emboss,
            ImageEffect::Contour(_) => EffectKind::Contour,
            ImageEffect::Vintage(_) => EffectKind::Vintage,
            ImageEffect::CoolTone(_) => EffectKind::CoolTone,
            ImageEffect::WarmTone(_) => EffectKind::WarmTone,
            ImageEffect::PencilSketch(_) => EffectKind::PencilSketch,
            ImageEffect::Hdr(_) => EffectKind::Hdr,
            ImageEffect::Cartoon(_) => EffectKind::Cartoon,
            ImageEffect::Watercolor(_) => EffectKind::Watercolor,
        }
    }
}

impl Effect for ImageEffect {
    fn apply(&self, image: &EffectImage) -> EffectImage {
        match self {
            // Base effects
            ImageEffect::Grayscale => base_effect::grayscale(image),
            ImageEffect::Invert => base_effect::invert(image),
            ImageEffect::Brightness(config) => config.apply(image),
            ImageEffect::Contrast(config) => config.apply(image),
            ImageEffect::Sharpness(config) => config.apply(image),

            // Convolution effects
            ImageEffect::Blur(config) => config.apply(image),
            ImageEffect::Emboss(config) => config.apply(image),
            ImageEffect::Contour(config) => config.apply(image),

            // Tone effects
            ImageEffect::Vintage(config) => config.apply(image),
            ImageEffect::CoolTone(config) => config.apply_cool(image),
            ImageEffect::WarmTone(config) => config.apply_warm(image),

            // Stylized effects
            ImageEffect::PencilSketch(config) => config.apply(image),
            ImageEffect::Hdr(config) => config.apply(image),
            ImageEffect::Cartoon(config) => config.apply(image),
            ImageEffect::Watercolor(config) => config.apply(image),
        }
    }
}
