use crate::{
    Effect, EffectImage, ImageEffect, ImageEffectError, ImageEffectResult,
    base_effect::{BrightnessConfig, ContrastConfig, SharpnessConfig},
    blur_effect::BlurConfig,
    filter_effect::{TemperatureConfig, VintageConfig},
    stylized_effect::{CartoonConfig, ContourConfig, EmbossConfig, HdrConfig, PencilSketchConfig},
};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Every named effect, declared in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum EffectKind {
    Grayscale = 0,
    Invert,
    Brightness,
    Contrast,
    Sharpness,
    Blur,
    Emboss,
    Contour,
    Vintage,
    CoolTone,
    WarmTone,
    PencilSketch,
    Hdr,
    Cartoon,
    Watercolor,
    RemoveBackground,
}

impl EffectKind {
    /// Configuration key.
    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Grayscale => "grayscale",
            EffectKind::Invert => "invert",
            EffectKind::Brightness => "brightness",
            EffectKind::Contrast => "contrast",
            EffectKind::Sharpness => "sharpness",
            EffectKind::Blur => "blur",
            EffectKind::Emboss => "emboss",
            EffectKind::Contour => "contour",
            EffectKind::Vintage => "vintage",
            EffectKind::CoolTone => "cool_tone",
            EffectKind::WarmTone => "warm_tone",
            EffectKind::PencilSketch => "pencil_sketch",
            EffectKind::Hdr => "hdr",
            EffectKind::Cartoon => "cartoon",
            EffectKind::Watercolor => "watercolor",
            EffectKind::RemoveBackground => "remove_bg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::Grayscale => "Grayscale",
            EffectKind::Invert => "Invert Colors",
            EffectKind::Brightness => "Brightness",
            EffectKind::Contrast => "Contrast",
            EffectKind::Sharpness => "Sharpness",
            EffectKind::Blur => "Blur",
            EffectKind::Emboss => "Emboss",
            EffectKind::Contour => "Contour",
            EffectKind::Vintage => "Vintage",
            EffectKind::CoolTone => "Cool Tone",
            EffectKind::WarmTone => "Warm Tone",
            EffectKind::PencilSketch => "Pencil Sketch",
            EffectKind::Hdr => "HDR Effect",
            EffectKind::Cartoon => "Cartoon",
            EffectKind::Watercolor => "Watercolor",
            EffectKind::RemoveBackground => "Remove Background",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EffectKind::Grayscale => "Converts the image to black and white.",
            EffectKind::Invert => "Reverses the image colors.",
            EffectKind::Brightness => "Scales overall brightness.",
            EffectKind::Contrast => "Spreads tones away from the mean.",
            EffectKind::Sharpness => "Sharpens or softens fine detail.",
            EffectKind::Blur => "Softens the image.",
            EffectKind::Emboss => "Creates a 3D-like effect.",
            EffectKind::Contour => "Highlights edges.",
            EffectKind::Vintage => "Adds a retro look.",
            EffectKind::CoolTone => "Enhances blue shades.",
            EffectKind::WarmTone => "Enhances red shades.",
            EffectKind::PencilSketch => "Converts image to a sketch.",
            EffectKind::Hdr => "Improves details.",
            EffectKind::Cartoon => "Adds a comic style.",
            EffectKind::Watercolor => "Softens the image like watercolor.",
            EffectKind::RemoveBackground => "Removes the background.",
        }
    }

    /// Whether the effect takes an enhancement factor.
    pub fn has_factor(&self) -> bool {
        matches!(
            self,
            EffectKind::Brightness | EffectKind::Contrast | EffectKind::Sharpness
        )
    }

    /// Whether the effect is served by an external collaborator instead of
    /// the catalog.
    pub fn is_external(&self) -> bool {
        matches!(self, EffectKind::RemoveBackground)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all_effects()
            .iter()
            .copied()
            .find(|kind| kind.name() == name.trim())
    }

    pub fn all_effects() -> &'static [EffectKind] {
        &[
            EffectKind::Grayscale,
            EffectKind::Invert,
            EffectKind::Brightness,
            EffectKind::Contrast,
            EffectKind::Sharpness,
            EffectKind::Blur,
            EffectKind::Emboss,
            EffectKind::Contour,
            EffectKind::Vintage,
            EffectKind::CoolTone,
            EffectKind::WarmTone,
            EffectKind::PencilSketch,
            EffectKind::Hdr,
            EffectKind::Cartoon,
            EffectKind::Watercolor,
            EffectKind::RemoveBackground,
        ]
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl ImageEffect {
    /// Builds the catalog entry for `kind`. Factor effects require a finite,
    /// non-negative `factor`; the others ignore it.
    pub fn from_kind(kind: EffectKind, factor: Option<f32>) -> ImageEffectResult<Self> {
        let require_factor = || -> ImageEffectResult<f32> {
            match factor {
                Some(f) if f.is_finite() && f >= 0.0 => Ok(f),
                Some(f) => Err(ImageEffectError::InvalidParameter(format!(
                    "{kind} factor must be a finite non-negative number, got {f}"
                ))),
                None => Err(ImageEffectError::InvalidParameter(format!(
                    "{kind} requires a factor"
                ))),
            }
        };

        let effect = match kind {
            EffectKind::Grayscale => ImageEffect::Grayscale,
            EffectKind::Invert => ImageEffect::Invert,
            EffectKind::Brightness => {
                ImageEffect::Brightness(BrightnessConfig::new().with_factor(require_factor()?))
            }
            EffectKind::Contrast => {
                ImageEffect::Contrast(ContrastConfig::new().with_factor(require_factor()?))
            }
            EffectKind::Sharpness => {
                ImageEffect::Sharpness(SharpnessConfig::new().with_factor(require_factor()?))
            }
            EffectKind::Blur => ImageEffect::Blur(BlurConfig::new()),
            EffectKind::Emboss => ImageEffect::Emboss(EmbossConfig::new()),
            EffectKind::Contour => ImageEffect::Contour(ContourConfig::new()),
            EffectKind::Vintage => ImageEffect::Vintage(VintageConfig::new()),
            EffectKind::CoolTone => ImageEffect::CoolTone(TemperatureConfig::new()),
            EffectKind::WarmTone => ImageEffect::WarmTone(TemperatureConfig::new()),
            EffectKind::PencilSketch => ImageEffect::PencilSketch(PencilSketchConfig::new()),
            EffectKind::Hdr => ImageEffect::Hdr(HdrConfig::new()),
            EffectKind::Cartoon => ImageEffect::Cartoon(CartoonConfig::new()),
            EffectKind::Watercolor => ImageEffect::Watercolor(BlurConfig::watercolor()),
            EffectKind::RemoveBackground => {
                return Err(ImageEffectError::External(kind.name().to_string()));
            }
        };

        Ok(effect)
    }
}

/// Apply the effect called `name` to `image`.
pub fn apply(
    name: &str,
    image: &EffectImage,
    factor: Option<f32>,
) -> ImageEffectResult<EffectImage> {
    let kind = EffectKind::from_name(name)
        .ok_or_else(|| ImageEffectError::UnknownEffect(name.to_string()))?;
    let effect = ImageEffect::from_kind(kind, factor)?;

    log::debug!("applying {kind} to {}x{} image", image.width(), image.height());
    Ok(effect.apply(image))
}
