use crate::{Effect, EffectImage, base_effect, kernel};

/// Directional relief, flat areas land on mid grey.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct EmbossConfig;

impl EmbossConfig {
    pub fn new() -> Self {
        Self
    }
}

impl Effect for EmbossConfig {
    fn apply(&self, image: &EffectImage) -> EffectImage {
        kernel::EMBOSS.apply(image)
    }
}

/// Outline-only edge detection, dark lines on white.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct ContourConfig;

impl ContourConfig {
    pub fn new() -> Self {
        Self
    }
}

impl Effect for ContourConfig {
    fn apply(&self, image: &EffectImage) -> EffectImage {
        kernel::CONTOUR.apply(image)
    }
}

/// Luminance followed by contour detection.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct PencilSketchConfig;

impl PencilSketchConfig {
    pub fn new() -> Self {
        Self
    }
}

impl Effect for PencilSketchConfig {
    fn apply(&self, image: &EffectImage) -> EffectImage {
        let gray = base_effect::grayscale(image);
        kernel::CONTOUR.apply(&gray)
    }
}

/// Detail-enhancing sharpen.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct HdrConfig;

impl HdrConfig {
    pub fn new() -> Self {
        Self
    }
}

impl Effect for HdrConfig {
    fn apply(&self, image: &EffectImage) -> EffectImage {
        kernel::DETAIL.apply(image)
    }
}

/// Edge enhancement, then a light smoothing pass. The order is significant.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct CartoonConfig;

impl CartoonConfig {
    pub fn new() -> Self {
        Self
    }
}

impl Effect for CartoonConfig {
    fn apply(&self, image: &EffectImage) -> EffectImage {
        let enhanced = kernel::EDGE_ENHANCE.apply(image);
        kernel::SMOOTH.apply(&enhanced)
    }
}
