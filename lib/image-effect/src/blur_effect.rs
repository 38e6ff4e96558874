use crate::{Effect, EffectImage, kernel};
use derivative::Derivative;
use derive_setters::Setters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurMode {
    /// 5x5 ring blur.
    Blur,
    /// Light 3x3 smoothing.
    Smooth,
    /// Strong 5x5 smoothing, used for the watercolor look.
    SmoothMore,
}

/// Smoothing filter configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct BlurConfig {
    #[derivative(Default(value = "BlurMode::Blur"))]
    pub mode: BlurMode,
}

impl BlurConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watercolor() -> Self {
        Self::default().with_mode(BlurMode::SmoothMore)
    }

    pub fn kernel(&self) -> kernel::Kernel {
        match self.mode {
            BlurMode::Blur => kernel::BLUR,
            BlurMode::Smooth => kernel::SMOOTH,
            BlurMode::SmoothMore => kernel::SMOOTH_MORE,
        }
    }
}

impl Effect for BlurConfig {
    fn apply(&self, image: &EffectImage) -> EffectImage {
        self.kernel().apply(image)
    }
}
