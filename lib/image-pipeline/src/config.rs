//! Request configuration: which effects run, their factors and the text
//! overlay. Values are validated here, before anything reaches the executor.

use crate::{Error, Result, color};
use derivative::Derivative;
use derive_setters::Setters;
use image_effect::EffectKind;
use serde::{Deserialize, Serialize};
use std::{fs, ops::RangeInclusive, path::Path};

pub const BRIGHTNESS_RANGE: RangeInclusive<f32> = 0.5..=2.0;
pub const CONTRAST_RANGE: RangeInclusive<f32> = 0.5..=2.0;
pub const SHARPNESS_RANGE: RangeInclusive<f32> = 0.5..=3.0;

/// Accepted overlay font sizes in pixels. Glyphs are rasterized whole, so
/// the size also bounds the memory a single overlay can take.
pub const TEXT_SIZE_RANGE: RangeInclusive<u32> = 10..=100;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[serde(default, deny_unknown_fields)]
#[non_exhaustive]
pub struct EffectConfig {
    pub grayscale: bool,
    pub invert: bool,

    #[derivative(Default(value = "1.0"))]
    pub brightness: f32,

    #[derivative(Default(value = "1.0"))]
    pub contrast: f32,

    #[derivative(Default(value = "1.0"))]
    pub sharpness: f32,

    pub blur: bool,
    pub emboss: bool,
    pub contour: bool,
    pub vintage: bool,
    pub cool_tone: bool,
    pub warm_tone: bool,
    pub pencil_sketch: bool,
    pub hdr: bool,
    pub cartoon: bool,
    pub watercolor: bool,
    pub remove_bg: bool,
}

impl EffectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn a boolean effect on or off. Factor effects are left untouched.
    pub fn with_effect(mut self, kind: EffectKind, enabled: bool) -> Self {
        self.set_effect(kind, enabled);
        self
    }

    pub fn set_effect(&mut self, kind: EffectKind, enabled: bool) {
        if let Some(flag) = self.flag_mut(kind) {
            *flag = enabled;
        }
    }

    /// Whether `kind` takes part in a run. Factor effects are enabled when
    /// their factor differs from 1.0.
    pub fn is_enabled(&self, kind: EffectKind) -> bool {
        match self.factor(kind) {
            Some(factor) => factor != 1.0,
            None => self.flag(kind),
        }
    }

    pub fn factor(&self, kind: EffectKind) -> Option<f32> {
        match kind {
            EffectKind::Brightness => Some(self.brightness),
            EffectKind::Contrast => Some(self.contrast),
            EffectKind::Sharpness => Some(self.sharpness),
            _ => None,
        }
    }

    pub fn enabled_effects(&self) -> Vec<EffectKind> {
        EffectKind::all_effects()
            .iter()
            .copied()
            .filter(|kind| self.is_enabled(*kind))
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        for kind in EffectKind::all_effects() {
            let (Some(factor), Some(range)) = (self.factor(*kind), factor_range(*kind)) else {
                continue;
            };

            if !factor.is_finite() || !range.contains(&factor) {
                return Err(Error::InvalidParameter(format!(
                    "{kind} factor {factor} is outside [{}, {}]",
                    range.start(),
                    range.end()
                )));
            }
        }

        Ok(())
    }

    fn flag(&self, kind: EffectKind) -> bool {
        match kind {
            EffectKind::Grayscale => self.grayscale,
            EffectKind::Invert => self.invert,
            EffectKind::Blur => self.blur,
            EffectKind::Emboss => self.emboss,
            EffectKind::Contour => self.contour,
            EffectKind::Vintage => self.vintage,
            EffectKind::CoolTone => self.cool_tone,
            EffectKind::WarmTone => self.warm_tone,
            EffectKind::PencilSketch => self.pencil_sketch,
            EffectKind::Hdr => self.hdr,
            EffectKind::Cartoon => self.cartoon,
            EffectKind::Watercolor => self.watercolor,
            EffectKind::RemoveBackground => self.remove_bg,
            EffectKind::Brightness | EffectKind::Contrast | EffectKind::Sharpness => false,
        }
    }

    fn flag_mut(&mut self, kind: EffectKind) -> Option<&mut bool> {
        let flag = match kind {
            EffectKind::Grayscale => &mut self.grayscale,
            EffectKind::Invert => &mut self.invert,
            EffectKind::Blur => &mut self.blur,
            EffectKind::Emboss => &mut self.emboss,
            EffectKind::Contour => &mut self.contour,
            EffectKind::Vintage => &mut self.vintage,
            EffectKind::CoolTone => &mut self.cool_tone,
            EffectKind::WarmTone => &mut self.warm_tone,
            EffectKind::PencilSketch => &mut self.pencil_sketch,
            EffectKind::Hdr => &mut self.hdr,
            EffectKind::Cartoon => &mut self.cartoon,
            EffectKind::Watercolor => &mut self.watercolor,
            EffectKind::RemoveBackground => &mut self.remove_bg,
            EffectKind::Brightness | EffectKind::Contrast | EffectKind::Sharpness => return None,
        };
        Some(flag)
    }
}

/// Accepted factor range of an enhancement effect.
pub fn factor_range(kind: EffectKind) -> Option<RangeInclusive<f32>> {
    match kind {
        EffectKind::Brightness => Some(BRIGHTNESS_RANGE),
        EffectKind::Contrast => Some(CONTRAST_RANGE),
        EffectKind::Sharpness => Some(SHARPNESS_RANGE),
        _ => None,
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[serde(default, deny_unknown_fields)]
#[non_exhaustive]
pub struct TextOverlayConfig {
    pub enabled: bool,

    #[derivative(Default(value = "\"Your Custom Text Here\".to_string()"))]
    #[setters(into)]
    pub text: String,

    #[derivative(Default(value = "\"#FFFFFF\".to_string()"))]
    #[setters(into)]
    pub color: String,

    /// Font size in pixels (em height).
    #[derivative(Default(value = "30"))]
    pub size: u32,

    /// Top edge of the text. Half the image height when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[setters(strip_option)]
    pub y: Option<u32>,
}

impl TextOverlayConfig {
    pub fn new(text: impl Into<String>) -> Self {
        Self::default().with_enabled(true).with_text(text)
    }

    /// Enabled and the text is not blank.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.text.trim().is_empty()
    }

    /// Checks that do not depend on the image.
    pub fn validate(&self) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }

        if !TEXT_SIZE_RANGE.contains(&self.size) {
            return Err(Error::InvalidParameter(format!(
                "text size {} is outside [{}, {}]",
                self.size,
                TEXT_SIZE_RANGE.start(),
                TEXT_SIZE_RANGE.end()
            )));
        }

        color::parse_color(&self.color).map(|_| ())
    }

    /// Full validation once the image height is known.
    pub fn validate_for(&self, height: u32) -> Result<()> {
        self.validate()?;

        match self.y {
            Some(y) if self.is_active() && y > height => Err(Error::InvalidParameter(format!(
                "text position y = {y} is outside [0, {height}]"
            ))),
            _ => Ok(()),
        }
    }

    pub fn resolved_y(&self, height: u32) -> u32 {
        self.y.unwrap_or(height / 2)
    }
}

/// Everything one run needs besides the image.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSettings {
    pub effects: EffectConfig,
    pub text: TextOverlayConfig,
}

impl FilterSettings {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)
            .map_err(|e| Error::InvalidParameter(format!("bad settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        log::debug!("loaded settings from {}", path.display());
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Encode(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.effects.validate()?;
        self.text.validate()
    }
}
