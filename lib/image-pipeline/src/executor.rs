//! Runs the enabled effects over a working copy of the source image.
//!
//! The order is fixed by [`STAGES`] and never depends on how the
//! configuration was built.

use crate::{EffectConfig, Error, Result, Segmenter};
use image::DynamicImage;
use image_effect::{Effect, EffectImage, EffectKind, ImageEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Pure catalog operation.
    Catalog,
    /// Delegated to the segmentation collaborator.
    Segmentation,
}

#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub kind: EffectKind,
    pub transform: Transform,
}

impl Stage {
    const fn catalog(kind: EffectKind) -> Self {
        Self {
            kind,
            transform: Transform::Catalog,
        }
    }

    const fn segmentation(kind: EffectKind) -> Self {
        Self {
            kind,
            transform: Transform::Segmentation,
        }
    }
}

/// Every stage after colour-model normalization, in execution order.
pub const STAGES: [Stage; 16] = [
    Stage::catalog(EffectKind::Grayscale),
    Stage::catalog(EffectKind::Invert),
    Stage::catalog(EffectKind::Brightness),
    Stage::catalog(EffectKind::Contrast),
    Stage::catalog(EffectKind::Sharpness),
    Stage::catalog(EffectKind::Blur),
    Stage::catalog(EffectKind::Emboss),
    Stage::catalog(EffectKind::Contour),
    Stage::catalog(EffectKind::Vintage),
    Stage::catalog(EffectKind::CoolTone),
    Stage::catalog(EffectKind::WarmTone),
    Stage::catalog(EffectKind::PencilSketch),
    Stage::catalog(EffectKind::Hdr),
    Stage::catalog(EffectKind::Cartoon),
    Stage::catalog(EffectKind::Watercolor),
    Stage::segmentation(EffectKind::RemoveBackground),
];

#[derive(Debug)]
pub struct Execution {
    pub image: EffectImage,
    /// Stages that ran, in order.
    pub applied: Vec<EffectKind>,
    /// Recoverable failures, e.g. a missing segmentation service.
    pub warnings: Vec<Error>,
}

#[derive(Default)]
pub struct Pipeline<'a> {
    segmenter: Option<&'a dyn Segmenter>,
}

impl<'a> Pipeline<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_segmenter(mut self, segmenter: Option<&'a dyn Segmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Normalize `source` to a three channel working copy and run every
    /// enabled stage over it. Fails only when `config` does not validate.
    pub fn execute(&self, source: &DynamicImage, config: &EffectConfig) -> Result<Execution> {
        self.run(EffectImage::from_dynamic(source), config)
    }

    /// Like [`Pipeline::execute`] for an image that is already a working copy.
    pub fn run(&self, mut image: EffectImage, config: &EffectConfig) -> Result<Execution> {
        config.validate()?;

        let mut applied = vec![];
        let mut warnings = vec![];

        for stage in STAGES.iter() {
            if !config.is_enabled(stage.kind) {
                log::debug!("skip {}", stage.kind);
                continue;
            }

            image = match stage.transform {
                Transform::Catalog => {
                    let effect = ImageEffect::from_kind(stage.kind, config.factor(stage.kind))?;
                    effect.apply(&image)
                }
                Transform::Segmentation => match self.segment(&image) {
                    Ok(segmented) => segmented,
                    Err(e) => {
                        log::warn!("{} skipped: {e}", stage.kind);
                        warnings.push(e);
                        continue;
                    }
                },
            };

            log::debug!("applied {}", stage.kind);
            applied.push(stage.kind);
        }

        log::info!(
            "pipeline finished: {}x{} image, {} stage(s) applied",
            image.width(),
            image.height(),
            applied.len()
        );

        Ok(Execution {
            image,
            applied,
            warnings,
        })
    }

    fn segment(&self, image: &EffectImage) -> Result<EffectImage> {
        let Some(segmenter) = self.segmenter else {
            return Err(Error::CollaboratorUnavailable(
                "no background segmentation service configured".to_string(),
            ));
        };

        segmenter.segment(image).map_err(|e| match e {
            Error::CollaboratorUnavailable(_) => e,
            e => Error::CollaboratorUnavailable(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn solid(r: u8, g: u8, b: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, Rgb([r, g, b])))
    }

    #[test]
    fn test_stages_follow_catalog_order() {
        let kinds: Vec<_> = STAGES.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, EffectKind::all_effects());
        assert!(
            STAGES
                .iter()
                .all(|s| (s.transform == Transform::Segmentation) == s.kind.is_external())
        );
    }

    #[test]
    fn test_empty_config_normalizes() {
        let source = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 2, Luma([77])));
        let out = Pipeline::new().execute(&source, &EffectConfig::default()).unwrap();

        assert!(out.applied.is_empty());
        assert!(out.warnings.is_empty());
        assert_eq!(out.image, EffectImage::Rgb(RgbImage::from_pixel(3, 2, Rgb([77, 77, 77]))));
    }

    #[test]
    fn test_grayscale_then_invert() {
        let config = EffectConfig::new().with_grayscale(true).with_invert(true);
        let out = Pipeline::new().execute(&solid(200, 100, 50), &config).unwrap();

        assert_eq!(out.applied, vec![EffectKind::Grayscale, EffectKind::Invert]);
        let EffectImage::Luma(gray) = out.image else {
            panic!("expected single channel output");
        };
        assert!(gray.pixels().all(|p| p[0] == 255 - 124));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EffectConfig::new().with_brightness(0.1);
        assert!(matches!(
            Pipeline::new().execute(&solid(1, 2, 3), &config),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_remove_bg_without_segmenter() {
        let config = EffectConfig::new().with_remove_bg(true).with_warm_tone(true);
        let out = Pipeline::new().execute(&solid(100, 100, 100), &config).unwrap();

        assert_eq!(out.applied, vec![EffectKind::WarmTone]);
        assert!(matches!(
            out.warnings.as_slice(),
            [Error::CollaboratorUnavailable(_)]
        ));
        assert_eq!(out.image.to_rgb().get_pixel(0, 0), &Rgb([120, 100, 100]));
    }

    #[test]
    fn test_remove_bg_failing_segmenter() {
        let failing = |_: &RgbImage| -> Result<GrayImage> {
            Err(Error::ResourceUnavailable("model missing".to_string()))
        };
        let config = EffectConfig::new().with_remove_bg(true);
        let out = Pipeline::new()
            .with_segmenter(Some(&failing))
            .execute(&solid(5, 6, 7), &config)
            .unwrap();

        assert!(out.applied.is_empty());
        assert!(matches!(
            out.warnings.as_slice(),
            [Error::CollaboratorUnavailable(_)]
        ));
        assert_eq!(out.image, EffectImage::from_dynamic(&solid(5, 6, 7)));
    }

    #[test]
    fn test_remove_bg_with_segmenter() {
        let opaque = |image: &RgbImage| -> Result<GrayImage> {
            Ok(GrayImage::from_pixel(image.width(), image.height(), Luma([200])))
        };
        let config = EffectConfig::new().with_remove_bg(true);
        let out = Pipeline::new()
            .with_segmenter(Some(&opaque))
            .execute(&solid(5, 6, 7), &config)
            .unwrap();

        assert_eq!(out.applied, vec![EffectKind::RemoveBackground]);
        let EffectImage::Rgba(rgba) = out.image else {
            panic!("expected alpha channel");
        };
        assert_eq!(rgba.get_pixel(9, 9).0, [5, 6, 7, 200]);
    }
}
