use crate::{Effect, EffectImage, kernel};
use derivative::Derivative;
use derive_setters::Setters;
use rayon::prelude::*;

/// ITU-R 601 luminance in 16-bit fixed point, rounded to nearest.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((19595 * r as u32 + 38470 * g as u32 + 7471 * b as u32 + 0x8000) >> 16) as u8
}

/// Collapse the image to a single luminance channel.
pub fn grayscale(image: &EffectImage) -> EffectImage {
    EffectImage::Luma(image.to_luma())
}

/// Invert the colour channels (`255 - v`), alpha untouched.
pub fn invert(image: &EffectImage) -> EffectImage {
    image.map_samples(|src, dst, layout| {
        dst.par_chunks_exact_mut(layout.channels)
            .zip(src.par_chunks_exact(layout.channels))
            .for_each(|(out, pixel)| {
                for c in 0..layout.color_channels {
                    out[c] = 255 - pixel[c];
                }
            });
    })
}

/// Interpolates from `degenerate` towards `value` by `factor`, extrapolating
/// when `factor > 1.0`. Truncates and clamps to the channel range.
#[inline]
fn blend_sample(degenerate: u8, value: u8, factor: f32) -> u8 {
    let degenerate = degenerate as f32;
    (degenerate + factor * (value as f32 - degenerate)).clamp(0.0, 255.0) as u8
}

/// Blend every colour sample of `image` against the matching sample of
/// `degenerate`, which must share its layout.
fn enhance(image: &EffectImage, degenerate: &EffectImage, factor: f32) -> EffectImage {
    image.map_samples(|src, dst, layout| {
        dst.par_chunks_exact_mut(layout.channels)
            .zip(src.par_chunks_exact(layout.channels))
            .zip(degenerate.as_raw().par_chunks_exact(layout.channels))
            .for_each(|((out, pixel), base)| {
                for c in 0..layout.color_channels {
                    out[c] = blend_sample(base[c], pixel[c], factor);
                }
            });
    })
}

/// Same as [`enhance`] with a constant degenerate sample.
fn enhance_flat(image: &EffectImage, degenerate: u8, factor: f32) -> EffectImage {
    image.map_samples(|src, dst, layout| {
        dst.par_chunks_exact_mut(layout.channels)
            .zip(src.par_chunks_exact(layout.channels))
            .for_each(|(out, pixel)| {
                for c in 0..layout.color_channels {
                    out[c] = blend_sample(degenerate, pixel[c], factor);
                }
            });
    })
}

/// Brightness adjustment configuration
///
/// A factor of 1.0 is the identity, 0.0 yields a black image.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct BrightnessConfig {
    #[derivative(Default(value = "1.0"))]
    pub factor: f32,
}

impl BrightnessConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for BrightnessConfig {
    fn apply(&self, image: &EffectImage) -> EffectImage {
        enhance_flat(image, 0, self.factor)
    }
}

/// Contrast adjustment configuration
///
/// Pushes samples away from (or towards) the mean luminance of the image.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ContrastConfig {
    #[derivative(Default(value = "1.0"))]
    pub factor: f32,
}

impl ContrastConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for ContrastConfig {
    fn apply(&self, image: &EffectImage) -> EffectImage {
        if image.is_empty() {
            return image.clone();
        }

        enhance_flat(image, mean_luminance(image), self.factor)
    }
}

/// Rounded mean of the luminance channel.
fn mean_luminance(image: &EffectImage) -> u8 {
    let luma = image.to_luma();
    let pixels = luma.as_raw();
    let sum: u64 = pixels.par_iter().map(|&v| v as u64).sum();

    (sum as f64 / pixels.len() as f64 + 0.5) as u8
}

/// Sharpness adjustment configuration
///
/// Factors below 1.0 move towards a smoothed copy, above 1.0 away from it.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SharpnessConfig {
    #[derivative(Default(value = "1.0"))]
    pub factor: f32,
}

impl SharpnessConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for SharpnessConfig {
    fn apply(&self, image: &EffectImage) -> EffectImage {
        let smoothed = kernel::SMOOTH.apply(image);
        enhance(image, &smoothed, self.factor)
    }
}

/// Colour saturation configuration
///
/// Blends against the luminance image; 0.0 is fully desaturated. Single
/// channel images carry no colour and come back unchanged.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SaturationConfig {
    #[derivative(Default(value = "1.0"))]
    pub factor: f32,
}

impl SaturationConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for SaturationConfig {
    fn apply(&self, image: &EffectImage) -> EffectImage {
        let degenerate = match image {
            EffectImage::Luma(_) => return image.clone(),
            EffectImage::Rgb(_) | EffectImage::Rgba(_) => image.map_samples(|src, dst, layout| {
                dst.par_chunks_exact_mut(layout.channels)
                    .zip(src.par_chunks_exact(layout.channels))
                    .for_each(|(out, pixel)| {
                        let gray = luminance(pixel[0], pixel[1], pixel[2]);
                        out[..3].fill(gray);
                    });
            }),
        };

        enhance(image, &degenerate, self.factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn solid(r: u8, g: u8, b: u8) -> EffectImage {
        EffectImage::Rgb(RgbImage::from_pixel(6, 6, Rgb([r, g, b])))
    }

    #[test]
    fn test_luminance() {
        assert_eq!(luminance(0, 0, 0), 0);
        assert_eq!(luminance(255, 255, 255), 255);
        assert_eq!(luminance(200, 100, 50), 124);
    }

    #[test]
    fn test_grayscale_is_single_channel() {
        let gray = grayscale(&solid(200, 100, 50));

        assert_eq!(gray.channel_count(), 1);
        assert!(gray.as_raw().iter().all(|&v| v == 124));
    }

    #[test]
    fn test_invert() {
        let inverted = invert(&solid(200, 100, 50));
        assert_eq!(inverted.to_rgb().get_pixel(3, 3), &Rgb([55, 155, 205]));

        let gray = EffectImage::Luma(GrayImage::from_pixel(2, 2, Luma([124])));
        assert_eq!(invert(&gray).as_raw(), &[131; 4]);
    }

    #[test]
    fn test_brightness_scales_and_clamps() {
        let image = solid(100, 200, 50);

        let darker = BrightnessConfig::new().with_factor(0.5).apply(&image);
        assert_eq!(darker.to_rgb().get_pixel(0, 0), &Rgb([50, 100, 25]));

        let brighter = BrightnessConfig::new().with_factor(2.0).apply(&image);
        assert_eq!(brighter.to_rgb().get_pixel(0, 0), &Rgb([200, 255, 100]));
    }

    #[test]
    fn test_contrast_on_flat_image_is_stable() {
        // Every sample of a flat grey image equals the mean luminance.
        let image = solid(90, 90, 90);
        let adjusted = ContrastConfig::new().with_factor(2.0).apply(&image);
        assert_eq!(adjusted, image);
    }

    #[test]
    fn test_contrast_spreads_from_mean() {
        let mut rgb = RgbImage::from_pixel(2, 1, Rgb([100, 100, 100]));
        rgb.put_pixel(1, 0, Rgb([200, 200, 200]));

        let adjusted = ContrastConfig::new()
            .with_factor(2.0)
            .apply(&EffectImage::Rgb(rgb));
        let adjusted = adjusted.to_rgb();

        // mean = 150
        assert_eq!(adjusted.get_pixel(0, 0), &Rgb([50, 50, 50]));
        assert_eq!(adjusted.get_pixel(1, 0), &Rgb([250, 250, 250]));
    }

    #[test]
    fn test_saturation_zero_is_luminance() {
        let image = solid(200, 100, 50);
        let desaturated = SaturationConfig::new().with_factor(0.0).apply(&image);
        assert_eq!(desaturated.to_rgb().get_pixel(2, 2), &Rgb([124, 124, 124]));
    }

    #[test]
    fn test_saturation_ignores_luma() {
        let image = EffectImage::Luma(GrayImage::from_pixel(3, 3, Luma([40])));
        assert_eq!(SaturationConfig::new().with_factor(0.5).apply(&image), image);
    }

    #[test]
    fn test_sharpness_on_flat_image_is_stable() {
        let image = solid(10, 20, 30);
        let sharpened = SharpnessConfig::new().with_factor(3.0).apply(&image);
        assert_eq!(sharpened, image);
    }

    #[test]
    fn test_sharpness_exact_values() {
        let mut gray = GrayImage::from_pixel(5, 5, Luma([100]));
        gray.put_pixel(2, 2, Luma([200]));
        let image = EffectImage::Luma(gray);

        // Smoothed interior: 108 around a 138 centre.
        #[rustfmt::skip]
        let sharpened: [u8; 25] = [
            100, 100, 100, 100, 100,
            100,  92,  92,  92, 100,
            100,  92, 255,  92, 100,
            100,  92,  92,  92, 100,
            100, 100, 100, 100, 100,
        ];
        #[rustfmt::skip]
        let softened: [u8; 25] = [
            100, 100, 100, 100, 100,
            100, 108, 108, 108, 100,
            100, 108, 138, 108, 100,
            100, 108, 108, 108, 100,
            100, 100, 100, 100, 100,
        ];

        let out = SharpnessConfig::new().with_factor(2.0).apply(&image);
        assert_eq!(out.as_raw(), &sharpened[..]);

        let out = SharpnessConfig::new().with_factor(0.0).apply(&image);
        assert_eq!(out.as_raw(), &softened[..]);
    }
}
