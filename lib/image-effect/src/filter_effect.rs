use crate::{Effect, EffectImage, base_effect::SaturationConfig};
use derivative::Derivative;
use derive_setters::Setters;
use rayon::prelude::*;

/// Retro look: colour saturation pulled halfway towards grey.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct VintageConfig {
    #[derivative(Default(value = "0.5"))]
    pub saturation: f32,
}

impl VintageConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for VintageConfig {
    fn apply(&self, image: &EffectImage) -> EffectImage {
        SaturationConfig::new()
            .with_factor(self.saturation)
            .apply(image)
    }
}

/// Color temperature configuration
///
/// Warm scales the red channel, cool scales the blue channel. Single channel
/// images are re-expanded to RGB first.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct TemperatureConfig {
    #[derivative(Default(value = "1.2"))]
    pub amount: f32,
}

impl TemperatureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_warm(&self, image: &EffectImage) -> EffectImage {
        self.scale_channel(image, 0)
    }

    pub fn apply_cool(&self, image: &EffectImage) -> EffectImage {
        self.scale_channel(image, 2)
    }

    fn scale_channel(&self, image: &EffectImage, channel: usize) -> EffectImage {
        let lut = self.lookup_table();

        image.to_color().map_samples(|src, dst, layout| {
            dst.par_chunks_exact_mut(layout.channels)
                .zip(src.par_chunks_exact(layout.channels))
                .for_each(|(out, pixel)| out[channel] = lut[pixel[channel] as usize]);
        })
    }

    fn lookup_table(&self) -> [u8; 256] {
        let mut lut = [0u8; 256];
        for (i, v) in lut.iter_mut().enumerate() {
            *v = (i as f32 * self.amount).round().clamp(0.0, 255.0) as u8;
        }
        lut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_warm_scales_red() {
        let image = EffectImage::Rgb(RgbImage::from_pixel(4, 4, Rgb([100, 100, 100])));
        let warm = TemperatureConfig::new().apply_warm(&image);
        assert_eq!(warm.to_rgb().get_pixel(0, 0), &Rgb([120, 100, 100]));
    }

    #[test]
    fn test_cool_scales_blue_and_clamps() {
        let image = EffectImage::Rgb(RgbImage::from_pixel(2, 2, Rgb([100, 100, 250])));
        let cool = TemperatureConfig::new().apply_cool(&image);
        assert_eq!(cool.to_rgb().get_pixel(1, 1), &Rgb([100, 100, 255]));
    }

    #[test]
    fn test_tone_expands_luma() {
        let image = EffectImage::Luma(GrayImage::from_pixel(2, 2, Luma([50])));
        let warm = TemperatureConfig::new().apply_warm(&image);

        assert_eq!(warm.channel_count(), 3);
        assert_eq!(warm.to_rgb().get_pixel(0, 0), &Rgb([60, 50, 50]));
    }

    #[test]
    fn test_tone_keeps_alpha() {
        let image = EffectImage::Rgba(RgbaImage::from_pixel(1, 1, Rgba([10, 10, 10, 33])));
        let EffectImage::Rgba(cool) = TemperatureConfig::new().apply_cool(&image) else {
            panic!("layout changed");
        };
        assert_eq!(cool.get_pixel(0, 0), &Rgba([10, 10, 12, 33]));
    }

    #[test]
    fn test_vintage_halves_saturation() {
        let image = EffectImage::Rgb(RgbImage::from_pixel(1, 1, Rgb([200, 100, 50])));
        let vintage = VintageConfig::new().apply(&image);

        // luminance 124: 124 + 0.5 * (v - 124), truncated
        assert_eq!(vintage.to_rgb().get_pixel(0, 0), &Rgb([162, 112, 87]));
    }
}
