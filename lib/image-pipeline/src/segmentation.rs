//! Background segmentation collaborator.
//!
//! No model ships with this crate. Callers that have one plug it in through
//! [`Segmenter`]; a plain closure returning a mask works too.

use crate::{Error, Result};
use image::{GrayImage, Luma, Rgba, RgbImage, RgbaImage};
use image_effect::EffectImage;

pub trait Segmenter {
    /// Foreground mask with the dimensions of `image`: 0 is background,
    /// 255 is foreground.
    fn mask(&self, image: &RgbImage) -> Result<GrayImage>;

    /// Cut the background out of `image`, returning it with the mask as alpha.
    fn segment(&self, image: &EffectImage) -> Result<EffectImage> {
        let rgb = image.to_rgb();
        let mask = self.mask(&rgb)?;
        apply_mask(&rgb, &mask).map(EffectImage::Rgba)
    }
}

impl<F> Segmenter for F
where
    F: Fn(&RgbImage) -> Result<GrayImage>,
{
    fn mask(&self, image: &RgbImage) -> Result<GrayImage> {
        self(image)
    }
}

/// Use `mask` as the alpha channel of `image`.
pub fn apply_mask(image: &RgbImage, mask: &GrayImage) -> Result<RgbaImage> {
    if image.dimensions() != mask.dimensions() {
        return Err(Error::CollaboratorUnavailable(format!(
            "segmentation mask is {}x{}, image is {}x{}",
            mask.width(),
            mask.height(),
            image.width(),
            image.height()
        )));
    }

    Ok(RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        Rgba([r, g, b, mask.get_pixel(x, y)[0]])
    }))
}

/// Hard-edged version of a soft mask: values above `threshold` become 255.
pub fn create_binary_mask(mask: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        Luma([if mask.get_pixel(x, y)[0] > threshold { 255 } else { 0 }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn left_half(image: &RgbImage) -> Result<GrayImage> {
        let half = image.width() / 2;
        Ok(GrayImage::from_fn(image.width(), image.height(), |x, _| {
            Luma([if x < half { 255 } else { 0 }])
        }))
    }

    #[test]
    fn test_segment_sets_alpha() {
        let image = EffectImage::Rgb(RgbImage::from_pixel(4, 2, Rgb([9, 8, 7])));
        let EffectImage::Rgba(out) = left_half.segment(&image).unwrap() else {
            panic!("expected rgba");
        };

        assert_eq!(out.get_pixel(0, 0), &Rgba([9, 8, 7, 255]));
        assert_eq!(out.get_pixel(3, 1), &Rgba([9, 8, 7, 0]));
    }

    #[test]
    fn test_mask_size_mismatch() {
        let image = RgbImage::new(4, 4);
        let mask = GrayImage::new(2, 2);
        assert!(matches!(
            apply_mask(&image, &mask),
            Err(Error::CollaboratorUnavailable(_))
        ));
    }

    #[test]
    fn test_binary_mask() {
        let mask = GrayImage::from_raw(3, 1, vec![10, 128, 200]).unwrap();
        let binary = create_binary_mask(&mask, 128);
        assert_eq!(binary.into_raw(), vec![0, 0, 255]);
    }
}
