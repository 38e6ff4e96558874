//! Working image model shared by every effect.
//!
//! Effects take an [`EffectImage`] by reference and hand back a new one. The
//! pixel layout is tracked explicitly because some effects (grayscale, pencil
//! sketch) collapse the image to a single channel and later effects have to
//! cope with that.

use crate::base_effect::luminance;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba, RgbaImage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectImage {
    Luma(GrayImage),
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

/// Sample layout of an [`EffectImage`] buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    /// Samples per pixel, alpha included.
    pub channels: usize,
    /// Leading samples per pixel that carry colour (alpha excluded).
    pub color_channels: usize,
}

impl Layout {
    pub fn row_stride(&self) -> usize {
        self.width * self.channels
    }
}

impl EffectImage {
    /// Normalizes any decoded image into the 3-channel working model.
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        EffectImage::Rgb(image.to_rgb8())
    }

    pub fn width(&self) -> u32 {
        match self {
            EffectImage::Luma(img) => img.width(),
            EffectImage::Rgb(img) => img.width(),
            EffectImage::Rgba(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            EffectImage::Luma(img) => img.height(),
            EffectImage::Rgb(img) => img.height(),
            EffectImage::Rgba(img) => img.height(),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn layout(&self) -> Layout {
        let (channels, color_channels) = match self {
            EffectImage::Luma(_) => (1, 1),
            EffectImage::Rgb(_) => (3, 3),
            EffectImage::Rgba(_) => (4, 3),
        };

        Layout {
            width: self.width() as usize,
            height: self.height() as usize,
            channels,
            color_channels,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.layout().channels
    }

    pub fn as_raw(&self) -> &[u8] {
        match self {
            EffectImage::Luma(img) => img.as_raw(),
            EffectImage::Rgb(img) => img.as_raw(),
            EffectImage::Rgba(img) => img.as_raw(),
        }
    }

    /// Builds a new image with the same layout, letting `f` write the
    /// samples. The destination starts as a copy of the source.
    pub fn map_samples<F>(&self, f: F) -> EffectImage
    where
        F: FnOnce(&[u8], &mut [u8], Layout),
    {
        let layout = self.layout();
        let mut output = self.clone();

        match &mut output {
            EffectImage::Luma(img) => f(self.as_raw(), &mut **img, layout),
            EffectImage::Rgb(img) => f(self.as_raw(), &mut **img, layout),
            EffectImage::Rgba(img) => f(self.as_raw(), &mut **img, layout),
        }

        output
    }

    /// Single-channel luminance copy. Alpha is dropped.
    pub fn to_luma(&self) -> GrayImage {
        match self {
            EffectImage::Luma(img) => img.clone(),
            EffectImage::Rgb(img) => ImageBuffer::from_fn(img.width(), img.height(), |x, y| {
                let Rgb([r, g, b]) = *img.get_pixel(x, y);
                Luma([luminance(r, g, b)])
            }),
            EffectImage::Rgba(img) => ImageBuffer::from_fn(img.width(), img.height(), |x, y| {
                let Rgba([r, g, b, _]) = *img.get_pixel(x, y);
                Luma([luminance(r, g, b)])
            }),
        }
    }

    /// Three-channel copy. Grey values are replicated, alpha is dropped.
    pub fn to_rgb(&self) -> RgbImage {
        match self {
            EffectImage::Luma(img) => ImageBuffer::from_fn(img.width(), img.height(), |x, y| {
                let Luma([v]) = *img.get_pixel(x, y);
                Rgb([v, v, v])
            }),
            EffectImage::Rgb(img) => img.clone(),
            EffectImage::Rgba(img) => ImageBuffer::from_fn(img.width(), img.height(), |x, y| {
                let Rgba([r, g, b, _]) = *img.get_pixel(x, y);
                Rgb([r, g, b])
            }),
        }
    }

    /// Colour copy that keeps the layout when it already carries colour and
    /// re-expands single-channel images to RGB.
    pub fn to_color(&self) -> EffectImage {
        match self {
            EffectImage::Luma(_) => EffectImage::Rgb(self.to_rgb()),
            _ => self.clone(),
        }
    }

    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            EffectImage::Luma(img) => DynamicImage::ImageLuma8(img),
            EffectImage::Rgb(img) => DynamicImage::ImageRgb8(img),
            EffectImage::Rgba(img) => DynamicImage::ImageRgba8(img),
        }
    }
}

impl From<GrayImage> for EffectImage {
    fn from(image: GrayImage) -> Self {
        EffectImage::Luma(image)
    }
}

impl From<RgbImage> for EffectImage {
    fn from(image: RgbImage) -> Self {
        EffectImage::Rgb(image)
    }
}

impl From<RgbaImage> for EffectImage {
    fn from(image: RgbaImage) -> Self {
        EffectImage::Rgba(image)
    }
}
