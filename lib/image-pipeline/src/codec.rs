//! Bytes in, bytes out.

use crate::{Error, Result};
use image::{DynamicImage, ImageFormat, RgbaImage, imageops};
use image_effect::EffectImage;
use std::io::Cursor;

/// Decode uploaded JPEG or PNG bytes.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(Error::InvalidInput("empty upload".to_string()));
    }

    let image = image::load_from_memory(bytes)
        .map_err(|e| Error::InvalidInput(format!("not a decodable image: {e}")))?;

    if image.width() == 0 || image.height() == 0 {
        return Err(Error::InvalidInput("image has no pixels".to_string()));
    }

    log::debug!(
        "decoded {}x{} {:?} image",
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image)
}

pub fn encode_png(image: &EffectImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    let written = match image {
        EffectImage::Luma(img) => img.write_to(&mut buf, ImageFormat::Png),
        EffectImage::Rgb(img) => img.write_to(&mut buf, ImageFormat::Png),
        EffectImage::Rgba(img) => img.write_to(&mut buf, ImageFormat::Png),
    };
    written.map_err(|e| Error::Encode(e.to_string()))?;

    Ok(buf.into_inner())
}

/// Original on the left, filtered on the right, on a transparent canvas tall
/// enough for both.
pub fn side_by_side(original: &DynamicImage, filtered: &EffectImage) -> RgbaImage {
    let left = original.to_rgba8();
    let right = filtered.clone().into_dynamic().to_rgba8();

    let width = left.width() + right.width();
    let height = left.height().max(right.height());
    let mut canvas = RgbaImage::new(width, height);

    imageops::replace(&mut canvas, &left, 0, 0);
    imageops::replace(&mut canvas, &right, i64::from(left.width()), 0);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba};

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode(&[]), Err(Error::InvalidInput(_))));
        assert!(matches!(
            decode(b"definitely not an image"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_png_round_trip_keeps_layout() {
        let gray = EffectImage::Luma(GrayImage::from_pixel(3, 3, Luma([131])));
        let png = encode_png(&gray).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let decoded = decode(&png).unwrap();
        assert_eq!(decoded, DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 3, Luma([131]))));
    }

    #[test]
    fn test_side_by_side() {
        let original = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 3, Rgb([10, 20, 30])));
        let filtered = EffectImage::Luma(GrayImage::from_pixel(2, 3, Luma([99])));

        let view = side_by_side(&original, &filtered);
        assert_eq!(view.dimensions(), (4, 3));
        assert_eq!(view.get_pixel(1, 2), &Rgba([10, 20, 30, 255]));
        assert_eq!(view.get_pixel(2, 0), &Rgba([99, 99, 99, 255]));
    }
}
