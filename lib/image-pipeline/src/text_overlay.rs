//! Centered text drawn onto the pipeline output.

use crate::{FontProvider, Result, TextOverlayConfig, color};
use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Luma, Rgb, Rgba};
use image_effect::{EffectImage, base_effect::luminance};
use imageproc::drawing::{draw_text_mut, text_size};

/// Left edge that centers a `text_width` wide run in `image_width`, rounded
/// towards negative infinity. Negative when the text is wider than the image.
pub fn centered_x(image_width: u32, text_width: u32) -> i32 {
    (i64::from(image_width) - i64::from(text_width)).div_euclid(2) as i32
}

/// Scale at which one em of `font` is `size` pixels tall.
pub fn font_scale(font: &FontArc, size: u32) -> PxScale {
    let size = size as f32;
    match font.units_per_em() {
        Some(units) if units > 0.0 => PxScale::from(size * font.height_unscaled() / units),
        _ => PxScale::from(size),
    }
}

/// Extra pixels between consecutive lines.
pub const LINE_SPACING: u32 = 4;

fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.trim_end_matches('\r'))
}

/// Distance between the tops of two consecutive lines.
pub fn line_advance(font: &FontArc, size: u32) -> u32 {
    let scaled = font.as_scaled(font_scale(font, size));
    (scaled.height() + scaled.line_gap()).ceil().max(0.0) as u32 + LINE_SPACING
}

/// Measured `(width, height)` of `text` at `size`. Multi-line text is as
/// wide as its widest line.
pub fn measure(font: &FontArc, size: u32, text: &str) -> (u32, u32) {
    let scale = font_scale(font, size);
    let advance = line_advance(font, size);

    let mut width = 0;
    let mut height = 0;
    for (i, line) in lines(text).enumerate() {
        let (w, h) = text_size(scale, font, line);
        width = width.max(w);
        height = height.max(i as u32 * advance + h);
    }
    (width, height)
}

/// Draw the overlay onto a copy of `image`.
///
/// The text block is centered horizontally and its lines share the same
/// left edge. Inactive overlays return the image unchanged without touching
/// `fonts`. A font that cannot be loaded is a `ResourceUnavailable` error.
pub fn render(
    image: &EffectImage,
    config: &TextOverlayConfig,
    fonts: &dyn FontProvider,
) -> Result<EffectImage> {
    if !config.is_active() {
        return Ok(image.clone());
    }

    let (width, height) = image.dimensions();
    config.validate_for(height)?;

    let Rgba([r, g, b, _]) = color::parse_color(&config.color)?;
    let font = fonts.load()?;
    let scale = font_scale(&font, config.size);
    let advance = line_advance(&font, config.size) as i32;

    let (text_width, _) = measure(&font, config.size, &config.text);
    let x = centered_x(width, text_width);
    let top = config.resolved_y(height) as i32;

    log::debug!(
        "drawing {:?} at ({x}, {top}), {}px, {text_width}px wide",
        config.text,
        config.size
    );

    let mut canvas = image.clone();
    for (i, line) in lines(&config.text).enumerate() {
        let y = top.saturating_add(advance.saturating_mul(i as i32));
        if y >= height as i32 {
            break;
        }

        match &mut canvas {
            EffectImage::Luma(img) => {
                draw_text_mut(img, Luma([luminance(r, g, b)]), x, y, scale, &font, line)
            }
            EffectImage::Rgb(img) => draw_text_mut(img, Rgb([r, g, b]), x, y, scale, &font, line),
            EffectImage::Rgba(img) => {
                draw_text_mut(img, Rgba([r, g, b, 255]), x, y, scale, &font, line)
            }
        }
    }

    Ok(canvas)
}
