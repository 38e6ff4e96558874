// cargo test -p image-effect --test catalog_test

use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use image_effect::{EffectImage, EffectKind, apply};

fn factor_for(kind: EffectKind) -> Option<f32> {
    kind.has_factor().then_some(1.5)
}

fn catalog() -> impl Iterator<Item = EffectKind> {
    EffectKind::all_effects()
        .iter()
        .copied()
        .filter(|kind| !kind.is_external())
}

fn pattern(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 37 % 256) as u8,
            (y * 53 % 256) as u8,
            ((x + y) * 11 % 256) as u8,
        ])
    })
}

#[test]
fn test_every_effect_keeps_dimensions() {
    let image = EffectImage::Rgb(pattern(17, 9));

    for kind in catalog() {
        let out = apply(kind.name(), &image, factor_for(kind)).unwrap();
        assert_eq!(out.dimensions(), (17, 9), "{kind}");
    }
}

#[test]
fn test_every_effect_is_deterministic() {
    let image = EffectImage::Rgb(pattern(12, 12));

    for kind in catalog() {
        let first = apply(kind.name(), &image, factor_for(kind)).unwrap();
        let second = apply(kind.name(), &image, factor_for(kind)).unwrap();
        assert_eq!(first, second, "{kind}");
    }
}

#[test]
fn test_every_effect_accepts_single_channel() {
    let image = EffectImage::Luma(GrayImage::from_fn(8, 8, |x, y| Luma([(x * 30 + y) as u8])));

    for kind in catalog() {
        let out = apply(kind.name(), &image, factor_for(kind)).unwrap();
        let expected = match kind {
            EffectKind::CoolTone | EffectKind::WarmTone => 3,
            _ => 1,
        };
        assert_eq!(out.channel_count(), expected, "{kind}");
    }
}

#[test]
fn test_alpha_survives_color_effects() {
    let image = EffectImage::Rgba(RgbaImage::from_pixel(6, 6, Rgba([90, 120, 150, 77])));

    for kind in catalog().filter(|k| !matches!(k, EffectKind::Grayscale | EffectKind::PencilSketch)) {
        let EffectImage::Rgba(out) = apply(kind.name(), &image, factor_for(kind)).unwrap() else {
            panic!("{kind} dropped the alpha channel");
        };
        assert!(out.pixels().all(|p| p[3] == 77), "{kind}");
    }
}

#[test]
fn test_kernels_leave_tiny_images_alone() {
    let image = EffectImage::Rgb(pattern(2, 2));

    for kind in [
        EffectKind::Blur,
        EffectKind::Emboss,
        EffectKind::Contour,
        EffectKind::Hdr,
        EffectKind::Cartoon,
        EffectKind::Watercolor,
    ] {
        assert_eq!(apply(kind.name(), &image, None).unwrap(), image, "{kind}");
    }
}

#[test]
fn test_unit_factor_is_identity() {
    let image = EffectImage::Rgb(pattern(10, 7));

    for kind in catalog().filter(|k| k.has_factor()) {
        assert_eq!(apply(kind.name(), &image, Some(1.0)).unwrap(), image, "{kind}");
    }
}

#[test]
fn test_grayscale_then_invert() {
    let image = EffectImage::Rgb(RgbImage::from_pixel(10, 10, Rgb([200, 100, 50])));
    let gray = apply("grayscale", &image, None).unwrap();
    let inverted = apply("invert", &gray, None).unwrap();

    assert_eq!(inverted, EffectImage::Luma(GrayImage::from_pixel(10, 10, Luma([131]))));
}
