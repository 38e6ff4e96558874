use image::{Rgb, RgbImage};
use image_effect::{EffectImage, EffectKind, apply};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let source = EffectImage::Rgb(RgbImage::from_fn(320, 240, |x, y| {
        let r = (x * 255 / 320) as u8;
        let g = (y * 255 / 240) as u8;
        let b = ((x + y) * 255 / 560) as u8;
        Rgb([r, g, b])
    }));

    for kind in EffectKind::all_effects().iter().filter(|kind| !kind.is_external()) {
        let factor = kind.has_factor().then_some(1.5);
        let output = apply(kind.name(), &source, factor)?;
        let path = output_dir.join(format!("{}_effect.png", kind.name()));
        output.into_dynamic().save(&path)?;

        println!("✓ {:<14} -> {}", kind.label(), path.display());
    }

    Ok(())
}
