use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use image_effect::EffectKind;
use image_pipeline::{
    Collaborators, DOWNLOAD_FILE_NAME, FileFont, FilterSettings, SystemFont,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "image-filter")]
#[command(version, about = "Apply photo filters and a text overlay to an image", long_about = None)]
pub struct Cli {
    /// Print debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter an image and write the result as PNG
    Apply(ApplyArgs),

    /// List the available effects
    Effects {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default settings as TOML
    Config,
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Input image (JPEG or PNG)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output PNG file
    #[arg(short, long, value_name = "FILE", default_value = DOWNLOAD_FILE_NAME)]
    pub output: PathBuf,

    /// Settings file, overridden by the flags below
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable an effect, repeatable (see `image-filter effects`)
    #[arg(short, long = "effect", value_name = "NAME", value_parser = parse_effect)]
    pub effects: Vec<EffectKind>,

    /// Brightness factor, 1.0 leaves the image unchanged
    #[arg(long, value_name = "FLOAT")]
    pub brightness: Option<f32>,

    /// Contrast factor, 1.0 leaves the image unchanged
    #[arg(long, value_name = "FLOAT")]
    pub contrast: Option<f32>,

    /// Sharpness factor, 1.0 leaves the image unchanged
    #[arg(long, value_name = "FLOAT")]
    pub sharpness: Option<f32>,

    /// Draw this text centered on the result
    #[arg(short, long, value_name = "TEXT")]
    pub text: Option<String>,

    /// Text colour (#RGB, #RRGGBB or a colour name)
    #[arg(long, value_name = "COLOR")]
    pub text_color: Option<String>,

    /// Text size in pixels (10 to 100)
    #[arg(long, value_name = "PX")]
    pub text_size: Option<u32>,

    /// Top edge of the text in pixels
    #[arg(long, value_name = "PX")]
    pub text_y: Option<u32>,

    /// Font file for the text
    #[arg(long, value_name = "FILE", conflicts_with = "font_family")]
    pub font: Option<PathBuf>,

    /// Font family looked up in the system font directories
    #[arg(long, value_name = "NAME")]
    pub font_family: Option<String>,

    /// Also write the original and the result side by side
    #[arg(long, value_name = "FILE")]
    pub compare: Option<PathBuf>,
}

fn parse_effect(name: &str) -> std::result::Result<EffectKind, String> {
    EffectKind::from_name(name).ok_or_else(|| {
        let names: Vec<_> = EffectKind::all_effects().iter().map(|k| k.name()).collect();
        format!("unknown effect `{name}`, expected one of: {}", names.join(", "))
    })
}

impl ApplyArgs {
    /// Settings file (or defaults) with the command line flags applied.
    pub fn settings(&self) -> Result<FilterSettings> {
        let mut settings = match &self.config {
            Some(path) => FilterSettings::load(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => FilterSettings::default(),
        };

        let effects = &mut settings.effects;
        for kind in &self.effects {
            effects.set_effect(*kind, true);
        }

        if let Some(factor) = self.brightness {
            effects.brightness = factor;
        }
        if let Some(factor) = self.contrast {
            effects.contrast = factor;
        }
        if let Some(factor) = self.sharpness {
            effects.sharpness = factor;
        }

        let text = &mut settings.text;
        if let Some(content) = &self.text {
            text.enabled = true;
            text.text = content.clone();
        }
        if let Some(color) = &self.text_color {
            text.color = color.clone();
        }
        if let Some(size) = self.text_size {
            text.size = size;
        }
        if self.text_y.is_some() {
            text.y = self.text_y;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn collaborators(&self) -> Collaborators {
        let collaborators = Collaborators::new();

        match (&self.font, &self.font_family) {
            (Some(path), _) => collaborators.with_fonts(FileFont::new(path)),
            (None, Some(family)) => collaborators.with_fonts(SystemFont::new(family.as_str())),
            (None, None) => collaborators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_args(args: &[&str]) -> ApplyArgs {
        let mut argv = vec!["image-filter", "apply", "in.png"];
        argv.extend_from_slice(args);

        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Apply(args) => args,
            command => panic!("unexpected command {command:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let args = apply_args(&[]);
        assert_eq!(args.output, PathBuf::from("filtered_image.png"));
        assert_eq!(args.settings().unwrap(), FilterSettings::default());
    }

    #[test]
    fn test_flags_build_settings() {
        let args = apply_args(&[
            "-e", "grayscale", "--effect", "warm_tone", "--contrast", "1.5", "--text", "HI",
            "--text-y", "5", "--text-color", "red",
        ]);
        let settings = args.settings().unwrap();

        assert!(settings.effects.grayscale);
        assert!(settings.effects.warm_tone);
        assert!(!settings.effects.invert);
        assert_eq!(settings.effects.contrast, 1.5);
        assert!(settings.text.is_active());
        assert_eq!(settings.text.y, Some(5));
        assert_eq!(settings.text.color, "red");
    }

    #[test]
    fn test_rejects_unknown_effect() {
        let parsed = Cli::try_parse_from(["image-filter", "apply", "in.png", "-e", "sepia"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_rejects_out_of_range_factor() {
        assert!(apply_args(&["--brightness", "4"]).settings().is_err());
    }

    #[test]
    fn test_config_file_is_overridden_by_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[effects]\nblur = true\nsharpness = 2.0\n").unwrap();

        let path = path.to_string_lossy().to_string();
        let settings = apply_args(&["-c", &path, "--sharpness", "0.5"])
            .settings()
            .unwrap();

        assert!(settings.effects.blur);
        assert_eq!(settings.effects.sharpness, 0.5);
    }
}
