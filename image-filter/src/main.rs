//! Command line front end of the filter pipeline.
//!
//! Reads an image, applies the requested effects and text overlay, and
//! writes the result as PNG.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{ApplyArgs, Cli, Commands};
use image_effect::EffectKind;
use image_pipeline::{FilterSettings, codec, process};
use std::fs;

fn init_logger(verbose: bool) {
    use std::io::Write;

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("image_filter", level)
        .filter_module("image_pipeline", level)
        .filter_module("image_effect", level)
        .parse_default_env()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Apply(args) => apply(&args),
        Commands::Effects { json } => list_effects(json),
        Commands::Config => {
            print!("{}", FilterSettings::default().to_toml_string()?);
            Ok(())
        }
    }
}

fn apply(args: &ApplyArgs) -> Result<()> {
    let settings = args.settings()?;
    let bytes = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let output = process(&bytes, &settings, &args.collaborators())
        .with_context(|| format!("failed to filter {}", args.input.display()))?;

    for warning in &output.warnings {
        log::warn!("{warning}");
    }

    fs::write(&args.output, &output.png)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    log::info!(
        "saved {}x{} image to {}",
        output.filtered.width(),
        output.filtered.height(),
        args.output.display()
    );

    if let Some(path) = &args.compare {
        codec::side_by_side(&output.original, &output.filtered)
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("saved comparison to {}", path.display());
    }

    Ok(())
}

fn list_effects(json: bool) -> Result<()> {
    let effects = EffectKind::all_effects();

    if json {
        let entries: Vec<_> = effects
            .iter()
            .map(|kind| {
                serde_json::json!({
                    "name": kind.name(),
                    "label": kind.label(),
                    "description": kind.description(),
                    "factor": kind.has_factor(),
                    "external": kind.is_external(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for kind in effects {
        let suffix = if kind.has_factor() {
            " (factor)"
        } else if kind.is_external() {
            " (needs a segmentation service)"
        } else {
            ""
        };
        println!("{:<14} {}{suffix}", kind.name(), kind.description());
    }

    Ok(())
}
