//! Native preview window for the hero particle field
//!
//! Run with: cargo run --features native --bin hero-field-preview

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use hero_field::core::FieldConfig;
use hero_field::preview::PreviewApp;

#[derive(Parser, Debug)]
#[command(name = "hero-field-preview", about = "Preview the hero particle field")]
struct Args {
    /// Initial window width
    #[arg(long, default_value_t = 1280.0)]
    width: f32,
    /// Initial window height
    #[arg(long, default_value_t = 640.0)]
    height: f32,
    /// RNG seed for a reproducible layout
    #[arg(long)]
    seed: Option<u64>,
    /// JSON field config
    #[arg(long, env = "HERO_FIELD_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hero_field=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = match &args.config {
        Some(path) => FieldConfig::from_path(path)?,
        None => FieldConfig::default(),
    };
    info!(points = config.point_count, "Starting preview");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("hero-field preview")
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    let seed = args.seed;
    eframe::run_native(
        "hero-field preview",
        options,
        Box::new(move |cc| Ok(Box::new(PreviewApp::new(cc, config, seed)))),
    )?;
    Ok(())
}
