//! faderkit gallery - every widget on one window.

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use faderkit_config::{FaderkitConfig, user_config_path};
use faderkit_gallery::{GalleryApp, GallerySettings, write_config};

/// Interactive gallery of faderkit synth controls.
#[derive(Parser, Debug)]
#[command(name = "faderkit-gallery")]
#[command(about = "Interactive gallery of faderkit synth controls")]
#[command(version)]
struct Args {
    /// Config file with theme tokens and feel (default: user config path)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of sequencer steps
    #[arg(long, default_value = "16")]
    pattern_length: usize,

    /// Oscilloscope test tone frequency in Hz
    #[arg(long, default_value = "110")]
    scope_hz: f32,

    /// Write the effective config (defaults merged with the file) back to
    /// the config path, then exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> eframe::Result<()> {
    use tracing_subscriber::EnvFilter;

    // Bridge log:: records from eframe/egui into tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    tracing_log::LogTracer::init().ok();

    let args = Args::parse();
    if args.write_config {
        // An invalid file is reported, never replaced by defaults.
        let path = args.config.unwrap_or_else(user_config_path);
        let written = FaderkitConfig::load_or_default(&path)
            .and_then(|config| write_config(Some(&path), &config));
        if let Err(e) = written {
            tracing::error!(path = %path.display(), error = %e, "failed to write config");
            std::process::exit(1);
        }
        return Ok(());
    }

    let settings = GallerySettings {
        config_path: args.config,
        pattern_length: args.pattern_length,
        scope_hz: args.scope_hz,
    };

    tracing::info!("Starting faderkit gallery");
    tracing::info!(
        steps = settings.pattern_length,
        scope_hz = settings.scope_hz,
        "gallery config"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("faderkit"),
        ..Default::default()
    };

    eframe::run_native(
        "faderkit",
        options,
        Box::new(move |cc| Ok(Box::new(GalleryApp::new(cc, settings)))),
    )
}
