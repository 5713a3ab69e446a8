use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stellar_fx::device::GpuInit;
use stellar_fx::logging::{init_logging, LoggingConfig};
use stellar_fx::window::{Runtime, RuntimeConfig, WindowConfig};
use winit::dpi::LogicalSize;

mod app;
mod cli;
mod config;

use app::{kinds_for, StudioApp};
use cli::CliArgs;
use config::{StudioConfig, DEFAULT_CONFIG_FILE};

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut config = StudioConfig::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    config.apply_cli_overrides(&args);

    init_logging(match config.log_level.clone() {
        Some(filter) => LoggingConfig::with_filter(filter),
        None => LoggingConfig::default(),
    });

    log::info!("effect: {:?} (config {})", config.effect, config_path.display());

    let kinds = kinds_for(config.effect);
    let windows = kinds
        .iter()
        .map(|kind| WindowConfig {
            title: kind.title().to_string(),
            initial_size: LogicalSize::new(config.window.width as f64, config.window.height as f64),
            transparent: config.window.transparent,
        })
        .collect();

    let runtime = RuntimeConfig {
        windows,
        gpu: GpuInit {
            antialias: config.window.antialias,
            ..GpuInit::default()
        },
    };

    let app = StudioApp::new(kinds, config.nebula, config.starfield);
    Runtime::run(runtime, app)
}
