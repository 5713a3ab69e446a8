//! Command-line argument parsing for the studio.

use std::path::PathBuf;

use clap::Parser;

use crate::config::EffectChoice;

/// stellar-fx studio command-line arguments.
///
/// CLI values override settings loaded from the config file.
#[derive(Parser, Debug)]
#[command(name = "stellar-fx-studio", about = "Nebula and starfield effects in a window")]
pub struct CliArgs {
    /// Path to a RON config file (default: ./stellar-studio.ron).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Which effect(s) to open.
    #[arg(long, value_enum)]
    pub effect: Option<EffectChoice>,

    /// Nebula color, "#rrggbb" or "rrggbb".
    #[arg(long)]
    pub color: Option<String>,

    /// Nebula density.
    #[arg(long)]
    pub density: Option<f32>,

    /// Nebula animation speed.
    #[arg(long)]
    pub speed: Option<f32>,

    /// Star sparkle intensity on the nebula.
    #[arg(long)]
    pub intensity: Option<f32>,

    /// Starfield particle count.
    #[arg(long)]
    pub count: Option<usize>,

    /// Starfield point size.
    #[arg(long)]
    pub size: Option<f32>,

    /// Starfield drift speed.
    #[arg(long)]
    pub star_speed: Option<f32>,

    /// Fixed starfield seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter (error, warn, info, debug, trace or env_logger syntax).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,
}
