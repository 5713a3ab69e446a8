//! Studio configuration with RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};
use stellar_fx::effects::{NebulaOptions, StarfieldOptions};

use crate::cli::CliArgs;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "stellar-studio.ron";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),
}

/// Which effects get a window.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum EffectChoice {
    #[default]
    Nebula,
    Starfield,
    Both,
}

/// Top-level studio configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StudioConfig {
    pub window: WindowSettings,
    pub effect: EffectChoice,
    pub nebula: NebulaOptions,
    pub starfield: StarfieldOptions,
    /// `env_logger` filter; `None` defers to `RUST_LOG`.
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    /// Logical pixels.
    pub width: u32,
    /// Logical pixels.
    pub height: u32,
    pub transparent: bool,
    /// Request 4x MSAA.
    pub antialias: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            transparent: false,
            antialias: true,
        }
    }
}

impl StudioConfig {
    /// Loads `path`, or returns defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: StudioConfig = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(effect) = args.effect {
            self.effect = effect;
        }
        if let Some(ref color) = args.color {
            self.nebula.color = color.as_str().into();
        }
        if let Some(density) = args.density {
            self.nebula.density = density;
        }
        if let Some(speed) = args.speed {
            self.nebula.speed = speed;
        }
        if let Some(intensity) = args.intensity {
            self.nebula.intensity = intensity;
        }
        if let Some(count) = args.count {
            self.starfield.count = count;
        }
        if let Some(size) = args.size {
            self.starfield.size = size;
        }
        if let Some(speed) = args.star_speed {
            self.starfield.speed = speed;
        }
        if let Some(seed) = args.seed {
            self.starfield.seed = Some(seed);
        }
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref level) = args.log_level {
            self.log_level = Some(level.clone());
        }
    }
}
