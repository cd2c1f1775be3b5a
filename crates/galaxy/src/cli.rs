//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use galaxy_config::{Config, ConfigError};
use galaxy_core::Theme;

/// An animated spiral-galaxy star field for your terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Color theme (dark or light).
    #[arg(long)]
    pub theme: Option<Theme>,
    /// Target frames per second.
    #[arg(long)]
    pub fps: Option<u32>,
    /// Seed for a reproducible star layout.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Keep the star field still.
    #[arg(long)]
    pub reduced_motion: bool,
    /// Settings file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Write logs to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    /// Log debug messages.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Load the settings file and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => match Config::load_default() {
                Err(ConfigError::NoConfigDir) => {
                    log::warn!("no configuration directory, using defaults");
                    Config::default()
                }
                other => other?,
            },
        };
        Ok(self.apply(config))
    }

    /// Settings file the app reads and writes: `--config` or the default.
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| Config::default_path().ok())
    }

    /// Override settings with any values given on the command line.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.reduced_motion {
            config.reduced_motion = true;
        }
        config
    }
}
