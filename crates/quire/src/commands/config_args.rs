//! Arguments shared by commands that load the configuration file.

use std::path::PathBuf;

use clap::Args;
use quire_config::{ConfigError, LoadedConfig, Overrides};

/// Config file location and command-line overrides.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long, env = "QUIRE_CONFIG")]
    config: Option<PathBuf>,

    /// Preset applied beneath the file's values (overrides config).
    #[arg(long)]
    preset: Option<String>,

    /// Theme (overrides config).
    #[arg(long)]
    theme: Option<String>,

    /// Project name (overrides config).
    #[arg(long)]
    project: Option<String>,

    /// Release string (overrides config).
    #[arg(long)]
    release: Option<String>,

    /// Enable verbose output (show resolution logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConfigArgs {
    /// Load and resolve the configuration with these overrides applied.
    pub(crate) fn load(self) -> Result<LoadedConfig, ConfigError> {
        let overrides = Overrides {
            preset: self.preset,
            theme: self.theme,
            project: self.project,
            release: self.release,
        };
        quire_config::load(self.config.as_deref(), Some(&overrides))
    }
}
