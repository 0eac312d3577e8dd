//! Quire CLI - documentation site configuration.
//!
//! Provides commands for:
//! - `check`: Validate the site configuration and report every problem
//! - `resolve`: Print the resolved configuration as JSON for the renderer
//! - `presets`: List built-in configuration presets

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use commands::{CheckArgs, ResolveArgs};
use output::Output;

/// Quire - documentation site configuration.
#[derive(Parser)]
#[command(name = "quire", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration file.
    Check(CheckArgs),
    /// Print the resolved configuration as JSON.
    Resolve(ResolveArgs),
    /// List built-in presets.
    Presets,
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Check(args) => args.config.verbose,
            Self::Resolve(args) => args.config.verbose,
            Self::Presets => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.command.verbose()))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
        Commands::Presets => commands::presets::execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    }
}
