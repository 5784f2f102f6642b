//! Command-line interface definitions.
//!
//! Defines the CLI structure for the spycats binary using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Spy Cat Agency mission service
#[derive(Parser, Debug)]
#[command(name = "spycats")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API until interrupted
    Serve(ConfigPathArg),

    /// Apply pending database migrations and exit
    Migrate(ConfigPathArg),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `spycats config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Load and validate a configuration file.
    Validate(ConfigPathArg),
}

/// Shared `--config` argument.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}
