//! Command-line interface.

pub mod command;
pub mod config;
pub mod migrate;
pub mod serve;

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::Config;

pub use command::{Cli, Commands, ConfigCommand};

/// Dispatch a parsed command line.
///
/// # Errors
/// Returns the first error raised by the selected command.
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve(args) => serve::execute(&args.config).await,
        Commands::Migrate(args) => migrate::execute(&args.config),
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args.config),
    }
}

/// Load configuration and start logging.
pub(crate) fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load(path)?;
    config.init_logging();
    Ok(config)
}
