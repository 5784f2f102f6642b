//! Handler for the `migrate` command.

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::bootstrap::open_database;

/// Execute the migrate command.
pub fn execute(config_path: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    open_database(&config.database)?;
    println!("Database {} is up to date", config.database.path);
    Ok(())
}
