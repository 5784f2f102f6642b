//! Handler for the `config` command group.

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::{CatalogKind, Config};

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    println!("Configuration {} is valid", path.display());
    println!("  listen:   {}", config.server.address());
    println!(
        "  logging:  {} ({})",
        config.logging.level, config.logging.format
    );
    println!(
        "  database: {} (pool {})",
        config.database.path, config.database.pool_size
    );
    match config.catalog.kind {
        CatalogKind::TheCatApi => println!(
            "  catalog:  {} (timeout {}ms)",
            config.catalog.url, config.catalog.timeout_ms
        ),
        CatalogKind::Static => println!(
            "  catalog:  static, {} breeds",
            config.catalog.breeds.len()
        ),
    }
    Ok(())
}
