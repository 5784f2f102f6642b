//! Composition root: turns a [`Config`] into running services.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::catalog::{FixedCatalog, TheCatApiClient};
use crate::adapter::outbound::sqlite::{create_pool, run_migrations, DbPool, SqliteStore};
use crate::application::Services;
use crate::error::Result;
use crate::infrastructure::config::{CatalogConfig, CatalogKind, Config, DatabaseConfig};
use crate::port::outbound::BreedCatalog;

/// Open the database pool and bring the schema up to date.
///
/// # Errors
/// Returns an error if the pool cannot be built or a migration fails.
pub fn open_database(config: &DatabaseConfig) -> Result<DbPool> {
    let pool = create_pool(&config.path, config.pool_size)?;
    let applied = run_migrations(&pool)?;
    info!(path = %config.path, applied, "Database ready");
    Ok(pool)
}

/// Build the breed catalog selected by configuration.
///
/// # Errors
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_catalog(config: &CatalogConfig) -> Result<Arc<dyn BreedCatalog>> {
    let catalog: Arc<dyn BreedCatalog> = match config.kind {
        CatalogKind::TheCatApi => Arc::new(TheCatApiClient::from_config(config)?),
        CatalogKind::Static => Arc::new(FixedCatalog::from_names(config.breeds.iter().cloned())),
    };
    info!(catalog = catalog.name(), "Breed catalog configured");
    Ok(catalog)
}

/// Wire the store, catalog and services together.
///
/// # Errors
/// Returns an error if the database or catalog cannot be set up.
pub fn build_services(config: &Config) -> Result<Services> {
    let pool = open_database(&config.database)?;
    let store = Arc::new(SqliteStore::new(pool));
    let catalog = build_catalog(&config.catalog)?;
    Ok(Services::new(store, catalog, config.catalog.timeout()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn static_catalog_is_selected_by_kind() {
        let config = CatalogConfig {
            kind: CatalogKind::Static,
            breeds: vec!["Siamese".into()],
            ..CatalogConfig::default()
        };
        let catalog = build_catalog(&config).unwrap();
        assert_eq!(catalog.name(), "fixed");
    }

    #[test]
    fn open_database_applies_migrations_once() {
        let dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("agency.db").display().to_string(),
            pool_size: 2,
        };

        let pool = open_database(&config).unwrap();
        assert_eq!(run_migrations(&pool).unwrap(), 0);
    }
}
