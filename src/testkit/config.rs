//! Canonical test configurations.

use std::sync::Arc;
use std::time::Duration;

use super::domain::KNOWN_BREEDS;
use crate::adapter::outbound::catalog::FixedCatalog;
use crate::adapter::outbound::memory::MemoryStore;
use crate::application::Services;
use crate::infrastructure::config::{CatalogConfig, CatalogKind};
use crate::port::outbound::Store;

/// Catalog timeout short enough to keep failing tests fast.
pub const CATALOG_TIMEOUT: Duration = Duration::from_secs(2);

/// Static catalog config serving [`KNOWN_BREEDS`].
pub fn static_catalog() -> CatalogConfig {
    CatalogConfig {
        kind: CatalogKind::Static,
        breeds: KNOWN_BREEDS.iter().map(ToString::to_string).collect(),
        ..CatalogConfig::default()
    }
}

/// Services over `store` with a fixed catalog of [`KNOWN_BREEDS`].
pub fn services(store: Arc<dyn Store>) -> Services {
    Services::new(
        store,
        Arc::new(FixedCatalog::from_names(KNOWN_BREEDS)),
        CATALOG_TIMEOUT,
    )
}

/// Services over a fresh in-memory store.
pub fn memory_services() -> Services {
    services(Arc::new(MemoryStore::new()))
}
