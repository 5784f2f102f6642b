//! Infrastructure configuration modules.

pub mod logging;
pub mod settings;

pub use logging::LoggingConfig;
pub use settings::{CatalogConfig, CatalogKind, Config, DatabaseConfig, ServerConfig};
