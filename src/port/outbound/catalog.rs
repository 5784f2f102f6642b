//! Breed catalog port.

use async_trait::async_trait;

use crate::domain::Breed;
use crate::error::Result;

/// Source of the currently valid cat breeds.
///
/// Consulted on every spy cat registration; implementations should not
/// cache across calls unless the source is static.
///
/// # Errors
///
/// [`list_breeds`](Self::list_breeds) fails on transport, status, or decode
/// errors from the underlying service.
#[async_trait]
pub trait BreedCatalog: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Fetch the full breed list.
    async fn list_breeds(&self) -> Result<Vec<Breed>>;
}
