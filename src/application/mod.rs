//! Application services (use cases).
//!
//! Each service loads what it needs from the [`Store`], checks the agency
//! rules, and writes back. Services keep no state between calls.
//!
//! [`Store`]: crate::port::outbound::Store

pub mod mission;
pub mod spy_cat;
pub mod target;

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

pub use mission::MissionService;
pub use spy_cat::SpyCatService;
pub use target::TargetService;

use crate::domain::DomainError;
use crate::error::Result;
use crate::port::outbound::{BreedCatalog, Store};

/// The three agency services, sharing one store.
#[derive(Clone)]
pub struct Services {
    pub spy_cats: Arc<SpyCatService>,
    pub missions: Arc<MissionService>,
    pub targets: Arc<TargetService>,
}

impl Services {
    pub fn new(
        store: Arc<dyn Store>,
        catalog: Arc<dyn BreedCatalog>,
        catalog_timeout: Duration,
    ) -> Self {
        Self {
            spy_cats: Arc::new(SpyCatService::new(
                Arc::clone(&store),
                catalog,
                catalog_timeout,
            )),
            missions: Arc::new(MissionService::new(Arc::clone(&store))),
            targets: Arc::new(TargetService::new(store)),
        }
    }
}

/// Log a business rejection and return it.
fn reject<T>(operation: &'static str, err: DomainError) -> Result<T> {
    warn!(operation, reason = %err, "Request rejected");
    Err(err.into())
}
