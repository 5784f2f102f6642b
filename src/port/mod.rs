//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!     HTTP ─────────▶│  Application services   │
//!                    └───────────┬─────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!          ┌───────────┐                  ┌─────────────┐
//!          │   Store   │                  │BreedCatalog │
//!          │  Adapter  │                  │   Adapter   │
//!          └───────────┘                  └─────────────┘
//! ```
//!
//! - [`outbound::Store`] - Persistence for spy cats, missions and targets
//! - [`outbound::BreedCatalog`] - Valid breed lookup

pub mod outbound;
