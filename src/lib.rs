//! Spycats - mission management for the Spy Cat Agency.
//!
//! The agency keeps three records: spy cats, missions, and the targets each
//! mission pursues. This crate enforces the rules tying them together: a
//! mission carries one to three targets, a cat works at most one mission at
//! a time, completed work is frozen, and completing the last open target
//! completes its mission.
//!
//! # Architecture
//!
//! - [`domain`] - Entities, identifiers and business errors
//! - [`port`] - Traits for the record store and the breed catalog
//! - [`application`] - The spy cat, mission and target services
//! - [`adapter`] - HTTP API and CLI (inbound); SQLite, in-memory and
//!   breed catalog implementations (outbound)
//! - [`infrastructure`] - Configuration and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Fixtures for integration tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use spycats::adapter::outbound::catalog::FixedCatalog;
//! use spycats::adapter::outbound::memory::MemoryStore;
//! use spycats::application::Services;
//! use spycats::domain::{NewMission, NewTarget};
//!
//! # async fn run() -> spycats::error::Result<()> {
//! let services = Services::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(FixedCatalog::from_names(["Siamese"])),
//!     Duration::from_secs(5),
//! );
//! let mission = services
//!     .missions
//!     .create(NewMission {
//!         completed: false,
//!         targets: vec![NewTarget::open("Paris", "FR")],
//!     })
//!     .await?;
//! assert_eq!(mission.targets.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
