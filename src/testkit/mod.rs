//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for spy cat, mission and target inputs.
//! - [`config`] - Canonical test configurations and service wiring.

pub mod config;
pub mod domain;
