//! Outbound ports: what the services need from the outside world.

pub mod catalog;
pub mod store;

pub use catalog::BreedCatalog;
pub use store::{Change, ChangeSet, Store};
