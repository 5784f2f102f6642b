//! Breed catalog adapters.

mod fixed;
mod thecatapi;

pub use fixed::FixedCatalog;
pub use thecatapi::TheCatApiClient;
