//! Catalog backed by a fixed breed list.

use async_trait::async_trait;

use crate::domain::Breed;
use crate::error::Result;
use crate::port::outbound::catalog::BreedCatalog;

/// A [`BreedCatalog`] that always answers with the same breeds.
///
/// Used for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedCatalog {
    breeds: Vec<Breed>,
}

impl FixedCatalog {
    #[must_use]
    pub fn new(breeds: Vec<Breed>) -> Self {
        Self { breeds }
    }

    /// Build from breed names only.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Breed::named).collect())
    }
}

#[async_trait]
impl BreedCatalog for FixedCatalog {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn list_breeds(&self) -> Result<Vec<Breed>> {
        Ok(self.breeds.clone())
    }
}
