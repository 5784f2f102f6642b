//! Spy cat registration, salary changes and retirement.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{error, info};

use super::reject;
use crate::domain::breed::contains_breed;
use crate::domain::spy_cat::validate_salary;
use crate::domain::{DomainError, NewSpyCat, SpyCat, SpyCatId};
use crate::error::{Error, Result};
use crate::port::outbound::{BreedCatalog, Store};

/// Spy cat use cases.
pub struct SpyCatService {
    store: Arc<dyn Store>,
    catalog: Arc<dyn BreedCatalog>,
    /// Bound on a single breed catalog lookup.
    catalog_timeout: Duration,
}

impl SpyCatService {
    pub fn new(
        store: Arc<dyn Store>,
        catalog: Arc<dyn BreedCatalog>,
        catalog_timeout: Duration,
    ) -> Self {
        Self {
            store,
            catalog,
            catalog_timeout,
        }
    }

    /// Register a new cat after checking its breed against the catalog.
    ///
    /// Field validation runs first so a bad request never reaches the
    /// catalog. Catalog failures and timeouts are infrastructure errors.
    pub async fn create(&self, input: NewSpyCat) -> Result<SpyCat> {
        info!(name = %input.name, breed = %input.breed, "Creating spy cat");

        if let Err(err) = input.validate() {
            return reject("create spy cat", err);
        }
        self.check_breed(&input.breed).await?;

        let cat = SpyCat::new(input);
        self.store.create_spy_cat(&cat).await?;

        info!(spy_cat_id = %cat.id, "Spy cat created");
        Ok(cat)
    }

    pub async fn get(&self, id: &SpyCatId) -> Result<SpyCat> {
        match self.store.get_spy_cat(id).await? {
            Some(cat) => Ok(cat),
            None => reject("get spy cat", DomainError::SpyCatNotFound),
        }
    }

    /// Overwrite a cat's salary. Allowed at any time, on or off mission.
    pub async fn update_salary(&self, id: &SpyCatId, salary: Decimal) -> Result<SpyCat> {
        info!(spy_cat_id = %id, salary = %salary, "Updating spy cat salary");

        if let Err(err) = validate_salary(salary) {
            return reject("update salary", err);
        }
        let Some(mut cat) = self.store.get_spy_cat(id).await? else {
            return reject("update salary", DomainError::SpyCatNotFound);
        };

        cat.salary = salary;
        let cat = self.store.update_spy_cat(&cat).await?;

        info!(spy_cat_id = %cat.id, version = cat.version, "Spy cat salary updated");
        Ok(cat)
    }

    /// Retire a cat. Any mission it was on loses its cat reference.
    pub async fn delete(&self, id: &SpyCatId) -> Result<()> {
        info!(spy_cat_id = %id, "Deleting spy cat");

        if !self.store.delete_spy_cat(id).await? {
            return reject("delete spy cat", DomainError::SpyCatNotFound);
        }

        info!(spy_cat_id = %id, "Spy cat deleted");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<SpyCat>> {
        let cats = self.store.list_spy_cats().await?;
        info!(count = cats.len(), "Listed spy cats");
        Ok(cats)
    }

    async fn check_breed(&self, breed: &str) -> Result<()> {
        let lookup = tokio::time::timeout(self.catalog_timeout, self.catalog.list_breeds()).await;

        let breeds = match lookup {
            Ok(Ok(breeds)) => breeds,
            Ok(Err(err)) => {
                error!(catalog = self.catalog.name(), error = %err, "Breed lookup failed");
                return Err(err);
            }
            Err(_) => {
                let millis = u64::try_from(self.catalog_timeout.as_millis()).unwrap_or(u64::MAX);
                error!(catalog = self.catalog.name(), millis, "Breed lookup timed out");
                return Err(Error::Timeout {
                    operation: "breed lookup",
                    millis,
                });
            }
        };

        if !contains_breed(&breeds, breed) {
            return reject(
                "create spy cat",
                DomainError::InvalidBreed {
                    breed: breed.to_string(),
                },
            );
        }
        Ok(())
    }
}
