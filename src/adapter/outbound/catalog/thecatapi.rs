//! TheCatAPI breed catalog client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, error, info};

use crate::domain::Breed;
use crate::error::Result;
use crate::infrastructure::config::CatalogConfig;
use crate::port::outbound::catalog::BreedCatalog;

/// HTTP client for `GET {url}/breeds`.
pub struct TheCatApiClient {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl TheCatApiClient {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl BreedCatalog for TheCatApiClient {
    fn name(&self) -> &'static str {
        "thecatapi"
    }

    async fn list_breeds(&self) -> Result<Vec<Breed>> {
        let url = format!("{}/breeds", self.base_url);
        debug!(url = %url, "Fetching cat breeds");

        let mut request = self.http.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let breeds: Vec<Breed> = request
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                error!(error = %e, url = %url, "Breed catalog request failed");
                e
            })?
            .json()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to decode breeds response");
                e
            })?;

        info!(count = breeds.len(), "Fetched cat breeds");
        Ok(breeds)
    }
}
