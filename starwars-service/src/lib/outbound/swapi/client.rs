//! Reqwest-backed adapter for the Star Wars catalog.
//!
//! Transport only: URL building, timeout and body collection. Status codes
//! and shapes are interpreted by the people service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Url;

use crate::domain::people::errors::CatalogClientError;
use crate::domain::people::ports::CatalogClient;
use crate::domain::people::ports::CatalogRequest;
use crate::domain::people::ports::UpstreamResponse;

const USER_AGENT: &str = concat!("starwars-service/", env!("CARGO_PKG_VERSION"));

pub struct SwapiHttpClient {
    client: Client,
    base_url: Url,
}

impl SwapiHttpClient {
    /// Build an adapter with an explicit per-request timeout.
    ///
    /// # Arguments
    /// * `base_url` - Catalog root, e.g. `https://www.swapi.tech/api`
    /// * `timeout` - Whole-request timeout
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Append the request segments to the base path, percent-encoding each one.
    fn url_for(&self, request: &CatalogRequest) -> Result<Url, CatalogClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                CatalogClientError::Transport(format!(
                    "catalog base URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(&request.segments);
        Ok(url)
    }
}

#[async_trait]
impl CatalogClient for SwapiHttpClient {
    async fn get(&self, request: CatalogRequest) -> Result<UpstreamResponse, CatalogClientError> {
        let url = self.url_for(&request)?;
        tracing::debug!(url = %url, query = ?request.query, "Calling Star Wars catalog");

        let mut builder = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CatalogClientError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogClientError::Transport(e.to_string()))?;

        tracing::debug!(
            url = %url,
            status = status.as_u16(),
            bytes = body.len(),
            "Star Wars catalog answered"
        );

        Ok(UpstreamResponse::new(status, body.to_vec()))
    }
}
