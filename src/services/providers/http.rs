use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    services::providers::CatalogSource,
};

/// Fetches the catalog with a single `GET` to a fixed URL
#[derive(Clone)]
pub struct HttpCatalogSource {
    http_client: HttpClient,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: String, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> AppResult<serde_json::Value> {
        tracing::debug!(url = %self.url, "Fetching catalog");

        let response = self.http_client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Ingestion(format!(
                "Catalog API returned status {}: {}",
                status, body
            )));
        }

        let payload: serde_json::Value = response.json().await?;
        Ok(payload)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
