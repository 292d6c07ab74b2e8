//! Catalog data sources
//!
//! The catalog is fetched once at startup through a `CatalogSource`. The
//! source only transports the raw payload; shape checks and record admission
//! happen in `services::ingestion`.

use crate::error::AppResult;

pub mod http;

pub use http::HttpCatalogSource;

/// Trait for remote movie catalog sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the raw catalog payload
    async fn fetch_catalog(&self) -> AppResult<serde_json::Value>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
