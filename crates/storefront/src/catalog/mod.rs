//! Catalog API client.
//!
//! # Architecture
//!
//! - Plain JSON-over-HTTP via `reqwest`; the catalog API is externally
//!   owned (MercadoLibre-shaped; see [`crate::config::CatalogConfig`])
//! - Two read endpoints: free-text product search and item detail by SKU
//! - In-memory caching via `moka` for API responses (5 minute TTL)
//! - Search result ordering is server-defined and preserved
//!
//! # Example
//!
//! ```rust,ignore
//! use cartwheel_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//!
//! let products = client.search("computador").await?;
//! let detail = client.item(&products[0].sku).await?;
//! ```

mod types;

pub use types::{ItemDetail, Product};

use std::sync::Arc;
use std::time::Duration;

use cartwheel_core::Sku;
use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;

use types::{ItemResponse, SearchResponse};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("catalog returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Endpoint URL construction failed.
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Cached API responses.
///
/// Variants are boxed where large to keep the cache value small.
#[derive(Clone)]
enum CacheValue {
    Search(Vec<Product>),
    Item(Box<ItemDetail>),
}

/// Client for the catalog API.
///
/// Provides typed access to product search and item detail. Responses are
/// cached for 5 minutes; both endpoints are read-only so staleness only
/// delays catalog updates, never cart state.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    site: String,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                site: config.site.clone(),
                cache,
            }),
        }
    }

    /// Issue a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let response = self.inner.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.path().to_string()));
        }

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status(status));
        }

        match serde_json::from_str(&response_text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }

    /// Search the catalog with a free-text query.
    ///
    /// Returns products in the order the server defined them.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot
    /// be decoded.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let cache_key = format!("search:{query}");

        if let Some(CacheValue::Search(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for search");
            return Ok(products);
        }

        let mut url = self
            .inner
            .base_url
            .join(&format!("sites/{}/search", self.inner.site))?;
        url.query_pairs_mut().append_pair("q", query);

        let response: SearchResponse = self.get_json(url).await?;
        let products: Vec<Product> = response.results.into_iter().map(Product::from).collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Search(products.clone()))
            .await;

        Ok(products)
    }

    /// Fetch the full detail for one item by SKU.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the SKU is unknown, or another
    /// error if the request fails or the response cannot be decoded.
    #[instrument(skip(self), fields(sku = %sku))]
    pub async fn item(&self, sku: &Sku) -> Result<ItemDetail, CatalogError> {
        let cache_key = format!("item:{sku}");

        if let Some(CacheValue::Item(detail)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for item");
            return Ok(*detail);
        }

        let url = self
            .inner
            .base_url
            .join(&format!("items/{sku}"))?;

        let response: ItemResponse = self.get_json(url).await?;
        let detail = ItemDetail::from(response);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Item(Box::new(detail.clone())))
            .await;

        Ok(detail)
    }

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}
