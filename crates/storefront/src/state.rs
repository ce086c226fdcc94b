//! Application state shared across handlers.

use std::sync::Arc;

use crate::cart::{CartService, CartStore, FileCartStore};
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to configuration, the
/// catalog client, and the cart service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    carts: CartService,
}

impl AppState {
    /// Create application state with the file-backed cart store.
    ///
    /// # Errors
    ///
    /// Fails if the cart data directory cannot be created.
    pub fn new(config: StorefrontConfig) -> std::io::Result<Self> {
        let store = Arc::new(FileCartStore::new(&config.cart_dir)?);
        Ok(Self::with_store(config, store))
    }

    /// Create application state with an injected cart store.
    ///
    /// Used by tests to substitute an in-memory store.
    #[must_use]
    pub fn with_store(config: StorefrontConfig, store: Arc<dyn CartStore>) -> Self {
        let catalog = CatalogClient::new(&config.catalog);
        let carts = CartService::new(store);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the cart service.
    #[must_use]
    pub fn carts(&self) -> &CartService {
        &self.inner.carts
    }
}
