//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults point at the public
//! MercadoLibre catalog API, matching the original storefront.
//!
//! - `CARTWHEEL_HOST` - Bind address (default: 127.0.0.1)
//! - `CARTWHEEL_PORT` - Listen port (default: 3000)
//! - `CARTWHEEL_CART_DIR` - Directory for persisted cart blobs
//!   (default: data/carts)
//! - `CARTWHEEL_DEFAULT_QUERY` - Landing page search query
//!   (default: computador)
//! - `CATALOG_BASE_URL` - Catalog API base URL
//!   (default: <https://api.mercadolibre.com>)
//! - `CATALOG_SITE` - Catalog site code for search (default: MLB)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory where cart blobs are persisted
    pub cart_dir: PathBuf,
    /// Search query used for the landing page product list
    pub default_query: String,
    /// Catalog API configuration
    pub catalog: CatalogConfig,
}

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API
    pub base_url: Url,
    /// Site code interpolated into the search endpoint path
    pub site: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = get_env_or_default("CARTWHEEL_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CARTWHEEL_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CARTWHEEL_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CARTWHEEL_PORT".to_string(), e.to_string()))?;
        let cart_dir = PathBuf::from(get_env_or_default("CARTWHEEL_CART_DIR", "data/carts"));
        let default_query = get_env_or_default("CARTWHEEL_DEFAULT_QUERY", "computador");

        let catalog = CatalogConfig::from_env()?;

        Ok(Self {
            host,
            port,
            cart_dir,
            default_query,
            catalog,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_env_or_default("CATALOG_BASE_URL", "https://api.mercadolibre.com")
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_BASE_URL".to_string(), e.to_string())
            })?;
        let site = get_env_or_default("CATALOG_SITE", "MLB");

        Ok(Self { base_url, site })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
