//! Wire and domain types for the catalog API.
//!
//! The `*Response` types mirror the JSON the API returns; the domain types
//! (`Product`, `ItemDetail`) are what the rest of the crate consumes. Only
//! the fields the storefront uses are decoded; the API returns many more.

use cartwheel_core::Sku;
use rust_decimal::Decimal;
use serde::Deserialize;

// =============================================================================
// Domain Types
// =============================================================================

/// A product as listed in search results (transient, never persisted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Catalog identifier, used to fetch detail on add.
    pub sku: Sku,
    /// Display name.
    pub name: String,
    /// Thumbnail image URL.
    pub thumbnail_url: String,
    /// Listed price.
    pub price: Decimal,
}

/// Full detail for one item, fetched by SKU when it is added to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetail {
    /// Catalog identifier.
    pub sku: Sku,
    /// Display name.
    pub name: String,
    /// Price at fetch time; captured into the cart line as `sale_price`.
    pub price: Decimal,
}

// =============================================================================
// Wire Types
// =============================================================================

/// Response body of `GET /sites/{site}/search?q={query}`.
#[derive(Debug, Deserialize)]
pub(super) struct SearchResponse {
    pub results: Vec<SearchResult>,
}

/// One entry in the search results array.
#[derive(Debug, Deserialize)]
pub(super) struct SearchResult {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub price: Decimal,
}

/// Response body of `GET /items/{sku}`.
#[derive(Debug, Deserialize)]
pub(super) struct ItemResponse {
    pub id: String,
    pub title: String,
    pub price: Decimal,
}

// =============================================================================
// Conversions
// =============================================================================

impl From<SearchResult> for Product {
    fn from(result: SearchResult) -> Self {
        Self {
            sku: Sku::new(result.id),
            name: result.title,
            thumbnail_url: result.thumbnail,
            price: result.price,
        }
    }
}

impl From<ItemResponse> for ItemDetail {
    fn from(response: ItemResponse) -> Self {
        Self {
            sku: Sku::new(response.id),
            name: response.title,
            price: response.price,
        }
    }
}
