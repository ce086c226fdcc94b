//! Landing page: product list and cart.
//!
//! Renders the search results alongside the visitor's cart, hydrated from
//! the persisted sequence in stored order. A catalog failure degrades to an
//! empty product list; a malformed cart blob is surfaced, not papered over.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::Product;
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

use super::cart::{CartView, get_cart_key};

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub sku: String,
    pub name: String,
    pub thumbnail_url: String,
    pub price: Decimal,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            sku: product.sku.to_string(),
            name: product.name.clone(),
            thumbnail_url: product.thumbnail_url.clone(),
            price: product.price,
        }
    }
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home/index.html")]
pub struct HomeTemplate {
    pub query: String,
    pub products: Vec<ProductView>,
    pub cart: CartView,
}

/// Display the product list and cart.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .unwrap_or_else(|| state.config().default_query.clone());

    // A catalog outage leaves the page usable: empty list, cart intact.
    let products = match state.catalog().search(&query).await {
        Ok(products) => products.iter().map(ProductView::from).collect(),
        Err(e) => {
            tracing::warn!("Catalog search failed for {query:?}: {e}");
            Vec::new()
        }
    };

    let cart = match get_cart_key(&session).await {
        Some(key) => CartView::from(&state.carts().load(&key)?),
        None => CartView::empty(),
    };

    Ok(HomeTemplate {
        query,
        products,
        cart,
    })
}
