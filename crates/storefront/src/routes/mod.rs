//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Product list + cart (landing page)
//! GET  /health          - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart/items      - Cart rows + total (fragment)
//! POST /cart/add        - Add item by SKU (returns cart_items fragment)
//! POST /cart/remove     - Remove line by line ID (returns fragment)
//! POST /cart/clear      - Empty the cart (returns fragment)
//! ```

pub mod cart;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(cart::items))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the main application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .nest("/cart", cart_routes())
}
