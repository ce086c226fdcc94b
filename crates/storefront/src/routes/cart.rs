//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Each visitor's cart key is stored in the session; every handler re-renders
//! the cart fragment from the persisted sequence, so the rows on screen are
//! always the persisted order. A row addresses itself by the stable line ID
//! it carries, never by its position in the list.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use cartwheel_core::{Cart, CartLine, LineId, Sku};

use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Session key holding the visitor's cart key.
pub(crate) const CART_KEY: &str = "cart_key";

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub line_id: String,
    pub sku: String,
    pub name: String,
    pub price: Decimal,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: Decimal,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            total: Decimal::ZERO,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.iter().map(CartLineView::from).collect(),
            total: cart.total(),
        }
    }
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            line_id: line.line_id.to_string(),
            sku: line.sku.to_string(),
            name: line.name.clone(),
            price: line.sale_price,
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart key from the session.
pub(crate) async fn get_cart_key(session: &Session) -> Option<String> {
    session.get::<String>(CART_KEY).await.ok().flatten()
}

/// Get the cart key from the session, minting one if absent.
async fn ensure_cart_key(
    session: &Session,
) -> Result<String, tower_sessions::session::Error> {
    if let Some(key) = get_cart_key(session).await {
        return Ok(key);
    }
    let key = Uuid::new_v4().to_string();
    session.insert(CART_KEY, &key).await?;
    Ok(key)
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub sku: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_id: String,
}

/// Cart items fragment template (rows + total, for HTMX swaps).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Render the current cart fragment with an `HX-Trigger` marker.
fn cart_fragment(cart: &Cart) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(cart),
        },
    )
        .into_response()
}

/// Error fragment for a failed cart operation.
fn error_fragment(message: &'static str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(format!("<span class=\"cart__error\">{message}</span>")),
    )
        .into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Get the cart items fragment (HTMX).
#[instrument(skip(state, session))]
pub async fn items(State(state): State<AppState>, session: Session) -> Response {
    let Some(key) = get_cart_key(&session).await else {
        return CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response();
    };

    match state.carts().load(&key) {
        Ok(cart) => CartItemsTemplate {
            cart: CartView::from(&cart),
        }
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to load cart: {e}");
            error_fragment("Error loading cart")
        }
    }
}

/// Add item to cart (HTMX).
///
/// Fetches the item detail by SKU from the catalog, then appends a line
/// with the price captured at add time.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let sku = Sku::new(form.sku);

    let detail = match state.catalog().item(&sku).await {
        Ok(detail) => detail,
        Err(e) => {
            tracing::error!("Failed to fetch item {sku}: {e}");
            return error_fragment("Error adding to cart");
        }
    };

    let key = match ensure_cart_key(&session).await {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("Failed to save cart key to session: {e}");
            return error_fragment("Error adding to cart");
        }
    };

    let line = CartLine::new(detail.sku, detail.name, detail.price);
    match state.carts().add(&key, line) {
        Ok(cart) => cart_fragment(&cart),
        Err(e) => {
            tracing::error!("Failed to add item to cart: {e}");
            error_fragment("Error adding to cart")
        }
    }
}

/// Remove line from cart (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let Some(key) = get_cart_key(&session).await else {
        return cart_fragment(&Cart::new());
    };

    let Ok(line_id) = form.line_id.parse::<LineId>() else {
        return AppError::BadRequest(format!("invalid line ID: {}", form.line_id)).into_response();
    };

    match state.carts().remove(&key, line_id) {
        Ok(cart) => cart_fragment(&cart),
        Err(e) => {
            tracing::error!("Failed to remove from cart: {e}");
            error_fragment("Error removing from cart")
        }
    }
}

/// Empty the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Response {
    if let Some(key) = get_cart_key(&session).await
        && let Err(e) = state.carts().clear(&key)
    {
        tracing::error!("Failed to clear cart: {e}");
        return error_fragment("Error clearing cart");
    }

    cart_fragment(&Cart::new())
}
