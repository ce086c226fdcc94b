//! Cart persistence and operations.
//!
//! # Architecture
//!
//! The cart is one JSON blob per visitor (the localStorage model, moved
//! server-side): a [`CartStore`] exposes get/set/remove on opaque string
//! blobs keyed by cart ID, and [`CartService`] wraps it with the cart
//! semantics. Every mutating operation is a full read-decode-transform-
//! encode-write cycle against the blob; there are no partial updates.
//!
//! Two stores are provided:
//! - [`FileCartStore`] - one file per cart under a data directory
//! - [`MemoryCartStore`] - in-memory fake for tests
//!
//! A malformed blob surfaces as [`CartError::Malformed`]; no recovery is
//! attempted.

mod file;
mod memory;

pub use file::FileCartStore;
pub use memory::MemoryCartStore;

use std::sync::Arc;

use cartwheel_core::{Cart, CartLine, LineId};
use tracing::{debug, instrument};

/// Errors that can occur in cart persistence.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// The underlying store failed.
    #[error("cart store error: {0}")]
    Store(#[from] std::io::Error),

    /// The persisted blob is not a valid cart.
    #[error("malformed cart blob: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Blob storage for persisted carts.
///
/// Implementations store opaque strings under string keys; the cart JSON
/// encoding is the service's concern. Injected so tests can substitute
/// [`MemoryCartStore`].
pub trait CartStore: Send + Sync {
    /// Read the blob under `key`, or `None` if nothing is persisted.
    fn get(&self, key: &str) -> std::io::Result<Option<String>>;

    /// Write `blob` under `key`, replacing any previous value.
    fn set(&self, key: &str, blob: &str) -> std::io::Result<()>;

    /// Delete the blob under `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> std::io::Result<()>;
}

/// Cart operations over a [`CartStore`].
///
/// Cheaply cloneable; the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct CartService {
    store: Arc<dyn CartStore>,
}

impl CartService {
    /// Create a service over the given store.
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self { store }
    }

    /// Load the cart under `key`.
    ///
    /// Returns an empty cart when no blob exists.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Malformed`] if a blob exists but is not valid
    /// cart JSON, or [`CartError::Store`] if the store fails.
    pub fn load(&self, key: &str) -> Result<Cart, CartError> {
        match self.store.get(key)? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(Cart::new()),
        }
    }

    /// Append `line` to the cart under `key` and write it back.
    ///
    /// Returns the updated cart.
    ///
    /// # Errors
    ///
    /// Fails if the existing blob is malformed or the store fails.
    #[instrument(skip(self, line), fields(sku = %line.sku))]
    pub fn add(&self, key: &str, line: CartLine) -> Result<Cart, CartError> {
        let mut cart = self.load(key)?;
        cart.push(line);
        self.save(key, &cart)?;
        Ok(cart)
    }

    /// Remove the line with `line_id` from the cart under `key` and write
    /// it back. Removing a line that is no longer present (e.g. a row
    /// clicked twice) leaves the cart unchanged.
    ///
    /// Returns the updated cart.
    ///
    /// # Errors
    ///
    /// Fails if the existing blob is malformed or the store fails.
    #[instrument(skip(self), fields(line_id = %line_id))]
    pub fn remove(&self, key: &str, line_id: LineId) -> Result<Cart, CartError> {
        let mut cart = self.load(key)?;
        if cart.remove_line(line_id).is_some() {
            self.save(key, &cart)?;
        } else {
            debug!("line not in cart, nothing removed");
        }
        Ok(cart)
    }

    /// Delete the persisted blob under `key`.
    ///
    /// # Errors
    ///
    /// Fails if the store fails.
    #[instrument(skip(self))]
    pub fn clear(&self, key: &str) -> Result<(), CartError> {
        self.store.remove(key)?;
        Ok(())
    }

    /// Write `cart` back under `key`.
    fn save(&self, key: &str, cart: &Cart) -> Result<(), CartError> {
        let blob = serde_json::to_string(cart)?;
        self.store.set(key, &blob)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartwheel_core::Sku;
    use rust_decimal::Decimal;

    fn service() -> CartService {
        CartService::new(Arc::new(MemoryCartStore::new()))
    }

    fn line(sku: &str, name: &str, price: i64) -> CartLine {
        CartLine::new(Sku::new(sku), name, Decimal::from(price))
    }

    #[test]
    fn test_load_without_blob_is_empty() {
        let carts = service();
        let cart = carts.load("visitor").unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_add_appends_and_persists() {
        let carts = service();
        carts.add("visitor", line("A", "X", 10)).unwrap();
        let cart = carts.add("visitor", line("B", "Y", 5)).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines().last().unwrap().sku.as_str(), "B");

        // A fresh load sees the same sequence, in the same order
        let reloaded = carts.load("visitor").unwrap();
        assert_eq!(reloaded, cart);
    }

    #[test]
    fn test_remove_unknown_line_is_a_no_op() {
        let carts = service();
        carts.add("visitor", line("A", "X", 10)).unwrap();
        let cart = carts.remove("visitor", LineId::new()).unwrap();
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_clear_deletes_the_blob() {
        let carts = service();
        carts.add("visitor", line("A", "X", 10)).unwrap();
        carts.clear("visitor").unwrap();
        assert!(carts.load("visitor").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_blob_surfaces_parse_error() {
        let store = Arc::new(MemoryCartStore::new());
        store.set("visitor", "{not json").unwrap();

        let carts = CartService::new(store);
        assert!(matches!(
            carts.load("visitor"),
            Err(CartError::Malformed(_))
        ));
        // No recovery: adding also fails because it loads first
        assert!(carts.add("visitor", line("A", "X", 10)).is_err());
    }

    #[test]
    fn test_carts_are_isolated_by_key() {
        let carts = service();
        carts.add("alice", line("A", "X", 10)).unwrap();
        assert!(carts.load("bob").unwrap().is_empty());
    }
}
