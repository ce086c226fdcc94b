//! End-to-end cart flows against the file-backed store.
//!
//! Exercises the same service the route handlers use, with a real data
//! directory, including the fresh-page-load case: a second service over
//! the same directory must reproduce the persisted sequence exactly.

use std::sync::Arc;

use cartwheel_core::{CartLine, Sku};
use cartwheel_storefront::cart::{CartError, CartService, FileCartStore, MemoryCartStore};
use rust_decimal::Decimal;

fn line(sku: &str, name: &str, price: i64) -> CartLine {
    CartLine::new(Sku::new(sku), name, Decimal::from(price))
}

#[test]
fn add_then_reload_reproduces_the_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let carts = CartService::new(Arc::new(FileCartStore::new(dir.path()).unwrap()));

    carts.add("visitor", line("A", "X", 10)).unwrap();
    carts.add("visitor", line("B", "Y", 5)).unwrap();
    let before = carts.load("visitor").unwrap();

    // Fresh service over the same directory simulates a fresh page load
    let reloaded = CartService::new(Arc::new(FileCartStore::new(dir.path()).unwrap()))
        .load("visitor")
        .unwrap();

    assert_eq!(reloaded, before);
    let skus: Vec<&str> = reloaded.iter().map(|l| l.sku.as_str()).collect();
    assert_eq!(skus, ["A", "B"]);
}

#[test]
fn remove_keeps_relative_order_and_total() {
    let dir = tempfile::tempdir().unwrap();
    let carts = CartService::new(Arc::new(FileCartStore::new(dir.path()).unwrap()));

    carts.add("visitor", line("A", "X", 10)).unwrap();
    let cart = carts.add("visitor", line("B", "Y", 5)).unwrap();
    assert_eq!(cart.total(), Decimal::from(15));

    // Remove what is displayed at position 0
    let first = cart.lines().first().unwrap().line_id;
    let cart = carts.remove("visitor", first).unwrap();

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines().first().unwrap().sku.as_str(), "B");
    assert_eq!(cart.total(), Decimal::from(5));

    // And the persisted blob agrees
    assert_eq!(carts.load("visitor").unwrap(), cart);
}

#[test]
fn clear_empties_cart_and_total() {
    let dir = tempfile::tempdir().unwrap();
    let carts = CartService::new(Arc::new(FileCartStore::new(dir.path()).unwrap()));

    carts.add("visitor", line("A", "X", 10)).unwrap();
    carts.clear("visitor").unwrap();

    let cart = carts.load("visitor").unwrap();
    assert!(cart.is_empty());
    assert_eq!(cart.total(), Decimal::ZERO);
}

#[test]
fn duplicate_skus_accumulate_as_separate_lines() {
    let carts = CartService::new(Arc::new(MemoryCartStore::new()));

    carts.add("visitor", line("A", "X", 10)).unwrap();
    let cart = carts.add("visitor", line("A", "X", 10)).unwrap();

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.total(), Decimal::from(20));
}

#[test]
fn corrupted_blob_on_disk_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("visitor.json"), "not json at all").unwrap();

    let carts = CartService::new(Arc::new(FileCartStore::new(dir.path()).unwrap()));
    assert!(matches!(
        carts.load("visitor"),
        Err(CartError::Malformed(_))
    ));
}
