//! The cart: an ordered sequence of purchase-intent lines.
//!
//! The cart is persisted as a single JSON blob (an array of lines) and
//! rendered from that sequence, so persisted order and display order are
//! the same list by construction. Duplicate SKUs are allowed; adding the
//! same product twice yields two lines, each with its own [`LineId`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{LineId, Sku};

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Stable identifier for this line, independent of position.
    pub line_id: LineId,
    /// Product identifier against the catalog API.
    pub sku: Sku,
    /// Product name as returned by the catalog at add time.
    pub name: String,
    /// Price captured at add time.
    pub sale_price: Decimal,
}

impl CartLine {
    /// Create a line with a fresh [`LineId`].
    #[must_use]
    pub fn new(sku: Sku, name: impl Into<String>, sale_price: Decimal) -> Self {
        Self {
            line_id: LineId::new(),
            sku,
            name: name.into(),
            sale_price,
        }
    }
}

/// An ordered sequence of [`CartLine`]s.
///
/// Serializes transparently as a JSON array, matching the persisted blob
/// format: `[{"line_id": ..., "sku": ..., "name": ..., "sale_price": ...}]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a line to the end of the sequence.
    pub fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    /// Remove the line with the given ID, preserving the relative order of
    /// the rest. Returns the removed line, or `None` if no line carries
    /// that ID (e.g. a stale row was clicked twice).
    pub fn remove_line(&mut self, line_id: LineId) -> Option<CartLine> {
        let position = self.lines.iter().position(|l| l.line_id == line_id)?;
        Some(self.lines.remove(position))
    }

    /// Remove the line at `position`, preserving the relative order of the
    /// rest. Returns `None` if `position` is out of range.
    pub fn remove_at(&mut self, position: usize) -> Option<CartLine> {
        if position >= self.lines.len() {
            return None;
        }
        Some(self.lines.remove(position))
    }

    /// Sum of `sale_price` over the whole sequence. Zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|l| l.sale_price).sum()
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over the lines in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartLine> {
        self.lines.iter()
    }

    /// The lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<CartLine> for Cart {
    fn from_iter<I: IntoIterator<Item = CartLine>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(sku: &str, name: &str, price: i64) -> CartLine {
        CartLine::new(Sku::new(sku), name, Decimal::from(price))
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert_eq!(Cart::new().total(), Decimal::ZERO);
        assert!(Cart::new().is_empty());
    }

    #[test]
    fn test_push_appends_to_the_end() {
        let mut cart = Cart::new();
        cart.push(line("A", "X", 10));
        cart.push(line("B", "Y", 5));

        let last = cart.lines().last().unwrap();
        assert_eq!(last.sku.as_str(), "B");
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_total_sums_sale_prices() {
        let mut cart = Cart::new();
        cart.push(line("A", "X", 10));
        cart.push(line("B", "Y", 5));
        assert_eq!(cart.total(), Decimal::from(15));
    }

    #[test]
    fn test_remove_at_preserves_relative_order() {
        let mut cart = Cart::new();
        cart.push(line("A", "X", 10));
        cart.push(line("B", "Y", 5));
        cart.push(line("C", "Z", 7));

        let removed = cart.remove_at(1).unwrap();
        assert_eq!(removed.sku.as_str(), "B");

        let skus: Vec<&str> = cart.iter().map(|l| l.sku.as_str()).collect();
        assert_eq!(skus, ["A", "C"]);
    }

    #[test]
    fn test_remove_at_out_of_range_is_none() {
        let mut cart = Cart::new();
        cart.push(line("A", "X", 10));
        assert!(cart.remove_at(1).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_line_by_id() {
        let mut cart = Cart::new();
        cart.push(line("A", "X", 10));
        let target = line("B", "Y", 5);
        let target_id = target.line_id;
        cart.push(target);
        cart.push(line("C", "Z", 7));

        let removed = cart.remove_line(target_id).unwrap();
        assert_eq!(removed.sku.as_str(), "B");
        assert!(cart.remove_line(target_id).is_none());

        let skus: Vec<&str> = cart.iter().map(|l| l.sku.as_str()).collect();
        assert_eq!(skus, ["A", "C"]);
    }

    #[test]
    fn test_duplicate_skus_are_distinct_lines() {
        let mut cart = Cart::new();
        let first = line("A", "X", 10);
        let second = line("A", "X", 10);
        let second_id = second.line_id;
        cart.push(first);
        cart.push(second);

        assert_eq!(cart.len(), 2);
        cart.remove_line(second_id).unwrap();
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_two_remove_first() {
        // add {A, X, 10}, add {B, Y, 5} -> total 15; remove position 0 ->
        // [{B, Y, 5}], total 5
        let mut cart = Cart::new();
        cart.push(line("A", "X", 10));
        cart.push(line("B", "Y", 5));
        assert_eq!(cart.total(), Decimal::from(15));

        cart.remove_at(0).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines().first().unwrap().sku.as_str(), "B");
        assert_eq!(cart.total(), Decimal::from(5));
    }

    #[test]
    fn test_serializes_as_a_json_array() {
        let mut cart = Cart::new();
        cart.push(line("A", "X", 10));

        let blob = serde_json::to_string(&cart).unwrap();
        assert!(blob.starts_with('['));

        let back: Cart = serde_json::from_str(&blob).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_malformed_blob_fails_to_decode() {
        assert!(serde_json::from_str::<Cart>("{not json").is_err());
    }
}
