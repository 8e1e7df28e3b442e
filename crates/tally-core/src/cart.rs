//! # Cart
//!
//! Per-transaction quantities of scanned items.
//!
//! ## Ordering
//! Lines keep the order in which each item was *first* scanned. Pricing
//! walks the cart in that order, and `FreeItemWithPurchase` grants depend on
//! it: a free item whose line has already been priced is not discounted.
//!
//! ```text
//! scan(mbp) scan(vga) scan(mbp)
//!      │
//!      ▼
//! lines: [ mbp × 2, vga × 1 ]
//! ```

use serde::{Deserialize, Serialize};

/// One distinct item in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: String,
    pub quantity: i64,
}

/// Insertion-ordered item → quantity mapping.
///
/// ## Invariants
/// - Item ids are unique (scanning an existing id bumps its quantity)
/// - Quantities never go below zero
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds one unit of `item_id`, appending a new line on first sight.
    pub fn add(&mut self, item_id: &str) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity += 1;
            return;
        }

        self.lines.push(CartLine {
            item_id: item_id.to_string(),
            quantity: 1,
        });
    }

    /// Current quantity of `item_id`, or `None` if it was never scanned.
    ///
    /// A line whose units were all granted away is still present with
    /// quantity zero.
    pub fn quantity(&self, item_id: &str) -> Option<i64> {
        self.lines
            .iter()
            .find(|l| l.item_id == item_id)
            .map(|l| l.quantity)
    }

    /// Whether `item_id` has a line in the cart.
    pub fn contains(&self, item_id: &str) -> bool {
        self.lines.iter().any(|l| l.item_id == item_id)
    }

    /// Removes up to `units` from `item_id` and returns how many were removed.
    ///
    /// Saturates at the line's current quantity, so the cart can never
    /// hold a negative count.
    pub fn take(&mut self, item_id: &str, units: i64) -> i64 {
        match self.lines.iter_mut().find(|l| l.item_id == item_id) {
            Some(line) => {
                let removed = units.clamp(0, line.quantity);
                line.quantity -= removed;
                removed
            }
            None => 0,
        }
    }

    /// Line at `index` in first-scan order.
    pub fn line(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct items.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_first_scan_order() {
        let mut cart = Cart::new();
        cart.add("mbp");
        cart.add("vga");
        cart.add("mbp");

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.item_id.as_str()).collect();
        assert_eq!(ids, vec!["mbp", "vga"]);
        assert_eq!(cart.quantity("mbp"), Some(2));
        assert_eq!(cart.quantity("vga"), Some(1));
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_quantity_of_missing_item() {
        let cart = Cart::new();
        assert_eq!(cart.quantity("vga"), None);
        assert!(!cart.contains("vga"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_take_saturates_at_zero() {
        let mut cart = Cart::new();
        cart.add("vga");
        cart.add("vga");

        assert_eq!(cart.take("vga", 5), 2);
        assert_eq!(cart.quantity("vga"), Some(0));
        assert!(cart.contains("vga"));

        assert_eq!(cart.take("vga", 1), 0);
        assert_eq!(cart.take("missing", 1), 0);
        assert_eq!(cart.take("vga", -3), 0);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add("atv");
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.line(0), None);
    }
}
