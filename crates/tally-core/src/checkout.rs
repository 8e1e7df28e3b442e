//! # Checkout
//!
//! Accumulates scans for one customer transaction and prices them.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Checkout::new(&catalog)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  scan("mbp") scan("vga") scan("ipd")     cart: [mbp 1, vga 1, ipd 1]    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total()                                                                │
//! │    working = cart.clone()                                               │
//! │    mbp: $1399.99   (grants 1 vga → working vga = 0)                     │
//! │    vga: $0.00      (priced from working quantity 0)                     │
//! │    ipd: $549.99                                                         │
//! │    ─────────────                                                        │
//! │    $1949.98                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Free-item grants are applied to a working copy, never to the scanned
//! cart, so `total()` takes `&self` and returns the same value every time
//! it is called between scans.

use serde::Serialize;
use tracing::{debug, info};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::CoreResult;
use crate::money::Money;

// =============================================================================
// Receipt
// =============================================================================

/// Pricing detail for one distinct item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub item_id: String,

    /// Units scanned.
    pub scanned_quantity: i64,

    /// Units left to price after free-item grants from earlier lines.
    pub priced_quantity: i64,

    pub unit_price: Money,

    pub line_total: Money,
}

/// Every line in first-scan order plus the grand total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    pub total: Money,
}

impl Receipt {
    /// Amount saved against pricing every scanned unit at its unit price.
    pub fn savings(&self) -> Money {
        let undiscounted: Money = self
            .lines
            .iter()
            .map(|l| l.unit_price * l.scanned_quantity)
            .sum();
        undiscounted - self.total
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// One customer transaction against a shared catalog.
///
/// ```rust
/// use tally_core::{Catalog, Checkout, Money, PricingRule, Product};
///
/// let catalog = Catalog::from_products([
///     (
///         "atv",
///         Product::new(
///             Money::from_cents(10950),
///             vec![PricingRule::buy_x_get_y_free(2, 1).unwrap()],
///         )
///         .unwrap(),
///     ),
///     ("vga", Product::plain(Money::from_cents(3000)).unwrap()),
/// ])
/// .unwrap();
///
/// let mut co = Checkout::new(&catalog);
/// for item in ["atv", "atv", "atv", "vga"] {
///     co.scan(item);
/// }
/// assert_eq!(co.total().unwrap().to_string(), "$249.00");
/// ```
#[derive(Debug, Clone)]
pub struct Checkout<'a> {
    catalog: &'a Catalog,
    cart: Cart,
}

impl<'a> Checkout<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Checkout {
            catalog,
            cart: Cart::new(),
        }
    }

    /// Adds one unit of `item_id`.
    ///
    /// The catalog is not consulted here; unknown items surface from `total()`.
    pub fn scan(&mut self, item_id: &str) {
        self.cart.add(item_id);
        debug!(
            item_id = %item_id,
            quantity = self.cart.quantity(item_id).unwrap_or(0),
            "Scanned item"
        );
    }

    /// Grand total of everything scanned so far.
    ///
    /// ## Errors
    /// `CoreError::UnknownItem` for the first scanned item (in scan order)
    /// that has no catalog entry.
    pub fn total(&self) -> CoreResult<Money> {
        self.receipt().map(|receipt| receipt.total)
    }

    /// Prices every line and returns the full breakdown.
    pub fn receipt(&self) -> CoreResult<Receipt> {
        let mut working = self.cart.clone();
        let mut lines = Vec::with_capacity(self.cart.item_count());

        for (index, scanned) in self.cart.lines().iter().enumerate() {
            let product = self.catalog.product(&scanned.item_id)?;

            // Earlier lines may have granted some of these units away
            let quantity = working.line(index).map_or(0, |line| line.quantity);
            let line_total = product.price_line(&scanned.item_id, quantity, &mut working);

            debug!(
                item_id = %scanned.item_id,
                scanned = scanned.quantity,
                priced = quantity,
                line_total = %line_total,
                "Priced line"
            );

            lines.push(ReceiptLine {
                item_id: scanned.item_id.clone(),
                scanned_quantity: scanned.quantity,
                priced_quantity: quantity,
                unit_price: product.unit_price(),
                line_total,
            });
        }

        let total = lines.iter().map(|line| line.line_total).sum();
        info!(
            lines = lines.len(),
            units = self.cart.total_quantity(),
            total = %total,
            "Checkout totalled"
        );

        Ok(Receipt { lines, total })
    }

    /// Scanned quantities, in first-scan order.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Number of distinct items scanned.
    pub fn item_count(&self) -> usize {
        self.cart.item_count()
    }

    /// Starts a new transaction against the same catalog.
    pub fn clear(&mut self) {
        self.cart.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
