//! # tally-core: Pure Checkout Pricing for Tally
//!
//! Items are scanned into a cart one at a time and the total is computed by
//! running each product's pricing rules. This crate has zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             tally-catalog (config loading)                      │   │
//! │  │    catalog.toml / catalog.json / TALLY_CATALOG_PATH             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Catalog                                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   rules   │  │   cart    │  │ checkout  │  │   │
//! │  │   │  Product  │  │ BuyXGetY  │  │   Cart    │  │  scan()   │  │   │
//! │  │   │  Catalog  │  │ Bulk/Free │  │ CartLine  │  │  total()  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • INTEGER CENTS                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer-cent arithmetic
//! - [`rules`] - The three pricing rule kinds
//! - [`catalog`] - Product and Catalog
//! - [`cart`] - Insertion-ordered scan quantities
//! - [`checkout`] - Scan accumulation and totalling
//! - [`error`] - Domain error types
//! - [`validation`] - Identifier and price checks
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{Catalog, Checkout, Money, PricingRule, Product};
//!
//! let catalog = Catalog::from_products([
//!     (
//!         "mbp",
//!         Product::new(
//!             Money::from_cents(139999),
//!             vec![PricingRule::free_item_with_purchase("mbp", "vga").unwrap()],
//!         )
//!         .unwrap(),
//!     ),
//!     ("vga", Product::plain(Money::from_cents(3000)).unwrap()),
//! ])
//! .unwrap();
//!
//! let mut co = Checkout::new(&catalog);
//! co.scan("mbp");
//! co.scan("vga");
//! assert_eq!(co.total().unwrap(), Money::from_cents(139999));
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod rules;
pub mod validation;

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, Product, RuleWarning};
pub use checkout::{Checkout, Receipt, ReceiptLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use rules::{BulkDiscount, BuyXGetYFree, FreeItemWithPurchase, PricingRule, RuleConfig};

/// Maximum length of an item identifier.
pub const MAX_ITEM_ID_LEN: usize = 50;

/// Maximum unit or discounted price, in cents ($1,000,000,000.00).
///
/// Line and grand totals are plain `i64` cent arithmetic. With prices at
/// or below this bound a total stays in range up to roughly 92 million
/// scanned units.
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;
