//! # Products and Catalog
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog (built once, never mutated afterwards)                         │
//! │    ipd ──► Product { $549.99,  [BulkDiscount(5, $499.99)] }             │
//! │    mbp ──► Product { $1399.99, [FreeItemWithPurchase(mbp, vga)] }       │
//! │    atv ──► Product { $109.50,  [BuyXGetYFree(2, 1)] }                   │
//! │    vga ──► Product { $30.00,   [] }                                     │
//! │       ▲                                                                 │
//! │       │ &Catalog (shared borrow)                                        │
//! │  Checkout #1   Checkout #2   ...                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::rules::PricingRule;
use crate::validation::{validate_item_id, validate_price_cents};

// =============================================================================
// Product
// =============================================================================

/// A catalog entry: unit price plus an ordered rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    unit_price: Money,
    rules: Vec<PricingRule>,
}

impl Product {
    /// Creates a product. The unit price must lie in `0..=MAX_PRICE_CENTS`.
    pub fn new(unit_price: Money, rules: Vec<PricingRule>) -> CoreResult<Self> {
        validate_price_cents(unit_price.cents())?;
        Ok(Product { unit_price, rules })
    }

    /// A product with no pricing rules.
    pub fn plain(unit_price: Money) -> CoreResult<Self> {
        Product::new(unit_price, Vec::new())
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn rules(&self) -> &[PricingRule] {
        &self.rules
    }

    /// Prices `quantity` units of this product.
    ///
    /// ## Rule List Semantics
    /// Every rule runs, in order, so cart side effects from all of them
    /// happen. Each rule recomputes the line from `quantity` and the unit
    /// price, and the value returned by the last rule is the line total.
    /// With no rules the line is `quantity × unit_price`.
    /// ```text
    /// rules: [BulkDiscount(5, $4), BuyXGetYFree(1, 1)]   q = 6, price $5
    ///   BulkDiscount  → $24   (discarded)
    ///   BuyXGetYFree  → $15   ◄── line total
    /// ```
    pub fn price_line(&self, item_id: &str, quantity: i64, cart: &mut Cart) -> Money {
        let mut line_total = self.unit_price * quantity;
        for rule in &self.rules {
            line_total = rule.apply(item_id, quantity, self.unit_price, cart);
        }
        line_total
    }
}

// =============================================================================
// Rule Warnings
// =============================================================================

/// A rule that is well-formed on its own but suspicious within its catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleWarning {
    /// A free-item rule attached to a product other than its required item
    /// can never grant anything.
    NeverFires {
        item_id: String,
        required_item: String,
    },

    /// The free item is not sold, so there is nothing to grant.
    FreeItemNotInCatalog { item_id: String, free_item: String },
}

impl fmt::Display for RuleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleWarning::NeverFires {
                item_id,
                required_item,
            } => write!(
                f,
                "{item_id}: free-item rule requires '{required_item}' and will never apply"
            ),
            RuleWarning::FreeItemNotInCatalog { item_id, free_item } => write!(
                f,
                "{item_id}: free item '{free_item}' is not in the catalog"
            ),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Item identifier → Product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: HashMap<String, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Builds a catalog from `(item_id, product)` pairs.
    ///
    /// ```rust
    /// use tally_core::{Catalog, Money, Product};
    ///
    /// let catalog = Catalog::from_products([
    ///     ("vga", Product::plain(Money::from_cents(3000)).unwrap()),
    /// ])
    /// .unwrap();
    /// assert!(catalog.contains("vga"));
    /// ```
    pub fn from_products<I, S>(products: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (S, Product)>,
        S: Into<String>,
    {
        let mut catalog = Catalog::new();
        for (item_id, product) in products {
            catalog.insert(item_id, product)?;
        }
        Ok(catalog)
    }

    /// Adds a product. Rejects malformed or duplicate identifiers.
    pub fn insert(&mut self, item_id: impl Into<String>, product: Product) -> CoreResult<()> {
        let item_id = item_id.into();
        validate_item_id(&item_id)?;

        if self.products.contains_key(&item_id) {
            return Err(CoreError::Validation(ValidationError::Duplicate {
                field: "item id".to_string(),
                value: item_id,
            }));
        }

        self.products.insert(item_id, product);
        Ok(())
    }

    pub fn get(&self, item_id: &str) -> Option<&Product> {
        self.products.get(item_id)
    }

    /// Like `get`, but a miss is an `UnknownItem` error.
    pub fn product(&self, item_id: &str) -> CoreResult<&Product> {
        self.get(item_id)
            .ok_or_else(|| CoreError::UnknownItem(item_id.to_string()))
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.products.contains_key(item_id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Item identifiers, sorted.
    pub fn item_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.products.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Cross-checks free-item rules against the rest of the catalog.
    ///
    /// Results are ordered by item id.
    pub fn validate_rules(&self) -> Vec<RuleWarning> {
        let mut warnings = Vec::new();

        for item_id in self.item_ids() {
            let Some(product) = self.get(item_id) else {
                continue;
            };

            for rule in product.rules() {
                let PricingRule::FreeItemWithPurchase(rule) = rule else {
                    continue;
                };

                if rule.required_item() != item_id {
                    warnings.push(RuleWarning::NeverFires {
                        item_id: item_id.to_string(),
                        required_item: rule.required_item().to_string(),
                    });
                }

                if !self.contains(rule.free_item()) {
                    warnings.push(RuleWarning::FreeItemNotInCatalog {
                        item_id: item_id.to_string(),
                        free_item: rule.free_item().to_string(),
                    });
                }
            }
        }

        warnings
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
