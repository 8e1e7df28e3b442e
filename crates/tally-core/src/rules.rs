//! # Pricing Rules
//!
//! The closed set of promotions a product can carry.
//!
//! ## Rule Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BuyXGetYFree(2, 1)          every 3 units, 1 is free                  │
//! │    q=7 → free = floor(7/3)*1 = 2 → bill 5 units                        │
//! │                                                                         │
//! │  BulkDiscount(5, $499.99)    q >= 5 → EVERY unit at $499.99            │
//! │    q=4 → 4 × unit price       (all-units, not marginal)                │
//! │                                                                         │
//! │  FreeItemWithPurchase(mbp, vga)                                        │
//! │    pricing the mbp line grants min(cart[vga], cart[mbp]) vga units     │
//! │    by removing them from the cart; mbp itself bills at full price      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each rule type keeps its fields private and is only obtainable through a
//! validating constructor, so `apply` never meets undefined arithmetic.
//! Deserialization routes through the same constructors via [`RuleConfig`].

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_item_id, validate_price_cents};

// =============================================================================
// Buy X Get Y Free
// =============================================================================

/// For every `buy + free` units, `free` of them cost nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyXGetYFree {
    buy: i64,
    free: i64,
}

impl BuyXGetYFree {
    pub const KIND: &'static str = "buy_x_get_y_free";

    /// Fails when either count is negative, both are zero, or their sum
    /// does not fit in an `i64`.
    pub fn new(buy: i64, free: i64) -> CoreResult<Self> {
        if buy < 0 || free < 0 {
            return Err(CoreError::invalid_rule(
                Self::KIND,
                format!("buy ({buy}) and free ({free}) must not be negative"),
            ));
        }
        match buy.checked_add(free) {
            Some(0) => Err(CoreError::invalid_rule(
                Self::KIND,
                "buy + free must be greater than zero",
            )),
            Some(_) => Ok(BuyXGetYFree { buy, free }),
            None => Err(CoreError::invalid_rule(
                Self::KIND,
                format!("buy ({buy}) + free ({free}) overflows"),
            )),
        }
    }

    pub fn buy(&self) -> i64 {
        self.buy
    }

    pub fn free(&self) -> i64 {
        self.free
    }

    /// Number of units given away out of `quantity`.
    pub fn free_units(&self, quantity: i64) -> i64 {
        quantity.div_euclid(self.buy + self.free) * self.free
    }

    pub fn apply(&self, quantity: i64, unit_price: Money) -> Money {
        unit_price * (quantity - self.free_units(quantity))
    }
}

// =============================================================================
// Bulk Discount
// =============================================================================

/// Reprices every unit once the quantity reaches a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkDiscount {
    min_quantity: i64,
    discounted_price: Money,
}

impl BulkDiscount {
    pub const KIND: &'static str = "bulk_discount";

    /// The discounted price is held to the same range as a unit price.
    pub fn new(min_quantity: i64, discounted_price: Money) -> CoreResult<Self> {
        if min_quantity < 0 {
            return Err(CoreError::invalid_rule(
                Self::KIND,
                format!("min_quantity ({min_quantity}) must not be negative"),
            ));
        }
        validate_price_cents(discounted_price.cents()).map_err(|e| {
            CoreError::invalid_rule(Self::KIND, format!("discounted price: {e}"))
        })?;
        Ok(BulkDiscount {
            min_quantity,
            discounted_price,
        })
    }

    pub fn min_quantity(&self) -> i64 {
        self.min_quantity
    }

    pub fn discounted_price(&self) -> Money {
        self.discounted_price
    }

    pub fn apply(&self, quantity: i64, unit_price: Money) -> Money {
        if quantity >= self.min_quantity {
            self.discounted_price * quantity
        } else {
            unit_price * quantity
        }
    }
}

// =============================================================================
// Free Item With Purchase
// =============================================================================

/// Buying `required_item` releases matching units of `free_item` at no charge.
///
/// ## Side Effect
/// The grant is taken out of the cart the rule is handed. The free item's
/// own line is priced later from whatever quantity is left, which is why
/// checkout walks the cart in first-scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeItemWithPurchase {
    required_item: String,
    free_item: String,
}

impl FreeItemWithPurchase {
    pub const KIND: &'static str = "free_item_with_purchase";

    pub fn new(required_item: impl Into<String>, free_item: impl Into<String>) -> CoreResult<Self> {
        let required_item = required_item.into();
        let free_item = free_item.into();

        validate_item_id(&required_item)
            .map_err(|e| CoreError::invalid_rule(Self::KIND, format!("required_item: {e}")))?;
        validate_item_id(&free_item)
            .map_err(|e| CoreError::invalid_rule(Self::KIND, format!("free_item: {e}")))?;

        if required_item == free_item {
            return Err(CoreError::invalid_rule(
                Self::KIND,
                format!("required and free item are both '{required_item}'"),
            ));
        }

        Ok(FreeItemWithPurchase {
            required_item,
            free_item,
        })
    }

    pub fn required_item(&self) -> &str {
        &self.required_item
    }

    pub fn free_item(&self) -> &str {
        &self.free_item
    }

    /// Bills `quantity × unit_price` and, when pricing the required item,
    /// removes the granted free units from `cart`.
    pub fn apply(
        &self,
        item_id: &str,
        quantity: i64,
        unit_price: Money,
        cart: &mut Cart,
    ) -> Money {
        if item_id == self.required_item && cart.contains(&self.free_item) {
            let available = cart.quantity(&self.free_item).unwrap_or(0);
            let purchased = cart.quantity(&self.required_item).unwrap_or(0);
            let granted = cart.take(&self.free_item, available.min(purchased));
            debug!(
                required_item = %self.required_item,
                free_item = %self.free_item,
                granted,
                "Granted free items"
            );
        }

        unit_price * quantity
    }
}

// =============================================================================
// Pricing Rule
// =============================================================================

/// A pricing rule attached to a product.
///
/// ```rust
/// use tally_core::{Cart, Money, PricingRule};
///
/// let rule = PricingRule::buy_x_get_y_free(2, 1).unwrap();
/// let mut cart = Cart::new();
/// let line = rule.apply("atv", 3, Money::from_cents(10950), &mut cart);
/// assert_eq!(line.cents(), 21900);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleConfig", into = "RuleConfig")]
pub enum PricingRule {
    BuyXGetYFree(BuyXGetYFree),
    BulkDiscount(BulkDiscount),
    FreeItemWithPurchase(FreeItemWithPurchase),
}

impl PricingRule {
    pub fn buy_x_get_y_free(buy: i64, free: i64) -> CoreResult<Self> {
        BuyXGetYFree::new(buy, free).map(PricingRule::BuyXGetYFree)
    }

    pub fn bulk_discount(min_quantity: i64, discounted_price: Money) -> CoreResult<Self> {
        BulkDiscount::new(min_quantity, discounted_price).map(PricingRule::BulkDiscount)
    }

    pub fn free_item_with_purchase(
        required_item: impl Into<String>,
        free_item: impl Into<String>,
    ) -> CoreResult<Self> {
        FreeItemWithPurchase::new(required_item, free_item).map(PricingRule::FreeItemWithPurchase)
    }

    /// Computes the line total for `quantity` units of `item_id`.
    ///
    /// Only `FreeItemWithPurchase` touches `cart`.
    pub fn apply(
        &self,
        item_id: &str,
        quantity: i64,
        unit_price: Money,
        cart: &mut Cart,
    ) -> Money {
        match self {
            PricingRule::BuyXGetYFree(rule) => rule.apply(quantity, unit_price),
            PricingRule::BulkDiscount(rule) => rule.apply(quantity, unit_price),
            PricingRule::FreeItemWithPurchase(rule) => {
                rule.apply(item_id, quantity, unit_price, cart)
            }
        }
    }

    /// Stable snake_case name, matching the `kind` tag in config files.
    pub fn kind(&self) -> &'static str {
        match self {
            PricingRule::BuyXGetYFree(_) => BuyXGetYFree::KIND,
            PricingRule::BulkDiscount(_) => BulkDiscount::KIND,
            PricingRule::FreeItemWithPurchase(_) => FreeItemWithPurchase::KIND,
        }
    }
}

/// Short label for receipts and log lines.
impl fmt::Display for PricingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingRule::BuyXGetYFree(r) => write!(f, "buy {} get {} free", r.buy, r.free),
            PricingRule::BulkDiscount(r) => {
                write!(f, "{} or more at {} each", r.min_quantity, r.discounted_price)
            }
            PricingRule::FreeItemWithPurchase(r) => {
                write!(f, "free {} with every {}", r.free_item, r.required_item)
            }
        }
    }
}

// =============================================================================
// Serialized Form
// =============================================================================

/// Unvalidated wire shape of a rule, tagged by `kind`.
///
/// ```toml
/// rules = [{ kind = "bulk_discount", min_quantity = 5, discounted_price_cents = 49999 }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RuleConfig {
    #[serde(rename = "buy_x_get_y_free")]
    BuyXGetYFree { buy: i64, free: i64 },

    #[serde(rename = "bulk_discount")]
    BulkDiscount {
        min_quantity: i64,
        discounted_price_cents: i64,
    },

    #[serde(rename = "free_item_with_purchase")]
    FreeItemWithPurchase {
        required_item: String,
        free_item: String,
    },
}

impl TryFrom<RuleConfig> for PricingRule {
    type Error = CoreError;

    fn try_from(config: RuleConfig) -> CoreResult<Self> {
        match config {
            RuleConfig::BuyXGetYFree { buy, free } => PricingRule::buy_x_get_y_free(buy, free),
            RuleConfig::BulkDiscount {
                min_quantity,
                discounted_price_cents,
            } => {
                PricingRule::bulk_discount(min_quantity, Money::from_cents(discounted_price_cents))
            }
            RuleConfig::FreeItemWithPurchase {
                required_item,
                free_item,
            } => PricingRule::free_item_with_purchase(required_item, free_item),
        }
    }
}

impl From<PricingRule> for RuleConfig {
    fn from(rule: PricingRule) -> Self {
        match rule {
            PricingRule::BuyXGetYFree(r) => RuleConfig::BuyXGetYFree {
                buy: r.buy,
                free: r.free,
            },
            PricingRule::BulkDiscount(r) => RuleConfig::BulkDiscount {
                min_quantity: r.min_quantity,
                discounted_price_cents: r.discounted_price.cents(),
            },
            PricingRule::FreeItemWithPurchase(r) => RuleConfig::FreeItemWithPurchase {
                required_item: r.required_item,
                free_item: r.free_item,
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
