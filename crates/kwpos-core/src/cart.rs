//! # Cart Module
//!
//! Pure cart math: line merging, quantity limits, discount clamping and the
//! subtotal/discount/total computation.
//!
//! ## Totals Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Totals Computation                           │
//! │                                                                     │
//! │   lines ──► Σ (quantity × unit_price) ──► subtotal                  │
//! │                                              │                      │
//! │   Discount::Amount(a)  ──► clamp(a, 0, subtotal) ──► discount       │
//! │   Discount::Percent(p) ──► subtotal × clamp(p, 0, 10000)bps ──┘     │
//! │                                              │                      │
//! │                          total = subtotal - discount  (>= 0)        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The same function runs on the client (live preview while the cashier
//! builds the cart) and on the server (recomputation before persisting), so
//! the two sides can never disagree on a single fils.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::Item;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Discount
// =============================================================================

/// A sale-level discount, applied to the subtotal.
///
/// Out-of-range values are not errors: they are clamped into the legal range
/// so a discount can never push the total negative or exceed the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// A flat amount off, clamped to `[0, subtotal]`.
    Amount(Money),
    /// A percentage off in basis points (1000 = 10%), clamped to `[0, 10000]`.
    Percent(u32),
}

// =============================================================================
// Cart Totals
// =============================================================================

/// The result of a totals computation.
///
/// Invariants: `discount <= subtotal`, `total = subtotal - discount >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    /// Sum of all line totals.
    pub subtotal: Money,
    /// The discount actually applied (after clamping).
    pub discount: Money,
    /// Basis points for percentage discounts, 0 for flat discounts.
    pub discount_bps: u32,
    /// What the customer pays.
    pub total: Money,
}

/// Computes subtotal, discount and total from `(quantity, unit_price)` pairs.
///
/// This is THE money function of the system. Every total anywhere — cart
/// preview, persisted sale, refund amount — comes from this computation.
///
/// ## Example
/// ```rust
/// use kwpos_core::cart::{compute_totals, Discount};
/// use kwpos_core::money::Money;
///
/// let lines = [(2, Money::from_fils(15_500)), (1, Money::from_fils(12_000))];
/// let totals = compute_totals(lines.iter().copied(), None);
/// assert_eq!(totals.subtotal, Money::from_fils(43_000));
/// assert_eq!(totals.total, Money::from_fils(43_000));
/// ```
pub fn compute_totals<I>(lines: I, discount: Option<Discount>) -> CartTotals
where
    I: IntoIterator<Item = (i64, Money)>,
{
    let subtotal = lines
        .into_iter()
        .fold(Money::zero(), |acc, (qty, unit_price)| {
            acc + unit_price.multiply_quantity(qty)
        });

    let (discount, discount_bps) = match discount {
        None => (Money::zero(), 0),
        Some(Discount::Amount(amount)) => (amount.clamp(Money::zero(), subtotal), 0),
        Some(Discount::Percent(bps)) => {
            let bps = bps.min(10_000);
            (subtotal.percentage(bps), bps)
        }
    };

    CartTotals {
        subtotal,
        discount,
        discount_bps,
        total: subtotal - discount,
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A single cart line: an item snapshot plus quantity.
///
/// The catalog fields are copied in at add time so a later price change
/// never silently reprices a cart the cashier already quoted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub item_id: String,
    pub name_en: String,
    pub name_ar: String,
    pub unit: String,
    pub unit_price: Money,
    pub quantity: i64,
}

impl CartLine {
    /// quantity × unit price, exact integer fils.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// An in-progress sale being built line by line.
///
/// The cart is pure state: callers mutate it with the operations below and
/// read totals via [`Cart::totals`]. Nothing here touches storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
    discount: Option<Discount>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The pending discount, if any.
    pub fn discount(&self) -> Option<Discount> {
        self.discount
    }

    /// True when the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds `quantity` units of an item.
    ///
    /// If the item is already in the cart the quantities merge into one
    /// line; the cart never holds two lines for the same item.
    ///
    /// ## Errors
    /// - quantity not in `1..=MAX_LINE_QUANTITY` (also after merging)
    /// - item is inactive
    /// - cart already holds `MAX_CART_LINES` distinct lines
    pub fn add_line(&mut self, item: &Item, quantity: i64) -> ValidationResult<()> {
        crate::validation::validate_quantity(quantity)?;

        if !item.is_active {
            return Err(ValidationError::InvalidFormat {
                field: "item_id".to_string(),
                reason: format!("item {} is inactive", item.id),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            let merged = line.quantity + quantity;
            crate::validation::validate_quantity(merged)?;
            line.quantity = merged;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(ValidationError::OutOfRange {
                field: "lines".to_string(),
                min: 1,
                max: MAX_CART_LINES as i64,
            });
        }

        self.lines.push(CartLine {
            item_id: item.id.clone(),
            name_en: item.name_en.clone(),
            name_ar: item.name_ar.clone(),
            unit: item.unit.clone(),
            unit_price: item.price(),
            quantity,
        });
        Ok(())
    }

    /// Replaces the quantity of an existing line.
    ///
    /// ## Errors
    /// - quantity not in `1..=MAX_LINE_QUANTITY` (removal is [`Cart::remove_line`],
    ///   not quantity 0)
    /// - the item is not in the cart
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) -> ValidationResult<()> {
        crate::validation::validate_quantity(quantity)?;

        match self.lines.iter_mut().find(|l| l.item_id == item_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(ValidationError::InvalidFormat {
                field: "item_id".to_string(),
                reason: format!("item {item_id} is not in the cart"),
            }),
        }
    }

    /// Removes an item's line. Removing an absent item is a no-op.
    pub fn remove_line(&mut self, item_id: &str) {
        self.lines.retain(|l| l.item_id != item_id);
    }

    /// Sets or clears the cart-level discount.
    pub fn set_discount(&mut self, discount: Option<Discount>) {
        self.discount = discount;
    }

    /// Empties the cart for the next customer.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount = None;
    }

    /// Current totals under the pending discount.
    pub fn totals(&self) -> CartTotals {
        compute_totals(
            self.lines.iter().map(|l| (l.quantity, l.unit_price)),
            self.discount,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
