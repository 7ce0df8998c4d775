//! Cart store.
//!
//! Holds the ordered line items and the derived totals. Every mutation
//! recomputes all four totals before it returns, then persists the full
//! snapshot under [`CART_STORAGE_KEY`].
//!
//! # Pricing
//!
//! - subtotal = Σ(price × quantity)
//! - tax = 10% of subtotal
//! - shipping = 10, waived when subtotal is over 100
//! - total = subtotal + tax + shipping
//!
//! # Quantities
//!
//! `add_item` merges quantities without validating them. `update_quantity`
//! clamps at zero and keeps the zero-quantity line in the cart.
//!
//! Quantities saturate at the `i64` bounds and the subtotal saturates at
//! ±[`MAX_SUBTOTAL`], so no input can make the totals overflow.

use maison_core::{Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::storage::SnapshotPersister;

/// Storage key for cart snapshots.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Tax rate applied to the subtotal (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Flat shipping fee charged up to the free-shipping threshold.
pub const FLAT_SHIPPING: Decimal = Decimal::TEN;

/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

/// Largest subtotal magnitude tracked (2^95 - 1). Half of `Decimal::MAX`,
/// leaving room for tax and shipping on top.
pub const MAX_SUBTOTAL: Decimal =
    Decimal::from_parts(u32::MAX, u32::MAX, 0x7FFF_FFFF, false, 0);

/// A product and how many of it are in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: i64,
}

impl CartItem {
    /// Price × quantity for this line, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product
            .price
            .saturating_mul(Decimal::from(self.quantity))
    }
}

/// Derived monetary totals of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

impl CartTotals {
    /// Compute totals from line items.
    #[must_use]
    pub fn from_items(items: &[CartItem]) -> Self {
        let subtotal = items
            .iter()
            .map(CartItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
            .clamp(-MAX_SUBTOTAL, MAX_SUBTOTAL);
        let tax = subtotal * TAX_RATE;
        let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            FLAT_SHIPPING
        };

        Self {
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }
}

/// Persisted cart layout:
/// `{ items: [{ product, quantity }], subtotal, tax, shipping, total }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    #[serde(flatten)]
    pub totals: CartTotals,
}

/// The cart state container.
#[derive(Debug)]
pub struct CartStore {
    items: Vec<CartItem>,
    totals: CartTotals,
    persister: SnapshotPersister,
}

impl CartStore {
    /// Create a cart, restoring the last persisted snapshot if one exists.
    ///
    /// Totals are recomputed from the restored items rather than trusted. A
    /// fresh or cleared cart keeps all-zero totals, the same state
    /// `clear_cart` leaves behind.
    #[must_use]
    pub fn load(persister: SnapshotPersister) -> Self {
        let snapshot = persister
            .load::<CartSnapshot>(CART_STORAGE_KEY)
            .unwrap_or_default();

        let totals = if snapshot.items.is_empty() && snapshot.totals == CartTotals::default() {
            CartTotals::default()
        } else {
            CartTotals::from_items(&snapshot.items)
        };

        debug!(lines = snapshot.items.len(), "Cart restored");
        Self {
            items: snapshot.items,
            totals,
            persister,
        }
    }

    /// Add `quantity` of `product`, merging into an existing line by id.
    pub fn add_item(&mut self, product: Product, quantity: i64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem { product, quantity });
        }
        self.commit();
    }

    /// Remove the line for `product_id`. No-op if absent.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.retain(|item| &item.product.id != product_id);
        self.commit();
    }

    /// Set the quantity for `product_id`, clamped at zero. No-op if absent.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if let Some(item) = self.items.iter_mut().find(|i| &i.product.id == product_id) {
            item.quantity = quantity.max(0);
        }
        self.commit();
    }

    /// Empty the cart and zero every total.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.totals = CartTotals::default();
        info!("Cart cleared");
        self.persist();
    }

    /// Recompute the derived totals from the current items.
    pub fn calculate_totals(&mut self) -> CartTotals {
        self.totals = CartTotals::from_items(&self.items);
        self.totals
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Line for `product_id`, if any.
    #[must_use]
    pub fn get_item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product.id == product_id)
    }

    #[must_use]
    pub const fn totals(&self) -> CartTotals {
        self.totals
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.totals.subtotal
    }

    #[must_use]
    pub fn tax(&self) -> Decimal {
        self.totals.tax
    }

    #[must_use]
    pub fn shipping(&self) -> Decimal {
        self.totals.shipping
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.totals.total
    }

    /// Sum of quantities across all lines (cart badge count).
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |count, i| count.saturating_add(i.quantity))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current state as it is persisted.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            totals: self.totals,
        }
    }

    fn commit(&mut self) {
        self.calculate_totals();
        self.persist();
    }

    fn persist(&self) {
        self.persister.persist(CART_STORAGE_KEY, &self.snapshot());
    }
}
