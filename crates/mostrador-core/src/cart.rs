//! # Sale Cart Aggregator
//!
//! The one stateful component of the core: the line items of the sale an
//! operator is building, keyed by store-product id.
//!
//! ## Add Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add(unit, requested_store)                                             │
//! │       │                                                                 │
//! │       ├── no store selected?  ──► NoStoreSelected  ─┐                   │
//! │       │                                             │                   │
//! │       ├── available_stock == 0? ──► OutOfStock  ────┤  notify + Err     │
//! │       │                                             │  (cart unchanged) │
//! │       ├── already in cart?                          │                   │
//! │       │     ├── qty + 1 > stock ──► StockExceeded ──┘                   │
//! │       │     └── qty += 1          ──► Incremented                       │
//! │       │                                                                 │
//! │       └── insert with qty 1       ──► Inserted                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Violations are expected operator mistakes, not faults: they come back as
//! a typed `Err`, go through the injected [`CartNotifier`], and never touch
//! the line items.
//!
//! The cart is single-writer. The backoffice wraps it in a mutex only to
//! share it with async command handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::catalog::SellableUnit;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Line Items
// =============================================================================

/// One line of the sale being built.
///
/// Price is frozen when the line is first added; the stock ceiling follows
/// the unit passed to the latest successful add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Keys the line.
    pub store_product_id: String,
    pub name: String,
    pub unit_price: Money,

    /// Always >= 1.
    pub quantity: u32,
    pub store_id: String,
    pub image: Option<String>,

    /// Ceiling for `quantity`, as of the last successful add.
    pub available_stock: u64,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    /// A fresh line with quantity 1, sold from `store_id`.
    pub fn from_unit(unit: &SellableUnit, store_id: &str) -> Self {
        CartLineItem {
            store_product_id: unit.store_product_id.clone(),
            name: unit.display_name.clone(),
            unit_price: unit.unit_price,
            quantity: 1,
            store_id: store_id.to_string(),
            image: unit.image.clone(),
            available_stock: unit.available_stock,
            added_at: Utc::now(),
        }
    }

    /// `unit_price × quantity`.
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

/// What a successful `add` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AddOutcome {
    Inserted,
    Incremented { quantity: u32 },
}

// =============================================================================
// Notifications
// =============================================================================

/// Receives cart violations so the caller can show them to the operator.
pub trait CartNotifier {
    fn notify(&self, error: &CoreError);
}

/// Logs violations as warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl CartNotifier for TracingNotifier {
    fn notify(&self, error: &CoreError) {
        warn!(%error, "Cart operation rejected");
    }
}

// =============================================================================
// Sale Ticket
// =============================================================================

/// A submitted cart. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleTicket {
    /// UUID v4.
    pub id: String,
    pub store_id: String,
    pub lines: Vec<CartLineItem>,
    pub total: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl SaleTicket {
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

// =============================================================================
// Sale Cart
// =============================================================================

/// In-memory sale cart.
///
/// ## Invariants
/// - At most one line per store-product id, in insertion order
/// - Every line has `1 <= quantity <= available_stock`, checked against the
///   stock of the unit being added
/// - [`SaleCart::total`] is recomputed on every call
#[derive(Debug, Default)]
pub struct SaleCart<N = TracingNotifier> {
    items: Vec<CartLineItem>,
    notifier: N,
}

impl SaleCart<TracingNotifier> {
    /// An empty cart that logs violations.
    pub fn new() -> Self {
        SaleCart::with_notifier(TracingNotifier)
    }
}

impl<N: CartNotifier> SaleCart<N> {
    /// An empty cart that reports violations to `notifier`.
    pub fn with_notifier(notifier: N) -> Self {
        SaleCart {
            items: Vec::new(),
            notifier,
        }
    }

    fn reject<T>(&self, error: CoreError) -> CoreResult<T> {
        self.notifier.notify(&error);
        Err(error)
    }

    /// Adds one unit of `unit` sold from `requested_store`.
    ///
    /// ## Errors
    /// - [`CoreError::NoStoreSelected`] when `requested_store` is `None` or blank
    /// - [`CoreError::OutOfStock`] when the store holds none
    /// - [`CoreError::StockExceeded`] when another unit would exceed `unit.available_stock`
    ///
    /// Every error is also passed to the notifier; the cart is unchanged.
    ///
    /// ## Example
    /// ```rust
    /// use mostrador_core::cart::{AddOutcome, SaleCart};
    /// use mostrador_core::catalog::SellableUnit;
    /// use mostrador_core::money::Money;
    ///
    /// let unit = SellableUnit {
    ///     store_product_id: "v1".into(),
    ///     store_id: "s1".into(),
    ///     display_name: "Polera (M)".into(),
    ///     sku: "POL-M".into(),
    ///     unit_price: Money::from_minor(9_990),
    ///     image: None,
    ///     available_stock: 2,
    /// };
    ///
    /// let mut cart = SaleCart::new();
    /// assert_eq!(cart.add(&unit, Some("s1")).unwrap(), AddOutcome::Inserted);
    /// assert_eq!(cart.add(&unit, Some("s1")).unwrap(), AddOutcome::Incremented { quantity: 2 });
    /// assert!(cart.add(&unit, Some("s1")).is_err());
    /// assert_eq!(cart.total(), Money::from_minor(19_980));
    /// ```
    pub fn add(&mut self, unit: &SellableUnit, requested_store: Option<&str>) -> CoreResult<AddOutcome> {
        let store_id = match requested_store.map(str::trim) {
            Some(store) if !store.is_empty() => store,
            _ => return self.reject(CoreError::NoStoreSelected),
        };

        if unit.available_stock == 0 {
            return self.reject(CoreError::OutOfStock {
                name: unit.display_name.clone(),
            });
        }

        let position = self
            .items
            .iter()
            .position(|i| i.store_product_id == unit.store_product_id);

        let Some(index) = position else {
            self.items.push(CartLineItem::from_unit(unit, store_id));
            debug!(store_product_id = %unit.store_product_id, store_id, "Line added to cart");
            return Ok(AddOutcome::Inserted);
        };

        let line = &self.items[index];
        let next = line.quantity.saturating_add(1);
        if u64::from(next) > unit.available_stock {
            let error = CoreError::StockExceeded {
                name: line.name.clone(),
                available: unit.available_stock,
            };
            return self.reject(error);
        }

        let line = &mut self.items[index];
        line.quantity = next;
        line.available_stock = unit.available_stock;
        debug!(store_product_id = %unit.store_product_id, quantity = next, "Cart line incremented");
        Ok(AddOutcome::Incremented { quantity: next })
    }

    /// Drops the line for `store_product_id`. Returns whether one existed.
    pub fn remove(&mut self, store_product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.store_product_id != store_product_id);
        before != self.items.len()
    }

    /// Sum of every line total.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Turns the cart into a [`SaleTicket`] and empties it.
    ///
    /// ## Errors
    /// [`CoreError::EmptyCart`] when there is nothing to sell; the cart is
    /// left as it was.
    pub fn submit(&mut self) -> CoreResult<SaleTicket> {
        let Some(first) = self.items.first() else {
            return Err(CoreError::EmptyCart);
        };

        let store_id = first.store_id.clone();
        let total = self.total();
        let lines = std::mem::take(&mut self.items);
        let ticket = SaleTicket {
            id: Uuid::new_v4().to_string(),
            store_id,
            lines,
            total,
            created_at: Utc::now(),
        };

        info!(
            ticket_id = %ticket.id,
            store_id = %ticket.store_id,
            lines = ticket.lines.len(),
            total = ticket.total.minor(),
            "Sale submitted"
        );
        Ok(ticket)
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn get(&self, store_product_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.store_product_id == store_product_id)
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
