//! # Cart State
//!
//! The operator's sale cart and the store it sells from.
//!
//! ## Thread Safety
//! Cart and selected store live behind one `Arc<Mutex<T>>` so a command
//! never observes a cart filled from a store other than the selected one.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Operator Action          Command                 Cart State Change     │
//! │  ───────────────          ───────                 ─────────────────     │
//! │                                                                         │
//! │  Pick Store ─────────────► select_store() ──────► store = s, clear     │
//! │                                                                         │
//! │  Click Unit ─────────────► add_to_cart() ───────► insert or qty + 1    │
//! │                                                                         │
//! │  Click Remove ───────────► remove_from_cart() ──► drop line            │
//! │                                                                         │
//! │  Click Clear ────────────► clear_cart() ────────► lines.clear()        │
//! │                                                                         │
//! │  Confirm ────────────────► submit_sale() ───────► ticket, empty cart   │
//! │                                                                         │
//! │  View Cart ──────────────► get_cart() ──────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use mostrador_core::{CartLineItem, Money, SaleCart};
use serde::Serialize;
use tracing::info;
use ts_rs::TS;

/// Cart plus the store it belongs to.
#[derive(Debug, Default)]
pub struct CartSession {
    pub cart: SaleCart,
    pub store_id: Option<String>,
}

/// Read model of the cart for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub store_id: Option<String>,
    pub items: Vec<CartLineItem>,
    pub item_count: usize,
    pub total_quantity: u64,
    pub total: Money,
    /// `total` rendered with the configured locale, e.g. `$39.980`
    pub formatted_total: String,
}

impl CartSummary {
    /// Snapshot of `session`; `format` renders the total.
    pub fn from_session(session: &CartSession, format: impl Fn(Money) -> String) -> Self {
        let total = session.cart.total();
        CartSummary {
            store_id: session.store_id.clone(),
            items: session.cart.items().to_vec(),
            item_count: session.cart.item_count(),
            total_quantity: session.cart.total_quantity(),
            total,
            formatted_total: format(total),
        }
    }
}

/// Cart state managed by the backoffice.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    session: Arc<Mutex<CartSession>>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `store_id` selected.
    pub fn with_store(store_id: Option<String>) -> Self {
        CartState {
            session: Arc::new(Mutex::new(CartSession {
                cart: SaleCart::new(),
                store_id,
            })),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// A poisoned lock is recovered: the cart never holds a half-applied
    /// mutation because `SaleCart` checks before it writes.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartSession) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartSession) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }

    /// Currently selected store.
    pub fn store_id(&self) -> Option<String> {
        self.with_cart(|s| s.store_id.clone())
    }

    /// Selects the store to sell from.
    ///
    /// Switching to a different store empties the cart, since its lines
    /// were checked against the old store's stock. Returns whether lines
    /// were dropped.
    pub fn select_store(&self, store_id: Option<String>) -> bool {
        let store_id = store_id.filter(|s| !s.trim().is_empty());
        self.with_cart_mut(|session| {
            if session.store_id == store_id {
                return false;
            }
            let dropped = !session.cart.is_empty();
            if dropped {
                info!(
                    from = ?session.store_id,
                    to = ?store_id,
                    lines = session.cart.item_count(),
                    "Store changed, clearing cart"
                );
            }
            session.cart.clear();
            session.store_id = store_id;
            dropped
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mostrador_core::SellableUnit;

    fn unit(id: &str, stock: u64) -> SellableUnit {
        SellableUnit {
            store_product_id: id.to_string(),
            store_id: "s1".to_string(),
            display_name: format!("Polera {}", id),
            sku: format!("POL-{}", id),
            unit_price: Money::from_minor(9_990),
            image: None,
            available_stock: stock,
        }
    }

    #[test]
    fn test_store_change_clears_cart() {
        let state = CartState::with_store(Some("s1".to_string()));
        state
            .with_cart_mut(|s| {
                let store = s.store_id.clone();
                s.cart.add(&unit("v1", 2), store.as_deref())
            })
            .unwrap();

        assert!(!state.select_store(Some("s1".to_string())));
        assert_eq!(state.with_cart(|s| s.cart.item_count()), 1);

        assert!(state.select_store(Some("s2".to_string())));
        assert!(state.with_cart(|s| s.cart.is_empty()));
        assert_eq!(state.store_id().as_deref(), Some("s2"));
    }

    #[test]
    fn test_blank_store_is_none() {
        let state = CartState::with_store(Some("s1".to_string()));
        state.select_store(Some("  ".to_string()));
        assert_eq!(state.store_id(), None);
    }

    #[test]
    fn test_summary() {
        let state = CartState::with_store(Some("s1".to_string()));
        state.with_cart_mut(|s| {
            s.cart.add(&unit("v1", 5), Some("s1")).unwrap();
            s.cart.add(&unit("v1", 5), Some("s1")).unwrap();
        });

        let summary = state.with_cart(|s| CartSummary::from_session(s, |m| m.to_string()));
        assert_eq!(summary.item_count, 1);
        assert_eq!(summary.total_quantity, 2);
        assert_eq!(summary.total, Money::from_minor(19_980));
        assert_eq!(summary.formatted_total, "$19.980");
    }
}
