//! # Cart Commands
//!
//! Store selection, cart manipulation, and sale submission.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Store   │────►│  Empty   │────►│ In Cart  │────►│  Ticket  │       │
//! │  │ Selected │     │  Cart    │     │          │     │          │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                                 │                │              │
//! │       │                            add_to_cart      submit_sale         │
//! │  select_store                      remove_from_cart      │              │
//! │  (clears cart                           │                ▼              │
//! │   on change)                            ▼          (back to empty)      │
//! │                                    clear_cart ─────────────►            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejected adds leave the cart as it was and come back as an
//! `ApiError`; the cart's notifier has already logged them.

use mostrador_core::catalog::sellable_units;
use mostrador_core::SaleTicket;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CartState, CartSummary, CatalogState, ConfigState};

fn summary(cart: &CartState, config: &ConfigState) -> CartSummary {
    cart.with_cart(|s| CartSummary::from_session(s, |m| config.format_money(m)))
}

/// Selects the store to sell from. `None` or blank deselects.
///
/// Changing the store empties the cart.
pub fn select_store(cart: &CartState, config: &ConfigState, store_id: Option<&str>) -> CartSummary {
    debug!(store_id = ?store_id, "select_store command");
    cart.select_store(store_id.map(str::to_string));
    summary(cart, config)
}

/// Gets the current cart contents and total.
pub fn get_cart(cart: &CartState, config: &ConfigState) -> CartSummary {
    debug!("get_cart command");
    summary(cart, config)
}

/// Adds one unit of `store_product_id` from the selected store.
///
/// ## Behavior
/// - New unit: inserted with quantity 1
/// - Unit already in cart: quantity + 1
/// - The unit's stock in the selected store is the ceiling
///
/// ## Errors
/// - `NOT_FOUND` when the id is not in the catalog
/// - `NO_STORE_SELECTED`, `OUT_OF_STOCK`, `STOCK_EXCEEDED` from the cart
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    config: &ConfigState,
    store_product_id: &str,
) -> Result<CartSummary, ApiError> {
    debug!(store_product_id = %store_product_id, "add_to_cart command");

    cart.with_cart_mut(|session| -> Result<CartSummary, ApiError> {
        let store = session.store_id.clone();
        let unit = catalog
            .with_snapshot(|s| {
                sellable_units(&s.products, store.as_deref().unwrap_or_default())
                    .into_iter()
                    .find(|u| u.store_product_id == store_product_id)
            })
            .ok_or_else(|| ApiError::not_found("Variation", store_product_id))?;

        session.cart.add(&unit, store.as_deref())?;
        Ok(CartSummary::from_session(session, |m| config.format_money(m)))
    })
}

/// Removes a line from the cart. A missing id changes nothing.
pub fn remove_from_cart(cart: &CartState, config: &ConfigState, store_product_id: &str) -> CartSummary {
    debug!(store_product_id = %store_product_id, "remove_from_cart command");
    let removed = cart.with_cart_mut(|s| s.cart.remove(store_product_id));
    if !removed {
        debug!(store_product_id = %store_product_id, "Line not in cart");
    }
    summary(cart, config)
}

/// Clears all lines from the cart. The selected store stays.
pub fn clear_cart(cart: &CartState, config: &ConfigState) -> CartSummary {
    debug!("clear_cart command");
    cart.with_cart_mut(|s| s.cart.clear());
    summary(cart, config)
}

/// Turns the cart into a sale ticket and empties it.
///
/// ## Errors
/// `EMPTY_CART` when there is nothing to sell.
pub fn submit_sale(cart: &CartState) -> Result<SaleTicket, ApiError> {
    debug!("submit_sale command");
    let ticket = cart.with_cart_mut(|s| s.cart.submit())?;
    info!(ticket_id = %ticket.id, units = ticket.total_quantity(), "submit_sale complete");
    Ok(ticket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::backoffice;
    use crate::error::ErrorCode;
    use mostrador_core::Money;

    #[tokio::test]
    async fn test_add_up_to_store_stock() {
        let app = backoffice().await;

        let cart = add_to_cart(&app.catalog, &app.cart, &app.config, "v1").unwrap();
        assert_eq!(cart.items[0].quantity, 1);
        assert_eq!(cart.items[0].name, "Zapatilla Running (40)");

        // s1 holds a single v1
        let err = add_to_cart(&app.catalog, &app.cart, &app.config, "v1").unwrap_err();
        assert_eq!(err.code, ErrorCode::StockExceeded);
        assert_eq!(get_cart(&app.cart, &app.config).items[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_add_rejections() {
        let app = backoffice().await;

        let err = add_to_cart(&app.catalog, &app.cart, &app.config, "v2").unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfStock);

        let err = add_to_cart(&app.catalog, &app.cart, &app.config, "missing").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        select_store(&app.cart, &app.config, None);
        let err = add_to_cart(&app.catalog, &app.cart, &app.config, "v3").unwrap_err();
        assert_eq!(err.code, ErrorCode::NoStoreSelected);
        assert!(get_cart(&app.cart, &app.config).items.is_empty());
    }

    #[tokio::test]
    async fn test_store_switch_changes_ceiling() {
        let app = backoffice().await;
        add_to_cart(&app.catalog, &app.cart, &app.config, "v3").unwrap();

        let cart = select_store(&app.cart, &app.config, Some("s2"));
        assert!(cart.items.is_empty());
        assert_eq!(cart.store_id.as_deref(), Some("s2"));

        for _ in 0..3 {
            add_to_cart(&app.catalog, &app.cart, &app.config, "v1").unwrap();
        }
        let err = add_to_cart(&app.catalog, &app.cart, &app.config, "v1").unwrap_err();
        assert_eq!(err.code, ErrorCode::StockExceeded);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let app = backoffice().await;
        add_to_cart(&app.catalog, &app.cart, &app.config, "v1").unwrap();
        add_to_cart(&app.catalog, &app.cart, &app.config, "v3").unwrap();

        let cart = remove_from_cart(&app.cart, &app.config, "missing");
        assert_eq!(cart.item_count, 2);

        let cart = remove_from_cart(&app.cart, &app.config, "v1");
        assert_eq!(cart.item_count, 1);
        assert_eq!(cart.formatted_total, "$9.990");

        let cart = clear_cart(&app.cart, &app.config);
        assert!(cart.items.is_empty());
        assert_eq!(cart.store_id.as_deref(), Some("s1"));
    }

    #[tokio::test]
    async fn test_submit_sale() {
        let app = backoffice().await;
        assert_eq!(submit_sale(&app.cart).unwrap_err().code, ErrorCode::EmptyCart);

        add_to_cart(&app.catalog, &app.cart, &app.config, "v3").unwrap();
        add_to_cart(&app.catalog, &app.cart, &app.config, "v3").unwrap();
        add_to_cart(&app.catalog, &app.cart, &app.config, "v1").unwrap();

        let ticket = submit_sale(&app.cart).unwrap();
        assert_eq!(ticket.store_id, "s1");
        assert_eq!(ticket.total, Money::from_minor(2 * 9_990 + 250));
        assert_eq!(ticket.total_quantity(), 3);
        assert!(get_cart(&app.cart, &app.config).items.is_empty());
    }
}
