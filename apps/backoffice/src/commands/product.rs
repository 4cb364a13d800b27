//! # Product Commands
//!
//! Catalog refresh, listing, search, and stock reporting.
//!
//! ## Search Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Search Flow                                  │
//! │                                                                         │
//! │  User types: "zapatilla"                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌─────────────────────────────────┐                                   │
//! │  │ Validate: trim, ≤ 100 chars     │                                   │
//! │  └─────────────────────────────────┘                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌─────────────────────────────────┐                                   │
//! │  │ Accent/case-insensitive match   │  "Zapatilla Running (40)"         │
//! │  │ on name or SKU, catalog order   │  "ZAP-41"                         │
//! │  └─────────────────────────────────┘                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  First `limit` rows (default 50, max 200)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every read works on the last loaded snapshot; only
//! [`refresh_catalog`] touches the backend.

use std::time::Instant;

use mostrador_core::catalog::{search, sellable_units};
use mostrador_core::stock::{reconcile, StockReconciliation};
use mostrador_core::validation::{validate_search_query, validate_store_id};
use mostrador_core::{CoreError, FlattenedProduct, SellableUnit};
use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{CartState, CatalogState, ConfigState, RefreshSummary};

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

/// Upper bound on search results.
pub const MAX_SEARCH_LIMIT: u32 = 200;

/// A flattened variation as listed in the UI.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    #[serde(flatten)]
    pub product: FlattenedProduct,

    /// `list_price` formatted for display, e.g. `$9.990`
    pub formatted_price: String,
}

impl ProductRow {
    fn new(product: &FlattenedProduct, config: &ConfigState) -> Self {
        ProductRow {
            formatted_price: config.format_money(product.list_price),
            product: product.clone(),
        }
    }
}

/// Reloads products and categories from the catalog source.
///
/// ## Errors
/// `BACKEND_ERROR` or `INVALID_PAYLOAD`; the previous snapshot is kept.
pub async fn refresh_catalog(catalog: &CatalogState) -> Result<RefreshSummary, ApiError> {
    debug!(source = %catalog.describe_source(), "refresh_catalog command");
    Ok(catalog.refresh().await?)
}

/// Every variation as a flat row, product-major order.
pub fn list_products(catalog: &CatalogState, config: &ConfigState) -> Vec<ProductRow> {
    debug!("list_products command");
    catalog.with_snapshot(|s| s.flattened.iter().map(|p| ProductRow::new(p, config)).collect())
}

/// Searches the flattened catalog by name or SKU.
///
/// An empty query lists everything up to `limit`.
///
/// ## Errors
/// `VALIDATION_ERROR` when the query is longer than 100 characters.
pub fn search_products(
    catalog: &CatalogState,
    config: &ConfigState,
    query: &str,
    limit: Option<u32>,
) -> Result<Vec<ProductRow>, ApiError> {
    let start = Instant::now();
    let query = validate_search_query(query)?;
    let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT).min(MAX_SEARCH_LIMIT) as usize;

    debug!(query = %query, limit, "search_products command");

    let rows: Vec<ProductRow> = catalog.with_snapshot(|s| {
        search(&s.flattened, &query)
            .into_iter()
            .take(limit)
            .map(|p| ProductRow::new(p, config))
            .collect()
    });

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = rows.len(),
        query = %query,
        "search_products complete"
    );
    Ok(rows)
}

/// Units sellable from `store_id`, or from the selected store when `None`.
///
/// Out-of-stock units are included so the UI can show them disabled.
///
/// ## Errors
/// `NO_STORE_SELECTED` when no store is given or selected.
pub fn list_sellable_units(
    catalog: &CatalogState,
    cart: &CartState,
    store_id: Option<&str>,
) -> Result<Vec<SellableUnit>, ApiError> {
    let store = match store_id {
        Some(id) => Some(id.trim().to_string()),
        None => cart.store_id(),
    }
    .ok_or(CoreError::NoStoreSelected)?;
    validate_store_id(&store).map_err(|_| CoreError::NoStoreSelected)?;

    debug!(store_id = %store, "list_sellable_units command");
    Ok(catalog.with_snapshot(|s| sellable_units(&s.products, &store)))
}

/// Warehouse and store stock per variation.
///
/// With `depleted_only`, just the variations nobody holds.
pub fn stock_report(catalog: &CatalogState, depleted_only: bool) -> Vec<StockReconciliation> {
    debug!(depleted_only, "stock_report command");
    let rows = catalog.with_snapshot(|s| reconcile(&s.products));
    if depleted_only {
        rows.into_iter().filter(StockReconciliation::is_depleted).collect()
    } else {
        rows
    }
}
