//! # Pricing Commands
//!
//! Markup bounds and gross price quotes.
//!
//! ## Quote Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quote_price("v1")                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  snapshot.variation("v1") ──► cost 100, list 250                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  net     = 100 × 1.4        = 140                                       │
//! │  implied = 250 / 140 ≈ 1.79 (≤ max 3.0, not clamped)                    │
//! │  gross   = 140 × 1.19       = 166.6                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use mostrador_core::markup::{quote_purchase_order as quote_order, quote_variation, PurchaseOrderQuote};
use mostrador_core::{MarkupConfig, MarkupQuote};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState, PricingState};

/// A quote for one variation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VariationQuote {
    pub variation_id: String,
    pub sku: String,
    pub name: String,
    pub quote: MarkupQuote,
    /// Gross price truncated to whole units and formatted, e.g. `$166`
    pub formatted_gross: String,
}

/// One requested purchase-order line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub variation_id: String,
    pub quantity: u32,
}

/// Bounds currently in effect.
pub fn get_markup_config(pricing: &PricingState) -> MarkupConfig {
    debug!("get_markup_config command");
    pricing.get()
}

/// Replaces the session's markup bounds.
///
/// ## Errors
/// `INVALID_INPUT` when a bound is not positive or min exceeds max.
pub fn set_markup_config(pricing: &PricingState, config: MarkupConfig) -> Result<MarkupConfig, ApiError> {
    debug!(?config, "set_markup_config command");
    pricing.set(config)?;
    Ok(config)
}

/// Quotes the gross price of one variation.
///
/// ## Errors
/// - `NOT_FOUND` when the variation is not in the catalog
/// - `INVALID_INPUT` when its cost or list price is zero
pub fn quote_price(
    catalog: &CatalogState,
    pricing: &PricingState,
    config: &ConfigState,
    variation_id: &str,
) -> Result<VariationQuote, ApiError> {
    debug!(variation_id = %variation_id, "quote_price command");
    let markup = pricing.get();

    catalog.with_snapshot(|s| -> Result<VariationQuote, ApiError> {
        let product = s
            .variation(variation_id)
            .ok_or_else(|| ApiError::not_found("Variation", variation_id))?;
        let quote = quote_variation(product, &markup)?;

        Ok(VariationQuote {
            variation_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            formatted_gross: config.format_money(quote.gross_money()?),
            quote,
        })
    })
}

/// Quotes a purchase order line by line.
///
/// Repeated variations are merged into one line, first position wins.
///
/// ## Errors
/// - `VALIDATION_ERROR` for an empty order
/// - `NOT_FOUND` for an unknown variation
/// - `INVALID_INPUT` for a zero quantity or an unpriceable variation
pub fn quote_purchase_order(
    catalog: &CatalogState,
    pricing: &PricingState,
    lines: &[OrderLineRequest],
) -> Result<PurchaseOrderQuote, ApiError> {
    debug!(lines = lines.len(), "quote_purchase_order command");
    if lines.is_empty() {
        return Err(ApiError::validation("Purchase order has no lines"));
    }

    let mut merged: Vec<(&str, u32)> = Vec::with_capacity(lines.len());
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for line in lines {
        match positions.get(line.variation_id.as_str()) {
            Some(&i) => merged[i].1 = merged[i].1.saturating_add(line.quantity),
            None => {
                positions.insert(line.variation_id.as_str(), merged.len());
                merged.push((line.variation_id.as_str(), line.quantity));
            }
        }
    }

    let markup = pricing.get();
    let order = catalog.with_snapshot(|s| {
        let resolved = merged
            .iter()
            .map(|&(id, qty)| {
                s.variation(id)
                    .map(|p| (p, qty))
                    .ok_or_else(|| ApiError::not_found("Variation", id))
            })
            .collect::<Result<Vec<_>, ApiError>>()?;
        quote_order(resolved, &markup).map_err(ApiError::from)
    })?;

    info!(
        lines = order.lines.len(),
        units = order.total_units(),
        net_total = %order.net_total,
        gross_total = %order.gross_total,
        "Purchase order quoted"
    );
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::backoffice;
    use crate::error::ErrorCode;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_quote_price() {
        let app = backoffice().await;

        let q = quote_price(&app.catalog, &app.pricing, &app.config, "v1").unwrap();
        assert_eq!(q.quote.gross_price, dec!(166.6));
        assert!(!q.quote.clamped);
        assert_eq!(q.formatted_gross, "$166");

        let clamped = quote_price(&app.catalog, &app.pricing, &app.config, "v2").unwrap();
        assert!(clamped.quote.clamped);
        assert_eq!(clamped.quote.gross_price, dec!(238));

        let err = quote_price(&app.catalog, &app.pricing, &app.config, "nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_quote_follows_session_bounds() {
        let app = backoffice().await;
        let tighter = MarkupConfig {
            max_markup: dec!(1.5),
            ..MarkupConfig::default()
        };
        set_markup_config(&app.pricing, tighter).unwrap();
        assert_eq!(get_markup_config(&app.pricing).max_markup, dec!(1.5));

        let q = quote_price(&app.catalog, &app.pricing, &app.config, "v1").unwrap();
        assert!(q.quote.clamped);

        let inverted = MarkupConfig {
            min_markup: dec!(5),
            ..MarkupConfig::default()
        };
        let err = set_markup_config(&app.pricing, inverted).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(get_markup_config(&app.pricing).max_markup, dec!(1.5));
    }

    #[tokio::test]
    async fn test_purchase_order_merges_lines() {
        let app = backoffice().await;
        let lines = vec![
            OrderLineRequest { variation_id: "v1".into(), quantity: 2 },
            OrderLineRequest { variation_id: "v2".into(), quantity: 1 },
            OrderLineRequest { variation_id: "v1".into(), quantity: 1 },
        ];

        let order = quote_purchase_order(&app.catalog, &app.pricing, &lines).unwrap();
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[0].quantity, 3);
        assert_eq!(order.total_units(), 4);
        // 3 × 166.6 + 238
        assert_eq!(order.gross_total, dec!(737.8));
    }

    #[tokio::test]
    async fn test_purchase_order_errors() {
        let app = backoffice().await;

        let err = quote_purchase_order(&app.catalog, &app.pricing, &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let unknown = [OrderLineRequest { variation_id: "zz".into(), quantity: 1 }];
        let err = quote_purchase_order(&app.catalog, &app.pricing, &unknown).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let zero = [OrderLineRequest { variation_id: "v1".into(), quantity: 0 }];
        let err = quote_purchase_order(&app.catalog, &app.pricing, &zero).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
