//! # Markup Pricing Engine
//!
//! Computes what a third-party (consignment) seller is charged for a unit.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cost = 100, list = 600, min_floating = 1.4, max_markup = 3.0           │
//! │                                                                         │
//! │  1. candidate = cost × min_floating          = 140                      │
//! │  2. implied   = list / candidate             = 4.2857…                  │
//! │  3. implied > max_markup?  yes                                          │
//! │        candidate = list / max_markup         = 200                      │
//! │  4. gross     = candidate × 1.19 (IVA)       = 238                      │
//! │                                                                         │
//! │  The seller's net cost rises until the markup they earn is capped.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All arithmetic is `Decimal`, so `140 × 1.19` is exactly `166.60`.
//! Every function is pure; configs are plain values passed in.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{FlattenedProduct, TaxRate};

// =============================================================================
// Configuration
// =============================================================================

/// Markup bounds for one pricing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MarkupConfig {
    /// Markup below this is flagged on the quote.
    #[ts(as = "String")]
    pub min_markup: Decimal,

    /// Markup above this is clamped.
    #[ts(as = "String")]
    pub max_markup: Decimal,

    /// Multiplier applied to cost to get the seller's starting net cost.
    #[ts(as = "String")]
    pub min_floating: Decimal,
}

impl Default for MarkupConfig {
    /// 1.5× floor, 3.0× ceiling, cost × 1.4 starting point.
    fn default() -> Self {
        MarkupConfig {
            min_markup: Decimal::new(15, 1),
            max_markup: Decimal::new(30, 1),
            min_floating: Decimal::new(14, 1),
        }
    }
}

impl MarkupConfig {
    /// Creates a validated config.
    pub fn new(min_markup: Decimal, max_markup: Decimal, min_floating: Decimal) -> CoreResult<Self> {
        let config = MarkupConfig {
            min_markup,
            max_markup,
            min_floating,
        };
        config.validate()?;
        Ok(config)
    }

    /// All multipliers strictly positive, `min_markup <= max_markup`.
    pub fn validate(&self) -> CoreResult<()> {
        for (field, value) in [
            ("min markup", self.min_markup),
            ("max markup", self.max_markup),
            ("min floating multiplier", self.min_floating),
        ] {
            if value <= Decimal::ZERO {
                return Err(CoreError::invalid_input(field, "must be greater than zero"));
            }
        }
        if self.min_markup > self.max_markup {
            return Err(CoreError::invalid_input(
                "min markup",
                format!("{} exceeds max markup {}", self.min_markup, self.max_markup),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Quote
// =============================================================================

/// The priced result for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MarkupQuote {
    /// What the seller pays before tax.
    #[ts(as = "String")]
    pub net_cost: Decimal,

    /// `net_cost × 1.19`.
    #[ts(as = "String")]
    pub gross_price: Decimal,

    /// `list / (cost × min_floating)`, before clamping.
    #[ts(as = "String")]
    pub implied_markup: Decimal,

    /// `list / net_cost` after clamping.
    #[ts(as = "String")]
    pub effective_markup: Decimal,

    pub clamped: bool,
    pub below_min_markup: bool,
}

impl MarkupQuote {
    /// Gross price truncated to whole currency units for display.
    pub fn gross_money(&self) -> CoreResult<Money> {
        Money::from_decimal_truncated(self.gross_price)
    }

    /// Net cost truncated to whole currency units.
    pub fn net_money(&self) -> CoreResult<Money> {
        Money::from_decimal_truncated(self.net_cost)
    }
}

fn overflow(field: &str) -> CoreError {
    CoreError::invalid_input(field, "value out of range")
}

/// Prices one unit from its cost and list price.
///
/// ## Errors
/// [`CoreError::InvalidInput`] when cost or list price is zero or negative,
/// when the config is invalid, or when the arithmetic overflows.
///
/// ## Example
/// ```rust
/// use mostrador_core::markup::{quote, MarkupConfig};
/// use rust_decimal::Decimal;
///
/// let config = MarkupConfig::default();
/// let q = quote(Decimal::from(100), Decimal::from(250), &config).unwrap();
/// assert_eq!(q.gross_price, Decimal::new(1666, 1));
/// assert!(!q.clamped);
/// ```
pub fn quote(cost: Decimal, list: Decimal, config: &MarkupConfig) -> CoreResult<MarkupQuote> {
    config.validate()?;
    if cost <= Decimal::ZERO {
        return Err(CoreError::invalid_input("cost price", "must be greater than zero"));
    }
    if list <= Decimal::ZERO {
        return Err(CoreError::invalid_input("list price", "must be greater than zero"));
    }

    let candidate = cost
        .checked_mul(config.min_floating)
        .ok_or_else(|| overflow("cost price"))?;
    let implied_markup = list
        .checked_div(candidate)
        .ok_or_else(|| overflow("list price"))?;

    let clamped = implied_markup > config.max_markup;
    let (net_cost, effective_markup) = if clamped {
        let net = list
            .checked_div(config.max_markup)
            .ok_or_else(|| overflow("list price"))?;
        (net, config.max_markup)
    } else {
        (candidate, implied_markup)
    };

    let gross_price = net_cost
        .checked_mul(vat_multiplier())
        .ok_or_else(|| overflow("net cost"))?;

    debug!(
        %cost,
        %list,
        %implied_markup,
        %net_cost,
        %gross_price,
        clamped,
        "Third-party price computed"
    );

    Ok(MarkupQuote {
        net_cost,
        gross_price,
        implied_markup,
        effective_markup,
        clamped,
        below_min_markup: effective_markup < config.min_markup,
    })
}

/// `1 + VAT` as a decimal multiplier (1.19).
fn vat_multiplier() -> Decimal {
    Decimal::ONE + Decimal::new(i64::from(TaxRate::VAT.bps()), 4)
}

/// Prices a flattened variation from its stored cost and list price.
pub fn quote_variation(product: &FlattenedProduct, config: &MarkupConfig) -> CoreResult<MarkupQuote> {
    quote(
        product.cost_price.to_decimal(),
        product.list_price.to_decimal(),
        config,
    )
}

// =============================================================================
// Purchase Orders
// =============================================================================

/// One quoted line of a third-party purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLine {
    pub variation_id: String,
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub quote: MarkupQuote,
    #[ts(as = "String")]
    pub net_total: Decimal,
    #[ts(as = "String")]
    pub gross_total: Decimal,
}

/// A fully quoted purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderQuote {
    pub lines: Vec<PurchaseOrderLine>,
    #[ts(as = "String")]
    pub net_total: Decimal,
    #[ts(as = "String")]
    pub gross_total: Decimal,
}

impl PurchaseOrderQuote {
    /// Total units across all lines.
    pub fn total_units(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

/// Quotes every `(variation, quantity)` pair; one bad line fails the order.
pub fn quote_purchase_order<'a, I>(lines: I, config: &MarkupConfig) -> CoreResult<PurchaseOrderQuote>
where
    I: IntoIterator<Item = (&'a FlattenedProduct, u32)>,
{
    let mut order = PurchaseOrderQuote {
        lines: Vec::new(),
        net_total: Decimal::ZERO,
        gross_total: Decimal::ZERO,
    };

    for (product, quantity) in lines {
        if quantity == 0 {
            return Err(CoreError::invalid_input(
                "quantity",
                format!("{} must be ordered at least once", product.sku),
            ));
        }

        let quote = quote_variation(product, config)?;
        let qty = Decimal::from(quantity);
        let net_total = quote
            .net_cost
            .checked_mul(qty)
            .ok_or_else(|| overflow("quantity"))?;
        let gross_total = quote
            .gross_price
            .checked_mul(qty)
            .ok_or_else(|| overflow("quantity"))?;

        order.net_total = order
            .net_total
            .checked_add(net_total)
            .ok_or_else(|| overflow("order total"))?;
        order.gross_total = order
            .gross_total
            .checked_add(gross_total)
            .ok_or_else(|| overflow("order total"))?;
        order.lines.push(PurchaseOrderLine {
            variation_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            quantity,
            quote,
            net_total,
            gross_total,
        });
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config() -> MarkupConfig {
        MarkupConfig::new(dec!(1.5), dec!(3.0), dec!(1.4)).unwrap()
    }

    fn flat(id: &str, cost: i64, list: i64) -> FlattenedProduct {
        FlattenedProduct {
            id: id.to_string(),
            name: "Chaqueta".to_string(),
            image: None,
            sku: format!("CH-{}", id),
            size: "M".to_string(),
            cost_price: Money::from_minor(cost),
            list_price: Money::from_minor(list),
            central_stock: 0,
            total_stock: 0,
            total_products: 1,
        }
    }

    #[test]
    fn test_no_clamp() {
        let q = quote(dec!(100), dec!(250), &config()).unwrap();
        assert_eq!(q.net_cost, dec!(140));
        assert!(q.implied_markup > dec!(1.785) && q.implied_markup < dec!(1.786));
        assert!(!q.clamped);
        assert_eq!(q.gross_price, dec!(166.6));
        assert_eq!(q.gross_money().unwrap(), Money::from_minor(166));
    }

    #[test]
    fn test_clamp_at_max_markup() {
        let q = quote(dec!(100), dec!(600), &config()).unwrap();
        assert!(q.clamped);
        assert!(q.implied_markup > dec!(4.28) && q.implied_markup < dec!(4.29));
        assert_eq!(q.net_cost, dec!(200));
        assert_eq!(q.effective_markup, dec!(3.0));
        assert_eq!(q.gross_price, dec!(238));
    }

    #[test]
    fn test_below_min_markup_is_flagged_not_changed() {
        // 100 × 1.4 = 140, 180 / 140 ≈ 1.29 < 1.5
        let q = quote(dec!(100), dec!(180), &config()).unwrap();
        assert!(q.below_min_markup);
        assert_eq!(q.net_cost, dec!(140));
    }

    #[test]
    fn test_rejects_non_positive_prices() {
        for (cost, list) in [(dec!(0), dec!(250)), (dec!(-5), dec!(250)), (dec!(100), dec!(0)), (dec!(100), dec!(-1))] {
            let err = quote(cost, list, &config()).unwrap_err();
            assert!(matches!(err, CoreError::InvalidInput { .. }), "{cost}/{list}: {err:?}");
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(MarkupConfig::new(dec!(1.5), dec!(3.0), dec!(1.4)).is_ok());
        assert!(MarkupConfig::new(dec!(0), dec!(3.0), dec!(1.4)).is_err());
        assert!(MarkupConfig::new(dec!(1.5), dec!(3.0), dec!(-1)).is_err());
        assert!(MarkupConfig::new(dec!(4.0), dec!(3.0), dec!(1.4)).is_err());

        let broken = MarkupConfig {
            max_markup: Decimal::ZERO,
            ..MarkupConfig::default()
        };
        assert!(quote(dec!(100), dec!(250), &broken).is_err());
    }

    #[test]
    fn test_purchase_order_totals() {
        let a = flat("1", 100, 250);
        let b = flat("2", 100, 600);
        let order = quote_purchase_order([(&a, 2), (&b, 1)], &config()).unwrap();

        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.total_units(), 3);
        assert_eq!(order.lines[0].gross_total, dec!(333.2));
        assert_eq!(order.net_total, dec!(480));
        assert_eq!(order.gross_total, dec!(571.2));
    }

    #[test]
    fn test_purchase_order_rejects_bad_lines() {
        let a = flat("1", 100, 250);
        let free = flat("2", 0, 600);
        assert!(quote_purchase_order([(&a, 0)], &config()).is_err());
        assert!(quote_purchase_order([(&a, 1), (&free, 1)], &config()).is_err());
    }

    #[test]
    fn test_purchase_order_total_overflow_is_an_error() {
        // Each line fits on its own; the running total does not
        let bulk = flat("1", 1_000_000_000_000_000_000, 1_000_000_000_000_000_000);
        let lines = std::iter::repeat((&bulk, u32::MAX)).take(16);

        let err = quote_purchase_order(lines, &config()).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidInput { ref field, .. } if field == "order total"),
            "{err:?}"
        );
    }

    #[test]
    fn test_vat_multiplier() {
        assert_eq!(vat_multiplier(), dec!(1.19));
    }
}
