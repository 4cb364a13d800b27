//! # Stock Aggregator
//!
//! Reduces per-store stock records into per-variation totals and reconciles
//! central-warehouse stock against store stock.
//!
//! ```text
//! Variation ZT-42
//!   central_stock: 4
//!   stores: [s1: 2, s2: 0, s3: 5]
//!        │
//!        ▼
//!   aggregate_store_stock ──► 7
//!   reconcile             ──► { central: 4, stores: 7, combined: 11, holding: 2 }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Product, StoreStockRecord, Variation};

/// Sums the quantities of a variation's store records. Empty yields 0.
///
/// ## Example
/// ```rust
/// use mostrador_core::stock::aggregate_store_stock;
/// use mostrador_core::types::StoreStockRecord;
///
/// let records = vec![StoreStockRecord::new("s1", 2), StoreStockRecord::new("s2", 5)];
/// assert_eq!(aggregate_store_stock(&records), 7);
/// assert_eq!(aggregate_store_stock(&[]), 0);
/// ```
pub fn aggregate_store_stock(records: &[StoreStockRecord]) -> u64 {
    records.iter().map(|r| u64::from(r.quantity)).sum()
}

/// Quantity of `variation` held by `store_id`.
///
/// Missing store means zero; duplicate records for the same store add up.
pub fn store_stock(variation: &Variation, store_id: &str) -> u64 {
    variation
        .stores
        .iter()
        .filter(|r| r.store_id == store_id)
        .map(|r| u64::from(r.quantity))
        .sum()
}

/// Central-vs-store stock for one variation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockReconciliation {
    pub variation_id: String,
    pub sku: String,
    pub central_stock: u32,
    pub store_stock: u64,
    pub combined_stock: u64,

    /// Stores with a positive quantity.
    pub stores_holding: usize,
}

impl StockReconciliation {
    fn of(variation: &Variation) -> Self {
        let store_total = aggregate_store_stock(&variation.stores);
        StockReconciliation {
            variation_id: variation.id.clone(),
            sku: variation.sku.clone(),
            central_stock: variation.central_stock,
            store_stock: store_total,
            combined_stock: store_total + u64::from(variation.central_stock),
            stores_holding: variation.stores.iter().filter(|r| r.quantity > 0).count(),
        }
    }

    /// True when neither the warehouse nor any store holds the variation.
    pub fn is_depleted(&self) -> bool {
        self.combined_stock == 0
    }
}

/// One reconciliation row per variation, product-major order.
pub fn reconcile(products: &[Product]) -> Vec<StockReconciliation> {
    products
        .iter()
        .flat_map(|p| p.variations.iter())
        .map(StockReconciliation::of)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use proptest::prelude::*;

    fn variation(id: &str, central: u32, stores: Vec<StoreStockRecord>) -> Variation {
        Variation {
            id: id.to_string(),
            product_id: "p1".to_string(),
            size: "M".to_string(),
            list_price: Money::from_minor(10_000),
            cost_price: Money::from_minor(4_000),
            sku: format!("SKU-{}", id),
            central_stock: central,
            stores,
        }
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(aggregate_store_stock(&[]), 0);
    }

    #[test]
    fn test_store_stock_lookup() {
        let v = variation(
            "v1",
            0,
            vec![
                StoreStockRecord::new("s1", 2),
                StoreStockRecord::new("s2", 5),
                StoreStockRecord::new("s1", 1),
            ],
        );
        assert_eq!(store_stock(&v, "s1"), 3);
        assert_eq!(store_stock(&v, "s2"), 5);
        assert_eq!(store_stock(&v, "missing"), 0);
    }

    #[test]
    fn test_reconcile() {
        let product = Product {
            id: "p1".to_string(),
            name: "Polera".to_string(),
            image: None,
            total_products: 2,
            variations: vec![
                variation(
                    "v1",
                    4,
                    vec![
                        StoreStockRecord::new("s1", 2),
                        StoreStockRecord::new("s2", 0),
                        StoreStockRecord::new("s3", 5),
                    ],
                ),
                variation("v2", 0, vec![]),
            ],
        };

        let rows = reconcile(&[product]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].store_stock, 7);
        assert_eq!(rows[0].combined_stock, 11);
        assert_eq!(rows[0].stores_holding, 2);
        assert!(!rows[0].is_depleted());
        assert!(rows[1].is_depleted());
    }

    proptest! {
        #[test]
        fn prop_aggregate_equals_sum(quantities in proptest::collection::vec(any::<u32>(), 0..64)) {
            let records: Vec<StoreStockRecord> = quantities
                .iter()
                .enumerate()
                .map(|(i, q)| StoreStockRecord::new(format!("s{}", i), *q))
                .collect();
            let expected: u64 = quantities.iter().map(|q| u64::from(*q)).sum();
            prop_assert_eq!(aggregate_store_stock(&records), expected);
        }
    }
}
