//! # Product Flattener
//!
//! Projects the nested Product → Variation → Store tree into flat records
//! for display, search and the sale cart.
//!
//! ## Flattening
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [Product "Polera" (v1: M, v2: L), Product "Gorro" (), Product "Jeans"  │
//! │   (v3: 40)]                                                             │
//! │        │                                                                │
//! │        ▼  flatten()                                                     │
//! │  [Polera/M, Polera/L, Jeans/40]                                        │
//! │                                                                         │
//! │  • product-major, variation-minor order                                │
//! │  • "Gorro" has no variations and contributes nothing                   │
//! │  • total_stock = aggregate_store_stock(variation.stores)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::category::normalize;
use crate::money::Money;
use crate::stock::{aggregate_store_stock, store_stock};
use crate::types::{FlattenedProduct, Product, Variation};

/// Flattens products into one record per variation, preserving order.
pub fn flatten(products: &[Product]) -> Vec<FlattenedProduct> {
    products
        .iter()
        .flat_map(|product| {
            product
                .variations
                .iter()
                .map(move |variation| flatten_one(product, variation))
        })
        .collect()
}

fn flatten_one(product: &Product, variation: &Variation) -> FlattenedProduct {
    FlattenedProduct {
        id: variation.id.clone(),
        name: product.name.clone(),
        image: product.image.clone(),
        sku: variation.sku.clone(),
        size: variation.size.clone(),
        cost_price: variation.cost_price,
        list_price: variation.list_price,
        central_stock: variation.central_stock,
        total_stock: aggregate_store_stock(&variation.stores),
        total_products: product.total_products,
    }
}

// =============================================================================
// Sellable Units
// =============================================================================

/// A variation as seen from one store's counter.
///
/// This is what the cashier clicks; it becomes a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SellableUnit {
    /// Store-product identifier (variation id), keys the cart line.
    pub store_product_id: String,
    pub store_id: String,

    /// "Polera Básica (M)"
    pub display_name: String,
    pub sku: String,
    pub unit_price: Money,
    pub image: Option<String>,

    /// Quantity held by this store.
    pub available_stock: u64,
}

impl SellableUnit {
    pub fn in_stock(&self) -> bool {
        self.available_stock > 0
    }
}

/// Every variation with the given store's stock as its ceiling.
///
/// Out-of-stock units are kept so the UI can show them disabled.
pub fn sellable_units(products: &[Product], store_id: &str) -> Vec<SellableUnit> {
    products
        .iter()
        .flat_map(|product| {
            product.variations.iter().map(move |variation| SellableUnit {
                store_product_id: variation.id.clone(),
                store_id: store_id.to_string(),
                display_name: display_name(&product.name, &variation.size),
                sku: variation.sku.clone(),
                unit_price: variation.list_price,
                image: product.image.clone(),
                available_stock: store_stock(variation, store_id),
            })
        })
        .collect()
}

fn display_name(name: &str, size: &str) -> String {
    let size = size.trim();
    if size.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, size)
    }
}

// =============================================================================
// Search
// =============================================================================

/// Accent- and case-insensitive substring search over name and SKU.
///
/// An empty query returns every record. Order is preserved.
///
/// ## Example
/// ```rust
/// use mostrador_core::catalog::search;
/// use mostrador_core::money::Money;
/// use mostrador_core::types::FlattenedProduct;
///
/// let rows = vec![FlattenedProduct {
///     id: "v1".into(),
///     name: "Camión de juguete".into(),
///     image: None,
///     sku: "JUG-01".into(),
///     size: "Única".into(),
///     cost_price: Money::from_minor(3_000),
///     list_price: Money::from_minor(7_990),
///     central_stock: 1,
///     total_stock: 0,
///     total_products: 1,
/// }];
/// assert_eq!(search(&rows, "CAMION").len(), 1);
/// assert_eq!(search(&rows, "jug-01").len(), 1);
/// ```
pub fn search<'a>(products: &'a [FlattenedProduct], query: &str) -> Vec<&'a FlattenedProduct> {
    let needle = normalize(query);
    if needle.is_empty() {
        return products.iter().collect();
    }

    products
        .iter()
        .filter(|p| normalize(&p.name).contains(&needle) || normalize(&p.sku).contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StoreStockRecord;
    use proptest::prelude::*;

    fn variation(product_id: &str, id: &str, size: &str, stores: Vec<StoreStockRecord>) -> Variation {
        Variation {
            id: id.to_string(),
            product_id: product_id.to_string(),
            size: size.to_string(),
            list_price: Money::from_minor(19_990),
            cost_price: Money::from_minor(8_000),
            sku: format!("{}-{}", product_id, size),
            central_stock: 3,
            stores,
        }
    }

    fn product(id: &str, name: &str, variations: Vec<Variation>) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            image: Some(format!("https://cdn.example.cl/{}.jpg", id)),
            total_products: 12,
            variations,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(
                "p1",
                "Polera Básica",
                vec![
                    variation("p1", "v1", "M", vec![StoreStockRecord::new("s1", 2)]),
                    variation(
                        "p1",
                        "v2",
                        "L",
                        vec![StoreStockRecord::new("s1", 1), StoreStockRecord::new("s2", 4)],
                    ),
                ],
            ),
            product("p2", "Gorro", vec![]),
            product("p3", "Jeans", vec![variation("p3", "v3", "40", vec![])]),
        ]
    }

    #[test]
    fn test_flatten_order_and_totals() {
        let flat = flatten(&catalog());
        let ids: Vec<&str> = flat.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v2", "v3"]);

        assert_eq!(flat[1].name, "Polera Básica");
        assert_eq!(flat[1].size, "L");
        assert_eq!(flat[1].total_stock, 5);
        assert_eq!(flat[1].central_stock, 3);
        assert_eq!(flat[1].total_products, 12);
        assert_eq!(flat[2].total_stock, 0);
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let products = catalog();
        assert_eq!(flatten(&products), flatten(&products));
        assert!(flatten(&[]).is_empty());
    }

    #[test]
    fn test_sellable_units_use_store_stock() {
        let units = sellable_units(&catalog(), "s2");
        assert_eq!(units.len(), 3);
        assert_eq!(units[0].available_stock, 0);
        assert!(!units[0].in_stock());
        assert_eq!(units[1].available_stock, 4);
        assert_eq!(units[1].display_name, "Polera Básica (L)");
        assert_eq!(units[1].store_id, "s2");
    }

    #[test]
    fn test_search_ignores_accents_and_case() {
        let flat = flatten(&catalog());
        assert_eq!(search(&flat, "basica").len(), 2);
        assert_eq!(search(&flat, "JEANS").len(), 1);
        assert_eq!(search(&flat, "p3-40").len(), 1);
        assert_eq!(search(&flat, "  ").len(), 3);
        assert!(search(&flat, "zapato").is_empty());
    }

    fn arb_products() -> impl Strategy<Value = Vec<Product>> {
        proptest::collection::vec(0usize..5, 0..8).prop_map(|counts| {
            counts
                .iter()
                .enumerate()
                .map(|(p, n)| {
                    let pid = format!("p{}", p);
                    let variations = (0..*n)
                        .map(|v| variation(&pid, &format!("{}v{}", pid, v), "M", vec![]))
                        .collect();
                    product(&pid, "Producto", variations)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_flatten_length_and_order(products in arb_products()) {
            let flat = flatten(&products);
            let expected: Vec<String> = products
                .iter()
                .flat_map(|p| p.variations.iter().map(|v| v.id.clone()))
                .collect();
            prop_assert_eq!(flat.len(), expected.len());
            let got: Vec<String> = flat.into_iter().map(|f| f.id).collect();
            prop_assert_eq!(got, expected);
        }
    }
}
