//! # Domain Types
//!
//! Core domain types used throughout Mostrador.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │   Variation     │   │  StoreStockRecord   │   │
//! │  │  ─────────────  │ 1 │  ─────────────  │ 1 │  ─────────────────  │   │
//! │  │  id             │──►│  id             │──►│  store_id           │   │
//! │  │  name, image    │ * │  size, sku      │ * │  quantity (>= 0)    │   │
//! │  │  total_products │   │  list/cost      │   └─────────────────────┘   │
//! │  └─────────────────┘   │  central_stock  │                             │
//! │                        └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Category     │   │ FlattenedProduct│  (derived, never stored)    │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  id, name       │   │  one per        │                             │
//! │  │  parent_id      │   │  Variation      │                             │
//! │  │  subcategories  │   │  total_stock    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every type here is already validated: prices are `Money`, stock is
//! unsigned. Raw backend payloads are parsed into these types by
//! `mostrador-client`, never inside the core.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1900 bps = 19% (Chilean IVA).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Value-added tax applied to third-party purchase prices.
    pub const VAT: TaxRate = TaxRate(1900);

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Quantity of one variation held by one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreStockRecord {
    pub store_id: String,
    pub quantity: u32,
}

impl StoreStockRecord {
    pub fn new(store_id: impl Into<String>, quantity: u32) -> Self {
        StoreStockRecord {
            store_id: store_id.into(),
            quantity,
        }
    }
}

// =============================================================================
// Product & Variation
// =============================================================================

/// A sellable size/SKU of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub id: String,

    /// Parent product.
    pub product_id: String,

    /// Size label ("42", "M", "Única").
    pub size: String,

    /// Price shown to customers.
    pub list_price: Money,

    /// Purchase cost.
    pub cost_price: Money,

    /// Stock Keeping Unit, unique across all variations.
    pub sku: String,

    /// Quantity held at the central warehouse.
    pub central_stock: u32,

    /// Per-store quantities.
    #[serde(default)]
    pub stores: Vec<StoreStockRecord>,
}

/// A product as returned by the backend, with its variations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,

    /// Image reference (CDN URL or key).
    pub image: Option<String>,

    /// Aggregate product count reported by the backend.
    pub total_products: u32,

    /// Variations in backend order.
    #[serde(default)]
    pub variations: Vec<Variation>,
}

// =============================================================================
// Flattened Product
// =============================================================================

/// One variation projected with its parent's display data.
///
/// Derived on demand by [`crate::catalog::flatten`]; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedProduct {
    /// Variation id.
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub sku: String,
    pub size: String,
    pub cost_price: Money,
    pub list_price: Money,
    pub central_stock: u32,

    /// Sum of every store's quantity.
    pub total_stock: u64,

    /// Inherited from the parent product.
    pub total_products: u32,
}

// =============================================================================
// Category
// =============================================================================

/// A product category with its direct subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    #[serde(default)]
    pub subcategories: Vec<Category>,
}

impl Category {
    /// Creates a top-level category with no children.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
            parent_id: None,
            subcategories: Vec::new(),
        }
    }

    /// Adds a child, setting its `parent_id` to this category.
    pub fn with_subcategory(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        let child = Category {
            id: id.into(),
            name: name.into(),
            parent_id: Some(self.id.clone()),
            subcategories: Vec::new(),
        };
        self.subcategories.push(child);
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vat_rate() {
        assert_eq!(TaxRate::VAT.bps(), 1900);
        assert_eq!(serde_json::to_string(&TaxRate::VAT).unwrap(), "1900");
    }

    #[test]
    fn test_category_builder_sets_parent() {
        let calzado = Category::new("10", "Calzado").with_subcategory("11", "Zapatillas Running");
        assert_eq!(calzado.subcategories.len(), 1);
        assert_eq!(calzado.subcategories[0].parent_id.as_deref(), Some("10"));
    }

    #[test]
    fn test_product_deserializes_camel_case() {
        let json = r#"{
            "id": "p1",
            "name": "Zapatilla Trail",
            "image": null,
            "totalProducts": 3,
            "variations": [{
                "id": "v1",
                "productId": "p1",
                "size": "42",
                "listPrice": 49990,
                "costPrice": 21000,
                "sku": "ZT-42",
                "centralStock": 4,
                "stores": [{ "storeId": "s1", "quantity": 2 }]
            }]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.variations[0].list_price, Money::from_minor(49_990));
        assert_eq!(product.variations[0].stores[0].quantity, 2);
    }
}
