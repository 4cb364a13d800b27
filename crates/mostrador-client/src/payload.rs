//! # Raw Payload Schemas
//!
//! The backend's JSON exactly as it arrives, and the one place it is
//! turned into validated `mostrador_core` types.
//!
//! ## Number Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  listPrice: 19990       ──┐                                             │
//! │  listPrice: 19990.0     ──┼──► RawNumber ──► Decimal ──► Money(19990)   │
//! │  listPrice: "19990"     ──┘                                             │
//! │                                                                         │
//! │  quantity:  3 / "3"     ──► u32                                         │
//! │  quantity:  -1 / "2.5"  ──► ClientError::InvalidPayload                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use mostrador_core::category::validate_tree;
use mostrador_core::validation::validate_catalog;
use mostrador_core::{Category, Money, Product, StoreStockRecord, Variation};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Numbers
// =============================================================================

/// A JSON value that should be numeric but may be a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    /// Exact decimal value.
    pub fn to_decimal(&self) -> Result<Decimal, String> {
        match self {
            RawNumber::Int(value) => Ok(Decimal::from(*value)),
            RawNumber::Float(value) => {
                Decimal::try_from(*value).map_err(|_| format!("{} is not a usable number", value))
            }
            RawNumber::Text(text) => Decimal::from_str(text.trim())
                .map_err(|_| format!("{:?} is not a number", text)),
        }
    }

    /// Non-negative price in whole currency units.
    pub fn to_money(&self) -> Result<Money, String> {
        let value = self.to_decimal()?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(format!("price {} is negative", value));
        }
        Money::from_decimal_truncated(value).map_err(|e| e.to_string())
    }

    /// Non-negative whole quantity.
    pub fn to_quantity(&self) -> Result<u32, String> {
        let value = self.to_decimal()?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(format!("stock {} is negative", value));
        }
        if !value.fract().is_zero() {
            return Err(format!("stock {} is not a whole number", value));
        }
        value
            .to_u32()
            .ok_or_else(|| format!("stock {} is out of range", value))
    }
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStoreStock {
    pub store_id: String,
    pub quantity: RawNumber,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariation {
    pub id: String,
    pub product_id: String,
    #[serde(default)]
    pub size: String,
    pub list_price: RawNumber,
    pub cost_price: RawNumber,
    pub sku: String,
    pub central_stock: RawNumber,
    #[serde(default)]
    pub stores: Vec<RawStoreStock>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub total_products: RawNumber,
    #[serde(default)]
    pub variations: Vec<RawVariation>,
}

impl RawVariation {
    fn into_variation(self) -> ClientResult<Variation> {
        let record = format!("variation {}", self.id);
        let bad = |reason: String| ClientError::invalid(record.clone(), reason);

        let stores = self
            .stores
            .into_iter()
            .map(|s| -> ClientResult<StoreStockRecord> {
                let quantity = s
                    .quantity
                    .to_quantity()
                    .map_err(|e| bad(format!("store {}: {}", s.store_id, e)))?;
                Ok(StoreStockRecord::new(s.store_id, quantity))
            })
            .collect::<ClientResult<Vec<_>>>()?;

        Ok(Variation {
            list_price: self.list_price.to_money().map_err(&bad)?,
            cost_price: self.cost_price.to_money().map_err(&bad)?,
            central_stock: self.central_stock.to_quantity().map_err(&bad)?,
            id: self.id,
            product_id: self.product_id,
            size: self.size,
            sku: self.sku,
            stores,
        })
    }
}

impl RawProduct {
    fn into_product(self) -> ClientResult<Product> {
        let total_products = self
            .total_products
            .to_quantity()
            .map_err(|e| ClientError::invalid(format!("product {}", self.id), e))?;

        let variations = self
            .variations
            .into_iter()
            .map(RawVariation::into_variation)
            .collect::<ClientResult<Vec<_>>>()?;

        Ok(Product {
            id: self.id,
            name: self.name,
            image: self.image.filter(|i| !i.trim().is_empty()),
            total_products,
            variations,
        })
    }
}

/// Converts and validates a raw product list, keeping backend order.
pub fn into_products(raw: Vec<RawProduct>) -> ClientResult<Vec<Product>> {
    let products = raw
        .into_iter()
        .map(RawProduct::into_product)
        .collect::<ClientResult<Vec<_>>>()?;
    validate_catalog(&products)?;
    Ok(products)
}

/// Parses and validates a product list from JSON text.
pub fn parse_products(json: &str) -> ClientResult<Vec<Product>> {
    let raw: Vec<RawProduct> =
        serde_json::from_str(json).map_err(|e| ClientError::decode("product list", e))?;
    into_products(raw)
}

// =============================================================================
// Categories
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub subcategories: Vec<RawCategory>,
}

impl RawCategory {
    /// Subcategories sent without a `parentId` inherit the enclosing id.
    fn into_category(self, parent: Option<&str>) -> Category {
        let parent_id = self.parent_id.or_else(|| parent.map(str::to_string));
        let subcategories = self
            .subcategories
            .into_iter()
            .map(|child| child.into_category(Some(&self.id)))
            .collect();

        Category {
            id: self.id,
            name: self.name,
            parent_id,
            subcategories,
        }
    }
}

/// Converts a raw category tree and checks its shape.
pub fn into_categories(raw: Vec<RawCategory>) -> ClientResult<Vec<Category>> {
    let categories: Vec<Category> = raw.into_iter().map(|c| c.into_category(None)).collect();
    validate_tree(&categories)?;
    Ok(categories)
}

/// Parses and validates a category tree from JSON text.
pub fn parse_categories(json: &str) -> ClientResult<Vec<Category>> {
    let raw: Vec<RawCategory> =
        serde_json::from_str(json).map_err(|e| ClientError::decode("category tree", e))?;
    into_categories(raw)
}
