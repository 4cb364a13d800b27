//! # Validation Module
//!
//! Checks applied to catalog data before it reaches the pure components.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Backend JSON                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mostrador-client: serde schema (types, numbers, non-negative stock)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  THIS MODULE: catalog rules (names, SKUs, uniqueness, ownership)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stock / catalog / markup / cart: assume valid input                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mostrador_core::validation::{validate_sku, validate_store_id};
//!
//! validate_sku("ZT-42").unwrap();
//! assert!(validate_store_id("").is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted SKU.
pub const MAX_SKU_LEN: usize = 64;

/// Longest accepted product name.
pub const MAX_NAME_LEN: usize = 200;

/// Longest accepted search query.
pub const MAX_QUERY_LEN: usize = 100;

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - No whitespace
///
/// ## Example
/// ```rust
/// use mostrador_core::validation::validate_sku;
///
/// assert!(validate_sku("POL-BAS-M").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("POL M").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    if sku.trim().is_empty() {
        return Err(required("sku"));
    }

    if sku.chars().count() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    if sku.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name: not blank, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(required("name"));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Returns
/// The trimmed query. Empty is allowed and means "everything".
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// A store id must be present to scope stock and sales.
pub fn validate_store_id(store_id: &str) -> ValidationResult<()> {
    if store_id.trim().is_empty() {
        return Err(required("store id"));
    }
    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a whole product list.
///
/// ## Rules
/// - Every product has a valid name
/// - Every variation has a valid SKU and belongs to its product
/// - SKUs are unique across the catalog
/// - Variation ids are unique across the catalog
pub fn validate_catalog(products: &[Product]) -> ValidationResult<()> {
    let mut skus = HashSet::new();
    let mut ids = HashSet::new();

    for product in products {
        validate_product_name(&product.name)?;

        for variation in &product.variations {
            validate_sku(&variation.sku)?;

            if variation.product_id != product.id {
                return Err(ValidationError::InvalidFormat {
                    field: "variation".to_string(),
                    reason: format!(
                        "{} belongs to {}, found under {}",
                        variation.id, variation.product_id, product.id
                    ),
                });
            }

            if !skus.insert(variation.sku.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "sku".to_string(),
                    value: variation.sku.clone(),
                });
            }

            if !ids.insert(variation.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "variation id".to_string(),
                    value: variation.id.clone(),
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Variation;

    fn variation(product_id: &str, id: &str, sku: &str) -> Variation {
        Variation {
            id: id.to_string(),
            product_id: product_id.to_string(),
            size: "M".to_string(),
            list_price: Money::from_minor(10_000),
            cost_price: Money::from_minor(4_000),
            sku: sku.to_string(),
            central_stock: 0,
            stores: vec![],
        }
    }

    fn product(id: &str, variations: Vec<Variation>) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Producto {}", id),
            image: None,
            total_products: 1,
            variations,
        }
    }

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("ZT-42").is_ok());
        assert!(validate_sku("POL/BAS.M").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Polera Básica").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  gorro ").unwrap(), "gorro");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_catalog() {
        let ok = vec![
            product("p1", vec![variation("p1", "v1", "A-1"), variation("p1", "v2", "A-2")]),
            product("p2", vec![]),
        ];
        assert!(validate_catalog(&ok).is_ok());

        let dup_sku = vec![
            product("p1", vec![variation("p1", "v1", "A-1")]),
            product("p2", vec![variation("p2", "v2", "A-1")]),
        ];
        assert_eq!(
            validate_catalog(&dup_sku),
            Err(ValidationError::Duplicate {
                field: "sku".to_string(),
                value: "A-1".to_string()
            })
        );

        let wrong_owner = vec![product("p1", vec![variation("p9", "v1", "A-1")])];
        assert!(validate_catalog(&wrong_owner).is_err());
    }
}
