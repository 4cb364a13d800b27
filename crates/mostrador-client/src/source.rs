//! # Catalog Sources
//!
//! Anything that can yield the product list and category tree.
//!
//! ```text
//! ┌──────────────────────┐
//! │  dyn CatalogSource   │◄──── backoffice loads through this
//! └──────────┬───────────┘
//!            │
//!     ┌──────┴────────┐
//!     ▼               ▼
//!  Backend        StaticCatalog
//!  (HTTP)         (JSON text, fixtures, offline demo)
//! ```

use async_trait::async_trait;
use mostrador_core::{Category, Product};

use crate::backend::Backend;
use crate::error::ClientResult;
use crate::payload::{parse_categories, parse_products};

/// Yields validated catalog data.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Full product list, backend order.
    async fn products(&self) -> ClientResult<Vec<Product>>;

    /// Full category tree.
    async fn categories(&self) -> ClientResult<Vec<Category>>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

#[async_trait]
impl CatalogSource for Backend {
    async fn products(&self) -> ClientResult<Vec<Product>> {
        Backend::products(self).list().await
    }

    async fn categories(&self) -> ClientResult<Vec<Category>> {
        Backend::categories(self).list().await
    }

    fn describe(&self) -> String {
        format!("backend {}", self.base_url())
    }
}

/// An in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl StaticCatalog {
    /// Wraps already-validated data.
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        StaticCatalog {
            products,
            categories,
        }
    }

    /// Parses backend-shaped JSON, applying the same validation as [`Backend`].
    pub fn from_json(products_json: &str, categories_json: &str) -> ClientResult<Self> {
        Ok(StaticCatalog {
            products: parse_products(products_json)?,
            categories: parse_categories(categories_json)?,
        })
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn products(&self) -> ClientResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn categories(&self) -> ClientResult<Vec<Category>> {
        Ok(self.categories.clone())
    }

    fn describe(&self) -> String {
        format!("static catalog ({} products)", self.products.len())
    }
}
