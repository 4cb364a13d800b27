//! # Product Repository
//!
//! Reads the full product list, with nested variations and per-store
//! stock, from `GET {base}/products`.

use std::time::Instant;

use mostrador_core::Product;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::error::ClientResult;
use crate::payload::{into_products, RawProduct};

/// Path of the product list endpoint.
pub const PRODUCTS_PATH: &str = "products";

/// Repository for product reads.
///
/// ## Usage
/// ```rust,ignore
/// let products = backend.products().list().await?;
/// let flat = mostrador_core::catalog::flatten(&products);
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    backend: Backend,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(backend: Backend) -> Self {
        ProductRepository { backend }
    }

    /// Fetches every product in backend order.
    ///
    /// ## Errors
    /// Transport and status failures, undecodable JSON, and any record
    /// rejected by payload validation (negative stock, duplicate SKU, ...).
    pub async fn list(&self) -> ClientResult<Vec<Product>> {
        let started = Instant::now();
        debug!("Fetching products");

        let raw: Vec<RawProduct> = self.backend.get_json(PRODUCTS_PATH, "product list").await?;
        let products = into_products(raw)?;

        info!(
            products = products.len(),
            variations = products.iter().map(|p| p.variations.len()).sum::<usize>(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Products loaded"
        );
        Ok(products)
    }
}
