//! # Catalog State
//!
//! Last catalog snapshot loaded from a [`CatalogSource`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Refresh                                      │
//! │                                                                         │
//! │  refresh() ──► source.products()   ┐                                    │
//! │            └─► source.categories() ┘ joined                             │
//! │                         │                                               │
//! │                 both ok?├── no ──► previous snapshot kept, Err          │
//! │                         │                                               │
//! │                         ▼ yes                                           │
//! │                 flatten(products)                                       │
//! │                         │                                               │
//! │                         ▼                                               │
//! │                 swap snapshot (write lock held only for the swap)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use chrono::{DateTime, Utc};
use mostrador_client::{CatalogSource, ClientResult};
use mostrador_core::catalog::flatten;
use mostrador_core::{Category, FlattenedProduct, Product};
use serde::Serialize;
use tracing::{info, warn};
use ts_rs::TS;

/// Everything the last successful refresh produced.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub flattened: Vec<FlattenedProduct>,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl CatalogSnapshot {
    /// Builds a snapshot, flattening `products` once.
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        let flattened = flatten(&products);
        CatalogSnapshot {
            products,
            categories,
            flattened,
            loaded_at: Some(Utc::now()),
        }
    }

    pub fn variation(&self, variation_id: &str) -> Option<&FlattenedProduct> {
        self.flattened.iter().find(|p| p.id == variation_id)
    }
}

/// Counts reported after a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    pub source: String,
    pub products: usize,
    pub variations: usize,
    pub categories: usize,
    #[ts(as = "String")]
    pub loaded_at: DateTime<Utc>,
}

/// Catalog state managed by the backoffice.
#[derive(Clone)]
pub struct CatalogState {
    source: Arc<dyn CatalogSource>,
    snapshot: Arc<RwLock<CatalogSnapshot>>,
}

impl std::fmt::Debug for CatalogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogState")
            .field("source", &self.source.describe())
            .finish_non_exhaustive()
    }
}

impl CatalogState {
    /// Creates an empty catalog reading from `source`.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        CatalogState {
            source,
            snapshot: Arc::new(RwLock::new(CatalogSnapshot::default())),
        }
    }

    /// Reloads products and categories.
    ///
    /// ## Errors
    /// The first failure of either request. The previous snapshot stays
    /// in place.
    pub async fn refresh(&self) -> ClientResult<RefreshSummary> {
        let started = Instant::now();
        let (products, categories) =
            tokio::join!(self.source.products(), self.source.categories());

        let (products, categories) = match (products, categories) {
            (Ok(p), Ok(c)) => (p, c),
            (Err(e), _) | (_, Err(e)) => {
                warn!(source = %self.source.describe(), error = %e, "Catalog refresh failed");
                return Err(e);
            }
        };

        let next = CatalogSnapshot::new(products, categories);
        let summary = RefreshSummary {
            source: self.source.describe(),
            products: next.products.len(),
            variations: next.flattened.len(),
            categories: next.categories.len(),
            loaded_at: next.loaded_at.unwrap_or_else(Utc::now),
        };

        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = next;

        info!(
            source = %summary.source,
            products = summary.products,
            variations = summary.variations,
            categories = summary.categories,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog refreshed"
        );
        Ok(summary)
    }

    /// Executes a function with read access to the snapshot.
    pub fn with_snapshot<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CatalogSnapshot) -> R,
    {
        let snapshot = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        f(&snapshot)
    }

    /// Whether a refresh has ever succeeded.
    pub fn is_loaded(&self) -> bool {
        self.with_snapshot(|s| s.loaded_at.is_some())
    }

    pub fn describe_source(&self) -> String {
        self.source.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mostrador_client::{ClientError, StaticCatalog};
    use mostrador_core::{Money, Variation};

    fn product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Polera".to_string(),
            image: None,
            total_products: 2,
            variations: vec![
                Variation {
                    id: "v1".to_string(),
                    product_id: "p1".to_string(),
                    size: "S".to_string(),
                    list_price: Money::from_minor(9_990),
                    cost_price: Money::from_minor(4_000),
                    sku: "POL-S".to_string(),
                    central_stock: 1,
                    stores: vec![],
                },
                Variation {
                    id: "v2".to_string(),
                    product_id: "p1".to_string(),
                    size: "M".to_string(),
                    list_price: Money::from_minor(9_990),
                    cost_price: Money::from_minor(4_000),
                    sku: "POL-M".to_string(),
                    central_stock: 0,
                    stores: vec![],
                },
            ],
        }
    }

    struct Failing;

    #[async_trait]
    impl CatalogSource for Failing {
        async fn products(&self) -> ClientResult<Vec<Product>> {
            Err(ClientError::Config("offline".to_string()))
        }

        async fn categories(&self) -> ClientResult<Vec<Category>> {
            Ok(vec![])
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    #[tokio::test]
    async fn test_refresh_flattens() {
        let state = CatalogState::new(Arc::new(StaticCatalog::new(
            vec![product()],
            vec![Category::new("1", "Ropa")],
        )));
        assert!(!state.is_loaded());

        let summary = state.refresh().await.unwrap();
        assert_eq!(summary.products, 1);
        assert_eq!(summary.variations, 2);
        assert_eq!(summary.categories, 1);
        assert!(state.is_loaded());
        assert_eq!(state.with_snapshot(|s| s.variation("v2").map(|v| v.sku.clone())), Some("POL-M".to_string()));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_snapshot() {
        let state = CatalogState::new(Arc::new(Failing));
        assert!(state.refresh().await.is_err());
        assert!(!state.is_loaded());
        assert!(state.with_snapshot(|s| s.products.is_empty()));
    }
}
