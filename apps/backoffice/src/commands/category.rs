//! # Category Commands
//!
//! Category tree access and free-text category resolution.
//!
//! Resolution order: exact parent, exact child, partial child, partial
//! parent. Matching ignores case and accents.

use mostrador_core::category::{resolve_match, subcategory_ids, MatchKind};
use mostrador_core::Category;
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::CatalogState;

/// Outcome of [`resolve_category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResolution {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub kind: MatchKind,
}

/// The category tree as last loaded.
pub fn list_categories(catalog: &CatalogState) -> Vec<Category> {
    debug!("list_categories command");
    catalog.with_snapshot(|s| s.categories.clone())
}

/// Resolves free text such as `"zapatillas"` to a category.
///
/// `None` means uncategorized; a blank query is always `None`.
pub fn resolve_category(catalog: &CatalogState, query: &str) -> Option<CategoryResolution> {
    debug!(query = %query, "resolve_category command");
    catalog.with_snapshot(|s| {
        resolve_match(&s.categories, query).map(|m| CategoryResolution {
            id: m.category.id.clone(),
            name: m.category.name.clone(),
            parent_id: m.category.parent_id.clone(),
            kind: m.kind,
        })
    })
}

/// Ids a product filter should accept for `category_id`.
///
/// A parent expands to itself plus its children.
///
/// ## Errors
/// `NOT_FOUND` when the id is not in the tree.
pub fn category_filter_ids(catalog: &CatalogState, category_id: &str) -> Result<Vec<String>, ApiError> {
    debug!(category_id = %category_id, "category_filter_ids command");
    let ids = catalog.with_snapshot(|s| subcategory_ids(&s.categories, category_id));
    if ids.is_empty() {
        return Err(ApiError::not_found("Category", category_id));
    }
    Ok(ids)
}
