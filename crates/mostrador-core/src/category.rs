//! # Category Resolver
//!
//! Maps free-text category names (typed by an operator, possibly with
//! different accents or casing) to canonical category identifiers.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  query: "zapatillas"  ──► normalize ──► "zapatillas"                    │
//! │                                                                         │
//! │  1. parent name == query           Calzado               ✗             │
//! │  2. child name  == query           Zapatillas Running    ✗             │
//! │  3. child name  contains query     Zapatillas Running    ✓ ◄── wins    │
//! │  4. parent name contains query     (not reached)                        │
//! │  5. nothing matched                → None ("uncategorized")            │
//! │                                                                         │
//! │  Exact beats partial at any level. Partial children beat partial       │
//! │  parents because children are more specific.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::ValidationError;
use crate::types::Category;

/// Lowercase, NFD-decompose, drop combining marks, trim.
///
/// ## Example
/// ```rust
/// use mostrador_core::category::normalize;
///
/// assert_eq!(normalize("  Electrónica "), "electronica");
/// assert_eq!(normalize("PEÑA"), "pena");
/// ```
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Which rule resolved the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    ExactParent,
    ExactChild,
    PartialChild,
    PartialParent,
}

/// A resolved category and how it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMatch<'a> {
    pub category: &'a Category,
    pub kind: MatchKind,
}

/// Resolves `query` against the tree, reporting the rule that matched.
pub fn resolve_match<'a>(categories: &'a [Category], query: &str) -> Option<CategoryMatch<'a>> {
    let needle = normalize(query);
    if needle.is_empty() {
        return None;
    }

    let children = || categories.iter().flat_map(|c| c.subcategories.iter());
    let found = |category: &'a Category, kind| CategoryMatch { category, kind };

    if let Some(c) = categories.iter().find(|c| normalize(&c.name) == needle) {
        return Some(found(c, MatchKind::ExactParent));
    }
    if let Some(c) = children().find(|c| normalize(&c.name) == needle) {
        return Some(found(c, MatchKind::ExactChild));
    }
    if let Some(c) = children().find(|c| normalize(&c.name).contains(&needle)) {
        return Some(found(c, MatchKind::PartialChild));
    }
    categories
        .iter()
        .find(|c| normalize(&c.name).contains(&needle))
        .map(|c| found(c, MatchKind::PartialParent))
}

/// Resolves `query` to a category id; `None` means uncategorized.
///
/// ## Example
/// ```rust
/// use mostrador_core::category::resolve;
/// use mostrador_core::types::Category;
///
/// let tree = vec![Category::new("10", "Calzado").with_subcategory("11", "Zapatillas Running")];
/// assert_eq!(resolve(&tree, "zapatillas").as_deref(), Some("11"));
/// assert_eq!(resolve(&tree, "Calzado").as_deref(), Some("10"));
/// assert_eq!(resolve(&tree, "juguetes"), None);
/// ```
pub fn resolve(categories: &[Category], query: &str) -> Option<String> {
    resolve_match(categories, query).map(|m| m.category.id.clone())
}

/// Ids to filter by when the operator picks `category_id`.
///
/// A parent expands to itself plus its children; a child is just itself.
/// Unknown ids yield an empty list.
pub fn subcategory_ids(categories: &[Category], category_id: &str) -> Vec<String> {
    if let Some(parent) = categories.iter().find(|c| c.id == category_id) {
        return std::iter::once(parent.id.clone())
            .chain(parent.subcategories.iter().map(|c| c.id.clone()))
            .collect();
    }

    categories
        .iter()
        .flat_map(|c| c.subcategories.iter())
        .find(|c| c.id == category_id)
        .map(|c| vec![c.id.clone()])
        .unwrap_or_default()
}

/// Checks the tree shape the resolver relies on.
///
/// ## Rules
/// - Top-level categories have no `parent_id`
/// - Children either omit `parent_id` or point back at their parent, and
///   have no children of their own
/// - Ids are unique across the whole tree (no cycles can be expressed)
pub fn validate_tree(categories: &[Category]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();

    for parent in categories {
        if !seen.insert(parent.id.as_str()) {
            return Err(tree_error(&parent.id, "duplicate id"));
        }
        if parent.parent_id.is_some() {
            return Err(tree_error(&parent.id, "top-level category has a parent"));
        }

        for child in &parent.subcategories {
            if !seen.insert(child.id.as_str()) {
                return Err(tree_error(&child.id, "duplicate id"));
            }
            if child.parent_id.as_deref().is_some_and(|id| id != parent.id) {
                return Err(tree_error(
                    &child.id,
                    &format!("parent_id does not point at {}", parent.id),
                ));
            }
            if !child.subcategories.is_empty() {
                return Err(tree_error(&child.id, "nesting deeper than one level"));
            }
        }
    }

    Ok(())
}

fn tree_error(id: &str, reason: &str) -> ValidationError {
    ValidationError::CategoryTree {
        id: id.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<Category> {
        vec![
            Category::new("10", "Calzado")
                .with_subcategory("11", "Zapatillas Running")
                .with_subcategory("12", "Sandalias"),
            Category::new("20", "Electrónica")
                .with_subcategory("21", "Audífonos")
                .with_subcategory("22", "Cables"),
            Category::new("30", "Ropa de Niños").with_subcategory("31", "Poleras"),
        ]
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Audífonos"), "audifonos");
        assert_eq!(normalize("  ROPA de NIÑOS\t"), "ropa de ninos");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_exact_parent() {
        let tree = tree();
        let m = resolve_match(&tree, "calzado").unwrap();
        assert_eq!(m.category.id, "10");
        assert_eq!(m.kind, MatchKind::ExactParent);
        assert_eq!(resolve(&tree, "ELECTRONICA").as_deref(), Some("20"));
    }

    #[test]
    fn test_exact_child_ignores_accents() {
        let tree = tree();
        let m = resolve_match(&tree, "audifonos").unwrap();
        assert_eq!(m.category.id, "21");
        assert_eq!(m.kind, MatchKind::ExactChild);
    }

    #[test]
    fn test_partial_child() {
        let tree = tree();
        let m = resolve_match(&tree, "zapatillas").unwrap();
        assert_eq!(m.category.id, "11");
        assert_eq!(m.kind, MatchKind::PartialChild);
    }

    #[test]
    fn test_partial_child_beats_partial_parent() {
        // "ni" is inside "Ropa de Niños" (parent) and "Zapatillas Running" (child)
        let tree = tree();
        let m = resolve_match(&tree, "ni").unwrap();
        assert_eq!(m.kind, MatchKind::PartialChild);
        assert_eq!(m.category.id, "11");
    }

    #[test]
    fn test_partial_parent() {
        let tree = tree();
        let m = resolve_match(&tree, "ninos").unwrap();
        assert_eq!(m.category.id, "30");
        assert_eq!(m.kind, MatchKind::PartialParent);
    }

    #[test]
    fn test_exact_beats_partial() {
        // The first parent contains "cables", but the exact child wins
        let tree = vec![
            Category::new("1", "Cables y Adaptadores").with_subcategory("2", "Otros"),
            Category::new("3", "Accesorios").with_subcategory("4", "Cables"),
        ];
        assert_eq!(resolve(&tree, "cables").as_deref(), Some("4"));
    }

    #[test]
    fn test_no_match_and_empty_query() {
        let tree = tree();
        assert_eq!(resolve(&tree, "juguetes"), None);
        assert_eq!(resolve(&tree, "   "), None);
        assert_eq!(resolve(&[], "calzado"), None);
    }

    #[test]
    fn test_subcategory_ids() {
        let tree = tree();
        assert_eq!(subcategory_ids(&tree, "10"), vec!["10", "11", "12"]);
        assert_eq!(subcategory_ids(&tree, "21"), vec!["21"]);
        assert!(subcategory_ids(&tree, "99").is_empty());
    }

    #[test]
    fn test_validate_tree() {
        assert!(validate_tree(&tree()).is_ok());

        let mut deep = tree();
        deep[0].subcategories[0] = deep[0].subcategories[0]
            .clone()
            .with_subcategory("111", "Trail");
        assert!(validate_tree(&deep).is_err());

        let mut orphan = tree();
        orphan[1].subcategories[0].parent_id = Some("10".to_string());
        assert!(validate_tree(&orphan).is_err());

        let duplicate = vec![Category::new("1", "A"), Category::new("1", "B")];
        assert!(validate_tree(&duplicate).is_err());
    }

    #[test]
    fn test_child_without_parent_id_is_accepted() {
        let mut tree = tree();
        tree[0].subcategories[0].parent_id = None;
        assert!(validate_tree(&tree).is_ok());
        assert_eq!(resolve(&tree, "zapatillas running").as_deref(), Some("11"));

        tree[0].subcategories[1].parent_id = Some("20".to_string());
        let err = validate_tree(&tree).unwrap_err();
        assert!(matches!(err, ValidationError::CategoryTree { ref id, .. } if id == "12"));
    }
}
