//! # Category Repository
//!
//! Reads the category tree from `GET {base}/categories`.

use mostrador_core::Category;
use tracing::info;

use crate::backend::Backend;
use crate::error::ClientResult;
use crate::payload::{into_categories, RawCategory};

/// Path of the category tree endpoint.
pub const CATEGORIES_PATH: &str = "categories";

/// Repository for category reads.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    backend: Backend,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(backend: Backend) -> Self {
        CategoryRepository { backend }
    }

    /// Fetches the top-level categories with their subcategories.
    ///
    /// The tree is rejected when it nests deeper than one level, repeats an
    /// id, or has a child pointing at the wrong parent.
    pub async fn list(&self) -> ClientResult<Vec<Category>> {
        let raw: Vec<RawCategory> = self
            .backend
            .get_json(CATEGORIES_PATH, "category tree")
            .await?;
        let categories = into_categories(raw)?;

        info!(
            categories = categories.len(),
            subcategories = categories.iter().map(|c| c.subcategories.len()).sum::<usize>(),
            "Categories loaded"
        );
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::{Backend, BackendConfig};
    use crate::error::ClientError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_categories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "10",
                    "name": "Calzado",
                    "parentId": null,
                    "subcategories": [
                        { "id": "11", "name": "Zapatillas Running", "parentId": "10" }
                    ]
                }
            ])))
            .mount(&server)
            .await;

        let backend = Backend::new(BackendConfig::new(server.uri())).unwrap();
        let tree = backend.categories().list().await.unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].subcategories[0].name, "Zapatillas Running");
    }

    #[tokio::test]
    async fn test_nested_tree_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "10",
                    "name": "Calzado",
                    "subcategories": [
                        {
                            "id": "11",
                            "name": "Zapatillas",
                            "parentId": "10",
                            "subcategories": [{ "id": "12", "name": "Trail", "parentId": "11" }]
                        }
                    ]
                }
            ])))
            .mount(&server)
            .await;

        let backend = Backend::new(BackendConfig::new(server.uri())).unwrap();
        assert!(matches!(
            backend.categories().list().await,
            Err(ClientError::Validation(_))
        ));
    }
}
