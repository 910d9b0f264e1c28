//! Category endpoints.

use retail_core::types::{Category, CategoryTreeNode, MessageResponse};
use serde_json::Value;
use tracing::error;

use crate::error::ClientResult;
use crate::http::{build_query, ApiClient};

#[derive(Debug, Clone)]
pub struct CategoryService {
    client: ApiClient,
}

impl CategoryService {
    pub fn new(client: ApiClient) -> Self {
        CategoryService { client }
    }

    pub async fn get_all(&self) -> ClientResult<Vec<Category>> {
        self.client
            .get("/categories", &[])
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch categories"))
    }

    pub async fn get_tree(&self) -> ClientResult<Vec<CategoryTreeNode>> {
        self.client
            .get("/categories/tree", &[])
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch category tree"))
    }

    pub async fn upsert(&self, category: &Category) -> ClientResult<MessageResponse<Category>> {
        self.client
            .post("/categories/upsert", category)
            .await
            .inspect_err(|e| error!(error = %e, category_id = ?category.id, "Failed to upsert category"))
    }

    /// `POST /categories/toggle-status/{id}?isDeleted=`.
    pub async fn toggle_status(
        &self,
        id: i64,
        is_deleted: bool,
    ) -> ClientResult<MessageResponse<Value>> {
        let query = build_query([("isDeleted", Some(is_deleted.to_string()))]);
        self.client
            .post_query(&format!("/categories/toggle-status/{}", id), &query)
            .await
            .inspect_err(|e| error!(error = %e, category_id = id, is_deleted, "Failed to toggle category status"))
    }

    pub async fn delete(&self, id: i64) -> ClientResult<MessageResponse<Value>> {
        self.client
            .post_query(&format!("/categories/delete/{}", id), &[])
            .await
            .inspect_err(|e| error!(error = %e, category_id = id, "Failed to delete category"))
    }
}
