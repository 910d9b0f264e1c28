//! Branch endpoints.

use retail_core::types::{Branch, MessageResponse};
use tracing::error;

use crate::error::ClientResult;
use crate::http::ApiClient;

#[derive(Debug, Clone)]
pub struct BranchService {
    client: ApiClient,
}

impl BranchService {
    pub fn new(client: ApiClient) -> Self {
        BranchService { client }
    }

    pub async fn get_all(&self) -> ClientResult<Vec<Branch>> {
        self.client
            .get("/branches", &[])
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch branches"))
    }

    pub async fn get_by_id(&self, id: i64) -> ClientResult<Branch> {
        self.client
            .get(&format!("/branches/{}", id), &[])
            .await
            .inspect_err(|e| error!(error = %e, branch_id = id, "Failed to fetch branch"))
    }

    pub async fn upsert(&self, branch: &Branch) -> ClientResult<MessageResponse<Branch>> {
        self.client
            .post("/branches/upsert", branch)
            .await
            .inspect_err(|e| error!(error = %e, branch_id = ?branch.id, "Failed to upsert branch"))
    }

    /// There is no dedicated toggle endpoint: the caller flips `isActive`
    /// and the whole branch goes back through upsert.
    pub async fn toggle_status(&self, branch: &Branch) -> ClientResult<MessageResponse<Branch>> {
        self.client
            .post("/branches/upsert", branch)
            .await
            .inspect_err(|e| error!(error = %e, branch_id = ?branch.id, "Failed to toggle branch status"))
    }
}
