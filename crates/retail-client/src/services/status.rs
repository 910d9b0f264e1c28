//! Status lookup endpoint, used to fill status selects.

use retail_core::types::StatusOption;
use tracing::error;

use crate::error::ClientResult;
use crate::http::{build_query, ApiClient};

#[derive(Debug, Clone)]
pub struct StatusService {
    client: ApiClient,
}

impl StatusService {
    pub fn new(client: ApiClient) -> Self {
        StatusService { client }
    }

    pub async fn get_all(&self) -> ClientResult<Vec<StatusOption>> {
        self.client
            .get("/status", &[])
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch statuses"))
    }

    /// `GET /status?entityType=`, e.g. `PRODUCT`.
    pub async fn by_entity_type(&self, entity_type: &str) -> ClientResult<Vec<StatusOption>> {
        let query = build_query([("entityType", Some(entity_type.to_string()))]);
        self.client
            .get("/status", &query)
            .await
            .inspect_err(|e| error!(error = %e, entity_type, "Failed to fetch statuses by entity type"))
    }
}
