//! Stock transfer endpoints: warehouse-to-branch exports.

use retail_core::types::{
    Page, StockTransfer, StockTransferCreated, StockTransferDetail, StockTransferQuery,
    StockTransferRequest,
};
use tracing::{debug, error, info};

use crate::error::ClientResult;
use crate::http::ApiClient;

#[derive(Debug, Clone)]
pub struct StockTransferService {
    client: ApiClient,
}

impl StockTransferService {
    pub fn new(client: ApiClient) -> Self {
        StockTransferService { client }
    }

    pub async fn list(&self, query: &StockTransferQuery) -> ClientResult<Page<StockTransfer>> {
        let pairs = query.to_pairs();
        debug!(?pairs, "Fetching stock transfers");
        self.client
            .get("/stock-transfers", &pairs)
            .await
            .inspect_err(|e| error!(error = %e, status = ?e.status(), "Failed to fetch stock transfers"))
    }

    pub async fn get_detail(&self, id: i64) -> ClientResult<StockTransferDetail> {
        self.client
            .get(&format!("/stock-transfers/{}", id), &[])
            .await
            .inspect_err(|e| error!(error = %e, transfer_id = id, "Failed to fetch transfer detail"))
    }

    pub async fn create(&self, request: &StockTransferRequest) -> ClientResult<StockTransferCreated> {
        let created: StockTransferCreated = self
            .client
            .post("/stock-transfers", request)
            .await
            .inspect_err(|e| {
                error!(error = %e, to_branch_id = request.to_branch_id, "Failed to create stock transfer")
            })?;
        info!(
            transfer_id = created.transfer_id,
            code = %created.transfer_code,
            items = request.items.len(),
            "Stock transfer created"
        );
        Ok(created)
    }

    /// `DELETE /stock-transfers/{id}`. The server answers with an empty body.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.client
            .delete(&format!("/stock-transfers/{}", id))
            .await
            .inspect_err(|e| error!(error = %e, transfer_id = id, "Failed to delete stock transfer"))
    }
}
