//! Stock overview endpoint.

use retail_core::types::{Page, StockQuery, StockRow};
use tracing::{debug, error};

use crate::error::ClientResult;
use crate::http::ApiClient;

#[derive(Debug, Clone)]
pub struct StockService {
    client: ApiClient,
}

impl StockService {
    pub fn new(client: ApiClient) -> Self {
        StockService { client }
    }

    /// `GET /stock-management` with the filters as query parameters.
    pub async fn overview(&self, query: &StockQuery) -> ClientResult<Page<StockRow>> {
        let pairs = query.to_pairs();
        debug!(?pairs, "Fetching stock overview");
        self.client
            .get("/stock-management", &pairs)
            .await
            .inspect_err(|e| {
                error!(
                    error = %e,
                    status = ?e.status(),
                    "Failed to fetch stock overview"
                )
            })
    }
}
