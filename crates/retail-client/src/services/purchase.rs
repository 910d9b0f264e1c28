//! Purchase order endpoints.

use retail_core::types::{
    Page, PurchaseOrder, PurchaseOrderCreated, PurchaseOrderPrint, PurchaseOrderQuery,
    PurchaseOrderRequest,
};
use tracing::{debug, error, info};

use crate::error::ClientResult;
use crate::http::ApiClient;

#[derive(Debug, Clone)]
pub struct PurchaseService {
    client: ApiClient,
}

impl PurchaseService {
    pub fn new(client: ApiClient) -> Self {
        PurchaseService { client }
    }

    pub async fn list(&self, query: &PurchaseOrderQuery) -> ClientResult<Page<PurchaseOrder>> {
        let pairs = query.to_pairs();
        debug!(?pairs, "Fetching purchase orders");
        self.client
            .get("/purchase-orders", &pairs)
            .await
            .inspect_err(|e| error!(error = %e, status = ?e.status(), "Failed to fetch purchase orders"))
    }

    /// `POST /purchase-orders/process`: records the order and books the
    /// goods into stock as a new lot.
    pub async fn process(&self, request: &PurchaseOrderRequest) -> ClientResult<PurchaseOrderCreated> {
        let created: PurchaseOrderCreated = self
            .client
            .post("/purchase-orders/process", request)
            .await
            .inspect_err(|e| {
                error!(error = %e, supplier_id = request.supplier_id, "Failed to process purchase order")
            })?;
        info!(
            purchase_order_id = created.purchase_order_id,
            code = %created.purchase_order_code,
            lot = ?created.lot_code,
            "Purchase order processed"
        );
        Ok(created)
    }

    pub async fn print_data(&self, id: i64) -> ClientResult<PurchaseOrderPrint> {
        self.client
            .get(&format!("/purchase-orders/{}/print", id), &[])
            .await
            .inspect_err(|e| error!(error = %e, purchase_order_id = id, "Failed to fetch print data"))
    }
}
