//! Supplier endpoints.

use retail_core::types::{MessageResponse, Supplier};
use tracing::error;

use crate::error::ClientResult;
use crate::http::ApiClient;

#[derive(Debug, Clone)]
pub struct SupplierService {
    client: ApiClient,
}

impl SupplierService {
    pub fn new(client: ApiClient) -> Self {
        SupplierService { client }
    }

    pub async fn get_all(&self) -> ClientResult<Vec<Supplier>> {
        self.client
            .get("/suppliers", &[])
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch suppliers"))
    }

    pub async fn get_by_id(&self, id: i64) -> ClientResult<Supplier> {
        self.client
            .get(&format!("/suppliers/{}", id), &[])
            .await
            .inspect_err(|e| error!(error = %e, supplier_id = id, "Failed to fetch supplier"))
    }

    pub async fn upsert(&self, supplier: &Supplier) -> ClientResult<MessageResponse<Supplier>> {
        self.client
            .post("/suppliers/upsert", supplier)
            .await
            .inspect_err(|e| error!(error = %e, supplier_id = ?supplier.id, "Failed to upsert supplier"))
    }

    /// `PUT /suppliers/{id}/toggle-status`. The server flips the flag.
    pub async fn toggle_status(&self, id: i64) -> ClientResult<MessageResponse<Supplier>> {
        self.client
            .put(&format!("/suppliers/{}/toggle-status", id))
            .await
            .inspect_err(|e| error!(error = %e, supplier_id = id, "Failed to toggle supplier status"))
    }
}
