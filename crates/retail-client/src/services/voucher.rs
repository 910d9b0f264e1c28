//! Voucher campaign endpoints.

use retail_core::types::{MessageResponse, Voucher, VoucherCampaign};
use tracing::{error, info};

use crate::error::ClientResult;
use crate::http::{build_query, ApiClient};

const CAMPAIGNS: &str = "/voucher-campaigns";

#[derive(Debug, Clone)]
pub struct VoucherService {
    client: ApiClient,
}

impl VoucherService {
    pub fn new(client: ApiClient) -> Self {
        VoucherService { client }
    }

    pub async fn get_all(&self) -> ClientResult<Vec<VoucherCampaign>> {
        self.client
            .get(CAMPAIGNS, &[])
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch voucher campaigns"))
    }

    pub async fn get_by_id(&self, id: i64) -> ClientResult<VoucherCampaign> {
        self.client
            .get(&format!("{}/{}", CAMPAIGNS, id), &[])
            .await
            .inspect_err(|e| error!(error = %e, campaign_id = id, "Failed to fetch voucher campaign"))
    }

    /// Creates or updates a campaign. Also used to flip `isActive`.
    pub async fn upsert(
        &self,
        campaign: &VoucherCampaign,
    ) -> ClientResult<MessageResponse<VoucherCampaign>> {
        self.client
            .post(&format!("{}/upsert", CAMPAIGNS), campaign)
            .await
            .inspect_err(|e| error!(error = %e, campaign_id = ?campaign.id, "Failed to upsert voucher campaign"))
    }

    /// `POST /voucher-campaigns/{id}/generate-vouchers?quantity=N`.
    pub async fn generate(
        &self,
        campaign_id: i64,
        quantity: u32,
    ) -> ClientResult<MessageResponse<Vec<Voucher>>> {
        let query = build_query([("quantity", Some(quantity.to_string()))]);
        let response: MessageResponse<Vec<Voucher>> = self
            .client
            .post_query(&format!("{}/{}/generate-vouchers", CAMPAIGNS, campaign_id), &query)
            .await
            .inspect_err(|e| error!(error = %e, campaign_id, quantity, "Failed to generate vouchers"))?;
        info!(campaign_id, quantity, "Vouchers generated");
        Ok(response)
    }

    pub async fn vouchers_by_campaign(&self, campaign_id: i64) -> ClientResult<Vec<Voucher>> {
        self.client
            .get(&format!("/vouchers/by-campaign/{}", campaign_id), &[])
            .await
            .inspect_err(|e| error!(error = %e, campaign_id, "Failed to fetch vouchers by campaign"))
    }
}
