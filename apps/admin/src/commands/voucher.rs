//! Voucher campaign commands.
//!
//! Generated vouchers are not kept in the voucher slice; the voucher modal
//! holds the list for the campaign it shows.

use retail_core::forms::{created_by, VoucherForm};
use retail_core::messages;
use retail_core::slices::VoucherAction;
use retail_core::types::{Voucher, VoucherCampaign};
use retail_core::validation::validate_at_least_one;
use tracing::info;

use super::{brief, saved, track};
use crate::error::{AdminError, AdminResult};
use crate::state::AppContext;

pub async fn fetch_vouchers(ctx: &AppContext) -> AdminResult<Vec<VoucherCampaign>> {
    let list = track(
        &ctx.store,
        VoucherAction::FetchAll,
        ctx.services.vouchers.get_all(),
        brief(messages::SOMETHING_WENT_WRONG),
    )
    .await?;
    info!(count = list.len(), "Voucher campaigns loaded");
    Ok(list)
}

pub async fn fetch_voucher_by_id(ctx: &AppContext, id: i64) -> AdminResult<VoucherCampaign> {
    track(
        &ctx.store,
        VoucherAction::FetchById,
        ctx.services.vouchers.get_by_id(id),
        brief(messages::DATA_NOT_FOUND),
    )
    .await
}

pub async fn save_voucher(ctx: &AppContext, form: &VoucherForm) -> AdminResult<VoucherCampaign> {
    form.validate().map_err(|errors| AdminError::from_form(&errors))?;
    let user = ctx.store.select(|s| s.auth.user.clone());
    let payload = form.to_payload(&created_by(user.as_ref()));

    let vouchers = &ctx.services.vouchers;
    track(
        &ctx.store,
        VoucherAction::Upsert,
        async { vouchers.upsert(&payload).await.and_then(saved) },
        brief(messages::OPERATION_FAILED),
    )
    .await
}

/// Flips `isActive` of a loaded campaign and sends it back through upsert.
pub async fn toggle_voucher_status(ctx: &AppContext, id: i64) -> AdminResult<VoucherCampaign> {
    let mut campaign = ctx
        .store
        .select(|s| s.vouchers.list.get(id).cloned())
        .ok_or_else(|| AdminError::not_found("voucher campaign", id))?;
    campaign.is_active = !campaign.is_active;

    let vouchers = &ctx.services.vouchers;
    track(
        &ctx.store,
        VoucherAction::ToggleStatus,
        async {
            vouchers
                .upsert(&campaign)
                .await
                .map(|response| response.data.unwrap_or_else(|| campaign.clone()))
        },
        brief(messages::OPERATION_FAILED),
    )
    .await
}

/// Generates `quantity` vouchers for a saved campaign and returns the
/// campaign's full voucher list afterwards.
pub async fn generate_vouchers(
    ctx: &AppContext,
    campaign_id: i64,
    quantity: u32,
) -> AdminResult<Vec<Voucher>> {
    validate_at_least_one("quantity", i64::from(quantity))?;
    ctx.services
        .vouchers
        .generate(campaign_id, quantity)
        .await
        .map_err(|e| {
            let message = e.describe(messages::OPERATION_FAILED);
            AdminError::from_client(&e, message)
        })?;
    vouchers_by_campaign(ctx, campaign_id).await
}

pub async fn vouchers_by_campaign(ctx: &AppContext, campaign_id: i64) -> AdminResult<Vec<Voucher>> {
    ctx.services
        .vouchers
        .vouchers_by_campaign(campaign_id)
        .await
        .map_err(|e| {
            let message = e.describe(messages::SOMETHING_WENT_WRONG);
            AdminError::from_client(&e, message)
        })
}

pub fn clear_voucher_error(ctx: &AppContext) {
    ctx.store.dispatch(VoucherAction::ClearError);
}
