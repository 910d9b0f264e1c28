//! Stock transfer commands: list, detail, create and delete.

use retail_core::forms::{created_by_id, StockTransferForm};
use retail_core::messages;
use retail_core::slices::transfer::TransferFiltersPatch;
use retail_core::slices::{ServerPaginationPatch, TransferAction};
use retail_core::types::{Page, StockTransfer, StockTransferCreated, StockTransferDetail};
use tracing::{debug, info, warn};

use super::{brief, track};
use crate::error::{AdminError, AdminResult};
use crate::state::AppContext;

pub async fn fetch_stock_transfers(ctx: &AppContext) -> AdminResult<Page<StockTransfer>> {
    let query = ctx.store.select(|s| s.transfers.query());
    debug!(page = query.page, size = query.size, "Fetching stock transfers");
    let transfers = &ctx.services.transfers;
    track(
        &ctx.store,
        TransferAction::Fetch,
        async { transfers.list(&query).await },
        brief(messages::SOMETHING_WENT_WRONG),
    )
    .await
}

pub async fn fetch_transfer_detail(ctx: &AppContext, id: i64) -> AdminResult<StockTransferDetail> {
    track(
        &ctx.store,
        TransferAction::FetchDetail,
        ctx.services.transfers.get_detail(id),
        brief(messages::DATA_NOT_FOUND),
    )
    .await
}

/// Validates the form, creates the transfer and reloads the list.
///
/// A failed reload is logged; the transfer itself was created.
pub async fn create_stock_transfer(
    ctx: &AppContext,
    form: &StockTransferForm,
) -> AdminResult<StockTransferCreated> {
    let user = ctx.store.select(|s| s.auth.user.clone());
    let request = form
        .to_request(created_by_id(user.as_ref()))
        .map_err(|errors| AdminError::from_form(&errors))?;

    let transfers = &ctx.services.transfers;
    let created = track(
        &ctx.store,
        TransferAction::Create,
        async { transfers.create(&request).await },
        brief(messages::OPERATION_FAILED),
    )
    .await?;
    info!(code = %created.transfer_code, "Transfer saved");

    if let Err(err) = fetch_stock_transfers(ctx).await {
        warn!(error = %err.message, "Transfer list reload failed");
    }
    Ok(created)
}

/// Deletes a transfer; the slice drops the row once the server confirms.
pub async fn delete_stock_transfer(ctx: &AppContext, id: i64) -> AdminResult<i64> {
    let transfers = &ctx.services.transfers;
    track(
        &ctx.store,
        TransferAction::Delete,
        async { transfers.delete(id).await.map(|()| id) },
        brief(messages::OPERATION_FAILED),
    )
    .await
}

pub async fn update_transfer_filters(
    ctx: &AppContext,
    patch: TransferFiltersPatch,
) -> AdminResult<Page<StockTransfer>> {
    ctx.store.dispatch(TransferAction::SetFilters(patch));
    ctx.store.dispatch(TransferAction::SetPagination(ServerPaginationPatch {
        current_page: Some(0),
        page_size: None,
    }));
    fetch_stock_transfers(ctx).await
}

pub async fn change_transfer_page(
    ctx: &AppContext,
    patch: ServerPaginationPatch,
) -> AdminResult<Page<StockTransfer>> {
    ctx.store.dispatch(TransferAction::SetPagination(patch));
    fetch_stock_transfers(ctx).await
}

pub fn clear_transfer_detail(ctx: &AppContext) {
    ctx.store.dispatch(TransferAction::ClearTransferDetail);
}

pub fn clear_transfer_error(ctx: &AppContext) {
    ctx.store.dispatch(TransferAction::ClearError);
}
