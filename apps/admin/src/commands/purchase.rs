//! Purchase order commands.

use retail_core::forms::{created_by_id, PurchaseOrderForm};
use retail_core::messages;
use retail_core::slices::purchase::PurchaseFiltersPatch;
use retail_core::slices::{PurchaseAction, ServerPaginationPatch};
use retail_core::types::{Page, PurchaseOrder, PurchaseOrderCreated, PurchaseOrderPrint};
use tracing::{debug, info, warn};

use super::{brief, track};
use crate::error::{AdminError, AdminResult};
use crate::state::AppContext;

pub async fn fetch_purchase_orders(ctx: &AppContext) -> AdminResult<Page<PurchaseOrder>> {
    let query = ctx.store.select(|s| s.purchases.query());
    debug!(page = query.page, size = query.size, "Fetching purchase orders");
    let purchases = &ctx.services.purchases;
    track(
        &ctx.store,
        PurchaseAction::Fetch,
        async { purchases.list(&query).await },
        brief(messages::SOMETHING_WENT_WRONG),
    )
    .await
}

/// Records the order and books its goods into stock, then reloads the list.
pub async fn process_purchase_order(
    ctx: &AppContext,
    form: &PurchaseOrderForm,
) -> AdminResult<PurchaseOrderCreated> {
    let user = ctx.store.select(|s| s.auth.user.clone());
    let request = form
        .to_request(created_by_id(user.as_ref()))
        .map_err(|errors| AdminError::from_form(&errors))?;

    let purchases = &ctx.services.purchases;
    let created = track(
        &ctx.store,
        PurchaseAction::Process,
        async { purchases.process(&request).await },
        brief(messages::OPERATION_FAILED),
    )
    .await?;
    info!(code = %created.purchase_order_code, total = request.total_payment, "Purchase saved");

    if let Err(err) = fetch_purchase_orders(ctx).await {
        warn!(error = %err.message, "Purchase order list reload failed");
    }
    Ok(created)
}

/// Print data is read straight from the server and not kept in the store.
pub async fn fetch_purchase_print(ctx: &AppContext, id: i64) -> AdminResult<PurchaseOrderPrint> {
    ctx.services
        .purchases
        .print_data(id)
        .await
        .map_err(|err| AdminError::from_client(&err, err.describe(messages::DATA_NOT_FOUND)))
}

pub async fn update_purchase_filters(
    ctx: &AppContext,
    patch: PurchaseFiltersPatch,
) -> AdminResult<Page<PurchaseOrder>> {
    ctx.store.dispatch(PurchaseAction::SetFilters(patch));
    ctx.store.dispatch(PurchaseAction::SetPagination(ServerPaginationPatch {
        current_page: Some(0),
        page_size: None,
    }));
    fetch_purchase_orders(ctx).await
}

pub async fn change_purchase_page(
    ctx: &AppContext,
    patch: ServerPaginationPatch,
) -> AdminResult<Page<PurchaseOrder>> {
    ctx.store.dispatch(PurchaseAction::SetPagination(patch));
    fetch_purchase_orders(ctx).await
}

pub async fn reset_purchase_filters(ctx: &AppContext) -> AdminResult<Page<PurchaseOrder>> {
    ctx.store.dispatch(PurchaseAction::ResetFilters);
    fetch_purchase_orders(ctx).await
}

pub fn clear_purchase_error(ctx: &AppContext) {
    ctx.store.dispatch(PurchaseAction::ClearError);
}
