//! Stock overview commands. Every filter or page change re-fetches.

use retail_core::messages;
use retail_core::slices::stock::{StockFiltersPatch, StockPaginationPatch};
use retail_core::slices::StockAction;
use retail_core::types::{Page, StockRow};
use tracing::debug;

use super::{brief, track};
use crate::error::AdminResult;
use crate::state::AppContext;

/// Fetches the page the slice's filters and pagination describe.
pub async fn fetch_stock(ctx: &AppContext) -> AdminResult<Page<StockRow>> {
    let query = ctx.store.select(|s| s.stock.query());
    debug!(page = query.page, size = query.size, "Fetching stock overview");
    let stock = &ctx.services.stock;
    track(
        &ctx.store,
        StockAction::Fetch,
        async { stock.overview(&query).await },
        brief(messages::SOMETHING_WENT_WRONG),
    )
    .await
}

pub async fn update_stock_filters(
    ctx: &AppContext,
    patch: StockFiltersPatch,
) -> AdminResult<Page<StockRow>> {
    ctx.store.dispatch(StockAction::SetFilters(patch));
    fetch_stock(ctx).await
}

pub async fn change_stock_page(
    ctx: &AppContext,
    patch: StockPaginationPatch,
) -> AdminResult<Page<StockRow>> {
    ctx.store.dispatch(StockAction::SetPagination(patch));
    fetch_stock(ctx).await
}

pub async fn reset_stock_filters(ctx: &AppContext) -> AdminResult<Page<StockRow>> {
    ctx.store.dispatch(StockAction::ResetFilters);
    fetch_stock(ctx).await
}

pub fn clear_stock_error(ctx: &AppContext) {
    ctx.store.dispatch(StockAction::ClearError);
}
