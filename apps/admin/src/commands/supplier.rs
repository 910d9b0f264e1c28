//! Supplier commands.

use retail_core::forms::{created_by, SupplierForm};
use retail_core::messages;
use retail_core::slices::SupplierAction;
use retail_core::types::Supplier;
use tracing::info;

use super::{brief, saved, track};
use crate::error::{AdminError, AdminResult};
use crate::state::AppContext;

pub async fn fetch_suppliers(ctx: &AppContext) -> AdminResult<Vec<Supplier>> {
    let list = track(
        &ctx.store,
        SupplierAction::FetchAll,
        ctx.services.suppliers.get_all(),
        brief(messages::SOMETHING_WENT_WRONG),
    )
    .await?;
    info!(count = list.len(), "Suppliers loaded");
    Ok(list)
}

pub async fn fetch_supplier_by_id(ctx: &AppContext, id: i64) -> AdminResult<Supplier> {
    track(
        &ctx.store,
        SupplierAction::FetchById,
        ctx.services.suppliers.get_by_id(id),
        brief(messages::DATA_NOT_FOUND),
    )
    .await
}

pub async fn save_supplier(ctx: &AppContext, form: &SupplierForm) -> AdminResult<Supplier> {
    form.validate().map_err(|errors| AdminError::from_form(&errors))?;
    let user = ctx.store.select(|s| s.auth.user.clone());
    let payload = form.to_payload(&created_by(user.as_ref()));

    let suppliers = &ctx.services.suppliers;
    track(
        &ctx.store,
        SupplierAction::Upsert,
        async { suppliers.upsert(&payload).await.and_then(saved) },
        brief(messages::OPERATION_FAILED),
    )
    .await
}

/// The server flips the flag and returns the updated supplier.
pub async fn toggle_supplier_status(ctx: &AppContext, id: i64) -> AdminResult<Supplier> {
    let suppliers = &ctx.services.suppliers;
    track(
        &ctx.store,
        SupplierAction::ToggleStatus,
        async { suppliers.toggle_status(id).await.and_then(saved) },
        brief(messages::OPERATION_FAILED),
    )
    .await
}

pub fn clear_supplier_error(ctx: &AppContext) {
    ctx.store.dispatch(SupplierAction::ClearError);
}
