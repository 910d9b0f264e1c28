//! Branch commands.

use retail_core::forms::{created_by, BranchForm};
use retail_core::messages;
use retail_core::slices::BranchAction;
use retail_core::types::Branch;
use tracing::info;

use super::{brief, saved, track};
use crate::error::{AdminError, AdminResult};
use crate::state::AppContext;

pub async fn fetch_branches(ctx: &AppContext) -> AdminResult<Vec<Branch>> {
    let list = track(
        &ctx.store,
        BranchAction::FetchAll,
        ctx.services.branches.get_all(),
        brief(messages::SOMETHING_WENT_WRONG),
    )
    .await?;
    info!(count = list.len(), "Branches loaded");
    Ok(list)
}

pub async fn fetch_branch_by_id(ctx: &AppContext, id: i64) -> AdminResult<Branch> {
    track(
        &ctx.store,
        BranchAction::FetchById,
        ctx.services.branches.get_by_id(id),
        brief(messages::DATA_NOT_FOUND),
    )
    .await
}

/// Validates the form and saves it. Nothing is sent when validation fails.
pub async fn save_branch(ctx: &AppContext, form: &BranchForm) -> AdminResult<Branch> {
    form.validate().map_err(|errors| AdminError::from_form(&errors))?;
    let user = ctx.store.select(|s| s.auth.user.clone());
    let payload = form.to_payload(&created_by(user.as_ref()));

    let branches = &ctx.services.branches;
    track(
        &ctx.store,
        BranchAction::Upsert,
        async { branches.upsert(&payload).await.and_then(saved) },
        brief(messages::OPERATION_FAILED),
    )
    .await
}

/// Flips `isActive` of a loaded branch and sends it back through upsert.
pub async fn toggle_branch_status(ctx: &AppContext, id: i64) -> AdminResult<Branch> {
    let mut branch = ctx
        .store
        .select(|s| s.branches.list.get(id).cloned())
        .ok_or_else(|| AdminError::not_found("branch", id))?;
    branch.is_active = !branch.is_active;

    let branches = &ctx.services.branches;
    track(
        &ctx.store,
        BranchAction::ToggleStatus,
        async {
            branches
                .toggle_status(&branch)
                .await
                .map(|response| response.data.unwrap_or_else(|| branch.clone()))
        },
        brief(messages::OPERATION_FAILED),
    )
    .await
}

pub fn clear_branch_error(ctx: &AppContext) {
    ctx.store.dispatch(BranchAction::ClearError);
}
