//! Category commands.

use retail_core::forms::CategoryForm;
use retail_core::slices::category::CategoryToggled;
use retail_core::slices::CategoryAction;
use retail_core::filter::StatusFilter;
use retail_core::types::{Category, CategoryTreeNode};
use tracing::info;

use super::{saved, track, verbose};
use crate::error::{AdminError, AdminResult};
use crate::state::AppContext;

pub async fn fetch_categories(ctx: &AppContext) -> AdminResult<Vec<Category>> {
    let list = track(
        &ctx.store,
        CategoryAction::FetchAll,
        ctx.services.categories.get_all(),
        verbose("Failed to fetch categories"),
    )
    .await?;
    info!(count = list.len(), "Categories loaded");
    Ok(list)
}

pub async fn fetch_category_tree(ctx: &AppContext) -> AdminResult<Vec<CategoryTreeNode>> {
    track(
        &ctx.store,
        CategoryAction::FetchTree,
        ctx.services.categories.get_tree(),
        verbose("Failed to fetch category tree"),
    )
    .await
}

/// Creates or updates, depending on whether the form has an id.
pub async fn save_category(ctx: &AppContext, form: &CategoryForm) -> AdminResult<Category> {
    form.validate().map_err(|errors| AdminError::from_form(&errors))?;
    let payload = form.to_payload();
    let fallback = if payload.id.is_some() {
        "Failed to update category"
    } else {
        "Failed to create category"
    };

    let categories = &ctx.services.categories;
    track(
        &ctx.store,
        CategoryAction::Upsert,
        async { categories.upsert(&payload).await.and_then(saved) },
        verbose(fallback),
    )
    .await
}

pub async fn toggle_category_status(
    ctx: &AppContext,
    id: i64,
    is_deleted: bool,
) -> AdminResult<CategoryToggled> {
    let categories = &ctx.services.categories;
    track(
        &ctx.store,
        CategoryAction::ToggleStatus,
        async {
            categories
                .toggle_status(id, is_deleted)
                .await
                .map(|_| CategoryToggled { id, is_deleted })
        },
        verbose("Failed to toggle category status"),
    )
    .await
}

/// Soft delete; the entry stays in the list, marked deleted.
pub async fn delete_category(ctx: &AppContext, id: i64) -> AdminResult<i64> {
    let categories = &ctx.services.categories;
    track(
        &ctx.store,
        CategoryAction::Delete,
        async { categories.delete(id).await.map(|_| id) },
        verbose("Failed to delete category"),
    )
    .await
}

pub fn clear_category_error(ctx: &AppContext) {
    ctx.store.dispatch(CategoryAction::ClearError);
}

// =============================================================================
// Local table controls
// =============================================================================

/// Filters are applied in the slice; no request is made.
pub fn set_category_search(ctx: &AppContext, search: impl Into<String>) {
    ctx.store.dispatch(CategoryAction::SetSearch(search.into()));
}

pub fn set_category_status_filter(ctx: &AppContext, status: StatusFilter) {
    ctx.store.dispatch(CategoryAction::SetStatusFilter(status));
}

pub fn set_category_page(ctx: &AppContext, page: usize) {
    ctx.store.dispatch(CategoryAction::SetPage(page));
}
