//! Status options for select inputs. Not kept in any slice.

use retail_core::messages;
use retail_core::types::StatusOption;

use crate::error::{AdminError, AdminResult};
use crate::state::AppContext;

/// All status options, or those of one entity type (`PRODUCT`, ...).
pub async fn fetch_status_options(
    ctx: &AppContext,
    entity_type: Option<&str>,
) -> AdminResult<Vec<StatusOption>> {
    let status = &ctx.services.status;
    let result = match entity_type {
        Some(kind) => status.by_entity_type(kind).await,
        None => status.get_all().await,
    };
    result.map_err(|e| {
        let message = e.describe(messages::SOMETHING_WENT_WRONG);
        AdminError::from_client(&e, message)
    })
}
