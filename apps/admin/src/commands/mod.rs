//! # Commands
//!
//! The async operations behind every page and modal. A command dispatches
//! `Pending`, calls one service, and dispatches `Fulfilled` or `Rejected`.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (lifecycle helper)
//! ├── auth.rs      ◄─── Sign-in, register, refresh, profile, startup
//! ├── product.rs   ◄─── Product CRUD, paging with fallback, image upload
//! ├── category.rs  ◄─── Category list, tree, toggle, delete
//! ├── voucher.rs   ◄─── Campaigns, voucher generation
//! ├── branch.rs    ◄─── Branch list and toggle
//! ├── supplier.rs  ◄─── Supplier list and toggle
//! ├── stock.rs     ◄─── Stock overview and its filters
//! ├── transfer.rs  ◄─── Warehouse-to-branch transfers
//! ├── purchase.rs  ◄─── Purchase orders and their print data
//! └── status.rs    ◄─── Status options for selects
//! ```
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_branches(&ctx)                                                   │
//! │       │                                                                 │
//! │       ├─► dispatch(FetchAll(Pending))                                   │
//! │       │                                                                 │
//! │       ├─► services.branches.get_all().await                             │
//! │       │        │                                                        │
//! │       │   Ok(list) ──► dispatch(FetchAll(Fulfilled(list)))              │
//! │       │   Err(e)   ──► dispatch(FetchAll(Rejected(message)))            │
//! │       │                Err(AdminError { code, message })                │
//! │       ▼                                                                 │
//! │  The caller awaits the result; the slice already holds it.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rejection Messages
//! Products, categories and auth use [`verbose`]: server message, then the
//! error's own text, then the fallback. Branches, vouchers, suppliers,
//! stock, transfers and purchase orders use [`brief`]: server message, then
//! the fallback.

pub mod auth;
pub mod branch;
pub mod category;
pub mod product;
pub mod purchase;
pub mod status;
pub mod stock;
pub mod supplier;
pub mod transfer;
pub mod voucher;

use std::future::Future;

use retail_client::{ClientError, ClientResult};
use retail_core::slices::Lifecycle;
use retail_core::types::MessageResponse;

use crate::error::{AdminError, AdminResult};
use crate::state::{Action, Store};

/// Server message, then the error's own text, then `fallback`.
pub fn verbose(fallback: &'static str) -> impl Fn(&ClientError) -> String {
    move |err| err.describe_verbose(fallback)
}

/// Server message, then `fallback`.
pub fn brief(fallback: &'static str) -> impl Fn(&ClientError) -> String {
    move |err| err.describe(fallback)
}

/// Runs `call` through the three phases of `wrap`.
///
/// On failure the slice receives `message(&err)` and the same text is
/// returned in the [`AdminError`].
pub(crate) async fn track<T, A, W, Fut, M>(
    store: &Store,
    wrap: W,
    call: Fut,
    message: M,
) -> AdminResult<T>
where
    T: Clone,
    A: Into<Action>,
    W: Fn(Lifecycle<T>) -> A,
    Fut: Future<Output = ClientResult<T>>,
    M: Fn(&ClientError) -> String,
{
    store.dispatch(wrap(Lifecycle::Pending));
    match call.await {
        Ok(value) => {
            store.dispatch(wrap(Lifecycle::Fulfilled(value.clone())));
            Ok(value)
        }
        Err(err) => {
            let text = message(&err);
            store.dispatch(wrap(Lifecycle::Rejected(text.clone())));
            Err(AdminError::from_client(&err, text))
        }
    }
}

/// The entity inside an upsert response. A response without one is a
/// decode failure.
pub(crate) fn saved<T>(response: MessageResponse<T>) -> ClientResult<T> {
    response
        .data
        .ok_or_else(|| ClientError::Decode("response carried no data".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use retail_core::slices::{BranchAction, LoadStatus};
    use retail_core::types::Branch;

    #[tokio::test]
    async fn test_track_fulfilled() {
        let store = Store::new();
        let list = track(
            &store,
            BranchAction::FetchAll,
            async { Ok(vec![Branch::default()]) },
            brief("Failed to fetch branches"),
        )
        .await
        .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(
            store.select(|s| s.branches.request.status),
            LoadStatus::Success
        );
    }

    #[tokio::test]
    async fn test_track_rejected_message_matches_slice() {
        let store = Store::new();
        let err = track(
            &store,
            BranchAction::FetchAll,
            async { Err::<Vec<Branch>, _>(ClientError::Timeout(10)) },
            brief("Failed to fetch branches"),
        )
        .await
        .unwrap_err();

        assert_eq!(err.message, "Failed to fetch branches");
        assert_eq!(
            store.select(|s| s.branches.request.error.clone()).as_deref(),
            Some("Failed to fetch branches")
        );
    }

    #[test]
    fn test_message_styles() {
        let err = ClientError::Network("connection refused".into());
        assert_eq!(brief("Failed")(&err), "Failed");
        assert_eq!(verbose("Failed")(&err), "Network error: connection refused");

        let with_server = ClientError::Http {
            status: 400,
            message: Some("Tên đã tồn tại".into()),
        };
        assert_eq!(brief("Failed")(&with_server), "Tên đã tồn tại");
        assert_eq!(verbose("Failed")(&with_server), "Tên đã tồn tại");
    }

    #[test]
    fn test_saved_requires_data() {
        assert_eq!(saved(MessageResponse::with_data("ok", 5)).unwrap(), 5);
        let empty: MessageResponse<i64> = MessageResponse {
            message: "ok".into(),
            data: None,
        };
        assert!(matches!(saved(empty), Err(ClientError::Decode(_))));
    }
}
