//! # Store
//!
//! `RootState` holds one slice per domain. It changes only through
//! [`Store::dispatch`], which routes an [`Action`] to its slice reducer.
//!
//! The store is wrapped in `Arc<Mutex<T>>`:
//! - `Arc` so commands running on different tasks share one store
//! - `Mutex` so each reducer runs alone
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  dispatch(BranchAction::FetchAll(Pending))                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Action::Branches(..) ──► lock ──► branches.reduce(..) ──► unlock      │
//! │                                                                         │
//! │  NOTE: a late response still lands; the last one to arrive wins.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use retail_core::slices::{
    AuthAction, AuthSlice, BranchAction, BranchSlice, CategoryAction, CategorySlice,
    ProductAction, ProductSlice, PurchaseAction, PurchaseSlice, StockAction, StockSlice,
    SupplierAction, SupplierSlice, TransferAction, TransferSlice, VoucherAction, VoucherSlice,
};

/// Every slice of the admin client.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootState {
    pub products: ProductSlice,
    pub categories: CategorySlice,
    pub vouchers: VoucherSlice,
    pub branches: BranchSlice,
    pub suppliers: SupplierSlice,
    pub stock: StockSlice,
    pub transfers: TransferSlice,
    pub purchases: PurchaseSlice,
    pub auth: AuthSlice,
}

/// An action for one of the slices.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Products(ProductAction),
    Categories(CategoryAction),
    Vouchers(VoucherAction),
    Branches(BranchAction),
    Suppliers(SupplierAction),
    Stock(StockAction),
    Transfers(TransferAction),
    Purchases(PurchaseAction),
    Auth(AuthAction),
}

impl Action {
    /// Action type string, e.g. `branches/fetchAll/pending`.
    pub fn name(&self) -> String {
        match self {
            Action::Products(a) => a.name(),
            Action::Categories(a) => a.name(),
            Action::Vouchers(a) => a.name(),
            Action::Branches(a) => a.name(),
            Action::Suppliers(a) => a.name(),
            Action::Stock(a) => a.name(),
            Action::Transfers(a) => a.name(),
            Action::Purchases(a) => a.name(),
            Action::Auth(a) => a.name(),
        }
    }
}

macro_rules! impl_from_action {
    ($($variant:ident => $action:ty),* $(,)?) => {
        $(
            impl From<$action> for Action {
                fn from(action: $action) -> Self {
                    Action::$variant(action)
                }
            }
        )*
    };
}

impl_from_action! {
    Products => ProductAction,
    Categories => CategoryAction,
    Vouchers => VoucherAction,
    Branches => BranchAction,
    Suppliers => SupplierAction,
    Stock => StockAction,
    Transfers => TransferAction,
    Purchases => PurchaseAction,
    Auth => AuthAction,
}

impl RootState {
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::Products(a) => self.products.reduce(a),
            Action::Categories(a) => self.categories.reduce(a),
            Action::Vouchers(a) => self.vouchers.reduce(a),
            Action::Branches(a) => self.branches.reduce(a),
            Action::Suppliers(a) => self.suppliers.reduce(a),
            Action::Stock(a) => self.stock.reduce(a),
            Action::Transfers(a) => self.transfers.reduce(a),
            Action::Purchases(a) => self.purchases.reduce(a),
            Action::Auth(a) => self.auth.reduce(a),
        }
    }
}

/// Shared handle to the root state. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: Arc<Mutex<RootState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: RootState) -> Self {
        Store {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// A reducer never panics half-way, so a poisoned lock still guards a
    /// consistent state.
    fn lock(&self) -> MutexGuard<'_, RootState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Applies one action.
    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        debug!(action = %action.name(), "dispatch");
        self.lock().reduce(action);
    }

    /// Reads from the state without cloning it.
    pub fn select<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&RootState) -> R,
    {
        f(&self.lock())
    }

    /// A copy of the whole state.
    pub fn snapshot(&self) -> RootState {
        self.lock().clone()
    }

    /// The whole state as camelCase JSON, the shape a web front end reads.
    pub fn snapshot_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(&*self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retail_core::filter::StatusFilter;
    use retail_core::slices::{LoadStatus, Lifecycle};
    use retail_core::types::Branch;

    fn branch(id: i64, name: &str, active: bool) -> Branch {
        Branch {
            id: Some(id),
            name: name.into(),
            is_active: active,
            ..Default::default()
        }
    }

    #[test]
    fn test_dispatch_routes_to_slice() {
        let store = Store::new();
        store.dispatch(BranchAction::FetchAll(Lifecycle::Pending));
        assert_eq!(
            store.select(|s| s.branches.request.status),
            LoadStatus::Loading
        );

        store.dispatch(BranchAction::FetchAll(Lifecycle::Fulfilled(vec![
            branch(1, "Chi nhánh 1", true),
            branch(2, "Chi nhánh 2", false),
        ])));
        store.dispatch(BranchAction::SetStatusFilter(StatusFilter::Active));

        let state = store.snapshot();
        assert_eq!(state.branches.request.status, LoadStatus::Success);
        assert_eq!(state.branches.list.total(), 1);
        assert_eq!(state.products, ProductSlice::default());
    }

    #[test]
    fn test_snapshot_json_is_camel_case() {
        let store = Store::new();
        store.dispatch(BranchAction::FetchAll(Lifecycle::Rejected("Có lỗi xảy ra".into())));
        let json = store.snapshot_json().unwrap();
        assert_eq!(json["branches"]["status"], "error");
        assert_eq!(json["branches"]["error"], "Có lỗi xảy ra");
        assert_eq!(json["auth"]["isAuthenticated"], false);
    }

    #[test]
    fn test_action_names() {
        let action: Action = BranchAction::FetchAll(Lifecycle::Pending).into();
        assert_eq!(action.name(), "branches/fetchAll/pending");

        let action: Action = StockAction::ResetFilters.into();
        assert!(action.name().starts_with("stock/"));

        let action: Action = TransferAction::ClearError.into();
        assert_eq!(action.name(), "stockTransfer/clearError");
    }

    #[test]
    fn test_transfer_delete_routes_to_transfer_slice() {
        let store = Store::new();
        store.dispatch(TransferAction::Delete(Lifecycle::Rejected("Operation failed.".into())));
        let json = store.snapshot_json().unwrap();
        assert_eq!(json["transfers"]["status"], "error");
        assert_eq!(json["transfers"]["pagination"]["pageSize"], 10);
        assert_eq!(json["purchases"]["filters"]["sortDirection"], "DESC");
    }

    #[test]
    fn test_clones_share_state() {
        let store = Store::new();
        let other = store.clone();
        other.dispatch(BranchAction::FetchAll(Lifecycle::Rejected("boom".into())));
        assert_eq!(
            store.select(|s| s.branches.request.error.clone()).as_deref(),
            Some("boom")
        );
    }
}
