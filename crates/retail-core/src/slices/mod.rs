//! # State Slices
//!
//! One slice per resource domain. A slice changes only through its reducer,
//! and every async operation reaches the reducer three ways:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Async Operation Lifecycle                             │
//! │                                                                         │
//! │   dispatch(Op(Pending))                                                 │
//! │        status = Loading, error = None                                   │
//! │              │                                                          │
//! │              ├──────────────────────────────┐                           │
//! │              ▼                              ▼                           │
//! │   dispatch(Op(Fulfilled(payload)))   dispatch(Op(Rejected(message)))    │
//! │        status = Success                     status = Error              │
//! │        error = None                         error = Some(message)       │
//! │        payload stored                       data left untouched         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reducers are plain functions over owned state: no I/O, no clock. The
//! message of a rejection is resolved by the caller before dispatch.

pub mod auth;
pub mod branch;
pub mod category;
pub mod product;
pub mod purchase;
pub mod stock;
pub mod supplier;
pub mod transfer;
pub mod voucher;

pub use auth::{AuthAction, AuthSlice};
pub use branch::{BranchAction, BranchSlice};
pub use category::{CategoryAction, CategorySlice};
pub use product::{ProductAction, ProductSlice};
pub use purchase::{PurchaseAction, PurchaseSlice};
pub use stock::{StockAction, StockSlice};
pub use supplier::{SupplierAction, SupplierSlice};
pub use transfer::{TransferAction, TransferSlice};
pub use voucher::{VoucherAction, VoucherSlice};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::pagination::zero_based;
use crate::types::Page;
use crate::DEFAULT_PAGE_SIZE;

// =============================================================================
// Load Status
// =============================================================================

/// Where a slice is in its most recent async operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Idle => "idle",
            LoadStatus::Loading => "loading",
            LoadStatus::Success => "success",
            LoadStatus::Error => "error",
        }
    }
}

/// The phase an async operation is reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Lifecycle<T> {
    Pending,
    Fulfilled(T),
    Rejected(String),
}

impl<T> Lifecycle<T> {
    pub fn phase(&self) -> &'static str {
        match self {
            Lifecycle::Pending => "pending",
            Lifecycle::Fulfilled(_) => "fulfilled",
            Lifecycle::Rejected(_) => "rejected",
        }
    }
}

/// Status and error shared by every slice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestState {
    pub status: LoadStatus,
    pub error: Option<String>,
}

impl RequestState {
    /// Applies a phase and hands back the payload when it is `Fulfilled`.
    pub fn apply<T>(&mut self, phase: Lifecycle<T>) -> Option<T> {
        match phase {
            Lifecycle::Pending => {
                self.status = LoadStatus::Loading;
                self.error = None;
                None
            }
            Lifecycle::Fulfilled(payload) => {
                self.status = LoadStatus::Success;
                self.error = None;
                Some(payload)
            }
            Lifecycle::Rejected(message) => {
                self.status = LoadStatus::Error;
                self.error = Some(message);
                None
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Builds an action type string such as `products/fetchPaged/pending`.
pub(crate) fn type_name<T>(slice: &str, op: &str, phase: &Lifecycle<T>) -> String {
    format!("{}/{}/{}", slice, op, phase.phase())
}

// =============================================================================
// One-Based Pagination
// =============================================================================

/// Pagination as the branch, voucher and supplier pages show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ListPagination {
    /// One-based.
    pub current_page: usize,
    pub page_size: usize,
    /// Rows passing the current filters.
    pub total: usize,
}

/// Partial update of [`ListPagination`]. `None` keeps the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListPaginationPatch {
    pub current_page: Option<usize>,
    pub page_size: Option<usize>,
}

/// Applies a one-based pagination patch to a filtered list.
pub(crate) fn patch_list<T: crate::filter::Listable>(
    list: &mut crate::filter::FilteredList<T>,
    patch: ListPaginationPatch,
) {
    if let Some(size) = patch.page_size {
        list.set_page_size(size);
    }
    if let Some(page) = patch.current_page {
        list.set_page(zero_based(page));
    }
}

/// One-based view of a filtered list's pagination.
pub(crate) fn list_pagination<T: crate::filter::Listable>(
    list: &crate::filter::FilteredList<T>,
) -> ListPagination {
    ListPagination {
        current_page: list.page() + 1,
        page_size: list.page_size(),
        total: list.total(),
    }
}

// =============================================================================
// Server Pagination
// =============================================================================

/// Pagination of a server-paged listing (stock, transfers, purchase orders).
/// `current_page` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ServerPagination {
    pub current_page: usize,
    pub page_size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl Default for ServerPagination {
    fn default() -> Self {
        ServerPagination::new(DEFAULT_PAGE_SIZE)
    }
}

impl ServerPagination {
    pub fn new(page_size: usize) -> Self {
        ServerPagination {
            current_page: 0,
            page_size,
            total_elements: 0,
            total_pages: 0,
        }
    }

    /// Takes the numbers of a fetched page. A page reporting size 0 keeps
    /// the current size.
    pub fn follow<T>(&mut self, page: &Page<T>) {
        *self = ServerPagination {
            current_page: page.number,
            page_size: if page.size == 0 {
                self.page_size
            } else {
                page.size
            },
            total_elements: page.total_elements,
            total_pages: page.total_pages,
        };
    }

    /// A zero page size is ignored.
    pub fn patch(&mut self, patch: ServerPaginationPatch) {
        if let Some(page) = patch.current_page {
            self.current_page = page;
        }
        if let Some(size) = patch.page_size.filter(|s| *s > 0) {
            self.page_size = size;
        }
    }
}

/// Partial update of [`ServerPagination`]. `None` keeps the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServerPaginationPatch {
    pub current_page: Option<usize>,
    pub page_size: Option<usize>,
}

// =============================================================================
// Unit Tests
// =============================================================================
