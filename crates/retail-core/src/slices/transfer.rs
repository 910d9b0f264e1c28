//! Stock transfer slice: warehouse-to-branch exports, server paginated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{type_name, Lifecycle, RequestState, ServerPagination, ServerPaginationPatch};
use crate::types::{
    Page, StockTransfer, StockTransferCreated, StockTransferDetail, StockTransferQuery,
};
use crate::LIST_PAGE_SIZE;

const SLICE: &str = "stockTransfer";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TransferFilters {
    pub search_term: String,
    pub from_warehouse_id: Option<i64>,
    pub to_branch_id: Option<i64>,
    #[ts(as = "Option<String>")]
    pub transfer_date_from: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub transfer_date_to: Option<NaiveDate>,
    pub status: Option<String>,
}

/// Partial filter update. The optional fields take `Some(None)` to clear.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransferFiltersPatch {
    pub search_term: Option<String>,
    pub from_warehouse_id: Option<Option<i64>>,
    pub to_branch_id: Option<Option<i64>>,
    pub transfer_date_from: Option<Option<NaiveDate>>,
    pub transfer_date_to: Option<Option<NaiveDate>>,
    pub status: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSlice {
    pub transfers: Vec<StockTransfer>,
    pub transfer_detail: Option<StockTransferDetail>,
    /// Code of the last transfer this session created.
    pub last_created: Option<StockTransferCreated>,
    #[serde(flatten)]
    pub request: RequestState,
    pub pagination: ServerPagination,
    pub filters: TransferFilters,
}

impl Default for TransferSlice {
    fn default() -> Self {
        TransferSlice {
            transfers: Vec::new(),
            transfer_detail: None,
            last_created: None,
            request: RequestState::default(),
            pagination: ServerPagination::new(LIST_PAGE_SIZE),
            filters: TransferFilters::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransferAction {
    Fetch(Lifecycle<Page<StockTransfer>>),
    Create(Lifecycle<StockTransferCreated>),
    FetchDetail(Lifecycle<StockTransferDetail>),
    /// Carries the id of the deleted transfer.
    Delete(Lifecycle<i64>),
    SetFilters(TransferFiltersPatch),
    SetPagination(ServerPaginationPatch),
    ClearError,
    ClearTransferDetail,
}

impl TransferAction {
    pub fn name(&self) -> String {
        match self {
            TransferAction::Fetch(p) => type_name(SLICE, "fetchStockTransfers", p),
            TransferAction::Create(p) => type_name(SLICE, "createStockTransfer", p),
            TransferAction::FetchDetail(p) => type_name(SLICE, "fetchTransferDetail", p),
            TransferAction::Delete(p) => type_name(SLICE, "deleteStockTransfer", p),
            TransferAction::SetFilters(_) => format!("{}/setFilters", SLICE),
            TransferAction::SetPagination(_) => format!("{}/setPagination", SLICE),
            TransferAction::ClearError => format!("{}/clearError", SLICE),
            TransferAction::ClearTransferDetail => format!("{}/clearTransferDetail", SLICE),
        }
    }
}

impl TransferSlice {
    pub fn reduce(&mut self, action: TransferAction) {
        match action {
            TransferAction::Fetch(phase) => {
                if let Some(page) = self.request.apply(phase) {
                    self.pagination.follow(&page);
                    self.transfers = page.content;
                }
            }
            TransferAction::Create(phase) => {
                if let Some(created) = self.request.apply(phase) {
                    self.last_created = Some(created);
                }
            }
            TransferAction::FetchDetail(phase) => {
                if let Some(detail) = self.request.apply(phase) {
                    self.transfer_detail = Some(detail);
                }
            }
            TransferAction::Delete(phase) => {
                if let Some(id) = self.request.apply(phase) {
                    self.transfers.retain(|t| t.id != id);
                    if self.transfer_detail.as_ref().is_some_and(|d| d.id == id) {
                        self.transfer_detail = None;
                    }
                }
            }
            TransferAction::SetFilters(patch) => {
                let f = &mut self.filters;
                if let Some(term) = patch.search_term {
                    f.search_term = term;
                }
                if let Some(id) = patch.from_warehouse_id {
                    f.from_warehouse_id = id;
                }
                if let Some(id) = patch.to_branch_id {
                    f.to_branch_id = id;
                }
                if let Some(date) = patch.transfer_date_from {
                    f.transfer_date_from = date;
                }
                if let Some(date) = patch.transfer_date_to {
                    f.transfer_date_to = date;
                }
                if let Some(status) = patch.status {
                    f.status = status;
                }
            }
            TransferAction::SetPagination(patch) => self.pagination.patch(patch),
            TransferAction::ClearError => self.request.clear_error(),
            TransferAction::ClearTransferDetail => self.transfer_detail = None,
        }
    }

    /// The list query for the current filters and page.
    pub fn query(&self) -> StockTransferQuery {
        let term = self.filters.search_term.trim();
        StockTransferQuery {
            search_term: (!term.is_empty()).then(|| term.to_string()),
            from_warehouse_id: self.filters.from_warehouse_id,
            to_branch_id: self.filters.to_branch_id,
            transfer_date_from: self.filters.transfer_date_from,
            transfer_date_to: self.filters.transfer_date_to,
            status: self.filters.status.clone(),
            page: self.pagination.current_page,
            size: self.pagination.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(id: i64) -> StockTransfer {
        StockTransfer {
            id,
            transfer_code: Some(format!("XK{:04}", id)),
            ..Default::default()
        }
    }

    fn page(ids: &[i64], number: usize, total: usize) -> Page<StockTransfer> {
        Page {
            content: ids.iter().copied().map(transfer).collect(),
            number,
            size: 10,
            total_elements: total,
            total_pages: total.div_ceil(10),
            first: number == 0,
            last: (number + 1) * 10 >= total,
        }
    }

    #[test]
    fn test_default_query_uses_list_size() {
        let slice = TransferSlice::default();
        assert_eq!(slice.query(), StockTransferQuery::default());
        assert_eq!(slice.pagination.page_size, 10);
    }

    #[test]
    fn test_fetch_follows_server_page() {
        let mut slice = TransferSlice::default();
        slice.reduce(TransferAction::Fetch(Lifecycle::Pending));
        assert!(slice.request.is_loading());
        slice.reduce(TransferAction::Fetch(Lifecycle::Fulfilled(page(&[11, 12], 1, 12))));
        assert_eq!(slice.transfers.len(), 2);
        assert_eq!(slice.pagination.current_page, 1);
        assert_eq!(slice.pagination.total_pages, 2);
        assert_eq!(slice.pagination.total_elements, 12);
    }

    #[test]
    fn test_delete_removes_row_and_open_detail() {
        let mut slice = TransferSlice::default();
        slice.reduce(TransferAction::Fetch(Lifecycle::Fulfilled(page(&[1, 2, 3], 0, 3))));
        slice.reduce(TransferAction::FetchDetail(Lifecycle::Fulfilled(StockTransferDetail {
            id: 2,
            ..Default::default()
        })));

        slice.reduce(TransferAction::Delete(Lifecycle::Pending));
        slice.reduce(TransferAction::Delete(Lifecycle::Fulfilled(2)));

        let ids: Vec<i64> = slice.transfers.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(slice.transfer_detail.is_none());
    }

    #[test]
    fn test_rejected_delete_keeps_rows() {
        let mut slice = TransferSlice::default();
        slice.reduce(TransferAction::Fetch(Lifecycle::Fulfilled(page(&[1], 0, 1))));
        slice.reduce(TransferAction::Delete(Lifecycle::Rejected(
            "Failed to delete the transfer".into(),
        )));
        assert_eq!(slice.transfers.len(), 1);
        assert_eq!(slice.request.error.as_deref(), Some("Failed to delete the transfer"));

        slice.reduce(TransferAction::ClearError);
        assert!(slice.request.error.is_none());
    }

    #[test]
    fn test_filters_feed_query() {
        let mut slice = TransferSlice::default();
        slice.reduce(TransferAction::SetFilters(TransferFiltersPatch {
            search_term: Some(" XK00 ".into()),
            to_branch_id: Some(Some(4)),
            transfer_date_from: Some(NaiveDate::from_ymd_opt(2025, 3, 1)),
            status: Some(Some("COMPLETED".into())),
            ..Default::default()
        }));
        slice.reduce(TransferAction::SetPagination(ServerPaginationPatch {
            current_page: Some(2),
            page_size: None,
        }));

        let query = slice.query();
        assert_eq!(query.search_term.as_deref(), Some("XK00"));
        assert_eq!(query.to_branch_id, Some(4));
        assert_eq!(query.status.as_deref(), Some("COMPLETED"));
        assert_eq!(query.page, 2);
        assert_eq!(query.size, 10);

        slice.reduce(TransferAction::SetFilters(TransferFiltersPatch {
            to_branch_id: Some(None),
            ..Default::default()
        }));
        assert_eq!(slice.query().to_branch_id, None);
    }

    #[test]
    fn test_action_names() {
        assert_eq!(
            TransferAction::Delete(Lifecycle::Fulfilled(1)).name(),
            "stockTransfer/deleteStockTransfer/fulfilled"
        );
        assert_eq!(
            TransferAction::ClearTransferDetail.name(),
            "stockTransfer/clearTransferDetail"
        );
    }
}
