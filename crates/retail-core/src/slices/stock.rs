//! Stock management slice. Server paginated; every filter change re-fetches.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{type_name, Lifecycle, RequestState, ServerPagination, ServerPaginationPatch};
use crate::types::{Page, SortDirection, StockQuery, StockRow, StockStatusFilter};

const SLICE: &str = "stock";

/// Filter bar of the stock screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockFilters {
    pub search_term: String,
    pub category_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub warehouse_id: Option<i64>,
    pub stock_status: StockStatusFilter,
    pub sort_by: String,
    pub sort_direction: SortDirection,
}

impl Default for StockFilters {
    fn default() -> Self {
        StockFilters {
            search_term: String::new(),
            category_id: None,
            branch_id: None,
            warehouse_id: None,
            stock_status: StockStatusFilter::All,
            sort_by: "productName".to_string(),
            sort_direction: SortDirection::Asc,
        }
    }
}

/// Partial filter update. `None` keeps the current value; the id fields use
/// `Some(None)` to clear a selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StockFiltersPatch {
    pub search_term: Option<String>,
    pub category_id: Option<Option<i64>>,
    pub branch_id: Option<Option<i64>>,
    pub warehouse_id: Option<Option<i64>>,
    pub stock_status: Option<StockStatusFilter>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
}

/// Stock pagination; `current_page` is zero-based and the size defaults to 20.
pub type StockPagination = ServerPagination;
pub type StockPaginationPatch = ServerPaginationPatch;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSlice {
    pub rows: Vec<StockRow>,
    #[serde(flatten)]
    pub request: RequestState,
    pub pagination: StockPagination,
    pub filters: StockFilters,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StockAction {
    Fetch(Lifecycle<Page<StockRow>>),
    SetFilters(StockFiltersPatch),
    SetPagination(StockPaginationPatch),
    ClearError,
    ResetFilters,
}

impl StockAction {
    pub fn name(&self) -> String {
        match self {
            StockAction::Fetch(p) => type_name(SLICE, "fetchStockOverview", p),
            StockAction::SetFilters(_) => format!("{}/setFilters", SLICE),
            StockAction::SetPagination(_) => format!("{}/setPagination", SLICE),
            StockAction::ClearError => format!("{}/clearError", SLICE),
            StockAction::ResetFilters => format!("{}/resetFilters", SLICE),
        }
    }
}

impl StockSlice {
    pub fn reduce(&mut self, action: StockAction) {
        match action {
            StockAction::Fetch(phase) => {
                if let Some(page) = self.request.apply(phase) {
                    self.pagination.follow(&page);
                    self.rows = page.content;
                }
            }
            StockAction::SetFilters(patch) => {
                let f = &mut self.filters;
                if let Some(term) = patch.search_term {
                    f.search_term = term;
                }
                if let Some(id) = patch.category_id {
                    f.category_id = id;
                }
                if let Some(id) = patch.branch_id {
                    f.branch_id = id;
                }
                if let Some(id) = patch.warehouse_id {
                    f.warehouse_id = id;
                }
                if let Some(status) = patch.stock_status {
                    f.stock_status = status;
                }
                if let Some(sort_by) = patch.sort_by {
                    f.sort_by = sort_by;
                }
                if let Some(dir) = patch.sort_direction {
                    f.sort_direction = dir;
                }
            }
            StockAction::SetPagination(patch) => self.pagination.patch(patch),
            StockAction::ClearError => self.request.clear_error(),
            StockAction::ResetFilters => {
                self.filters = StockFilters::default();
                self.pagination = StockPagination::default();
            }
        }
    }

    /// The query for the current filters and page.
    pub fn query(&self) -> StockQuery {
        let term = self.filters.search_term.trim();
        StockQuery {
            search_term: (!term.is_empty()).then(|| term.to_string()),
            category_id: self.filters.category_id,
            branch_id: self.filters.branch_id,
            warehouse_id: self.filters.warehouse_id,
            stock_status: self.filters.stock_status,
            page: self.pagination.current_page,
            size: self.pagination.page_size,
            sort_by: self.filters.sort_by.clone(),
            sort_direction: self.filters.sort_direction,
        }
    }

    /// Rows flagged low or out of stock on the current page.
    pub fn attention_count(&self) -> usize {
        self.rows.iter().filter(|r| r.needs_attention()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StockStatus;

    fn row(id: i64, status: StockStatus) -> StockRow {
        StockRow {
            product_id: id,
            product_code: None,
            product_name: format!("P{}", id),
            category_name: None,
            image_url: None,
            retail_price: None,
            unit: None,
            branch_id: None,
            branch_name: None,
            warehouse_id: None,
            warehouse_name: None,
            on_hand: 5,
            reserved: 0,
            available: 5,
            min_threshold: None,
            last_updated: None,
            stock_status: status,
        }
    }

    #[test]
    fn test_default_query_matches_backend_defaults() {
        let slice = StockSlice::default();
        assert_eq!(slice.query(), StockQuery::default());
    }

    #[test]
    fn test_fetch_maps_page() {
        let mut slice = StockSlice::default();
        slice.reduce(StockAction::Fetch(Lifecycle::Pending));
        slice.reduce(StockAction::Fetch(Lifecycle::Fulfilled(Page {
            content: vec![row(1, StockStatus::Normal), row(2, StockStatus::OutOfStock)],
            number: 1,
            size: 20,
            total_elements: 22,
            total_pages: 2,
            first: false,
            last: true,
        })));
        assert_eq!(slice.rows.len(), 2);
        assert_eq!(
            slice.pagination,
            StockPagination {
                current_page: 1,
                page_size: 20,
                total_elements: 22,
                total_pages: 2,
            }
        );
        assert_eq!(slice.attention_count(), 1);
    }

    #[test]
    fn test_set_filters_merges() {
        let mut slice = StockSlice::default();
        slice.reduce(StockAction::SetFilters(StockFiltersPatch {
            search_term: Some("  sữa ".into()),
            branch_id: Some(Some(2)),
            stock_status: Some(StockStatusFilter::LowStock),
            ..Default::default()
        }));
        slice.reduce(StockAction::SetFilters(StockFiltersPatch {
            sort_direction: Some(SortDirection::Desc),
            ..Default::default()
        }));

        let query = slice.query();
        assert_eq!(query.search_term.as_deref(), Some("sữa"));
        assert_eq!(query.branch_id, Some(2));
        assert_eq!(query.stock_status, StockStatusFilter::LowStock);
        assert_eq!(query.sort_direction, SortDirection::Desc);
        assert_eq!(query.sort_by, "productName");
    }

    #[test]
    fn test_reset_filters_resets_pagination() {
        let mut slice = StockSlice::default();
        slice.reduce(StockAction::SetPagination(StockPaginationPatch {
            current_page: Some(4),
            page_size: Some(50),
        }));
        slice.reduce(StockAction::SetFilters(StockFiltersPatch {
            warehouse_id: Some(Some(9)),
            ..Default::default()
        }));
        slice.reduce(StockAction::ResetFilters);
        assert_eq!(slice.filters, StockFilters::default());
        assert_eq!(slice.pagination, StockPagination::default());
    }

    #[test]
    fn test_rejection_keeps_rows() {
        let mut slice = StockSlice {
            rows: vec![row(1, StockStatus::Normal)],
            ..Default::default()
        };
        slice.reduce(StockAction::Fetch(Lifecycle::Rejected("Something went wrong".into())));
        assert_eq!(slice.rows.len(), 1);
        assert_eq!(slice.request.error.as_deref(), Some("Something went wrong"));
    }
}
