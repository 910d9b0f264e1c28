//! What a list page shows for its slice's request state.

use retail_core::filter::{FilteredList, Listable};
use retail_core::pagination::{page_window, PageSummary};
use retail_core::slices::product::ProductPagination;
use retail_core::slices::{LoadStatus, RequestState};
use serde::Serialize;

/// The body of a list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "camelCase")]
pub enum ListView {
    Spinner,
    /// Dismissible. Dismissing dispatches the slice's `ClearError`.
    Alert(String),
    Table,
}

impl ListView {
    /// Loading wins over everything; an error message shows until cleared.
    pub fn of(request: &RequestState) -> Self {
        if request.status == LoadStatus::Loading {
            return ListView::Spinner;
        }
        match &request.error {
            Some(message) => ListView::Alert(message.clone()),
            None => ListView::Table,
        }
    }
}

/// Footer under a table: page buttons and the summary line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    /// Zero-based.
    pub current: usize,
    pub total_pages: usize,
    /// Zero-based page numbers, at most five.
    pub buttons: Vec<usize>,
    pub summary: String,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PaginationView {
    /// Footer for a list paginated in memory.
    pub fn local<T: Listable>(list: &FilteredList<T>) -> Self {
        let current = list.page();
        let total_pages = list.total_pages();
        PaginationView {
            current,
            total_pages,
            buttons: list.window(),
            summary: list.summary().to_string(),
            has_previous: current > 0,
            has_next: current + 1 < total_pages,
        }
    }

    /// Footer for the server-paginated product table.
    pub fn server(pagination: &ProductPagination) -> Self {
        PaginationView {
            current: pagination.page,
            total_pages: pagination.total_pages,
            buttons: page_window(pagination.page, pagination.total_pages),
            summary: PageSummary::new(pagination.page, pagination.size, pagination.total)
                .to_string(),
            has_previous: pagination.has_previous,
            has_next: pagination.has_next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retail_core::slices::Lifecycle;
    use retail_core::types::Branch;

    #[test]
    fn test_list_view_follows_request() {
        let mut request = RequestState::default();
        assert_eq!(ListView::of(&request), ListView::Table);

        request.apply::<()>(Lifecycle::Pending);
        assert_eq!(ListView::of(&request), ListView::Spinner);

        request.apply::<()>(Lifecycle::Rejected("Có lỗi xảy ra".into()));
        assert_eq!(ListView::of(&request), ListView::Alert("Có lỗi xảy ra".into()));

        request.clear_error();
        assert_eq!(ListView::of(&request), ListView::Table);
    }

    #[test]
    fn test_local_pagination_footer() {
        let mut list: FilteredList<Branch> = FilteredList::new(10);
        list.replace_all(
            (1..=23)
                .map(|i| Branch {
                    id: Some(i),
                    name: format!("Chi nhánh {}", i),
                    is_active: true,
                    ..Default::default()
                })
                .collect(),
        );
        list.set_page(2);

        let footer = PaginationView::local(&list);
        assert_eq!(footer.total_pages, 3);
        assert_eq!(footer.buttons, vec![0, 1, 2]);
        assert_eq!(footer.summary, "Showing 21 to 23 of 23");
        assert!(footer.has_previous);
        assert!(!footer.has_next);
    }

    #[test]
    fn test_server_pagination_footer() {
        let footer = PaginationView::server(&ProductPagination {
            page: 7,
            size: 10,
            total: 95,
            total_pages: 10,
            has_next: true,
            has_previous: true,
        });
        assert_eq!(footer.buttons, vec![5, 6, 7, 8, 9]);
        assert_eq!(footer.summary, "Showing 71 to 80 of 95");
    }
}
