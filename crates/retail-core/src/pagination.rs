//! # Pagination
//!
//! Page math shared by the server-paginated and the locally paginated screens.
//!
//! ## Two Page Bases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Server pages (products, stock)      Local pages (category list)        │
//! │  zero-based `number`                 zero-based `current_page`          │
//! │                                                                         │
//! │  Branch / voucher / supplier slices expose a ONE-based current page     │
//! │  and convert at the edge with `zero_based(page)`.                       │
//! │                                                                         │
//! │  Visible slice:  items[p*s .. min(p*s + s, len)]                        │
//! │  Page count:     ceil(len / s)                                          │
//! │  Button window:  at most 5 page numbers around the current page         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::types::{Page, SortDirection};
use crate::{LIST_PAGE_SIZE, PAGE_WINDOW};

// =============================================================================
// Page Math
// =============================================================================

/// Number of pages needed to show `total` items, `size` at a time.
///
/// A zero page size yields zero pages.
pub fn total_pages(total: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size)
}

/// The items visible on zero-based `page`. Out-of-range pages are empty.
pub fn paginate<T>(items: &[T], page: usize, size: usize) -> &[T] {
    let start = page.saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

/// Converts a one-based page to a zero-based one. Page 0 is treated as page 1.
pub fn zero_based(page: usize) -> usize {
    page.saturating_sub(1)
}

/// Zero-based page numbers for the page-button row.
///
/// At most [`PAGE_WINDOW`] buttons are shown:
///
/// ```text
/// total <= 5 or current < 3     →  0, 1, 2, 3, 4
/// current >= total - 2          →  total-5 .. total-1
/// otherwise                     →  current-2 .. current+2
/// ```
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    let count = PAGE_WINDOW.min(total);
    let first = if total <= PAGE_WINDOW || current < 3 {
        0
    } else if current + 2 >= total {
        total - PAGE_WINDOW
    } else {
        current - 2
    };
    (first..first + count).collect()
}

/// Builds a server-style page out of a full list.
///
/// Used when the paged product endpoint is unavailable and the unpaged list
/// is cut client-side.
pub fn slice_page<T: Clone>(all: &[T], page: usize, size: usize) -> Page<T> {
    let pages = total_pages(all.len(), size);
    Page {
        content: paginate(all, page, size).to_vec(),
        number: page,
        size,
        total_elements: all.len(),
        total_pages: pages,
        first: page == 0,
        last: page + 1 >= pages,
    }
}

// =============================================================================
// Summary Line
// =============================================================================

/// The "showing X to Y of Z" line under a locally paginated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PageSummary {
    /// One-based index of the first visible row.
    pub from: usize,
    /// One-based index of the last visible row.
    pub to: usize,
    pub total: usize,
}

impl PageSummary {
    /// Summary for zero-based `page` of `size` rows out of `total`.
    pub fn new(page: usize, size: usize, total: usize) -> Self {
        let start = page * size;
        let end = start + size;
        PageSummary {
            from: start + 1,
            to: end.min(total),
            total,
        }
    }
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} to {} of {}", self.from, self.to, self.total)
    }
}

// =============================================================================
// Server Page Request
// =============================================================================

/// Page, size and sort forwarded to the paginated endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: usize,
    pub size: usize,
    pub sort_by: String,
    pub sort_dir: SortDirection,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 0,
            size: LIST_PAGE_SIZE,
            sort_by: "name".to_string(),
            sort_dir: SortDirection::Asc,
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        PageRequest {
            page,
            size,
            ..Default::default()
        }
    }

    pub fn sorted(mut self, sort_by: impl Into<String>, sort_dir: SortDirection) -> Self {
        self.sort_by = sort_by.into();
        self.sort_dir = sort_dir;
        self
    }

    /// Query pairs: `page`, `size`, `sortBy`, `sortDir`.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sortBy", self.sort_by.clone()),
            ("sortDir", self.sort_dir.lowercase().to_string()),
        ]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
