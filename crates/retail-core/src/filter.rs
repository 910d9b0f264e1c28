//! # Local Filtering
//!
//! Search and status predicates for the screens that filter in memory
//! (categories, vouchers, branches, suppliers), plus [`FilteredList`], the
//! list-with-view container their slices are built on.
//!
//! ## Recompute Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items (owned, full list from the server)                               │
//! │      │                                                                  │
//! │      │ scan: matches_search(term) && status_filter.accepts(item)        │
//! │      ▼                                                                  │
//! │  filtered (recomputed on every items / term / status change)           │
//! │      │                                                                  │
//! │      │ paginate(page, page_size)                                        │
//! │      ▼                                                                  │
//! │  visible rows                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No index is kept. The lists are small enough that a full scan per
//! keystroke is fine.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::pagination::{page_window, paginate, total_pages, PageSummary};
use crate::types::{Branch, Category, Supplier, VoucherCampaign};

// =============================================================================
// Listable
// =============================================================================

/// An entity that can live in a [`FilteredList`].
pub trait Listable: Clone {
    /// Server id, `None` until saved.
    fn id(&self) -> Option<i64>;

    /// Text fields the search box matches against.
    fn search_fields(&self) -> Vec<Option<&str>>;

    /// Whether the entity counts as active for the status filter.
    fn is_active(&self) -> bool;
}

impl Listable for Category {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(&self.category_name), self.description.as_deref()]
    }

    fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

impl Listable for Branch {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(&self.name),
            self.address.as_deref(),
            self.email.as_deref(),
            self.phone_number.as_deref(),
        ]
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Listable for VoucherCampaign {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(&self.name),
            Some(&self.code),
            self.description.as_deref(),
        ]
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Listable for Supplier {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(&self.name),
            self.code.as_deref(),
            self.email.as_deref(),
            self.contact_number.as_deref(),
        ]
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Case-insensitive substring match over the entity's search fields.
///
/// A blank term matches everything.
pub fn matches_search<T: Listable>(item: &T, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

// =============================================================================
// Status Filter
// =============================================================================

/// The status dropdown of a list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn accepts<T: Listable>(&self, item: &T) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => item.is_active(),
            StatusFilter::Inactive => !item.is_active(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    /// Parses the dropdown value. The empty option means "all".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "inactive" => Ok(StatusFilter::Inactive),
            _ => Err(ValidationError::NotAllowed {
                field: "statusFilter".to_string(),
                allowed: vec![
                    "all".to_string(),
                    "active".to_string(),
                    "inactive".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Filtered List
// =============================================================================

/// A full entity list together with its filtered, paginated view.
///
/// The page index here is zero-based. Slices that show a one-based page
/// convert at their boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredList<T> {
    items: Vec<T>,
    filtered: Vec<T>,
    search_term: String,
    status_filter: StatusFilter,
    page: usize,
    page_size: usize,
}

impl<T: Listable> FilteredList<T> {
    pub fn new(page_size: usize) -> Self {
        FilteredList {
            items: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            status_filter: StatusFilter::All,
            page: 0,
            page_size,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn filtered(&self) -> &[T] {
        &self.filtered
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of rows that pass the filters.
    pub fn total(&self) -> usize {
        self.filtered.len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.page_size)
    }

    /// Rows of the current page.
    pub fn visible(&self) -> &[T] {
        paginate(&self.filtered, self.page, self.page_size)
    }

    /// Zero-based page numbers for the page-button row.
    pub fn window(&self) -> Vec<usize> {
        page_window(self.page, self.total_pages())
    }

    pub fn summary(&self) -> PageSummary {
        PageSummary::new(self.page, self.page_size, self.total())
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == Some(id))
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Replaces the full list. Filters and page are kept.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.recompute();
    }

    /// Changes the search term and returns to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 0;
        self.recompute();
    }

    /// Changes the status filter and returns to the first page.
    pub fn set_status(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
        self.page = 0;
        self.recompute();
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Changes the page size. A zero size is ignored.
    pub fn set_page_size(&mut self, size: usize) {
        if size > 0 {
            self.page_size = size;
        }
    }

    /// Replaces the entry with the same id, or appends the entity.
    pub fn upsert(&mut self, item: T) {
        let existing = item
            .id()
            .and_then(|id| self.items.iter().position(|e| e.id() == Some(id)));
        match existing {
            Some(index) => self.items[index] = item,
            None => self.items.push(item),
        }
        self.recompute();
    }

    /// Replaces the entry with the same id. Returns false when there is none.
    pub fn replace(&mut self, item: T) -> bool {
        let Some(id) = item.id() else {
            return false;
        };
        match self.items.iter().position(|e| e.id() == Some(id)) {
            Some(index) => {
                self.items[index] = item;
                self.recompute();
                true
            }
            None => false,
        }
    }

    /// Applies `f` to the entry with `id`. Returns false when there is none.
    pub fn update<F>(&mut self, id: i64, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self.items.iter_mut().find(|e| e.id() == Some(id)) {
            Some(item) => {
                f(item);
                self.recompute();
                true
            }
            None => false,
        }
    }

    fn recompute(&mut self) {
        let term = self.search_term.as_str();
        let status = self.status_filter;
        self.filtered = self
            .items
            .iter()
            .filter(|item| matches_search(*item, term) && status.accepts(*item))
            .cloned()
            .collect();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(id: i64, name: &str, active: bool) -> Branch {
        Branch {
            id: Some(id),
            name: name.to_string(),
            is_active: active,
            ..Default::default()
        }
    }

    fn category(id: i64, name: &str, description: Option<&str>, deleted: bool) -> Category {
        Category {
            id: Some(id),
            category_name: name.to_string(),
            description: description.map(str::to_string),
            is_deleted: deleted,
            ..Default::default()
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let b = Branch {
            email: Some("Store1@Shop.vn".into()),
            ..branch(1, "Chi nhánh Quận 1", true)
        };
        assert!(matches_search(&b, "quận"));
        assert!(matches_search(&b, "store1@shop"));
        assert!(matches_search(&b, ""));
        assert!(!matches_search(&b, "Hà Nội"));
    }

    #[test]
    fn test_category_matches_description() {
        let c = category(1, "Đồ uống", Some("Nước ngọt, bia"), false);
        assert!(matches_search(&c, "bia"));
        assert!(Listable::is_active(&c));
        assert!(!Listable::is_active(&category(2, "Cũ", None, true)));
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("Active".parse::<StatusFilter>().unwrap(), StatusFilter::Active);
        assert_eq!("inactive".parse::<StatusFilter>().unwrap(), StatusFilter::Inactive);
        assert!("archived".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut list = FilteredList::new(2);
        list.replace_all(vec![
            branch(1, "A", true),
            branch(2, "B", false),
            branch(3, "C", true),
            branch(4, "D", true),
        ]);
        list.set_page(1);
        assert_eq!(list.visible().len(), 2);

        list.set_status(StatusFilter::Active);
        assert_eq!(list.page(), 0);
        assert_eq!(list.total(), 3);

        list.set_page(1);
        list.set_search("d");
        assert_eq!(list.page(), 0);
        assert_eq!(list.filtered().len(), 1);
        assert_eq!(list.filtered()[0].id, Some(4));
    }

    #[test]
    fn test_upsert_replaces_or_appends() {
        let mut list = FilteredList::new(10);
        list.replace_all(vec![branch(1, "A", true)]);

        list.upsert(branch(1, "A2", true));
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].name, "A2");

        list.upsert(branch(2, "B", true));
        assert_eq!(list.items().len(), 2);
        assert_eq!(list.total(), 2);
    }

    #[test]
    fn test_upsert_respects_active_filters() {
        let mut list = FilteredList::new(10);
        list.set_status(StatusFilter::Active);
        list.upsert(branch(1, "A", false));
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.total(), 0);
    }

    #[test]
    fn test_replace_and_update_missing_id() {
        let mut list = FilteredList::new(10);
        list.replace_all(vec![branch(1, "A", true)]);
        assert!(!list.replace(branch(9, "X", true)));
        assert!(!list.update(9, |b| b.is_active = false));
        assert!(list.update(1, |b| b.is_active = false));
        assert!(!list.items()[0].is_active);
    }

    #[test]
    fn test_summary_and_window() {
        let mut list = FilteredList::new(10);
        list.replace_all((1..=23).map(|i| branch(i, "B", true)).collect());
        list.set_page(2);
        assert_eq!(list.summary().to_string(), "Showing 21 to 23 of 23");
        assert_eq!(list.window(), vec![0, 1, 2]);
    }
}
