//! Category slice: the flat list behind the category table, plus the tree.

use serde::{Deserialize, Serialize};

use super::{type_name, Lifecycle, RequestState};
use crate::filter::{FilteredList, StatusFilter};
use crate::types::{Category, CategoryTreeNode};
use crate::LIST_PAGE_SIZE;

const SLICE: &str = "categories";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySlice {
    pub list: FilteredList<Category>,
    pub category_tree: Vec<CategoryTreeNode>,
    #[serde(flatten)]
    pub request: RequestState,
}

impl Default for CategorySlice {
    fn default() -> Self {
        CategorySlice {
            list: FilteredList::new(LIST_PAGE_SIZE),
            category_tree: Vec::new(),
            request: RequestState::default(),
        }
    }
}

/// New deleted flag of a category after a status toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryToggled {
    pub id: i64,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryAction {
    FetchAll(Lifecycle<Vec<Category>>),
    FetchTree(Lifecycle<Vec<CategoryTreeNode>>),
    /// Payload: the saved category as returned by the server.
    Upsert(Lifecycle<Category>),
    ToggleStatus(Lifecycle<CategoryToggled>),
    /// Payload: id of the soft-deleted category.
    Delete(Lifecycle<i64>),
    SetSearch(String),
    SetStatusFilter(StatusFilter),
    /// Zero-based.
    SetPage(usize),
    ClearError,
}

impl CategoryAction {
    pub fn name(&self) -> String {
        match self {
            CategoryAction::FetchAll(p) => type_name(SLICE, "fetchAll", p),
            CategoryAction::FetchTree(p) => type_name(SLICE, "fetchTree", p),
            CategoryAction::Upsert(p) => type_name(SLICE, "upsert", p),
            CategoryAction::ToggleStatus(p) => type_name(SLICE, "toggleStatus", p),
            CategoryAction::Delete(p) => type_name(SLICE, "delete", p),
            CategoryAction::SetSearch(_) => format!("{}/setSearch", SLICE),
            CategoryAction::SetStatusFilter(_) => format!("{}/setStatusFilter", SLICE),
            CategoryAction::SetPage(_) => format!("{}/setPage", SLICE),
            CategoryAction::ClearError => format!("{}/clearError", SLICE),
        }
    }
}

impl CategorySlice {
    pub fn reduce(&mut self, action: CategoryAction) {
        match action {
            CategoryAction::FetchAll(phase) => {
                if let Some(categories) = self.request.apply(phase) {
                    self.list.replace_all(categories);
                }
            }
            CategoryAction::FetchTree(phase) => {
                if let Some(tree) = self.request.apply(phase) {
                    self.category_tree = tree;
                }
            }
            CategoryAction::Upsert(phase) => {
                if let Some(category) = self.request.apply(phase) {
                    self.list.upsert(category);
                }
            }
            CategoryAction::ToggleStatus(phase) => {
                if let Some(toggled) = self.request.apply(phase) {
                    self.list
                        .update(toggled.id, |c| c.is_deleted = toggled.is_deleted);
                }
            }
            CategoryAction::Delete(phase) => {
                if let Some(id) = self.request.apply(phase) {
                    self.list.update(id, |c| c.is_deleted = true);
                }
            }
            CategoryAction::SetSearch(term) => self.list.set_search(term),
            CategoryAction::SetStatusFilter(filter) => self.list.set_status(filter),
            CategoryAction::SetPage(page) => self.list.set_page(page),
            CategoryAction::ClearError => self.request.clear_error(),
        }
    }

    /// Active categories, for the product form's category select.
    pub fn active(&self) -> impl Iterator<Item = &Category> {
        self.list.items().iter().filter(|c| !c.is_deleted)
    }
}
