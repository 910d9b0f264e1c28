//! Branch slice.
//!
//! The whole branch list is fetched once; search, status filter and
//! pagination then run in memory through [`FilteredList`].

use serde::{Deserialize, Serialize};

use super::{
    list_pagination, patch_list, type_name, Lifecycle, ListPagination, ListPaginationPatch,
    RequestState,
};
use crate::filter::{FilteredList, StatusFilter};
use crate::types::Branch;
use crate::LIST_PAGE_SIZE;

const SLICE: &str = "branches";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSlice {
    pub list: FilteredList<Branch>,
    pub current_branch: Option<Branch>,
    #[serde(flatten)]
    pub request: RequestState,
}

impl Default for BranchSlice {
    fn default() -> Self {
        BranchSlice {
            list: FilteredList::new(LIST_PAGE_SIZE),
            current_branch: None,
            request: RequestState::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BranchAction {
    FetchAll(Lifecycle<Vec<Branch>>),
    FetchById(Lifecycle<Branch>),
    Upsert(Lifecycle<Branch>),
    /// A status toggle is an upsert with `is_active` inverted; the payload is
    /// the branch that was sent.
    ToggleStatus(Lifecycle<Branch>),
    SetSearchTerm(String),
    SetStatusFilter(StatusFilter),
    SetPagination(ListPaginationPatch),
    ClearError,
    ClearCurrentBranch,
}

impl BranchAction {
    pub fn name(&self) -> String {
        match self {
            BranchAction::FetchAll(p) => type_name(SLICE, "fetchAll", p),
            BranchAction::FetchById(p) => type_name(SLICE, "fetchById", p),
            BranchAction::Upsert(p) => type_name(SLICE, "upsert", p),
            BranchAction::ToggleStatus(p) => type_name(SLICE, "toggleStatus", p),
            BranchAction::SetSearchTerm(_) => format!("{}/setSearchTerm", SLICE),
            BranchAction::SetStatusFilter(_) => format!("{}/setStatusFilter", SLICE),
            BranchAction::SetPagination(_) => format!("{}/setPagination", SLICE),
            BranchAction::ClearError => format!("{}/clearError", SLICE),
            BranchAction::ClearCurrentBranch => format!("{}/clearCurrentBranch", SLICE),
        }
    }
}

impl BranchSlice {
    pub fn reduce(&mut self, action: BranchAction) {
        match action {
            BranchAction::FetchAll(phase) => {
                if let Some(branches) = self.request.apply(phase) {
                    self.list.replace_all(branches);
                }
            }
            BranchAction::FetchById(phase) => {
                if let Some(branch) = self.request.apply(phase) {
                    self.current_branch = Some(branch);
                }
            }
            BranchAction::Upsert(phase) | BranchAction::ToggleStatus(phase) => {
                if let Some(branch) = self.request.apply(phase) {
                    self.list.upsert(branch);
                }
            }
            BranchAction::SetSearchTerm(term) => self.list.set_search(term),
            BranchAction::SetStatusFilter(filter) => self.list.set_status(filter),
            BranchAction::SetPagination(patch) => patch_list(&mut self.list, patch),
            BranchAction::ClearError => self.request.clear_error(),
            BranchAction::ClearCurrentBranch => self.current_branch = None,
        }
    }

    pub fn pagination(&self) -> ListPagination {
        list_pagination(&self.list)
    }

    /// Active branches, for branch selects in other forms.
    pub fn active(&self) -> impl Iterator<Item = &Branch> {
        self.list.items().iter().filter(|b| b.is_active)
    }
}
