//! Supplier slice.

use serde::{Deserialize, Serialize};

use super::{
    list_pagination, patch_list, type_name, Lifecycle, ListPagination, ListPaginationPatch,
    RequestState,
};
use crate::filter::{FilteredList, StatusFilter};
use crate::types::Supplier;
use crate::LIST_PAGE_SIZE;

const SLICE: &str = "suppliers";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierSlice {
    pub list: FilteredList<Supplier>,
    pub current_supplier: Option<Supplier>,
    #[serde(flatten)]
    pub request: RequestState,
}

impl Default for SupplierSlice {
    fn default() -> Self {
        SupplierSlice {
            list: FilteredList::new(LIST_PAGE_SIZE),
            current_supplier: None,
            request: RequestState::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SupplierAction {
    FetchAll(Lifecycle<Vec<Supplier>>),
    FetchById(Lifecycle<Supplier>),
    Upsert(Lifecycle<Supplier>),
    /// Payload: the supplier returned by `/suppliers/{id}/toggle-status`.
    ToggleStatus(Lifecycle<Supplier>),
    SetSearchTerm(String),
    SetStatusFilter(StatusFilter),
    SetPagination(ListPaginationPatch),
    ClearError,
    ClearCurrentSupplier,
}

impl SupplierAction {
    pub fn name(&self) -> String {
        match self {
            SupplierAction::FetchAll(p) => type_name(SLICE, "fetchAll", p),
            SupplierAction::FetchById(p) => type_name(SLICE, "fetchById", p),
            SupplierAction::Upsert(p) => type_name(SLICE, "upsert", p),
            SupplierAction::ToggleStatus(p) => type_name(SLICE, "toggleStatus", p),
            SupplierAction::SetSearchTerm(_) => format!("{}/setSearchTerm", SLICE),
            SupplierAction::SetStatusFilter(_) => format!("{}/setStatusFilter", SLICE),
            SupplierAction::SetPagination(_) => format!("{}/setPagination", SLICE),
            SupplierAction::ClearError => format!("{}/clearError", SLICE),
            SupplierAction::ClearCurrentSupplier => format!("{}/clearCurrentSupplier", SLICE),
        }
    }
}

impl SupplierSlice {
    pub fn reduce(&mut self, action: SupplierAction) {
        match action {
            SupplierAction::FetchAll(phase) => {
                if let Some(suppliers) = self.request.apply(phase) {
                    self.list.replace_all(suppliers);
                }
            }
            SupplierAction::FetchById(phase) => {
                if let Some(supplier) = self.request.apply(phase) {
                    self.current_supplier = Some(supplier);
                }
            }
            SupplierAction::Upsert(phase) => {
                if let Some(supplier) = self.request.apply(phase) {
                    self.list.upsert(supplier);
                }
            }
            SupplierAction::ToggleStatus(phase) => {
                if let Some(supplier) = self.request.apply(phase) {
                    // server copy wins; an unknown id is ignored
                    self.list.replace(supplier);
                }
            }
            SupplierAction::SetSearchTerm(term) => self.list.set_search(term),
            SupplierAction::SetStatusFilter(filter) => self.list.set_status(filter),
            SupplierAction::SetPagination(patch) => patch_list(&mut self.list, patch),
            SupplierAction::ClearError => self.request.clear_error(),
            SupplierAction::ClearCurrentSupplier => self.current_supplier = None,
        }
    }

    pub fn pagination(&self) -> ListPagination {
        list_pagination(&self.list)
    }
}
