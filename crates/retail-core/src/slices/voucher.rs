//! Voucher campaign slice.
//!
//! Only campaigns live here. The vouchers generated from a campaign are
//! loaded by the voucher modal and kept in its own state.

use serde::{Deserialize, Serialize};

use super::{
    list_pagination, patch_list, type_name, Lifecycle, ListPagination, ListPaginationPatch,
    RequestState,
};
use crate::filter::{FilteredList, StatusFilter};
use crate::types::VoucherCampaign;
use crate::LIST_PAGE_SIZE;

const SLICE: &str = "vouchers";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherSlice {
    pub list: FilteredList<VoucherCampaign>,
    pub current_voucher: Option<VoucherCampaign>,
    #[serde(flatten)]
    pub request: RequestState,
}

impl Default for VoucherSlice {
    fn default() -> Self {
        VoucherSlice {
            list: FilteredList::new(LIST_PAGE_SIZE),
            current_voucher: None,
            request: RequestState::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VoucherAction {
    FetchAll(Lifecycle<Vec<VoucherCampaign>>),
    FetchById(Lifecycle<VoucherCampaign>),
    Upsert(Lifecycle<VoucherCampaign>),
    /// Upsert with `is_active` inverted; the payload is the campaign sent.
    ToggleStatus(Lifecycle<VoucherCampaign>),
    SetSearchTerm(String),
    SetStatusFilter(StatusFilter),
    SetPagination(ListPaginationPatch),
    ClearError,
    ClearCurrentVoucher,
}

impl VoucherAction {
    pub fn name(&self) -> String {
        match self {
            VoucherAction::FetchAll(p) => type_name(SLICE, "fetchAll", p),
            VoucherAction::FetchById(p) => type_name(SLICE, "fetchById", p),
            VoucherAction::Upsert(p) => type_name(SLICE, "upsert", p),
            VoucherAction::ToggleStatus(p) => type_name(SLICE, "toggleStatus", p),
            VoucherAction::SetSearchTerm(_) => format!("{}/setSearchTerm", SLICE),
            VoucherAction::SetStatusFilter(_) => format!("{}/setStatusFilter", SLICE),
            VoucherAction::SetPagination(_) => format!("{}/setPagination", SLICE),
            VoucherAction::ClearError => format!("{}/clearError", SLICE),
            VoucherAction::ClearCurrentVoucher => format!("{}/clearCurrentVoucher", SLICE),
        }
    }
}

impl VoucherSlice {
    pub fn reduce(&mut self, action: VoucherAction) {
        match action {
            VoucherAction::FetchAll(phase) => {
                if let Some(campaigns) = self.request.apply(phase) {
                    self.list.replace_all(campaigns);
                }
            }
            VoucherAction::FetchById(phase) => {
                if let Some(campaign) = self.request.apply(phase) {
                    self.current_voucher = Some(campaign);
                }
            }
            VoucherAction::Upsert(phase) => {
                if let Some(campaign) = self.request.apply(phase) {
                    if self.current_voucher.as_ref().map(|c| c.id) == Some(campaign.id) {
                        self.current_voucher = Some(campaign.clone());
                    }
                    self.list.upsert(campaign);
                }
            }
            VoucherAction::ToggleStatus(phase) => {
                if let Some(campaign) = self.request.apply(phase) {
                    self.list.upsert(campaign);
                }
            }
            VoucherAction::SetSearchTerm(term) => self.list.set_search(term),
            VoucherAction::SetStatusFilter(filter) => self.list.set_status(filter),
            VoucherAction::SetPagination(patch) => patch_list(&mut self.list, patch),
            VoucherAction::ClearError => self.request.clear_error(),
            VoucherAction::ClearCurrentVoucher => self.current_voucher = None,
        }
    }

    pub fn pagination(&self) -> ListPagination {
        list_pagination(&self.list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(id: i64, code: &str, active: bool) -> VoucherCampaign {
        VoucherCampaign {
            id: Some(id),
            code: code.to_string(),
            name: format!("Campaign {}", code),
            is_active: active,
            ..Default::default()
        }
    }

    fn loaded() -> VoucherSlice {
        let mut slice = VoucherSlice::default();
        slice.reduce(VoucherAction::FetchAll(Lifecycle::Fulfilled(vec![
            campaign(1, "TET2025", true),
            campaign(2, "SUMMER", false),
            campaign(3, "BLACKFRIDAY", true),
        ])));
        slice
    }

    #[test]
    fn test_search_by_code() {
        let mut slice = loaded();
        slice.reduce(VoucherAction::SetSearchTerm("tet".into()));
        assert_eq!(slice.pagination().total, 1);
        assert_eq!(slice.list.visible()[0].id, Some(1));
    }

    #[test]
    fn test_inactive_filter() {
        let mut slice = loaded();
        slice.reduce(VoucherAction::SetStatusFilter(StatusFilter::Inactive));
        assert_eq!(slice.list.total(), 1);
        assert_eq!(slice.list.filtered()[0].code, "SUMMER");
    }

    #[test]
    fn test_upsert_new_campaign_is_appended() {
        let mut slice = loaded();
        slice.reduce(VoucherAction::Upsert(Lifecycle::Pending));
        assert!(slice.request.is_loading());
        slice.reduce(VoucherAction::Upsert(Lifecycle::Fulfilled(campaign(4, "NEW", true))));
        assert_eq!(slice.list.items().len(), 4);
        assert_eq!(slice.pagination().total, 4);
    }

    #[test]
    fn test_upsert_refreshes_current() {
        let mut slice = loaded();
        slice.reduce(VoucherAction::FetchById(Lifecycle::Fulfilled(campaign(2, "SUMMER", false))));
        slice.reduce(VoucherAction::Upsert(Lifecycle::Fulfilled(VoucherCampaign {
            name: "Summer sale".into(),
            ..campaign(2, "SUMMER", false)
        })));
        assert_eq!(slice.current_voucher.as_ref().unwrap().name, "Summer sale");

        slice.reduce(VoucherAction::ClearCurrentVoucher);
        assert!(slice.current_voucher.is_none());
    }

    #[test]
    fn test_toggle_flips_active() {
        let mut slice = loaded();
        slice.reduce(VoucherAction::ToggleStatus(Lifecycle::Fulfilled(campaign(
            2, "SUMMER", true,
        ))));
        assert!(slice.list.get(2).unwrap().is_active);
    }
}
