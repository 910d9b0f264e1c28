//! Voucher campaign modal.
//!
//! ## Tabs
//! ```text
//! ┌─ Campaign ─┬─ Vouchers ─┐
//! │ code, name │ quantity   │
//! │ discount   │ [Generate] │
//! │ date range │ list       │
//! └────────────┴────────────┘
//!
//! create ──► remember id ──► load vouchers ──► Vouchers tab (stays open)
//! update ──► close
//! ```

use retail_core::forms::{VoucherForm, VoucherTab};
use retail_core::types::{Voucher, VoucherCampaign};
use tracing::info;

use crate::commands::voucher;
use crate::error::{AdminError, AdminResult};
use crate::state::AppContext;

#[derive(Debug, Clone, PartialEq)]
pub struct VoucherModal {
    pub form: VoucherForm,
    pub open: bool,
    pub tab: VoucherTab,
    /// Set once the campaign exists on the server.
    pub campaign_id: Option<i64>,
    pub vouchers: Vec<Voucher>,
    /// How many vouchers the next Generate creates.
    pub quantity: u32,
    pub error: Option<String>,
}

impl Default for VoucherModal {
    fn default() -> Self {
        VoucherModal {
            form: VoucherForm::new(),
            open: false,
            tab: VoucherTab::Campaign,
            campaign_id: None,
            vouchers: Vec::new(),
            quantity: 1,
            error: None,
        }
    }
}

impl VoucherModal {
    pub fn open_create(&mut self) {
        *self = VoucherModal {
            open: true,
            ..Default::default()
        };
    }

    pub fn open_edit(&mut self, campaign: &VoucherCampaign) {
        *self = VoucherModal {
            form: VoucherForm::from_campaign(campaign),
            open: true,
            campaign_id: campaign.id,
            ..Default::default()
        };
    }

    /// Switching to the vouchers tab of a saved campaign loads its list.
    pub async fn select_tab(&mut self, ctx: &AppContext, tab: VoucherTab) -> AdminResult<()> {
        self.tab = tab;
        if let (VoucherTab::Vouchers, Some(id)) = (tab, self.campaign_id) {
            self.vouchers = self.record(voucher::vouchers_by_campaign(ctx, id).await)?;
        }
        Ok(())
    }

    /// Saves the campaign tab.
    ///
    /// A new campaign keeps the modal open on the vouchers tab; an edit
    /// closes it.
    pub async fn submit(&mut self, ctx: &AppContext) -> AdminResult<VoucherCampaign> {
        let creating = self.form.id.is_none();
        let saved = self.record(voucher::save_voucher(ctx, &self.form).await)?;

        if !creating {
            self.cancel();
            return Ok(saved);
        }

        let id = saved
            .id
            .ok_or_else(|| AdminError::validation("saved campaign has no id"))?;
        info!(campaign_id = id, "Campaign created, opening vouchers tab");
        self.campaign_id = Some(id);
        self.form.id = Some(id);
        self.vouchers = self.record(voucher::vouchers_by_campaign(ctx, id).await)?;
        self.tab = VoucherTab::Vouchers;
        Ok(saved)
    }

    /// Generates vouchers for the saved campaign, reloads the list and puts
    /// the quantity back to 1.
    pub async fn generate(&mut self, ctx: &AppContext) -> AdminResult<usize> {
        let Some(id) = self.campaign_id else {
            return self.record(Err(AdminError::validation(
                "Save the campaign before generating vouchers",
            )));
        };
        let quantity = self.quantity;
        self.vouchers = self.record(voucher::generate_vouchers(ctx, id, quantity).await)?;
        self.quantity = 1;
        info!(campaign_id = id, quantity, total = self.vouchers.len(), "Vouchers generated");
        Ok(self.vouchers.len())
    }

    /// Closes and resets every tab.
    pub fn cancel(&mut self) {
        *self = VoucherModal::default();
    }

    fn record<T>(&mut self, result: AdminResult<T>) -> AdminResult<T> {
        match &result {
            Ok(_) => self.error = None,
            Err(e) => self.error = Some(e.message.clone()),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_edit_remembers_campaign() {
        let mut modal = VoucherModal::default();
        modal.open_edit(&VoucherCampaign {
            id: Some(4),
            code: "TET2025".into(),
            name: "Tết".into(),
            ..Default::default()
        });
        assert!(modal.open);
        assert_eq!(modal.campaign_id, Some(4));
        assert_eq!(modal.tab, VoucherTab::Campaign);
        assert_eq!(modal.form.code, "TET2025");
    }

    #[test]
    fn test_cancel_resets_everything() {
        let mut modal = VoucherModal::default();
        modal.open_create();
        modal.campaign_id = Some(2);
        modal.quantity = 50;
        modal.tab = VoucherTab::Vouchers;
        modal.error = Some("x".into());

        modal.cancel();
        assert_eq!(modal, VoucherModal::default());
        assert_eq!(modal.quantity, 1);
    }
}
