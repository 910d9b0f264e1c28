//! Voucher campaign form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{collect, non_blank, FormErrors};
use crate::error::ValidationError;
use crate::types::{DiscountType, VoucherCampaign};
use crate::validation::{
    validate_code, validate_description, validate_name, validate_non_negative, validate_price,
    validate_required,
};

/// The two tabs of the voucher modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum VoucherTab {
    #[default]
    Campaign,
    Vouchers,
}

/// State of the campaign tab.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoucherForm {
    /// Set when editing an existing campaign.
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
    pub description: String,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<f64>,
    pub min_order_value: Option<f64>,
    pub max_discount_value: Option<f64>,
    pub quantity: Option<i32>,
    pub is_unlimited: bool,
    pub is_auto_generate: bool,
    /// Not shown in the form; carried over so an edit does not flip it.
    pub is_active: bool,
    pub branch_id: Option<i64>,
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl VoucherForm {
    pub fn new() -> Self {
        VoucherForm {
            is_active: true,
            ..Default::default()
        }
    }

    /// Pre-fills the form. The date range is only set when both ends exist.
    pub fn from_campaign(campaign: &VoucherCampaign) -> Self {
        let date_range = match (campaign.start_date, campaign.end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        };
        VoucherForm {
            id: campaign.id,
            code: campaign.code.clone(),
            name: campaign.name.clone(),
            description: campaign.description.clone().unwrap_or_default(),
            discount_type: Some(campaign.discount_type),
            discount_value: Some(campaign.discount_value),
            min_order_value: campaign.min_order_value,
            max_discount_value: campaign.max_discount_value,
            quantity: campaign.quantity,
            is_unlimited: campaign.is_unlimited,
            is_auto_generate: campaign.is_auto_generate,
            is_active: campaign.is_active,
            branch_id: campaign.branch_id,
            date_range,
        }
    }

    /// Required: code, name, discount type, a non-negative discount value and
    /// the date range.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut checks = vec![
            validate_required("code", &self.code),
            validate_code("code", &self.code),
            validate_name("name", &self.name),
            validate_description("description", &self.description),
        ];

        if self.discount_type.is_none() {
            checks.push(Err(ValidationError::Required {
                field: "discountType".to_string(),
            }));
        }

        match self.discount_value {
            None => checks.push(Err(ValidationError::Required {
                field: "discountValue".to_string(),
            })),
            Some(value) => checks.push(validate_non_negative("discountValue", value)),
        }

        if let Some(min) = self.min_order_value {
            checks.push(validate_price("minOrderValue", min));
        }

        match self.date_range {
            None => checks.push(Err(ValidationError::Required {
                field: "dateRange".to_string(),
            })),
            Some((start, end)) if end < start => {
                checks.push(Err(ValidationError::InvertedRange {
                    field: "dateRange".to_string(),
                }))
            }
            Some(_) => {}
        }

        collect(checks)
    }

    /// Upsert payload. The date range becomes `startDate` / `endDate`.
    pub fn to_payload(&self, created_by: &str) -> VoucherCampaign {
        let (start_date, end_date) = match self.date_range {
            Some((start, end)) => (Some(start), Some(end)),
            None => (None, None),
        };
        VoucherCampaign {
            id: self.id,
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            description: non_blank(&self.description),
            start_date,
            end_date,
            is_active: self.is_active,
            branch_id: self.branch_id,
            discount_type: self.discount_type.unwrap_or_default(),
            discount_value: self.discount_value.unwrap_or(0.0),
            min_order_value: self.min_order_value,
            max_discount_value: self.max_discount_value,
            quantity: self.quantity,
            is_auto_generate: self.is_auto_generate,
            is_unlimited: self.is_unlimited,
            created_by: Some(created_by.to_string()),
            ..Default::default()
        }
    }
}
