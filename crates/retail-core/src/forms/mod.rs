//! # Form Models
//!
//! Transient state behind each create/edit modal, with validation and the
//! mapping to the API payload.
//!
//! ```text
//! Modal opens ──► XxxForm::new() / XxxForm::from_entity(&e)
//!                      │
//!          user edits  │  (plain field writes, unit-row helpers)
//!                      ▼
//!              form.validate() ──► Err(errors) ──► shown next to controls
//!                      │ Ok
//!                      ▼
//!              form.to_payload(..) ──► upsert command
//! ```

pub mod branch;
pub mod category;
pub mod product;
pub mod purchase;
pub mod supplier;
pub mod transfer;
pub mod voucher;

pub use branch::BranchForm;
pub use category::CategoryForm;
pub use product::{ImageUpload, ProductForm, UnitRow};
pub use purchase::{PurchaseLine, PurchaseOrderForm};
pub use supplier::SupplierForm;
pub use transfer::{StockTransferForm, TransferLine};
pub use voucher::{VoucherForm, VoucherTab};

use crate::error::ValidationError;
use crate::session::SessionUser;

/// Every rule a form failed, in field order.
pub type FormErrors = Vec<ValidationError>;

/// `createdBy` value sent with new records: the user id, or "1" without one.
pub fn created_by(user: Option<&SessionUser>) -> String {
    user.and_then(|u| u.user_id)
        .map(|id| id.to_string())
        .unwrap_or_else(|| "1".to_string())
}

/// Numeric `createdBy` for the stock endpoints, with the same fallback.
pub fn created_by_id(user: Option<&SessionUser>) -> i64 {
    user.and_then(|u| u.user_id).unwrap_or(1)
}

/// Runs each check and collects the failures.
pub(crate) fn collect(checks: Vec<Result<(), ValidationError>>) -> Result<(), FormErrors> {
    let errors: FormErrors = checks.into_iter().filter_map(Result::err).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Trimmed text, `None` when blank.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
