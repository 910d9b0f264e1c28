//! # Modals
//!
//! A modal holds its form until the save resolves. It closes on success and
//! keeps the form and the error message on failure, so the user can fix the
//! input and resubmit.
//!
//! ```text
//!   closed ──open──► open(form) ──submit──► saving ──Ok──► closed
//!                        ▲                     │
//!                        └──── error shown ◄───┘ Err
//! ```

pub mod product;
pub mod voucher;

pub use product::ProductModal;
pub use voucher::VoucherModal;

use retail_core::forms::{BranchForm, CategoryForm, SupplierForm};
use retail_core::types::{Branch, Category, Supplier};

use crate::commands::{branch, category, supplier};
use crate::error::AdminResult;
use crate::state::AppContext;

/// Open/closed state and last error around a form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormModal<F> {
    pub form: F,
    pub open: bool,
    pub error: Option<String>,
}

impl<F: Default> FormModal<F> {
    pub fn open_with(&mut self, form: F) {
        self.form = form;
        self.error = None;
        self.open = true;
    }

    /// Closes and forgets the form.
    pub fn cancel(&mut self) {
        *self = FormModal {
            form: F::default(),
            open: false,
            error: None,
        };
    }

    pub(crate) fn finish<T>(&mut self, result: AdminResult<T>) -> AdminResult<T> {
        match result {
            Ok(saved) => {
                self.cancel();
                Ok(saved)
            }
            Err(e) => {
                self.error = Some(e.message.clone());
                Err(e)
            }
        }
    }
}

impl FormModal<CategoryForm> {
    pub fn open_create(&mut self) {
        self.open_with(CategoryForm::new());
    }

    pub fn open_edit(&mut self, category: &Category) {
        self.open_with(CategoryForm::from_category(category));
    }

    pub async fn submit(&mut self, ctx: &AppContext) -> AdminResult<Category> {
        let result = category::save_category(ctx, &self.form).await;
        self.finish(result)
    }
}

impl FormModal<BranchForm> {
    pub fn open_create(&mut self) {
        self.open_with(BranchForm::new());
    }

    pub fn open_edit(&mut self, branch: &Branch) {
        self.open_with(BranchForm::from_branch(branch));
    }

    pub async fn submit(&mut self, ctx: &AppContext) -> AdminResult<Branch> {
        let result = branch::save_branch(ctx, &self.form).await;
        self.finish(result)
    }
}

impl FormModal<SupplierForm> {
    pub fn open_create(&mut self) {
        self.open_with(SupplierForm::new());
    }

    pub fn open_edit(&mut self, supplier: &Supplier) {
        self.open_with(SupplierForm::from_supplier(supplier));
    }

    pub async fn submit(&mut self, ctx: &AppContext) -> AdminResult<Supplier> {
        let result = supplier::save_supplier(ctx, &self.form).await;
        self.finish(result)
    }
}
