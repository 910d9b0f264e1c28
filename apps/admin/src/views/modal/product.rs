//! Product create/edit modal.
//!
//! Unit rows and the image are edited on [`ProductForm`] directly. Submitting
//! saves the product, then uploads the chosen image against the id the
//! server returned.

use retail_core::forms::ProductForm;
use retail_core::types::Product;
use tracing::debug;

use super::FormModal;
use crate::commands::product;
use crate::error::AdminResult;
use crate::state::AppContext;

pub type ProductModal = FormModal<ProductForm>;

impl FormModal<ProductForm> {
    /// New products start with one base unit and barcode generation on.
    pub fn open_create(&mut self) {
        self.open_with(ProductForm::new());
    }

    pub fn open_edit(&mut self, product: &Product) {
        debug!(product_id = ?product.id, "Editing product");
        self.open_with(ProductForm::from_product(product));
    }

    pub async fn submit(&mut self, ctx: &AppContext) -> AdminResult<Product> {
        let result = product::save_product(ctx, &mut self.form).await;
        self.finish(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retail_core::DEFAULT_UNIT_NAME;

    #[test]
    fn test_open_create_has_default_unit() {
        let mut modal = ProductModal::default();
        modal.open_create();
        assert!(modal.open);
        assert!(modal.form.auto_generate_barcode);
        assert_eq!(modal.form.units().len(), 1);
        assert_eq!(modal.form.units()[0].unit_name, DEFAULT_UNIT_NAME);
    }

    #[test]
    fn test_open_edit_prefills() {
        let mut modal = ProductModal::default();
        modal.open_edit(&Product {
            id: Some(9),
            name: "Cà phê".into(),
            ..Default::default()
        });
        assert!(modal.form.is_edit());
        assert_eq!(modal.form.name, "Cà phê");
    }
}
