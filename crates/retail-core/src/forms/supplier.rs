//! Supplier create/edit form.

use super::{collect, non_blank, FormErrors};
use crate::types::Supplier;
use crate::validation::{validate_description, validate_email, validate_name, validate_phone};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SupplierForm {
    pub id: Option<i64>,
    pub name: String,
    pub contact_number: String,
    pub email: String,
    pub address: String,
    pub ward_name: String,
    pub organization: String,
    pub description: String,
    pub comments: String,
    /// Not shown in the form; kept so that saving does not change it.
    pub is_active: bool,
    pub code: Option<String>,
    pub tax_code: Option<String>,
    pub branch_id: Option<i64>,
}

impl SupplierForm {
    pub fn new() -> Self {
        SupplierForm {
            is_active: true,
            ..Default::default()
        }
    }

    pub fn from_supplier(supplier: &Supplier) -> Self {
        SupplierForm {
            id: supplier.id,
            name: supplier.name.clone(),
            contact_number: supplier.contact_number.clone().unwrap_or_default(),
            email: supplier.email.clone().unwrap_or_default(),
            address: supplier.address.clone().unwrap_or_default(),
            ward_name: supplier.ward_name.clone().unwrap_or_default(),
            organization: supplier.organization.clone().unwrap_or_default(),
            description: supplier.description.clone().unwrap_or_default(),
            comments: supplier.comments.clone().unwrap_or_default(),
            is_active: supplier.is_active,
            code: supplier.code.clone(),
            tax_code: supplier.tax_code.clone(),
            branch_id: supplier.branch_id,
        }
    }

    /// Required: name. Phone and email format when filled in.
    pub fn validate(&self) -> Result<(), FormErrors> {
        collect(vec![
            validate_name("name", &self.name),
            validate_phone("contactNumber", self.contact_number.trim()),
            validate_email("email", self.email.trim()),
            validate_description("description", &self.description),
        ])
    }

    pub fn to_payload(&self, created_by: &str) -> Supplier {
        Supplier {
            id: self.id,
            code: self.code.clone(),
            name: self.name.trim().to_string(),
            contact_number: non_blank(&self.contact_number),
            email: non_blank(&self.email),
            address: non_blank(&self.address),
            ward_name: non_blank(&self.ward_name),
            organization: non_blank(&self.organization),
            tax_code: self.tax_code.clone(),
            comments: non_blank(&self.comments),
            description: non_blank(&self.description),
            is_active: self.is_active,
            branch_id: self.branch_id,
            created_by: Some(created_by.to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplier_requires_name() {
        let errors = SupplierForm::new().validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), "name");
    }

    #[test]
    fn test_edit_payload_keeps_identity() {
        let supplier = Supplier {
            id: Some(11),
            code: Some("NCC011".into()),
            name: "Vinamilk".into(),
            is_active: false,
            ..Default::default()
        };
        let mut form = SupplierForm::from_supplier(&supplier);
        form.contact_number = "1900 636 979".into();
        let payload = form.to_payload("3");
        assert_eq!(payload.id, Some(11));
        assert_eq!(payload.code.as_deref(), Some("NCC011"));
        assert!(!payload.is_active);
        assert_eq!(payload.contact_number.as_deref(), Some("1900 636 979"));
    }
}
