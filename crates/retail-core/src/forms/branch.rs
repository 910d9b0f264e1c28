//! Branch create/edit form.

use super::{collect, non_blank, FormErrors};
use crate::types::Branch;
use crate::validation::{validate_code, validate_email, validate_name, validate_phone};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BranchForm {
    pub id: Option<i64>,
    pub branch_code: String,
    pub name: String,
    pub address: String,
    pub ward_name: String,
    pub district_name: String,
    pub city_name: String,
    pub phone_number: String,
    pub email: String,
    pub level: Option<i32>,
    pub is_main: bool,
    /// Not shown in the form; kept so that saving does not change it.
    pub is_active: bool,
    pub parent_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl BranchForm {
    pub fn new() -> Self {
        BranchForm {
            is_active: true,
            ..Default::default()
        }
    }

    pub fn from_branch(branch: &Branch) -> Self {
        BranchForm {
            id: branch.id,
            branch_code: branch.branch_code.clone().unwrap_or_default(),
            name: branch.name.clone(),
            address: branch.address.clone().unwrap_or_default(),
            ward_name: branch.ward_name.clone().unwrap_or_default(),
            district_name: branch.district_name.clone().unwrap_or_default(),
            city_name: branch.city_name.clone().unwrap_or_default(),
            phone_number: branch.phone_number.clone().unwrap_or_default(),
            email: branch.email.clone().unwrap_or_default(),
            level: branch.level,
            is_main: branch.is_main,
            is_active: branch.is_active,
            parent_id: branch.parent_id,
            latitude: branch.latitude,
            longitude: branch.longitude,
        }
    }

    /// Required: name. Code length, phone and email format when filled in.
    pub fn validate(&self) -> Result<(), FormErrors> {
        collect(vec![
            validate_code("branchCode", &self.branch_code),
            validate_name("name", &self.name),
            validate_phone("phoneNumber", self.phone_number.trim()),
            validate_email("email", self.email.trim()),
        ])
    }

    pub fn to_payload(&self, created_by: &str) -> Branch {
        Branch {
            id: self.id,
            branch_code: non_blank(&self.branch_code),
            name: self.name.trim().to_string(),
            address: non_blank(&self.address),
            ward_name: non_blank(&self.ward_name),
            district_name: non_blank(&self.district_name),
            city_name: non_blank(&self.city_name),
            phone_number: non_blank(&self.phone_number),
            email: non_blank(&self.email),
            is_active: self.is_active,
            is_main: self.is_main,
            parent_id: self.parent_id,
            level: self.level,
            created_by: Some(created_by.to_string()),
            latitude: self.latitude,
            longitude: self.longitude,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_validation() {
        let mut form = BranchForm::new();
        form.phone_number = "abc".into();
        form.email = "store@".into();
        let errors = form.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["name", "phoneNumber", "email"]);

        form.name = "Chi nhánh Thủ Đức".into();
        form.phone_number = "028 3896 1234".into();
        form.email = "thuduc@shop.vn".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_new_branch_payload_is_active() {
        let mut form = BranchForm::new();
        form.name = "Kho trung tâm".into();
        let payload = form.to_payload("1");
        assert!(payload.is_active);
        assert_eq!(payload.email, None);
        assert_eq!(payload.created_by.as_deref(), Some("1"));
    }
}
