//! Category create/edit form.

use super::{collect, non_blank, FormErrors};
use crate::types::Category;
use crate::validation::{validate_description, validate_name};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryForm {
    pub id: Option<i64>,
    pub category_name: String,
    pub description: String,
    pub parent_id: Option<i64>,
    pub rank: Option<i32>,
    is_deleted: bool,
}

impl CategoryForm {
    pub fn new() -> Self {
        CategoryForm::default()
    }

    pub fn from_category(category: &Category) -> Self {
        CategoryForm {
            id: category.id,
            category_name: category.category_name.clone(),
            description: category.description.clone().unwrap_or_default(),
            parent_id: category.parent_id,
            rank: category.rank,
            is_deleted: category.is_deleted,
        }
    }

    /// Required: category name.
    pub fn validate(&self) -> Result<(), FormErrors> {
        collect(vec![
            validate_name("categoryName", &self.category_name),
            validate_description("description", &self.description),
        ])
    }

    pub fn to_payload(&self) -> Category {
        Category {
            id: self.id,
            category_name: self.category_name.trim().to_string(),
            parent_id: self.parent_id,
            description: non_blank(&self.description),
            rank: self.rank,
            is_deleted: self.is_deleted,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_name_required() {
        let errors = CategoryForm::new().validate().unwrap_err();
        assert_eq!(errors[0].field(), "categoryName");
    }

    #[test]
    fn test_edit_keeps_deleted_flag() {
        let category = Category {
            id: Some(2),
            category_name: "Bánh kẹo".into(),
            is_deleted: true,
            ..Default::default()
        };
        let mut form = CategoryForm::from_category(&category);
        form.description = "  ".into();
        let payload = form.to_payload();
        assert!(payload.is_deleted);
        assert_eq!(payload.description, None);
        assert_eq!(payload.id, Some(2));
    }
}
