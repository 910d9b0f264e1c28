//! Product create/edit form.
//!
//! Keeps the unit table consistent while the user edits it: exactly one row
//! is the base unit, and the base unit's rate is 1.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{collect, non_blank, FormErrors};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Product, ProductAttribute, ProductStatus, ProductUnit};
use crate::validation::{
    parse_decimal, validate_barcode, validate_code, validate_description, validate_image,
    validate_name, validate_price, validate_required,
};
use crate::DEFAULT_UNIT_NAME;

// =============================================================================
// Unit Rows
// =============================================================================

/// One editable row of the unit table. The rate is the raw input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UnitRow {
    pub id: Option<i64>,
    pub unit_name: String,
    pub conversion_rate: String,
    pub is_base_unit: bool,
}

impl UnitRow {
    fn base(name: &str) -> Self {
        UnitRow {
            id: None,
            unit_name: name.to_string(),
            conversion_rate: "1".to_string(),
            is_base_unit: true,
        }
    }

    fn blank() -> Self {
        UnitRow {
            id: None,
            unit_name: String::new(),
            conversion_rate: "1".to_string(),
            is_base_unit: false,
        }
    }

    /// Parsed rate. Blank, invalid or zero input falls back to 1.
    pub fn rate(&self) -> f64 {
        parse_decimal(&self.conversion_rate)
            .filter(|r| *r != 0.0)
            .unwrap_or(1.0)
    }
}

impl From<&ProductUnit> for UnitRow {
    fn from(unit: &ProductUnit) -> Self {
        UnitRow {
            id: unit.id,
            unit_name: unit.unit_name.clone(),
            conversion_rate: unit.conversion_rate.to_string(),
            is_base_unit: unit.is_base_unit,
        }
    }
}

// =============================================================================
// Image
// =============================================================================

/// An image chosen in the modal, uploaded once the product has an id.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Accepts the file only when its type and size are allowed.
    pub fn new(
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, ValidationError> {
        let mime = mime.into();
        validate_image(&mime, bytes.len() as u64)?;
        Ok(ImageUpload {
            file_name: file_name.into(),
            mime,
            bytes,
        })
    }
}

// =============================================================================
// Product Form
// =============================================================================

/// State of the product modal. Prices and weight are raw input text.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
    pub category_id: Option<i64>,
    pub base_price: String,
    pub retail_price: String,
    pub weight: String,
    pub allows_sale: bool,
    pub status: ProductStatus,
    pub description: String,
    pub barcode: String,
    pub image_url: Option<String>,
    pub auto_generate_barcode: bool,
    pub attributes: Vec<ProductAttribute>,
    units: Vec<UnitRow>,
    image: Option<ImageUpload>,
}

impl Default for ProductForm {
    fn default() -> Self {
        ProductForm::new()
    }
}

impl ProductForm {
    /// Blank form for a new product: one base unit "Cái", barcode generated
    /// by the server.
    pub fn new() -> Self {
        ProductForm {
            id: None,
            code: String::new(),
            name: String::new(),
            category_id: None,
            base_price: String::new(),
            retail_price: String::new(),
            weight: String::new(),
            allows_sale: true,
            status: ProductStatus::Active,
            description: String::new(),
            barcode: String::new(),
            image_url: None,
            auto_generate_barcode: true,
            attributes: Vec::new(),
            units: vec![UnitRow::base(DEFAULT_UNIT_NAME)],
            image: None,
        }
    }

    /// Form pre-filled from an existing product.
    ///
    /// A product saved without units gets one base row named after its
    /// `unit` field.
    pub fn from_product(product: &Product) -> Self {
        let units = if product.units.is_empty() {
            vec![UnitRow::base(
                product.unit.as_deref().unwrap_or(DEFAULT_UNIT_NAME),
            )]
        } else {
            product.units.iter().map(UnitRow::from).collect()
        };

        let price_text = |value: f64| {
            if value == 0.0 {
                String::new()
            } else {
                value.to_string()
            }
        };

        ProductForm {
            id: product.id,
            code: product.code.clone().unwrap_or_default(),
            name: product.name.clone(),
            category_id: product.category_id,
            base_price: price_text(product.base_price),
            retail_price: price_text(product.retail_price),
            weight: product.weight.map(|w| w.to_string()).unwrap_or_default(),
            allows_sale: product.allows_sale != Some(false),
            status: product.status,
            description: product.description.clone().unwrap_or_default(),
            barcode: product.barcode.clone().unwrap_or_default(),
            image_url: product.image_url.clone(),
            auto_generate_barcode: false,
            attributes: product.attributes.clone(),
            units,
            image: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    // -------------------------------------------------------------------------
    // Unit table
    // -------------------------------------------------------------------------

    pub fn units(&self) -> &[UnitRow] {
        &self.units
    }

    /// Appends an empty, non-base row with rate 1.
    pub fn add_unit(&mut self) {
        self.units.push(UnitRow::blank());
    }

    /// Removes a row. Removing the base row promotes the first remaining row.
    ///
    /// ## Errors
    /// - [`CoreError::LastUnit`] when only one row is left
    /// - [`CoreError::UnitIndexOutOfRange`] for a bad index
    pub fn remove_unit(&mut self, index: usize) -> CoreResult<()> {
        self.check_index(index)?;
        if self.units.len() <= 1 {
            return Err(CoreError::LastUnit);
        }
        let removed = self.units.remove(index);
        if removed.is_base_unit {
            let first = &mut self.units[0];
            first.is_base_unit = true;
            first.conversion_rate = "1".to_string();
        }
        Ok(())
    }

    /// Makes `index` the base unit: clears every other base flag and forces
    /// its rate to 1.
    pub fn set_base_unit(&mut self, index: usize) -> CoreResult<()> {
        self.check_index(index)?;
        for (i, unit) in self.units.iter_mut().enumerate() {
            if i == index {
                unit.is_base_unit = true;
                unit.conversion_rate = "1".to_string();
            } else {
                unit.is_base_unit = false;
            }
        }
        Ok(())
    }

    pub fn set_unit_name(&mut self, index: usize, name: impl Into<String>) -> CoreResult<()> {
        self.check_index(index)?;
        self.units[index].unit_name = name.into();
        Ok(())
    }

    /// ## Errors
    /// - [`CoreError::BaseUnitRate`] when `index` is the base row
    /// - [`CoreError::UnitIndexOutOfRange`] for a bad index
    pub fn set_unit_rate(&mut self, index: usize, rate: impl Into<String>) -> CoreResult<()> {
        self.check_index(index)?;
        if self.units[index].is_base_unit {
            return Err(CoreError::BaseUnitRate { index });
        }
        self.units[index].conversion_rate = rate.into();
        Ok(())
    }

    fn check_index(&self, index: usize) -> CoreResult<()> {
        if index >= self.units.len() {
            return Err(CoreError::UnitIndexOutOfRange {
                index,
                len: self.units.len(),
            });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Image
    // -------------------------------------------------------------------------

    pub fn set_image(&mut self, image: ImageUpload) {
        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    pub fn take_image(&mut self) -> Option<ImageUpload> {
        self.image.take()
    }

    // -------------------------------------------------------------------------
    // Submit
    // -------------------------------------------------------------------------

    /// Required: name, retail price, and a name for every unit row. Exactly
    /// one row is the base unit and its rate is 1.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut checks = vec![
            validate_name("name", &self.name),
            validate_code("code", &self.code),
            validate_required("retailPrice", &self.retail_price),
            validate_description("description", &self.description),
            validate_barcode("barcode", self.barcode.trim()),
        ];
        if let Some(price) = parse_decimal(&self.retail_price) {
            checks.push(validate_price("retailPrice", price));
        }
        if let Some(price) = parse_decimal(&self.base_price) {
            checks.push(validate_price("basePrice", price));
        }
        for (i, unit) in self.units.iter().enumerate() {
            checks.push(validate_required(&format!("units[{}].unitName", i), &unit.unit_name));
            if unit.is_base_unit && unit.rate() != 1.0 {
                checks.push(Err(ValidationError::InvalidFormat {
                    field: format!("units[{}].conversionRate", i),
                    reason: "the base unit's rate must be 1".to_string(),
                }));
            }
        }
        let bases = self.units.iter().filter(|u| u.is_base_unit).count();
        if bases != 1 {
            checks.push(Err(ValidationError::InvalidFormat {
                field: "units".to_string(),
                reason: format!("exactly one base unit is required, found {}", bases),
            }));
        }
        collect(checks)
    }

    /// Upsert payload. Prices fall back to 0, rates to 1, a blank weight is
    /// sent as null. An explicit "0" weight is sent as 0.
    pub fn to_payload(&self) -> Product {
        let units: Vec<ProductUnit> = self
            .units
            .iter()
            .map(|row| ProductUnit {
                id: row.id,
                unit_name: row.unit_name.trim().to_string(),
                conversion_rate: row.rate(),
                is_base_unit: row.is_base_unit,
            })
            .collect();
        let base_unit = units
            .iter()
            .find(|u| u.is_base_unit)
            .map(|u| u.unit_name.clone());

        Product {
            id: self.id,
            code: non_blank(&self.code),
            name: self.name.trim().to_string(),
            category_id: self.category_id,
            base_price: parse_decimal(&self.base_price).unwrap_or(0.0),
            retail_price: parse_decimal(&self.retail_price).unwrap_or(0.0),
            weight: parse_decimal(&self.weight),
            unit: base_unit,
            allows_sale: Some(self.allows_sale),
            status: self.status,
            description: non_blank(&self.description),
            barcode: non_blank(&self.barcode),
            image_url: self.image_url.clone(),
            attributes: self.attributes.clone(),
            units,
            auto_generate_barcode: Some(self.auto_generate_barcode),
            ..Default::default()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
