//! Purchase order form. Lines are priced per unit; the order total is
//! derived, never typed in.

use chrono::NaiveDate;

use super::{collect, non_blank, FormErrors};
use crate::error::ValidationError;
use crate::types::{PurchaseOrderItem, PurchaseOrderRequest};
use crate::validation::{validate_description, validate_non_negative, validate_price};

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseLine {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub expired_date: Option<NaiveDate>,
}

impl PurchaseLine {
    pub fn total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PurchaseOrderForm {
    pub supplier_id: Option<i64>,
    pub expected_delivery_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub description: String,
    pub discount: f64,
    pub discount_ratio: f64,
    pub items: Vec<PurchaseLine>,
}

impl PurchaseOrderForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line, replacing any line for the same product. Quantity and
    /// unit price must both be positive.
    pub fn add_item(&mut self, line: PurchaseLine) -> Result<(), FormErrors> {
        collect(vec![
            if line.product_id > 0 {
                Ok(())
            } else {
                Err(ValidationError::Required {
                    field: "productId".to_string(),
                })
            },
            positive("quantity", line.quantity as f64),
            positive("unitPrice", line.unit_price),
        ])?;
        match self.items.iter_mut().find(|l| l.product_id == line.product_id) {
            Some(existing) => *existing = line,
            None => self.items.push(line),
        }
        Ok(())
    }

    pub fn remove_item(&mut self, product_id: i64) {
        self.items.retain(|l| l.product_id != product_id);
    }

    /// Sum of quantity × unit price.
    pub fn total(&self) -> f64 {
        self.items.iter().map(PurchaseLine::total).sum()
    }

    pub fn total_payment(&self) -> f64 {
        self.total() - self.discount
    }

    /// Required: supplier and at least one line. The discount may not push
    /// the payment below zero.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let total = self.total();
        collect(vec![
            match self.supplier_id {
                Some(_) => Ok(()),
                None => Err(ValidationError::Required {
                    field: "supplierId".to_string(),
                }),
            },
            if self.items.is_empty() {
                Err(ValidationError::Required {
                    field: "items".to_string(),
                })
            } else {
                Ok(())
            },
            validate_description("description", &self.description),
            validate_non_negative("discount", self.discount).and_then(|_| {
                if self.discount > total {
                    Err(ValidationError::OutOfRange {
                        field: "discount".to_string(),
                        min: 0.0,
                        max: total,
                    })
                } else {
                    Ok(())
                }
            }),
            validate_price("totalPayment", self.total_payment().max(0.0)),
        ])
    }

    /// Delivery dates go out as midnight local date-times.
    pub fn to_request(&self, created_by: i64) -> Result<PurchaseOrderRequest, FormErrors> {
        self.validate()?;
        let supplier_id = self.supplier_id.ok_or_else(|| {
            vec![ValidationError::Required {
                field: "supplierId".to_string(),
            }]
        })?;
        Ok(PurchaseOrderRequest {
            supplier_id,
            expected_delivery_date: self.expected_delivery_date.and_then(|d| d.and_hms_opt(0, 0, 0)),
            delivery_date: self.delivery_date.and_then(|d| d.and_hms_opt(0, 0, 0)),
            description: non_blank(&self.description).unwrap_or_default(),
            total: self.total(),
            total_payment: self.total_payment(),
            discount: self.discount,
            discount_ratio: self.discount_ratio,
            created_by,
            items: self
                .items
                .iter()
                .map(|l| PurchaseOrderItem {
                    product_id: l.product_id,
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                    expired_date: l.expired_date,
                })
                .collect(),
        })
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::MustBePositive {
            field: field.to_string(),
        })
    }
}
