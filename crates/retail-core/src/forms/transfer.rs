//! Stock transfer form: pick a branch, then add products from the central
//! warehouse with the quantity to send.

use super::{collect, non_blank, FormErrors};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{StockRow, StockTransferItem, StockTransferRequest};
use crate::validation::{validate_at_least_one, validate_description};

/// One product line. `available_stock` is what the warehouse had when the
/// product was picked.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferLine {
    pub product_id: i64,
    pub product_name: String,
    pub product_code: Option<String>,
    pub quantity: i64,
    pub available_stock: i64,
}

impl TransferLine {
    /// A line of one unit for a stock row.
    pub fn from_stock(row: &StockRow) -> Self {
        TransferLine {
            product_id: row.product_id,
            product_name: row.product_name.clone(),
            product_code: row.product_code.clone(),
            quantity: 1,
            available_stock: row.available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StockTransferForm {
    /// `None` sends from the central warehouse.
    pub from_warehouse_id: Option<i64>,
    pub to_branch_id: Option<i64>,
    pub description: String,
    pub items: Vec<TransferLine>,
}

impl StockTransferForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line. A product can appear only once.
    pub fn add_item(&mut self, line: TransferLine) -> CoreResult<()> {
        if self.items.iter().any(|l| l.product_id == line.product_id) {
            return Err(CoreError::DuplicateLine {
                product_id: line.product_id,
            });
        }
        self.items.push(line);
        Ok(())
    }

    /// Sets a line's quantity; zero or less drops the line.
    pub fn set_quantity(&mut self, product_id: i64, quantity: i64) -> CoreResult<()> {
        let index = self
            .items
            .iter()
            .position(|l| l.product_id == product_id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "transfer item".to_string(),
                id: product_id,
            })?;
        if quantity <= 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = quantity;
        }
        Ok(())
    }

    pub fn remove_item(&mut self, product_id: i64) {
        self.items.retain(|l| l.product_id != product_id);
    }

    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Required: a branch and at least one line. No line may ask for more
    /// than the warehouse has.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut checks = vec![
            match self.to_branch_id {
                Some(_) => Ok(()),
                None => Err(ValidationError::Required {
                    field: "toBranchId".to_string(),
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
        ];
        for (i, line) in self.items.iter().enumerate() {
            let field = format!("items[{}].quantity", i);
            checks.push(validate_at_least_one(&field, line.quantity));
            if line.quantity > line.available_stock {
                checks.push(Err(ValidationError::OutOfRange {
                    field,
                    min: 1.0,
                    max: line.available_stock as f64,
                }));
            }
        }
        collect(checks)
    }

    pub fn to_request(&self, created_by: i64) -> Result<StockTransferRequest, FormErrors> {
        self.validate()?;
        let to_branch_id = self.to_branch_id.ok_or_else(|| {
            vec![ValidationError::Required {
                field: "toBranchId".to_string(),
            }]
        })?;
        Ok(StockTransferRequest {
            from_warehouse_id: self.from_warehouse_id,
            to_branch_id,
            description: non_blank(&self.description).unwrap_or_default(),
            created_by,
            items: self
                .items
                .iter()
                .map(|l| StockTransferItem {
                    product_id: l.product_id,
                    quantity: l.quantity,
                })
                .collect(),
        })
    }
}
