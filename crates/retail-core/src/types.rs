//! # Domain Types
//!
//! Wire types exchanged with the retail REST backend.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │ VoucherCampaign │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, code       │   │  id, name       │   │  id, code       │       │
//! │  │  categoryId ────┼──►│  isDeleted      │   │  discountType   │       │
//! │  │  units[]        │   │  children[]     │   │  vouchers[] ◄───┼─ gen  │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Branch      │   │    Supplier     │   │    StockRow     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  isActive       │   │  isActive       │   │  onHand         │       │
//! │  │  isMain         │   │  debt           │   │  reserved       │       │
//! │  └─────────────────┘   └─────────────────┘   │  stockStatus    │       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  Envelopes: MessageResponse<T> { message, data }                       │
//! │             Page<T> { content, number, size, totalElements, ... }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock transfers and purchase orders sit next to `StockRow`: a transfer
//! moves stock from the central warehouse to a branch, and a purchase order
//! brings it in from a supplier.
//!
//! All structs use camelCase on the wire. Timestamps are server `Instant`s
//! (RFC 3339 strings) and are exported to TypeScript as `string`. Transfer
//! dates and purchase delivery dates are zone-less local date-times.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Envelopes
// =============================================================================

/// Response body of every mutating endpoint (upsert, toggle, upload, generate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MessageResponse<T> {
    /// Human-readable outcome, shown in the success toast.
    #[serde(default)]
    pub message: String,

    /// The saved entity (or the uploaded image URL). Absent for bulk calls.
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> MessageResponse<T> {
    /// Builds a response carrying `data`.
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        MessageResponse {
            message: message.into(),
            data: Some(data),
        }
    }
}

/// One page of a server-paginated listing (Spring `Page` layout).
///
/// Extra fields the server sends (`pageable`, `sort`, `empty`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    /// Zero-based page index.
    #[serde(default)]
    pub number: usize,
    #[serde(default)]
    pub size: usize,
    #[serde(default)]
    pub total_elements: usize,
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
}

// =============================================================================
// Product
// =============================================================================

/// Lifecycle status of a product. Deleting a product is an upsert to `Deleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
    Deleted,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Active => write!(f, "Active"),
            ProductStatus::Inactive => write!(f, "Inactive"),
            ProductStatus::Deleted => write!(f, "Deleted"),
        }
    }
}

/// A sellable unit of a product ("Cái", "Hộp", ...).
///
/// Exactly one unit per product is the base unit, with conversion rate 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductUnit {
    pub id: Option<i64>,
    pub unit_name: String,
    /// How many base units this unit holds.
    pub conversion_rate: f64,
    pub is_base_unit: bool,
}

impl ProductUnit {
    /// Creates a unit row that is not yet persisted.
    pub fn new(unit_name: impl Into<String>, conversion_rate: f64, is_base_unit: bool) -> Self {
        ProductUnit {
            id: None,
            unit_name: unit_name.into(),
            conversion_rate,
            is_base_unit,
        }
    }
}

/// Free-form attribute pair (color, size, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductAttribute {
    pub id: Option<i64>,
    pub attribute_name: String,
    pub attribute_value: Option<String>,
}

/// Stock of one product at one branch/warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductInventory {
    pub branch_id: Option<i64>,
    pub warehouse_id: Option<i64>,
    pub on_hand: i64,
    pub reserved: i64,
    pub available: i64,
    #[ts(as = "Option<String>")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// A product of the catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Server id; `None` for a product that has not been saved yet.
    pub id: Option<i64>,

    /// Business code shown in the list.
    pub code: Option<String>,

    pub name: String,

    pub category_id: Option<i64>,

    /// Purchase price in VND.
    #[serde(default)]
    pub base_price: f64,

    /// Selling price in VND.
    #[serde(default)]
    pub retail_price: f64,

    pub weight: Option<f64>,

    /// Name of the base unit (denormalised from `units`).
    pub unit: Option<String>,

    #[serde(default)]
    pub allows_sale: Option<bool>,

    #[serde(default)]
    pub status: ProductStatus,

    pub description: Option<String>,

    pub barcode: Option<String>,

    pub image_url: Option<String>,

    #[ts(as = "Option<String>")]
    pub created_date: Option<DateTime<Utc>>,

    #[ts(as = "Option<String>")]
    pub modified_date: Option<DateTime<Utc>>,

    pub status_id: Option<i64>,

    pub status_code: Option<String>,

    #[serde(default)]
    pub attributes: Vec<ProductAttribute>,

    #[serde(default)]
    pub units: Vec<ProductUnit>,

    /// When true and `barcode` is empty the server generates one.
    #[serde(default)]
    pub auto_generate_barcode: Option<bool>,

    /// Stock columns filled in by `/products/with-stock` only.
    pub on_hand: Option<i64>,
    pub available: Option<i64>,
}

/// Body of the soft-delete upsert: `{ id, status: "Deleted" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDeleteRequest {
    pub id: i64,
    pub status: ProductStatus,
}

impl ProductDeleteRequest {
    pub fn new(id: i64) -> Self {
        ProductDeleteRequest {
            id,
            status: ProductStatus::Deleted,
        }
    }
}

/// Body of `/products/bulk-create` and `/products/bulk-update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductBulkRequest {
    pub items: Vec<Product>,
}

// =============================================================================
// Category
// =============================================================================

/// A product category. Deactivating a category sets `is_deleted`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: Option<i64>,
    pub category_name: String,
    pub parent_id: Option<i64>,
    pub description: Option<String>,
    pub rank: Option<i32>,
    #[serde(default)]
    pub is_deleted: bool,
    #[ts(as = "Option<String>")]
    pub created_date: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub modified_date: Option<DateTime<Utc>>,
}

/// A node of `/categories/tree`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryTreeNode {
    pub id: i64,
    pub category_name: String,
    pub parent_id: Option<i64>,
    pub description: Option<String>,
    pub rank: Option<i32>,
    #[serde(default)]
    pub children: Vec<CategoryTreeNode>,
}

impl CategoryTreeNode {
    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(CategoryTreeNode::node_count).sum::<usize>()
    }
}

// =============================================================================
// Vouchers
// =============================================================================

/// How a campaign discounts an order.
///
/// Encoded on the wire as `1` (fixed amount) or `2` (percentage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum DiscountType {
    #[default]
    Fixed,
    Percent,
}

impl DiscountType {
    pub const fn code(self) -> i16 {
        match self {
            DiscountType::Fixed => 1,
            DiscountType::Percent => 2,
        }
    }
}

impl TryFrom<i16> for DiscountType {
    type Error = String;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(DiscountType::Fixed),
            2 => Ok(DiscountType::Percent),
            other => Err(format!("unknown discount type {}", other)),
        }
    }
}

impl From<DiscountType> for i16 {
    fn from(value: DiscountType) -> Self {
        value.code()
    }
}

/// A discount rule template from which voucher codes are generated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VoucherCampaign {
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    #[ts(as = "Option<String>")]
    pub start_date: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: bool,
    pub branch_id: Option<i64>,
    #[ts(as = "i16")]
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub discount_value: f64,
    pub min_order_value: Option<f64>,
    pub max_discount_value: Option<f64>,
    pub quantity: Option<i32>,
    pub used_quantity: Option<i32>,
    pub remaining_quantity: Option<i32>,
    #[serde(default)]
    pub is_auto_generate: bool,
    #[serde(default)]
    pub is_unlimited: bool,
    pub created_by: Option<String>,
}

/// One redeemable code generated from a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Voucher {
    pub id: Option<i64>,
    pub code: String,
    pub voucher_campaign_id: Option<i64>,
    #[ts(as = "Option<String>")]
    pub start_date: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_used: bool,
    #[ts(as = "Option<String>")]
    pub used_date: Option<DateTime<Utc>>,
    pub customer_id: Option<i64>,
    pub order_id: Option<i64>,
    pub discount_value: Option<f64>,
}

// =============================================================================
// Branch & Supplier
// =============================================================================

/// A store location.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Branch {
    pub id: Option<i64>,
    pub branch_code: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub ward_name: Option<String>,
    pub district_name: Option<String>,
    pub city_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_main: bool,
    pub parent_id: Option<i64>,
    pub level: Option<i32>,
    pub created_by: Option<String>,
    #[ts(as = "Option<String>")]
    pub created_date: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub modified_date: Option<DateTime<Utc>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A goods supplier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Supplier {
    pub id: Option<i64>,
    pub code: Option<String>,
    pub name: String,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub ward_name: Option<String>,
    pub organization: Option<String>,
    pub tax_code: Option<String>,
    pub comments: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    pub branch_id: Option<i64>,
    pub debt: Option<f64>,
    pub total_invoiced: Option<f64>,
    pub created_by: Option<String>,
    #[ts(as = "Option<String>")]
    pub created_date: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub modified_date: Option<DateTime<Utc>>,
}

// =============================================================================
// Stock
// =============================================================================

/// Server-computed stock level classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum StockStatus {
    Normal,
    LowStock,
    OutOfStock,
}

/// Stock status filter of the stock screen (`ALL` plus each status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum StockStatusFilter {
    #[default]
    All,
    Normal,
    LowStock,
    OutOfStock,
}

impl StockStatusFilter {
    /// Wire value used in the `stockStatus` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatusFilter::All => "ALL",
            StockStatusFilter::Normal => "NORMAL",
            StockStatusFilter::LowStock => "LOW_STOCK",
            StockStatusFilter::OutOfStock => "OUT_OF_STOCK",
        }
    }
}

/// One row of the stock management screen (read-only join).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockRow {
    pub product_id: i64,
    pub product_code: Option<String>,
    pub product_name: String,
    pub category_name: Option<String>,
    pub image_url: Option<String>,
    pub retail_price: Option<f64>,
    pub unit: Option<String>,
    pub branch_id: Option<i64>,
    pub branch_name: Option<String>,
    pub warehouse_id: Option<i64>,
    pub warehouse_name: Option<String>,
    #[serde(default)]
    pub on_hand: i64,
    #[serde(default)]
    pub reserved: i64,
    /// `on_hand - reserved`, as computed by the server.
    #[serde(default)]
    pub available: i64,
    pub min_threshold: Option<i64>,
    #[ts(as = "Option<String>")]
    pub last_updated: Option<DateTime<Utc>>,
    pub stock_status: StockStatus,
}

impl StockRow {
    /// True when the row is below its threshold or empty.
    pub fn needs_attention(&self) -> bool {
        matches!(
            self.stock_status,
            StockStatus::LowStock | StockStatus::OutOfStock
        )
    }
}

/// Sort direction for server listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Lowercase form used by the product endpoints (`sortDir=asc`).
    pub fn lowercase(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Uppercase form used by the stock endpoint (`sortDirection=ASC`).
    pub fn uppercase(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

// =============================================================================
// Stock Transfers
// =============================================================================

/// One row of the transfer list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockTransfer {
    pub id: i64,
    pub transfer_code: Option<String>,
    pub from_warehouse_name: Option<String>,
    pub to_branch_name: Option<String>,
    #[serde(default)]
    pub total_products: i64,
    #[serde(default)]
    pub total_quantity: i64,
    pub description: Option<String>,
    #[ts(as = "Option<String>")]
    pub transfer_date: Option<NaiveDateTime>,
    pub status: Option<String>,
    #[ts(as = "Option<String>")]
    pub created_date: Option<NaiveDateTime>,
}

/// A product line of a transfer, as shown in the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockTransferDetailItem {
    pub product_id: i64,
    pub product_name: Option<String>,
    pub product_code: Option<String>,
    pub quantity: i64,
    pub unit: Option<String>,
}

/// `GET /stock-transfers/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockTransferDetail {
    pub id: i64,
    pub transfer_code: Option<String>,
    pub from_warehouse_name: Option<String>,
    pub to_branch_name: Option<String>,
    pub description: Option<String>,
    #[ts(as = "Option<String>")]
    pub transfer_date: Option<NaiveDateTime>,
    pub status: Option<String>,
    #[ts(as = "Option<String>")]
    pub created_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub items: Vec<StockTransferDetailItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockTransferItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// Body of `POST /stock-transfers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockTransferRequest {
    /// `None` lets the server pick the central warehouse.
    pub from_warehouse_id: Option<i64>,
    pub to_branch_id: i64,
    pub description: String,
    pub created_by: i64,
    pub items: Vec<StockTransferItem>,
}

/// Response of `POST /stock-transfers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockTransferCreated {
    pub transfer_id: i64,
    pub transfer_code: String,
}

// =============================================================================
// Purchase Orders
// =============================================================================

/// One row of the purchase order list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseOrder {
    pub purchase_order_id: i64,
    pub code: Option<String>,
    #[ts(as = "Option<String>")]
    pub purchase_date: Option<DateTime<Utc>>,
    pub warehouse_id: Option<i64>,
    pub warehouse_name: Option<String>,
    pub supplier_id: Option<i64>,
    pub supplier_name: Option<String>,
    pub total_payment: Option<f64>,
    pub description: Option<String>,
    pub status_id: Option<i64>,
    pub status_name: Option<String>,
    #[ts(as = "Option<String>")]
    pub created_date: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub expected_delivery_date: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub delivery_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseOrderItem {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
    #[ts(as = "Option<String>")]
    pub expired_date: Option<NaiveDate>,
}

/// Body of `POST /purchase-orders/process`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseOrderRequest {
    pub supplier_id: i64,
    #[ts(as = "Option<String>")]
    pub expected_delivery_date: Option<NaiveDateTime>,
    #[ts(as = "Option<String>")]
    pub delivery_date: Option<NaiveDateTime>,
    pub description: String,
    pub total: f64,
    pub total_payment: f64,
    pub discount: f64,
    pub discount_ratio: f64,
    pub created_by: i64,
    pub items: Vec<PurchaseOrderItem>,
}

/// Response of `POST /purchase-orders/process`: the order and the stock lot
/// it created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseOrderCreated {
    pub purchase_order_id: i64,
    pub purchase_order_code: String,
    pub batch_id: Option<i64>,
    pub lot_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PrintParty {
    #[serde(alias = "supplierId", alias = "warehouseId")]
    pub id: Option<i64>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PrintLine {
    pub detail_id: Option<i64>,
    pub product_id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub total: f64,
    pub expired_date: Option<String>,
}

/// `GET /purchase-orders/{id}/print`. Dates arrive pre-formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseOrderPrint {
    pub purchase_order_id: i64,
    pub purchase_order_code: Option<String>,
    pub purchase_date: Option<String>,
    pub expected_delivery_date: Option<String>,
    pub delivery_date: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub total_payment: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub discount_ratio: f64,
    pub supplier: Option<PrintParty>,
    pub warehouse: Option<PrintParty>,
    #[serde(default)]
    pub items: Vec<PrintLine>,
}

// =============================================================================
// Status lookup
// =============================================================================

/// A status option from `/status?entityType=...`, used to fill select inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StatusOption {
    pub id: i64,
    pub entity_type: String,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

// =============================================================================
// Auth
// =============================================================================

/// Credentials posted to `/auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

/// Body of `/auth/register`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RegisterRequest {
    pub user_name: String,
    pub password: String,
    pub given_name: Option<String>,
    pub email: Option<String>,
    pub mobile_phone: Option<String>,
    /// Required for manager and staff accounts.
    pub branch_id: Option<i64>,
    pub role: Option<i16>,
}

/// Body of `/auth/refresh`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// The branch a user belongs to, as embedded in the login response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BranchRef {
    pub id: Option<i64>,
    pub branch_code: Option<String>,
    pub name: Option<String>,
}

/// Response of `/auth/login`, `/auth/register` and `/auth/refresh`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AuthResponse {
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub given_name: Option<String>,
    pub role: Option<i16>,
    #[serde(default)]
    pub active: bool,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub branch: Option<BranchRef>,
}

/// Response of `/auth/profile`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Profile {
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub given_name: Option<String>,
    pub email: Option<String>,
    pub mobile_phone: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub branch_id: Option<i64>,
}

// =============================================================================
// Query parameters
// =============================================================================

/// Filters of `/stock-management`. `None` values are left out of the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockQuery {
    pub search_term: Option<String>,
    pub category_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub warehouse_id: Option<i64>,
    pub stock_status: StockStatusFilter,
    pub page: usize,
    pub size: usize,
    pub sort_by: String,
    pub sort_direction: SortDirection,
}

impl Default for StockQuery {
    fn default() -> Self {
        StockQuery {
            search_term: None,
            category_id: None,
            branch_id: None,
            warehouse_id: None,
            stock_status: StockStatusFilter::All,
            page: 0,
            size: crate::DEFAULT_PAGE_SIZE,
            sort_by: "productName".to_string(),
            sort_direction: SortDirection::Asc,
        }
    }
}

impl StockQuery {
    /// Query pairs in the order the backend documents them; blanks dropped.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(term) = self.search_term.as_deref().filter(|t| !t.trim().is_empty()) {
            pairs.push(("searchTerm", term.to_string()));
        }
        if let Some(id) = self.category_id {
            pairs.push(("categoryId", id.to_string()));
        }
        if let Some(id) = self.branch_id {
            pairs.push(("branchId", id.to_string()));
        }
        if let Some(id) = self.warehouse_id {
            pairs.push(("warehouseId", id.to_string()));
        }
        pairs.push(("stockStatus", self.stock_status.as_str().to_string()));
        pairs.push(("page", self.page.to_string()));
        pairs.push(("size", self.size.to_string()));
        pairs.push(("sortBy", self.sort_by.clone()));
        pairs.push(("sortDirection", self.sort_direction.uppercase().to_string()));
        pairs
    }
}

/// `YYYY-MM-DD`, the date format the list filters expect.
fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Filters of `GET /stock-transfers`. Blank values are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockTransferQuery {
    pub search_term: Option<String>,
    pub from_warehouse_id: Option<i64>,
    pub to_branch_id: Option<i64>,
    #[ts(as = "Option<String>")]
    pub transfer_date_from: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub transfer_date_to: Option<NaiveDate>,
    pub status: Option<String>,
    pub page: usize,
    pub size: usize,
}

impl Default for StockTransferQuery {
    fn default() -> Self {
        StockTransferQuery {
            search_term: None,
            from_warehouse_id: None,
            to_branch_id: None,
            transfer_date_from: None,
            transfer_date_to: None,
            status: None,
            page: 0,
            size: crate::LIST_PAGE_SIZE,
        }
    }
}

impl StockTransferQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(term) = self.search_term.as_deref().filter(|t| !t.trim().is_empty()) {
            pairs.push(("searchTerm", term.trim().to_string()));
        }
        if let Some(id) = self.from_warehouse_id {
            pairs.push(("fromWarehouseId", id.to_string()));
        }
        if let Some(id) = self.to_branch_id {
            pairs.push(("toBranchId", id.to_string()));
        }
        if let Some(date) = self.transfer_date_from {
            pairs.push(("transferDateFrom", iso_date(date)));
        }
        if let Some(date) = self.transfer_date_to {
            pairs.push(("transferDateTo", iso_date(date)));
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("status", status.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("size", self.size.to_string()));
        pairs
    }
}

/// Filters of `GET /purchase-orders`. Newest first by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseOrderQuery {
    pub search_term: Option<String>,
    pub supplier_id: Option<i64>,
    pub warehouse_id: Option<i64>,
    pub status_id: Option<i64>,
    #[ts(as = "Option<String>")]
    pub purchase_date_from: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub purchase_date_to: Option<NaiveDate>,
    pub page: usize,
    pub size: usize,
    pub sort_by: String,
    pub sort_direction: SortDirection,
}

impl Default for PurchaseOrderQuery {
    fn default() -> Self {
        PurchaseOrderQuery {
            search_term: None,
            supplier_id: None,
            warehouse_id: None,
            status_id: None,
            purchase_date_from: None,
            purchase_date_to: None,
            page: 0,
            size: crate::DEFAULT_PAGE_SIZE,
            sort_by: "createdDate".to_string(),
            sort_direction: SortDirection::Desc,
        }
    }
}

impl PurchaseOrderQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(term) = self.search_term.as_deref().filter(|t| !t.trim().is_empty()) {
            pairs.push(("searchTerm", term.trim().to_string()));
        }
        if let Some(id) = self.supplier_id {
            pairs.push(("supplierId", id.to_string()));
        }
        if let Some(id) = self.warehouse_id {
            pairs.push(("warehouseId", id.to_string()));
        }
        if let Some(id) = self.status_id {
            pairs.push(("statusId", id.to_string()));
        }
        if let Some(date) = self.purchase_date_from {
            pairs.push(("purchaseDateFrom", iso_date(date)));
        }
        if let Some(date) = self.purchase_date_to {
            pairs.push(("purchaseDateTo", iso_date(date)));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("size", self.size.to_string()));
        pairs.push(("sortBy", self.sort_by.clone()));
        pairs.push(("sortDirection", self.sort_direction.uppercase().to_string()));
        pairs
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_camel_case() {
        let json = r#"{
            "id": 12,
            "code": "SP0012",
            "name": "Nước suối",
            "categoryId": 3,
            "basePrice": 4000,
            "retailPrice": 6000.00,
            "status": "Active",
            "createdDate": "2024-03-01T08:30:00Z",
            "units": [{"unitName": "Chai", "conversionRate": 1, "isBaseUnit": true}]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, Some(12));
        assert_eq!(product.retail_price, 6000.0);
        assert_eq!(product.units.len(), 1);
        assert!(product.units[0].is_base_unit);
        assert!(product.created_date.is_some());
    }

    #[test]
    fn test_delete_request_shape() {
        let body = serde_json::to_value(ProductDeleteRequest::new(5)).unwrap();
        assert_eq!(body, serde_json::json!({"id": 5, "status": "Deleted"}));
    }

    #[test]
    fn test_discount_type_wire_codes() {
        let campaign: VoucherCampaign =
            serde_json::from_str(r#"{"code":"TET","name":"Tet","discountType":2}"#).unwrap();
        assert_eq!(campaign.discount_type, DiscountType::Percent);

        let value = serde_json::to_value(&campaign).unwrap();
        assert_eq!(value["discountType"], 2);

        let bad = serde_json::from_str::<VoucherCampaign>(
            r#"{"code":"X","name":"X","discountType":9}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_page_ignores_spring_extras() {
        let json = r#"{
            "content": [],
            "pageable": {"pageNumber": 0},
            "number": 2, "size": 10, "totalElements": 23, "totalPages": 3,
            "first": false, "last": true, "empty": true
        }"#;
        let page: Page<Product> = serde_json::from_str(json).unwrap();
        assert_eq!(page.number, 2);
        assert_eq!(page.total_pages, 3);
        assert!(page.last);
    }

    #[test]
    fn test_stock_row_status() {
        let json = r#"{"productId":1,"productName":"A","onHand":3,"reserved":1,
            "available":2,"stockStatus":"LOW_STOCK"}"#;
        let row: StockRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.stock_status, StockStatus::LowStock);
        assert!(row.needs_attention());
    }

    #[test]
    fn test_stock_query_defaults() {
        let pairs = StockQuery::default().to_pairs();
        assert!(pairs.contains(&("stockStatus", "ALL".to_string())));
        assert!(pairs.contains(&("sortBy", "productName".to_string())));
        assert!(pairs.contains(&("sortDirection", "ASC".to_string())));
        assert!(pairs.contains(&("size", "20".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "searchTerm"));
    }

    #[test]
    fn test_transfer_query_skips_blanks() {
        let query = StockTransferQuery {
            search_term: Some("  ".into()),
            to_branch_id: Some(3),
            transfer_date_from: NaiveDate::from_ymd_opt(2025, 1, 2),
            status: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("toBranchId", "3".to_string()),
                ("transferDateFrom", "2025-01-02".to_string()),
                ("page", "0".to_string()),
                ("size", "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_purchase_query_defaults_newest_first() {
        let pairs = PurchaseOrderQuery::default().to_pairs();
        assert!(pairs.contains(&("sortBy", "createdDate".to_string())));
        assert!(pairs.contains(&("sortDirection", "DESC".to_string())));
        assert!(pairs.contains(&("size", "20".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "supplierId"));
    }

    #[test]
    fn test_transfer_detail_reads_local_dates() {
        let json = r#"{
            "id": 4,
            "transferCode": "XK0004",
            "toBranchName": "Chi nhánh Quận 1",
            "transferDate": "2025-01-15T09:30:00",
            "status": "COMPLETED",
            "items": [{"productId": 7, "productName": "Sữa tươi", "quantity": 12, "unit": "Hộp"}]
        }"#;
        let detail: StockTransferDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.items.len(), 1);
        assert_eq!(
            detail.transfer_date,
            NaiveDate::from_ymd_opt(2025, 1, 15).and_then(|d| d.and_hms_opt(9, 30, 0))
        );
    }

    #[test]
    fn test_category_tree_count() {
        let leaf = CategoryTreeNode {
            id: 2,
            category_name: "Leaf".into(),
            parent_id: Some(1),
            description: None,
            rank: None,
            children: vec![],
        };
        let root = CategoryTreeNode {
            id: 1,
            category_name: "Root".into(),
            parent_id: None,
            description: None,
            rank: None,
            children: vec![leaf.clone(), leaf],
        };
        assert_eq!(root.node_count(), 3);
    }
}
