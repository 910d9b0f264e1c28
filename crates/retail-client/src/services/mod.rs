//! # Resource Services
//!
//! One service per REST resource, each a thin typed wrapper over
//! [`ApiClient`]. A service logs a failed call and hands the error back
//! unchanged; it never validates, retries or caches.
//!
//! ```text
//! Services ─┬─ auth        /auth/*
//!           ├─ products    /products/*
//!           ├─ categories  /categories/*
//!           ├─ vouchers    /voucher-campaigns/*, /vouchers/*
//!           ├─ branches    /branches/*
//!           ├─ suppliers   /suppliers/*
//!           ├─ stock       /stock-management
//!           ├─ transfers   /stock-transfers/*
//!           ├─ purchases   /purchase-orders/*
//!           └─ status      /status
//! ```

pub mod auth;
pub mod branch;
pub mod category;
pub mod product;
pub mod purchase;
pub mod status;
pub mod stock;
pub mod supplier;
pub mod transfer;
pub mod voucher;

pub use auth::AuthService;
pub use branch::BranchService;
pub use category::CategoryService;
pub use product::ProductService;
pub use purchase::PurchaseService;
pub use status::StatusService;
pub use stock::StockService;
pub use supplier::SupplierService;
pub use transfer::StockTransferService;
pub use voucher::VoucherService;

use crate::http::ApiClient;

/// Every service, sharing one [`ApiClient`].
#[derive(Debug, Clone)]
pub struct Services {
    pub auth: AuthService,
    pub products: ProductService,
    pub categories: CategoryService,
    pub vouchers: VoucherService,
    pub branches: BranchService,
    pub suppliers: SupplierService,
    pub stock: StockService,
    pub transfers: StockTransferService,
    pub purchases: PurchaseService,
    pub status: StatusService,
}

impl Services {
    pub fn new(client: ApiClient) -> Self {
        Services {
            auth: AuthService::new(client.clone()),
            products: ProductService::new(client.clone()),
            categories: CategoryService::new(client.clone()),
            vouchers: VoucherService::new(client.clone()),
            branches: BranchService::new(client.clone()),
            suppliers: SupplierService::new(client.clone()),
            stock: StockService::new(client.clone()),
            transfers: StockTransferService::new(client.clone()),
            purchases: PurchaseService::new(client.clone()),
            status: StatusService::new(client),
        }
    }
}
