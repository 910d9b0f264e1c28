//! # Views
//!
//! Headless view models for the admin pages. Each one reads the store and
//! drives commands; rendering is left to whatever front end is attached.
//!
//! ## Module Organization
//! ```text
//! views/
//! ├── mod.rs       ◄─── You are here
//! ├── list.rs      ◄─── Spinner / alert / table, pagination footer
//! ├── guard.rs     ◄─── require_auth, require_role
//! ├── menu.rs      ◄─── Sidebar entries filtered by role
//! ├── pages.rs     ◄─── Page controllers (search, filters, paging)
//! └── modal/
//!     ├── mod.rs       ◄─── FormModal for category, branch, supplier
//!     ├── product.rs   ◄─── Product modal with image upload
//!     └── voucher.rs   ◄─── Two-tab voucher campaign modal
//! ```
//!
//! ## List Page States
//! ```text
//!   idle ──► loading ──► success ──► Table
//!               │
//!               └──────► error ────► Alert (dismiss ──► ClearError)
//! ```

pub mod guard;
pub mod list;
pub mod menu;
pub mod modal;
pub mod pages;

pub use guard::{require_auth, require_role};
pub use list::{ListView, PaginationView};
pub use menu::{menu_for, MenuItem};
pub use modal::{FormModal, ProductModal, VoucherModal};
