//! # retail-core: Pure Logic for the Retail Admin Client
//!
//! This crate holds everything the admin client decides on its own: wire
//! types, slice reducers, pagination and filter math, form models, validation,
//! and token decoding. None of it performs I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Retail Admin Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Views (apps/admin)                           │   │
//! │  │   List pages ──► Modals ──► Guards ──► Pagination controls     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ dispatch(action)                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  Commands (apps/admin)                          │   │
//! │  │   pending ──► service call ──► fulfilled | rejected            │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────┐  ┌────────────▼────────────────────┐  │
//! │  │ retail-client (HTTP, I/O)   │  │ ★ retail-core (THIS CRATE) ★    │  │
//! │  │ ApiClient, services,        │  │  types   slices   pagination    │  │
//! │  │ session store, config       │  │  filter  forms    validation    │  │
//! │  └─────────────────────────────┘  │  session money    format        │  │
//! │                                   │                                 │  │
//! │                                   │  NO I/O • NO CLOCK • NO NETWORK │  │
//! │                                   └─────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire DTOs (Product, Category, VoucherCampaign, ...)
//! - [`error`] - Domain and validation errors
//! - [`money`] - VND amounts and vi-VN number formatting
//! - [`format`] - Date, text, file size and percentage display helpers
//! - [`pagination`] - Local page slicing and the page-button window
//! - [`filter`] - Search / status predicates for locally filtered lists
//! - [`session`] - Session user, roles, JWT expiry decoding
//! - [`validation`] - Field rules shared by the modals
//! - [`messages`] - Fallback messages shown when the server sends none
//! - [`forms`] - Modal form models (transient state → API payload)
//! - [`slices`] - State slices and their reducers
//!
//! ## Example Usage
//!
//! ```rust
//! use retail_core::pagination::page_window;
//!
//! // 12 pages, currently on page 6 (zero-based): buttons 4..=8
//! assert_eq!(page_window(6, 12), vec![4, 5, 6, 7, 8]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filter;
pub mod format;
pub mod forms;
pub mod messages;
pub mod money;
pub mod pagination;
pub mod session;
pub mod slices;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Zero-based default page of server-paginated listings.
pub const DEFAULT_PAGE: usize = 0;

/// Default page size of server-paginated listings (stock, purchase orders, product search).
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page size the backend accepts.
pub const MAX_PAGE_SIZE: usize = 100;

/// Page sizes offered by table footers.
pub const TABLE_PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

/// Page size of the locally paginated list pages, the product slice and
/// the transfer list.
pub const LIST_PAGE_SIZE: usize = 10;

/// Maximum number of page buttons rendered at once.
pub const PAGE_WINDOW: usize = 5;

/// Route of the sign-in screen. A 401 redirects here.
pub const SIGNIN_PATH: &str = "/signin";

/// Delay between the last keystroke and the search it triggers.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Largest image accepted by the product image upload (5 MB).
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// MIME types accepted by the product image upload.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Name of the base unit a new product starts with.
pub const DEFAULT_UNIT_NAME: &str = "Cái";
