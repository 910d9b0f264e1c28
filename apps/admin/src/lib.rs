//! # Retail Admin
//!
//! Headless core of the retail back-office: the state store, the commands
//! that talk to the REST backend, and view models for each page and modal.
//!
//! ## Module Organization
//! ```text
//! retail_admin/
//! ├── lib.rs          ◄─── You are here (tracing init & run)
//! ├── error.rs        ◄─── AdminError { code, message }
//! ├── state/
//! │   ├── store.rs    ◄─── RootState, Action, Store (dispatch/select)
//! │   └── context.rs  ◄─── AppContext (store + services + session)
//! ├── commands/       ◄─── One async command per backend operation
//! └── views/          ◄─── List states, guards, menu, modals, pages
//! ```
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  views ──► commands ──► retail_client::Services ──► REST backend        │
//! │    │           │                                                        │
//! │    │           └──► Store::dispatch(Action) ──► retail_core slices      │
//! │    │                                                                    │
//! │    └──► Store::select(|state| ...)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;
pub mod views;

use std::sync::Arc;

use chrono::Utc;
use retail_client::{ClientConfig, RecordingNavigator};
use retail_core::pagination::PageRequest;
use retail_core::types::LoginRequest;
use retail_core::LIST_PAGE_SIZE;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use error::{AdminError, AdminResult, ErrorCode};
pub use state::AppContext;

/// Starts a session against the configured backend and loads the data the
/// landing pages need.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load config (admin.toml, RETAIL_* overrides, validation)            │
/// │  2. Initialize tracing at the profile's log level                       │
/// │  3. Build AppContext (session store, API client, services)              │
/// │  4. Restore the stored session, or sign in with                         │
/// │     RETAIL_USER / RETAIL_PASSWORD when set                              │
/// │  5. Start the token refresh loop                                        │
/// │  6. Load categories and the first product page                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> AdminResult<()> {
    let config = ClientConfig::load(None)?;
    init_tracing(config.log_level());

    info!(environment = %config.environment(), "Starting retail admin");

    let navigator = Arc::new(RecordingNavigator::at("/"));
    let ctx = AppContext::new(&config, navigator.clone())?;

    let mut signed_in = commands::auth::initialize(&ctx, Utc::now()).await;
    if !signed_in {
        if let Some(request) = credentials_from_env() {
            signed_in = commands::auth::login(&ctx, &request, Utc::now()).await.is_ok();
        }
    }
    if !signed_in {
        warn!("No session; set RETAIL_USER and RETAIL_PASSWORD to sign in");
        return Err(AdminError::unauthorized());
    }

    let refresher = commands::auth::spawn_token_refresh(ctx.clone());

    commands::category::fetch_categories(&ctx).await?;
    let paged =
        commands::product::fetch_products_paged(&ctx, PageRequest::new(0, LIST_PAGE_SIZE)).await?;

    let user = ctx.store.select(|s| s.auth.user.clone());
    let menu = views::menu_for(user.as_ref());
    info!(
        user = user.as_ref().map(|u| u.display_name()).unwrap_or_default(),
        menu_items = menu.len(),
        products = paged.page.total_elements,
        from_fallback = paged.from_fallback,
        redirects = navigator.redirects().len(),
        "Admin ready"
    );

    refresher.abort();
    Ok(())
}

fn credentials_from_env() -> Option<LoginRequest> {
    let user_name = std::env::var("RETAIL_USER").ok()?;
    let password = std::env::var("RETAIL_PASSWORD").ok()?;
    Some(LoginRequest {
        user_name,
        password,
    })
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=retail=trace` - Show trace for retail crates only
/// - Default: the profile's level, `retail=debug`, `reqwest=warn`
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn default_filter(level: &str) -> String {
    format!("{},retail=debug,reqwest=warn", level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("info"), "info,retail=debug,reqwest=warn");
        assert_eq!(default_filter("error"), "error,retail=debug,reqwest=warn");
    }
}
