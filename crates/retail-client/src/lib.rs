//! # retail-client: REST Client for the Retail Admin
//!
//! Everything in the admin client that touches the outside world: the HTTP
//! client, one service per backend resource, the persisted session, the
//! layered configuration and the debounce/throttle timers.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         retail-client                                   │
//! │                                                                         │
//! │   commands (apps/admin)                                                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ┌───────────────┐    ┌───────────────┐    ┌────────────────────────┐  │
//! │  │   Services    │───►│   ApiClient   │───►│   REST backend         │  │
//! │  │ auth, product │    │ bearer token  │    │   /api/...             │  │
//! │  │ category, ... │    │ 401 handling  │    └────────────────────────┘  │
//! │  └───────────────┘    └───────┬───────┘                                │
//! │                               │                                         │
//! │                 ┌─────────────┴─────────────┐                          │
//! │                 ▼                           ▼                           │
//! │        ┌────────────────┐          ┌────────────────┐                  │
//! │        │ SessionContext │          │   Navigator    │                  │
//! │        │ memory + store │          │ → /signin      │                  │
//! │        └────────────────┘          └────────────────┘                  │
//! │                                                                         │
//! │   ClientConfig: defaults → admin.toml → RETAIL_* env → validate        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Environment profiles and the layered client configuration
//! - [`error`] - Client error type and user-facing message resolution
//! - [`http`] - [`ApiClient`] and query helpers
//! - [`navigation`] - Redirect hook used on 401
//! - [`services`] - Typed wrappers for each REST resource
//! - [`session`] - Session context and its stores
//! - [`timing`] - Debouncer and throttle
//!
//! ## Usage
//!
//! ```rust,ignore
//! use retail_client::{ApiClient, ClientConfig, NoopNavigator, Services, SessionContext};
//! use std::sync::Arc;
//!
//! let config = ClientConfig::load_or_default(None);
//! let session = SessionContext::from_config(&config);
//! session.load(chrono::Utc::now()).await?;
//!
//! let client = ApiClient::new(&config, session, Arc::new(NoopNavigator))?;
//! let services = Services::new(client);
//! let products = services.products.get_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod http;
pub mod navigation;
pub mod services;
pub mod session;
pub mod timing;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ClientConfig, Environment, Profile, SessionStoreKind};
pub use error::{ClientError, ClientResult};
pub use http::{build_query, query_string, ApiClient};
pub use navigation::{redirect_to_signin, Navigator, NoopNavigator, RecordingNavigator};
pub use services::Services;
pub use session::{FileSessionStore, MemorySessionStore, SessionContext, SessionStore};
pub use timing::{Debouncer, Throttle};
