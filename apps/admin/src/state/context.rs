//! The context every command runs against.

use std::sync::Arc;

use retail_client::{ApiClient, ClientConfig, Navigator, Services, SessionContext};
use tracing::info;

use crate::error::AdminResult;
use crate::state::Store;

/// Store, services, session and navigation, wired together once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub store: Store,
    pub services: Services,
    pub session: SessionContext,
    pub navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Builds the context from configuration. The session is not loaded yet;
    /// see [`crate::commands::auth::initialize`].
    pub fn new(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> AdminResult<Self> {
        let session = SessionContext::from_config(config);
        Self::with_session(config, session, navigator)
    }

    pub fn with_session(
        config: &ClientConfig,
        session: SessionContext,
        navigator: Arc<dyn Navigator>,
    ) -> AdminResult<Self> {
        let client = ApiClient::new(config, session.clone(), navigator.clone())?;
        info!(
            base_url = %client.base_url(),
            environment = %config.environment(),
            "API client ready"
        );
        Ok(AppContext {
            store: Store::new(),
            services: Services::new(client),
            session,
            navigator,
        })
    }
}
