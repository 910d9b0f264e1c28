//! # Auth Service
//!
//! Sign-in, registration and token refresh. Every successful call that
//! returns a token updates the shared [`SessionContext`](crate::session::SessionContext),
//! so the next request already carries it.
//!
//! ```text
//! login / register ──► POST /auth/{login,register} ──► token? ──► session.set
//! refresh          ──► POST /auth/refresh {refreshToken}
//!                         ├── ok  ──► session.update_token
//!                         └── err ──► session.invalidate
//! logout           ──► session.invalidate (no network call)
//! ```

use retail_core::session::Session;
use retail_core::types::{AuthResponse, LoginRequest, Profile, RefreshRequest, RegisterRequest};
use tracing::{error, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;

#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        AuthService { client }
    }

    pub async fn login(&self, credentials: &LoginRequest) -> ClientResult<AuthResponse> {
        let response: AuthResponse = self
            .client
            .post("/auth/login", credentials)
            .await
            .inspect_err(|e| error!(error = %e, user = %credentials.user_name, "Login failed"))?;

        self.store(&response).await?;
        info!(user = %credentials.user_name, "Signed in");
        Ok(response)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        let response: AuthResponse = self
            .client
            .post("/auth/register", request)
            .await
            .inspect_err(|e| error!(error = %e, user = %request.user_name, "Registration failed"))?;

        self.store(&response).await?;
        info!(user = %request.user_name, "Registered");
        Ok(response)
    }

    /// Ends the session locally. The backend keeps no session state.
    pub async fn logout(&self) -> ClientResult<()> {
        self.client.session().invalidate().await;
        info!("Signed out");
        Ok(())
    }

    pub async fn profile(&self) -> ClientResult<Profile> {
        self.client
            .get("/auth/profile", &[])
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch profile"))
    }

    /// Exchanges the stored refresh token for a new access token.
    ///
    /// Any failure ends the session.
    pub async fn refresh(&self) -> ClientResult<AuthResponse> {
        let session = self.client.session();
        let Some(refresh_token) = session.refresh_token().await else {
            warn!("Token refresh requested without a refresh token");
            return Err(ClientError::NoRefreshToken);
        };

        let result: ClientResult<AuthResponse> = self
            .client
            .post("/auth/refresh", &RefreshRequest { refresh_token })
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Token refresh failed, signing out");
                session.invalidate().await;
                return Err(e);
            }
        };

        if let Some(token) = response.token.clone().filter(|t| !t.is_empty()) {
            session
                .update_token(token, response.refresh_token.clone())
                .await?;
            info!("Access token refreshed");
        }
        Ok(response)
    }

    async fn store(&self, response: &AuthResponse) -> ClientResult<()> {
        match Session::from_auth(response) {
            Some(session) => self.client.session().set(session).await,
            None => {
                warn!("Auth response carried no token, session left unchanged");
                Ok(())
            }
        }
    }
}
