//! # Auth Commands
//!
//! Sign-in, registration, token refresh and startup session restore.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  startup ──► initialize(now)                                            │
//! │                 │  stored session valid? ──► Initialize(Some(session))  │
//! │                 │  expired / malformed   ──► Initialize(None)           │
//! │                 ▼                                                       │
//! │  login(request, now) ──► Login { Fulfilled(session) }                   │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  spawn_token_refresh ──► sleep until 5 min before exp ──► refresh_token │
//! │                 │              ▲                              │         │
//! │                 │              └──────── new token ◄──────────┘         │
//! │                 ▼                                                       │
//! │  logout ──► session cleared, slice signed out (even on failure)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use retail_client::ClientError;
use retail_core::session::{self, Session, REFRESH_MARGIN_MINUTES};
use retail_core::slices::auth::RefreshedToken;
use retail_core::slices::AuthAction;
use retail_core::types::{LoginRequest, Profile, RegisterRequest};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{track, verbose};
use crate::error::AdminResult;
use crate::state::AppContext;

/// Signs in. A failed attempt is counted in the slice with `now`.
pub async fn login(
    ctx: &AppContext,
    request: &LoginRequest,
    now: DateTime<Utc>,
) -> AdminResult<Session> {
    let auth = &ctx.services.auth;
    track(
        &ctx.store,
        |phase| AuthAction::Login { phase, at: now },
        async { auth.login(request).await.and_then(|r| session_from(&r)) },
        verbose("Login failed"),
    )
    .await
}

pub async fn register(ctx: &AppContext, request: &RegisterRequest) -> AdminResult<Session> {
    let auth = &ctx.services.auth;
    track(
        &ctx.store,
        AuthAction::Register,
        async { auth.register(request).await.and_then(|r| session_from(&r)) },
        verbose("Registration failed"),
    )
    .await
}

/// Signs out. The slice is cleared whatever the outcome.
pub async fn logout(ctx: &AppContext) -> AdminResult<()> {
    track(
        &ctx.store,
        AuthAction::Logout,
        ctx.services.auth.logout(),
        verbose("Logout failed"),
    )
    .await
}

/// Exchanges the refresh token. A rejection signs the user out.
pub async fn refresh_token(ctx: &AppContext) -> AdminResult<RefreshedToken> {
    let auth = &ctx.services.auth;
    let call = async {
        auth.refresh().await.and_then(|response| {
            match response.token.filter(|t| !t.is_empty()) {
                Some(token) => Ok(RefreshedToken {
                    token,
                    refresh_token: response.refresh_token,
                }),
                None => Err(ClientError::Decode(
                    "refresh response carried no token".to_string(),
                )),
            }
        })
    };
    track(&ctx.store, AuthAction::Refresh, call, verbose("Token refresh failed")).await
}

pub async fn fetch_profile(ctx: &AppContext) -> AdminResult<Profile> {
    track(
        &ctx.store,
        AuthAction::Profile,
        ctx.services.auth.profile(),
        verbose("Failed to get profile"),
    )
    .await
}

/// Restores the stored session into the slice. Returns whether the user is
/// signed in.
///
/// A store that cannot be read counts as signed out.
pub async fn initialize(ctx: &AppContext, now: DateTime<Utc>) -> bool {
    let session = match ctx.session.load(now).await {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "Could not read stored session");
            None
        }
    };
    let signed_in = session.is_some();
    info!(signed_in, "Session restored");
    ctx.store.dispatch(AuthAction::Initialize(session));
    signed_in
}

pub fn clear_auth_error(ctx: &AppContext) {
    ctx.store.dispatch(AuthAction::ClearError);
}

pub fn reset_login_attempts(ctx: &AppContext) {
    ctx.store.dispatch(AuthAction::ResetLoginAttempts);
}

// =============================================================================
// Automatic refresh
// =============================================================================

/// What the refresh loop does next for a given token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStep {
    /// Sleep, then look again.
    Wait(std::time::Duration),
    /// Inside the margin: refresh now.
    RefreshNow,
    /// No session, or a token that cannot be refreshed on a schedule.
    Stop,
}

pub fn next_refresh_step(token: Option<&str>, now: DateTime<Utc>) -> RefreshStep {
    let Some(token) = token else {
        return RefreshStep::Stop;
    };
    let margin = chrono::Duration::minutes(REFRESH_MARGIN_MINUTES);
    if session::refresh_due(token, now, margin) {
        return RefreshStep::RefreshNow;
    }
    match session::refresh_delay(token, now, margin).and_then(|d| d.to_std().ok()) {
        Some(delay) => RefreshStep::Wait(delay),
        None => RefreshStep::Stop,
    }
}

/// Keeps the access token fresh until the session ends or a refresh fails.
pub fn spawn_token_refresh(ctx: AppContext) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let token = ctx.session.token().await;
            match next_refresh_step(token.as_deref(), Utc::now()) {
                RefreshStep::Wait(delay) => {
                    debug!(delay_secs = delay.as_secs(), "Next token refresh scheduled");
                    tokio::time::sleep(delay).await;
                }
                RefreshStep::RefreshNow => {
                    if let Err(e) = refresh_token(&ctx).await {
                        warn!(error = %e, "Automatic token refresh failed");
                        break;
                    }
                }
                RefreshStep::Stop => {
                    debug!("Token refresh loop stopped");
                    break;
                }
            }
        }
    })
}

fn session_from(response: &retail_core::types::AuthResponse) -> Result<Session, ClientError> {
    Session::from_auth(response)
        .ok_or_else(|| ClientError::Decode("response carried no token".to_string()))
}
