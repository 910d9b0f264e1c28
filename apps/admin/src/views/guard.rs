//! Route guards.
//!
//! Both guards send the user to `/signin` when they fail. An expired token
//! ends the session on the way.

use chrono::{DateTime, Utc};
use retail_client::redirect_to_signin;
use retail_core::session::{Role, SessionUser};
use retail_core::slices::AuthAction;
use tracing::{debug, warn};

use crate::error::{AdminError, AdminResult};
use crate::state::AppContext;

/// The signed-in user, or a redirect to sign in.
pub async fn require_auth(ctx: &AppContext, now: DateTime<Utc>) -> AdminResult<SessionUser> {
    let user = if ctx.session.is_authenticated(now).await {
        ctx.session.user().await
    } else {
        None
    };

    match user {
        Some(user) => Ok(user),
        None => {
            debug!(path = %ctx.navigator.current_path(), "Not signed in, redirecting");
            ctx.store.dispatch(AuthAction::ClearAuth);
            redirect_to_signin(ctx.navigator.as_ref());
            Err(AdminError::unauthorized())
        }
    }
}

/// The signed-in user if they hold `required` or a higher role.
pub async fn require_role(
    ctx: &AppContext,
    now: DateTime<Utc>,
    required: Role,
) -> AdminResult<SessionUser> {
    let user = require_auth(ctx, now).await?;
    if user.has_role(required) {
        return Ok(user);
    }
    warn!(
        user = %user.display_name(),
        role = ?user.role,
        ?required,
        "Insufficient role, redirecting"
    );
    redirect_to_signin(ctx.navigator.as_ref());
    Err(AdminError::forbidden())
}
