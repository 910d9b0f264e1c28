//! # Session Model
//!
//! The signed-in user, role checks, and JWT expiry decoding.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   login ──► AuthResponse ──► Session { token, refresh_token, user }    │
//! │                                     │                                   │
//! │             ┌───────────────────────┼────────────────────────┐          │
//! │             ▼                       ▼                        ▼          │
//! │      refresh_due(now)?        is_expired(now)?         401 response    │
//! │      → POST /auth/refresh     → invalidate             → invalidate    │
//! │      → with_token(new)                                 → /signin       │
//! │                                                                         │
//! │   A token whose payload cannot be decoded counts as expired.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here reads the clock. Callers pass `now`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{AuthResponse, BranchRef, Profile};

/// How long before expiry the token is refreshed.
pub const REFRESH_MARGIN_MINUTES: i64 = 5;

// =============================================================================
// Roles
// =============================================================================

/// Numeric user roles. A lower code means more privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Role {
    Admin,
    Manager,
    Staff,
}

impl Role {
    pub const fn code(self) -> i16 {
        match self {
            Role::Admin => 1,
            Role::Manager => 2,
            Role::Staff => 3,
        }
    }

    pub fn from_code(code: i16) -> Option<Role> {
        match code {
            1 => Some(Role::Admin),
            2 => Some(Role::Manager),
            3 => Some(Role::Staff),
            _ => None,
        }
    }
}

// =============================================================================
// Session User
// =============================================================================

/// The user record kept with the session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionUser {
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub given_name: Option<String>,
    /// Raw role code as sent by the server.
    pub role: Option<i16>,
    #[serde(default)]
    pub active: bool,
    pub branch: Option<BranchRef>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile_phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl SessionUser {
    /// True when the user holds `required` or a more privileged role.
    ///
    /// Admins pass every check. A user without a role passes none.
    pub fn has_role(&self, required: Role) -> bool {
        match self.role {
            None | Some(0) => false,
            Some(1) => true,
            Some(code) => code <= required.code(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin.code())
    }

    /// Admins and managers.
    pub fn is_manager(&self) -> bool {
        matches!(self.role, Some(1) | Some(2))
    }

    /// Admins, managers and staff.
    pub fn is_staff(&self) -> bool {
        matches!(self.role, Some(code) if (1..=Role::Staff.code()).contains(&code))
    }

    /// Given name, else user name, else empty.
    pub fn display_name(&self) -> &str {
        self.given_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.user_name.as_deref())
            .unwrap_or("")
    }

    /// "Admin", "Manager", "Staff", "User", or empty without a role.
    pub fn role_display_name(&self) -> &'static str {
        match self.role {
            None | Some(0) => "",
            Some(code) => match Role::from_code(code) {
                Some(Role::Admin) => "Admin",
                Some(Role::Manager) => "Manager",
                Some(Role::Staff) => "Staff",
                None => "User",
            },
        }
    }

    /// Copies every field the profile carries over this record.
    pub fn merge_profile(&mut self, profile: &Profile) {
        if profile.user_id.is_some() {
            self.user_id = profile.user_id;
        }
        if let Some(name) = &profile.user_name {
            self.user_name = Some(name.clone());
        }
        if let Some(name) = &profile.given_name {
            self.given_name = Some(name.clone());
        }
        if let Some(email) = &profile.email {
            self.email = Some(email.clone());
        }
        if let Some(phone) = &profile.mobile_phone {
            self.mobile_phone = Some(phone.clone());
        }
        if let Some(url) = &profile.avatar_url {
            self.avatar_url = Some(url.clone());
        }
    }
}

impl From<&AuthResponse> for SessionUser {
    fn from(resp: &AuthResponse) -> Self {
        SessionUser {
            user_id: resp.user_id,
            user_name: resp.user_name.clone(),
            given_name: resp.given_name.clone(),
            role: resp.role,
            active: resp.active,
            branch: resp.branch.clone(),
            ..Default::default()
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// Credentials and user of a signed-in session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Session {
    pub token: String,
    pub refresh_token: Option<String>,
    pub user: SessionUser,
}

impl Session {
    /// Builds a session from a login/register response.
    ///
    /// Returns `None` when the response carries no token.
    pub fn from_auth(resp: &AuthResponse) -> Option<Session> {
        let token = resp.token.clone().filter(|t| !t.is_empty())?;
        Some(Session {
            token,
            refresh_token: resp.refresh_token.clone(),
            user: SessionUser::from(resp),
        })
    }

    /// Replaces the access token (and the refresh token when one is given).
    pub fn with_token(mut self, token: String, refresh_token: Option<String>) -> Session {
        self.token = token;
        if refresh_token.is_some() {
            self.refresh_token = refresh_token;
        }
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        is_token_expired(&self.token, now)
    }
}

// =============================================================================
// JWT Payload
// =============================================================================

/// The payload claims the client cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Option<String>,
    /// Expiry, seconds since the epoch.
    pub exp: Option<i64>,
    pub iat: Option<i64>,
}

/// Decodes the payload segment of a JWT without verifying the signature.
///
/// ## Errors
/// - [`CoreError::MalformedToken`] when there is no payload segment
/// - [`CoreError::TokenPayload`] when it is not base64url JSON
pub fn decode_claims(token: &str) -> CoreResult<TokenClaims> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_)) if !payload.is_empty() => payload,
        _ => return Err(CoreError::MalformedToken),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| CoreError::TokenPayload(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| CoreError::TokenPayload(e.to_string()))
}

/// Expiry instant of the token. `Ok(None)` when it carries no `exp`.
pub fn token_expiration(token: &str) -> CoreResult<Option<DateTime<Utc>>> {
    let claims = decode_claims(token)?;
    Ok(claims
        .exp
        .and_then(|exp| Utc.timestamp_opt(exp, 0).single()))
}

/// True when the token is past its `exp`, or cannot be decoded.
///
/// A token without `exp` never expires.
pub fn is_token_expired(token: &str, now: DateTime<Utc>) -> bool {
    match token_expiration(token) {
        Ok(Some(exp)) => exp < now,
        Ok(None) => false,
        Err(_) => true,
    }
}

/// Whole minutes left before expiry, floored at zero.
pub fn minutes_until_expiry(token: &str, now: DateTime<Utc>) -> i64 {
    match token_expiration(token) {
        Ok(Some(exp)) => (exp - now).num_minutes().max(0),
        _ => 0,
    }
}

/// How long to wait before refreshing so that it happens `margin` early:
/// `exp - now - margin`, to the second.
///
/// `None` when the token is already inside the margin (see [`refresh_due`]),
/// has expired, has no expiry, or cannot be decoded.
pub fn refresh_delay(token: &str, now: DateTime<Utc>, margin: Duration) -> Option<Duration> {
    match token_expiration(token) {
        Ok(Some(exp)) => {
            let delay = exp - now - margin;
            (delay > Duration::zero()).then_some(delay)
        }
        _ => None,
    }
}

/// True when the token is inside the refresh margin but not yet expired.
pub fn refresh_due(token: &str, now: DateTime<Utc>, margin: Duration) -> bool {
    match token_expiration(token) {
        Ok(Some(exp)) => exp >= now && exp - now <= margin,
        _ => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: i64,
    }

    fn mint(exp: DateTime<Utc>) -> String {
        encode(
            &Header::default(),
            &Claims {
                sub: "admin".into(),
                exp: exp.timestamp(),
            },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap()
    }

    fn user(role: Option<i16>) -> SessionUser {
        SessionUser {
            role,
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_claims() {
        let token = mint(now() + Duration::hours(1));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("admin"));
        assert_eq!(claims.exp, Some((now() + Duration::hours(1)).timestamp()));
    }

    #[test]
    fn test_malformed_token_counts_as_expired() {
        assert!(matches!(
            decode_claims("not-a-jwt"),
            Err(CoreError::MalformedToken)
        ));
        assert!(matches!(
            decode_claims("a.!!!.c"),
            Err(CoreError::TokenPayload(_))
        ));
        assert!(is_token_expired("not-a-jwt", now()));
        assert_eq!(minutes_until_expiry("not-a-jwt", now()), 0);
    }

    #[test]
    fn test_token_without_exp_never_expires() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"x"}"#);
        let token = format!("h.{}.s", payload);
        assert!(!is_token_expired(&token, now()));
        assert_eq!(token_expiration(&token).unwrap(), None);
    }

    #[test]
    fn test_expiry_and_minutes_left() {
        let token = mint(now() + Duration::minutes(30));
        assert!(!is_token_expired(&token, now()));
        assert_eq!(minutes_until_expiry(&token, now()), 30);
        assert!(is_token_expired(&token, now() + Duration::minutes(31)));
        assert_eq!(minutes_until_expiry(&token, now() + Duration::hours(2)), 0);
    }

    #[test]
    fn test_refresh_scheduling() {
        let margin = Duration::minutes(REFRESH_MARGIN_MINUTES);
        let token = mint(now() + Duration::minutes(30));

        assert_eq!(refresh_delay(&token, now(), margin), Some(Duration::minutes(25)));
        assert!(!refresh_due(&token, now(), margin));

        let later = now() + Duration::minutes(26);
        assert_eq!(refresh_delay(&token, later, margin), None);
        assert!(refresh_due(&token, later, margin));

        assert!(!refresh_due(&token, now() + Duration::hours(1), margin));
    }

    #[test]
    fn test_refresh_delay_counts_seconds() {
        let margin = Duration::minutes(REFRESH_MARGIN_MINUTES);
        let token = mint(now() + Duration::minutes(60) + Duration::seconds(30));

        let delay = refresh_delay(&token, now(), margin).unwrap();
        assert_eq!(delay, Duration::seconds(55 * 60 + 30));

        let woken = now() + delay;
        assert_eq!(refresh_delay(&token, woken, margin), None);
        assert!(refresh_due(&token, woken, margin));

        let inside = now() + Duration::minutes(55) + Duration::seconds(45);
        assert_eq!(refresh_delay(&token, inside, margin), None);
        assert!(refresh_due(&token, inside, margin));
    }

    #[test]
    fn test_role_checks() {
        let admin = user(Some(1));
        let manager = user(Some(2));
        let staff = user(Some(3));
        let nobody = user(None);

        assert!(admin.has_role(Role::Staff));
        assert!(admin.is_admin() && admin.is_manager() && admin.is_staff());

        assert!(manager.has_role(Role::Staff));
        assert!(manager.has_role(Role::Manager));
        assert!(!manager.has_role(Role::Admin));
        assert!(manager.is_manager() && !manager.is_admin());

        assert!(staff.has_role(Role::Staff));
        assert!(!staff.has_role(Role::Manager));
        assert!(staff.is_staff() && !staff.is_manager());

        assert!(!nobody.has_role(Role::Staff));
        assert!(!nobody.is_staff());
    }

    #[test]
    fn test_display_names() {
        let mut u = SessionUser {
            user_name: Some("nv01".into()),
            role: Some(2),
            ..Default::default()
        };
        assert_eq!(u.display_name(), "nv01");
        assert_eq!(u.role_display_name(), "Manager");

        u.given_name = Some("Lan".into());
        assert_eq!(u.display_name(), "Lan");

        assert_eq!(user(Some(7)).role_display_name(), "User");
        assert_eq!(user(None).role_display_name(), "");
        assert_eq!(SessionUser::default().display_name(), "");
    }

    #[test]
    fn test_session_from_auth() {
        let resp = AuthResponse {
            user_id: Some(4),
            user_name: Some("admin".into()),
            given_name: None,
            role: Some(1),
            active: true,
            token: Some("t1".into()),
            refresh_token: Some("r1".into()),
            branch: None,
        };
        let session = Session::from_auth(&resp).unwrap();
        assert_eq!(session.user.user_id, Some(4));
        assert_eq!(session.refresh_token.as_deref(), Some("r1"));

        let refreshed = session.with_token("t2".into(), None);
        assert_eq!(refreshed.token, "t2");
        assert_eq!(refreshed.refresh_token.as_deref(), Some("r1"));

        let no_token = AuthResponse { token: None, ..resp };
        assert!(Session::from_auth(&no_token).is_none());
    }

    #[test]
    fn test_merge_profile() {
        let mut u = SessionUser {
            user_id: Some(4),
            user_name: Some("admin".into()),
            role: Some(1),
            ..Default::default()
        };
        u.merge_profile(&Profile {
            given_name: Some("Quản trị".into()),
            email: Some("admin@shop.vn".into()),
            ..Default::default()
        });
        assert_eq!(u.given_name.as_deref(), Some("Quản trị"));
        assert_eq!(u.user_name.as_deref(), Some("admin"));
        assert_eq!(u.role, Some(1));
    }
}
