//! Authentication slice.
//!
//! ## Session Transitions
//! ```text
//!            Login / Register fulfilled
//!   ┌──────────────┐ ─────────────────────────► ┌──────────────────┐
//!   │  signed out  │                            │    signed in     │
//!   │  user: None  │ ◄───────────────────────── │  user + token    │
//!   └──────────────┘   Logout (either outcome)  └──────────────────┘
//!          ▲           Refresh rejected                  │
//!          │           ClearAuth                         │ Refresh fulfilled
//!          │                                             ▼ (token replaced)
//!   Login rejected: loginAttempts += 1
//! ```
//!
//! The reducer never reads the clock. The time of a failed login attempt
//! travels with the action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{type_name, Lifecycle, RequestState};
use crate::session::{Session, SessionUser};
use crate::types::Profile;

const SLICE: &str = "auth";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSlice {
    pub user: Option<SessionUser>,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_authenticated: bool,
    #[serde(flatten)]
    pub request: RequestState,
    pub login_attempts: u32,
    pub last_login_attempt: Option<DateTime<Utc>>,
}

/// New tokens from `/auth/refresh`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedToken {
    pub token: String,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    Login {
        phase: Lifecycle<Session>,
        /// When the attempt was made; recorded on rejection.
        at: DateTime<Utc>,
    },
    Register(Lifecycle<Session>),
    Logout(Lifecycle<()>),
    Refresh(Lifecycle<RefreshedToken>),
    Profile(Lifecycle<Profile>),
    ClearError,
    ClearAuth,
    ResetLoginAttempts,
    /// Restores a stored session at startup. `None` signs out.
    Initialize(Option<Session>),
    UpdateUserProfile(Profile),
}

impl AuthAction {
    pub fn name(&self) -> String {
        match self {
            AuthAction::Login { phase, .. } => type_name(SLICE, "login", phase),
            AuthAction::Register(p) => type_name(SLICE, "register", p),
            AuthAction::Logout(p) => type_name(SLICE, "logout", p),
            AuthAction::Refresh(p) => type_name(SLICE, "refreshToken", p),
            AuthAction::Profile(p) => type_name(SLICE, "getProfile", p),
            AuthAction::ClearError => format!("{}/clearError", SLICE),
            AuthAction::ClearAuth => format!("{}/clearAuth", SLICE),
            AuthAction::ResetLoginAttempts => format!("{}/resetLoginAttempts", SLICE),
            AuthAction::Initialize(_) => format!("{}/initializeAuth", SLICE),
            AuthAction::UpdateUserProfile(_) => format!("{}/updateUserProfile", SLICE),
        }
    }
}

impl AuthSlice {
    pub fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::Login { phase, at } => match phase {
                Lifecycle::Rejected(message) => {
                    self.request.apply::<()>(Lifecycle::Rejected(message));
                    self.sign_out();
                    self.login_attempts += 1;
                    self.last_login_attempt = Some(at);
                }
                other => {
                    if let Some(session) = self.request.apply(other) {
                        self.sign_in(session);
                        self.login_attempts = 0;
                        self.last_login_attempt = None;
                    }
                }
            },
            AuthAction::Register(phase) => {
                if let Some(session) = self.request.apply(phase) {
                    self.sign_in(session);
                }
            }
            AuthAction::Logout(phase) => {
                let done = !matches!(phase, Lifecycle::Pending);
                self.request.apply(phase);
                if done {
                    self.sign_out();
                }
            }
            AuthAction::Refresh(phase) => {
                let rejected = matches!(phase, Lifecycle::Rejected(_));
                if let Some(refreshed) = self.request.apply(phase) {
                    self.token = Some(refreshed.token);
                    if refreshed.refresh_token.is_some() {
                        self.refresh_token = refreshed.refresh_token;
                    }
                } else if rejected {
                    self.sign_out();
                }
            }
            AuthAction::Profile(phase) => {
                if let Some(profile) = self.request.apply(phase) {
                    self.merge_profile(&profile);
                }
            }
            AuthAction::ClearError => self.request.clear_error(),
            AuthAction::ClearAuth => {
                self.sign_out();
                self.request = RequestState::default();
            }
            AuthAction::ResetLoginAttempts => {
                self.login_attempts = 0;
                self.last_login_attempt = None;
            }
            AuthAction::Initialize(Some(session)) => self.sign_in(session),
            AuthAction::Initialize(None) => self.sign_out(),
            AuthAction::UpdateUserProfile(profile) => self.merge_profile(&profile),
        }
    }

    /// The signed-in session, if any.
    pub fn session(&self) -> Option<Session> {
        match (&self.token, &self.user) {
            (Some(token), Some(user)) => Some(Session {
                token: token.clone(),
                refresh_token: self.refresh_token.clone(),
                user: user.clone(),
            }),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(SessionUser::is_admin)
    }

    pub fn is_manager(&self) -> bool {
        self.user.as_ref().is_some_and(SessionUser::is_manager)
    }

    pub fn is_staff(&self) -> bool {
        self.user.as_ref().is_some_and(SessionUser::is_staff)
    }

    fn sign_in(&mut self, session: Session) {
        self.user = Some(session.user);
        self.token = Some(session.token);
        self.refresh_token = session.refresh_token;
        self.is_authenticated = true;
    }

    fn sign_out(&mut self) {
        self.user = None;
        self.token = None;
        self.refresh_token = None;
        self.is_authenticated = false;
    }

    fn merge_profile(&mut self, profile: &Profile) {
        if let Some(user) = self.user.as_mut() {
            user.merge_profile(profile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slices::LoadStatus;
    use chrono::TimeZone;

    fn session(role: i16) -> Session {
        Session {
            token: "header.payload.sig".into(),
            refresh_token: Some("refresh".into()),
            user: SessionUser {
                user_id: Some(1),
                user_name: Some("admin".into()),
                role: Some(role),
                active: true,
                ..Default::default()
            },
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_failed_logins_count_attempts() {
        let mut slice = AuthSlice::default();
        for _ in 0..2 {
            slice.reduce(AuthAction::Login {
                phase: Lifecycle::Rejected("Invalid credentials".into()),
                at: at(),
            });
        }
        assert_eq!(slice.login_attempts, 2);
        assert_eq!(slice.last_login_attempt, Some(at()));
        assert!(!slice.is_authenticated);
        assert_eq!(slice.request.error.as_deref(), Some("Invalid credentials"));

        slice.reduce(AuthAction::Login {
            phase: Lifecycle::Fulfilled(session(1)),
            at: at(),
        });
        assert!(slice.is_authenticated);
        assert_eq!(slice.login_attempts, 0);
        assert_eq!(slice.last_login_attempt, None);
        assert_eq!(slice.request.status, LoadStatus::Success);
        assert!(slice.is_admin());
    }

    #[test]
    fn test_logout_clears_even_when_rejected() {
        let mut slice = AuthSlice::default();
        slice.reduce(AuthAction::Initialize(Some(session(2))));
        assert!(slice.is_manager());

        slice.reduce(AuthAction::Logout(Lifecycle::Pending));
        assert!(slice.is_authenticated);

        slice.reduce(AuthAction::Logout(Lifecycle::Rejected("offline".into())));
        assert!(!slice.is_authenticated);
        assert!(slice.user.is_none());
        assert!(slice.token.is_none());
        assert_eq!(slice.request.error.as_deref(), Some("offline"));
    }

    #[test]
    fn test_refresh_replaces_token_or_signs_out() {
        let mut slice = AuthSlice::default();
        slice.reduce(AuthAction::Initialize(Some(session(3))));

        slice.reduce(AuthAction::Refresh(Lifecycle::Fulfilled(RefreshedToken {
            token: "new.token.sig".into(),
            refresh_token: None,
        })));
        assert_eq!(slice.token.as_deref(), Some("new.token.sig"));
        assert_eq!(slice.refresh_token.as_deref(), Some("refresh"));
        assert!(slice.is_staff());
        assert!(!slice.is_manager());

        slice.reduce(AuthAction::Refresh(Lifecycle::Rejected("expired".into())));
        assert!(!slice.is_authenticated);
        assert!(slice.session().is_none());
    }

    #[test]
    fn test_profile_merges_into_user() {
        let mut slice = AuthSlice::default();
        slice.reduce(AuthAction::Initialize(Some(session(1))));
        slice.reduce(AuthAction::Profile(Lifecycle::Fulfilled(Profile {
            given_name: Some("Lan".into()),
            email: Some("lan@shop.vn".into()),
            ..Default::default()
        })));
        let user = slice.user.as_ref().unwrap();
        assert_eq!(user.display_name(), "Lan");
        assert_eq!(user.user_name.as_deref(), Some("admin"));
        assert_eq!(user.email.as_deref(), Some("lan@shop.vn"));
    }

    #[test]
    fn test_profile_without_user_is_ignored() {
        let mut slice = AuthSlice::default();
        slice.reduce(AuthAction::UpdateUserProfile(Profile {
            given_name: Some("Lan".into()),
            ..Default::default()
        }));
        assert!(slice.user.is_none());
    }

    #[test]
    fn test_clear_auth_and_reset_attempts() {
        let mut slice = AuthSlice::default();
        slice.reduce(AuthAction::Login {
            phase: Lifecycle::Rejected("nope".into()),
            at: at(),
        });
        slice.reduce(AuthAction::ResetLoginAttempts);
        assert_eq!(slice.login_attempts, 0);

        slice.reduce(AuthAction::Register(Lifecycle::Fulfilled(session(3))));
        assert_eq!(slice.session().map(|s| s.token), Some("header.payload.sig".into()));
        slice.reduce(AuthAction::ClearAuth);
        assert_eq!(slice, AuthSlice::default());
    }

    #[test]
    fn test_action_names() {
        let login = AuthAction::Login {
            phase: Lifecycle::Pending,
            at: at(),
        };
        assert_eq!(login.name(), "auth/login/pending");
        assert_eq!(AuthAction::ClearAuth.name(), "auth/clearAuth");
    }
}
