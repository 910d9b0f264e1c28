//! # Session Context
//!
//! Holds the signed-in session for the whole process and persists it
//! through a pluggable [`SessionStore`].
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Session Lifecycle                               │
//! │                                                                         │
//! │   startup ──► load() ──► stored token expired? ──yes──► clear store    │
//! │                               │ no                                      │
//! │                               ▼                                         │
//! │                        current = stored                                 │
//! │                                                                         │
//! │   login / register ──► set(session)      (memory + store)              │
//! │   refresh          ──► update_token(..)  (memory + store)              │
//! │   logout / 401     ──► invalidate()      (memory + store)              │
//! │                                                                         │
//! │   ApiClient reads token() before every request                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A malformed token counts as expired.

use chrono::{DateTime, Utc};
use retail_core::session::{self, Session, SessionUser, REFRESH_MARGIN_MINUTES};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Stores
// =============================================================================

/// Persistence for the session between runs.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> ClientResult<Option<Session>>;
    fn save(&self, session: &Session) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

/// Keeps the session in memory only.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `session`.
    pub fn with_session(session: Session) -> Self {
        MemorySessionStore {
            slot: Mutex::new(Some(session)),
        }
    }

    fn lock(&self) -> ClientResult<std::sync::MutexGuard<'_, Option<Session>>> {
        self.slot
            .lock()
            .map_err(|e| ClientError::Storage(format!("session lock poisoned: {}", e)))
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ClientResult<Option<Session>> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.lock()? = None;
        Ok(())
    }
}

/// Keeps the session as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSessionStore { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ClientResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // unreadable file: treat as signed out
                warn!(path = ?self.path, error = %e, "Discarding unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, contents)?;
        debug!(path = ?self.path, "Session saved");
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Session Context
// =============================================================================

/// The process-wide session, shared by the HTTP client and the app.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    current: Arc<RwLock<Option<Session>>>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        SessionContext {
            store,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// A context without persistence.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Picks the store the configuration asks for.
    pub fn from_config(config: &ClientConfig) -> Self {
        match config.session_path() {
            Some(path) => {
                debug!(?path, "Using file session store");
                Self::new(Arc::new(FileSessionStore::new(path)))
            }
            None => Self::in_memory(),
        }
    }

    /// Reads the stored session once at startup.
    ///
    /// An expired or malformed token clears the store and yields `None`.
    pub async fn load(&self, now: DateTime<Utc>) -> ClientResult<Option<Session>> {
        let stored = self.store.load()?;
        let session = match stored {
            Some(s) if s.is_expired(now) => {
                info!("Stored session has expired, clearing");
                self.store.clear()?;
                None
            }
            other => other,
        };
        *self.current.write().await = session.clone();
        Ok(session)
    }

    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|s| s.token.clone())
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .and_then(|s| s.refresh_token.clone())
    }

    pub async fn user(&self) -> Option<SessionUser> {
        self.current.read().await.as_ref().map(|s| s.user.clone())
    }

    /// Starts a session (login or register).
    pub async fn set(&self, session: Session) -> ClientResult<()> {
        self.store.save(&session)?;
        *self.current.write().await = Some(session);
        Ok(())
    }

    /// Replaces the tokens of the current session.
    pub async fn update_token(
        &self,
        token: String,
        refresh_token: Option<String>,
    ) -> ClientResult<()> {
        let mut guard = self.current.write().await;
        let Some(current) = guard.take() else {
            return Err(ClientError::Storage("no session to refresh".into()));
        };
        let updated = current.with_token(token, refresh_token);
        let saved = self.store.save(&updated);
        *guard = Some(updated);
        saved
    }

    /// Ends the session. Store failures are logged, never returned.
    pub async fn invalidate(&self) {
        *self.current.write().await = None;
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear stored session");
        }
    }

    /// True when a session exists and its token is still valid. An expired
    /// session is invalidated on the way.
    pub async fn is_authenticated(&self, now: DateTime<Utc>) -> bool {
        let expired = match self.current.read().await.as_ref() {
            None => return false,
            Some(s) => s.is_expired(now),
        };
        if expired {
            info!("Session token expired, signing out");
            self.invalidate().await;
        }
        !expired
    }

    /// How long to wait before refreshing the token, leaving the standard
    /// margin before expiry. `None` when no refresh should be scheduled.
    pub async fn refresh_delay(&self, now: DateTime<Utc>) -> Option<Duration> {
        let token = self.token().await?;
        session::refresh_delay(&token, now, chrono::Duration::minutes(REFRESH_MARGIN_MINUTES))
            .and_then(|d| d.to_std().ok())
    }
}
