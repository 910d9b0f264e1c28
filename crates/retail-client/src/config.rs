//! # Client Configuration
//!
//! Configuration of the admin client: which backend to talk to, how long to
//! wait, and where the signed-in session is kept.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     RETAIL_ENV=staging                                                 │
//! │     RETAIL_API_URL=https://api.example.com/api                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/retail-admin/admin.toml (Linux)                          │
//! │     ~/Library/Application Support/com.retail.admin/admin.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     development profile, http://localhost:8081/api, 10 s timeout       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # admin.toml
//! [app]
//! environment = "staging"   # development | staging | production
//!
//! [api]
//! base_url = "http://localhost:8081/api"
//! timeout_secs = 10
//!
//! [session]
//! store = "file"            # file | memory
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Base URL the HTTP client uses unless configured otherwise.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081/api";

/// Request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Environment Profiles
// =============================================================================

/// Deployment environment. Selects a [`Profile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// URLs, debug flag and log level of this environment.
    pub fn profile(&self) -> Profile {
        match self {
            Environment::Development => Profile {
                api_url: "http://localhost:8080/api",
                upload_url: "http://localhost:8080/api/upload",
                websocket_url: "ws://localhost:8080/ws",
                debug: true,
                log_level: "debug",
            },
            Environment::Staging => Profile {
                api_url: "https://staging-api.retailsystem.com/api",
                upload_url: "https://staging-api.retailsystem.com/api/upload",
                websocket_url: "wss://staging-api.retailsystem.com/ws",
                debug: true,
                log_level: "info",
            },
            Environment::Production => Profile {
                api_url: "http://localhost:8081/api",
                upload_url: "http://localhost:8081/api/upload",
                websocket_url: "ws://localhost:8081/ws",
                debug: false,
                log_level: "error",
            },
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ClientError::InvalidConfig(format!(
                "Unknown environment: '{}'. Valid options: development, staging, production",
                other
            ))),
        }
    }
}

/// Fixed settings of one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub api_url: &'static str,
    pub upload_url: &'static str,
    /// Configured only; the client opens no websocket.
    pub websocket_url: &'static str,
    /// Enables request/response debug logging in the HTTP client.
    pub debug: bool,
    /// Default tracing level when `RUST_LOG` is unset.
    pub log_level: &'static str,
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub environment: Environment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Overrides the profile URL. An empty value selects the profile URL.
    #[serde(default = "default_base_url")]
    pub base_url: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> Option<String> {
    Some(DEFAULT_API_BASE_URL.to_string())
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Where the session survives between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStoreKind {
    /// JSON file in the user data directory.
    #[default]
    File,
    /// Lost on exit.
    Memory,
}

impl std::str::FromStr for SessionStoreKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(SessionStoreKind::File),
            "memory" => Ok(SessionStoreKind::Memory),
            other => Err(ClientError::InvalidConfig(format!(
                "Unknown session store: '{}'. Valid options: file, memory",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default)]
    pub store: SessionStoreKind,

    /// Session file. Defaults to `session.json` in the data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub app: AppSettings,

    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (admin.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Checks URLs and limits.
    pub fn validate(&self) -> ClientResult<()> {
        let profile = self.profile();

        check_scheme(&self.api_base_url(), &["http", "https"])?;
        check_scheme(profile.upload_url, &["http", "https"])?;
        check_scheme(profile.websocket_url, &["ws", "wss"])?;

        if self.api.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.session.store == SessionStoreKind::File
            && self.session.path.is_none()
            && Self::default_data_dir().is_none()
        {
            return Err(ClientError::InvalidConfig(
                "No data directory available for the session file; set session.path".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(env) = std::env::var("RETAIL_ENV") {
            match env.parse() {
                Ok(parsed) => {
                    debug!(environment = %env, "Overriding environment from environment variable");
                    self.app.environment = parsed;
                }
                Err(_) => warn!(environment = %env, "Unknown environment in RETAIL_ENV"),
            }
        }

        if let Ok(url) = std::env::var("RETAIL_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = Some(url);
        }

        if let Ok(timeout) = std::env::var("RETAIL_API_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse::<u64>() {
                self.api.timeout_secs = secs;
            }
        }

        if let Ok(store) = std::env::var("RETAIL_SESSION_STORE") {
            match store.parse() {
                Ok(kind) => self.session.store = kind,
                Err(_) => warn!(store = %store, "Unknown session store in environment"),
            }
        }

        if let Ok(path) = std::env::var("RETAIL_SESSION_PATH") {
            self.session.path = Some(PathBuf::from(path));
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "retail", "admin")
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("admin.toml"))
    }

    fn default_data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn environment(&self) -> Environment {
        self.app.environment
    }

    pub fn profile(&self) -> Profile {
        self.app.environment.profile()
    }

    /// The configured base URL, else the environment's.
    pub fn api_base_url(&self) -> String {
        self.api
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(self.profile().api_url)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn debug(&self) -> bool {
        self.profile().debug
    }

    pub fn log_level(&self) -> &'static str {
        self.profile().log_level
    }

    /// Path of the session file, when the file store is selected.
    pub fn session_path(&self) -> Option<PathBuf> {
        match self.session.store {
            SessionStoreKind::Memory => None,
            SessionStoreKind::File => self
                .session
                .path
                .clone()
                .or_else(|| Self::default_data_dir().map(|dir| dir.join("session.json"))),
        }
    }
}

fn check_scheme(raw: &str, allowed: &[&str]) -> ClientResult<()> {
    let url = Url::parse(raw)?;
    if allowed.contains(&url.scheme()) {
        Ok(())
    } else {
        Err(ClientError::InvalidUrl(format!(
            "{} must use {}, got: {}",
            raw,
            allowed.join(" or "),
            url.scheme()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!("staging".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Production);
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.environment(), Environment::Development);
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.debug());
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_blank_base_url_uses_profile() {
        let mut config = ClientConfig::default();
        config.app.environment = Environment::Staging;
        config.api.base_url = Some("  ".into());
        assert_eq!(config.api_base_url(), "https://staging-api.retailsystem.com/api");

        config.api.base_url = None;
        config.app.environment = Environment::Production;
        assert_eq!(config.api_base_url(), "http://localhost:8081/api");
        assert!(!config.debug());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();
        config.session.store = SessionStoreKind::Memory;
        assert!(config.validate().is_ok());

        config.api.base_url = Some("ftp://files.local/api".into());
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = Some("not a url".into());
        assert!(config.validate().unwrap_err().is_config_error());

        config.api.base_url = Some("https://api.shop.vn/api/".into());
        assert_eq!(config.api_base_url(), "https://api.shop.vn/api");
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
            [app]
            environment = "production"

            [api]
            timeout_secs = 30

            [session]
            store = "memory"
        "#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.session_path(), None);

        let written = toml::to_string_pretty(&config).unwrap();
        assert!(written.contains("[api]"));
        assert!(written.contains("[session]"));
    }

    #[test]
    fn test_save_and_load_from_explicit_path() {
        let dir = std::env::temp_dir().join(format!("retail-config-{}", std::process::id()));
        let path = dir.join("admin.toml");

        let mut config = ClientConfig::default();
        config.app.environment = Environment::Staging;
        config.session.store = SessionStoreKind::Memory;
        config.save(Some(path.clone())).unwrap();

        let loaded = ClientConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.environment(), Environment::Staging);

        let _ = std::fs::remove_dir_all(dir);
    }
}
