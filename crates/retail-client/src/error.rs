//! # Client Error Types
//!
//! Every failure a service call can produce, as one closed enum.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Transport     │  │      HTTP       │  │       Payload           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Network        │  │  Unauthorized   │  │  Decode                 │ │
//! │  │  Timeout        │  │  Http{status,   │  │  Json                   │ │
//! │  │                 │  │       message}  │  │  Validation (pre-send)  │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────────────────────────────────┐  │
//! │  │ Configuration   │  │             Session storage                 │  │
//! │  │                 │  │                                             │  │
//! │  │  InvalidConfig  │  │  Storage, Io                                │  │
//! │  │  InvalidUrl     │  │                                             │  │
//! │  │  ConfigLoad/Save│  │  NoRefreshToken                             │  │
//! │  └─────────────────┘  └─────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers that show a message to the user go through
//! [`ClientError::describe`]: the server's own `message` wins, then the
//! fallback they pass in.

use retail_core::{messages, ValidationError};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// No response: connection refused, DNS failure, reset.
    #[error("Network error: {0}")]
    Network(String),

    /// No response within the configured timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    // =========================================================================
    // HTTP Errors
    // =========================================================================
    /// 401. The session has already been invalidated when this is returned.
    #[error("Unauthorized: {}", message.as_deref().unwrap_or("session expired"))]
    Unauthorized { message: Option<String> },

    /// Any other non-2xx status, with the server's `message` when it sent one.
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no message"))]
    Http { status: u16, message: Option<String> },

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// A 2xx body that does not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Local serialization failure (session file, request body).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rejected before any network call.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Session Storage Errors
    // =========================================================================
    #[error("Session storage error: {0}")]
    Storage(String),

    /// A token refresh was requested with no refresh token stored.
    #[error("No refresh token available")]
    NoRefreshToken,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }

    /// True when no response was received at all.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::Timeout(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }

    /// HTTP status of the response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { .. } => Some(401),
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of the server's error body, if present and non-empty.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Unauthorized { message } | ClientError::Http { message, .. } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }

    /// Message for the user: the server's message, else `fallback`.
    pub fn describe(&self, fallback: &str) -> String {
        messages::or_fallback(self.server_message(), fallback)
    }

    /// Message for the user: the server's message, else this error's own
    /// text, else `fallback`.
    pub fn describe_verbose(&self, fallback: &str) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        let own = self.to_string();
        if own.trim().is_empty() {
            fallback.to_string()
        } else {
            own
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert!(ClientError::Network("refused".into()).is_network());
        assert!(ClientError::Timeout(10).is_network());
        assert!(ClientError::Unauthorized { message: None }.is_unauthorized());
        assert!(!ClientError::Http {
            status: 500,
            message: None
        }
        .is_network());
        assert!(ClientError::InvalidUrl("x".into()).is_config_error());

        let v: ClientError = ValidationError::Required {
            field: "name".into(),
        }
        .into();
        assert!(v.is_validation());
    }

    #[test]
    fn test_describe_prefers_server_message() {
        let err = ClientError::Http {
            status: 400,
            message: Some("Product code already exists".into()),
        };
        assert_eq!(err.describe("fallback"), "Product code already exists");
        assert_eq!(err.status(), Some(400));

        let blank = ClientError::Http {
            status: 400,
            message: Some("  ".into()),
        };
        assert_eq!(blank.describe(messages::OPERATION_FAILED), messages::OPERATION_FAILED);
    }

    #[test]
    fn test_describe_verbose_uses_own_text() {
        let err = ClientError::Timeout(10);
        assert_eq!(err.describe("fallback"), "fallback");
        assert_eq!(
            err.describe_verbose("fallback"),
            "Request timed out after 10 seconds"
        );
    }
}
