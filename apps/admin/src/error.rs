//! # Admin Error Type
//!
//! The one error type every command returns.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Retail Admin                           │
//! │                                                                         │
//! │  View                          Command                                  │
//! │  ────                          ───────                                  │
//! │                                                                         │
//! │  modal.submit(&ctx)                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  form.validate() ── Err ──► AdminError { VALIDATION_ERROR }  ───►│  │
//! │  │         │ Ok                                                     │  │
//! │  │         ▼                                                        │  │
//! │  │  service call ── ClientError ──► slice gets the message          │  │
//! │  │         │                        AdminError { code, same msg } ─►│  │
//! │  │         ▼                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The view shows `message`; `code` decides between an inline form       │
//! │  error, an alert, or a redirect to sign-in.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! ```json
//! { "code": "VALIDATION_ERROR", "message": "name is required" }
//! ```

use retail_client::ClientError;
use retail_core::forms::FormErrors;
use retail_core::{messages, CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for commands.
pub type AdminResult<T> = Result<T, AdminError>;

/// Error returned from commands and modal actions.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct AdminError {
    /// Machine-readable error code.
    pub code: ErrorCode,

    /// Human-readable message, already resolved for display.
    pub message: String,
}

/// Error codes, serialized as `SCREAMING_SNAKE_CASE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// 401, or no session where one is required
    Unauthorized,

    /// 403, or a role check failed
    Forbidden,

    /// 404, or an id missing from a slice
    NotFound,

    /// Rejected before any network call
    ValidationError,

    /// Other 4xx
    BadRequest,

    /// 5xx
    ServerError,

    /// No response
    NetworkError,

    /// No response within the timeout
    Timeout,

    /// Response body did not match
    DecodeError,

    /// Bad configuration
    ConfigError,

    /// Session could not be stored or refreshed
    SessionError,
}

impl AdminError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AdminError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AdminError::new(ErrorCode::ValidationError, message)
    }

    pub fn not_found(entity: &str, id: i64) -> Self {
        AdminError::new(ErrorCode::NotFound, format!("{} {} not found", entity, id))
    }

    pub fn unauthorized() -> Self {
        AdminError::new(ErrorCode::Unauthorized, messages::UNAUTHORIZED)
    }

    pub fn forbidden() -> Self {
        AdminError::new(ErrorCode::Forbidden, messages::FORBIDDEN)
    }

    /// Error for a failed service call, carrying the message already shown
    /// in the slice.
    pub fn from_client(err: &ClientError, message: impl Into<String>) -> Self {
        AdminError::new(code_for(err), message)
    }

    /// All form failures joined into one message; the first one leads.
    pub fn from_form(errors: &FormErrors) -> Self {
        let message = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        if message.is_empty() {
            AdminError::validation(messages::VALIDATION_ERROR)
        } else {
            AdminError::validation(message)
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == ErrorCode::Unauthorized
    }

    pub fn is_validation(&self) -> bool {
        self.code == ErrorCode::ValidationError
    }
}

fn code_for(err: &ClientError) -> ErrorCode {
    match err {
        ClientError::Unauthorized { .. } => ErrorCode::Unauthorized,
        ClientError::Http { status: 403, .. } => ErrorCode::Forbidden,
        ClientError::Http { status: 404, .. } => ErrorCode::NotFound,
        ClientError::Http { status, .. } if *status >= 500 => ErrorCode::ServerError,
        ClientError::Http { .. } => ErrorCode::BadRequest,
        ClientError::Network(_) => ErrorCode::NetworkError,
        ClientError::Timeout(_) => ErrorCode::Timeout,
        ClientError::Decode(_) | ClientError::Json(_) => ErrorCode::DecodeError,
        ClientError::Validation(_) => ErrorCode::ValidationError,
        ClientError::InvalidConfig(_)
        | ClientError::InvalidUrl(_)
        | ClientError::ConfigLoadFailed(_)
        | ClientError::ConfigSaveFailed(_) => ErrorCode::ConfigError,
        ClientError::Storage(_) | ClientError::NoRefreshToken | ClientError::Io(_) => {
            ErrorCode::SessionError
        }
    }
}

/// Without a caller-supplied message: server message, then a generic text
/// for the kind of failure.
impl From<ClientError> for AdminError {
    fn from(err: ClientError) -> Self {
        let fallback = match code_for(&err) {
            ErrorCode::Unauthorized => messages::UNAUTHORIZED,
            ErrorCode::Forbidden => messages::FORBIDDEN,
            ErrorCode::NotFound => messages::DATA_NOT_FOUND,
            ErrorCode::ServerError => messages::SERVER_ERROR,
            ErrorCode::NetworkError => messages::NETWORK_ERROR,
            ErrorCode::Timeout => messages::TIMEOUT_ERROR,
            ErrorCode::ValidationError => messages::VALIDATION_ERROR,
            _ => messages::SOMETHING_WENT_WRONG,
        };
        let message = match &err {
            ClientError::Validation(v) => v.to_string(),
            other => other.describe(fallback),
        };
        AdminError::from_client(&err, message)
    }
}

impl From<CoreError> for AdminError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity, id } => AdminError::not_found(&entity, id),
            CoreError::Validation(e) => AdminError::validation(e.to_string()),
            CoreError::LastUnit
            | CoreError::UnitIndexOutOfRange { .. }
            | CoreError::BaseUnitRate { .. }
            | CoreError::DuplicateLine { .. } => {
                AdminError::validation(err.to_string())
            }
            CoreError::MalformedToken | CoreError::TokenPayload(_) => {
                tracing::warn!(error = %err, "Rejecting unreadable token");
                AdminError::unauthorized()
            }
        }
    }
}

impl From<ValidationError> for AdminError {
    fn from(err: ValidationError) -> Self {
        AdminError::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_codes() {
        let forbidden = AdminError::from(ClientError::Http {
            status: 403,
            message: None,
        });
        assert_eq!(forbidden.code, ErrorCode::Forbidden);
        assert_eq!(forbidden.message, messages::FORBIDDEN);

        let conflict = AdminError::from(ClientError::Http {
            status: 409,
            message: Some("Mã sản phẩm đã tồn tại".into()),
        });
        assert_eq!(conflict.code, ErrorCode::BadRequest);
        assert_eq!(conflict.message, "Mã sản phẩm đã tồn tại");

        let offline = AdminError::from(ClientError::Network("refused".into()));
        assert_eq!(offline.code, ErrorCode::NetworkError);
        assert_eq!(offline.message, messages::NETWORK_ERROR);

        assert!(AdminError::from(ClientError::Unauthorized { message: None }).is_unauthorized());
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = AdminError::validation("name is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "name is required");
    }

    #[test]
    fn test_form_errors_joined() {
        let errors = vec![
            ValidationError::Required {
                field: "name".into(),
            },
            ValidationError::Required {
                field: "retailPrice".into(),
            },
        ];
        let err = AdminError::from_form(&errors);
        assert!(err.is_validation());
        assert_eq!(err.message, "name is required; retailPrice is required");
    }

    #[test]
    fn test_core_errors() {
        assert_eq!(
            AdminError::from(CoreError::NotFound {
                entity: "branch".into(),
                id: 7
            }),
            AdminError::not_found("branch", 7)
        );
        assert!(AdminError::from(CoreError::MalformedToken).is_unauthorized());
        assert!(AdminError::from(CoreError::LastUnit).is_validation());
    }
}
