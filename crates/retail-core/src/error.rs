//! # Error Types
//!
//! Domain-specific error types for retail-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  retail-core errors (this file)                                        │
//! │  ├── CoreError        - Token decoding, unit rules, lookups            │
//! │  └── ValidationError  - Form input failures (before any request)       │
//! │                                                                         │
//! │  retail-client errors (separate crate)                                 │
//! │  └── ClientError      - Network / HTTP / decode failures               │
//! │                                                                         │
//! │  admin errors (in app)                                                 │
//! │  └── AdminError       - What a view shows in its alert                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → AdminError → View   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the pure logic layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The token does not have three dot-separated segments.
    #[error("Malformed token: expected header.payload.signature")]
    MalformedToken,

    /// The payload segment is not valid base64url or not JSON.
    ///
    /// ## When This Occurs
    /// - A truncated token restored from a corrupted session file
    /// - A token issued by something other than the retail backend
    #[error("Token payload could not be decoded: {0}")]
    TokenPayload(String),

    /// A unit row was addressed by an index that does not exist.
    #[error("Unit index {index} out of range ({len} units)")]
    UnitIndexOutOfRange { index: usize, len: usize },

    /// The last remaining unit of a product cannot be removed.
    #[error("A product must keep at least one unit")]
    LastUnit,

    /// The base unit's rate is fixed at 1 and cannot be edited.
    #[error("Unit {index} is the base unit; its conversion rate is fixed at 1")]
    BaseUnitRate { index: usize },

    /// A product is already a line of the transfer being built.
    #[error("Product {product_id} is already in the list")]
    DuplicateLine { product_id: i64 },

    /// An entity referenced by id is not present in the slice.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "toggle" on branch #7
    ///      │
    ///      ▼
    /// Look up branch #7 in branch slice
    ///      │
    ///      ▼
    /// NotFound { entity: "branch", id: 7 }
    ///      │
    ///      ▼
    /// Alert: "branch 7 not found"
    /// ```
    #[error("{entity} {id} not found")]
    NotFound { entity: String, id: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the form models before any network call is attempted, and shown
/// inline next to the offending control.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value must be at least one.
    #[error("{field} must be at least 1")]
    MustBePositive { field: String },

    /// Invalid format (e.g., email, phone, barcode).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// The date range ends before it starts.
    #[error("{field} must end after it starts")]
    InvertedRange { field: String },
}

impl ValidationError {
    /// Name of the form control the error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::Negative { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::InvertedRange { field } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::NotFound {
            entity: "branch".to_string(),
            id: 7,
        };
        assert_eq!(err.to_string(), "branch 7 not found");
        assert_eq!(
            CoreError::LastUnit.to_string(),
            "A product must keep at least one unit"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "code".to_string(),
            max: 50,
        };
        assert_eq!(err.to_string(), "code must be at most 50 characters");
    }

    #[test]
    fn test_validation_field_accessor() {
        let err = ValidationError::Negative {
            field: "discountValue".to_string(),
        };
        assert_eq!(err.field(), "discountValue");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "code".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
