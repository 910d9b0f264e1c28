//! # Validation Module
//!
//! Field rules the modals check before anything is sent.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form model (retail-core::forms)                              │
//! │  ├── Required fields, lengths, numeric ranges                          │
//! │  └── THIS MODULE supplies the individual rules                         │
//! │           │                                                             │
//! │           ▼  (no request is made while any rule fails)                  │
//! │  Layer 2: Backend                                                      │
//! │  ├── Uniqueness (codes, barcodes)                                      │
//! │  └── Referential checks (category, branch)                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Rejection message shown in the modal alert                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use retail_core::validation::{validate_email, validate_required};
//!
//! assert!(validate_required("name", "Nước suối").is_ok());
//! assert!(validate_email("email", "not-an-email").is_err());
//! ```

use crate::error::ValidationError;
use crate::{ALLOWED_IMAGE_TYPES, MAX_FILE_SIZE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Limits
// =============================================================================

pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 50;
pub const NAME_MAX_LENGTH: usize = 200;
pub const CODE_MAX_LENGTH: usize = 50;
pub const DESCRIPTION_MAX_LENGTH: usize = 500;
pub const PRICE_MIN: f64 = 0.0;
pub const PRICE_MAX: f64 = 999_999_999.99;
pub const QUANTITY_MIN: i64 = 0;
pub const QUANTITY_MAX: i64 = 999_999;

// =============================================================================
// String Validators
// =============================================================================

/// Fails when the trimmed value is empty.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Fails when the value has more than `max` characters.
pub fn validate_max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Required name of at most 200 characters.
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    validate_required(field, value)?;
    validate_max_len(field, value.trim(), NAME_MAX_LENGTH)
}

/// Code of at most 50 characters. Emptiness is checked separately.
pub fn validate_code(field: &str, value: &str) -> ValidationResult<()> {
    validate_max_len(field, value.trim(), CODE_MAX_LENGTH)
}

pub fn validate_description(field: &str, value: &str) -> ValidationResult<()> {
    validate_max_len(field, value, DESCRIPTION_MAX_LENGTH)
}

/// Password length between 6 and 50 characters.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    validate_required("password", password)?;
    let len = password.chars().count();
    if len < PASSWORD_MIN_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: PASSWORD_MIN_LENGTH,
        });
    }
    if len > PASSWORD_MAX_LENGTH {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: PASSWORD_MAX_LENGTH,
        });
    }
    Ok(())
}

/// `local@domain.tld`: no whitespace, one `@`, a dot inside the domain.
///
/// Empty input passes; combine with [`validate_required`] when needed.
pub fn validate_email(field: &str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Ok(());
    }
    let invalid = || ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid email address".to_string(),
    };

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let has_inner_dot = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if !has_inner_dot {
        return Err(invalid());
    }
    Ok(())
}

/// Digits, spaces, `+`, `-` and parentheses. Empty input passes.
pub fn validate_phone(field: &str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Ok(());
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')'))
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "may contain only digits, spaces, +, - and parentheses".to_string(),
        });
    }
    Ok(())
}

/// Letters, digits, hyphens and underscores. Empty input passes.
pub fn validate_barcode(field: &str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Ok(());
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Price between 0 and 999 999 999.99.
pub fn validate_price(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() || !(PRICE_MIN..=PRICE_MAX).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: PRICE_MIN,
            max: PRICE_MAX,
        });
    }
    Ok(())
}

/// Stock or voucher quantity between 0 and 999 999.
pub fn validate_quantity(field: &str, value: i64) -> ValidationResult<()> {
    if !(QUANTITY_MIN..=QUANTITY_MAX).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: QUANTITY_MIN as f64,
            max: QUANTITY_MAX as f64,
        });
    }
    Ok(())
}

pub fn validate_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_nan() || value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

pub fn validate_at_least_one(field: &str, value: i64) -> ValidationResult<()> {
    if value < 1 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Upload Validators
// =============================================================================

/// Checks an image picked for upload: at most 5 MB, jpeg/png/gif/webp.
///
/// ## User Workflow
/// ```text
/// Product modal: "Choose image"
///      │
///      ▼
/// validate_image(mime, size) ← THIS FUNCTION
///      │
///      ├── unsupported type → "file must be one of: [...]"
///      ├── > 5 MB           → "file must be between 0 and 5242880"
///      │
///      └── OK → kept in the form, uploaded after the product is saved
/// ```
pub fn validate_image(mime: &str, size: u64) -> ValidationResult<()> {
    if !ALLOWED_IMAGE_TYPES.contains(&mime) {
        return Err(ValidationError::NotAllowed {
            field: "file".to_string(),
            allowed: ALLOWED_IMAGE_TYPES.iter().map(|t| t.to_string()).collect(),
        });
    }
    if size > MAX_FILE_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "file".to_string(),
            min: 0.0,
            max: MAX_FILE_SIZE as f64,
        });
    }
    Ok(())
}

/// Lenient float parsing of a text input. Blank or invalid input is `None`.
pub fn parse_decimal(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Nước suối Aquafina").is_ok());
        assert!(validate_name("name", "   ").is_err());
        assert_eq!(
            validate_name("name", &"A".repeat(201)),
            Err(ValidationError::TooLong {
                field: "name".into(),
                max: 200
            })
        );
        // counted in characters, not bytes
        assert!(validate_name("name", &"ư".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret").is_ok());
        assert!(matches!(
            validate_password("12345"),
            Err(ValidationError::TooShort { min: 6, .. })
        ));
        assert!(validate_password(&"x".repeat(51)).is_err());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "").is_ok());
        assert!(validate_email("email", "kho@shop.vn").is_ok());
        assert!(validate_email("email", "a@b.c").is_ok());
        assert!(validate_email("email", "no-at-sign.vn").is_err());
        assert!(validate_email("email", "a@@b.vn").is_err());
        assert!(validate_email("email", "a@b").is_err());
        assert!(validate_email("email", "a@.vn").is_err());
        assert!(validate_email("email", "a b@c.vn").is_err());
    }

    #[test]
    fn test_validate_phone_and_barcode() {
        assert!(validate_phone("phoneNumber", "+84 (28) 3822-1234").is_ok());
        assert!(validate_phone("phoneNumber", "090x").is_err());
        assert!(validate_barcode("barcode", "8934588-012_A").is_ok());
        assert!(validate_barcode("barcode", "893 4588").is_err());
    }

    #[test]
    fn test_numeric_ranges() {
        assert!(validate_price("retailPrice", 0.0).is_ok());
        assert!(validate_price("retailPrice", 999_999_999.99).is_ok());
        assert!(validate_price("retailPrice", 1_000_000_000.0).is_err());
        assert!(validate_price("retailPrice", -1.0).is_err());
        assert!(validate_quantity("quantity", 999_999).is_ok());
        assert!(validate_quantity("quantity", 1_000_000).is_err());
        assert!(validate_non_negative("discountValue", 0.0).is_ok());
        assert!(validate_non_negative("discountValue", -0.5).is_err());
        assert!(validate_at_least_one("quantity", 0).is_err());
    }

    #[test]
    fn test_validate_image() {
        assert!(validate_image("image/png", 1024).is_ok());
        assert!(validate_image("image/webp", MAX_FILE_SIZE).is_ok());
        assert!(validate_image("image/png", MAX_FILE_SIZE + 1).is_err());
        assert!(matches!(
            validate_image("application/pdf", 10),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(" 12.5 "), Some(12.5));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }
}
