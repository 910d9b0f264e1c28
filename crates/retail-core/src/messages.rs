//! Fallback messages.
//!
//! A rejected operation shows the server's `message` when there is one. These
//! strings are used when there is not.

pub const SOMETHING_WENT_WRONG: &str = "Something went wrong. Please try again.";
pub const DATA_NOT_FOUND: &str = "Data not found.";
pub const OPERATION_FAILED: &str = "Operation failed.";
pub const NETWORK_ERROR: &str = "Network error. Please check your connection.";
pub const TIMEOUT_ERROR: &str = "The request timed out. Please try again.";
pub const UNAUTHORIZED: &str = "Your session has expired. Please sign in again.";
pub const FORBIDDEN: &str = "You do not have permission to perform this action.";
pub const SERVER_ERROR: &str = "Server error. Please try again later.";
pub const VALIDATION_ERROR: &str = "Please check the highlighted fields.";
pub const LOGIN_FAILED: &str = "Login failed.";

/// Picks the server message when present and non-blank, else `fallback`.
pub fn or_fallback(server: Option<&str>, fallback: &str) -> String {
    match server.map(str::trim) {
        Some(msg) if !msg.is_empty() => msg.to_string(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_fallback() {
        assert_eq!(or_fallback(Some("Mã đã tồn tại"), OPERATION_FAILED), "Mã đã tồn tại");
        assert_eq!(or_fallback(Some("  "), OPERATION_FAILED), OPERATION_FAILED);
        assert_eq!(or_fallback(None, DATA_NOT_FOUND), DATA_NOT_FOUND);
    }
}
