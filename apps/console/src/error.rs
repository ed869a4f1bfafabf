//! # API Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Libris                                 │
//! │                                                                         │
//! │  Shell line "borrow B9"                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ─── ValidationError ──────────┐               │  │
//! │  │         │                                        │               │  │
//! │  │         ▼                                        ▼               │  │
//! │  │  Circulation Error? ── CoreError::ItemNotFound ── ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Shell renders:  text  → "Error: Item not found: B9"                   │
//! │                  json  → {"type":"error","data":{"code":"NOT_FOUND",…}} │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use libris_core::{CoreError, ValidationError};

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Item not found: B9"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Item or user not found
    NotFound,

    /// Borrow attempted on an item already on loan
    ItemUnavailable,

    /// Return attempted on an item not on loan
    AlreadyAvailable,

    /// Member limit reached or item unavailable
    BorrowingDenied,

    /// Member kind not Faculty / Student / Guest
    InvalidUserKind,

    /// Input validation failed
    ValidationError,

    /// Shell line did not parse into a command
    UnknownCommand,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unknown command error.
    pub fn unknown_command(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::UnknownCommand, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(id) => ApiError::not_found("Item", &id),
            CoreError::UserNotFound(name) => ApiError::not_found("User", &name),
            CoreError::ItemUnavailable(id) => ApiError::new(
                ErrorCode::ItemUnavailable,
                format!("Item is not available: {}", id),
            ),
            CoreError::ItemAlreadyAvailable(id) => ApiError::new(
                ErrorCode::AlreadyAvailable,
                format!("Item is already available: {}", id),
            ),
            err @ CoreError::BorrowingDenied { .. } => {
                ApiError::new(ErrorCode::BorrowingDenied, err.to_string())
            }
            CoreError::InvalidUserKind(kind) => ApiError::new(
                ErrorCode::InvalidUserKind,
                format!(
                    "Invalid user type: {} (expected Faculty, Student or Guest)",
                    kind
                ),
            ),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::ItemNotFound("B9".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Item not found: B9");

        let err: ApiError = CoreError::BorrowingDenied {
            user: "Alice".to_string(),
            limit: 1,
        }
        .into();
        assert_eq!(err.code, ErrorCode::BorrowingDenied);
        assert_eq!(err.message, "Borrowing limit reached or item unavailable");
    }

    #[test]
    fn test_validation_mapping() {
        let err: ApiError = CoreError::Validation(ValidationError::Required {
            field: "id".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "id is required");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::new(ErrorCode::AlreadyAvailable, "Item is already available: B1");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "ALREADY_AVAILABLE");
        assert_eq!(json["message"], "Item is already available: B1");
    }
}
