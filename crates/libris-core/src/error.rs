//! # Error Types
//!
//! Domain-specific error types for libris-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  libris-core errors (this file)                                        │
//! │  ├── CoreError        - Circulation outcomes that are not success       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  console errors (apps/console)                                         │
//! │  ├── ConfigError      - Configuration loading failures                 │
//! │  └── ApiError         - What the shell renders (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Shell                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is recoverable. Nothing in the core panics for an expected
//! domain condition.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Circulation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No item in the registry matches the id (case-insensitive).
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Borrow attempted on an item that is already on loan.
    #[error("Item is not available: {0}")]
    ItemUnavailable(String),

    /// Return attempted on an item that is not on loan.
    #[error("Item is already available: {0}")]
    ItemAlreadyAvailable(String),

    /// Member-level refusal.
    ///
    /// Covers both "limit reached" and "item unavailable" with one message;
    /// the two causes are deliberately not told apart.
    ///
    /// ## User Workflow
    /// ```text
    /// checkout Alice B2   (Alice is a Guest holding B1)
    ///      │
    ///      ▼
    /// held 1 / limit 1 → refuse
    ///      │
    ///      ▼
    /// BorrowingDenied { user: "Alice", limit: 1 }
    ///      │
    ///      ▼
    /// Shell shows: "Borrowing limit reached or item unavailable"
    /// ```
    #[error("Borrowing limit reached or item unavailable")]
    BorrowingDenied { user: String, limit: usize },

    /// Member kind string is not one of Faculty / Student / Guest.
    #[error("Invalid user type: {0}")]
    InvalidUserKind(String),

    /// No member matches the name (case-insensitive).
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
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
    fn test_borrowing_denied_message_hides_cause() {
        let err = CoreError::BorrowingDenied {
            user: "Alice".to_string(),
            limit: 1,
        };
        assert_eq!(err.to_string(), "Borrowing limit reached or item unavailable");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::ItemNotFound("B9".to_string()).to_string(),
            "Item not found: B9"
        );
        assert_eq!(
            CoreError::InvalidUserKind("Alien".to_string()).to_string(),
            "Invalid user type: Alien"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: id is required");
    }
}
