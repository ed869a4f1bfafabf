//! # Validation Module
//!
//! Input checks applied by the command layer before anything reaches the
//! registry. The registry itself accepts any string; these rules only keep
//! blank or runaway input out of the catalog.
//!
//! ## Usage
//! ```rust
//! use libris_core::validation::{validate_item_id, validate_label};
//!
//! assert!(validate_item_id("B1").is_ok());
//! assert!(validate_item_id("   ").is_err());
//! assert!(validate_label("title", "Dune").is_ok());
//! ```

use crate::error::ValidationError;
use crate::{MAX_ID_LEN, MAX_LABEL_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an item's business id.
///
/// ## Rules
/// - Must not be blank
/// - At most 64 characters
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    validate_text("id", id, MAX_ID_LEN)
}

/// Validates a member name.
///
/// ## Rules
/// - Must not be blank
/// - At most 64 characters
pub fn validate_member_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_ID_LEN)
}

/// Validates a book title or magazine issue label.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_label(field: &str, value: &str) -> ValidationResult<()> {
    validate_text(field, value, MAX_LABEL_LEN)
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_id() {
        assert!(validate_item_id("B1").is_ok());
        assert!(validate_item_id("isbn-978-0441013593").is_ok());

        assert!(validate_item_id("").is_err());
        assert!(validate_item_id("  ").is_err());
        assert!(validate_item_id(&"A".repeat(65)).is_err());
        assert!(validate_item_id(&"A".repeat(64)).is_ok());
    }

    #[test]
    fn test_validate_member_name() {
        assert!(validate_member_name("Alice").is_ok());
        assert_eq!(
            validate_member_name("").unwrap_err(),
            ValidationError::Required {
                field: "name".to_string()
            }
        );
    }

    #[test]
    fn test_validate_label_counts_characters() {
        // 200 two-byte characters are still 200 characters.
        assert!(validate_label("title", &"é".repeat(200)).is_ok());
        assert_eq!(
            validate_label("issue", &"x".repeat(201)).unwrap_err(),
            ValidationError::TooLong {
                field: "issue".to_string(),
                max: 200
            }
        );
    }
}
