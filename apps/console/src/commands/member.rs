//! # Member Commands
//!
//! Member registration, the member roll, and checkout (borrowing on behalf
//! of a member, subject to its borrowing limit).

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::LibraryState;
use libris_core::validation::{validate_item_id, validate_member_name};
use libris_core::{BorrowReceipt, MemberKind, Registry, User};

/// Member DTO for front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// Internal key (UUID).
    pub key: String,
    pub name: String,
    pub kind: MemberKind,
    pub borrowing_limit: usize,
    pub borrowed_count: usize,
    /// Business ids of held items, in borrow order.
    pub borrowed_item_ids: Vec<String>,
}

impl UserDto {
    fn from_user(user: &User, registry: &Registry) -> Self {
        UserDto {
            key: user.key().to_string(),
            name: user.name().to_string(),
            kind: user.kind(),
            borrowing_limit: user.borrowing_limit(),
            borrowed_count: user.borrowed_item_count(),
            borrowed_item_ids: user
                .borrowed_items()
                .iter()
                .filter_map(|key| registry.item(*key))
                .map(|item| item.id().to_string())
                .collect(),
        }
    }
}

/// Registers a member of the given kind.
///
/// ## Returns
/// - `Ok(user)` for Faculty / Student / Guest (any letter case)
/// - `INVALID_USER_KIND` otherwise; no member is added
pub fn add_user(state: &LibraryState, name: &str, kind: &str) -> Result<UserDto, ApiError> {
    debug!(name = %name, kind = %kind, "add_user command");
    validate_member_name(name)?;

    let kind = kind
        .parse::<MemberKind>()
        .inspect_err(|err| warn!(name = %name, error = %err, "User not added"))?;
    let user = User::new(name.trim(), kind);

    let dto = state.with_registry_mut(|registry| {
        let dto = UserDto::from_user(&user, registry);
        registry.add_user(user);
        dto
    });

    info!(name = %dto.name, kind = %dto.kind, limit = dto.borrowing_limit, "User added");
    Ok(dto)
}

/// Every member, in registration order.
pub fn list_users(state: &LibraryState) -> Vec<UserDto> {
    debug!("list_users command");
    state.with_registry(|registry| {
        registry
            .users()
            .iter()
            .map(|user| UserDto::from_user(user, registry))
            .collect()
    })
}

/// Borrows an item for a member.
///
/// ## Returns
/// - `Ok(receipt)` naming the borrower
/// - `NOT_FOUND` when the member or the item does not exist
/// - `BORROWING_DENIED` when the member is at its limit or the item is on
///   loan (one combined error)
pub fn checkout(state: &LibraryState, user: &str, item_id: &str) -> Result<BorrowReceipt, ApiError> {
    debug!(user = %user, item_id = %item_id, "checkout command");
    validate_member_name(user)?;
    validate_item_id(item_id)?;
    let today = state.today();

    let receipt = state
        .with_registry_mut(|registry| registry.checkout(user, item_id, today))
        .inspect_err(|err| warn!(user = %user, item_id = %item_id, error = %err, "Checkout refused"))?;

    info!(
        user = ?receipt.borrower,
        item_id = %receipt.item_id,
        due_date = %receipt.due_date,
        "Item checked out"
    );
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::item::{add_book, add_magazine, find_item, return_by_id};
    use crate::error::ErrorCode;
    use crate::state::Clock;
    use chrono::NaiveDate;

    fn test_state() -> LibraryState {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        LibraryState::with_clock(Registry::new(), Clock::Fixed(today))
    }

    #[test]
    fn test_add_user_kinds() {
        let state = test_state();
        let user = add_user(&state, "Ada", "faculty").unwrap();
        assert_eq!(user.kind, MemberKind::Faculty);
        assert_eq!(user.borrowing_limit, 5);
        assert_eq!(user.borrowed_count, 0);
    }

    #[test]
    fn test_add_user_invalid_kind() {
        let state = test_state();
        let err = add_user(&state, "Bob", "Alien").unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidUserKind);
        assert!(list_users(&state).is_empty());
    }

    #[test]
    fn test_guest_limit_via_checkout() {
        let state = test_state();
        add_user(&state, "Alice", "Guest").unwrap();
        add_book(&state, "B1", "Dune").unwrap();
        add_magazine(&state, "M1", "42").unwrap();

        let receipt = checkout(&state, "Alice", "B1").unwrap();
        assert_eq!(receipt.borrower.as_deref(), Some("Alice"));

        let err = checkout(&state, "Alice", "M1").unwrap_err();
        assert_eq!(err.code, ErrorCode::BorrowingDenied);
        assert!(find_item(&state, "M1").unwrap().available);

        let users = list_users(&state);
        assert_eq!(users[0].borrowed_item_ids, vec!["B1".to_string()]);
    }

    #[test]
    fn test_return_frees_member_slot() {
        let state = test_state();
        add_user(&state, "Alice", "Guest").unwrap();
        add_book(&state, "B1", "Dune").unwrap();
        add_book(&state, "B2", "Emma").unwrap();

        checkout(&state, "Alice", "B1").unwrap();
        let receipt = return_by_id(&state, "B1").unwrap();
        assert_eq!(receipt.returned_by.as_deref(), Some("Alice"));

        checkout(&state, "Alice", "B2").unwrap();
        assert_eq!(list_users(&state)[0].borrowed_item_ids, vec!["B2".to_string()]);
    }

    #[test]
    fn test_checkout_unknown_member() {
        let state = test_state();
        add_book(&state, "B1", "Dune").unwrap();

        let err = checkout(&state, "Nobody", "B1").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "User not found: Nobody");
    }
}
