//! # Registry
//!
//! The aggregate that owns every [`Item`] and [`User`] for the lifetime of the
//! process. It is the single source of truth: members only hold item keys.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Registry                                                    │
//! │                                                              │
//! │  items: [ Book B1 ][ Magazine M1 ][ Book b1 ] ...            │
//! │              ▲ key                                           │
//! │              │                                               │
//! │  users: [ Alice (Guest) borrowed: [key(B1)] ] [ Bob ] ...    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups by business id or name are case-insensitive and return the first
//! match in insertion order. Duplicates are accepted on insert.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::item::{eq_ignore_case, Item, ItemKey};
use crate::member::{MemberKey, MemberKind, User};

/// In-memory catalog and user roll.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    items: Vec<Item>,
    users: Vec<User>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Appends an item. A colliding business id is accepted.
    pub fn add_item(&mut self, item: Item) -> ItemKey {
        let key = item.key();
        self.items.push(item);
        key
    }

    pub fn add_book(&mut self, id: impl Into<String>, title: impl Into<String>) -> ItemKey {
        self.add_item(Item::book(id, title))
    }

    pub fn add_magazine(&mut self, id: impl Into<String>, issue: impl Into<String>) -> ItemKey {
        self.add_item(Item::magazine(id, issue))
    }

    /// Appends a member. Names need not be unique.
    pub fn add_user(&mut self, user: User) -> MemberKey {
        let key = user.key();
        self.users.push(user);
        key
    }

    /// Parses `kind` and registers a new member.
    ///
    /// Nothing is added when the kind is unknown.
    pub fn add_member(&mut self, name: impl Into<String>, kind: &str) -> CoreResult<MemberKey> {
        let kind: MemberKind = kind.parse()?;
        Ok(self.add_user(User::new(name, kind)))
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn item(&self, key: ItemKey) -> Option<&Item> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn user(&self, key: MemberKey) -> Option<&User> {
        self.users.iter().find(|user| user.key() == key)
    }

    /// First item whose id equals `id`, ignoring case.
    pub fn find_item_by_id(&self, id: &str) -> Option<&Item> {
        self.find_item_index(id).map(|idx| &self.items[idx])
    }

    /// First member whose name equals `name`, ignoring case.
    pub fn find_user_by_name(&self, name: &str) -> Option<&User> {
        self.find_user_index(name).map(|idx| &self.users[idx])
    }

    /// The member currently holding the item, if any.
    ///
    /// Items borrowed anonymously through
    /// [`borrow_by_id`](Registry::borrow_by_id) have no holder.
    pub fn holder_of(&self, key: ItemKey) -> Option<&User> {
        self.holder_index(key).map(|idx| &self.users[idx])
    }

    /// Display strings of every item, in insertion order.
    pub fn list_items(&self) -> Vec<String> {
        self.items.iter().map(ToString::to_string).collect()
    }

    /// Display strings of every member, in insertion order.
    pub fn list_users(&self) -> Vec<String> {
        self.users.iter().map(ToString::to_string).collect()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    // =========================================================================
    // Index helpers for the circulation workflows
    // =========================================================================

    pub(crate) fn find_item_index(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.matches_id(id))
    }

    pub(crate) fn find_user_index(&self, name: &str) -> Option<usize> {
        self.users
            .iter()
            .position(|user| eq_ignore_case(user.name(), name))
    }

    pub(crate) fn holder_index(&self, key: ItemKey) -> Option<usize> {
        self.users.iter().position(|user| user.holds(key))
    }

    pub(crate) fn item_mut(&mut self, idx: usize) -> &mut Item {
        &mut self.items[idx]
    }

    /// Disjoint mutable borrows of one item and one member.
    pub(crate) fn item_and_user_mut(&mut self, item_idx: usize, user_idx: usize) -> (&mut Item, &mut User) {
        (&mut self.items[item_idx], &mut self.users[user_idx])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_find_item_by_id_is_case_insensitive() {
        let mut registry = Registry::new();
        let key = registry.add_book("B1", "Dune");

        let found = registry.find_item_by_id("b1").unwrap();
        assert_eq!(found.key(), key);
        assert_eq!(found.title(), Some("Dune"));
    }

    #[test]
    fn test_find_item_by_id_missing() {
        let mut registry = Registry::new();
        registry.add_book("B1", "Dune");
        assert!(registry.find_item_by_id("B2").is_none());
        assert!(Registry::new().find_item_by_id("B1").is_none());
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first() {
        let mut registry = Registry::new();
        let first = registry.add_book("B1", "Dune");
        let second = registry.add_magazine("b1", "42");

        assert_ne!(first, second);
        assert_eq!(registry.item_count(), 2);
        assert_eq!(registry.find_item_by_id("B1").unwrap().key(), first);
    }

    #[test]
    fn test_add_member_valid_kinds() {
        let mut registry = Registry::new();
        registry.add_member("Ada", "Faculty").unwrap();
        registry.add_member("Sam", "student").unwrap();
        let key = registry.add_member("Gil", "GUEST").unwrap();

        assert_eq!(registry.user_count(), 3);
        assert_eq!(registry.user(key).unwrap().kind(), MemberKind::Guest);
    }

    #[test]
    fn test_add_member_invalid_kind_adds_nothing() {
        let mut registry = Registry::new();
        let err = registry.add_member("Bob", "Alien").unwrap_err();

        assert_eq!(err, CoreError::InvalidUserKind("Alien".to_string()));
        assert_eq!(registry.user_count(), 0);
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let mut registry = Registry::new();
        let first = registry.add_user(User::guest("Alice"));
        registry.add_user(User::faculty("alice"));

        assert_eq!(registry.user_count(), 2);
        assert_eq!(registry.find_user_by_name("ALICE").unwrap().key(), first);
    }

    #[test]
    fn test_list_items_in_insertion_order() {
        let mut registry = Registry::new();
        registry.add_book("B1", "Dune");
        registry.add_magazine("M1", "42");

        assert_eq!(
            registry.list_items(),
            vec![
                "Book - Dune, ID: B1, Available: true".to_string(),
                "Magazine - Issue: 42, ID: M1, Available: true".to_string(),
            ]
        );
        assert!(Registry::new().list_items().is_empty());
    }

    #[test]
    fn test_list_users() {
        let mut registry = Registry::new();
        registry.add_user(User::faculty("Ada"));
        assert_eq!(registry.list_users(), vec!["Ada (Faculty) - 0/5 items".to_string()]);
    }
}
