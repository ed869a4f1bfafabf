//! # Members
//!
//! Library patrons. Each kind fixes its own borrowing limit:
//!
//! | Kind    | Limit |
//! |---------|-------|
//! | Faculty | 5     |
//! | Student | 3     |
//! | Guest   | 1     |
//!
//! A member holds non-owning references ([`ItemKey`]s) to the items it has on
//! loan. The [`Registry`](crate::Registry) owns the items themselves.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::item::{Item, ItemKey};
use crate::{FACULTY_BORROWING_LIMIT, GUEST_BORROWING_LIMIT, STUDENT_BORROWING_LIMIT};

// =============================================================================
// Member Key
// =============================================================================

/// Internal identity of a member. Names are not unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberKey(Uuid);

impl MemberKey {
    pub fn new() -> Self {
        MemberKey(Uuid::new_v4())
    }

    #[inline]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MemberKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Member Kind
// =============================================================================

/// The closed set of patron variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Faculty,
    Student,
    Guest,
}

impl MemberKind {
    /// Maximum number of items held at once.
    #[inline]
    pub const fn borrowing_limit(&self) -> usize {
        match self {
            MemberKind::Faculty => FACULTY_BORROWING_LIMIT,
            MemberKind::Student => STUDENT_BORROWING_LIMIT,
            MemberKind::Guest => GUEST_BORROWING_LIMIT,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            MemberKind::Faculty => "Faculty",
            MemberKind::Student => "Student",
            MemberKind::Guest => "Guest",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MemberKind {
    type Err = CoreError;

    /// Case-insensitive: "faculty", "STUDENT" and "Guest" all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "faculty" => Ok(MemberKind::Faculty),
            "student" => Ok(MemberKind::Student),
            "guest" => Ok(MemberKind::Guest),
            _ => Err(CoreError::InvalidUserKind(s.to_string())),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A library patron and the items it currently holds.
///
/// ## Invariants
/// - `borrowed_item_count() <= borrowing_limit()`
/// - no item key appears twice in the held list
/// - every held item is on loan (kept by routing returns through the holder,
///   see [`Registry::return_by_id`](crate::Registry::return_by_id))
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    key: MemberKey,
    name: String,
    kind: MemberKind,
    borrowed: Vec<ItemKey>,
}

impl User {
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        User {
            key: MemberKey::new(),
            name: name.into(),
            kind,
            borrowed: Vec::new(),
        }
    }

    pub fn faculty(name: impl Into<String>) -> Self {
        User::new(name, MemberKind::Faculty)
    }

    pub fn student(name: impl Into<String>) -> Self {
        User::new(name, MemberKind::Student)
    }

    pub fn guest(name: impl Into<String>) -> Self {
        User::new(name, MemberKind::Guest)
    }

    #[inline]
    pub fn key(&self) -> MemberKey {
        self.key
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    #[inline]
    pub fn borrowing_limit(&self) -> usize {
        self.kind.borrowing_limit()
    }

    #[inline]
    pub fn borrowed_item_count(&self) -> usize {
        self.borrowed.len()
    }

    /// Keys of held items, in borrow order.
    pub fn borrowed_items(&self) -> &[ItemKey] {
        &self.borrowed
    }

    pub fn holds(&self, key: ItemKey) -> bool {
        self.borrowed.contains(&key)
    }

    pub fn remaining_capacity(&self) -> usize {
        self.borrowing_limit().saturating_sub(self.borrowed_item_count())
    }

    /// Borrows `item` for this member.
    ///
    /// Succeeds only when the member is under its limit and the item is
    /// available. Either failure yields the same
    /// [`CoreError::BorrowingDenied`].
    pub fn borrow_item(&mut self, item: &mut Item, today: NaiveDate) -> CoreResult<NaiveDate> {
        if self.borrowed.len() >= self.borrowing_limit() || !item.is_available() {
            return Err(CoreError::BorrowingDenied {
                user: self.name.clone(),
                limit: self.borrowing_limit(),
            });
        }

        self.borrowed.push(item.key());
        item.borrow(today);

        item.due_date()
            .ok_or_else(|| CoreError::ItemUnavailable(item.id().to_string()))
    }

    /// Drops `item` from the held list if present, then returns it to the
    /// shelf regardless.
    pub fn return_item(&mut self, item: &mut Item) {
        let key = item.key();
        self.borrowed.retain(|held| *held != key);
        item.return_item();
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {}/{} items",
            self.name,
            self.kind,
            self.borrowed_item_count(),
            self.borrowing_limit()
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_borrowing_limits_per_kind() {
        assert_eq!(User::faculty("F").borrowing_limit(), 5);
        assert_eq!(User::student("S").borrowing_limit(), 3);
        assert_eq!(User::guest("G").borrowing_limit(), 1);
    }

    #[test]
    fn test_member_kind_parses_case_insensitively() {
        assert_eq!("Faculty".parse::<MemberKind>().unwrap(), MemberKind::Faculty);
        assert_eq!("STUDENT".parse::<MemberKind>().unwrap(), MemberKind::Student);
        assert_eq!("guest".parse::<MemberKind>().unwrap(), MemberKind::Guest);
    }

    #[test]
    fn test_member_kind_rejects_unknown() {
        let err = "Alien".parse::<MemberKind>().unwrap_err();
        assert_eq!(err, CoreError::InvalidUserKind("Alien".to_string()));
        assert!(" guest".parse::<MemberKind>().is_err());
    }

    #[test]
    fn test_borrow_item_success() {
        let mut user = User::student("Sam");
        let mut item = Item::book("B1", "Dune");

        let due = user.borrow_item(&mut item, today()).unwrap();

        assert_eq!(due, NaiveDate::from_ymd_opt(2024, 1, 29).unwrap());
        assert!(!item.is_available());
        assert!(user.holds(item.key()));
        assert_eq!(user.borrowed_item_count(), 1);
        assert_eq!(user.remaining_capacity(), 2);
    }

    #[test]
    fn test_guest_limit_reached() {
        let mut alice = User::guest("Alice");
        let mut first = Item::book("B1", "Dune");
        let mut second = Item::magazine("M1", "42");

        alice.borrow_item(&mut first, today()).unwrap();
        let err = alice.borrow_item(&mut second, today()).unwrap_err();

        assert!(matches!(err, CoreError::BorrowingDenied { limit: 1, .. }));
        assert!(second.is_available());
        assert_eq!(alice.borrowed_item_count(), 1);
    }

    #[test]
    fn test_borrow_unavailable_item_denied() {
        let mut alice = User::faculty("Alice");
        let mut bob = User::faculty("Bob");
        let mut item = Item::book("B1", "Dune");

        alice.borrow_item(&mut item, today()).unwrap();
        let due_before = item.due_date();
        let err = bob.borrow_item(&mut item, today()).unwrap_err();

        assert!(matches!(err, CoreError::BorrowingDenied { .. }));
        assert_eq!(bob.borrowed_item_count(), 0);
        assert_eq!(item.due_date(), due_before);
    }

    #[test]
    fn test_faculty_never_exceeds_limit() {
        let mut prof = User::faculty("Prof");
        let mut items: Vec<Item> = (0..7).map(|i| Item::book(format!("B{i}"), "T")).collect();

        let granted = items
            .iter_mut()
            .filter_map(|item| prof.borrow_item(item, today()).ok())
            .count();

        assert_eq!(granted, 5);
        assert_eq!(prof.borrowed_item_count(), 5);
        assert_eq!(items.iter().filter(|i| !i.is_available()).count(), 5);
    }

    #[test]
    fn test_return_item_releases_slot() {
        let mut alice = User::guest("Alice");
        let mut item = Item::book("B1", "Dune");

        alice.borrow_item(&mut item, today()).unwrap();
        alice.return_item(&mut item);

        assert!(item.is_available());
        assert_eq!(alice.borrowed_item_count(), 0);
    }

    #[test]
    fn test_return_item_not_held_still_returns_item() {
        let mut alice = User::guest("Alice");
        let mut item = Item::book("B1", "Dune");
        item.borrow(today());

        alice.return_item(&mut item);

        assert!(item.is_available());
        assert_eq!(alice.borrowed_item_count(), 0);
    }

    #[test]
    fn test_display() {
        let user = User::student("Sam");
        assert_eq!(user.to_string(), "Sam (Student) - 0/3 items");
    }
}
