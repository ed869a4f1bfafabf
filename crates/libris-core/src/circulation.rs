//! # Circulation
//!
//! The borrow / return workflows run against the [`Registry`].
//!
//! ## Workflows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  borrow_by_id(id)                                                       │
//! │    resolve id ──► none ─────────────► ItemNotFound                      │
//! │        │                                                                │
//! │        ├──► on loan ────────────────► ItemUnavailable                   │
//! │        └──► available ──► borrow ───► BorrowReceipt { due_date }        │
//! │                                                                         │
//! │  return_by_id(id)                                                       │
//! │    resolve id ──► none ─────────────► ItemNotFound                      │
//! │        │                                                                │
//! │        ├──► available ──────────────► ItemAlreadyAvailable              │
//! │        └──► on loan ──► holder? ────► holder.return_item(item)          │
//! │                          └─ none ───► item.return_item()                │
//! │                                                                         │
//! │  checkout(user, id)                                                     │
//! │    resolve user ─► none ────────────► UserNotFound                      │
//! │    resolve id ───► none ────────────► ItemNotFound                      │
//! │    user.borrow_item(item) ──────────► BorrowReceipt | BorrowingDenied   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each workflow checks every guard before it mutates anything, so a failed
//! call leaves the registry untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::registry::Registry;

// =============================================================================
// Receipts
// =============================================================================

/// Outcome of a successful borrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BorrowReceipt {
    /// Business id of the item as stored in the registry.
    pub item_id: String,

    #[ts(as = "String")]
    pub due_date: NaiveDate,

    /// Member name for checkouts, `None` for anonymous borrows.
    pub borrower: Option<String>,
}

/// Outcome of a successful return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReturnReceipt {
    pub item_id: String,

    /// Member that held the item, if it was checked out by one.
    pub returned_by: Option<String>,
}

// =============================================================================
// Workflows
// =============================================================================

impl Registry {
    /// Borrows the first item matching `id`, without a member.
    pub fn borrow_by_id(&mut self, id: &str, today: NaiveDate) -> CoreResult<BorrowReceipt> {
        let idx = self
            .find_item_index(id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;

        let item = self.item_mut(idx);
        if !item.is_available() {
            return Err(CoreError::ItemUnavailable(item.id().to_string()));
        }

        item.borrow(today);
        let due_date = item
            .due_date()
            .ok_or_else(|| CoreError::ItemUnavailable(item.id().to_string()))?;

        Ok(BorrowReceipt {
            item_id: item.id().to_string(),
            due_date,
            borrower: None,
        })
    }

    /// Returns the first item matching `id`.
    ///
    /// When a member holds the item the return goes through that member, so
    /// the item also leaves its held list.
    pub fn return_by_id(&mut self, id: &str) -> CoreResult<ReturnReceipt> {
        let idx = self
            .find_item_index(id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;

        let item = &self.items()[idx];
        if item.is_available() {
            return Err(CoreError::ItemAlreadyAvailable(item.id().to_string()));
        }
        let key = item.key();

        let returned_by = match self.holder_index(key) {
            Some(user_idx) => {
                let (item, user) = self.item_and_user_mut(idx, user_idx);
                user.return_item(item);
                Some(user.name().to_string())
            }
            None => {
                self.item_mut(idx).return_item();
                None
            }
        };

        Ok(ReturnReceipt {
            item_id: self.items()[idx].id().to_string(),
            returned_by,
        })
    }

    /// Borrows the first item matching `item_id` on behalf of the first
    /// member named `user_name`, subject to the member's limit.
    pub fn checkout(
        &mut self,
        user_name: &str,
        item_id: &str,
        today: NaiveDate,
    ) -> CoreResult<BorrowReceipt> {
        let user_idx = self
            .find_user_index(user_name)
            .ok_or_else(|| CoreError::UserNotFound(user_name.to_string()))?;
        let item_idx = self
            .find_item_index(item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;

        let (item, user) = self.item_and_user_mut(item_idx, user_idx);
        let due_date = user.borrow_item(item, today)?;

        Ok(BorrowReceipt {
            item_id: item.id().to_string(),
            due_date,
            borrower: Some(user.name().to_string()),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
