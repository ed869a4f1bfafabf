//! # Item Commands
//!
//! Catalog listing, lookup, registration and the anonymous borrow / return
//! workflow.
//!
//! ## Item Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_book / add_magazine                                                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ┌───────────┐   borrow_by_id / checkout   ┌───────────┐               │
//! │  │ Available │ ──────────────────────────► │  On loan  │               │
//! │  │           │ ◄────────────────────────── │ due date  │               │
//! │  └───────────┘        return_by_id         └───────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::LibraryState;
use libris_core::validation::{validate_item_id, validate_label};
use libris_core::{BorrowReceipt, Item, ItemKind, ReturnReceipt};

/// Item DTO for front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    /// Internal key (UUID).
    pub key: String,
    pub id: String,
    /// "book" or "magazine".
    pub kind: String,
    pub title: Option<String>,
    pub issue: Option<String>,
    pub available: bool,
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
    pub loan_period_days: u64,
    /// Same text as the `list_items` line for this item.
    pub display: String,
}

impl From<&Item> for ItemDto {
    fn from(item: &Item) -> Self {
        let kind = match item.kind() {
            ItemKind::Book { .. } => "book",
            ItemKind::Magazine { .. } => "magazine",
        };
        ItemDto {
            key: item.key().to_string(),
            id: item.id().to_string(),
            kind: kind.to_string(),
            title: item.title().map(str::to_string),
            issue: item.issue().map(str::to_string),
            available: item.is_available(),
            due_date: item.due_date(),
            loan_period_days: item.loan_period_days(),
            display: item.to_string(),
        }
    }
}

/// Display lines of every item, in insertion order.
pub fn list_items(state: &LibraryState) -> Vec<String> {
    debug!("list_items command");
    state.with_registry(|registry| registry.list_items())
}

/// Looks up an item by id (case-insensitive, first match).
pub fn find_item(state: &LibraryState, id: &str) -> Result<ItemDto, ApiError> {
    debug!(id = %id, "find_item command");
    state
        .with_registry(|registry| registry.find_item_by_id(id).map(ItemDto::from))
        .ok_or_else(|| ApiError::not_found("Item", id))
}

/// Borrows an item without a member.
///
/// ## Returns
/// - `Ok(receipt)` with the due date
/// - `NOT_FOUND` when no item matches
/// - `ITEM_UNAVAILABLE` when the item is already on loan
pub fn borrow_by_id(state: &LibraryState, id: &str) -> Result<BorrowReceipt, ApiError> {
    debug!(id = %id, "borrow_by_id command");
    let today = state.today();

    let receipt = state
        .with_registry_mut(|registry| registry.borrow_by_id(id, today))
        .inspect_err(|err| warn!(id = %id, error = %err, "Borrow refused"))?;

    info!(item_id = %receipt.item_id, due_date = %receipt.due_date, "Item borrowed");
    Ok(receipt)
}

/// Returns an item.
///
/// ## Returns
/// - `Ok(receipt)` naming the member that held it, if any
/// - `NOT_FOUND` when no item matches
/// - `ALREADY_AVAILABLE` when the item is not on loan
pub fn return_by_id(state: &LibraryState, id: &str) -> Result<ReturnReceipt, ApiError> {
    debug!(id = %id, "return_by_id command");

    let receipt = state
        .with_registry_mut(|registry| registry.return_by_id(id))
        .inspect_err(|err| warn!(id = %id, error = %err, "Return refused"))?;

    info!(item_id = %receipt.item_id, returned_by = ?receipt.returned_by, "Item returned");
    Ok(receipt)
}

/// Registers a book. Duplicate ids are accepted.
pub fn add_book(state: &LibraryState, id: &str, title: &str) -> Result<ItemDto, ApiError> {
    debug!(id = %id, title = %title, "add_book command");
    validate_item_id(id)?;
    validate_label("title", title)?;

    add_item(state, Item::book(id.trim(), title.trim()))
}

/// Registers a magazine. Duplicate ids are accepted.
pub fn add_magazine(state: &LibraryState, id: &str, issue: &str) -> Result<ItemDto, ApiError> {
    debug!(id = %id, issue = %issue, "add_magazine command");
    validate_item_id(id)?;
    validate_label("issue", issue)?;

    add_item(state, Item::magazine(id.trim(), issue.trim()))
}

fn add_item(state: &LibraryState, item: Item) -> Result<ItemDto, ApiError> {
    let dto = ItemDto::from(&item);
    state.with_registry_mut(|registry| {
        if registry.find_item_by_id(item.id()).is_some() {
            warn!(id = %item.id(), "Duplicate item id; lookups keep resolving to the first");
        }
        registry.add_item(item);
    });

    info!(id = %dto.id, kind = %dto.kind, "Item added");
    Ok(dto)
}
