//! # Items
//!
//! Loanable catalog entries and their availability state machine.
//!
//! ## Item Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Item Kinds                                      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      Book       │   │    Magazine     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  title          │   │  issue          │                             │
//! │  │  loan: 28 days  │   │  loan: 14 days  │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Machine
//! ```text
//!            borrow(today)
//!  Available ─────────────► OnLoan { due_date = today + loan period }
//!      ▲                         │
//!      └─────── return_item ─────┘
//! ```
//!
//! Availability and the due date live in a single [`LoanStatus`], so an
//! available item with a due date (or an on-loan item without one) cannot be
//! built.
//!
//! ## Dual-Key Identity Pattern
//! - `key`: UUID v4, immutable, used by members to reference held items
//! - `id`: business id typed by the librarian, not enforced unique

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BOOK_LOAN_DAYS, MAGAZINE_LOAN_DAYS};

// =============================================================================
// Item Key
// =============================================================================

/// Internal identity of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKey(Uuid);

impl ItemKey {
    /// Generates a fresh random key.
    pub fn new() -> Self {
        ItemKey(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[inline]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Item Kind
// =============================================================================

/// The closed set of item variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    Book { title: String },
    Magazine { issue: String },
}

impl ItemKind {
    /// Days between borrowing and the due date, fixed per variant.
    #[inline]
    pub const fn loan_period_days(&self) -> u64 {
        match self {
            ItemKind::Book { .. } => BOOK_LOAN_DAYS,
            ItemKind::Magazine { .. } => MAGAZINE_LOAN_DAYS,
        }
    }

    /// Variant name as shown to patrons.
    pub const fn label(&self) -> &'static str {
        match self {
            ItemKind::Book { .. } => "Book",
            ItemKind::Magazine { .. } => "Magazine",
        }
    }
}

// =============================================================================
// Loan Status
// =============================================================================

/// Whether an item is on the shelf or out on loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoanStatus {
    #[default]
    Available,
    OnLoan { due_date: NaiveDate },
}

// =============================================================================
// Item
// =============================================================================

/// A loanable unit of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    key: ItemKey,
    id: String,
    kind: ItemKind,
    status: LoanStatus,
}

impl Item {
    /// Creates an available item with a fresh key.
    pub fn new(id: impl Into<String>, kind: ItemKind) -> Self {
        Item {
            key: ItemKey::new(),
            id: id.into(),
            kind,
            status: LoanStatus::Available,
        }
    }

    /// Creates an available book.
    pub fn book(id: impl Into<String>, title: impl Into<String>) -> Self {
        Item::new(id, ItemKind::Book { title: title.into() })
    }

    /// Creates an available magazine.
    pub fn magazine(id: impl Into<String>, issue: impl Into<String>) -> Self {
        Item::new(id, ItemKind::Magazine { issue: issue.into() })
    }

    #[inline]
    pub fn key(&self) -> ItemKey {
        self.key
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Book title, `None` for magazines.
    pub fn title(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Book { title } => Some(title),
            ItemKind::Magazine { .. } => None,
        }
    }

    /// Magazine issue, `None` for books.
    pub fn issue(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Magazine { issue } => Some(issue),
            ItemKind::Book { .. } => None,
        }
    }

    #[inline]
    pub fn status(&self) -> LoanStatus {
        self.status
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self.status, LoanStatus::Available)
    }

    /// Due date while on loan.
    pub fn due_date(&self) -> Option<NaiveDate> {
        match self.status {
            LoanStatus::Available => None,
            LoanStatus::OnLoan { due_date } => Some(due_date),
        }
    }

    #[inline]
    pub fn loan_period_days(&self) -> u64 {
        self.kind.loan_period_days()
    }

    /// Case-insensitive comparison against a business id.
    pub fn matches_id(&self, id: &str) -> bool {
        eq_ignore_case(&self.id, id)
    }

    /// Puts the item on loan, due `today` plus the kind's loan period.
    ///
    /// Does nothing when the item is already on loan: the existing due date is
    /// kept and no error is raised. Callers check [`Item::is_available`]
    /// first.
    pub fn borrow(&mut self, today: NaiveDate) {
        if self.is_available() {
            self.status = LoanStatus::OnLoan {
                due_date: today + Days::new(self.loan_period_days()),
            };
        }
    }

    /// Puts the item back on the shelf, whatever its previous state.
    pub fn return_item(&mut self) {
        self.status = LoanStatus::Available;
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ItemKind::Book { title } => write!(f, "Book - {}, ", title)?,
            ItemKind::Magazine { issue } => write!(f, "Magazine - Issue: {}, ", issue)?,
        }
        write!(f, "ID: {}, Available: {}", self.id, self.is_available())?;
        if let Some(due) = self.due_date() {
            write!(f, ", Due Date: {}", due)?;
        }
        Ok(())
    }
}

/// Unicode-aware case-insensitive equality.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

// =============================================================================
// Unit Tests
// =============================================================================
