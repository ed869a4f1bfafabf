//! # libris-core: Pure Domain Logic for Libris
//!
//! The in-memory domain model of a small library: loanable items, patrons
//! with borrowing limits, the registry that owns both, and the borrowing
//! protocol that moves items between `Available` and `OnLoan`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Libris Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Console Shell (apps/console)                 │   │
//! │  │    list ──► borrow <id> ──► return <id> ──► checkout ...       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands + LibraryState (Mutex)        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ libris-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌────────────┐  │   │
//! │  │   │   item    │  │  member   │  │ registry  │  │circulation │  │   │
//! │  │   │   Book    │  │  Faculty  │  │  items    │  │ borrow/    │  │   │
//! │  │   │  Magazine │  │  Student  │  │  users    │  │ return     │  │   │
//! │  │   │           │  │  Guest    │  │           │  │            │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOCKS • DETERMINISTIC                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`] - Loanable items (Book, Magazine) and their availability
//! - [`member`] - Patrons (Faculty, Student, Guest) and borrowing limits
//! - [`registry`] - The aggregate owning every item and member
//! - [`circulation`] - Borrow-by-id, return-by-id and member checkout
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks applied at the command boundary
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use libris_core::{CoreError, Registry};
//!
//! let mut registry = Registry::new();
//! registry.add_book("B1", "Dune");
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let receipt = registry.borrow_by_id("b1", today).unwrap();
//! assert_eq!(receipt.due_date, NaiveDate::from_ymd_opt(2024, 1, 29).unwrap());
//!
//! // A second borrow of the same book is refused.
//! assert!(matches!(
//!     registry.borrow_by_id("B1", today),
//!     Err(CoreError::ItemUnavailable(_))
//! ));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod circulation;
pub mod error;
pub mod item;
pub mod member;
pub mod registry;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use circulation::{BorrowReceipt, ReturnReceipt};
pub use error::{CoreError, CoreResult, ValidationError};
pub use item::{Item, ItemKey, ItemKind, LoanStatus};
pub use member::{MemberKey, MemberKind, User};
pub use registry::Registry;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Loan period for books, in days (four weeks).
pub const BOOK_LOAN_DAYS: u64 = 28;

/// Loan period for magazines, in days (two weeks).
pub const MAGAZINE_LOAN_DAYS: u64 = 14;

/// Maximum items a faculty member may hold at once.
pub const FACULTY_BORROWING_LIMIT: usize = 5;

/// Maximum items a student may hold at once.
pub const STUDENT_BORROWING_LIMIT: usize = 3;

/// Maximum items a guest may hold at once.
pub const GUEST_BORROWING_LIMIT: usize = 1;

/// Longest accepted item id or member name.
pub const MAX_ID_LEN: usize = 64;

/// Longest accepted book title or magazine issue label.
pub const MAX_LABEL_LEN: usize = 200;
