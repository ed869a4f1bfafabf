//! # Commands Module
//!
//! The request/response operations a front end may call. The console shell
//! is one such front end; it uses these functions and nothing else.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── item.rs     ◄─── list, find, borrow, return, add book / magazine
//! ├── member.rs   ◄─── add user, list users, checkout
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fn borrow_by_id(                                                       │
//! │      state: &LibraryState,   ◄── registry behind its lock              │
//! │      id: &str,               ◄── from the shell line                   │
//! │  ) -> Result<BorrowReceipt, ApiError>                                   │
//! │         │                                                               │
//! │         │ (serde, camelCase)                                            │
//! │         ▼                                                               │
//! │  Shell renders text or JSON                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes the lock once, so its checks and mutations are atomic
//! with respect to every other command.

pub mod config;
pub mod item;
pub mod member;
