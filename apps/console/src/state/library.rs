//! # Library State
//!
//! Holds the one [`Registry`] of the process behind a single lock.
//!
//! ## Thread Safety
//! Every compound check-then-mutate sequence (availability or limit check,
//! then the state change) runs inside one lock acquisition:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  borrow_by_id("B1")                                                     │
//! │                                                                         │
//! │  lock ──► find B1 ──► available? ──► borrow ──► receipt ──► unlock     │
//! │   ▲                                                          │          │
//! │   └────────── no other command observes the middle ──────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core never reads the clock. [`Clock`] supplies "today" to it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Local, NaiveDate};
use libris_core::Registry;

/// Source of the current calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// Local date of the host.
    #[default]
    System,

    /// Frozen date, for tests and demos.
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

/// Shared, lock-protected registry.
///
/// Cloning is cheap and every clone sees the same registry.
#[derive(Debug, Clone)]
pub struct LibraryState {
    registry: Arc<Mutex<Registry>>,
    clock: Clock,
}

impl LibraryState {
    /// Wraps an explicitly constructed registry, reading dates from the
    /// system clock.
    pub fn new(registry: Registry) -> Self {
        LibraryState::with_clock(registry, Clock::System)
    }

    pub fn with_clock(registry: Registry, clock: Clock) -> Self {
        LibraryState {
            registry: Arc::new(Mutex::new(registry)),
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Executes a function with read access to the registry.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let lines = state.with_registry(|registry| registry.list_items());
    /// ```
    pub fn with_registry<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Registry) -> R,
    {
        let registry = self.lock();
        f(&registry)
    }

    /// Executes a function with write access to the registry.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_registry_mut(|registry| registry.borrow_by_id("B1", today))?;
    /// ```
    pub fn with_registry_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Registry) -> R,
    {
        let mut registry = self.lock();
        f(&mut registry)
    }

    // Core operations validate before they mutate, so a registry behind a
    // poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LibraryState {
    fn default() -> Self {
        Self::new(Registry::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let state = LibraryState::with_clock(Registry::new(), Clock::Fixed(date));
        assert_eq!(state.today(), date);
    }

    #[test]
    fn test_clones_share_registry() {
        let state = LibraryState::default();
        let other = state.clone();

        state.with_registry_mut(|registry| {
            registry.add_book("B1", "Dune");
        });

        assert_eq!(other.with_registry(|registry| registry.item_count()), 1);
    }

    #[test]
    fn test_concurrent_borrows_grant_exactly_one() {
        let state = LibraryState::default();
        state.with_registry_mut(|registry| {
            registry.add_book("B1", "Dune");
        });
        let today = state.today();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                std::thread::spawn(move || {
                    state.with_registry_mut(|registry| registry.borrow_by_id("B1", today).is_ok())
                })
            })
            .collect();

        let granted = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(granted, 1);
    }
}
