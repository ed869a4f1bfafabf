//! # State Module
//!
//! Manages application state for the console app.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │        LibraryState          │   │        ConfigState           │   │
//! │  │                              │   │                              │   │
//! │  │  Arc<Mutex<Registry>>        │   │  library_name                │   │
//! │  │  Clock (system / fixed)      │   │  output (text / json)        │   │
//! │  │                              │   │  seed catalog                │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • LibraryState: one Mutex around the whole registry                   │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod library;

pub use config::{
    ConfigError, ConfigState, OutputFormat, SeedBook, SeedCatalog, SeedMagazine, SeedUser,
    ENV_CONFIG, ENV_LIBRARY_NAME, ENV_OUTPUT,
};
pub use library::{Clock, LibraryState};
