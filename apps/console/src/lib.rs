//! # Libris Console Library
//!
//! Application layer for the Libris inventory tracker. This is the entry
//! point that configures logging, builds the catalog and runs the shell.
//!
//! ## Module Organization
//! ```text
//! libris_console_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── shell.rs        ◄─── Line parser, renderer, input loop
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── library.rs  ◄─── Registry behind a lock + clock
//! │   └── config.rs   ◄─── Configuration state and seed catalog
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── item.rs     ◄─── Item listing/lookup/borrow/return
//! │   ├── member.rs   ◄─── Member registration and checkout
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │        LibraryState          │   │         ConfigState          │   │
//! │  │                              │   │                              │   │
//! │  │  • Registry (items, users)   │   │  • Library name              │   │
//! │  │  • Clock for "today"         │   │  • Output format             │   │
//! │  │                              │   │  • Seed catalog              │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  Commands take only the state they need.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use libris_core::Registry;
use shell::Shell;
use state::{ConfigState, LibraryState};

/// Runs the console application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,libris=debug, override with RUST_LOG                │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • libris.toml in the platform config directory (or LIBRIS_CONFIG)   │
/// │     • LIBRIS_* environment overrides                                    │
/// │                                                                         │
/// │  3. Build Registry ───────────────────────────────────────────────────► │
/// │     • Empty, plus the optional [seed] catalog                           │
/// │                                                                         │
/// │  4. Run Shell ────────────────────────────────────────────────────────► │
/// │     • stdin lines until EOF, `quit` or Ctrl+C                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Libris console");

    let config = ConfigState::load()?;
    info!(
        library = %config.library_name,
        output = %config.output,
        config_path = ?config.config_path,
        "Configuration loaded"
    );

    let mut registry = Registry::new();
    if !config.seed.is_empty() {
        config.seed.apply(&mut registry)?;
        info!(
            items = registry.item_count(),
            users = registry.user_count(),
            "Seed catalog loaded"
        );
    }

    let state = LibraryState::new(registry);
    let shell = Shell::new(state, config);

    shell
        .run(
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
            shutdown_signal(),
        )
        .await?;

    info!("Libris console stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=libris=trace` - Show trace for libris crates only
/// - Default: `info,libris=debug`
///
/// Logs go to stderr so stdout carries only shell output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,libris=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves on Ctrl+C (or SIGTERM on unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
