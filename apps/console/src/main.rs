//! # Libris Console Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Libris Console                                 │
//! │                                                                         │
//! │  stdin ──► shell.rs ──► commands/ ──► libris-core Registry              │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  stdout ◄── text or JSON         stderr ◄── tracing logs                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs for testability.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match libris_console_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Libris console failed");
            eprintln!("libris: {}", err);
            ExitCode::FAILURE
        }
    }
}
