//! # Config Commands
//!
//! Retrieves application configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current application configuration (read-only copy).
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
