//! Configuration management for LSP server.

use tracing::{error, info};

use marklint_core::LinterConfig;

use crate::state::BackendState;

/// Reloads configuration from the workspace root.
///
/// A missing config file restores the defaults; an invalid one keeps the
/// previous configuration.
pub fn reload_config(state: &BackendState) {
    let root = match state.workspace_root.read() {
        Ok(g) => g.clone(),
        Err(e) => {
            error!("Workspace root lock poisoned: {}", e);
            return;
        }
    };

    let Some(root) = root else {
        return;
    };

    let config = match LinterConfig::discover(&root) {
        Some(config_path) => {
            info!("Found config file: {}", config_path.display());
            match LinterConfig::from_file(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    error!("Failed to load config: {}", e);
                    return;
                }
            }
        }
        None => LinterConfig::new(),
    };

    match state.config.write() {
        Ok(mut guard) => {
            *guard = config;
            info!("Configuration reloaded");
        }
        Err(e) => error!("Config lock poisoned: {}", e),
    }
}
