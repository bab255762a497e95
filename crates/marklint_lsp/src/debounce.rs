//! Debouncing utilities for LSP notifications.

use std::time::Duration;

use tower_lsp::lsp_types::Url;
use tracing::{debug, error};

use crate::state::{BackendState, SharedState};

/// Spawns a debounced validation task.
///
/// Waits for the configured delay, then runs `validate_fn` only if the
/// document is still at `version`.
pub fn spawn_debounced_validation<F, Fut>(state: SharedState, uri: Url, version: i32, validate_fn: F)
where
    F: FnOnce(Url, String, i32) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let delay = Duration::from_millis(state.debounce_ms());

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        match current_text(&state, &uri, version) {
            Some(text) => validate_fn(uri, text, version).await,
            None => debug!("Skipping stale validation of {} (v{})", uri, version),
        }
    });
}

/// Returns the document text if it is still at `version`.
fn current_text(state: &BackendState, uri: &Url, version: i32) -> Option<String> {
    let docs = match state.documents.read() {
        Ok(g) => g,
        Err(e) => {
            error!("Documents lock poisoned: {}", e);
            return None;
        }
    };

    docs.get(uri)
        .filter(|doc| doc.version == version)
        .map(|doc| doc.text.clone())
}
