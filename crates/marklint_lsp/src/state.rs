//! LSP Backend state management.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tower_lsp::lsp_types::Url;
use tracing::error;

use marklint_core::{DEFAULT_DEBOUNCE_MS, LinterConfig};

/// Document content and version cache.
#[derive(Debug)]
pub(crate) struct DocumentData {
    pub text: String,
    pub version: i32,
}

/// Shared backend state.
#[derive(Debug)]
pub(crate) struct BackendState {
    /// Open documents by URI.
    pub documents: RwLock<HashMap<Url, DocumentData>>,
    /// Workspace configuration.
    pub config: RwLock<LinterConfig>,
    /// Workspace root path.
    pub workspace_root: RwLock<Option<PathBuf>>,
}

impl BackendState {
    /// Creates a new empty state.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            config: RwLock::new(LinterConfig::new()),
            workspace_root: RwLock::new(None),
        }
    }

    /// Returns the cached text of an open document.
    pub fn document_text(&self, uri: &Url) -> Option<String> {
        match self.documents.read() {
            Ok(docs) => docs.get(uri).map(|doc| doc.text.clone()),
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                None
            }
        }
    }

    /// Returns the configured debounce delay.
    pub fn debounce_ms(&self) -> u64 {
        match self.config.read() {
            Ok(config) => config.debounce_ms,
            Err(e) => {
                error!("Config lock poisoned: {}", e);
                DEFAULT_DEBOUNCE_MS
            }
        }
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for shared state.
pub type SharedState = Arc<BackendState>;
