//! marklint LSP Server
//!
//! Language Server Protocol implementation for marklint.
//! Provides real-time Markdown diagnostics, quick fixes and a heading
//! outline in editors.

mod config;
mod conversion;
mod debounce;
mod handler;
mod state;

use std::sync::Arc;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, error, info};

use marklint_core::Diagnostic as MarklintDiagnostic;

use crate::conversion::to_lsp_diagnostic;
use crate::state::{BackendState, SharedState};

/// The LSP backend for marklint.
#[derive(Clone)]
pub struct Backend {
    /// LSP client for sending notifications.
    client: Client,
    /// Shared state
    state: SharedState,
}

impl Backend {
    /// Creates a new backend with the given client.
    ///
    /// Starts with the default configuration; the workspace config is
    /// loaded during `initialize`.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(BackendState::new()),
        }
    }

    /// Validates a document and publishes diagnostics.
    async fn validate_document(&self, uri: Url, text: String, version: Option<i32>) {
        debug!("Validating document: {}", uri);

        let diagnostics = self.lint_text(&text).await;

        let lsp_diagnostics: Vec<Diagnostic> = diagnostics
            .iter()
            .filter_map(|d| to_lsp_diagnostic(d, &text))
            .collect();

        self.client
            .publish_diagnostics(uri, lsp_diagnostics, version)
            .await;
    }

    /// Lints text off the async runtime.
    async fn lint_text(&self, text: &str) -> Vec<MarklintDiagnostic> {
        let text = text.to_string();

        match tokio::task::spawn_blocking(move || marklint_core::lint(&text)).await {
            Ok(diagnostics) => diagnostics,
            Err(e) => {
                error!("Lint task failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Runs the fixer off the async runtime.
    async fn fix_text(&self, text: &str) -> String {
        let owned = text.to_string();

        match tokio::task::spawn_blocking(move || marklint_core::fix(&owned)).await {
            Ok(fixed) => fixed,
            Err(e) => {
                error!("Fix task failed: {}", e);
                text.to_string()
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handler::handle_initialize(&self.state, params)
    }

    async fn initialized(&self, _: InitializedParams) {
        handler::handle_initialized(&self.client).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handler::handle_shutdown()
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handler::handle_did_open(self, params).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handler::handle_did_change(self, params);
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        handler::handle_did_save(self, params).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handler::handle_did_close(self, params).await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        handler::handle_did_change_watched_files(&self.state, params);
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        handler::handle_code_action(self, params).await
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        handler::handle_document_symbol(&self.state, params)
    }
}

/// Starts the LSP server on stdio.
///
/// This function does not return unless an error occurs or the server shuts down.
pub async fn run() {
    info!("marklint LSP server starting...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
