//! Syntax highlighting engine with a language server front end.
//!
//! The core is [`Highlighter::classify`], which partitions a document's text
//! into keyword, string, comment, operator and plain tokens. The language
//! server publishes those tokens as LSP semantic tokens; [`restyle`] drives
//! any other editor surface.

use std::sync::{Arc, OnceLock};

use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService};

mod document;
pub mod highlight;
mod lsp;
pub mod settings;
pub mod style;

pub use document::{
    read_lossy, replace_all, replace_in_file, resolve_language, DocumentState, DocumentStore,
    LineIndex,
};
pub use highlight::{classify, Highlighter, Language, Token, TokenKind};
pub use lsp::{
    legend, replace_all_edit, token_types, tokens_for_document, tokens_for_text, ReplaceAllArgs,
    REPLACE_ALL_COMMAND,
};
pub use settings::{discover_settings, load_settings, Settings};
pub use style::{restyle, Color, StyleSurface, TerminalSurface, Theme};

pub struct Backend {
    client: Client,
    documents: DocumentStore,
    highlighter: Highlighter,
    settings: OnceLock<Arc<Settings>>,
}

impl Backend {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            highlighter: Highlighter::builtin(),
            settings: OnceLock::new(),
        }
    }

    fn settings(&self) -> Arc<Settings> {
        self.settings.get().cloned().unwrap_or_default()
    }

    async fn replace_all(
        &self,
        arguments: Vec<serde_json::Value>,
    ) -> Result<Option<serde_json::Value>> {
        let args = ReplaceAllArgs::from_arguments(arguments).map_err(Error::invalid_params)?;

        let Some(doc) = self.documents.get(&args.uri) else {
            let message = format!("document not open: {}", args.uri);
            return Err(Error::invalid_params(message));
        };

        let Some((edit, count)) = replace_all_edit(&doc, &args) else {
            return Ok(Some(serde_json::Value::from(0)));
        };

        match self.client.apply_edit(edit).await {
            Ok(response) if response.applied => {
                tracing::debug!(uri = %args.uri, count, "applied replace-all");
                Ok(Some(serde_json::Value::from(count)))
            }
            Ok(response) => {
                let reason = response.failure_reason;
                tracing::warn!(uri = %args.uri, ?reason, "client rejected replace-all");
                Ok(Some(serde_json::Value::from(0)))
            }
            Err(e) => {
                tracing::warn!(uri = %args.uri, "failed to apply replace-all: {}", e);
                Err(e)
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let workspace_root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|f| f.uri.to_file_path().ok())
            .or_else(|| {
                #[allow(deprecated)]
                params.root_uri.as_ref()?.to_file_path().ok()
            });

        if let Some(root) = workspace_root {
            let (settings, settings_dir) = settings::discover_settings(&root);
            tracing::info!(dir = %settings_dir.display(), "loaded settings");
            let _ = self.settings.set(Arc::new(settings));
        } else {
            let _ = self.settings.set(Arc::new(Settings::default()));
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                semantic_tokens_provider: Some(
                    SemanticTokensServerCapabilities::SemanticTokensOptions(
                        SemanticTokensOptions {
                            legend: lsp::legend(),
                            full: Some(SemanticTokensFullOptions::Bool(true)),
                            range: None,
                            work_done_progress_options: WorkDoneProgressOptions::default(),
                        },
                    ),
                ),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![REPLACE_ALL_COMMAND.to_string()],
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "hlsp language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.documents.open(
            doc.uri,
            Some(doc.language_id.as_str()),
            doc.text,
            doc.version,
            &self.settings(),
        );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // We use FULL sync, so there's exactly one change with the full text
        if let Some(change) = params.content_changes.into_iter().next() {
            self.documents.update(
                params.text_document.uri,
                change.text,
                params.text_document.version,
            );
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.close(&params.text_document.uri);
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        let uri = &params.text_document.uri;

        let Some(doc) = self.documents.get(uri) else {
            return Ok(None);
        };

        let tokens = lsp::tokens_for_document(&self.highlighter, &doc);
        tracing::trace!(%uri, count = tokens.len(), "semantic tokens");

        Ok(Some(SemanticTokensResult::Tokens(SemanticTokens {
            result_id: None,
            data: tokens,
        })))
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        match params.command.as_str() {
            REPLACE_ALL_COMMAND => self.replace_all(params.arguments).await,
            other => Err(Error::invalid_params(format!("unknown command: {}", other))),
        }
    }
}

pub fn create_service() -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::new(Backend::new)
}
