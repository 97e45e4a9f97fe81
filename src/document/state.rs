//! Open document tracking for the language server.

use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

use crate::highlight::Language;
use crate::settings::Settings;

use super::text::LineIndex;

/// State for a single open document.
///
/// Only the text is kept; highlight tokens are derived from it on request.
#[derive(Debug, Clone)]
pub struct DocumentState {
    /// Pre-computed line index, which also owns the text.
    pub line_index: LineIndex,
    pub language: Language,
    /// Document version from the client.
    pub version: i32,
}

impl DocumentState {
    pub fn new(text: String, language: Language, version: i32) -> Self {
        Self {
            line_index: LineIndex::new(text),
            language,
            version,
        }
    }

    pub fn text(&self) -> &str {
        self.line_index.source()
    }
}

/// Thread-safe storage for open documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Arc<DocumentState>>,
}

impl DocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Open a document, resolving its language from settings, the client's
    /// language id, the URI path and the text.
    pub fn open(
        &self,
        uri: Url,
        language_id: Option<&str>,
        text: String,
        version: i32,
        settings: &Settings,
    ) -> Arc<DocumentState> {
        let path = uri.to_file_path().ok();
        let language = resolve_language(path.as_deref(), language_id, &text, settings);
        tracing::debug!(%uri, language = language.id(), version, "opened document");
        self.insert(uri, DocumentState::new(text, language, version))
    }

    /// Replace a document's text, keeping the language it was opened with.
    ///
    /// Unknown documents are opened as plain text.
    pub fn update(&self, uri: Url, text: String, version: i32) -> Arc<DocumentState> {
        let language = self
            .documents
            .get(&uri)
            .map(|doc| doc.language)
            .unwrap_or_default();
        self.insert(uri, DocumentState::new(text, language, version))
    }

    fn insert(&self, uri: Url, state: DocumentState) -> Arc<DocumentState> {
        let state = Arc::new(state);
        self.documents.insert(uri, Arc::clone(&state));
        state
    }

    /// Close a document.
    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Get a document's state.
    pub fn get(&self, uri: &Url) -> Option<Arc<DocumentState>> {
        self.documents.get(uri).map(|r| Arc::clone(&r))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Resolve the language of a document.
///
/// An extension mapping from settings wins over everything else, then the
/// explicit id, the path, and a shebang line.
pub fn resolve_language(
    path: Option<&Path>,
    language_id: Option<&str>,
    text: &str,
    settings: &Settings,
) -> Language {
    path.and_then(|p| settings.language_for(p))
        .unwrap_or_else(|| Language::detect(language_id, path, text))
}
