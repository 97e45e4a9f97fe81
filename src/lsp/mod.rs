//! LSP protocol feature implementations.
//!
//! This module provides implementations for LSP features:
//! - Semantic tokens for syntax highlighting
//! - Workspace commands that edit whole documents

mod commands;
mod semantic_tokens;

pub use commands::{replace_all_edit, ReplaceAllArgs, REPLACE_ALL_COMMAND};
pub use semantic_tokens::{legend, token_types, tokens_for_document, tokens_for_text};
