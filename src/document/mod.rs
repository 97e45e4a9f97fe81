//! Document state management and text utilities.
//!
//! This module provides:
//! - `LineIndex` for efficient byte offset <-> LSP position conversion
//! - `DocumentState` and `DocumentStore` for document lifecycle management
//! - `read_lossy` and `replace_all` for whole-document load and edit

mod file;
mod state;
mod text;

pub use file::{read_lossy, replace_all, replace_in_file};
pub use state::{resolve_language, DocumentState, DocumentStore};
pub use text::LineIndex;
