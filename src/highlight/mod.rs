//! Syntax classification.
//!
//! This module provides:
//! - `Token` and `TokenKind`, classified byte ranges of a text
//! - `Language` and its detection from ids, paths and shebang lines
//! - `Tokenizer` and the built-in logos lexers for Python, Rust and JSON
//! - `Highlighter`, which turns any text into a gap-free partition of tokens

mod classify;
mod error;
mod language;
mod lexers;
mod token;

pub use classify::{classify, Classified, Highlighter, Tokenizer, Tokens};
pub use error::HighlightError;
pub use language::Language;
pub use lexers::{JsonTokenizer, PythonTokenizer, RustTokenizer};
pub use token::{Token, TokenKind};
