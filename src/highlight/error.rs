use thiserror::Error;

use super::Language;

/// Failures inside a highlighting pass.
///
/// None of these reach the editor: an unavailable tokenizer degrades to the
/// plain classification and an invalid range is dropped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HighlightError {
    #[error("no tokenizer available for {language}")]
    TokenizerUnavailable { language: Language },
    #[error("token range {start}..{end} is invalid for a text of {len} bytes")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },
}
