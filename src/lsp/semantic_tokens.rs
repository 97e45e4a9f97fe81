//! Semantic tokens for syntax highlighting.

use tower_lsp::lsp_types::{SemanticToken, SemanticTokenType, SemanticTokensLegend};

use crate::document::{DocumentState, LineIndex};
use crate::highlight::{Highlighter, Token, TokenKind};

/// Token type indices (must match LEGEND order).
pub mod token_types {
    pub const KEYWORD: u32 = 0;
    pub const STRING: u32 = 1;
    pub const COMMENT: u32 = 2;
    pub const OPERATOR: u32 = 3;
}

/// Get the semantic tokens legend for capability declaration.
pub fn legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: vec![
            SemanticTokenType::KEYWORD,
            SemanticTokenType::STRING,
            SemanticTokenType::COMMENT,
            SemanticTokenType::OPERATOR,
        ],
        token_modifiers: vec![],
    }
}

/// Legend index for a token class. Plain text is not sent to the client.
fn token_type(kind: TokenKind) -> Option<u32> {
    match kind {
        TokenKind::Keyword => Some(token_types::KEYWORD),
        TokenKind::String => Some(token_types::STRING),
        TokenKind::Comment => Some(token_types::COMMENT),
        TokenKind::Operator => Some(token_types::OPERATOR),
        TokenKind::Plain => None,
    }
}

/// A single-line token before delta encoding.
#[derive(Debug, Clone, PartialEq)]
struct RawToken {
    line: u32,
    start: u32,
    length: u32,
    token_type: u32,
}

/// Split `token` into one piece per line it touches, in UTF-16 units.
///
/// Clients are not required to support tokens spanning lines.
fn split_lines(token: &Token, token_type: u32, line_index: &LineIndex, out: &mut Vec<RawToken>) {
    let first = line_index.line_of(token.start);
    let last = line_index.line_of(token.end.saturating_sub(1).max(token.start));

    for line in first..=last {
        let Some(span) = line_index.line_span(line) else {
            break;
        };
        let start = token.start.max(span.start);
        let end = token.end.min(span.end);
        if start >= end {
            continue;
        }

        out.push(RawToken {
            line: line as u32,
            start: line_index.utf16_len(span.start..start),
            length: line_index.utf16_len(start..end),
            token_type,
        });
    }
}

/// Convert raw tokens to delta-encoded semantic tokens.
fn encode_tokens(tokens: &[RawToken]) -> Vec<SemanticToken> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut prev_line = 0u32;
    let mut prev_start = 0u32;

    for token in tokens {
        let delta_line = token.line - prev_line;
        let delta_start = if delta_line == 0 {
            token.start - prev_start
        } else {
            token.start
        };

        result.push(SemanticToken {
            delta_line,
            delta_start,
            length: token.length,
            token_type: token.token_type,
            token_modifiers_bitset: 0,
        });

        prev_line = token.line;
        prev_start = token.start;
    }

    result
}

/// Generate semantic tokens for classified text.
pub fn tokens_for_text<I>(line_index: &LineIndex, tokens: I) -> Vec<SemanticToken>
where
    I: IntoIterator<Item = Token>,
{
    let mut raw = Vec::new();
    for token in tokens {
        if let Some(token_type) = token_type(token.kind) {
            split_lines(&token, token_type, line_index, &mut raw);
        }
    }
    encode_tokens(&raw)
}

/// Classify a document and generate its semantic tokens.
pub fn tokens_for_document(highlighter: &Highlighter, doc: &DocumentState) -> Vec<SemanticToken> {
    let classified = highlighter.classify(doc.text(), doc.language);
    tokens_for_text(&doc.line_index, &classified)
}
