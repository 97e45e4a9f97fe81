use logos::{Lexer, Logos};

use super::{bump_past, collect, Classify};
use crate::highlight::{HighlightError, Token, TokenKind, Tokenizer};

/// Rust tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTokenizer;

impl Tokenizer for RustTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, HighlightError> {
        Ok(collect(RustLexeme::lexer(text)))
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RustLexeme {
    #[token("as")]
    #[token("async")]
    #[token("await")]
    #[token("break")]
    #[token("const")]
    #[token("continue")]
    #[token("crate")]
    #[token("dyn")]
    #[token("else")]
    #[token("enum")]
    #[token("extern")]
    #[token("false")]
    #[token("fn")]
    #[token("for")]
    #[token("if")]
    #[token("impl")]
    #[token("in")]
    #[token("let")]
    #[token("loop")]
    #[token("match")]
    #[token("mod")]
    #[token("move")]
    #[token("mut")]
    #[token("pub")]
    #[token("ref")]
    #[token("return")]
    #[token("self")]
    #[token("Self")]
    #[token("static")]
    #[token("struct")]
    #[token("super")]
    #[token("trait")]
    #[token("true")]
    #[token("type")]
    #[token("unsafe")]
    #[token("use")]
    #[token("where")]
    #[token("while")]
    Keyword,

    #[regex(r#"b?"([^"\\]|\\(.|\n))*"?"#)]
    #[regex(r#"b?'([^'\\\r\n]|\\[^\r\nux]|\\x[0-9a-fA-F]{2}|\\u\{[0-9a-fA-F]{1,6}\})'"#)]
    String,

    #[regex(r#"b?r#*""#, raw_string)]
    RawString,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"&&|\|\||<<=?|>>=?|->|=>|\.\.[.=]?|[-+*/%^!&|<>=]=?|\?")]
    Operator,

    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*")]
    #[regex(r"r#[\p{XID_Start}_]\p{XID_Continue}*")]
    Ident,

    #[regex(r"'[\p{XID_Start}_]\p{XID_Continue}*")]
    Lifetime,

    #[regex(r"[0-9][0-9a-zA-Z_]*")]
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9a-zA-Z_]*")]
    Number,
}

impl Classify for RustLexeme {
    fn kind(&self) -> TokenKind {
        match self {
            RustLexeme::Keyword => TokenKind::Keyword,
            RustLexeme::String | RustLexeme::RawString => TokenKind::String,
            RustLexeme::LineComment | RustLexeme::BlockComment => TokenKind::Comment,
            RustLexeme::Operator => TokenKind::Operator,
            RustLexeme::Ident | RustLexeme::Lifetime | RustLexeme::Number => TokenKind::Plain,
        }
    }
}

/// Extend a raw string to the quote followed by as many `#` as it opened with.
fn raw_string(lex: &mut Lexer<'_, RustLexeme>) {
    let hashes = lex.slice().bytes().filter(|&b| b == b'#').count();
    let closing = format!("\"{}", "#".repeat(hashes));
    bump_past(lex, &closing);
}

/// Extend a block comment past its matching `*/`. Block comments nest.
fn block_comment(lex: &mut Lexer<'_, RustLexeme>) {
    let rest = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < rest.len() {
        if rest[i..].starts_with(b"/*") {
            depth += 1;
            i += 2;
        } else if rest[i..].starts_with(b"*/") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lex.bump(i);
                return;
            }
        } else {
            i += 1;
        }
    }
    lex.bump(rest.len());
}
